pub mod directory;
pub mod store;
pub mod traits;

pub use directory::{DirectoryData, JsonDirectory, TaskParticipant};
pub use store::*;
pub use traits::*;
