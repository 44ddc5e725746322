pub mod config;
pub mod error;
pub mod result;
pub mod selection;

pub use config::AppConfig;
pub use error::MinervaError;
pub use result::MinervaResult;
pub use selection::SelectionState;
