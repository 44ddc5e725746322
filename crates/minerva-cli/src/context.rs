use std::sync::Arc;

use minerva_core::MinervaResult;
use minerva_domain::ProfileId;
use minerva_persistence::JsonDirectory;

pub struct CliContext {
    pub directory: Arc<JsonDirectory>,
}

impl CliContext {
    pub async fn load(file_path: &str, actor: Option<ProfileId>) -> MinervaResult<Self> {
        let existed = std::path::Path::new(file_path).exists();
        let directory = JsonDirectory::open(file_path).await?.with_actor(actor);

        if !existed {
            directory.save().await?;
            tracing::info!("Created new data file: {}", file_path);
        }

        Ok(Self {
            directory: Arc::new(directory),
        })
    }
}
