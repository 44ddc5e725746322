use minerva_persistence::DirectoryData;
use serde_json::json;

use crate::cli::{ExportArgs, ImportArgs};
use crate::context::CliContext;
use crate::output;

pub async fn handle_export(ctx: &CliContext, args: ExportArgs) -> anyhow::Result<()> {
    let data = ctx.directory.export_data().await;
    let rendered = serde_json::to_string_pretty(&data)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            output::output_success(json!({ "exported": path }));
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

pub async fn handle_import(ctx: &CliContext, args: ImportArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.input)?;
    let data: DirectoryData = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("invalid directory data: {}", e))?;

    let counts = json!({
        "tasks": data.tasks.len(),
        "teams": data.teams.len(),
        "profiles": data.profiles.len(),
        "permissions": data.permissions.len(),
        "task_participants": data.task_participants.len(),
    });
    ctx.directory.import_data(data).await?;
    output::output_success(counts);
    Ok(())
}
