use minerva_domain::TaskRepository;

use crate::cli::TaskAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::List => {
            let tasks = ctx.directory.list_tasks().await?;
            output::output_list(tasks);
        }
        TaskAction::My { profile } => {
            let tasks = ctx.directory.list_my_tasks(profile).await?;
            output::output_list(tasks);
        }
        TaskAction::Get { id } => {
            let task = ctx
                .directory
                .list_tasks()
                .await?
                .into_iter()
                .find(|t| t.id == id);
            match task {
                Some(task) => output::output_success(&task),
                None => return output::output_error(&format!("Task not found: {}", id)),
            }
        }
    }
    Ok(())
}
