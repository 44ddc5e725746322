use std::sync::Arc;

use serde_json::json;

use minerva_domain::{CreateTaskInput, Task, TaskFlowchart, TaskRepository};

use crate::cli::{FlowAction, FlowCreateArgs};
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: FlowAction) -> anyhow::Result<()> {
    let repository: Arc<dyn TaskRepository> = ctx.directory.clone();
    let mut chart = TaskFlowchart::new(repository);

    match action {
        FlowAction::Goals => {
            let placed = match chart.load().await {
                Ok(placed) => placed,
                Err(e) => return output::output_error(&e.to_string()),
            };
            output::output_success(json!({
                "goals": placed,
                "nodes": chart.nodes(),
                "edges": chart.edges(),
            }));
        }
        FlowAction::Expand { id } => {
            if let Err(e) = chart.load().await {
                return output::output_error(&e.to_string());
            }

            // An unknown id is treated as an absent selection: the engine
            // returns without touching the graph.
            let selected = find_task(ctx, id).await?;
            if let Some(task) = &selected {
                reveal_ancestors(&mut chart, ctx, task).await?;
            }
            chart.select(selected.clone());

            let added = match chart.expand(selected.as_ref()).await {
                Ok(added) => added,
                Err(e) => return output::output_error(&e.to_string()),
            };
            output::output_success(json!({
                "added": added,
                "nodes": chart.nodes(),
                "edges": chart.edges(),
            }));
        }
        FlowAction::Create(args) => {
            if let Err(e) = chart.load().await {
                return output::output_error(&e.to_string());
            }

            let unlocked = match args.unlocks {
                Some(id) => match find_task(ctx, id).await? {
                    Some(task) => {
                        reveal_ancestors(&mut chart, ctx, &task).await?;
                        Some(task)
                    }
                    None => return output::output_error(&format!("Task not found: {}", id)),
                },
                None => None,
            };

            let input = build_create_input(ctx, &args).map_err(|e| anyhow::anyhow!(e))?;
            let created = match chart.create_task(input, unlocked.as_ref()).await {
                Ok(created) => created,
                Err(e) => return output::output_error(&e.to_string()),
            };

            output::output_success(json!({
                "task": created.task,
                "warning": created.participant_warning.map(|w| w.to_string()),
                "nodes": chart.nodes(),
                "edges": chart.edges(),
            }));
        }
    }
    Ok(())
}

fn build_create_input(ctx: &CliContext, args: &FlowCreateArgs) -> Result<CreateTaskInput, String> {
    let due_date = match &args.due {
        Some(raw) => Some(
            chrono::DateTime::parse_from_rfc3339(raw)
                .map_err(|e| format!("invalid due date '{}': {}", raw, e))?
                .with_timezone(&chrono::Utc),
        ),
        None => None,
    };

    Ok(CreateTaskInput {
        title: args.title.clone(),
        status: None,
        team_id: args.team,
        assigned_to: args.assign,
        created_by: ctx.directory.actor(),
        due_date,
        participants: args.participants.clone(),
    })
}

async fn find_task(ctx: &CliContext, id: i64) -> anyhow::Result<Option<Task>> {
    Ok(ctx
        .directory
        .list_tasks()
        .await?
        .into_iter()
        .find(|t| t.id == id))
}

/// Expand the chain of tasks above `target` so its node (or its future
/// parent) is present and positioned before the target itself is touched.
/// Mirrors a user clicking down from the goal row.
async fn reveal_ancestors(
    chart: &mut TaskFlowchart,
    ctx: &CliContext,
    target: &Task,
) -> anyhow::Result<()> {
    let mut chain = vec![target.clone()];
    let mut cursor = target.clone();
    while let Some(unlocked_id) = cursor.unlocks {
        match find_task(ctx, unlocked_id).await? {
            Some(parent) => {
                chain.push(parent.clone());
                cursor = parent;
            }
            None => break,
        }
    }

    // chain is [target, ..., goal]; expand ancestors top-down so each
    // level anchors under the one above it.
    for task in chain.iter().skip(1).rev() {
        if chart.graph().contains_node(task.id) {
            chart.expand(Some(task)).await?;
        }
    }
    Ok(())
}
