use minerva_domain::{team_color, TeamRepository};
use serde_json::json;

use crate::cli::TeamAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: TeamAction) -> anyhow::Result<()> {
    match action {
        TeamAction::List => {
            let teams = ctx.directory.list_teams().await?;
            let items: Vec<_> = teams
                .into_iter()
                .map(|team| {
                    json!({
                        "id": team.id,
                        "name": team.name,
                        "color": team_color(Some(team.id)),
                    })
                })
                .collect();
            output::output_list(items);
        }
    }
    Ok(())
}
