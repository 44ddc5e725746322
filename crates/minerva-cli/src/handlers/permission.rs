use minerva_domain::PermissionRepository;
use serde_json::json;

use crate::cli::PermissionAction;
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: PermissionAction) -> anyhow::Result<()> {
    match action {
        PermissionAction::List => {
            let grants = ctx.directory.list_permissions().await?;
            output::output_list(grants);
        }
        PermissionAction::Grant {
            profile,
            permission,
        } => {
            ctx.directory.grant(profile, permission).await?;
            output::output_success(json!({
                "granted": permission,
                "profile": profile.to_string(),
            }));
        }
        PermissionAction::Revoke {
            profile,
            permission,
        } => {
            ctx.directory.revoke(profile, permission).await?;
            output::output_success(json!({
                "revoked": permission,
                "profile": profile.to_string(),
            }));
        }
    }
    Ok(())
}
