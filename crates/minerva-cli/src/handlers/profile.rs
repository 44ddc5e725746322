use minerva_domain::{ProfileRepository, ProfileUpdate};

use crate::cli::{ProfileAction, ProfileUpdateArgs};
use crate::context::CliContext;
use crate::output;

pub async fn handle(ctx: &CliContext, action: ProfileAction) -> anyhow::Result<()> {
    match action {
        ProfileAction::List => {
            let profiles = ctx.directory.list_profiles().await?;
            output::output_list(profiles);
        }
        ProfileAction::Get { id } => match ctx.directory.get_profile(id).await? {
            Some(profile) => output::output_success(&profile),
            None => return output::output_error(&format!("Profile not found: {}", id)),
        },
        ProfileAction::Update(args) => {
            let ProfileUpdateArgs {
                id,
                username,
                full_name,
                avatar_url,
            } = args;
            let updates = ProfileUpdate {
                username,
                full_name,
                avatar_url,
                last_login: None,
            };
            match ctx.directory.update_profile(id, updates).await {
                Ok(profile) => output::output_success(&profile),
                Err(e) => return output::output_error(&e.to_string()),
            }
        }
    }
    Ok(())
}
