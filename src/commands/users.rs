use anyhow::Result;

use super::{Context, show};
use crate::cli::UsersCommand;
use crate::models::{Id, ProfileUpdate};
use crate::views::ListView;
use crate::views::users::{self, UsersFilter, UsersSource};

pub async fn execute(ctx: &Context, cmd: UsersCommand) -> Result<()> {
    match cmd {
        UsersCommand::List { role, search } => {
            show(ctx, &mut ListView::with_filter(UsersSource, UsersFilter { role, search })).await
        },
        UsersCommand::Profile {
            user,
            nom,
            prenom,
            email,
        } => {
            let user_id = target_user(ctx, user)?;
            let update = ProfileUpdate { nom, prenom, email };
            users::update_profile(&ctx.client, &user_id, &update).await?;
            println!("Profile updated");
            Ok(())
        },
        UsersCommand::Password {
            user,
            current,
            new_password,
            confirm,
        } => {
            let user_id = target_user(ctx, user)?;
            users::change_password(&ctx.client, &user_id, &current, &new_password, &confirm)
                .await?;
            println!("Password changed");
            Ok(())
        },
    }
}

/// The `--user` argument, or the signed-in user's own id.
fn target_user(ctx: &Context, user: Option<String>) -> Result<Id> {
    if let Some(id) = user {
        return Ok(Id::new(id));
    }
    let session = ctx.client.require_session()?;
    session
        .user
        .as_ref()
        .map(|u| u.id.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("Stored session has no profile, pass --user or log in again")
        })
}
