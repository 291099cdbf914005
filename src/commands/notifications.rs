use anyhow::Result;
use std::time::Duration;
use tracing::info;

use super::{Context, show};
use crate::cli::NotificationsCommand;
use crate::models::Id;
use crate::views::{ListSource, ListView};
use crate::views::notifications::{
    self, NotificationPoller, NotificationsFilter, NotificationsSource,
};

pub async fn execute(ctx: &Context, cmd: NotificationsCommand) -> Result<()> {
    let mut view = ListView::new(NotificationsSource);
    match cmd {
        NotificationsCommand::List { unread } => {
            let filter = NotificationsFilter {
                unread_only: unread,
            };
            return show(ctx, &mut ListView::with_filter(NotificationsSource, filter)).await;
        },
        NotificationsCommand::Read { id } => {
            view.mutate(&ctx.client, notifications::mark_read(&ctx.client, &Id::new(id)))
                .await?;
        },
        NotificationsCommand::ReadAll => {
            view.mutate(&ctx.client, notifications::mark_all_read(&ctx.client))
                .await?;
        },
        NotificationsCommand::Delete { id } => {
            view.mutate(&ctx.client, notifications::delete(&ctx.client, &Id::new(id)))
                .await?;
        },
        NotificationsCommand::Watch { interval } => return watch(ctx, interval).await,
    }
    println!("{}", view.render());
    Ok(())
}

/// Print the unread count, then every new notification, until Ctrl+C.
async fn watch(ctx: &Context, interval: Option<u64>) -> Result<()> {
    ctx.client.require_session()?;
    let interval = interval.map_or_else(
        || ctx.config.notifications.poll_interval(),
        Duration::from_secs,
    );
    let (mut rx, handle) = NotificationPoller::new(ctx.client.clone(), interval).spawn();
    let source = NotificationsSource;

    println!("Watching notifications every {}s, Ctrl+C to stop", interval.as_secs());
    let mut last_unread = None;
    loop {
        tokio::select! {
            snapshot = rx.recv() => {
                let Some(snapshot) = snapshot else { break };
                for n in &snapshot.new {
                    println!("{}", source.render_item(n));
                }
                if last_unread != Some(snapshot.unread) {
                    println!("{} unread", snapshot.unread);
                    last_unread = Some(snapshot.unread);
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping notification watch");
                break;
            },
        }
    }

    handle.abort();
    Ok(())
}
