//! Notification list and the background poller.
//!
//! The poller re-reads `/notifications` on a fixed interval and sends each
//! result to the consumer as a [`NotificationSnapshot`]. It runs until the
//! receiving side is dropped.

use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::ListSource;
use crate::api::{ApiClient, Result};
use crate::constants::MIN_RECOMMENDED_POLL_SECS;
use crate::models::{Id, Notification, unread_count};
use crate::utils::truncate;

/// Longest message shown in a list line.
const MESSAGE_WIDTH: usize = 80;

#[derive(Debug, Clone, Default)]
pub struct NotificationsFilter {
    pub unread_only: bool,
}

pub struct NotificationsSource;

#[async_trait]
impl ListSource for NotificationsSource {
    type Item = Notification;
    type Filter = NotificationsFilter;

    fn name(&self) -> &'static str {
        "notifications"
    }

    async fn fetch(
        &self,
        client: &ApiClient,
        filter: &NotificationsFilter,
    ) -> Result<Vec<Notification>> {
        let mut items = fetch_all(client).await?;
        if filter.unread_only {
            items.retain(|n| !n.is_read);
        }
        Ok(items)
    }

    fn render_item(&self, n: &Notification) -> String {
        let marker = if n.is_read { ' ' } else { '*' };
        let mut line = format!("{marker} [{}] {}", n.id, n.title);
        if !n.message.is_empty() {
            line.push_str(&format!(": {}", truncate(&n.message, MESSAGE_WIDTH)));
        }
        if let Some(at) = n.created_at {
            line.push_str(&format!(" ({})", at.format("%Y-%m-%d %H:%M")));
        }
        line
    }

    fn empty_message(&self) -> &'static str {
        "No notifications."
    }
}

async fn fetch_all(client: &ApiClient) -> Result<Vec<Notification>> {
    client.require_session()?;
    client.get_list("/notifications", &[]).await
}

/// `PUT /notifications/:id/read`.
pub async fn mark_read(client: &ApiClient, id: &Id) -> Result<()> {
    client.require_session()?;
    let _: serde_json::Value = client
        .put_empty(&format!("/notifications/{id}/read"))
        .await?;
    info!(id = %id, "Marked notification read");
    Ok(())
}

/// `PUT /notifications/read-all`.
pub async fn mark_all_read(client: &ApiClient) -> Result<()> {
    client.require_session()?;
    let _: serde_json::Value = client.put_empty("/notifications/read-all").await?;
    info!("Marked all notifications read");
    Ok(())
}

/// `DELETE /notifications/:id`.
pub async fn delete(client: &ApiClient, id: &Id) -> Result<()> {
    client.require_session()?;
    let _: serde_json::Value = client.delete(&format!("/notifications/{id}")).await?;
    info!(id = %id, "Deleted notification");
    Ok(())
}

/// One poll result.
#[derive(Debug, Clone)]
pub struct NotificationSnapshot {
    pub notifications: Vec<Notification>,
    pub unread: usize,
    /// Unread notifications absent from the previous snapshot. Empty on the
    /// first poll.
    pub new: Vec<Notification>,
}

/// Periodic reader of the notification list.
pub struct NotificationPoller {
    client: ApiClient,
    interval: Duration,
    seen: Option<HashSet<Id>>,
}

impl NotificationPoller {
    /// A zero interval is replaced by [`MIN_RECOMMENDED_POLL_SECS`].
    pub fn new(client: ApiClient, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!("Zero poll interval, using {MIN_RECOMMENDED_POLL_SECS}s");
            Duration::from_secs(MIN_RECOMMENDED_POLL_SECS)
        } else {
            interval
        };
        Self {
            client,
            interval,
            seen: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Read once and build a snapshot relative to the previous poll.
    ///
    /// # Errors
    ///
    /// Returns the request error; the set of seen ids is left untouched.
    pub async fn poll(&mut self) -> Result<NotificationSnapshot> {
        let notifications = fetch_all(&self.client).await?;
        Ok(self.snapshot(notifications))
    }

    fn snapshot(&mut self, notifications: Vec<Notification>) -> NotificationSnapshot {
        let new = match &self.seen {
            Some(seen) => notifications
                .iter()
                .filter(|n| !n.is_read && !seen.contains(&n.id))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        self.seen = Some(notifications.iter().map(|n| n.id.clone()).collect());

        NotificationSnapshot {
            unread: unread_count(&notifications),
            notifications,
            new,
        }
    }

    /// Poll immediately, then every interval, sending each snapshot to `tx`.
    ///
    /// A failed read is logged and skipped. Returns once `tx` is closed.
    pub async fn run(mut self, tx: mpsc::Sender<NotificationSnapshot>) {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(interval = ?self.interval, "Starting notification poller");

        loop {
            tokio::select! {
                _ = interval.tick() => {},
                () = tx.closed() => break,
            }

            match self.poll().await {
                Ok(snapshot) => {
                    debug!(
                        total = snapshot.notifications.len(),
                        unread = snapshot.unread,
                        new = snapshot.new.len(),
                        "Polled notifications"
                    );
                    if tx.send(snapshot).await.is_err() {
                        break;
                    }
                },
                Err(e) => {
                    warn!(error = %e, "Notification poll failed");
                },
            }
        }

        debug!("Notification poller stopped");
    }

    /// Spawn [`Self::run`] on the current runtime and return the receiving end.
    pub fn spawn(self) -> (mpsc::Receiver<NotificationSnapshot>, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(self.run(tx));
        (rx, handle)
    }
}
