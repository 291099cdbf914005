//! View models for each back-office page.
//!
//! Every page follows the same cycle, captured once by [`ListView`]:
//!
//! 1. read the list scoped by the current filter (on open and on filter change)
//! 2. render it, or the page's empty-state message
//! 3. on a user action, send the write, then read the whole list again
//!
//! Writes never patch local state. A failed read leaves the previous items
//! in place and reports the error to the caller.
//!
//! - [`favorites`] - pinned items grouped by type
//! - [`files`] - archives and financial documents (upload, download, delete)
//! - [`partners`] - partner directory with client-side search
//! - [`reservations`] - structured products and reservation approval
//! - [`users`] - user administration, profile and password
//! - [`notifications`] - notification list and the background poller
//! - [`cms`] - marketing page content
//! - [`stats`] - simulator usage bar chart

pub mod cms;
pub mod favorites;
pub mod files;
pub mod filter;
pub mod notifications;
pub mod partners;
pub mod reservations;
pub mod stats;
pub mod users;

use async_trait::async_trait;
use std::future::Future;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, Result};

/// Text shown while a read is in flight.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Where a view is in its read cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// The read side of a page: how to fetch its records and how to show them.
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Send + Sync;
    type Filter: Default + Send + Sync;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the records matching `filter`.
    async fn fetch(&self, client: &ApiClient, filter: &Self::Filter) -> Result<Vec<Self::Item>>;

    /// One line of output for a record.
    fn render_item(&self, item: &Self::Item) -> String;

    /// Message shown when the result set is empty.
    fn empty_message(&self) -> &'static str;

    /// Render a non-empty result set. One line per record unless overridden.
    fn render(&self, items: &[Self::Item]) -> String {
        items
            .iter()
            .map(|item| self.render_item(item))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Local state of one page: current filter, last fetched records, read state.
pub struct ListView<S: ListSource> {
    source: S,
    filter: S::Filter,
    items: Vec<S::Item>,
    state: LoadState,
}

impl<S: ListSource> ListView<S> {
    pub fn new(source: S) -> Self {
        Self::with_filter(source, S::Filter::default())
    }

    pub fn with_filter(source: S, filter: S::Filter) -> Self {
        Self {
            source,
            filter,
            items: Vec::new(),
            state: LoadState::Idle,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn filter(&self) -> &S::Filter {
        &self.filter
    }

    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read the list for the current filter.
    ///
    /// On failure the previous items are kept and the state becomes
    /// [`LoadState::Failed`].
    pub async fn load(&mut self, client: &ApiClient) -> Result<&[S::Item]> {
        self.state = LoadState::Loading;
        match self.source.fetch(client, &self.filter).await {
            Ok(items) => {
                debug!(view = self.source.name(), count = items.len(), "Loaded");
                self.items = items;
                self.state = LoadState::Loaded;
                Ok(self.items.as_slice())
            },
            Err(e) => {
                warn!(view = self.source.name(), error = %e, "Load failed");
                self.state = LoadState::Failed(e.to_string());
                Err(e)
            },
        }
    }

    /// Replace the filter and read again.
    pub async fn set_filter(
        &mut self,
        client: &ApiClient,
        filter: S::Filter,
    ) -> Result<&[S::Item]> {
        self.filter = filter;
        self.load(client).await
    }

    /// Await a write, then re-read the list if it succeeded.
    ///
    /// The write's own result is returned; a failure of the follow-up read
    /// is returned instead, since the displayed list is then stale.
    pub async fn mutate<T, F>(&mut self, client: &ApiClient, write: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let outcome = write.await?;
        info!(view = self.source.name(), "Write succeeded, reloading");
        self.load(client).await?;
        Ok(outcome)
    }

    /// Text for the current state.
    pub fn render(&self) -> String {
        match &self.state {
            LoadState::Loading => LOADING_MESSAGE.to_string(),
            LoadState::Failed(message) if self.items.is_empty() => format!("Error: {message}"),
            _ if self.items.is_empty() => self.source.empty_message().to_string(),
            _ => self.source.render(&self.items),
        }
    }
}
