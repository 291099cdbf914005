//! CLI command handlers.
//!
//! Each submodule drives one back-office page through its view:
//!
//! - [`auth`] - login, logout, whoami and the tab list
//! - [`favorites`] - pinned items
//! - [`files`] - archives and financial documents
//! - [`partners`] - partner directory
//! - [`products`] - structured products and reservation review
//! - [`users`] - accounts, profile and password
//! - [`notifications`] - notification list and `watch`
//! - [`cms`] - page content editing
//! - [`config_cmd`] - configuration inspection and shell completions

pub mod auth;
pub mod cms;
pub mod config_cmd;
pub mod favorites;
pub mod files;
pub mod notifications;
pub mod partners;
pub mod products;
pub mod users;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::api::ApiClient;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::session::SessionStore;
use crate::ui;
use crate::views::stats::StatsSource;
use crate::views::{LOADING_MESSAGE, ListSource, ListView};

/// Everything a command needs: effective config, session store and a
/// client carrying the stored session, if any.
pub struct Context {
    pub config: Config,
    pub store: SessionStore,
    pub client: ApiClient,
}

impl Context {
    /// Load config and session from disk and build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is invalid or the session file
    /// cannot be read.
    pub fn load(config: Config) -> Result<Self> {
        let store = SessionStore::open_default()?;
        let mut client = ApiClient::new(&config.api).context("Failed to create API client")?;
        if let Some(session) = store.load()? {
            debug!(path = %store.path().display(), "Loaded session");
            client = client.with_session(session);
        }
        Ok(Self {
            config,
            store,
            client,
        })
    }
}

/// Run a parsed command line.
///
/// # Errors
///
/// Returns the first error raised by the command.
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?.with_base_url_override(cli.api_url);

    // These never talk to the backend.
    match cli.command {
        Command::Config(cmd) => return config_cmd::execute(&config, cmd),
        Command::Completions { shell } => {
            config_cmd::completions(shell);
            return Ok(());
        },
        _ => {},
    }

    let validation = config.validate()?;
    ui::print_warnings(&validation.warnings);

    let ctx = Context::load(config)?;
    match cli.command {
        Command::Login { email, password } => auth::login(&ctx, &email, password).await,
        Command::Logout => auth::logout(&ctx),
        Command::Whoami => auth::whoami(&ctx),
        Command::Tabs => auth::tabs(&ctx),
        Command::Favorites(cmd) => favorites::execute(&ctx, cmd).await,
        Command::Archives(cmd) => {
            files::execute(&ctx, crate::models::FileCollection::Archives, cmd).await
        },
        Command::Documents(cmd) => {
            files::execute(&ctx, crate::models::FileCollection::FinancialDocuments, cmd).await
        },
        Command::Partners(cmd) => partners::execute(&ctx, cmd).await,
        Command::Products(cmd) => products::execute(&ctx, cmd).await,
        Command::Reservations(cmd) => products::review(&ctx, cmd).await,
        Command::Users(cmd) => users::execute(&ctx, cmd).await,
        Command::Notifications(cmd) => notifications::execute(&ctx, cmd).await,
        Command::Cms(cmd) => cms::execute(&ctx, cmd).await,
        Command::Stats => show(&ctx, &mut ListView::new(StatsSource)).await,
        Command::Config(_) | Command::Completions { .. } => Ok(()),
    }
}

/// Load a view behind the spinner and print it.
pub async fn show<S: ListSource>(ctx: &Context, view: &mut ListView<S>) -> Result<()> {
    ui::with_spinner(LOADING_MESSAGE, view.load(&ctx.client)).await?;
    println!("{}", view.render());
    Ok(())
}
