//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::constants::{API_URL_ENV, PASSWORD_ENV};
use crate::logging::LogFormat;
use crate::models::{ReservationStatus, Role};

#[derive(Parser, Debug)]
#[command(name = "cabinet", version)]
#[command(about = "Back-office client for the wealth-management cabinet API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Backend base URL, overrides the config file
    #[arg(long, env = API_URL_ENV, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        email: String,
        /// Password; read from stdin when omitted
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List the back-office sections available to the signed-in user
    Tabs,
    /// Pinned items
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Archived files
    #[command(subcommand)]
    Archives(FilesCommand),
    /// Financial documents
    #[command(subcommand)]
    Documents(FilesCommand),
    /// Partner directory
    #[command(subcommand)]
    Partners(PartnersCommand),
    /// Structured products
    #[command(subcommand)]
    Products(ProductsCommand),
    /// Reservation review (admin)
    #[command(subcommand)]
    Reservations(ReservationsCommand),
    /// User accounts
    #[command(subcommand)]
    Users(UsersCommand),
    /// In-app notifications
    #[command(subcommand)]
    Notifications(NotificationsCommand),
    /// Marketing page content (admin)
    #[command(subcommand)]
    Cms(CmsCommand),
    /// Simulator usage statistics (admin)
    Stats,
    /// Inspect the configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions { shell: Shell },
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// List favorites grouped by type
    List {
        /// Only this item type (document, archive, product, ...)
        #[arg(long = "type")]
        item_type: Option<String>,
    },
    /// Pin an item
    Add {
        #[arg(long = "type")]
        item_type: String,
        #[arg(long)]
        item_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
    /// Unpin a favorite by its id
    Remove { id: String },
}

#[derive(Args, Debug, Default)]
pub struct FileFilterArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    List(FileFilterArgs),
    /// Upload a file (admin)
    Upload {
        file: Option<PathBuf>,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },
    /// Download a file into the downloads directory
    Download {
        id: String,
        /// Target directory, overrides `downloads.dir`
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Delete a file (admin)
    Delete { id: String },
}

#[derive(Args, Debug, Default)]
pub struct PartnerArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
    #[arg(long)]
    pub logo_url: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PartnersCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Add a partner (admin)
    Add(PartnerArgs),
    /// Change some fields of a partner (admin)
    Update {
        id: String,
        #[command(flatten)]
        fields: PartnerArgs,
    },
    /// Remove a partner (admin)
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    List {
        /// Include products closed to reservations
        #[arg(long)]
        all: bool,
    },
    /// Reserve an amount on a product
    Reserve {
        product_id: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReservationsCommand {
    List {
        #[arg(long)]
        status: Option<ReservationStatus>,
    },
    Approve { id: String },
    Reject { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List accounts (admin)
    List {
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Update a profile, your own by default
    Profile {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        nom: Option<String>,
        #[arg(long)]
        prenom: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Change a password, your own by default
    Password {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        current: String,
        #[arg(long = "new")]
        new_password: String,
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotificationsCommand {
    List {
        #[arg(long)]
        unread: bool,
    },
    /// Mark one notification read
    Read { id: String },
    /// Mark every notification read
    ReadAll,
    Delete { id: String },
    /// Poll and print new notifications until interrupted
    Watch {
        /// Seconds between polls, overrides `notifications.poll_interval_secs`
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CmsCommand {
    /// Show the content of a page
    Show { page: String },
    /// Change some fields of a page
    Set {
        page: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Header image URL, see `cms upload-image`
        #[arg(long)]
        image: Option<String>,
    },
    /// Upload a header image and print its URL
    UploadImage { file: Option<PathBuf> },
    /// List the editable pages
    Pages,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
    /// Check the configuration and print warnings
    Validate,
    /// Print the config and session file locations
    Path,
}
