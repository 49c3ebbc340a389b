//! AKASHA CLI - Shopper session state from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add two medium Sage tanks to the cart
//! akasha cart add sage-tank --color Sage --size M --quantity 2
//!
//! # Show the cart with totals
//! akasha cart show
//!
//! # Toggle a product in the wishlist
//! akasha wishlist toggle flow-legging
//!
//! # Record a product view and list recently viewed products
//! akasha viewed add flow-legging
//! akasha viewed show --exclude flow-legging
//!
//! # Search the catalog
//! akasha search legging
//!
//! # Ask the Storefront API for the shop name
//! akasha shop name
//! ```
//!
//! State lives in `AKASHA_DATA_DIR` (one JSON document per key) and products
//! are resolved from the `AKASHA_CATALOG` file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use akasha_storefront::config::StorefrontConfig;
use akasha_storefront::error::AppError;

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "akasha")]
#[command(author, version, about = "AKASHA storefront session tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Manage recently viewed products
    Viewed {
        #[command(subcommand)]
        action: ViewedAction,
    },
    /// Search the catalog and manage recent searches
    Search {
        /// Search term
        term: Option<String>,

        /// List recent search terms
        #[arg(long, conflicts_with_all = ["term", "clear_recent"])]
        recent: bool,

        /// Forget recent search terms
        #[arg(long, conflicts_with = "term")]
        clear_recent: bool,
    },
    /// Welcome popup marker
    Popup {
        #[command(subcommand)]
        action: PopupAction,
    },
    /// Query the Shopify Storefront API
    Shop {
        #[command(subcommand)]
        action: ShopAction,
    },
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Add a product variant, merging with an existing line
    Add {
        /// Product id
        product_id: String,

        /// Color name (defaults to the product's first color)
        #[arg(short, long)]
        color: Option<String>,

        /// Size label
        #[arg(short, long)]
        size: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        product_id: String,
        #[arg(short, long)]
        color: String,
        #[arg(short, long)]
        size: String,
    },
    /// Set a line's quantity (0 or less removes it)
    Update {
        product_id: String,
        #[arg(short, long)]
        color: String,
        #[arg(short, long)]
        size: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line
    Clear,
    /// Show lines and totals
    Show,
}

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Add if absent, remove if present
    Toggle { product_id: String },
    /// Add a product
    Add { product_id: String },
    /// Remove a product
    Remove { product_id: String },
    /// Remove every product
    Clear,
    /// List products
    Show,
}

#[derive(Subcommand)]
pub enum ViewedAction {
    /// Record a product view
    Add { product_id: String },
    /// Forget all views
    Clear,
    /// List products, most recent first
    Show {
        /// Leave out the product currently being viewed
        #[arg(long)]
        exclude: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PopupAction {
    /// Whether the popup would show on the next visit
    Status,
    /// Record the popup as seen
    Dismiss,
}

#[derive(Subcommand)]
pub enum ShopAction {
    /// Print the shop name
    Name,
    /// Print the configured GraphQL endpoint
    Endpoint,
    /// Run a GraphQL document and print the `data` payload
    Query {
        /// GraphQL document
        document: String,

        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Quiet by default so command output stays readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "akasha_storefront=warn,akasha_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            AppError::from(e).report();
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, &config).await {
        e.report();
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), AppError> {
    match cli.command {
        Commands::Cart { action } => commands::cart::run(config, action)?,
        Commands::Wishlist { action } => commands::wishlist::run(config, action)?,
        Commands::Viewed { action } => commands::viewed::run(config, action)?,
        Commands::Search {
            term,
            recent,
            clear_recent,
        } => commands::search::run(config, term.as_deref(), recent, clear_recent)?,
        Commands::Popup { action } => commands::popup::run(config, &action)?,
        Commands::Shop { action } => commands::shop::run(config, action).await?,
    }
    Ok(())
}
