//! Kanap CLI - terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! kanap products
//! kanap product 107fb5b75607497b96722bda5b504926
//!
//! # Fill and review the cart
//! kanap add 107fb5b75607497b96722bda5b504926 --color Blue --quantity 2
//! kanap set-quantity 107fb5b75607497b96722bda5b504926 Blue 3
//! kanap cart
//!
//! # Place the order
//! kanap checkout --first-name Ada --last-name Lovelace \
//!     --address "12 rue des Lilas" --city Paris --email ada@example.com
//! kanap confirmation
//! ```
//!
//! The cart is persisted under `KANAP_DATA_DIR` between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kanap_storefront::{AppError, Notice, Storefront, StorefrontConfig};

mod commands;
mod output;
mod views;

#[derive(Parser)]
#[command(name = "kanap")]
#[command(author, version, about = "Kanap storefront in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every product in the catalog
    Products,
    /// Show one product
    Product {
        /// Product ID
        id: String,
    },
    /// Add a product in a given colour to the cart
    Add {
        /// Product ID
        id: String,

        /// Colour, as offered by the product
        #[arg(short, long)]
        color: String,

        /// Number of units (1 to 100)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show the cart with totals
    Cart,
    /// Change the quantity of a cart line (0 or less removes it)
    SetQuantity {
        /// Product ID
        id: String,

        /// Colour of the line
        color: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a cart line
    Remove {
        /// Product ID
        id: String,

        /// Colour of the line
        color: String,
    },
    /// Validate contact details and place the order
    Checkout(commands::checkout::ContactArgs),
    /// Show the identifier of the last confirmed order
    Confirmation,
}

/// Errors surfaced by a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("Failed to render view: {0}")]
    Render(#[from] askama::Error),
}

impl CliError {
    /// Convert into the notice shown to the user.
    fn into_notice(self) -> Notice {
        match self {
            Self::App(err) => err.into_notice(),
            Self::Render(err) => {
                let event_id = sentry::capture_error(&err);
                tracing::error!(error = %err, sentry_event_id = %event_id, "View rendering failed");
                Notice::error("Something went wrong. Please try again.")
            }
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
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
    // Logs go to stderr; stdout carries the rendered views
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kanap_storefront=info,kanap_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            output::notice(&AppError::from(e).into_notice());
            return std::process::ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    match run(cli, config).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            output::notice(&e.into_notice());
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CliError> {
    let session = Storefront::new(config)?;

    match cli.command {
        Commands::Products => commands::catalog::products(&session).await?,
        Commands::Product { id } => commands::catalog::product(&session, &id).await?,
        Commands::Add {
            id,
            color,
            quantity,
        } => commands::cart::add(&session, &id, &color, quantity).await?,
        Commands::Cart => commands::cart::show(&session).await?,
        Commands::SetQuantity {
            id,
            color,
            quantity,
        } => commands::cart::set_quantity(&session, &id, &color, quantity)?,
        Commands::Remove { id, color } => commands::cart::remove(&session, &id, &color)?,
        Commands::Checkout(contact) => commands::checkout::checkout(&session, contact).await?,
        Commands::Confirmation => commands::checkout::confirmation(&session)?,
    }
    Ok(())
}
