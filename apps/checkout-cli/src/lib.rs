//! # Checkout CLI Library
//!
//! The Electro World checkout form as an interactive terminal program.
//! `main.rs` only parses arguments and calls [`run`].
//!
//! ## Module Organization
//! ```text
//! checkout_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Command-line arguments
//! ├── session.rs      ◄─── Controller loop (read → dispatch → render)
//! ├── view.rs         ◄─── View model + text rendering
//! ├── catalog/
//! │   ├── mod.rs      ◄─── Provider trait, wire record, errors
//! │   ├── file.rs     ◄─── JSON file provider
//! │   ├── demo.rs     ◄─── Built-in catalog with simulated latency
//! │   └── loader.rs   ◄─── Fetch with retry + backoff
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── checkout.rs ◄─── Catalog status + order container
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing
//! │   ├── order.rs    ◄─── "+" / "-" commands
//! │   └── catalog.rs  ◄─── Load / reload
//! └── error.rs        ◄─── App error type
//! ```
//!
//! ## State Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │  CheckoutState   │ │  CatalogLoader   │ │    ConfigState       │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • Load status   │ │  • Provider      │ │  • Store name        │    │
//! │  │  • Catalog       │ │  • Retry policy  │ │  • Total policy      │    │
//! │  │  • Order         │ │                  │ │  • Catalog settings  │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │                                                                         │
//! │  All three live inside one Session on a current-thread runtime.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod error;
pub mod session;
pub mod state;
pub mod view;

use std::time::Duration;

use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog::{AnyProvider, CatalogLoader, JsonFileProvider, RetryPolicy, StaticProvider};
use cli::Cli;
use error::AppError;
use session::Session;
use state::ConfigState;

/// Runs the checkout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Checkout Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → checkout.toml → CHECKOUT_* environment                 │
/// │                                                                         │
/// │  3. Pick the Catalog Provider ────────────────────────────────────────► │
/// │     • --catalog, then catalog.path, then the built-in demo catalog      │
/// │                                                                         │
/// │  4. Load the Catalog ─────────────────────────────────────────────────► │
/// │     • "Loading catalog..." until the fetch settles                      │
/// │                                                                         │
/// │  5. Read Commands ────────────────────────────────────────────────────► │
/// │     • --script file or stdin, until `quit` or end of input              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), AppError> {
    init_tracing();

    let config = ConfigState::load(cli.config.clone())?;

    if cli.print_config {
        let rendered = toml::to_string_pretty(&config)
            .map_err(|e| AppError::internal(format!("Failed to render config: {e}")))?;
        print!("{rendered}");
        return Ok(());
    }

    info!(store = %config.store_name, policy = %config.total_policy, "Starting checkout");

    let provider = select_provider(&cli, &config)?;
    let loader = CatalogLoader::new(provider, RetryPolicy::from(&config.catalog));

    let input = open_input(&cli).await?;

    let mut session = Session::new(config, loader, std::io::stdout());
    session.start().await?;
    session.run(input).await
}

/// Picks the catalog provider.
fn select_provider(cli: &Cli, config: &ConfigState) -> Result<AnyProvider, AppError> {
    if let Some(path) = cli.catalog.as_ref().or(config.catalog.path.as_ref()) {
        return Ok(AnyProvider::File(JsonFileProvider::new(path.clone())));
    }

    let latency = Duration::from_millis(config.catalog.demo_latency_ms);
    Ok(AnyProvider::Static(StaticProvider::demo()?.with_latency(latency)))
}

async fn open_input(cli: &Cli) -> Result<Box<dyn AsyncBufRead + Unpin>, AppError> {
    match &cli.script {
        Some(path) => {
            info!(?path, "Reading commands from script");
            let file = tokio::fs::File::open(path).await?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command
/// - `RUST_LOG=checkout_cli=trace` - Trace the app crate only
/// - Default: INFO for checkout crates, WARN for everything else
///
/// Logs go to stderr; stdout carries the form.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,checkout_cli=info,checkout_core=info"));

    // A second call (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
