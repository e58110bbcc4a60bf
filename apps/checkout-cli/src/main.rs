//! # Checkout Entry Point
//!
//! ```text
//! $ checkout --catalog products.json
//! Electro World
//!
//!   Loading catalog...
//! ```
//!
//! The actual setup is in lib.rs; this file only maps the outcome to an
//! exit code.

use std::process::ExitCode;

use clap::Parser;

use checkout_cli::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match checkout_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("checkout: {e}");
            ExitCode::FAILURE
        }
    }
}
