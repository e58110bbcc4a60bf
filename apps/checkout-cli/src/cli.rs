//! Command-line arguments of the `checkout` binary.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "checkout")]
#[command(version, about = "Electro World checkout form in the terminal")]
pub struct Cli {
    /// JSON catalog file (defaults to the built-in demo catalog)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Config file (defaults to checkout.toml in the user config directory)
    #[arg(long, value_name = "PATH", env = "CHECKOUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}
