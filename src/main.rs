//! Cookbook CLI: page-turning recipe reader.

use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = cookbook::cli::Cli::parse();
    cookbook::logging::init_logging(cli.verbose);
    if let Err(e) = cookbook::cli::dispatch(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
