//! prco - check out pull request merge refs for CI.

mod cli;

use clap::Parser;

#[tokio::main]
async fn main() {
    cli::init_tracing();
    let args = cli::Cli::parse();
    if let Err(error) = cli::run(args).await {
        anstream::eprintln!("error: {error}");
        std::process::exit(1);
    }
}
