use clap::Parser;
use gallery_api::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => cli::serve::run().await,
        Command::Products(args) => cli::catalog::run_products(args).await,
        Command::Product(args) => cli::catalog::run_product(args).await,
    }
}
