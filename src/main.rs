use clap::Parser;

use spardha_lib::bootstrap::{run, tracing::init_tracing_subscriber};
use spardha_lib::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(err) = init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {err}");
    }

    let cli = Cli::parse();
    run::run(cli).await
}
