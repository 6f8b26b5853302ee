use clap::Parser;
use othello::config::ServerArgs;
use othello::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let args = ServerArgs::parse();
    tracing::info!(strategy = ?args.strategy, seed = ?args.seed, "starting move service");
    server::serve(args.addr, args.selector()).await?;
    Ok(())
}
