use anyhow::Result;
use clap::Parser;
use daily_activity::cli::{run_cli, Args};
use tracing::error;

// Every fetch is I/O bound, a single thread interleaving them is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    run_cli(args).await.inspect_err(|e| {
        error!("Error running cli {e:?}");
    })?;
    Ok(())
}
