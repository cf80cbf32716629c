use bankdesk::application::bank::Bank;
use bankdesk::config::BankConfig;
use bankdesk::domain::ports::Clock;
use bankdesk::infrastructure::clock::SystemClock;
use bankdesk::workers::{
    run_balance_simulator, run_fx_feed, run_payment_processor, shutdown_channel,
};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{Layer, filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the transaction log and snapshot files
    #[arg(long, default_value = "./bank_data")]
    data_dir: PathBuf,

    /// Stop after this many seconds instead of waiting for ctrl-c
    #[arg(long)]
    run_for: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
        )
        .init();

    let cli = Cli::parse();
    std::fs::create_dir_all(&cli.data_dir).into_diagnostic()?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let bank = Arc::new(
        Bank::open_dir(BankConfig::default(), &cli.data_dir, clock)
            .await
            .into_diagnostic()?,
    );
    tracing::info!(data_dir = %cli.data_dir.display(), "bankdesk started");

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let handles = vec![
        tokio::spawn(run_balance_simulator(bank.clone(), shutdown_rx.clone())),
        tokio::spawn(run_payment_processor(bank.clone(), shutdown_rx.clone())),
        tokio::spawn(run_fx_feed(bank.clone(), shutdown_rx)),
    ];

    match cli.run_for {
        Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
        None => tokio::signal::ctrl_c().await.into_diagnostic()?,
    }

    tracing::info!("shutting down");
    let _ = shutdown_tx.send(true);
    for handle in handles {
        let _ = handle.await;
    }
    Ok(())
}
