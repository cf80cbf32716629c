use super::ShutdownSignal;
use crate::application::bank::Bank;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

/// Periodic FX feed: every tick each tracked rate drifts by a small
/// random factor. No ledger interaction.
pub async fn run_fx_feed(bank: Arc<Bank>, mut shutdown: ShutdownSignal) {
    let clock = bank.clock();
    let tick = bank.config().fx_tick;
    let mut rng = StdRng::from_entropy();

    loop {
        tokio::select! {
            _ = clock.sleep(tick) => {}
            _ = shutdown.changed() => break,
        }

        bank.drift_rates(&mut rng).await;
        tracing::debug!("fx rates updated");
    }
    tracing::info!("fx feed stopped");
}
