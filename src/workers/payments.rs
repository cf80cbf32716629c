use super::ShutdownSignal;
use crate::application::bank::Bank;
use std::sync::Arc;

/// Periodic payment lifecycle worker.
///
/// Ticks on the configured interval and advances every open payment
/// against the tick's wall-clock time, so transitions land up to one
/// tick after their age threshold. A failed tick is logged and the loop
/// continues.
pub async fn run_payment_processor(bank: Arc<Bank>, mut shutdown: ShutdownSignal) {
    let clock = bank.clock();
    let tick = bank.config().payment_tick;

    loop {
        tokio::select! {
            _ = clock.sleep(tick) => {}
            _ = shutdown.changed() => break,
        }

        match bank.process_due_payments().await {
            Ok(0) => {}
            Ok(advanced) => tracing::debug!(advanced, "payments advanced"),
            Err(err) => tracing::error!(error = %err, "payment tick failed"),
        }
    }
    tracing::info!("payment processor stopped");
}
