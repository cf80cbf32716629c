mod fx;
mod payments;
mod simulator;

pub use fx::run_fx_feed;
pub use payments::run_payment_processor;
pub use simulator::run_balance_simulator;

use tokio::sync::watch;

/// Receiver side of the cooperative shutdown signal. Workers check it at
/// their suspension points and exit without leaving a partial write.
pub type ShutdownSignal = watch::Receiver<bool>;

pub fn shutdown_channel() -> (watch::Sender<bool>, ShutdownSignal) {
    watch::channel(false)
}
