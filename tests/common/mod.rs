use bankdesk::application::bank::Bank;
use bankdesk::config::BankConfig;
use bankdesk::infrastructure::clock::ManualClock;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;

/// Opens a bank over `data_dir` driven by a fresh manual clock.
pub async fn open_bank(data_dir: &Path) -> (Arc<Bank>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let bank = Bank::open_dir(BankConfig::default(), data_dir, clock.clone())
        .await
        .expect("failed to open bank");
    (Arc::new(bank), clock)
}
