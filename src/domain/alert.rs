use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A balance alert raised by the alert engine.
///
/// The `acknowledged` flag is the only field mutated after creation, and
/// only through the explicit acknowledge operation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Alert {
    pub alert_id: String,
    pub account_id: String,
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub acknowledged: bool,
}
