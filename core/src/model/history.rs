use serde::{Deserialize, Serialize};

use crate::model::result::{Prediction, Probabilities};

/// Verdict summary carried by each history row.
///
/// History rows arrive on the 0-100 scale (the backend pre-multiplies for
/// the dashboard tables), unlike `AnalysisResult` which stays in [0, 1].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryVerdict {
    pub prediction: Prediction,
    pub confidence: f64,
    pub probabilities: Probabilities,
}

/// One past analysis, newest first in the backend listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryEntry {
    pub id: String,
    pub filename: String,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
    pub result: HistoryVerdict,
}
