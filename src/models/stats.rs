//! Live counter models

use serde::{Deserialize, Serialize};

use super::trade::TradeEvent;

/// Displayed values of the aggregate counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_value: f64,
    pub volume_24h: f64,
    /// Mirrors `volume_24h` in the info panel
    pub info_volume: f64,
}

/// Everything the live panel needs in one poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSnapshot {
    pub trades: Vec<TradeEvent>,
    pub stats: StatsSnapshot,
}
