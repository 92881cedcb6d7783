//! Live trade feed models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::series::ModelKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

/// A single synthetic trade shown in the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEvent {
    pub id: Uuid,
    pub model: ModelKind,
    pub model_label: String,
    pub action: TradeAction,
    /// Dollar amount, already rounded to cents
    pub amount: f64,
    /// Relative age, e.g. "just now" or "4m ago"
    pub age: String,
}
