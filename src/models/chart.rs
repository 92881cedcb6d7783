//! Chart binding models

use serde::{Deserialize, Serialize};

use super::series::{ChartRange, ModelKind};

/// One dataset as the chart draws it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetView {
    pub model: ModelKind,
    pub label: String,
    pub border_color: String,
    pub border_width: u32,
    /// Fill opacity in [0, 1]
    pub fill_alpha: f64,
    pub data: Vec<f64>,
}

/// Serializable view of the chart state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub range: ChartRange,
    pub labels: Vec<String>,
    pub highlighted: Option<ModelKind>,
    pub datasets: Vec<DatasetView>,
}
