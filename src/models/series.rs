//! Synthetic series models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four models tracked on the performance chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Gpt4,
    Claude,
    Gemini,
    DeepSeek,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Gpt4,
        ModelKind::Claude,
        ModelKind::Gemini,
        ModelKind::DeepSeek,
    ];

    /// Dataset position on the chart
    pub fn ordinal(self) -> usize {
        match self {
            ModelKind::Gpt4 => 0,
            ModelKind::Claude => 1,
            ModelKind::Gemini => 2,
            ModelKind::DeepSeek => 3,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ModelKind::Gpt4 => "gpt4",
            ModelKind::Claude => "claude",
            ModelKind::Gemini => "gemini",
            ModelKind::DeepSeek => "deepseek",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Gpt4 => "GPT-4",
            ModelKind::Claude => "Claude 3.5",
            ModelKind::Gemini => "Gemini Pro",
            ModelKind::DeepSeek => "DeepSeek",
        }
    }

    /// Line colour as an `(r, g, b)` triple
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ModelKind::Gpt4 => (0x63, 0x66, 0xf1),
            ModelKind::Claude => (0x8b, 0x5c, 0xf6),
            ModelKind::Gemini => (0x10, 0xb9, 0x81),
            ModelKind::DeepSeek => (0xf5, 0x9e, 0x0b),
        }
    }

    pub fn hex_color(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Starting value of the random walk
    pub fn baseline(self) -> f64 {
        match self {
            ModelKind::Gpt4 => 14.0,
            ModelKind::Claude => 12.0,
            ModelKind::Gemini => 11.0,
            ModelKind::DeepSeek => 10.0,
        }
    }

    /// Width of the uniform step applied each point
    pub fn step_scale(self) -> f64 {
        match self {
            ModelKind::Gpt4 => 0.8,
            ModelKind::Claude => 0.7,
            ModelKind::Gemini => 0.6,
            ModelKind::DeepSeek => 0.5,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt4" => Ok(ModelKind::Gpt4),
            "claude" => Ok(ModelKind::Claude),
            "gemini" => Ok(ModelKind::Gemini),
            "deepseek" => Ok(ModelKind::DeepSeek),
            _ => Err(format!("Unknown model: '{}'. Supported: gpt4, claude, gemini, deepseek", s)),
        }
    }
}

/// Range filter on the performance chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "24h")]
    Day,
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "all")]
    All,
}

impl ChartRange {
    pub fn points(self) -> usize {
        match self {
            ChartRange::Day => 24,
            ChartRange::Week => 7,
            ChartRange::Month => 30,
            ChartRange::All => 90,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            ChartRange::Day => "24h",
            ChartRange::Week => "7d",
            ChartRange::Month => "30d",
            ChartRange::All => "all",
        }
    }

    /// Parse a range token; anything unrecognised means the default 7d view
    pub fn parse_or_default(token: &str) -> Self {
        token.parse().unwrap_or_default()
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ChartRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" => Ok(ChartRange::Day),
            "7d" => Ok(ChartRange::Week),
            "30d" => Ok(ChartRange::Month),
            "all" => Ok(ChartRange::All),
            _ => Err(format!("Unknown range: '{}'. Supported: 24h, 7d, 30d, all", s)),
        }
    }
}

/// Four parallel random-walk sequences plus their axis labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSet {
    pub range: ChartRange,
    pub labels: Vec<String>,
    /// Indexed by `ModelKind::ordinal`
    pub series: [Vec<f64>; 4],
}

impl SeriesSet {
    pub fn values(&self, model: ModelKind) -> &[f64] {
        &self.series[model.ordinal()]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_match_all_order() {
        for (i, model) in ModelKind::ALL.iter().enumerate() {
            assert_eq!(model.ordinal(), i);
        }
    }

    #[test]
    fn test_model_slug_round_trip() {
        for model in ModelKind::ALL {
            assert_eq!(model.slug().parse::<ModelKind>().unwrap(), model);
        }
        assert!("llama".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(ModelKind::Gpt4.hex_color(), "#6366f1");
        assert_eq!(ModelKind::DeepSeek.hex_color(), "#f59e0b");
    }

    #[test]
    fn test_unknown_range_defaults_to_week() {
        assert_eq!(ChartRange::parse_or_default("90d"), ChartRange::Week);
        assert_eq!(ChartRange::parse_or_default("ALL"), ChartRange::All);
    }

    #[test]
    fn test_range_serde_tokens() {
        assert_eq!(serde_json::to_string(&ChartRange::Day).unwrap(), "\"24h\"");
        let parsed: ChartRange = serde_json::from_str("\"30d\"").unwrap();
        assert_eq!(parsed, ChartRange::Month);
    }
}
