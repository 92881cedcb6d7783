//! Data models for the Valyn Core dashboard and proxy
//!
//! Result and transfer structs shared between routes and services.

pub mod chart;
pub mod chat;
pub mod proxy;
pub mod series;
pub mod stats;
pub mod trade;
pub mod waitlist;

// Re-export commonly used types for convenience
pub use chart::{ChartView, DatasetView};
pub use chat::{ChatRole, TranscriptEntry};
pub use proxy::{
    ChatPayload, ChatReply, HealthStatus, ImageResult, PromptPayload, RouterPayload,
    RouterReply, VideoConcept, WaitlistPayload, WaitlistResult,
};
pub use series::{ChartRange, ModelKind, SeriesSet};
pub use stats::{LiveSnapshot, StatsSnapshot};
pub use trade::{TradeAction, TradeEvent};
pub use waitlist::WaitlistEntry;
