pub mod chart_service;
pub mod chat_service;
pub mod chat_session;
pub mod image_service;
pub mod series_service;
pub mod session_service;
pub mod stats_service;
pub mod trade_feed_service;
pub mod video_service;
pub mod waitlist_service;
