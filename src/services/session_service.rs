//! Dashboard session: owns the chart, trade feed and counters plus the
//! timers that animate them.

use std::ops::Range;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::models::{ChartRange, ChartView, LiveSnapshot, ModelKind, TradeEvent};
use crate::services::chart_service::{self, ChartError, ChartState};
use crate::services::stats_service::LiveStats;
use crate::services::trade_feed_service::{self, TradeFeed, TRADE_DELAY};

pub const STATS_PERIOD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct SessionTiming {
    /// Window the delay before each synthetic trade is drawn from
    pub trade_delay: Range<Duration>,
    pub stats_period: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            trade_delay: TRADE_DELAY,
            stats_period: STATS_PERIOD,
        }
    }
}

pub struct DashboardSession {
    chart: RwLock<ChartState>,
    feed: RwLock<TradeFeed>,
    stats: RwLock<LiveStats>,
    timing: SessionTiming,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl DashboardSession {
    pub fn new() -> Arc<Self> {
        Self::with_timing(SessionTiming::default())
    }

    pub fn with_timing(timing: SessionTiming) -> Arc<Self> {
        Arc::new(Self {
            chart: RwLock::new(ChartState::new()),
            feed: RwLock::new(TradeFeed::new()),
            stats: RwLock::new(LiveStats::new()),
            timing,
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Start the trade and counter loops. Calling it again while running does nothing.
    ///
    /// The loops only hold a weak reference, so dropping the last `Arc` ends them too.
    pub async fn start(self: &Arc<Self>) {
        if self.is_running() {
            debug!("Dashboard session already running");
            return;
        }

        self.restart_intro().await;

        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        if !tasks.is_empty() {
            return;
        }
        tasks.push(tokio::spawn(run_trade_loop(Arc::downgrade(self), self.timing.trade_delay.clone())));
        tasks.push(tokio::spawn(run_stats_loop(Arc::downgrade(self), self.timing.stats_period)));
        drop(tasks);

        info!(
            "Dashboard session started (trade delay {:?}..{:?}, stats every {:?})",
            self.timing.trade_delay.start, self.timing.trade_delay.end, self.timing.stats_period
        );
    }

    /// Replay the counter count-up from zero
    pub async fn restart_intro(&self) {
        self.stats.write().await.start_intro();
    }

    /// Cancel both loops
    pub fn shutdown(&self) {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        if tasks.is_empty() {
            return;
        }
        for task in tasks.drain(..) {
            task.abort();
        }
        info!("Dashboard session stopped");
    }

    pub fn is_running(&self) -> bool {
        let tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        !tasks.is_empty()
    }

    /// Insert one synthetic trade at the head of the feed
    pub async fn push_random_trade(&self) -> TradeEvent {
        let trade = trade_feed_service::random_trade(&mut rand::thread_rng());
        debug!("Synthetic trade: {} {} ${:.2}", trade.model_label, trade.action.as_str(), trade.amount);
        self.feed.write().await.push(trade.clone());
        trade
    }

    pub async fn tick_stats(&self) {
        let mut stats = self.stats.write().await;
        stats.tick(&mut rand::thread_rng());
    }

    pub async fn live_snapshot(&self) -> LiveSnapshot {
        let trades = self.feed.read().await.trades();
        let stats = self.stats.read().await.snapshot();
        LiveSnapshot { trades, stats }
    }

    pub async fn chart_view(&self) -> ChartView {
        self.chart.read().await.view()
    }

    pub async fn apply_range(&self, range: ChartRange) -> ChartView {
        let mut chart = self.chart.write().await;
        chart.apply_range(range);
        debug!("Chart range set to {}", range);
        chart.view()
    }

    pub async fn highlight(&self, model: ModelKind) -> ChartView {
        let mut chart = self.chart.write().await;
        chart.highlight(model);
        debug!("Chart highlighting {}", model);
        chart.view()
    }

    /// Redraw the current chart as PNG off the async workers
    pub async fn render_chart(&self, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
        let view = self.chart_view().await;
        tokio::task::spawn_blocking(move || chart_service::render_png(&view, width, height))
            .await
            .map_err(|e| ChartError::Render(format!("Render task failed: {}", e)))?
    }
}

impl Drop for DashboardSession {
    fn drop(&mut self) {
        let tasks = self.tasks.get_mut().unwrap_or_else(|e| e.into_inner());
        for task in tasks.drain(..) {
            task.abort();
        }
    }
}

async fn run_trade_loop(session: Weak<DashboardSession>, window: Range<Duration>) {
    loop {
        let delay = trade_feed_service::next_trade_delay(&mut rand::thread_rng(), &window);
        sleep(delay).await;

        let Some(session) = session.upgrade() else {
            break;
        };
        session.push_random_trade().await;
    }
}

async fn run_stats_loop(session: Weak<DashboardSession>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let Some(session) = session.upgrade() else {
            break;
        };
        session.tick_stats().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stats_service::{TOTAL_VALUE_START, VOLUME_START};
    use crate::services::trade_feed_service::MAX_TRADES;

    #[tokio::test(start_paused = true)]
    async fn test_first_trade_arrives_within_a_minute() {
        let session = DashboardSession::new();
        session.start().await;

        sleep(Duration::from_secs(29)).await;
        assert!(session.live_snapshot().await.trades.is_empty());

        sleep(Duration::from_secs(32)).await;
        let trades = session.live_snapshot().await.trades;
        assert!(!trades.is_empty());
        assert_eq!(trades[0].age, "just now");
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_capped_under_fast_timing() {
        let session = DashboardSession::with_timing(SessionTiming {
            trade_delay: Duration::from_millis(1)..Duration::from_millis(2),
            stats_period: Duration::from_secs(2),
        });
        session.start().await;

        sleep(Duration::from_secs(1)).await;
        assert_eq!(session.live_snapshot().await.trades.len(), MAX_TRADES);
        session.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_tick_every_period() {
        let session = DashboardSession::new();
        session.start().await;

        sleep(Duration::from_millis(2100)).await;
        let stats = session.live_snapshot().await.stats;
        assert!(stats.total_value >= 450.0 && stats.total_value <= 500.0);
        assert_eq!(stats.info_volume, stats.volume_24h);
        assert!((stats.total_value - TOTAL_VALUE_START).abs() <= 1.01);
        assert!((stats.volume_24h - VOLUME_START).abs() <= 2.51);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_loops() {
        let session = DashboardSession::new();
        session.start().await;
        assert!(session.is_running());

        session.shutdown();
        assert!(!session.is_running());

        sleep(Duration::from_secs(600)).await;
        let snapshot = session.live_snapshot().await;
        assert!(snapshot.trades.is_empty());
        assert_eq!(snapshot.stats.total_value, TOTAL_VALUE_START);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_intro_replays_count_up() {
        let session = DashboardSession::new();
        session.restart_intro().await;
        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(session.live_snapshot().await.stats.total_value, TOTAL_VALUE_START);

        session.restart_intro().await;
        assert_eq!(session.live_snapshot().await.stats.total_value, 0.0);

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(session.live_snapshot().await.stats.volume_24h, VOLUME_START);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_is_noop() {
        let session = DashboardSession::new();
        session.start().await;
        session.start().await;
        assert_eq!(session.tasks.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_chart_operations() {
        let session = DashboardSession::new();
        let view = session.apply_range(ChartRange::Month).await;
        assert_eq!(view.labels.len(), 30);

        let view = session.highlight(ModelKind::DeepSeek).await;
        assert_eq!(view.highlighted, Some(ModelKind::DeepSeek));
        assert_eq!(session.chart_view().await.range, ChartRange::Month);
    }
}
