use std::collections::VecDeque;
use std::ops::Range;
use std::time::Duration;

use rand::Rng;
use uuid::Uuid;

use crate::models::{ModelKind, TradeAction, TradeEvent};

/// Maximum number of trades kept in the feed
pub const MAX_TRADES: usize = 10;

pub const MIN_TRADE_AMOUNT: f64 = 0.10;
pub const MAX_TRADE_AMOUNT: f64 = 2.00;

/// Window the next trade delay is drawn from
pub const TRADE_DELAY: Range<Duration> = Duration::from_secs(30)..Duration::from_secs(60);

/// Bounded, newest-first list of synthetic trades
#[derive(Debug, Default)]
pub struct TradeFeed {
    trades: VecDeque<TradeEvent>,
}

impl TradeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the head, evict past the cap, then relabel every age
    pub fn push(&mut self, event: TradeEvent) {
        self.trades.push_front(event);
        self.trades.truncate(MAX_TRADES);
        self.relabel();
    }

    fn relabel(&mut self) {
        for (index, trade) in self.trades.iter_mut().enumerate() {
            trade.age = age_label(index);
        }
    }

    pub fn trades(&self) -> Vec<TradeEvent> {
        self.trades.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

/// Relative age shown for the trade at `index`
///
/// 0 → "just now", 1..=2 → `index*2` minutes, 3.. → `index*3` minutes.
pub fn age_label(index: usize) -> String {
    match index {
        0 => "just now".to_string(),
        1 | 2 => format!("{}m ago", index * 2),
        _ => format!("{}m ago", index * 3),
    }
}

/// Draw one synthetic trade
pub fn random_trade<R: Rng + ?Sized>(rng: &mut R) -> TradeEvent {
    let model = ModelKind::ALL[rng.gen_range(0..ModelKind::ALL.len())];
    let action = if rng.gen_bool(0.5) { TradeAction::Buy } else { TradeAction::Sell };
    let raw = rng.gen::<f64>() * (MAX_TRADE_AMOUNT - MIN_TRADE_AMOUNT) + MIN_TRADE_AMOUNT;
    let amount = ((raw * 100.0).round() / 100.0).clamp(MIN_TRADE_AMOUNT, MAX_TRADE_AMOUNT);

    TradeEvent {
        id: Uuid::new_v4(),
        model,
        model_label: model.label().to_string(),
        action,
        amount,
        age: age_label(0),
    }
}

/// Uniform delay in `[window.start, window.end)`
pub fn next_trade_delay<R: Rng + ?Sized>(rng: &mut R, window: &Range<Duration>) -> Duration {
    if window.end <= window.start {
        return window.start;
    }
    rng.gen_range(window.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trade_at(amount: f64) -> TradeEvent {
        TradeEvent {
            id: Uuid::new_v4(),
            model: ModelKind::Claude,
            model_label: ModelKind::Claude.label().to_string(),
            action: TradeAction::Buy,
            amount,
            age: String::new(),
        }
    }

    #[test]
    fn test_feed_never_exceeds_cap() {
        let mut feed = TradeFeed::new();
        for i in 0..37 {
            feed.push(trade_at(i as f64));
            assert!(feed.len() <= MAX_TRADES);
        }
        assert_eq!(feed.len(), MAX_TRADES);
    }

    #[test]
    fn test_newest_is_first() {
        let mut feed = TradeFeed::new();
        for i in 0..15 {
            feed.push(trade_at(i as f64));
            assert_eq!(feed.trades()[0].amount, i as f64);
        }
        // oldest surviving entry is the 6th insertion
        assert_eq!(feed.trades().last().unwrap().amount, 5.0);
    }

    #[test]
    fn test_age_labels_for_five_entries() {
        let mut feed = TradeFeed::new();
        for _ in 0..5 {
            feed.push(random_trade(&mut rand::thread_rng()));
        }
        let ages: Vec<String> = feed.trades().into_iter().map(|t| t.age).collect();
        assert_eq!(ages, vec!["just now", "2m ago", "4m ago", "9m ago", "12m ago"]);
    }

    #[test]
    fn test_random_trade_amount_bounds() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let trade = random_trade(&mut rng);
            assert!(trade.amount >= MIN_TRADE_AMOUNT && trade.amount <= MAX_TRADE_AMOUNT);
            assert_eq!((trade.amount * 100.0).round() / 100.0, trade.amount);
            assert_eq!(trade.model_label, trade.model.label());
        }
    }

    #[test]
    fn test_trade_delay_window() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let delay = next_trade_delay(&mut rng, &TRADE_DELAY);
            assert!(delay >= Duration::from_secs(30) && delay < Duration::from_secs(60));
        }
        let fixed = Duration::from_millis(5)..Duration::from_millis(5);
        assert_eq!(next_trade_delay(&mut rng, &fixed), Duration::from_millis(5));
    }
}
