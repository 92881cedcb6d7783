use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

use crate::models::StatsSnapshot;

pub const TOTAL_VALUE_START: f64 = 471.30;
pub const VOLUME_START: f64 = 1284.50;

pub const TOTAL_VALUE_BOUNDS: (f64, f64) = (450.0, 500.0);
pub const VOLUME_BOUNDS: (f64, f64) = (1250.0, 1350.0);

/// Full width of the per-tick nudge (delta is `(u - 0.5) * width`)
const TOTAL_VALUE_STEP: f64 = 2.0;
const VOLUME_STEP: f64 = 5.0;

/// Length of the count-up animation shown when the dashboard opens
pub const INTRO_DURATION: Duration = Duration::from_millis(2000);

pub fn ease_out_quart(x: f64) -> f64 {
    1.0 - (1.0 - x).powi(4)
}

/// A time-based eased transition between two values
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f64,
    to: f64,
    duration: Duration,
    started_at: Instant,
}

impl Tween {
    pub fn start(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            started_at: Instant::now(),
        }
    }

    /// Value after `elapsed`, and whether the transition has finished
    pub fn sample(&self, elapsed: Duration) -> (f64, bool) {
        if self.duration.is_zero() {
            return (self.to, true);
        }
        let progress = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0);
        let value = self.from + (self.to - self.from) * ease_out_quart(progress);
        (value, progress >= 1.0)
    }

    pub fn value_now(&self) -> (f64, bool) {
        self.sample(self.started_at.elapsed())
    }
}

/// The two aggregate counters and their mirror
#[derive(Debug)]
pub struct LiveStats {
    total_value: f64,
    volume_24h: f64,
    info_volume: f64,
    intro: Option<(Tween, Tween)>,
}

impl Default for LiveStats {
    fn default() -> Self {
        Self {
            total_value: TOTAL_VALUE_START,
            volume_24h: VOLUME_START,
            info_volume: VOLUME_START,
            intro: None,
        }
    }
}

impl LiveStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animate the counters up from zero to their current values
    pub fn start_intro(&mut self) {
        self.intro = Some((
            Tween::start(0.0, self.total_value, INTRO_DURATION),
            Tween::start(0.0, self.volume_24h, INTRO_DURATION),
        ));
    }

    /// Apply one random nudge to both counters
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (lo, hi) = TOTAL_VALUE_BOUNDS;
        self.total_value = (self.total_value + (rng.gen::<f64>() - 0.5) * TOTAL_VALUE_STEP).clamp(lo, hi);

        let (lo, hi) = VOLUME_BOUNDS;
        self.volume_24h = (self.volume_24h + (rng.gen::<f64>() - 0.5) * VOLUME_STEP).clamp(lo, hi);

        self.info_volume = self.volume_24h;
        // a tick ends any count-up in progress
        self.intro = None;
    }

    /// Values as currently displayed, rounded to cents
    pub fn snapshot(&self) -> StatsSnapshot {
        let (total_value, volume_24h) = match &self.intro {
            Some((total, volume)) => {
                let (t, t_done) = total.value_now();
                let (v, v_done) = volume.value_now();
                if t_done && v_done {
                    (self.total_value, self.volume_24h)
                } else {
                    (t, v)
                }
            }
            None => (self.total_value, self.volume_24h),
        };

        StatsSnapshot {
            total_value: round_cents(total_value),
            volume_24h: round_cents(volume_24h),
            info_volume: round_cents(self.info_volume),
        }
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_quart_endpoints() {
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        assert!((ease_out_quart(0.5) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn test_tween_samples() {
        let tween = Tween::start(0.0, 100.0, Duration::from_secs(2));
        assert_eq!(tween.sample(Duration::ZERO), (0.0, false));
        let (mid, done) = tween.sample(Duration::from_secs(1));
        assert!((mid - 93.75).abs() < 1e-9);
        assert!(!done);
        assert_eq!(tween.sample(Duration::from_secs(5)), (100.0, true));
    }

    #[test]
    fn test_zero_duration_tween_finishes_immediately() {
        let tween = Tween::start(1.0, 2.0, Duration::ZERO);
        assert_eq!(tween.sample(Duration::ZERO), (2.0, true));
    }

    #[test]
    fn test_ticks_stay_in_bounds() {
        let mut stats = LiveStats::new();
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            stats.tick(&mut rng);
            let snap = stats.snapshot();
            assert!(snap.total_value >= 450.0 && snap.total_value <= 500.0);
            assert!(snap.volume_24h >= 1250.0 && snap.volume_24h <= 1350.0);
            assert_eq!(snap.info_volume, snap.volume_24h);
        }
    }

    #[test]
    fn test_tick_delta_is_small() {
        let mut stats = LiveStats::new();
        let before = stats.snapshot();
        stats.tick(&mut rand::thread_rng());
        let after = stats.snapshot();
        assert!((after.total_value - before.total_value).abs() <= 1.0 + 0.01);
        assert!((after.volume_24h - before.volume_24h).abs() <= 2.5 + 0.01);
    }

    #[tokio::test(start_paused = true)]
    async fn test_intro_counts_up_then_settles() {
        let mut stats = LiveStats::new();
        stats.start_intro();
        assert_eq!(stats.snapshot().total_value, 0.0);

        tokio::time::advance(Duration::from_millis(1000)).await;
        let mid = stats.snapshot();
        assert!(mid.total_value > 0.0 && mid.total_value < TOTAL_VALUE_START);

        tokio::time::advance(Duration::from_millis(1500)).await;
        let settled = stats.snapshot();
        assert_eq!(settled.total_value, TOTAL_VALUE_START);
        assert_eq!(settled.volume_24h, VOLUME_START);
    }
}
