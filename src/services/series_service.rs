use chrono::{Duration, Local, NaiveDate};
use rand::Rng;

use crate::models::{ChartRange, ModelKind, SeriesSet};

/// Bounds of every model's price-like series
pub const SERIES_MIN: f64 = 10.0;
pub const SERIES_MAX: f64 = 20.0;

/// Generate a fresh set of model series for the given range
pub fn generate_series(range: ChartRange) -> SeriesSet {
    generate_series_with(range, &mut rand::thread_rng(), Local::now().date_naive())
}

/// Generate series from an explicit random source and reference date
///
/// Each walk starts at the model's baseline and takes one uniform step of
/// `(u - 0.5) * scale` per point. The recorded value is clamped to
/// `[SERIES_MIN, SERIES_MAX]`; the walk itself continues unclamped.
pub fn generate_series_with<R: Rng + ?Sized>(
    range: ChartRange,
    rng: &mut R,
    today: NaiveDate,
) -> SeriesSet {
    let points = range.points();
    let mut walkers: Vec<f64> = ModelKind::ALL.iter().map(|m| m.baseline()).collect();
    let mut series: [Vec<f64>; 4] = std::array::from_fn(|_| Vec::with_capacity(points));

    for _ in 0..points {
        for model in ModelKind::ALL {
            let idx = model.ordinal();
            walkers[idx] += (rng.gen::<f64>() - 0.5) * model.step_scale();
            series[idx].push(walkers[idx].clamp(SERIES_MIN, SERIES_MAX));
        }
    }

    SeriesSet {
        range,
        labels: axis_labels(range, today),
        series,
    }
}

/// Time-axis labels: hours of the day for 24h, otherwise dates counting back from `today`
pub fn axis_labels(range: ChartRange, today: NaiveDate) -> Vec<String> {
    let points = range.points();

    (0..points)
        .map(|i| match range {
            ChartRange::Day => format!("{}:00", i),
            _ => {
                let date = today - Duration::days((points - i) as i64);
                date.format("%b %-d").to_string()
            }
        })
        .collect()
}
