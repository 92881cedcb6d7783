use plotters::prelude::*;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ChartRange, ChartView, DatasetView, ModelKind, SeriesSet};
use crate::services::series_service::{self, SERIES_MAX, SERIES_MIN};

pub const DEFAULT_BORDER_WIDTH: u32 = 2;
pub const DEFAULT_FILL_ALPHA: f64 = 0.1;
pub const HIGHLIGHT_BORDER_WIDTH: u32 = 3;
pub const HIGHLIGHT_FILL_ALPHA: f64 = 0x40 as f64 / 255.0;
pub const DIM_BORDER_WIDTH: u32 = 1;
pub const DIM_FILL_ALPHA: f64 = 0x10 as f64 / 255.0;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Not enough data to draw a chart (minimum 2 points required)")]
    NotEnoughPoints,
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Failed to read chart file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DatasetStyle {
    border_width: u32,
    fill_alpha: f64,
}

impl Default for DatasetStyle {
    fn default() -> Self {
        Self {
            border_width: DEFAULT_BORDER_WIDTH,
            fill_alpha: DEFAULT_FILL_ALPHA,
        }
    }
}

/// The dashboard's single performance chart: four datasets plus emphasis
#[derive(Debug, Clone)]
pub struct ChartState {
    series: SeriesSet,
    styles: [DatasetStyle; 4],
    highlighted: Option<ModelKind>,
}

impl Default for ChartState {
    fn default() -> Self {
        Self::with_series(series_service::generate_series(ChartRange::default()))
    }
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(series: SeriesSet) -> Self {
        Self {
            series,
            styles: [DatasetStyle::default(); 4],
            highlighted: None,
        }
    }

    /// Regenerate every dataset for `range`; emphasis is left as it was
    pub fn apply_range(&mut self, range: ChartRange) {
        self.replace_series(series_service::generate_series(range));
    }

    /// Swap labels and data in place
    pub fn replace_series(&mut self, series: SeriesSet) {
        self.series = series;
    }

    /// Emphasize one dataset and dim the others
    pub fn highlight(&mut self, model: ModelKind) {
        for candidate in ModelKind::ALL {
            self.styles[candidate.ordinal()] = if candidate == model {
                DatasetStyle { border_width: HIGHLIGHT_BORDER_WIDTH, fill_alpha: HIGHLIGHT_FILL_ALPHA }
            } else {
                DatasetStyle { border_width: DIM_BORDER_WIDTH, fill_alpha: DIM_FILL_ALPHA }
            };
        }
        self.highlighted = Some(model);
    }

    pub fn view(&self) -> ChartView {
        let datasets = ModelKind::ALL
            .iter()
            .map(|&model| {
                let style = self.styles[model.ordinal()];
                DatasetView {
                    model,
                    label: model.label().to_string(),
                    border_color: model.hex_color(),
                    border_width: style.border_width,
                    fill_alpha: style.fill_alpha,
                    data: self.series.values(model).to_vec(),
                }
            })
            .collect();

        ChartView {
            range: self.series.range,
            labels: self.series.labels.clone(),
            highlighted: self.highlighted,
            datasets,
        }
    }
}

/// Render a chart view to PNG bytes
///
/// Blocking: draws to a temporary file and reads it back.
pub fn render_png(view: &ChartView, width: u32, height: u32) -> Result<Vec<u8>, ChartError> {
    if view.labels.len() < 2 {
        return Err(ChartError::NotEnoughPoints);
    }

    let temp_file = std::env::temp_dir().join(format!("valyn_chart_{}.png", Uuid::new_v4()));

    let drawn = draw_chart(view, &temp_file, width, height);
    let image_data = drawn.and_then(|_| std::fs::read(&temp_file).map_err(ChartError::from));

    let _ = std::fs::remove_file(&temp_file);

    image_data
}

fn draw_chart(
    view: &ChartView,
    path: &std::path::Path,
    width: u32,
    height: u32,
) -> Result<(), ChartError> {
    let background = RGBColor(0x0f, 0x0f, 0x17);
    let text_color = RGBColor(0x8b, 0x8b, 0x9a);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&background)
        .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

    let x_max = (view.labels.len() - 1) as f64;
    let labels = view.labels.clone();
    let label_for = move |x: &f64| {
        let idx = x.round().max(0.0) as usize;
        labels.get(idx).cloned().unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Model Performance ({})", view.range),
            ("sans-serif", 28.0).into_font().color(&WHITE),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max, SERIES_MIN..SERIES_MAX)
        .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

    chart
        .configure_mesh()
        .x_labels(view.labels.len().min(12))
        .x_label_formatter(&label_for)
        .y_label_formatter(&|y: &f64| format!("${:.0}", y))
        .label_style(("sans-serif", 12.0).into_font().color(&text_color))
        .axis_style(&text_color)
        .draw()
        .map_err(|e| ChartError::Render(format!("Failed to draw mesh: {}", e)))?;

    for dataset in &view.datasets {
        let (r, g, b) = dataset.model.rgb();
        let color = RGBColor(r, g, b);
        let points: Vec<(f64, f64)> = dataset
            .data
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect();

        chart
            .draw_series(AreaSeries::new(
                points.clone(),
                SERIES_MIN,
                color.mix(dataset.fill_alpha).filled(),
            ))
            .map_err(|e| ChartError::Render(format!("Failed to draw fill: {}", e)))?;

        let line_width = dataset.border_width;
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(line_width)))
            .map_err(|e| ChartError::Render(format!("Failed to draw line: {}", e)))?
            .label(dataset.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(line_width)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&background.mix(0.8))
        .border_style(&text_color)
        .label_font(("sans-serif", 12.0).into_font().color(&text_color))
        .draw()
        .map_err(|e| ChartError::Render(format!("Failed to draw legend: {}", e)))?;

    root.present()
        .map_err(|e| ChartError::Render(format!("Failed to present chart: {}", e)))?;

    Ok(())
}
