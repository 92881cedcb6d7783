//! Dashboard simulation endpoints

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use super::SharedState;
use crate::models::{ChartRange, ChartView, LiveSnapshot, ModelKind, SeriesSet};
use crate::services::series_service;
use crate::utils::ServiceError;

const DEFAULT_CHART_SIZE: (u32, u32) = (960, 480);
const MIN_CHART_SIDE: u32 = 200;
const MAX_CHART_SIDE: u32 = 2000;

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HighlightBody {
    pub model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LiveQuery {
    /// Set by a freshly loaded page to replay the counter count-up
    #[serde(default)]
    pub intro: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SizeQuery {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

fn range_of(token: Option<&str>) -> ChartRange {
    token.map(ChartRange::parse_or_default).unwrap_or_default()
}

/// A freshly generated series set; does not touch the session chart
pub async fn series(Query(query): Query<RangeQuery>) -> Json<SeriesSet> {
    Json(series_service::generate_series(range_of(query.range.as_deref())))
}

pub async fn chart(State(state): State<SharedState>) -> Json<ChartView> {
    Json(state.session.chart_view().await)
}

pub async fn set_range(
    State(state): State<SharedState>,
    payload: Result<Json<RangeQuery>, JsonRejection>,
) -> Json<ChartView> {
    let body = payload.map(|Json(body)| body).unwrap_or_default();
    Json(state.session.apply_range(range_of(body.range.as_deref())).await)
}

pub async fn highlight(
    State(state): State<SharedState>,
    payload: Result<Json<HighlightBody>, JsonRejection>,
) -> Result<Json<ChartView>, ServiceError> {
    let model: ModelKind = payload
        .ok()
        .and_then(|Json(body)| body.model)
        .and_then(|raw| raw.parse().ok())
        .ok_or(ServiceError::InvalidInput("Unknown model"))?;

    Ok(Json(state.session.highlight(model).await))
}

pub async fn chart_png(
    State(state): State<SharedState>,
    Query(size): Query<SizeQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let width = size.width.unwrap_or(DEFAULT_CHART_SIZE.0).clamp(MIN_CHART_SIDE, MAX_CHART_SIDE);
    let height = size.height.unwrap_or(DEFAULT_CHART_SIZE.1).clamp(MIN_CHART_SIDE, MAX_CHART_SIDE);

    let png = state
        .session
        .render_chart(width, height)
        .await
        .map_err(|e| ServiceError::Internal {
            context: "Failed to render chart",
            details: e.to_string(),
        })?;

    Ok(([(CONTENT_TYPE, "image/png"), (CACHE_CONTROL, "no-store")], png))
}

pub async fn live(
    State(state): State<SharedState>,
    Query(query): Query<LiveQuery>,
) -> Json<LiveSnapshot> {
    if query.intro {
        state.session.restart_intro().await;
    }
    Json(state.session.live_snapshot().await)
}
