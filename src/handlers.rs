use crate::errors::AppError;
use crate::export::{attachment_disposition, format_record};
use crate::heatmap;
use crate::models::{Record, StatusResponse};
use crate::state::AppState;
use crate::ui::{render_view, View};
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;
use std::collections::BTreeMap;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&state, View::Index).await
}

pub async fn records_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    render(&state, View::Records).await
}

pub async fn get_heatmap(State(state): State<AppState>) -> Json<BTreeMap<String, u64>> {
    Json(heatmap::aggregate(state.store.dir()).await)
}

pub async fn get_record(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Record>, AppError> {
    let record = state.store.load(&date).await?;
    Ok(Json(record))
}

pub async fn save_record(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(record): Json<Record>,
) -> Result<Json<StatusResponse>, AppError> {
    state.store.save(&date, &record).await?;
    Ok(Json(StatusResponse::success()))
}

pub async fn export_record(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.store.load(&date).await?;
    let disposition = attachment_disposition(&date);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        format_record(&record),
    ))
}

async fn render(state: &AppState, view: View) -> Result<Html<String>, AppError> {
    let html = render_view(view, cache_version(), &state.template_dir).await?;
    Ok(Html(html))
}

fn cache_version() -> i64 {
    Utc::now().timestamp()
}
