use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use std::path::Path;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};

pub fn router(state: AppState, static_dir: &Path) -> Router {
    let assets = Router::new()
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/records", get(handlers::records_page))
        .route("/api/heatmap", get(handlers::get_heatmap))
        .route(
            "/api/record/:date",
            get(handlers::get_record).post(handlers::save_record),
        )
        .route("/api/export/:date", get(handlers::export_record))
        .with_state(state)
        .merge(assets)
}
