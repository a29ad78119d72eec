use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use daily_journal::{router, AppState, RecordStore};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct Harness {
    app: Router,
    data: TempDir,
    _assets: TempDir,
}

async fn harness() -> Harness {
    let data = tempfile::tempdir().unwrap();
    let assets = tempfile::tempdir().unwrap();
    std::fs::write(assets.path().join("app.js"), "console.log('hi');").unwrap();

    let store = RecordStore::open(data.path()).await.unwrap();
    let state = AppState::new(store, assets.path().join("templates"));
    let app = router(state, assets.path());
    Harness {
        app,
        data,
        _assets: assets,
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn unsaved_record_returns_default_document() {
    let h = harness().await;
    let (status, _, body) = send(&h.app, get("/api/record/2024-07-01")).await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        json!({
            "date": "2024-07-01",
            "keywords": [],
            "today_done": "",
            "tomorrow_plan": [],
            "insights": "",
            "todos": [],
            "focus_sessions": []
        })
    );
    assert!(!h.data.path().join("2024-07-01.json").exists());
}

#[tokio::test]
async fn save_then_export_scenario() {
    let h = harness().await;
    let record = json!({
        "date": "2024-01-01",
        "keywords": ["focus", "rest"],
        "today_done": "Wrote spec",
        "tomorrow_plan": ["Review PR", "Sleep early"],
        "insights": "Stayed calm",
        "todos": [],
        "focus_sessions": [
            { "duration": 25, "task": "writing" },
            { "duration": 15, "task": "review" }
        ]
    });

    let (status, _, body) = send(&h.app, post_json("/api/record/2024-01-01", &record)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({ "status": "success" }));

    let (_, _, body) = send(&h.app, get("/api/record/2024-01-01")).await;
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), record);

    let (status, headers, body) = send(&h.app, get("/api/export/2024-01-01")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"record_2024-01-01.txt\""
    );

    let text = String::from_utf8(body).unwrap();
    for needle in ["focus, rest", "1. Review PR", "2. Sleep early", "Stayed calm", "40分钟"] {
        assert!(text.contains(needle), "missing {needle:?} in:\n{text}");
    }
    assert!(text.contains("25分钟 - writing"));
    assert!(text.contains("15分钟 - review"));
}

#[tokio::test]
async fn second_save_replaces_first() {
    let h = harness().await;
    send(&h.app, post_json("/api/record/2024-02-02", &json!({ "todos": ["a"] }))).await;
    send(&h.app, post_json("/api/record/2024-02-02", &json!({ "todos": ["b"] }))).await;

    let (_, _, body) = send(&h.app, get("/api/record/2024-02-02")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["todos"], json!(["b"]));
    assert_eq!(json["keywords"], json!([]));
}

#[tokio::test]
async fn heatmap_lists_saved_dates() {
    let h = harness().await;
    let (_, _, body) = send(&h.app, get("/api/heatmap")).await;
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!({}));

    for date in ["2024-01-01", "2024-01-02"] {
        send(&h.app, post_json(&format!("/api/record/{date}"), &json!({ "date": date }))).await;
    }

    let (status, _, body) = send(&h.app, get("/api/heatmap")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({ "2024-01-01": 1, "2024-01-02": 1 })
    );
}

#[tokio::test]
async fn malformed_body_is_rejected_and_not_written() {
    let h = harness().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/record/2024-03-03")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ nope"))
        .unwrap();
    let (status, _, _) = send(&h.app, req).await;
    assert!(status.is_client_error());
    assert!(!h.data.path().join("2024-03-03.json").exists());
}

#[tokio::test]
async fn corrupt_record_fails_loudly() {
    let h = harness().await;
    std::fs::write(h.data.path().join("2024-04-04.json"), "not json").unwrap();

    let (status, _, _) = send(&h.app, get("/api/record/2024-04-04")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _, _) = send(&h.app, get("/api/export/2024-04-04")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn hidden_date_key_is_rejected() {
    let h = harness().await;
    let (status, _, _) = send(&h.app, get("/api/record/..")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pages_render_with_cache_busting_version() {
    let h = harness().await;
    for uri in ["/", "/records"] {
        let (status, headers, body) = send(&h.app, get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("?v="));
        assert!(!html.contains("{{ v }}"));
    }
}

#[tokio::test]
async fn static_assets_are_not_cached() {
    let h = harness().await;
    let (status, headers, body) = send(&h.app, get("/static/app.js")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
    assert_eq!(body, b"console.log('hi');");
}

#[tokio::test]
async fn null_members_are_saved_and_read_back() {
    let h = harness().await;
    let sent = json!({
        "date": "2024-05-05",
        "keywords": null,
        "insights": null,
        "todos": [null, "x"],
        "focus_sessions": [{ "duration": 25, "task": null }]
    });

    let (status, _, _) = send(&h.app, post_json("/api/record/2024-05-05", &sent)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, _, body) = send(&h.app, get("/api/record/2024-05-05")).await;
    let loaded: Value = serde_json::from_slice(&body).unwrap();
    for (key, value) in sent.as_object().unwrap() {
        assert_eq!(loaded.get(key), Some(value), "member {key:?} changed");
    }

    let (status, _, body) = send(&h.app, get("/api/export/2024-05-05")).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("  • 25分钟 - 任务\n"));
    assert!(!text.contains("关键词"));
}

#[tokio::test]
async fn quote_in_date_key_is_rejected() {
    let h = harness().await;
    let (status, _, _) = send(&h.app, get("/api/export/a%22b")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
