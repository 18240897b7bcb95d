use axum::{
    body::Body,
    extract::{Path, RawQuery},
    http::{header, HeaderValue, Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use quotes_bff::app::app::create_router;
use quotes_bff::config::QuotesConfig;
use quotes_bff::service::quote_service::QuoteServiceImpl;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for .oneshot()

/// Serves `upstream` on an ephemeral port and returns its base URL.
async fn spawn_upstream(upstream: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, upstream).await.unwrap();
    });
    format!("http://{}", addr)
}

fn app_for(api_url: &str) -> Router {
    let config = QuotesConfig {
        api_url: api_url.to_string(),
        web_url: "http://quotes.web:5173".to_string(),
        default_limit: 50,
    };
    let service = Arc::new(QuoteServiceImpl::new(config).expect("service"));
    create_router(service)
}

fn sample_quotes() -> Value {
    json!({
        "quotes": [
            {
                "id": 1, "numero": "0001", "year": 2024,
                "cliente": "Constructora Andina", "ruc": "20123456789",
                "proyecto": "Torre Norte", "total": 15230.5,
                "filepath": "/data/2024/0001.xlsx", "created_at": "2024-03-01T10:00:00"
            },
            {
                "id": 2, "numero": "0002", "year": 2024,
                "cliente": "Minera Sur", "ruc": "20100000001",
                "proyecto": "Planta ANDINA", "total": 990.0,
                "filepath": "/data/2024/0002.xlsx", "created_at": 1700000000
            },
            {
                "id": 3, "numero": "B-0003", "year": 2024,
                "cliente": "Textil Lima", "ruc": "20100000002",
                "proyecto": "Nave Industrial", "total": 0,
                "filepath": "/data/2024/0003.xlsx", "filename": "nave.xlsx",
                "created_at": "2024-05-10T08:30:00"
            }
        ],
        "total": 3
    })
}

/// Upstream that records the query string of every list call.
fn healthy_upstream(queries: Arc<Mutex<Vec<Option<String>>>>) -> Router {
    Router::new()
        .route(
            "/quotes",
            get(move |RawQuery(query): RawQuery| {
                let queries = queries.clone();
                async move {
                    queries.lock().unwrap().push(query);
                    Json(sample_quotes())
                }
            }),
        )
        .route(
            "/quotes/{id}/download",
            get(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "1" => (
                        [
                            (header::CONTENT_TYPE, "application/octet-stream"),
                            (header::CONTENT_DISPOSITION, "attachment; filename=\"COT-2024-0001.xlsx\""),
                        ],
                        b"PK\x03\x04quote-one".to_vec(),
                    )
                        .into_response(),
                    "2" => b"PK\x03\x04quote-two".to_vec().into_response(),
                    "5" => (
                        [(
                            header::CONTENT_DISPOSITION,
                            HeaderValue::from_bytes(UTF8_DISPOSITION.as_bytes()).unwrap(),
                        )],
                        b"PK\x03\x04quote-five".to_vec(),
                    )
                        .into_response(),
                    _ => (StatusCode::NOT_FOUND, Json(json!({ "detail": "not found" }))).into_response(),
                }
            }),
        )
        .route(
            "/quotes/{id}",
            axum::routing::delete(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "1" => StatusCode::NO_CONTENT,
                    "2" => StatusCode::OK,
                    _ => StatusCode::NOT_FOUND,
                }
            }),
        )
}

fn failing_upstream() -> Router {
    Router::new()
        .route("/quotes", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/quotes/{id}/download", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route("/quotes/{id}", axum::routing::delete(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
}

const UTF8_DISPOSITION: &str = "attachment; filename=\"cotización.xlsx\"";

// Nothing listens on port 1
const UNREACHABLE: &str = "http://127.0.0.1:1";

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, bytes::Bytes) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn ids(body: &Value) -> Vec<i64> {
    body["quotes"].as_array().unwrap().iter().map(|q| q["id"].as_i64().unwrap()).collect()
}

#[tokio::test]
async fn test_list_passes_through_without_search() {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let app = app_for(&spawn_upstream(healthy_upstream(queries.clone())).await);

    let (status, _, body) = send(&app, get_req("/api/integrations/quotes")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(ids(&body), vec![1, 2, 3]);
    assert_eq!(body["total"], 3);
    assert_eq!(body["quotes"][1]["created_at"], 1700000000);
    assert_eq!(queries.lock().unwrap().as_slice(), &[Some("limit=50".to_string())]);
}

#[tokio::test]
async fn test_list_forwards_year_and_limit() {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let app = app_for(&spawn_upstream(healthy_upstream(queries.clone())).await);

    let (status, _, _) = send(&app, get_req("/api/integrations/quotes?year=2024&limit=10&search=x")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(queries.lock().unwrap().as_slice(), &[Some("year=2024&limit=10".to_string())]);
}

#[tokio::test]
async fn test_list_unparsable_limit_uses_default() {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let app = app_for(&spawn_upstream(healthy_upstream(queries.clone())).await);

    send(&app, get_req("/api/integrations/quotes?limit=abc&year=soon")).await;
    send(&app, get_req("/api/integrations/quotes?limit=-5")).await;
    assert_eq!(
        queries.lock().unwrap().as_slice(),
        &[Some("limit=50".to_string()), Some("limit=50".to_string())]
    );
}

#[tokio::test]
async fn test_list_omits_zero_limit() {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let app = app_for(&spawn_upstream(healthy_upstream(queries.clone())).await);

    send(&app, get_req("/api/integrations/quotes?limit=0")).await;
    assert_eq!(queries.lock().unwrap().as_slice(), &[None]);
}

#[tokio::test]
async fn test_list_search_filters_and_recounts() {
    let app = app_for(&spawn_upstream(healthy_upstream(Arc::new(Mutex::new(Vec::new())))).await);

    // client "Constructora Andina" and project "Planta ANDINA"
    let (_, _, body) = send(&app, get_req("/api/integrations/quotes?search=andina")).await;
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(ids(&body), vec![1, 2]);
    assert_eq!(body["total"], 2);

    // document number is case-sensitive
    let (_, _, body) = send(&app, get_req("/api/integrations/quotes?search=B-00")).await;
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(ids(&body), vec![3]);
    assert_eq!(body["total"], 1);

    let (_, _, body) = send(&app, get_req("/api/integrations/quotes?search=b-00")).await;
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "quotes": [], "total": 0 }));
}

#[tokio::test]
async fn test_list_degrades_on_upstream_500() {
    let app = app_for(&spawn_upstream(failing_upstream()).await);
    let (status, _, body) = send(&app, get_req("/api/integrations/quotes?search=andina")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "quotes": [], "total": 0 }));
}

#[tokio::test]
async fn test_list_degrades_when_upstream_unreachable() {
    let app = app_for(UNREACHABLE);
    let (status, _, body) = send(&app, get_req("/api/integrations/quotes")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "quotes": [], "total": 0 }));
}

#[tokio::test]
async fn test_download_preserves_upstream_disposition() {
    let app = app_for(&spawn_upstream(healthy_upstream(Arc::new(Mutex::new(Vec::new())))).await);
    let (status, headers, body) = send(&app, get_req("/api/integrations/quotes/1/download")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(headers[header::CONTENT_DISPOSITION], "attachment; filename=\"COT-2024-0001.xlsx\"");
    assert_eq!(&body[..], b"PK\x03\x04quote-one");
}

#[tokio::test]
async fn test_download_substitutes_default_disposition() {
    let app = app_for(&spawn_upstream(healthy_upstream(Arc::new(Mutex::new(Vec::new())))).await);
    let (status, headers, body) = send(&app, get_req("/api/integrations/quotes/2/download")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_DISPOSITION], "attachment; filename=\"cotizacion.xlsx\"");
    assert_eq!(&body[..], b"PK\x03\x04quote-two");
}

#[tokio::test]
async fn test_download_relays_non_ascii_disposition() {
    let app = app_for(&spawn_upstream(healthy_upstream(Arc::new(Mutex::new(Vec::new())))).await);
    let (status, headers, body) = send(&app, get_req("/api/integrations/quotes/5/download")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_DISPOSITION].as_bytes(), UTF8_DISPOSITION.as_bytes());
    assert_eq!(
        headers[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(&body[..], b"PK\x03\x04quote-five");
}

#[tokio::test]
async fn test_download_not_found() {
    let app = app_for(&spawn_upstream(healthy_upstream(Arc::new(Mutex::new(Vec::new())))).await);
    let (status, _, body) = send(&app, get_req("/api/integrations/quotes/404/download")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "error": "Quote not found" }));
}

#[tokio::test]
async fn test_download_unreachable_is_500() {
    let app = app_for(UNREACHABLE);
    let (status, _, body) = send(&app, get_req("/api/integrations/quotes/1/download")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "error": "Failed to download quote" }));
}

#[tokio::test]
async fn test_delete_success_flag() {
    let app = app_for(&spawn_upstream(healthy_upstream(Arc::new(Mutex::new(Vec::new())))).await);
    for (id, expected) in [("1", true), ("2", true), ("9", false)] {
        let req = Request::builder()
            .method("DELETE")
            .uri(format!("/api/integrations/quotes/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "success": expected }), "id {id}");
    }
}

#[tokio::test]
async fn test_delete_failures_report_false() {
    for upstream in [spawn_upstream(failing_upstream()).await, UNREACHABLE.to_string()] {
        let app = app_for(&upstream);
        let req = Request::builder()
            .method("DELETE")
            .uri("/api/integrations/quotes/1")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "success": false }));
    }
}

fn handoff_req(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/integrations/quotes/handoff")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_handoff_redirects_by_intent() {
    let app = app_for(UNREACHABLE);

    let (status, _, body) = send(&app, handoff_req(r#"{"intent":"new"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "redirectUrl": "http://quotes.web:5173" }));

    let (_, _, body) = send(&app, handoff_req(r#"{"intent":"list","recordId":"company-7"}"#)).await;
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "redirectUrl": "http://quotes.web:5173/quotes" }));

    let (status, _, body) = send(&app, handoff_req("")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body, json!({ "redirectUrl": "http://quotes.web:5173/quotes" }));
}

#[tokio::test]
async fn test_handoff_accepts_any_json_intent() {
    let app = app_for(UNREACHABLE);

    let long_intent = format!(r#"{{"intent":"{}"}}"#, "x".repeat(33));
    let bodies = [
        long_intent.as_str(),
        r#"{"intent":"list","recordId":""}"#,
        r#"{"intent":5}"#,
        r#"{"intent":null}"#,
        r#"{"intent":"NEW"}"#,
        "[1, 2, 3]",
        "\"new\"",
    ];
    for raw in bodies {
        let (status, _, body) = send(&app, handoff_req(raw)).await;
        assert_eq!(status, StatusCode::OK, "body {raw}");
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "redirectUrl": "http://quotes.web:5173/quotes" }), "body {raw}");
    }
}

#[tokio::test]
async fn test_handoff_rejects_non_json_with_fixed_message() {
    let app = app_for(UNREACHABLE);

    let (status, _, body) = send(&app, handoff_req("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "BadRequest");
    assert_eq!(body["message"], "Invalid request body");
    assert!(body["details"].is_null());
}

#[tokio::test]
async fn test_navigation_and_health() {
    let app = app_for(UNREACHABLE);

    let (status, _, body) = send(&app, get_req("/api/navigation")).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body[0], json!({ "label": "Cotizaciones", "to": "/quotes", "icon": "IconTable" }));

    let (status, _, body) = send(&app, get_req("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}
