//! HTTP route tests
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`,
//! backed by the fixture dataset or by an executor that always fails.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use units_core::config::Settings;
use units_core::server::{router, AppState};
use units_core::service::{ConceptService, Vocabulary};
use units_core::sparql::{LocalDataset, QueryExecutor, SparqlQuery, SparqlResults};
use units_core::{Result, UnitsError};

const M_SEC: &str = "https://vocab.sentier.dev/qudt/unit/M-SEC";
const LENGTH_TIME: &str = "https://vocab.sentier.dev/qudt/quantity-kind/LengthTime";
const ACCELERATION: &str = "https://vocab.sentier.dev/qudt/quantity-kind/Acceleration";

// ==================== Test Helper Functions ====================

struct FailingExecutor;

#[async_trait]
impl QueryExecutor for FailingExecutor {
    async fn select(&self, _query: &SparqlQuery) -> Result<SparqlResults> {
        Err(UnitsError::UpstreamStatus {
            status: 503,
            body: "endpoint down".to_string(),
        })
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

fn app_with(executor: Arc<dyn QueryExecutor>) -> Router {
    let service = ConceptService::new(executor, Vocabulary::from_settings(&Settings::default()));
    router(AppState::new(service))
}

fn app() -> Router {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("core-rs/tests/fixtures/vocab.trig");
    app_with(Arc::new(LocalDataset::load(path).unwrap()))
}

fn encode(iri: &str) -> String {
    iri.replace(':', "%3A").replace('/', "%2F")
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

// ==================== Routes ====================

#[tokio::test]
async fn test_version() {
    let (status, body) = get(app(), "/v0.1/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_latest_mirrors_versioned_routes() {
    let uri = format!("/quantity-kind?iri={}", encode(LENGTH_TIME));
    let (versioned_status, versioned) = get(app(), &format!("/v0.1{}", uri)).await;
    let (latest_status, latest) = get(app(), &format!("/latest{}", uri)).await;

    assert_eq!(versioned_status, StatusCode::OK);
    assert_eq!(latest_status, StatusCode::OK);
    assert_eq!(versioned, latest);
}

#[tokio::test]
async fn test_quantity_kind_triples_serialise_as_arrays() {
    let uri = format!("/v0.1/quantity-kind?iri={}", encode(LENGTH_TIME));
    let (status, body) = get(app(), &uri).await;
    assert_eq!(status, StatusCode::OK);

    let triples = body[M_SEC].as_array().unwrap();
    assert!(triples.contains(&serde_json::json!(["prefLabel", "Metre second"])));
    assert!(triples.contains(&serde_json::json!(["prefLabel", "Meter Sekunde", "de"])));
}

#[tokio::test]
async fn test_quantity_kind_keep_namespaces() {
    let uri = format!(
        "/v0.1/quantity-kind?iri={}&remove_namespaces=false&lang=en",
        encode(LENGTH_TIME)
    );
    let (status, body) = get(app(), &uri).await;
    assert_eq!(status, StatusCode::OK);

    let triples = body[M_SEC].as_array().unwrap();
    assert!(triples.contains(&serde_json::json!([
        "http://www.w3.org/2004/02/skos/core#prefLabel",
        "Metre second"
    ])));
}

#[tokio::test]
async fn test_quantity_kinds_catalog_shape() {
    let (status, body) = get(app(), "/v0.1/quantity-kinds").await;
    assert_eq!(status, StatusCode::OK);

    let acceleration = &body[ACCELERATION];
    assert_eq!(
        acceleration["informativeReference"],
        "http://en.wikipedia.org/wiki/Acceleration"
    );
    let labels = acceleration["prefLabel"].as_array().unwrap();
    assert!(labels.contains(&serde_json::json!(["accélération", "fr"])));
}

#[tokio::test]
async fn test_unit_data() {
    let uri = format!("/latest/unit?iri={}", encode(M_SEC));
    let (status, body) = get(app(), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["iri"], M_SEC);
    assert_eq!(body["quantityKind"], LENGTH_TIME);
    assert!(body["data"][M_SEC].is_array());
}

#[tokio::test]
async fn test_unit_quantity_kind() {
    let uri = format!("/v0.1/unit/quantity-kind?iri={}", encode(M_SEC));
    let (status, body) = get(app(), &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantityKind"], LENGTH_TIME);
}

// ==================== Errors ====================

#[tokio::test]
async fn test_unknown_unit_is_404() {
    let uri = format!(
        "/v0.1/unit/quantity-kind?iri={}",
        encode("https://vocab.sentier.dev/qudt/unit/W00T")
    );
    let (status, body) = get(app(), &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("W00T"));
}

#[tokio::test]
async fn test_invalid_filter_is_400() {
    let uri = format!("/v0.1/quantity-kind?iri={}&lang=abc", encode(LENGTH_TIME));
    let (status, body) = get(app(), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_iri_is_400() {
    let (status, _) = get(app(), "/v0.1/unit?iri=a%20b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_repeated_graphs_param_matches_single() {
    let base = format!("/v0.1/quantity-kind?iri={}", encode(LENGTH_TIME));
    let (status, repeated) = get(app(), &format!("{}&graphs=qudt,qudt", base)).await;
    let (_, single) = get(app(), &format!("{}&graphs=qudt", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(repeated, single);
}

#[tokio::test]
async fn test_graph_with_slash_is_400() {
    let uri = format!("/v0.1/quantity-kind?iri={}&graphs=qudt%2Funit", encode(LENGTH_TIME));
    let (status, body) = get(app(), &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("qudt/unit"));
}

#[tokio::test]
async fn test_catalog_rejects_graphs_param() {
    let (status, body) = get(app(), "/v0.1/quantity-kinds?graphs=simapro").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_query_string_errors_use_json_body() {
    for uri in [
        "/v0.1/unit".to_string(),
        "/latest/unit/quantity-kind".to_string(),
        format!("/v0.1/quantity-kind?iri={}&remove_namespaces=maybe", encode(LENGTH_TIME)),
    ] {
        let (status, body) = get(app(), &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body["error"].is_string(), "{}", uri);
    }
}

#[tokio::test]
async fn test_upstream_failure_is_502() {
    let (status, body) = get(app_with(Arc::new(FailingExecutor)), "/v0.1/quantity-kinds").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get(app(), "/v0.2/version").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_exposes_content_disposition() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/latest/version")
                .header(header::ORIGIN, "https://example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(headers[header::ACCESS_CONTROL_EXPOSE_HEADERS]
        .to_str()
        .unwrap()
        .contains("content-disposition"));
}
