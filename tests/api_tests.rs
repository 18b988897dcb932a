use std::{sync::Arc, time::Duration};

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use related_products::{
    error::RankingError,
    models::{Candidate, ProductContext, RemoteCandidateRef, UserProfile, Variant},
    routes::{create_router, AppState},
    services::{providers::RankingProvider, InMemoryCatalog, Recommender},
};

/// Provider that answers every call the same way
struct ScriptedProvider {
    ids: Option<Vec<&'static str>>,
}

#[async_trait::async_trait]
impl RankingProvider for ScriptedProvider {
    async fn fetch_ranking(
        &self,
        _context: &ProductContext,
        _profile: &UserProfile,
        _limit: usize,
    ) -> Result<Vec<RemoteCandidateRef>, RankingError> {
        match &self.ids {
            Some(ids) => Ok(ids
                .iter()
                .map(|id| RemoteCandidateRef { id: id.to_string() })
                .collect()),
            None => Err(RankingError::Timeout(Duration::from_secs(3))),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn catalog() -> Vec<Candidate> {
    let mut lamp = Candidate::new("P5", "Lamp", "Lighting", 40.0);
    lamp.variants = vec![Variant {
        color: Some("Black".to_string()),
        image: None,
        images: vec!["https://img.local/lamp.png".to_string()],
    }];

    vec![
        Candidate::new("P1", "Oak Table", "Furniture", 500.0),
        Candidate::new("P3", "Monitor", "Electronics", 500.0),
        Candidate::new("P2", "Armchair", "Furniture", 480.0),
        lamp,
        Candidate::new("P6", "Rug", "Decor", 120.0),
    ]
}

fn create_test_server(ids: Option<Vec<&'static str>>, products: Vec<Candidate>) -> TestServer {
    let state = AppState::new(
        Recommender::new(Arc::new(ScriptedProvider { ids })),
        Arc::new(InMemoryCatalog::new(products)),
        4,
        20,
    );
    let app = create_router(Arc::new(state));
    TestServer::new(app).unwrap()
}

fn viewed_table() -> Value {
    json!({
        "id": "P1",
        "name": "Oak Table",
        "category": "Furniture",
        "description": "Solid oak dining table",
        "price": 500,
        "colors": ["Brown"]
    })
}

fn ids(body: &Value) -> Vec<String> {
    body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(None, catalog());
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_remote_ranking_served_as_ai() {
    let server = create_test_server(Some(vec!["P5", "P6"]), catalog());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "product": viewed_table() }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["source"], "ai");
    assert_eq!(ids(&body), vec!["P5", "P6"]);
    assert_eq!(body["recommendations"][0]["name"], "Lamp");
    assert_eq!(
        body["recommendations"][0]["displayImage"],
        "https://img.local/lamp.png"
    );
    assert_eq!(body["recommendations"][0]["source"], "ai");
}

#[tokio::test]
async fn test_remote_failure_served_as_local() {
    let server = create_test_server(None, catalog());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "product": viewed_table(),
            "limit": 2
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["source"], "local");
    // Armchair: category + price, Monitor: price only
    assert_eq!(ids(&body), vec!["P2", "P3"]);
    assert!(body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["source"] == "local"));
}

#[tokio::test]
async fn test_profile_signals_reach_local_scoring() {
    let server = create_test_server(None, catalog());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "product": viewed_table(),
            "profile": {
                "searchHistory": ["RUG"],
                "categoryPreferences": {"Decor": 10, "Lighting": 1},
                "colorPreferences": {"Black": 3}
            },
            "limit": 3
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    // P2 = 130, P5 = 50 + 20, P6 = 50 + 15, P3 = 30
    assert_eq!(ids(&body), vec!["P2", "P5", "P6"]);
}

#[tokio::test]
async fn test_empty_catalog_returns_empty_list() {
    let server = create_test_server(Some(vec!["P5"]), Vec::new());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "product": viewed_table() }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_remote_ids_return_empty_list() {
    let server = create_test_server(Some(vec!["GHOST"]), catalog());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "product": viewed_table() }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["source"], "ai");
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_limit_above_maximum_rejected() {
    let server = create_test_server(None, catalog());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({
            "product": viewed_table(),
            "limit": 500
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "limit must be at most 20");
}

#[tokio::test]
async fn test_missing_product_rejected() {
    let server = create_test_server(None, catalog());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "limit": 2 }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = create_test_server(None, catalog());
    let request_id = "6f1c2f4e-8a6b-4b7e-9a51-0c6f3f9b2d10";

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static(request_id),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), request_id);
}

#[tokio::test]
async fn test_gateway_request_id_propagated() {
    let server = create_test_server(None, catalog());

    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_static("edge-7f3a-42"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("x-request-id"), "edge-7f3a-42");
}

#[tokio::test]
async fn test_request_id_assigned_when_absent() {
    let server = create_test_server(None, catalog());

    let response = server.get("/health").await;

    let assigned = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(assigned.to_str().unwrap()).is_ok());
}
