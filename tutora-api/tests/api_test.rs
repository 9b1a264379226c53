use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use tutora_api::middleware::AdminClaims;
use tutora_api::state::{AppState, AuthConfig};
use tutora_api::app;
use tutora_core::{LocalConfigCache, RemoteConfigStore};
use tutora_shared::Masked;
use tutora_store::{InMemoryDocumentStore, MemoryConfigCache, PricingConfigRepository};

const SECRET: &str = "test-secret";

fn test_app(remote: Arc<InMemoryDocumentStore>) -> Router {
    let remote: Arc<dyn RemoteConfigStore> = remote;
    let cache: Arc<dyn LocalConfigCache> = Arc::new(MemoryConfigCache::new());
    app(AppState {
        pricing: PricingConfigRepository::new(Some(remote), cache),
        auth: AuthConfig {
            secret: Masked(SECRET.to_string()),
        },
    })
}

fn token(role: &str) -> String {
    let claims = AdminClaims {
        sub: "admin@tutora.test".to_string(),
        role: role.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn approx(value: &Value, expected: f64) -> bool {
    (value.as_f64().unwrap() - expected).abs() < 1e-9
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(test_app(Arc::new(InMemoryDocumentStore::new())), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_quote_with_defaults() {
    let app = test_app(Arc::new(InMemoryDocumentStore::new()));
    let (status, body) = send(app, get("/v1/pricing/quote?category=premiumStudent&currency=GHS")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(approx(&body["baseUsd"], 5.0));
    assert!(approx(&body["discountedUsd"], 5.0));
    assert!(approx(&body["localAmount"], 77.5));
    assert_eq!(body["currency"], "GHS");
    assert!(body["appliedDiscount"].is_null());
}

#[tokio::test]
async fn test_quote_applies_adjustment_and_campaign() {
    let remote = Arc::new(InMemoryDocumentStore::with_document(json!({
        "countryAdjustments": { "ghana": { "usdMultiplier": 0.7 } },
        "discounts": [{
            "id": "term-start", "name": "Term start", "enabled": true,
            "type": "percent", "value": 20,
            "countryIds": ["all"], "appliesTo": ["premiumStudent"]
        }]
    })));
    let (status, body) = send(test_app(remote), get("/v1/pricing/quote?category=premiumStudent&country=ghana")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(approx(&body["effectiveUsd"], 3.5));
    assert!(approx(&body["discountedUsd"], 2.8));
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["adjustmentKey"], "ghana");
    assert_eq!(body["appliedDiscount"]["id"], "term-start");
}

#[tokio::test]
async fn test_quote_rejects_unknown_category() {
    let app = test_app(Arc::new(InMemoryDocumentStore::new()));
    let (status, body) = send(app, get("/v1/pricing/quote?category=all")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("all"));
}

#[tokio::test]
async fn test_catalog_lists_every_category() {
    let app = test_app(Arc::new(InMemoryDocumentStore::new()));
    let (status, body) = send(app, get("/v1/pricing/catalog?currency=NGN")).await;
    assert_eq!(status, StatusCode::OK);
    let quotes = body.as_array().unwrap();
    assert_eq!(quotes.len(), 8);
    assert!(quotes.iter().all(|q| q["currency"] == "NGN"));
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let app = test_app(Arc::new(InMemoryDocumentStore::new()));

    let (status, _) = send(app.clone(), get("/v1/admin/pricing")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let bad = Request::builder()
        .uri("/v1/admin/pricing")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app.clone(), bad).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let learner = Request::builder()
        .uri("/v1/admin/pricing")
        .header(header::AUTHORIZATION, format!("Bearer {}", token("LEARNER")))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(app, learner).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_save_is_visible_to_next_quote() {
    let remote = Arc::new(InMemoryDocumentStore::new());
    let app = test_app(remote.clone());

    let save = Request::builder()
        .method("PUT")
        .uri("/v1/admin/pricing")
        .header(header::AUTHORIZATION, format!("Bearer {}", token("ADMIN")))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "pricePolicyMode": "strict_shared",
                "countryAdjustments": {
                    "nigeria": { "usdMultiplier": 0.9 },
                    "waec5": { "overrideUsd": { "virtualLab": 4 } }
                },
                "discounts": [{ "id": "broken", "type": "mystery", "value": 1 }]
            })
            .to_string(),
        ))
        .unwrap();
    let (status, saved) = send(app.clone(), save).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["updatedBy"], "admin@tutora.test");
    assert_eq!(saved["pricePolicyMode"], "strict_shared");
    assert_eq!(saved["discounts"], json!([]));
    assert_eq!(remote.snapshot().unwrap()["updatedBy"], "admin@tutora.test");

    let (status, quote) = send(app, get("/v1/pricing/quote?category=virtualLab&country=nigeria")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(approx(&quote["effectiveUsd"], 4.0));
    assert_eq!(quote["adjustmentKey"], "waec5");
}

#[tokio::test]
async fn test_admin_save_keeps_campaigns_with_offset_dates() {
    let remote = Arc::new(InMemoryDocumentStore::new());
    let app = test_app(remote.clone());

    let save = Request::builder()
        .method("PUT")
        .uri("/v1/admin/pricing")
        .header(header::AUTHORIZATION, format!("Bearer {}", token("ADMIN")))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "discounts": [
                    { "id": "keep", "name": "Keep", "enabled": true, "type": "percent", "value": 10 },
                    { "id": "sept", "name": "September", "enabled": true, "type": "percent", "value": 15,
                      "startsAtIso": "2026-09-01T00:00:00+0000" }
                ]
            })
            .to_string(),
        ))
        .unwrap();
    let (status, saved) = send(app, save).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["discounts"][1]["id"], "sept");
    assert_eq!(saved["discounts"][1]["startsAtIso"], "2026-09-01T00:00:00Z");

    let stored = remote.snapshot().unwrap();
    let ids: Vec<&str> = stored["discounts"].as_array().unwrap().iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["keep", "sept"]);
}

#[tokio::test]
async fn test_admin_discount_views() {
    let past = (Utc::now() - Duration::days(2)).to_rfc3339();
    let remote = Arc::new(InMemoryDocumentStore::with_document(json!({
        "discounts": [
            { "id": "live", "name": "Live", "enabled": true, "type": "fixedUsd", "value": 1,
              "countryIds": ["ghana"], "appliesTo": ["all"] },
            { "id": "over", "name": "Over", "enabled": true, "type": "percent", "value": 30,
              "endsAtIso": past, "countryIds": ["all"], "appliesTo": ["all"] },
            { "id": "typo", "name": "Typo", "enabled": true, "type": "percent", "value": 50,
              "startsAtIso": "last week", "countryIds": ["all"], "appliesTo": ["all"] }
        ]
    })));
    let app = test_app(remote);
    let auth = format!("Bearer {}", token("ADMIN"));

    let list = Request::builder()
        .uri("/v1/admin/pricing/discounts")
        .header(header::AUTHORIZATION, &auth)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app.clone(), list).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["status"], "RUNNING");
    assert_eq!(body[1]["status"], "ENDED");
    assert_eq!(body[2]["status"], "INVALID_WINDOW");
    assert_eq!(body[2]["campaign"]["startsAtIso"], "last week");

    let active = Request::builder()
        .uri("/v1/admin/pricing/discounts/active?category=fullBundle&country=ghana")
        .header(header::AUTHORIZATION, &auth)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, active).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body.as_array().unwrap().iter().map(|c| c["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["live"]);
}
