use std::collections::BTreeSet;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::{http::StatusCode, test};
use serde_json::json;
use tempfile::TempDir;

mod common;
use common::failing_store::FailingStore;
use common::fake_api::{start_fake_api, KNOWN_PRODUCT_ID};
use common::{build_app, open_pool, wire, TestApp};
use storefront_cms::auth::{JwtManager, SESSION_COOKIE};
use storefront_cms::config::Environment;
use storefront_cms::repositories::{RestStore, SqliteStore};

fn testimonial() -> serde_json::Value {
    json!({ "content": "Lovely colours", "author": "Meera", "order": 1 })
}

fn product() -> serde_json::Value {
    json!({
        "title": "Merino Scarf",
        "category": "Scarves",
        "priceInr": "₹2,000",
        "priceGbp": "£20",
        "short": "Light and warm",
        "materials": ["Merino"]
    })
}

fn keys(value: &serde_json::Value) -> BTreeSet<String> {
    value.as_object().unwrap().keys().cloned().collect()
}

#[actix_web::test]
async fn test_secondary_serves_when_primary_fails() {
    let temp_dir = TempDir::new().unwrap();
    let secondary_pool = open_pool(&temp_dir, "secondary.db").await;
    let services = wire(
        Arc::new(FailingStore),
        Some(Arc::new(SqliteStore::new(secondary_pool.clone()))),
        Environment::Development,
    );

    // Login itself goes through the fallback for the credential lookup.
    services
        .admin_users
        .ensure_admin("admin@example.com", "pw-123456")
        .await
        .unwrap();
    let app = test::init_service(build_app(services)).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": "admin@example.com", "password": "pw-123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .next()
        .map(|c| c.into_owned())
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/api/testimonials")
        .cookie(cookie)
        .set_json(testimonial())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["author"], "Meera");
    assert_eq!(created["isActive"], true);

    let req = test::TestRequest::get().uri("/api/testimonials").to_request();
    let listed: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, vec![created]);

    let req = test::TestRequest::get().uri("/api/settings").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM testimonials")
        .fetch_one(&secondary_pool)
        .await
        .unwrap();
    assert_eq!(stored, 1);
}

#[actix_web::test]
async fn test_both_stores_failing_reports_detail_in_development() {
    let services = wire(
        Arc::new(FailingStore),
        Some(Arc::new(FailingStore)),
        Environment::Development,
    );
    let app = test::init_service(build_app(services)).await;

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("primary offline"), "unexpected error: {}", error);
}

#[actix_web::test]
async fn test_both_stores_failing_hides_detail_in_production() {
    let services = wire(
        Arc::new(FailingStore),
        Some(Arc::new(FailingStore)),
        Environment::Production,
    );
    let app = test::init_service(build_app(services)).await;

    let req = test::TestRequest::get().uri("/api/about").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to fetch about sections");
}

#[actix_web::test]
async fn test_primary_without_secondary_surfaces_failure() {
    let services = wire(
        Arc::new(FailingStore),
        Option::<Arc<FailingStore>>::None,
        Environment::Production,
    );
    let app = test::init_service(build_app(services)).await;

    let req = test::TestRequest::get().uri("/api/settings").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to fetch settings");
}

#[actix_web::test]
async fn test_rest_secondary_serves_catalog_writes_over_http() {
    let (supabase, recorder) = start_fake_api().await;
    let services = wire(
        Arc::new(FailingStore),
        Some(Arc::new(RestStore::new(&supabase).unwrap())),
        Environment::Development,
    );
    let app = test::init_service(build_app(services)).await;

    let token = JwtManager::new("test_secret_key")
        .generate_token("u-1")
        .unwrap();
    let cookie = Cookie::new(SESSION_COOKIE, token);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .cookie(cookie.clone())
        .set_json(product())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(created["priceGbp"], "£20");
    assert_eq!(created["materials"], json!(["Merino"]));
    assert_eq!(created["isActive"], true);

    // The same create served by SQLite alone.
    let sqlite_app = TestApp::new().await;
    let sqlite_cookie = sqlite_app.login_cookie().await;
    let direct = test::init_service(sqlite_app.create_app()).await;
    let req = test::TestRequest::post()
        .uri("/api/products")
        .cookie(sqlite_cookie)
        .set_json(product())
        .to_request();
    let resp = test::call_service(&direct, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let expected: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(keys(&created), keys(&expected));

    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{}", KNOWN_PRODUCT_ID))
        .cookie(cookie.clone())
        .set_json(product())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["id"], KNOWN_PRODUCT_ID);
    assert_eq!(updated["title"], "Merino Scarf");
    assert_eq!(keys(&updated), keys(&expected));

    let req = test::TestRequest::put()
        .uri("/api/products/missing")
        .cookie(cookie.clone())
        .set_json(product())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{}", KNOWN_PRODUCT_ID))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let requests = recorder.requests();
    let methods: Vec<&str> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec!["POST", "PATCH", "PATCH", "PATCH"]);
    assert_eq!(requests[3].json()["is_active"], false);
}
