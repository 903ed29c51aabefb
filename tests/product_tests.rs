use std::time::Duration;

use actix_web::{http::header, http::StatusCode, test};
use serde_json::json;

mod common;
use common::TestApp;

fn shawl() -> serde_json::Value {
    json!({
        "title": "  Alpaca Shawl ",
        "category": "Wraps",
        "priceInr": "₹4,500",
        "priceGbp": "£45",
        "short": "Hand-loomed in Goa",
        "materials": "Alpaca, Merino ,",
        "images": ["https://cdn.example.com/a.jpg", "not-a-url", " "]
    })
}

#[actix_web::test]
async fn test_create_product_normalizes_fields() {
    let test_app = TestApp::new().await;
    let cookie = test_app.login_cookie().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .cookie(cookie)
        .set_json(shawl())
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert_eq!(body["title"], "Alpaca Shawl");
    assert_eq!(body["priceInr"], "₹4,500");
    assert_eq!(body["materials"], json!(["Alpaca", "Merino"]));
    assert_eq!(body["images"], json!(["https://cdn.example.com/a.jpg"]));
    assert_eq!(body["isActive"], true);
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[actix_web::test]
async fn test_create_product_missing_fields() {
    let test_app = TestApp::new().await;
    let cookie = test_app.login_cookie().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .cookie(cookie)
        .set_json(json!({
            "title": "   ",
            "category": "Wraps",
            "priceInr": "₹4,500",
            "short": "Hand-loomed"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields: title, priceGbp");
    assert_eq!(test_app.count_rows("products").await, 0);
}

#[actix_web::test]
async fn test_malformed_json_is_a_bad_request() {
    let test_app = TestApp::new().await;
    let cookie = test_app.login_cookie().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .cookie(cookie)
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"title\": ")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_get_and_update_product() {
    let test_app = TestApp::new().await;
    let cookie = test_app.login_cookie().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .cookie(cookie.clone())
        .set_json(shawl())
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", id))
        .to_request();
    let fetched: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, created);

    let mut update = shawl();
    update["title"] = json!("Merino Scarf");
    update["materials"] = json!(["Merino"]);
    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{}", id))
        .cookie(cookie)
        .set_json(update)
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["title"], "Merino Scarf");
    assert_eq!(updated["materials"], json!(["Merino"]));
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[actix_web::test]
async fn test_unknown_product_is_not_found() {
    let test_app = TestApp::new().await;
    let cookie = test_app.login_cookie().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/products/does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Product not found");

    let req = test::TestRequest::put()
        .uri("/api/products/does-not-exist")
        .cookie(cookie.clone())
        .set_json(shawl())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/api/products/does-not-exist")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_soft_delete_hides_product_from_list() {
    let test_app = TestApp::new().await;
    let cookie = test_app.login_cookie().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .cookie(cookie.clone())
        .set_json(shawl())
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{}", id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product deleted");

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let listed: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed, json!([]));

    // Still reachable by id, flagged inactive.
    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", id))
        .to_request();
    let fetched: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["isActive"], false);
    assert_eq!(test_app.count_rows("products").await, 1);
}

#[actix_web::test]
async fn test_products_listed_newest_first() {
    let test_app = TestApp::new().await;
    let cookie = test_app.login_cookie().await;
    let app = test::init_service(test_app.create_app()).await;

    for title in ["First", "Second", "Third"] {
        let mut product = shawl();
        product["title"] = json!(title);
        let req = test::TestRequest::post()
            .uri("/api/products")
            .cookie(cookie.clone())
            .set_json(product)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        actix_web::rt::time::sleep(Duration::from_millis(5)).await;
    }

    let req = test::TestRequest::get().uri("/api/products").to_request();
    let listed: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = listed.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);
}

#[actix_web::test]
async fn test_unsupported_method_lists_allowed_methods() {
    let test_app = TestApp::new().await;
    let cookie = test_app.login_cookie().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::patch()
        .uri("/api/products")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers().get(header::ALLOW).unwrap(), "GET, POST");

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Method PATCH Not Allowed");
}
