use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

use storefront_cms::config::SupabaseConfig;

pub const SERVICE_KEY: &str = "service-role-key";
pub const KNOWN_PRODUCT_ID: &str = "p-1";
pub const KNOWN_USER_ID: &str = "u-1";
pub const KNOWN_USER_EMAIL: &str = "admin@example.com";
pub const KNOWN_USER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<Recorded> {
        self.0.lock().unwrap().clone()
    }
}

/// The stored product row as the data API returns it.
pub fn product_row() -> Value {
    json!({
        "id": KNOWN_PRODUCT_ID,
        "title": "Alpaca Shawl",
        "category": "Wraps",
        "price_inr": "₹4,500",
        "price_gbp": "£45",
        "short": "Hand-loomed",
        "description": null,
        "materials": null,
        "images": ["https://cdn.example.com/a.jpg"],
        "is_active": true,
        "created_at": "2024-06-01T10:00:00",
        "updated_at": "2024-06-02T08:30:00.250+00:00"
    })
}

fn user_rows() -> Value {
    json!([
        { "id": "u-2", "email": "editor@example.com", "created_at": "2024-06-03T09:00:00+00:00" },
        { "id": KNOWN_USER_ID, "email": KNOWN_USER_EMAIL, "created_at": "2024-06-01T09:00:00+00:00" }
    ])
}

/// PostgREST answers a filtered PATCH or DELETE with the matching rows only.
fn matching_rows(recorded: &Recorded, known_id: &str, row: Value) -> HttpResponse {
    if recorded.param("id") == Some(format!("eq.{}", known_id).as_str()) {
        HttpResponse::Ok().json(json!([row]))
    } else {
        HttpResponse::Ok().json(json!([]))
    }
}

fn overlay(mut row: Value, patch: Value) -> Value {
    if let (Some(row), Value::Object(patch)) = (row.as_object_mut(), patch) {
        row.extend(patch);
    }
    row
}

/// Minimal stand-in for the hosted data API: PostgREST tables plus object storage.
async fn fake_api(req: HttpRequest, body: web::Bytes, recorder: web::Data<Recorder>) -> HttpResponse {
    let recorded = Recorded {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: url::form_urlencoded::parse(req.query_string().as_bytes())
            .into_owned()
            .collect(),
        headers: req
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body: body.to_vec(),
    };
    recorder.0.lock().unwrap().push(recorded.clone());

    match (recorded.method.as_str(), recorded.path.as_str()) {
        ("GET", "/rest/v1/products") => match recorded.param("id") {
            Some(_) => matching_rows(&recorded, KNOWN_PRODUCT_ID, product_row()),
            None => HttpResponse::Ok().json(json!([product_row()])),
        },
        ("POST", "/rest/v1/products") => {
            HttpResponse::Created().json(json!([recorded.json()]))
        }
        ("PATCH", "/rest/v1/products") => {
            let row = if recorded.param("select") == Some("id") {
                json!({ "id": KNOWN_PRODUCT_ID })
            } else {
                overlay(product_row(), recorded.json())
            };
            matching_rows(&recorded, KNOWN_PRODUCT_ID, row)
        }
        ("GET", "/rest/v1/site_settings") => HttpResponse::Ok().json(json!([
            { "key": "siteTitle", "value": "Remote Title" },
            { "key": "productCategories", "value": "[\"Shawls\"]" }
        ])),
        ("POST", "/rest/v1/site_settings") => HttpResponse::Created().finish(),
        ("GET", "/rest/v1/users") => match recorded.param("email") {
            Some(filter) if filter == format!("eq.{}", KNOWN_USER_EMAIL) => {
                HttpResponse::Ok().json(json!([{
                    "id": KNOWN_USER_ID,
                    "email": KNOWN_USER_EMAIL,
                    "password_hash": KNOWN_USER_HASH
                }]))
            }
            Some(_) => HttpResponse::Ok().json(json!([])),
            None => HttpResponse::Ok().json(user_rows()),
        },
        ("POST", "/rest/v1/users") => {
            let user = recorded.json();
            if user["email"] == KNOWN_USER_EMAIL {
                HttpResponse::Conflict().json(json!({
                    "code": "23505",
                    "message": "duplicate key value violates unique constraint \"users_email_key\""
                }))
            } else {
                HttpResponse::Created().json(json!([user]))
            }
        }
        ("PATCH", "/rest/v1/users") | ("DELETE", "/rest/v1/users") => {
            matching_rows(&recorded, KNOWN_USER_ID, json!({ "id": KNOWN_USER_ID }))
        }
        ("POST", path) if path.starts_with("/storage/v1/object/product-images/") => {
            if path.contains("rejected") {
                HttpResponse::BadRequest().json(json!({ "error": "Invalid mime type" }))
            } else {
                HttpResponse::Ok().json(json!({ "Key": path.trim_start_matches("/storage/v1/object/") }))
            }
        }
        _ => HttpResponse::NotFound().finish(),
    }
}

/// Serves the fake API on an ephemeral port and returns a config pointing at it.
pub async fn start_fake_api() -> (SupabaseConfig, Recorder) {
    let recorder = Recorder::default();
    let data = web::Data::new(recorder.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(fake_api))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("Failed to bind fake API");

    let address = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let config = SupabaseConfig {
        url: format!("http://{}/", address),
        service_key: SERVICE_KEY.to_string(),
    };
    (config, recorder)
}
