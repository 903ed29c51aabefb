pub mod about;
pub mod admin;
pub mod docs;
pub mod process_steps;
pub mod products;
pub mod settings;
pub mod testimonials;
pub mod upload;

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Route};

use crate::models::{ErrorResponse, ServiceError};

/// Upload bodies carry base64 images, so the default 32 KiB limit is too small.
const JSON_BODY_LIMIT: usize = 10 * 1024 * 1024;

pub fn method_not_allowed(req: &HttpRequest, allow: &str) -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, allow))
        .json(ErrorResponse {
            error: format!("Method {} Not Allowed", req.method()),
        })
}

/// Default service for a resource: 405 listing the methods it does support.
pub fn reject_other_methods(allow: &'static str) -> Route {
    web::to(move |req: HttpRequest| async move { method_not_allowed(&req, allow) })
}

/// Malformed bodies become 400s in the common `{"error": ...}` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            ServiceError::ValidationError(format!("Invalid JSON body: {}", err)).into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    products::configure(cfg);
    about::configure(cfg);
    process_steps::configure(cfg);
    testimonials::configure(cfg);
    settings::configure(cfg);
    admin::configure(cfg);
    upload::configure(cfg);
    docs::configure(cfg);
}
