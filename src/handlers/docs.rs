use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::openapi_config::{configure_openapi, ApiDoc};

pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(configure_openapi(ApiDoc::openapi()))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api-docs/openapi.json", web::get().to(openapi_json));
}
