use actix_web::{web, HttpResponse};

use crate::handlers::reject_other_methods;
use crate::models::{ServiceError, SettingsUpdateRequest};
use crate::services::SettingsService;

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Site settings with defaults for unset keys", body = SiteSettings),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    )
)]
pub async fn get_settings(
    service: web::Data<SettingsService>,
) -> Result<HttpResponse, ServiceError> {
    let settings = service.get().await?;
    Ok(HttpResponse::Ok().json(settings))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "settings",
    request_body = SettingsUpdateRequest,
    responses(
        (status = 200, description = "Settings after the update", body = SiteSettings),
        (status = 307, description = "No admin session"),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn update_settings(
    service: web::Data<SettingsService>,
    body: web::Json<SettingsUpdateRequest>,
) -> Result<HttpResponse, ServiceError> {
    let settings = service.update(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(settings))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/settings")
            .route(web::get().to(get_settings))
            .route(web::put().to(update_settings))
            .default_service(reject_other_methods("GET, PUT")),
    );
}
