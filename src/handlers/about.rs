use actix_web::{web, HttpResponse};

use crate::handlers::reject_other_methods;
use crate::models::{
    AboutSection, AboutSectionDraft, AboutSectionRequest, MessageResponse, ServiceError,
};
use crate::services::CatalogService;

#[utoipa::path(
    get,
    path = "/api/about",
    tag = "about",
    responses(
        (status = 200, description = "Active about sections by ascending order", body = [AboutSection]),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    )
)]
pub async fn list_about_sections(
    service: web::Data<CatalogService<AboutSection>>,
) -> Result<HttpResponse, ServiceError> {
    let items = service.list().await?;
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    post,
    path = "/api/about",
    tag = "about",
    request_body = AboutSectionRequest,
    responses(
        (status = 201, description = "About section created", body = AboutSection),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 307, description = "No admin session"),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn create_about_section(
    service: web::Data<CatalogService<AboutSection>>,
    body: web::Json<AboutSectionRequest>,
) -> Result<HttpResponse, ServiceError> {
    let draft = AboutSectionDraft::try_from(body.into_inner())?;
    let item = service.create(draft).await?;
    Ok(HttpResponse::Created().json(item))
}

#[utoipa::path(
    get,
    path = "/api/about/{id}",
    tag = "about",
    params(("id" = String, Path, description = "About section ID")),
    responses(
        (status = 200, description = "About section, including inactive ones", body = AboutSection),
        (status = 404, description = "Unknown about section", body = ErrorResponse)
    )
)]
pub async fn get_about_section(
    service: web::Data<CatalogService<AboutSection>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let item = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[utoipa::path(
    put,
    path = "/api/about/{id}",
    tag = "about",
    params(("id" = String, Path, description = "About section ID")),
    request_body = AboutSectionRequest,
    responses(
        (status = 200, description = "About section updated", body = AboutSection),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Unknown about section", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn update_about_section(
    service: web::Data<CatalogService<AboutSection>>,
    path: web::Path<String>,
    body: web::Json<AboutSectionRequest>,
) -> Result<HttpResponse, ServiceError> {
    let draft = AboutSectionDraft::try_from(body.into_inner())?;
    let item = service.update(&path.into_inner(), draft).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[utoipa::path(
    delete,
    path = "/api/about/{id}",
    tag = "about",
    params(("id" = String, Path, description = "About section ID")),
    responses(
        (status = 200, description = "About section deactivated", body = MessageResponse),
        (status = 404, description = "Unknown about section", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn delete_about_section(
    service: web::Data<CatalogService<AboutSection>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let message = service.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/about")
            .route(web::get().to(list_about_sections))
            .route(web::post().to(create_about_section))
            .default_service(reject_other_methods("GET, POST")),
    )
    .service(
        web::resource("/api/about/{id}")
            .route(web::get().to(get_about_section))
            .route(web::put().to(update_about_section))
            .route(web::delete().to(delete_about_section))
            .default_service(reject_other_methods("GET, PUT, DELETE")),
    );
}
