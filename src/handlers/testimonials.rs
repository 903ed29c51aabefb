use actix_web::{web, HttpResponse};

use crate::handlers::reject_other_methods;
use crate::models::{
    MessageResponse, ServiceError, Testimonial, TestimonialDraft, TestimonialRequest,
};
use crate::services::CatalogService;

#[utoipa::path(
    get,
    path = "/api/testimonials",
    tag = "testimonials",
    responses(
        (status = 200, description = "Active testimonials by ascending order", body = [Testimonial]),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    )
)]
pub async fn list_testimonials(
    service: web::Data<CatalogService<Testimonial>>,
) -> Result<HttpResponse, ServiceError> {
    let items = service.list().await?;
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    post,
    path = "/api/testimonials",
    tag = "testimonials",
    request_body = TestimonialRequest,
    responses(
        (status = 201, description = "Testimonial created", body = Testimonial),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 307, description = "No admin session"),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn create_testimonial(
    service: web::Data<CatalogService<Testimonial>>,
    body: web::Json<TestimonialRequest>,
) -> Result<HttpResponse, ServiceError> {
    let draft = TestimonialDraft::try_from(body.into_inner())?;
    let item = service.create(draft).await?;
    Ok(HttpResponse::Created().json(item))
}

#[utoipa::path(
    get,
    path = "/api/testimonials/{id}",
    tag = "testimonials",
    params(("id" = String, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Testimonial, including inactive ones", body = Testimonial),
        (status = 404, description = "Unknown testimonial", body = ErrorResponse)
    )
)]
pub async fn get_testimonial(
    service: web::Data<CatalogService<Testimonial>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let item = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[utoipa::path(
    put,
    path = "/api/testimonials/{id}",
    tag = "testimonials",
    params(("id" = String, Path, description = "Testimonial ID")),
    request_body = TestimonialRequest,
    responses(
        (status = 200, description = "Testimonial updated", body = Testimonial),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Unknown testimonial", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn update_testimonial(
    service: web::Data<CatalogService<Testimonial>>,
    path: web::Path<String>,
    body: web::Json<TestimonialRequest>,
) -> Result<HttpResponse, ServiceError> {
    let draft = TestimonialDraft::try_from(body.into_inner())?;
    let item = service.update(&path.into_inner(), draft).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[utoipa::path(
    delete,
    path = "/api/testimonials/{id}",
    tag = "testimonials",
    params(("id" = String, Path, description = "Testimonial ID")),
    responses(
        (status = 200, description = "Testimonial deactivated", body = MessageResponse),
        (status = 404, description = "Unknown testimonial", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn delete_testimonial(
    service: web::Data<CatalogService<Testimonial>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let message = service.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/testimonials")
            .route(web::get().to(list_testimonials))
            .route(web::post().to(create_testimonial))
            .default_service(reject_other_methods("GET, POST")),
    )
    .service(
        web::resource("/api/testimonials/{id}")
            .route(web::get().to(get_testimonial))
            .route(web::put().to(update_testimonial))
            .route(web::delete().to(delete_testimonial))
            .default_service(reject_other_methods("GET, PUT, DELETE")),
    );
}
