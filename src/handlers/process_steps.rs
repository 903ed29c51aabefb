use actix_web::{web, HttpResponse};

use crate::handlers::reject_other_methods;
use crate::models::{
    MessageResponse, ProcessStep, ProcessStepDraft, ProcessStepRequest, ServiceError,
};
use crate::services::CatalogService;

#[utoipa::path(
    get,
    path = "/api/process-steps",
    tag = "process-steps",
    responses(
        (status = 200, description = "Active process steps by ascending order", body = [ProcessStep]),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    )
)]
pub async fn list_process_steps(
    service: web::Data<CatalogService<ProcessStep>>,
) -> Result<HttpResponse, ServiceError> {
    let items = service.list().await?;
    Ok(HttpResponse::Ok().json(items))
}

#[utoipa::path(
    post,
    path = "/api/process-steps",
    tag = "process-steps",
    request_body = ProcessStepRequest,
    responses(
        (status = 201, description = "Process step created", body = ProcessStep),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 307, description = "No admin session"),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn create_process_step(
    service: web::Data<CatalogService<ProcessStep>>,
    body: web::Json<ProcessStepRequest>,
) -> Result<HttpResponse, ServiceError> {
    let draft = ProcessStepDraft::try_from(body.into_inner())?;
    let item = service.create(draft).await?;
    Ok(HttpResponse::Created().json(item))
}

#[utoipa::path(
    get,
    path = "/api/process-steps/{id}",
    tag = "process-steps",
    params(("id" = String, Path, description = "Process step ID")),
    responses(
        (status = 200, description = "Process step, including inactive ones", body = ProcessStep),
        (status = 404, description = "Unknown process step", body = ErrorResponse)
    )
)]
pub async fn get_process_step(
    service: web::Data<CatalogService<ProcessStep>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let item = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[utoipa::path(
    put,
    path = "/api/process-steps/{id}",
    tag = "process-steps",
    params(("id" = String, Path, description = "Process step ID")),
    request_body = ProcessStepRequest,
    responses(
        (status = 200, description = "Process step updated", body = ProcessStep),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Unknown process step", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn update_process_step(
    service: web::Data<CatalogService<ProcessStep>>,
    path: web::Path<String>,
    body: web::Json<ProcessStepRequest>,
) -> Result<HttpResponse, ServiceError> {
    let draft = ProcessStepDraft::try_from(body.into_inner())?;
    let item = service.update(&path.into_inner(), draft).await?;
    Ok(HttpResponse::Ok().json(item))
}

#[utoipa::path(
    delete,
    path = "/api/process-steps/{id}",
    tag = "process-steps",
    params(("id" = String, Path, description = "Process step ID")),
    responses(
        (status = 200, description = "Process step deactivated", body = MessageResponse),
        (status = 404, description = "Unknown process step", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn delete_process_step(
    service: web::Data<CatalogService<ProcessStep>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let message = service.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/process-steps")
            .route(web::get().to(list_process_steps))
            .route(web::post().to(create_process_step))
            .default_service(reject_other_methods("GET, POST")),
    )
    .service(
        web::resource("/api/process-steps/{id}")
            .route(web::get().to(get_process_step))
            .route(web::put().to(update_process_step))
            .route(web::delete().to(delete_process_step))
            .default_service(reject_other_methods("GET, PUT, DELETE")),
    );
}
