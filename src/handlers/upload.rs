use actix_web::{web, HttpResponse};

use crate::handlers::reject_other_methods;
use crate::models::{ServiceError, UploadRequest, UploadResponse};
use crate::services::UploadService;

#[utoipa::path(
    post,
    path = "/api/admin/upload",
    tag = "admin",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Stored; public URL returned", body = UploadResponse),
        (status = 400, description = "Missing fields or invalid base64", body = ErrorResponse),
        (status = 500, description = "Storage not configured or upload failed", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn upload_file(
    service: web::Data<UploadService>,
    body: web::Json<UploadRequest>,
) -> Result<HttpResponse, ServiceError> {
    let url = service.upload(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UploadResponse { url }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/admin/upload")
            .route(web::post().to(upload_file))
            .default_service(reject_other_methods("POST")),
    );
}
