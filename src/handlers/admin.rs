use actix_web::{web, HttpResponse};

use crate::auth::{expired_session_cookie, session_cookie};
use crate::handlers::reject_other_methods;
use crate::models::{CredentialsRequest, MessageResponse, OkResponse, ServiceError};
use crate::services::{AdminUserService, AuthService};

#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful - session cookie set", body = OkResponse),
        (status = 400, description = "Email or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Session signing not configured", body = ErrorResponse)
    )
)]
pub async fn login(
    auth: web::Data<AuthService>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (email, password) = body.into_inner().into_parts()?;
    let token = auth.login(&email, &password).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, auth.secure_cookies()))
        .json(OkResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    tag = "admin",
    responses(
        (status = 200, description = "Session cookie cleared", body = OkResponse)
    )
)]
pub async fn logout(auth: web::Data<AuthService>) -> Result<HttpResponse, ServiceError> {
    Ok(HttpResponse::Ok()
        .cookie(expired_session_cookie(auth.secure_cookies()))
        .json(OkResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    responses(
        (status = 200, description = "Admin accounts, newest first", body = [AdminUser]),
        (status = 307, description = "No admin session")
    ),
    security(("admin_session" = []))
)]
pub async fn list_users(
    service: web::Data<AdminUserService>,
) -> Result<HttpResponse, ServiceError> {
    let users = service.list().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    tag = "admin",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Admin account created", body = AdminUser),
        (status = 400, description = "Missing fields or email already registered", body = ErrorResponse),
        (status = 307, description = "No admin session")
    ),
    security(("admin_session" = []))
)]
pub async fn create_user(
    service: web::Data<AdminUserService>,
    body: web::Json<CredentialsRequest>,
) -> Result<HttpResponse, ServiceError> {
    let (email, password) = body.into_inner().into_parts()?;
    let user = service.create(&email, &password).await?;
    Ok(HttpResponse::Created().json(user))
}

#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Admin user ID")),
    responses(
        (status = 200, description = "Admin account removed", body = MessageResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 307, description = "No admin session")
    ),
    security(("admin_session" = []))
)]
pub async fn delete_user(
    service: web::Data<AdminUserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let message = service.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/admin/login")
            .route(web::post().to(login))
            .default_service(reject_other_methods("POST")),
    )
    .service(
        web::resource("/api/admin/logout")
            .route(web::post().to(logout))
            .default_service(reject_other_methods("POST")),
    )
    .service(
        web::resource("/api/admin/users")
            .route(web::get().to(list_users))
            .route(web::post().to(create_user))
            .default_service(reject_other_methods("GET, POST")),
    )
    .service(
        web::resource("/api/admin/users/{id}")
            .route(web::delete().to(delete_user))
            .default_service(reject_other_methods("DELETE")),
    );
}
