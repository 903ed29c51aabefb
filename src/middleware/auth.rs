use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{header, Method};
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpResponse};

use crate::auth::extract_session_token;
use crate::services::AuthService;

pub const LOGIN_PAGE: &str = "/admin/login";

const PUBLIC_ADMIN_PATHS: [&str; 2] = ["/api/admin/login", "/api/admin/logout"];

const CATALOG_PREFIXES: [&str; 5] = [
    "/api/products",
    "/api/about",
    "/api/process-steps",
    "/api/testimonials",
    "/api/settings",
];

fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .map(|rest| rest.is_empty() || rest.starts_with('/'))
        .unwrap_or(false)
}

/// Admin API routes (except login/logout) and catalog writes need a session.
pub fn requires_session(method: &Method, path: &str) -> bool {
    if is_under(path, "/api/admin") {
        return !PUBLIC_ADMIN_PATHS.contains(&path);
    }

    let read_only = matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS);
    !read_only && CATALOG_PREFIXES.iter().any(|prefix| is_under(path, prefix))
}

pub fn login_redirect(path: &str) -> String {
    let next: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("{}?next={}", LOGIN_PAGE, next)
}

/// Redirects gated requests without a valid session cookie to the login page.
pub async fn require_admin_session(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let path = req.match_info().as_str().to_string();
    if !requires_session(req.method(), &path) {
        return next.call(req).await.map(ServiceResponse::map_into_boxed_body);
    }

    let authorized = match (
        req.app_data::<web::Data<AuthService>>(),
        extract_session_token(req.request()),
    ) {
        (Some(auth), Some(token)) => auth.is_valid_session(&token),
        _ => false,
    };

    if authorized {
        return next.call(req).await.map(ServiceResponse::map_into_boxed_body);
    }

    tracing::info!(
        method = %req.method(),
        path = %path,
        "Redirecting request without a valid session to login"
    );

    let response = HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, login_redirect(&path)))
        .finish();
    Ok(req.into_response(response))
}
