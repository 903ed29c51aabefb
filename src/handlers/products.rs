use actix_web::{web, HttpResponse};

use crate::handlers::reject_other_methods;
use crate::models::{MessageResponse, Product, ProductDraft, ProductRequest, ServiceError};
use crate::services::CatalogService;

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "Active products, newest first", body = [Product]),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    )
)]
pub async fn list_products(
    service: web::Data<CatalogService<Product>>,
) -> Result<HttpResponse, ServiceError> {
    let products = service.list().await?;
    Ok(HttpResponse::Ok().json(products))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 307, description = "No admin session"),
        (status = 500, description = "Both data stores failed", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn create_product(
    service: web::Data<CatalogService<Product>>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, ServiceError> {
    let draft = ProductDraft::try_from(body.into_inner())?;
    let product = service.create(draft).await?;
    Ok(HttpResponse::Created().json(product))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product, including inactive ones", body = Product),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    )
)]
pub async fn get_product(
    service: web::Data<CatalogService<Product>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let product = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Missing required fields", body = ErrorResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn update_product(
    service: web::Data<CatalogService<Product>>,
    path: web::Path<String>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, ServiceError> {
    let draft = ProductDraft::try_from(body.into_inner())?;
    let product = service.update(&path.into_inner(), draft).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deactivated", body = MessageResponse),
        (status = 404, description = "Unknown product", body = ErrorResponse)
    ),
    security(("admin_session" = []))
)]
pub async fn delete_product(
    service: web::Data<CatalogService<Product>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let message = service.delete(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(message)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/products")
            .route(web::get().to(list_products))
            .route(web::post().to(create_product))
            .default_service(reject_other_methods("GET, POST")),
    )
    .service(
        web::resource("/api/products/{id}")
            .route(web::get().to(get_product))
            .route(web::put().to(update_product))
            .route(web::delete().to(delete_product))
            .default_service(reject_other_methods("GET, PUT, DELETE")),
    );
}
