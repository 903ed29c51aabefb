use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::openapi::{Components, OpenApi as OpenApiDoc};
use utoipa::OpenApi;

use crate::auth::SESSION_COOKIE;
use crate::handlers;
use crate::models::{
    AboutSection, AboutSectionRequest, AdminUser, CredentialsRequest, ErrorResponse,
    MessageResponse, OkResponse, ProcessStep, ProcessStepRequest, Product, ProductRequest,
    SettingsUpdateRequest, SiteSettings, Testimonial, TestimonialRequest, UploadRequest,
    UploadResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::products::list_products,
        handlers::products::create_product,
        handlers::products::get_product,
        handlers::products::update_product,
        handlers::products::delete_product,
        handlers::about::list_about_sections,
        handlers::about::create_about_section,
        handlers::about::get_about_section,
        handlers::about::update_about_section,
        handlers::about::delete_about_section,
        handlers::process_steps::list_process_steps,
        handlers::process_steps::create_process_step,
        handlers::process_steps::get_process_step,
        handlers::process_steps::update_process_step,
        handlers::process_steps::delete_process_step,
        handlers::testimonials::list_testimonials,
        handlers::testimonials::create_testimonial,
        handlers::testimonials::get_testimonial,
        handlers::testimonials::update_testimonial,
        handlers::testimonials::delete_testimonial,
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::admin::login,
        handlers::admin::logout,
        handlers::admin::list_users,
        handlers::admin::create_user,
        handlers::admin::delete_user,
        handlers::upload::upload_file,
    ),
    components(schemas(
        Product,
        ProductRequest,
        AboutSection,
        AboutSectionRequest,
        ProcessStep,
        ProcessStepRequest,
        Testimonial,
        TestimonialRequest,
        SiteSettings,
        SettingsUpdateRequest,
        AdminUser,
        CredentialsRequest,
        UploadRequest,
        UploadResponse,
        MessageResponse,
        OkResponse,
        ErrorResponse,
    )),
    tags(
        (name = "products", description = "Product catalog"),
        (name = "about", description = "About page sections"),
        (name = "process-steps", description = "Making-of process steps"),
        (name = "testimonials", description = "Customer testimonials"),
        (name = "settings", description = "Site-wide settings"),
        (name = "admin", description = "Admin sessions, accounts and uploads"),
    ),
    info(title = "Storefront CMS API", description = "Catalog and site content backend")
)]
pub struct ApiDoc;

/// Registers the admin session cookie as the security scheme referenced by gated paths.
pub fn configure_openapi(mut openapi: OpenApiDoc) -> OpenApiDoc {
    let components = openapi.components.get_or_insert_with(Components::new);
    components.add_security_scheme(
        "admin_session",
        SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
            SESSION_COOKIE,
            "Signed session token issued by /api/admin/login",
        ))),
    );
    openapi
}
