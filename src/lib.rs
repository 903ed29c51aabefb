//! Storefront CMS backend: catalog resources, site settings and admin accounts
//! served over actix-web, persisted in SQLite with an optional hosted data API
//! as fallback.

pub mod auth;
pub mod config;
pub mod database;
pub mod handlers;
pub mod mapper;
pub mod middleware;
pub mod models;
pub mod openapi_config;
pub mod repositories;
pub mod services;
pub mod storage;

use std::sync::Arc;

use actix_web::web;

use crate::auth::JwtManager;
use crate::config::AppConfig;
use crate::models::{AboutSection, CatalogEntity, ProcessStep, Product, Testimonial};
use crate::repositories::{
    AdminUserRepository, CatalogRepository, FallbackRepository, SettingsRepository,
};
use crate::services::{
    AdminUserService, AuthService, CatalogService, SettingsService, UploadService,
};
use crate::storage::ObjectStorage;

/// A backend able to serve every resource.
pub trait Store:
    CatalogRepository<Product>
    + CatalogRepository<AboutSection>
    + CatalogRepository<ProcessStep>
    + CatalogRepository<Testimonial>
    + SettingsRepository
    + AdminUserRepository
    + 'static
{
}

impl<T> Store for T where
    T: CatalogRepository<Product>
        + CatalogRepository<AboutSection>
        + CatalogRepository<ProcessStep>
        + CatalogRepository<Testimonial>
        + SettingsRepository
        + AdminUserRepository
        + 'static
{
}

fn catalog_repository<E, P, S>(
    primary: &Arc<P>,
    secondary: &Option<Arc<S>>,
) -> Arc<dyn CatalogRepository<E>>
where
    E: CatalogEntity,
    P: CatalogRepository<E> + 'static,
    S: CatalogRepository<E> + 'static,
{
    let primary: Arc<dyn CatalogRepository<E>> = primary.clone();
    let secondary = secondary
        .clone()
        .map(|store| store as Arc<dyn CatalogRepository<E>>);
    Arc::new(FallbackRepository::new(primary, secondary, E::PLURAL))
}

/// Application services, shared across workers.
#[derive(Clone)]
pub struct Services {
    pub products: web::Data<CatalogService<Product>>,
    pub about: web::Data<CatalogService<AboutSection>>,
    pub process_steps: web::Data<CatalogService<ProcessStep>>,
    pub testimonials: web::Data<CatalogService<Testimonial>>,
    pub settings: web::Data<SettingsService>,
    pub admin_users: web::Data<AdminUserService>,
    pub auth: web::Data<AuthService>,
    pub uploads: web::Data<UploadService>,
}

impl Services {
    /// Wraps each resource's primary and optional secondary store in a fallback
    /// repository and builds the services on top.
    pub fn wire<P: Store, S: Store>(
        primary: Arc<P>,
        secondary: Option<Arc<S>>,
        storage: Option<ObjectStorage>,
        config: &AppConfig,
    ) -> Self {
        let environment = config.environment;

        let settings_repository: Arc<dyn SettingsRepository> = Arc::new(FallbackRepository::new(
            primary.clone() as Arc<dyn SettingsRepository>,
            secondary
                .clone()
                .map(|store| store as Arc<dyn SettingsRepository>),
            "settings",
        ));

        let user_repository: Arc<dyn AdminUserRepository> = Arc::new(FallbackRepository::new(
            primary.clone() as Arc<dyn AdminUserRepository>,
            secondary
                .clone()
                .map(|store| store as Arc<dyn AdminUserRepository>),
            "users",
        ));

        let jwt_manager = config.jwt_secret.as_deref().map(JwtManager::new);

        Self {
            products: web::Data::new(CatalogService::new(
                catalog_repository::<Product, _, _>(&primary, &secondary),
                environment,
            )),
            about: web::Data::new(CatalogService::new(
                catalog_repository::<AboutSection, _, _>(&primary, &secondary),
                environment,
            )),
            process_steps: web::Data::new(CatalogService::new(
                catalog_repository::<ProcessStep, _, _>(&primary, &secondary),
                environment,
            )),
            testimonials: web::Data::new(CatalogService::new(
                catalog_repository::<Testimonial, _, _>(&primary, &secondary),
                environment,
            )),
            settings: web::Data::new(SettingsService::new(settings_repository, environment)),
            admin_users: web::Data::new(AdminUserService::new(
                user_repository.clone(),
                environment,
            )),
            auth: web::Data::new(AuthService::new(user_repository, jwt_manager, environment)),
            uploads: web::Data::new(UploadService::new(storage, environment)),
        }
    }
}

/// Registers services, the JSON extractor config and every route.
pub fn configure_app(services: Services) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(services.products)
            .app_data(services.about)
            .app_data(services.process_steps)
            .app_data(services.testimonials)
            .app_data(services.settings)
            .app_data(services.admin_users)
            .app_data(services.auth)
            .app_data(services.uploads)
            .app_data(handlers::json_config());
        handlers::configure(cfg);
    }
}
