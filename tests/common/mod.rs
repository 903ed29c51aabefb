#![allow(dead_code)]

pub mod failing_store;
pub mod fake_api;

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::middleware::from_fn;
use actix_web::{test, App};
use serde_json::json;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tempfile::TempDir;

use storefront_cms::auth::SESSION_COOKIE;
use storefront_cms::config::{AppConfig, Environment};
use storefront_cms::middleware::require_admin_session;
use storefront_cms::repositories::SqliteStore;
use storefront_cms::{configure_app, Services, Store};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

pub struct TestApp {
    pub pool: SqlitePool,
    pub services: Services,
    #[allow(dead_code)]
    pub temp_dir: TempDir,
}

/// Opens a fresh, migrated database inside `dir`.
pub async fn open_pool(dir: &TempDir, name: &str) -> SqlitePool {
    let db_path = dir.path().join(name);
    let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn test_config(environment: Environment) -> AppConfig {
    AppConfig {
        environment,
        jwt_secret: Some("test_secret_key".to_string()),
        ..AppConfig::default()
    }
}

/// Same middleware and routes as the server binary.
pub fn build_app(
    services: Services,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(from_fn(require_admin_session))
        .configure(configure_app(services))
}

/// Wires services over `primary` with `secondary` as the fallback store.
pub fn wire<P: Store, S: Store>(
    primary: Arc<P>,
    secondary: Option<Arc<S>>,
    environment: Environment,
) -> Services {
    Services::wire(primary, secondary, None, &test_config(environment))
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = open_pool(&temp_dir, "test.db").await;

        let services = wire(
            Arc::new(SqliteStore::new(pool.clone())),
            Option::<Arc<SqliteStore>>::None,
            Environment::Development,
        );

        Self {
            pool,
            services,
            temp_dir,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        build_app(self.services.clone())
    }

    pub async fn seed_admin(&self) {
        self.services
            .admin_users
            .ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
            .await
            .expect("Failed to seed admin");
    }

    /// Seeds the admin account, logs in and returns the session cookie.
    pub async fn login_cookie(&self) -> Cookie<'static> {
        self.seed_admin().await;
        let app = test::init_service(self.create_app()).await;

        let req = test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(json!({
                "email": ADMIN_EMAIL,
                "password": ADMIN_PASSWORD
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "login failed: {}", resp.status());

        resp.response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
            .map(|cookie| cookie.into_owned())
            .expect("Login response did not set a session cookie")
    }

    pub async fn count_rows(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count rows")
    }
}
