use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{from_fn, Logger};
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use storefront_cms::config::AppConfig;
use storefront_cms::database::initialize_database;
use storefront_cms::middleware::require_admin_session;
use storefront_cms::repositories::{RestStore, SqliteStore};
use storefront_cms::storage::ObjectStorage;
use storefront_cms::{configure_app, Services};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Primary store
    let pool = initialize_database(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    let primary = Arc::new(SqliteStore::new(pool));

    // Secondary store and object storage share the hosted data API credential
    let secondary = match &config.supabase {
        Some(supabase) => Some(Arc::new(RestStore::new(supabase)?)),
        None => {
            tracing::warn!("SUPABASE_URL not set; running without a secondary store or uploads");
            None
        }
    };
    let storage = config
        .supabase
        .as_ref()
        .map(|supabase| ObjectStorage::new(supabase, config.storage_bucket.clone()))
        .transpose()?;

    let services = Services::wire(primary, secondary, storage, &config);

    if let Some(seed) = &config.seed_admin {
        services
            .admin_users
            .ensure_admin(&seed.email, &seed.password)
            .await
            .context("Failed to seed admin user")?;
    }

    tracing::info!(
        address = %config.bind_address,
        environment = ?config.environment,
        "Storefront CMS listening"
    );
    tracing::info!("OpenAPI document: /api-docs/openapi.json");

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(require_admin_session))
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .supports_credentials(),
            )
            .configure(configure_app(services.clone()))
    })
    .bind(config.bind_address)?
    .run()
    .await?;

    Ok(())
}
