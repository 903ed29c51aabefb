use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("{0} is set but {1} is missing")]
    IncompletePair(String, String),
}

/// Deployment flavour. Production hides backend diagnostics from API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Hosted data API (PostgREST tables + object storage) sharing one service credential.
#[derive(Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_key: String,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("service_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub environment: Environment,
    pub jwt_secret: Option<String>,
    pub supabase: Option<SupabaseConfig>,
    pub storage_bucket: String,
    pub seed_admin: Option<SeedAdmin>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:portfolio.db?mode=rwc".to_string(),
            bind_address: SocketAddr::from(([0, 0, 0, 0], 5000)),
            environment: Environment::Development,
            jwt_secret: None,
            supabase: None,
            storage_bucket: "product-images".to_string(),
            seed_admin: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match optional_var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?,
            None => 5000,
        };

        let bind_address = format!("{}:{}", host, port)
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string())
            })?;

        let database_url = optional_var("DATABASE_URL").unwrap_or(defaults.database_url);

        let environment = optional_var("APP_ENV")
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();

        let jwt_secret = optional_var("JWT_SECRET");
        if jwt_secret.is_none() {
            tracing::warn!("JWT_SECRET is not set; admin login and gated routes will be unavailable");
        }

        let supabase = match (
            optional_var("SUPABASE_URL"),
            optional_var("SUPABASE_SERVICE_ROLE_KEY"),
        ) {
            (Some(url), Some(service_key)) => {
                Url::parse(&url).map_err(|e| {
                    ConfigError::InvalidEnvVar("SUPABASE_URL".to_string(), e.to_string())
                })?;
                Some(SupabaseConfig {
                    url: url.trim_end_matches('/').to_string(),
                    service_key,
                })
            }
            (Some(_), None) => {
                return Err(ConfigError::IncompletePair(
                    "SUPABASE_URL".to_string(),
                    "SUPABASE_SERVICE_ROLE_KEY".to_string(),
                ))
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompletePair(
                    "SUPABASE_SERVICE_ROLE_KEY".to_string(),
                    "SUPABASE_URL".to_string(),
                ))
            }
            (None, None) => None,
        };

        let storage_bucket = optional_var("STORAGE_BUCKET").unwrap_or(defaults.storage_bucket);

        let seed_admin = match (
            optional_var("SEED_ADMIN_EMAIL"),
            optional_var("SEED_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(password)) => Some(SeedAdmin { email, password }),
            _ => None,
        };

        Ok(Self {
            database_url,
            bind_address,
            environment,
            jwt_secret,
            supabase,
            storage_bucket,
            seed_admin,
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
