use std::sync::Arc;

use crate::auth::{verify_dummy_password, verify_password, warm_dummy_password, JwtManager};
use crate::config::Environment;
use crate::models::{normalize_email, ServiceError};
use crate::repositories::AdminUserRepository;

/// Issues and checks admin session tokens.
pub struct AuthService {
    users: Arc<dyn AdminUserRepository>,
    jwt_manager: Option<JwtManager>,
    environment: Environment,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn AdminUserRepository>,
        jwt_manager: Option<JwtManager>,
        environment: Environment,
    ) -> Self {
        warm_dummy_password();
        Self {
            users,
            jwt_manager,
            environment,
        }
    }

    /// Cookies are only marked `Secure` in production.
    pub fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }

    /// Verifies the credential and returns a signed session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ServiceError> {
        let jwt_manager = self
            .jwt_manager
            .as_ref()
            .ok_or_else(|| ServiceError::Configuration("JWT secret not configured".to_string()))?;

        let email = normalize_email(email);
        let credential = self
            .users
            .find_credential(&email)
            .await
            .map_err(|err| ServiceError::from_repository("Failed to sign in", err, self.environment))?;

        let Some(credential) = credential else {
            verify_dummy_password(password);
            tracing::warn!(email = %email, "Login attempt for unknown email");
            return Err(ServiceError::AuthenticationError("Invalid credentials".to_string()));
        };

        if !verify_password(password, &credential.password_hash) {
            tracing::warn!(email = %email, "Login attempt with wrong password");
            return Err(ServiceError::AuthenticationError("Invalid credentials".to_string()));
        }

        let token = jwt_manager
            .generate_token(&credential.id)
            .map_err(|_| ServiceError::InternalError("Failed to generate token".to_string()))?;

        tracing::info!(user_id = %credential.id, "Admin signed in");
        Ok(token)
    }

    /// Without a configured secret no session is ever valid.
    pub fn is_valid_session(&self, token: &str) -> bool {
        self.jwt_manager
            .as_ref()
            .map(|manager| manager.is_admin_session(token))
            .unwrap_or(false)
    }
}
