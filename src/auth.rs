use std::sync::LazyLock;

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::HttpRequest;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "admin_token";
pub const SESSION_LIFETIME_SECS: i64 = 2 * 60 * 60;
pub const ADMIN_ROLE: &str = "admin";

static DUMMY_PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("no-such-admin").unwrap_or_default());

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Admin user id
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn generate_token(&self, user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_in = Duration::seconds(SESSION_LIFETIME_SECS);

        let claims = Claims {
            sub: user_id.to_string(),
            role: ADMIN_ROLE.to_string(),
            exp: (now + expires_in).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn verify_token(
        &self,
        token: &str,
    ) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
    }

    /// True when the token is validly signed, unexpired and carries the admin role.
    pub fn is_admin_session(&self, token: &str) -> bool {
        self.verify_token(token)
            .map(|data| data.claims.role == ADMIN_ROLE)
            .unwrap_or(false)
    }
}

pub fn extract_session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(CookieDuration::seconds(SESSION_LIFETIME_SECS))
        .finish()
}

pub fn expired_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(CookieDuration::ZERO)
        .finish()
}

/// Salted argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

/// Spends one argon2 verification when no account matches, so unknown emails
/// take as long to reject as wrong passwords.
pub fn verify_dummy_password(password: &str) {
    let _ = verify_password(password, &DUMMY_PASSWORD_HASH);
}

/// Builds the dummy hash ahead of the first failed login.
pub fn warm_dummy_password() {
    LazyLock::force(&DUMMY_PASSWORD_HASH);
}
