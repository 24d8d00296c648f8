//! HS256 token generation and validation for both token kinds.
//!
//! Access and refresh tokens are both HS256-signed JWTs carrying a
//! [`Claims`] payload, signed with separate secrets so one kind can never
//! be replayed as the other. Access tokens are short-lived and stateless;
//! refresh tokens are long-lived and additionally persisted server-side
//! so individual sessions can be revoked.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use waypost_core::types::DbId;

/// Which of the two token kinds a mint/verify operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived credential authorizing individual requests.
    Access,
    /// Long-lived credential exchanged for new access tokens.
    Refresh,
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify access tokens.
    pub access_secret: String,
    /// HMAC-SHA256 secret used to sign and verify refresh tokens.
    pub refresh_secret: String,
    /// Access token lifetime in minutes (default: 60).
    pub access_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 365).
    pub refresh_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 60;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 365;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                   | Required | Default |
    /// |---------------------------|----------|---------|
    /// | `ACCESS_TOKEN_SECRET`     | **yes**  | --      |
    /// | `REFRESH_TOKEN_SECRET`    | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`  | no       | `60`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS` | no       | `365`   |
    ///
    /// # Panics
    ///
    /// Panics if either secret is not set or is empty.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .expect("ACCESS_TOKEN_SECRET must be set in the environment");
        assert!(
            !access_secret.is_empty(),
            "ACCESS_TOKEN_SECRET must not be empty"
        );

        let refresh_secret = std::env::var("REFRESH_TOKEN_SECRET")
            .expect("REFRESH_TOKEN_SECRET must be set in the environment");
        assert!(
            !refresh_secret.is_empty(),
            "REFRESH_TOKEN_SECRET must not be empty"
        );

        let access_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            access_secret,
            refresh_secret,
            access_expiry_mins,
            refresh_expiry_days,
        }
    }

    fn secret(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Access => &self.access_secret,
            TokenKind::Refresh => &self.refresh_secret,
        }
    }

    fn expiry_secs(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_expiry_mins * 60,
            TokenKind::Refresh => self.refresh_expiry_days * 24 * 60 * 60,
        }
    }
}

/// Generate an HS256 token of the given kind for the given user.
pub fn generate_token(
    user_id: DbId,
    kind: TokenKind,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: user_id,
        exp: now + config.expiry_secs(kind),
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret(kind).as_bytes()),
    )
}

/// Validate a token against the secret for `kind` and return its
/// [`Claims`].
///
/// Validates the signature and expiration automatically. A token of the
/// other kind fails here because the secrets differ.
pub fn validate_token(
    token: &str,
    kind: TokenKind,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret(kind).as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}
