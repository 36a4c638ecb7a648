//! Signed token pair generation and validation.
//!
//! Access and refresh tokens are HMAC-SHA256 JWTs signed with two distinct
//! secrets, so compromise of one key never yields forgeable tokens for the
//! other. Validation here is signature + expiry only; the session store
//! match is the caller's concern.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::entities::{Account, Role};
use crate::error::AppError;

/// Access token lifetime: 1 day.
const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60 * 24;

/// Refresh token lifetime: 30 days.
const REFRESH_TOKEN_TTL_SECS: i64 = 60 * 60 * 24 * 30;

/// Monotonic discriminator so two tokens minted for the same account within
/// the same second still differ; rotation must always invalidate the
/// predecessor pair.
static TOKEN_SEQ: AtomicU64 = AtomicU64::new(0);

/// JWT claim set for both token kinds.
///
/// `sub` is the stringified account id. Only access tokens carry `roles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Role>,
}

impl Claims {
    /// Parses the subject back into an account id.
    pub fn account_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::internal(format!("malformed token subject '{}'", self.sub)))
    }
}

/// Issues and validates signed access/refresh token pairs.
pub struct TokenManager {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl TokenManager {
    /// Creates a manager from the two signing secrets.
    ///
    /// The secrets must differ; this is validated at configuration load.
    pub fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
        }
    }

    /// Generates a short-lived access token carrying the account's role.
    pub fn generate_access_token(&self, account: &Account) -> Result<String, AppError> {
        self.generate(
            account.id,
            ACCESS_TOKEN_TTL_SECS,
            Some(account.role),
            &self.access_encoding,
        )
    }

    /// Generates a long-lived refresh token with no role claim.
    pub fn generate_refresh_token(&self, account: &Account) -> Result<String, AppError> {
        self.generate(account.id, REFRESH_TOKEN_TTL_SECS, None, &self.refresh_encoding)
    }

    /// Checks signature and expiry of an access token.
    pub fn validate_access_token(&self, token: &str) -> bool {
        self.decode(token, &self.access_decoding).is_ok()
    }

    /// Checks signature and expiry of a refresh token.
    pub fn validate_refresh_token(&self, token: &str) -> bool {
        self.decode(token, &self.refresh_decoding).is_ok()
    }

    /// Extracts the claims of a valid access token.
    pub fn access_claims(&self, token: &str) -> Option<Claims> {
        self.decode(token, &self.access_decoding).ok()
    }

    /// Extracts the claims of a valid refresh token.
    pub fn refresh_claims(&self, token: &str) -> Option<Claims> {
        self.decode(token, &self.refresh_decoding).ok()
    }

    fn generate(
        &self,
        account_id: i64,
        ttl_secs: i64,
        roles: Option<Role>,
        key: &EncodingKey,
    ) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now,
            exp: now + ttl_secs,
            jti: format!("{}-{}", now, TOKEN_SEQ.fetch_add(1, Ordering::Relaxed)),
            roles,
        };

        jsonwebtoken::encode(&Header::default(), &claims, key)
            .map_err(|e| AppError::internal(format!("token signing failed: {e}")))
    }

    fn decode(&self, token: &str, key: &DecodingKey) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        jsonwebtoken::decode::<Claims>(token, key, &validation).map(|data| data.claims)
    }
}
