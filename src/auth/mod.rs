use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    /// Returns `None` when `now + lifetime` falls outside the representable range.
    pub fn new(config: &SecurityConfig, lifetime: Duration) -> Option<Self> {
        let now = Utc::now();
        let exp = now.checked_add_signed(lifetime)?;

        Some(Self {
            sub: config.jwt_subject.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: config.jwt_issuer.clone(),
            aud: config.jwt_audience.clone(),
        })
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT signing key is not configured (set JWT_KEY)")]
    MissingSigningKey,

    #[error("JWT expiry of {0} minutes is out of range")]
    InvalidExpiry(u64),

    #[error("JWT generation error: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid JWT token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies the bearer tokens that authorize writes.
pub struct TokenIssuer {
    config: SecurityConfig,
    lifetime: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AuthError> {
        let secret = config
            .jwt_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(AuthError::MissingSigningKey)?;

        let minutes = config.jwt_expiry_minutes;
        let lifetime = i64::try_from(minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .filter(|d| Utc::now().checked_add_signed(*d).is_some())
            .ok_or(AuthError::InvalidExpiry(minutes))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.jwt_issuer.as_str()]);
        validation.set_audience(&[config.jwt_audience.as_str()]);
        validation.leeway = 0;

        Ok(Self {
            config: config.clone(),
            lifetime,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn generate(&self) -> Result<String, AuthError> {
        let claims = Claims::new(&self.config, self.lifetime)
            .ok_or(AuthError::InvalidExpiry(self.config.jwt_expiry_minutes))?;
        self.sign(&claims)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::Invalid)
    }

    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(AuthError::Encode)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
