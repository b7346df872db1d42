//! JWT Token handling

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Placeholder signing key shipped in the defaults; never accepted at startup
pub const DEFAULT_SECRET: &str = "change-this-secret-key-to-something-at-least-32-chars";

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Symmetric signing key
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            issuer: "HRApplication".to_string(),
            audience: "HRApplicationUsers".to_string(),
            expiration_minutes: 60,
        }
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (employee id)
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Unique token id
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

impl TokenClaims {
    /// Subject parsed as an employee id
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is invalid: {0}")]
    Invalid(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issues and validates bearer tokens with one immutable configuration
pub struct TokenIssuer {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// Token lifetime in seconds
    pub fn expiration_seconds(&self) -> i64 {
        self.config.expiration_minutes.saturating_mul(60)
    }

    /// Sign a token for `user_id` issued now
    pub fn issue(&self, user_id: i32, email: &str, role: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, email, role, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        user_id: i32,
        email: &str,
        role: &str,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let exp = self
            .config
            .expiration_minutes
            .checked_mul(60)
            .and_then(|ttl| now.timestamp().checked_add(ttl))
            .ok_or_else(|| {
                TokenError::Signing(format!(
                    "expiration of {} minutes is out of range",
                    self.config.expiration_minutes
                ))
            })?;
        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature, issuer, audience and expiry with no clock skew allowance
    pub fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

/// Subject claim read without verifying the signature
pub fn subject_of(token: &str) -> Option<String> {
    claim_of(token, "sub")
}

/// Role claim read without verifying the signature
pub fn role_of(token: &str) -> Option<String> {
    claim_of(token, "role")
}

fn claim_of(token: &str, name: &str) -> Option<String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<HashMap<String, Value>>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()?;
    match data.claims.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
