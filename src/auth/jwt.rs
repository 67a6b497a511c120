//! Issuing and verifying RS256 auth tokens.
//!
//! Verification checks the signature, the token type and the expiry against
//! an explicit clock. `nbf` is only consulted by [`TokenService::inspect`];
//! bearer verification on protected routes does not look at it.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use uuid::Uuid;

use crate::{
    auth::keys::KeyMaterial,
    config::Config,
    errors::AppError,
    models::jwt::{Claims, AUTH_TOKEN_TYPE},
};

/// Header values shorter than this are rejected before any parsing.
pub const MIN_HEADER_LEN: usize = 8;
/// Length of the `"Bearer "` scheme prefix stripped from the header value.
pub const BEARER_PREFIX_LEN: usize = 7;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub subject: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenService {
    keys: Arc<KeyMaterial>,
    issuer: String,
    audience: String,
    ttl: Duration,
    validation: Validation,
}

impl TokenService {
    pub fn new(
        keys: Arc<KeyMaterial>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        // Time-based claims are checked by hand against the caller's clock.
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
            ttl,
            validation,
        }
    }

    /// Fails with `AppError::Config` unless the lifetime is a positive,
    /// representable number of seconds.
    pub fn from_config(keys: Arc<KeyMaterial>, cfg: &Config) -> Result<Self, AppError> {
        let ttl = Duration::try_seconds(cfg.jwt_ttl_seconds)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                AppError::Config(format!(
                    "token lifetime out of range: {}s",
                    cfg.jwt_ttl_seconds
                ))
            })?;

        Ok(Self::new(
            keys,
            cfg.jwt_issuer.clone(),
            cfg.jwt_audience.clone(),
            ttl,
        ))
    }

    pub fn issue_auth_token(&self, subject: &str) -> Result<IssuedToken, AppError> {
        self.issue_auth_token_at(subject, Utc::now())
    }

    pub fn issue_auth_token_at(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            token_type: AUTH_TOKEN_TYPE.to_string(),
            iss: self.issuer.clone(),
            sub: subject.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
            aud: vec![self.audience.clone()],
        };

        let token = self.sign(&claims)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Validates an `Authorization` header value and returns the token subject.
    pub fn verify_and_extract_subject(&self, header_value: &str) -> Result<String, AppError> {
        self.verify_and_extract_subject_at(header_value, Utc::now())
    }

    pub fn verify_and_extract_subject_at(
        &self,
        header_value: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        if header_value.len() < MIN_HEADER_LEN {
            tracing::debug!("authorization header too short");
            return Err(AppError::Unauthenticated);
        }
        let token = header_value
            .get(BEARER_PREFIX_LEN..)
            .ok_or(AppError::Unauthenticated)?;

        let claims = self.decode(token)?;
        check_type(&claims)?;
        check_not_expired(&claims, now)?;

        if claims.sub.is_empty() {
            tracing::warn!("token has no subject");
            return Err(AppError::Unauthenticated);
        }
        Ok(claims.sub)
    }

    pub fn inspect(&self, token: &str) -> Result<TokenInfo, AppError> {
        self.inspect_at(token, Utc::now())
    }

    /// Full validity check of a raw token, including `nbf`.
    pub fn inspect_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenInfo, AppError> {
        let claims = self.decode(token)?;
        check_type(&claims)?;

        if claims.nbf > now.timestamp() {
            tracing::debug!(nbf = claims.nbf, "token not yet valid");
            return Err(AppError::Unauthenticated);
        }
        check_not_expired(&claims, now)?;

        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(AppError::Unauthenticated)?;
        Ok(TokenInfo {
            subject: claims.sub,
            expires_at,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(
            &Header::new(Algorithm::RS256),
            claims,
            self.keys.encoding(),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "failed to sign token");
            AppError::Signing(e.to_string())
        })
    }

    fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::warn!(error = %e, "token rejected");
                AppError::Unauthenticated
            })
    }
}

fn check_type(claims: &Claims) -> Result<(), AppError> {
    if claims.token_type != AUTH_TOKEN_TYPE {
        tracing::warn!(token_type = %claims.token_type, "invalid token type");
        return Err(AppError::Unauthenticated);
    }
    Ok(())
}

fn check_not_expired(claims: &Claims, now: DateTime<Utc>) -> Result<(), AppError> {
    if claims.exp <= now.timestamp() {
        tracing::warn!(exp = claims.exp, "token expired");
        return Err(AppError::Unauthenticated);
    }
    Ok(())
}
