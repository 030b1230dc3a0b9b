//! JWT utilities for authentication
//!
//! Access tokens are issued by the identity provider and verified here with a
//! shared HS256 secret. Issuing is kept for local development and tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use mentor_core::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Marketplace role of the caller
    #[serde(default)]
    pub role: UserRole,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a UUID
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Identity carried by an issued token
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: Uuid,
    pub role: UserRole,
    pub email: String,
    pub name: Option<String>,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    issuer: Option<String>,
}

impl JwtService {
    /// Create a new JWT service with the given secret and expiry time
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, issuer: Option<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            issuer,
        }
    }

    /// Issue an access token for `subject`
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, subject: &TokenSubject) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.user_id.to_string(),
            role: subject.role,
            email: subject.email.clone(),
            name: subject.name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    /// Decode and validate an access token
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or has the wrong issuer
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        // Reject tokens whose subject is not a user id
        token_data.claims.user_id()?;
        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
