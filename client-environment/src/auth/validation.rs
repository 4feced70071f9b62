//! Access-token validation parameters.
//!
//! Tokens issued for a client build are RS256-signed by the Auth0 tenant,
//! carry the configured audience and name the tenant as issuer. This module
//! turns [`AuthSettings`] into the matching `jsonwebtoken` validation and
//! decodes tokens against it.
//!
//! # Post-conditions
//! - On success, returns the decoded claims.
//! - On failure, returns a [`TokenError`] naming which check rejected the token.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use super::AuthSettings;

/// Claims read from an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject claim identifying the user.
    pub sub: String,
    /// Permissions granted to the token, empty when the tenant sends none.
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Claims {
    /// Whether `permission` was granted.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|granted| granted == permission)
    }
}

/// Error returned when an access token is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token has expired.
    Expired,
    /// The audience does not match the configured audience.
    InvalidAudience,
    /// The issuer is not the configured tenant.
    InvalidIssuer,
    /// The token is not RS256-signed or its signature does not verify.
    InvalidSignature,
    /// The token cannot be parsed.
    Malformed,
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expired => write!(f, "token is expired"),
            Self::InvalidAudience => write!(f, "incorrect audience claim"),
            Self::InvalidIssuer => write!(f, "incorrect issuer claim"),
            Self::InvalidSignature => {
                write!(f, "invalid signature, use an RS256 signed access token")
            }
            Self::Malformed => write!(f, "unable to parse authentication token"),
        }
    }
}

impl std::error::Error for TokenError {}

impl AuthSettings {
    /// Validation a resource server applies to tokens issued for this client.
    #[must_use]
    pub fn token_validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.audience]);
        validation.set_issuer(&[self.issuer()]);
        validation
    }

    /// Decodes `token` with `key` under [`Self::token_validation`].
    pub fn verify_token(&self, token: &str, key: &DecodingKey) -> Result<Claims, TokenError> {
        verify_with(token, key, &self.token_validation())
    }
}

fn verify_with(token: &str, key: &DecodingKey, validation: &Validation) -> Result<Claims, TokenError> {
    let token_data = decode::<Claims>(token, key, validation).map_err(map_jwt_error)?;
    tracing::debug!(sub = %token_data.claims.sub, "access token accepted");
    Ok(token_data.claims)
}

/// Maps jsonwebtoken errors to our `TokenError` type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidAudience => TokenError::InvalidAudience,
        ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    }
}
