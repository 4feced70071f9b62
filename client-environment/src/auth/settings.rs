//! Identity-provider settings and the Auth0 endpoints derived from them.
//!
//! # Invariants
//! - `url` is the tenant prefix only; the provider domain is `{url}.auth0.com`.
//! - Derived URLs are rebuilt on each call and never cached.

use serde::Serialize;
use url::Url;

use crate::environment::{EnvironmentError, parse_url};

/// Auth0 application settings for a client build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSettings {
    /// Auth0 tenant prefix, e.g. `dev-p5iqfqz0`.
    pub url: &'static str,
    /// Audience expected in issued access tokens.
    pub audience: &'static str,
    /// Public client identifier of the Auth0 application.
    pub client_id: &'static str,
    /// Where Auth0 redirects once authentication completes.
    #[serde(rename = "callbackURL")]
    pub callback_url: &'static str,
}

impl AuthSettings {
    /// The provider domain, `{url}.auth0.com`.
    #[must_use]
    pub fn domain(&self) -> String {
        format!("{}.auth0.com", self.url)
    }

    /// The `iss` claim of tokens issued by this tenant.
    #[must_use]
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain())
    }

    /// Parses `audience`.
    pub fn audience_url(&self) -> Result<Url, EnvironmentError> {
        parse_url("audience", self.audience)
    }

    /// Parses `callbackURL`.
    pub fn callback_url(&self) -> Result<Url, EnvironmentError> {
        parse_url("callbackURL", self.callback_url)
    }

    /// Location of the tenant's published signing keys.
    pub fn jwks_url(&self) -> Result<Url, EnvironmentError> {
        parse_url(
            "url",
            &format!("https://{}/.well-known/jwks.json", self.domain()),
        )
    }

    /// Universal login link for the implicit flow.
    ///
    /// `callback_path` is appended verbatim to `callbackURL` to form the
    /// `redirect_uri`, so `"/tabs/user-page"` returns the user to that page.
    pub fn login_url(&self, callback_path: &str) -> Result<Url, EnvironmentError> {
        let redirect_uri = format!("{}{callback_path}", self.callback_url);
        Url::parse_with_params(
            &format!("https://{}/authorize", self.domain()),
            [
                ("audience", self.audience),
                ("response_type", "token"),
                ("client_id", self.client_id),
                ("redirect_uri", redirect_uri.as_str()),
            ],
        )
        .map_err(|e| EnvironmentError::InvalidUrl {
            field: "url",
            message: format!("'{}': {e}", self.url),
        })
    }

    /// Logout link that returns the browser to `callbackURL`.
    pub fn logout_url(&self) -> Result<Url, EnvironmentError> {
        Url::parse_with_params(
            &format!("https://{}/v2/logout", self.domain()),
            [("client_id", self.client_id), ("returnTo", self.callback_url)],
        )
        .map_err(|e| EnvironmentError::InvalidUrl {
            field: "url",
            message: format!("'{}': {e}", self.url),
        })
    }
}
