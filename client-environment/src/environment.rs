//! Client environment record.
//!
//! The record a client application reads at bootstrap: the backend API base
//! URL, the identity-provider settings and whether the build targets
//! production. Two variants exist, [`DEVELOPMENT`] and [`PRODUCTION`]; the
//! `production` cargo feature selects which one [`current`] returns.
//!
//! # Invariants
//!
//! - Both variants are `static` items and are never mutated.
//! - [`current`] returns the same `&'static` reference on every call.
//! - Serialized field names are `production`, `apiServerUrl` and `auth`.

use serde::Serialize;
use url::Url;

use crate::auth::AuthSettings;

/// Error returned when a URL-typed field cannot be used as a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    /// A field holds a value that does not parse as a URL, or a URL derived
    /// from it cannot be built.
    InvalidUrl {
        /// Serialized name of the offending field.
        field: &'static str,
        /// What went wrong.
        message: String,
    },
}

impl std::fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl { field, message } => {
                write!(f, "invalid URL in {field}: {message}")
            }
        }
    }
}

impl std::error::Error for EnvironmentError {}

/// Parses `value` as a URL, reporting failures against `field`.
pub(crate) fn parse_url(field: &'static str, value: &str) -> Result<Url, EnvironmentError> {
    Url::parse(value).map_err(|e| EnvironmentError::InvalidUrl {
        field,
        message: format!("'{value}': {e}"),
    })
}

/// Configuration record for one build of the client application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// Whether the build targets a production deployment.
    pub production: bool,
    /// Base endpoint of the backend HTTP service.
    pub api_server_url: &'static str,
    /// Identity-provider settings.
    pub auth: AuthSettings,
}

/// Development build: local API server and a development Auth0 tenant.
pub static DEVELOPMENT: Environment = Environment {
    production: false,
    api_server_url: "http://localhost:5000",
    auth: AuthSettings {
        url: "dev-p5iqfqz0",
        audience: "https://localhost:5000",
        client_id: "ksaxfz8ctP2TMZzdSDAlhzkTxTd9hK4F",
        callback_url: "http://localhost:4200",
    },
};

/// Production build.
///
/// The values are placeholders; deployers replace them with their own API
/// host and Auth0 application before building with the `production` feature.
pub static PRODUCTION: Environment = Environment {
    production: true,
    api_server_url: "https://api.example.com",
    auth: AuthSettings {
        url: "example",
        audience: "https://api.example.com",
        client_id: "replace-with-production-client-id",
        callback_url: "https://app.example.com",
    },
};

/// Returns the record this build was compiled for.
#[must_use]
pub const fn current() -> &'static Environment {
    if cfg!(feature = "production") {
        &PRODUCTION
    } else {
        &DEVELOPMENT
    }
}

impl Environment {
    /// Parses `apiServerUrl`.
    pub fn api_base_url(&self) -> Result<Url, EnvironmentError> {
        parse_url("apiServerUrl", self.api_server_url)
    }

    /// Builds the URL of an API resource such as `drinks` or `drinks/3`.
    ///
    /// A leading `/` on `path` is ignored and any path prefix already on the
    /// base URL is kept, so `https://host/api` and `drinks` give
    /// `https://host/api/drinks`. Each segment of `path` is percent-encoded,
    /// so `path` never carries a query string: `drinks?x=1` becomes the path
    /// `/drinks%3Fx=1`. Set queries on the returned `Url` instead. An empty
    /// `path` yields the base with a trailing `/`.
    pub fn api_endpoint(&self, path: &str) -> Result<Url, EnvironmentError> {
        let mut url = self.api_base_url()?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| EnvironmentError::InvalidUrl {
                    field: "apiServerUrl",
                    message: format!("'{}' cannot be used as a base URL", self.api_server_url),
                })?;
            segments
                .pop_if_empty()
                .extend(path.trim_start_matches('/').split('/'));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static VARIANTS: [&Environment; 2] = [&DEVELOPMENT, &PRODUCTION];

    #[test]
    fn test_production_flag_per_variant() {
        assert!(!DEVELOPMENT.production);
        assert!(PRODUCTION.production);
    }

    #[test]
    fn test_current_matches_build_feature() {
        let environment = current();
        assert_eq!(environment.production, cfg!(feature = "production"));
    }

    #[test]
    fn test_current_is_referentially_stable() {
        let first = current();
        let second = current();

        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_development_values() {
        assert_eq!(DEVELOPMENT.api_server_url, "http://localhost:5000");
        assert_eq!(DEVELOPMENT.auth.url, "dev-p5iqfqz0");
        assert_eq!(DEVELOPMENT.auth.audience, "https://localhost:5000");
        assert_eq!(DEVELOPMENT.auth.client_id, "ksaxfz8ctP2TMZzdSDAlhzkTxTd9hK4F");
        assert_eq!(DEVELOPMENT.auth.callback_url, "http://localhost:4200");
    }

    #[test]
    fn test_all_url_fields_parse() {
        for environment in VARIANTS {
            assert!(environment.api_base_url().is_ok());
            assert!(environment.auth.audience_url().is_ok());
            assert!(environment.auth.callback_url().is_ok());
        }
    }

    #[test]
    fn test_serialized_field_names() {
        for environment in VARIANTS {
            let value = serde_json::to_value(environment).expect("serialize environment");
            let object = value.as_object().expect("environment is an object");

            let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
            keys.sort_unstable();
            assert_eq!(keys, ["apiServerUrl", "auth", "production"]);

            assert!(object["production"].is_boolean());
            assert!(object["apiServerUrl"].is_string());

            let auth = object["auth"].as_object().expect("auth is an object");
            let mut auth_keys: Vec<&str> = auth.keys().map(String::as_str).collect();
            auth_keys.sort_unstable();
            assert_eq!(auth_keys, ["audience", "callbackURL", "clientId", "url"]);
            assert!(auth.values().all(serde_json::Value::is_string));
        }
    }

    #[test]
    fn test_serialized_development_record() {
        let value = serde_json::to_value(&DEVELOPMENT).expect("serialize environment");
        let expected = serde_json::json!({
            "production": false,
            "apiServerUrl": "http://localhost:5000",
            "auth": {
                "url": "dev-p5iqfqz0",
                "audience": "https://localhost:5000",
                "clientId": "ksaxfz8ctP2TMZzdSDAlhzkTxTd9hK4F",
                "callbackURL": "http://localhost:4200"
            }
        });
        assert_eq!(value, expected);
    }

    #[test]
    fn test_api_endpoint_on_bare_host() {
        let url = DEVELOPMENT.api_endpoint("drinks").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5000/drinks");

        let url = DEVELOPMENT.api_endpoint("/drinks-detail").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5000/drinks-detail");

        let url = DEVELOPMENT.api_endpoint("drinks/3").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5000/drinks/3");
    }

    #[test]
    fn test_api_endpoint_keeps_base_prefix() {
        let environment = Environment {
            api_server_url: "https://example.com/api/",
            ..DEVELOPMENT
        };
        let url = environment.api_endpoint("drinks").expect("endpoint");
        assert_eq!(url.as_str(), "https://example.com/api/drinks");

        let environment = Environment {
            api_server_url: "https://example.com/api",
            ..DEVELOPMENT
        };
        let url = environment.api_endpoint("drinks").expect("endpoint");
        assert_eq!(url.as_str(), "https://example.com/api/drinks");
    }

    #[test]
    fn test_api_endpoint_encodes_segments() {
        let url = DEVELOPMENT.api_endpoint("drinks/flat white").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5000/drinks/flat%20white");
    }

    #[test]
    fn test_api_endpoint_empty_path_is_base_root() {
        let url = DEVELOPMENT.api_endpoint("").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5000/");

        let url = DEVELOPMENT.api_endpoint("/").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5000/");
    }

    #[test]
    fn test_api_endpoint_encodes_query_marker_into_path() {
        let url = DEVELOPMENT.api_endpoint("drinks?x=1").expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:5000/drinks%3Fx=1");
        assert_eq!(url.query(), None);

        let mut url = DEVELOPMENT.api_endpoint("drinks").expect("endpoint");
        url.query_pairs_mut().append_pair("x", "1");
        assert_eq!(url.as_str(), "http://localhost:5000/drinks?x=1");
    }

    #[test]
    fn test_invalid_api_server_url() {
        let environment = Environment {
            api_server_url: "not a url",
            ..DEVELOPMENT
        };

        let result = environment.api_endpoint("drinks");
        assert!(matches!(
            result,
            Err(EnvironmentError::InvalidUrl {
                field: "apiServerUrl",
                ..
            })
        ));
    }

    #[test]
    fn test_cannot_be_a_base_url() {
        let environment = Environment {
            api_server_url: "mailto:coffee@example.com",
            ..DEVELOPMENT
        };

        assert!(environment.api_base_url().is_ok());
        let result = environment.api_endpoint("drinks");
        match result {
            Err(EnvironmentError::InvalidUrl { field, message }) => {
                assert_eq!(field, "apiServerUrl");
                assert!(message.contains("cannot be used as a base URL"));
            }
            other => panic!("expected InvalidUrl error, got {other:?}"),
        }
    }

    #[test]
    fn test_environment_error_display() {
        let error = EnvironmentError::InvalidUrl {
            field: "apiServerUrl",
            message: "bad value".to_string(),
        };
        assert_eq!(error.to_string(), "invalid URL in apiServerUrl: bad value");
    }
}
