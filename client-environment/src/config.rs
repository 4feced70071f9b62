//! Bootstrap server configuration.
//!
//! The environment record itself is fixed at build time. Only the binary
//! that serves it reads settings from the process environment.
//!
//! # Environment Variables
//!
//! - `CLIENT_ENVIRONMENT_LISTEN_PORT`: Port to listen on (default: `4300`)
//!
//! # Invariants
//!
//! - `listen_port` is always a valid port number (1-65535)

/// Name of the variable holding the listen port.
const LISTEN_PORT_VAR: &str = "CLIENT_ENVIRONMENT_LISTEN_PORT";

/// Bootstrap server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Port to listen on for HTTP requests.
    pub listen_port: u16,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 4300;

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `CLIENT_ENVIRONMENT_LISTEN_PORT` is set but is not
    /// a valid port number, or is not valid unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = match std::env::var(LISTEN_PORT_VAR) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::InvalidValue {
                    name: LISTEN_PORT_VAR.to_string(),
                    message: "not valid unicode".to_string(),
                });
            }
        };

        Ok(Self {
            listen_port: parse_listen_port(value.as_deref())?,
        })
    }
}

/// Parse the listen port, falling back to the default when unset.
fn parse_listen_port(value: Option<&str>) -> Result<u16, ConfigError> {
    let Some(value) = value else {
        return Ok(ServerConfig::DEFAULT_PORT);
    };

    match value.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidValue {
            name: LISTEN_PORT_VAR.to_string(),
            message: format!("'{value}' is not a valid port number (must be 1-65535)"),
        }),
    }
}
