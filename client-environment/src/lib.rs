//! Client environment: the build-time configuration record a client
//! application reads at bootstrap, plus the API and Auth0 values derived
//! from it.

pub mod auth;
pub mod config;
pub mod environment;
pub mod server;

pub use auth::AuthSettings;
pub use environment::{DEVELOPMENT, Environment, EnvironmentError, PRODUCTION, current};
