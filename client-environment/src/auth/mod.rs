//! Authentication settings module.
//!
//! Holds the Auth0 settings carried by the environment record, the provider
//! endpoints derived from them and the token validation a resource server
//! applies to tokens issued for this client.
//!
//! # Invariants
//! - Settings are `'static` and immutable; every derived value is recomputed
//!   from them on demand.

pub mod settings;
pub mod validation;

pub use settings::AuthSettings;
pub use validation::{Claims, TokenError};
