//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! AuthManager::authorization_url → user consents on the gateway
//!     → redirect back with ?code=...
//!     → AuthManager::parse_return (provider.rs code exchange)
//!     → Token (token.rs) → HttpClient bearer auth
//! ```
//!
//! # Security Constraints
//! - Client secret and access tokens are never logged
//! - Token Debug output is redacted

pub mod manager;
pub mod provider;
pub mod token;

pub use manager::AuthManager;
pub use provider::Provider;
pub use token::Token;
