//! Handling of API credentials.

pub mod credentials;

pub use credentials::{AiCredentials, SecretString};
