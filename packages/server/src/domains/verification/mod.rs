//! Article verification domain
//!
//! Architecture:
//!   - activities/: the article workflow (preprocess, extract, verify, store)
//!   - models/: request and response shapes exposed over HTTP

pub mod activities;
pub mod models;

pub use activities::*;
pub use models::*;
