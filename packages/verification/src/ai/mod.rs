//! Capability implementations backed by hosted models.
//!
//! `OpenAI` implements `Reasoner`, `Embedder` and `ImageReader`. Users can
//! use it directly or implement the traits themselves.

#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "openai")]
pub use openai::OpenAI;
