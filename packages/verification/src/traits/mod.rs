//! Capability traits consumed by the pipeline.
//!
//! These define the external collaborators (LLM, evidence search,
//! similarity, OCR, storage) that applications plug in.

pub mod evidence;
pub mod reasoner;
pub mod similarity;
pub mod store;
pub mod vision;
