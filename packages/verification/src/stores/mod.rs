//! Storage implementations for verification history.
//!
//! Available backends:
//! - `MemoryStore` - In-memory storage (always available)

pub mod memory;

pub use memory::MemoryStore;
