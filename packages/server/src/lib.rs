// SATYA-VERIFY - API Core
//
// HTTP front end for the claim verification pipeline. Articles come in as
// text, URLs or images; each factual claim is verified concurrently and the
// results are stored for history and stats.
//
// The article workflow lives in domains/verification/activities.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
