// HTTP routes
pub mod health;
pub mod history;
pub mod root;
pub mod sources;
pub mod stats;
pub mod verify;

pub use health::*;
pub use history::*;
pub use root::*;
pub use sources::*;
pub use stats::*;
pub use verify::*;
