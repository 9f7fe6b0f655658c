//! Confluence voting and the explainability log.

pub mod engine;
pub mod rejection;
pub mod votes;

pub use engine::*;
pub use rejection::*;
pub use votes::*;
