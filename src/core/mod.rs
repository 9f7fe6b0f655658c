//! Pipeline wiring and the scan runtime

pub mod pipeline;
pub mod runtime;

pub use pipeline::*;
pub use runtime::*;
