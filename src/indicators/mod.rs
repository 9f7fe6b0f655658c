//! Technical indicator library.
//!
//! Every function returns a series aligned index-for-index with its input.
//! Indices inside the warm-up window hold a sentinel (0, or 50 for RSI) and
//! must be treated as not-yet-valid by callers.

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use momentum::*;
pub use trend::*;
pub use volatility::*;
