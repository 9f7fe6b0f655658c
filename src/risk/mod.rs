//! Risk validation and position sizing.

pub mod sizing;
pub mod validator;

pub use sizing::*;
pub use validator::*;
