use serde::{Deserialize, Serialize};
use std::fmt;

/// Market behaviour classified by trend strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Ranging,
    Transition,
    Trending,
    /// Too little history to classify.
    Undetermined,
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Regime::Ranging => "ranging",
            Regime::Transition => "transition",
            Regime::Trending => "trending",
            Regime::Undetermined => "undetermined",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeAssessment {
    pub regime: Regime,
    pub adx: f64,
    pub latest_atr: f64,
    pub mean_atr: f64,
    /// Hard veto: the symbol must be skipped for this cycle.
    pub is_volatile: bool,
    pub timeframes: Vec<String>,
}
