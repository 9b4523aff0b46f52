//! Market sentiment pulse

use crate::sentiment::SentimentTally;
use serde::Serialize;

/// Composite sentiment indicator derived from a tally
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PulseReading {
    /// Net positive share of headlines, in [-1, 1]
    pub pulse: f64,
    /// `pulse` remapped to [0, 1] for a bounded progress bar
    pub display: f64,
}

impl PulseReading {
    /// `(positive - negative) / total`; an empty tally reads as 0.
    pub fn from_tally(tally: &SentimentTally) -> Self {
        let total = match tally.total() {
            0 => 1,
            n => n,
        };
        let pulse = (f64::from(tally.positive) - f64::from(tally.negative)) / f64::from(total);
        Self {
            pulse,
            display: (pulse + 1.0) / 2.0,
        }
    }
}
