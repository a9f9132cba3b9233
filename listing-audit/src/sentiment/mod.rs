//! Review sentiment aggregation.

mod lexicon;

pub use lexicon::LexiconAnalyzer;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::traits::PolarityAnalyzer;
use crate::types::ReviewSet;

/// Average compound above this is `positive`.
pub const POSITIVE_THRESHOLD: f64 = 0.2;
/// Average compound below this is `negative`.
pub const NEGATIVE_THRESHOLD: f64 = -0.2;

/// Mean compound polarity of a review set, always in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SentimentScore(f64);

impl SentimentScore {
    /// Clamps into `[-1, 1]`; NaN becomes `0`.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(-1.0, 1.0))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn label(self) -> SentimentLabel {
        label(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic mean of per-review compound values; exactly `0` for no reviews.
pub fn score(analyzer: &dyn PolarityAnalyzer, reviews: &ReviewSet) -> SentimentScore {
    if reviews.is_empty() {
        return SentimentScore::default();
    }

    let total: f64 = reviews
        .iter()
        .map(|text| analyzer.compound(text).clamp(-1.0, 1.0))
        .sum();
    SentimentScore::new(total / reviews.len() as f64)
}

pub fn label(score: SentimentScore) -> SentimentLabel {
    if score.value() > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score.value() < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}
