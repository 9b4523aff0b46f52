//! Headline sentiment classification
//!
//! A `PolarityScorer` maps text to a polarity in [-1, 1]; polarities are
//! bucketed with exclusive ±0.1 thresholds and counted into a `SentimentTally`.

pub mod lexicon;

pub use lexicon::LexiconScorer;

use serde::{Deserialize, Serialize};

/// Polarity above which a headline counts as positive
pub const POSITIVE_THRESHOLD: f64 = 0.1;

/// Polarity below which a headline counts as negative
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Model that scores the polarity of a piece of text
pub trait PolarityScorer: Send + Sync {
    /// Polarity in [-1, 1]
    fn polarity(&self, text: &str) -> f64;
}

/// Sentiment bucket of a single headline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentBucket {
    Positive,
    Negative,
    Neutral,
}

impl SentimentBucket {
    /// Classify a polarity; both thresholds are exclusive
    pub fn classify(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            SentimentBucket::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            SentimentBucket::Negative
        } else {
            SentimentBucket::Neutral
        }
    }
}

/// Bucket counts over a headline sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentTally {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

impl SentimentTally {
    pub fn new(positive: u32, negative: u32, neutral: u32) -> Self {
        Self {
            positive,
            negative,
            neutral,
        }
    }

    pub fn record(&mut self, bucket: SentimentBucket) {
        match bucket {
            SentimentBucket::Positive => self.positive += 1,
            SentimentBucket::Negative => self.negative += 1,
            SentimentBucket::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.positive + self.negative + self.neutral
    }

    /// Score and count every title
    pub fn from_titles<'a, I>(titles: I, scorer: &dyn PolarityScorer) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        titles.into_iter().fold(Self::default(), |mut tally, title| {
            tally.record(SentimentBucket::classify(scorer.polarity(title)));
            tally
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_classify_thresholds_exclusive() {
        assert_eq!(SentimentBucket::classify(0.1), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::classify(-0.1), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::classify(0.0), SentimentBucket::Neutral);
        assert_eq!(SentimentBucket::classify(0.1000001), SentimentBucket::Positive);
        assert_eq!(SentimentBucket::classify(-0.1000001), SentimentBucket::Negative);
        assert_eq!(SentimentBucket::classify(1.0), SentimentBucket::Positive);
        assert_eq!(SentimentBucket::classify(-1.0), SentimentBucket::Negative);
    }

    #[test]
    fn test_boundary_polarity_all_neutral() {
        let titles: Vec<String> = (0..15).map(|i| format!("headline {}", i)).collect();

        let at_upper = SentimentTally::from_titles(titles.iter().map(String::as_str), &FixedScorer(0.1));
        assert_eq!(at_upper, SentimentTally::new(0, 0, 15));

        let at_lower = SentimentTally::from_titles(titles.iter().map(String::as_str), &FixedScorer(-0.1));
        assert_eq!(at_lower, SentimentTally::new(0, 0, 15));
    }

    #[test]
    fn test_tally_with_lexicon() {
        let scorer = LexiconScorer::new();
        let titles = [
            "Nifty hits record high as banks rally",
            "Sensex plunges as crash fears grip Dalal Street",
            "RBI policy meeting on Thursday",
        ];
        let tally = SentimentTally::from_titles(titles, &scorer);

        assert_eq!(tally, SentimentTally::new(1, 1, 1));
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_empty_tally() {
        let tally = SentimentTally::from_titles(std::iter::empty(), &FixedScorer(0.9));
        assert_eq!(tally.total(), 0);
    }
}
