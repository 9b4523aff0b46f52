//! Lexicon-based polarity model
//!
//! General-purpose English word polarities in the style of pattern/TextBlob,
//! extended with market vocabulary that shows up in index headlines.

use super::PolarityScorer;
use std::collections::HashMap;

/// Multiplier applied to a sentiment word preceded by a negation
const NEGATION_FACTOR: f64 = -0.5;

const WORDS: &[(&str, f64)] = &[
    // General positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("positive", 0.23),
    ("happy", 0.8),
    ("strong", 0.43),
    ("stronger", 0.43),
    ("robust", 0.4),
    ("healthy", 0.5),
    ("solid", 0.3),
    ("bright", 0.7),
    ("optimistic", 0.5),
    ("confident", 0.5),
    ("impressive", 1.0),
    ("remarkable", 0.75),
    ("successful", 0.75),
    ("new", 0.14),
    ("high", 0.16),
    ("higher", 0.25),
    ("highest", 0.5),
    ("big", 0.1),
    ("fresh", 0.3),
    ("stable", 0.2),
    ("steady", 0.2),
    ("safe", 0.5),
    ("easy", 0.43),
    ("upbeat", 0.6),
    ("favourable", 0.5),
    ("favorable", 0.5),
    // Market positive
    ("bullish", 0.6),
    ("rally", 0.5),
    ("rallies", 0.5),
    ("surge", 0.5),
    ("surges", 0.5),
    ("soar", 0.6),
    ("soars", 0.6),
    ("jump", 0.4),
    ("jumps", 0.4),
    ("gain", 0.4),
    ("gains", 0.4),
    ("rise", 0.3),
    ("rises", 0.3),
    ("climb", 0.3),
    ("climbs", 0.3),
    ("rebound", 0.4),
    ("rebounds", 0.4),
    ("recovery", 0.4),
    ("record", 0.3),
    ("upgrade", 0.4),
    ("outperform", 0.5),
    ("profit", 0.4),
    ("profits", 0.4),
    ("green", 0.2),
    ("buying", 0.2),
    // General negative
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("poor", -0.4),
    ("negative", -0.3),
    ("weak", -0.38),
    ("weaker", -0.38),
    ("sad", -0.5),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("dull", -0.3),
    ("grim", -0.5),
    ("low", -0.1),
    ("lower", -0.2),
    ("lowest", -0.5),
    ("volatile", -0.2),
    ("uncertain", -0.2),
    ("cautious", -0.2),
    ("worried", -0.5),
    ("fearful", -0.6),
    ("nervous", -0.3),
    ("risky", -0.5),
    ("gloomy", -0.6),
    ("pessimistic", -0.5),
    ("hard", -0.29),
    ("tough", -0.39),
    // Market negative
    ("bearish", -0.6),
    ("crash", -0.8),
    ("crashes", -0.8),
    ("plunge", -0.6),
    ("plunges", -0.6),
    ("tumble", -0.5),
    ("tumbles", -0.5),
    ("slump", -0.5),
    ("slumps", -0.5),
    ("fall", -0.3),
    ("falls", -0.3),
    ("drop", -0.3),
    ("drops", -0.3),
    ("decline", -0.3),
    ("declines", -0.3),
    ("slide", -0.3),
    ("slides", -0.3),
    ("sink", -0.4),
    ("sinks", -0.4),
    ("loss", -0.4),
    ("losses", -0.4),
    ("selloff", -0.5),
    ("downgrade", -0.4),
    ("red", -0.2),
    ("fear", -0.5),
    ("fears", -0.5),
    ("concern", -0.3),
    ("concerns", -0.3),
    ("selling", -0.2),
    ("correction", -0.2),
    ("crisis", -0.6),
    ("recession", -0.6),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("highly", 1.4),
    ("sharply", 1.4),
    ("significantly", 1.3),
    ("strongly", 1.3),
    ("slightly", 0.6),
    ("marginally", 0.6),
    ("somewhat", 0.8),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "nor", "without", "hardly", "barely", "isn't", "aren't", "wasn't",
    "weren't", "don't", "doesn't", "didn't", "won't", "can't", "cannot", "couldn't",
];

/// Pattern-style lexicon scorer.
///
/// The polarity of a text is the mean polarity of its sentiment words.
/// An intensifier scales the next sentiment word; a negation before a
/// sentiment word multiplies it by -0.5. Text with no sentiment words is 0.0.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, f64>,
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            words: WORDS.iter().map(|(w, s)| (w.to_string(), *s)).collect(),
            intensifiers: INTENSIFIERS.iter().map(|(w, m)| (w.to_string(), *m)).collect(),
            negations: NEGATIONS.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn is_negation(&self, token: &str) -> bool {
        self.negations.iter().any(|n| n == token) || token.ends_with("n't")
    }
}

/// Lower-cased runs of letters, digits and apostrophes
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .filter(|t| !t.is_empty())
        .map(|t| t.replace('\u{2019}', "'").to_lowercase())
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let mut scores: Vec<f64> = Vec::new();
        let mut negate_next = false;
        let mut intensity = 1.0;

        for token in tokenize(text) {
            if self.is_negation(&token) {
                negate_next = true;
                continue;
            }

            if let Some(mult) = self.intensifiers.get(&token) {
                intensity *= mult;
                continue;
            }

            if let Some(&score) = self.words.get(&token) {
                let mut score = score * intensity;
                if negate_next {
                    score *= NEGATION_FACTOR;
                }
                scores.push(score.clamp(-1.0, 1.0));
            }

            negate_next = false;
            intensity = 1.0;
        }

        if scores.is_empty() {
            return 0.0;
        }

        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
impl LexiconScorer {
    /// Add or replace a word polarity
    fn with_word(mut self, word: &str, polarity: f64) -> Self {
        self.words.insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
        self
    }
}
