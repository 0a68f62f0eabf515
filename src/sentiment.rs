//! Polarity scoring over normalized text

use std::collections::HashMap;
use std::sync::LazyLock;

/// Something that can rate how positive or negative a text reads
pub trait TextScorer {
    /// Polarity in `[-1.0, 1.0]`; `0.0` when the text carries no signal
    fn polarity(&self, text: &str) -> f64;
}

static LEXICON: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    [
        ("amazing", 0.6),
        ("awesome", 1.0),
        ("beautiful", 0.85),
        ("best", 1.0),
        ("better", 0.5),
        ("brilliant", 0.9),
        ("excellent", 1.0),
        ("exciting", 0.3),
        ("fantastic", 0.4),
        ("free", 0.4),
        ("fun", 0.3),
        ("glad", 0.5),
        ("good", 0.7),
        ("great", 0.8),
        ("happy", 0.8),
        ("helpful", 0.5),
        ("interesting", 0.5),
        ("love", 0.5),
        ("nice", 0.6),
        ("perfect", 1.0),
        ("pleased", 0.5),
        ("success", 0.3),
        ("thanks", 0.2),
        ("welcome", 0.8),
        ("wonderful", 1.0),
        ("angry", -0.5),
        ("annoying", -0.8),
        ("awful", -1.0),
        ("bad", -0.7),
        ("boring", -1.0),
        ("broken", -0.4),
        ("disappointed", -0.75),
        ("fail", -0.5),
        ("failed", -0.5),
        ("hate", -0.8),
        ("horrible", -1.0),
        ("late", -0.3),
        ("poor", -0.4),
        ("problem", -0.3),
        ("sad", -0.5),
        ("shocking", -1.0),
        ("terrible", -1.0),
        ("ugly", -0.7),
        ("urgent", -0.2),
        ("worse", -0.4),
        ("worst", -1.0),
        ("wrong", -0.5),
    ]
    .into_iter()
    .collect()
});

const INTENSIFIERS: [(&str, f64); 5] = [
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
];

const NEGATORS: [&str; 5] = ["not", "no", "never", "don't", "isn't"];

/// Averages word polarities from a fixed lexicon.
///
/// An intensifier scales the next polar word and a negator flips it with
/// half the weight (`not great` reads as mildly negative).
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl TextScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let mut scores = Vec::new();
        let mut modifier = 1.0;

        for token in lower.split_whitespace() {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');
            if word.is_empty() {
                continue;
            }

            if let Some(&weight) = LEXICON.get(word) {
                scores.push((weight * modifier).clamp(-1.0, 1.0));
                modifier = 1.0;
            } else if let Some((_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == word) {
                modifier *= factor;
            } else if NEGATORS.contains(&word) || word.ends_with("n't") {
                modifier *= -0.5;
            } else {
                modifier = 1.0;
            }
        }

        if scores.is_empty() {
            return 0.0;
        }

        #[allow(clippy::cast_precision_loss)]
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}
