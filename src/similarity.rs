//! Fuzzy name similarity.
//!
//! Scoring is exposed behind [`SimilarityScorer`] so the algorithm can be
//! swapped without touching the linker or its tie-break logic. The default
//! [`PartialRatioScorer`] is substring-tolerant: an abbreviated form
//! ("n djokovic") scores high against the full form ("novak djokovic") even
//! though the lengths differ.

use std::fmt;
use std::sync::Arc;

use crate::normalize::normalize_name;

/// Similarity score on a 0..=100 scale over already-normalized strings.
///
/// Implementations must be deterministic: same inputs, same score.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, a: &str, b: &str) -> u8;
}

/// Default scorer: best normalized-Levenshtein ratio of the shorter string
/// against every equal-length character window of the longer one.
///
/// Two empty strings score 100; one empty side scores 0, so records with
/// missing names can never fuzzy-link.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialRatioScorer;

impl SimilarityScorer for PartialRatioScorer {
    fn score(&self, a: &str, b: &str) -> u8 {
        let (short, long) = if a.chars().count() <= b.chars().count() {
            (a, b)
        } else {
            (b, a)
        };
        if short.is_empty() {
            return if long.is_empty() { 100 } else { 0 };
        }

        let long_chars: Vec<char> = long.chars().collect();
        let width = short.chars().count();
        let mut best = 0.0f64;
        for window in long_chars.windows(width) {
            let candidate: String = window.iter().collect();
            let ratio = strsim::normalized_levenshtein(short, &candidate);
            if ratio > best {
                best = ratio;
                if best >= 1.0 {
                    break;
                }
            }
        }
        (best * 100.0).round() as u8
    }
}

/// Threshold-based match decisions over normalized names.
#[derive(Clone)]
pub struct FuzzyMatcher {
    threshold: u8,
    scorer: Arc<dyn SimilarityScorer>,
}

impl fmt::Debug for FuzzyMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzyMatcher")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl FuzzyMatcher {
    pub fn new(threshold: u8, scorer: Arc<dyn SimilarityScorer>) -> Self {
        Self { threshold, scorer }
    }

    /// Raw similarity of two already-normalized strings.
    pub fn score(&self, a: &str, b: &str) -> u8 {
        self.scorer.score(a, b)
    }

    /// Whether two raw names are the same participant, normalizing both sides
    /// before scoring against the configured threshold.
    pub fn names_match(&self, a: &str, b: &str) -> bool {
        let norm_a = normalize_name(a);
        let norm_b = normalize_name(b);
        // A blank name carries no evidence; it must never link two records.
        if norm_a.is_empty() || norm_b.is_empty() {
            return false;
        }
        let score = self.scorer.score(&norm_a, &norm_b);
        tracing::debug!(%norm_a, %norm_b, score, threshold = self.threshold, "fuzzy name score");
        score >= self.threshold
    }

    /// Whether two (home, away) pairs describe the same match, tolerating
    /// providers that report the teams in swapped order.
    pub fn pairs_equivalent(
        &self,
        a_home: &str,
        a_away: &str,
        b_home: &str,
        b_away: &str,
    ) -> bool {
        let direct = self.names_match(a_home, b_home) && self.names_match(a_away, b_away);
        if direct {
            return true;
        }
        self.names_match(a_home, b_away) && self.names_match(a_away, b_home)
    }
}
