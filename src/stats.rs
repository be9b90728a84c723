//! Aggregate match statistics.

use serde::{Deserialize, Serialize};

use crate::record::MergedRecord;
use crate::session::MatchSession;

/// Counts derived from one merge result plus the session counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Records with both provider payloads present.
    pub matched: usize,
    /// Records carrying only the provider A payload.
    pub unmatched_a: usize,
    /// Records carrying only the provider B payload.
    pub unmatched_b: usize,
    /// Cumulative fuzzy-fallback usage for the day, read from the session
    /// rather than recomputed from the list, so it spans merge calls.
    pub fuzzy_fallback_count: u64,
}

impl MatchStats {
    /// Whether daily fuzzy-fallback usage is past the configured warning
    /// threshold. Non-fatal: a signal that provider identifier schemes may
    /// have drifted, never a reason to stop processing.
    pub fn exceeds_warning(&self, threshold: u64) -> bool {
        self.fuzzy_fallback_count > threshold
    }
}

/// Derive aggregate counts from a merge result.
pub fn match_stats(merged: &[MergedRecord], session: &MatchSession) -> MatchStats {
    let matched = merged.iter().filter(|r| r.is_matched()).count();
    let unmatched_a = merged
        .iter()
        .filter(|r| r.provider_a.is_some() && r.provider_b.is_none())
        .count();
    let unmatched_b = merged
        .iter()
        .filter(|r| r.provider_b.is_some() && r.provider_a.is_none())
        .count();
    MatchStats {
        matched,
        unmatched_a,
        unmatched_b,
        fuzzy_fallback_count: session.fuzzy_fallback_count,
    }
}
