//! Merge session state.
//!
//! The fuzzy-fallback counter and its reset date are deliberately an
//! explicit value owned by the caller and passed `&mut` into each merge
//! call, not hidden module state: exclusive access is then enforced by the
//! borrow checker, and the caller decides whether to persist the session
//! across process restarts (it is serde-serializable for exactly that).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Caller-owned counter of fuzzy-fallback matches for the current day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSession {
    /// Fuzzy matches recorded since `last_reset_date` began.
    pub fuzzy_fallback_count: u64,
    /// The day the counter was last zeroed.
    pub last_reset_date: NaiveDate,
}

impl MatchSession {
    /// Fresh session for the given day.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            fuzzy_fallback_count: 0,
            last_reset_date: today,
        }
    }

    /// Zero the counter when the calendar day has changed. Called by the
    /// engine at the start of every merge, before any new increments.
    pub fn roll_over(&mut self, today: NaiveDate) {
        if today != self.last_reset_date {
            tracing::debug!(
                previous = %self.last_reset_date,
                current = %today,
                dropped_count = self.fuzzy_fallback_count,
                "resetting daily fuzzy-fallback counter"
            );
            self.fuzzy_fallback_count = 0;
            self.last_reset_date = today;
        }
    }

    pub(crate) fn record_fuzzy_fallback(&mut self) {
        self.fuzzy_fallback_count += 1;
    }
}
