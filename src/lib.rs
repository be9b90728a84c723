//! matchlink: record linkage for multi-provider sports event feeds.
//!
//! Two providers report the same real-world matches under incompatible,
//! unreliable identifier schemes. This crate pairs each record with its
//! counterpart from the other provider when one exists and emits one
//! canonical list plus summary statistics. Fetching, persistence and
//! broadcast are the caller's business; the engine takes two
//! already-materialized lists of `serde_json::Value` payloads.
//!
//! ## How records link
//!
//! - Digit runs extracted from configured identifier fields act as weak
//!   cross-provider keys; any overlap is an **id** match.
//! - Failing that, normalized participant names are compared with a
//!   substring-tolerant similarity score; a pair equivalent under direct or
//!   swapped home/away ordering is a **fuzzy** match, counted per day in a
//!   caller-owned [`MatchSession`].
//! - Everything else passes through unmatched. No input record is ever
//!   dropped or duplicated.
//!
//! Matching is greedy and order-dependent by policy; see [`engine`] for the
//! exact scan rules and the [`PairingPolicy`] seam for substituting a
//! stricter matcher.
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use matchlink::{match_stats, LinkConfig, MatchSession, RecordLinker};
//! use serde_json::json;
//!
//! let linker = RecordLinker::new(LinkConfig::default()).expect("valid config");
//! let mut session = MatchSession::new(Utc::now().date_naive());
//!
//! let inplay = vec![json!({
//!     "raw_event_data": { "team1": "N. Djokovic", "team2": "R. Nadal", "eventId": "ev-42" }
//! })];
//! let prematch = vec![json!({
//!     "FI": "42",
//!     "players": { "home": "Novak Djokovic", "away": "Rafael Nadal" }
//! })];
//!
//! let merged = linker.merge(&inplay, &prematch, &mut session);
//! let stats = match_stats(&merged, &session);
//! assert_eq!(stats.matched, 1);
//! ```

mod config;
mod engine;
mod error;
mod extract;
mod normalize;
mod record;
mod session;
mod similarity;
mod stats;

pub use crate::config::{LinkConfig, ProviderFields, ResetTimezone};
pub use crate::engine::{GreedyFirstFit, PairMethod, PairingPolicy, RecordLinker};
pub use crate::error::{LinkError, RecordError};
pub use crate::extract::extract_ids;
pub use crate::normalize::normalize_name;
pub use crate::record::{MatchMethod, MergedRecord, Provider, SourceRecord};
pub use crate::session::MatchSession;
pub use crate::similarity::{FuzzyMatcher, PartialRatioScorer, SimilarityScorer};
pub use crate::stats::{match_stats, MatchStats};
