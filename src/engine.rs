//! The record linker.
//!
//! Merges two provider lists into one canonical list. For every provider A
//! record, unconsumed provider B candidates are scanned in list order: a
//! non-empty identifier-candidate overlap links the pair as an ID match and
//! ends the scan; failing that, the first name-equivalent candidate links as
//! a fuzzy fallback. An ID match found anywhere in the scan always beats a
//! fuzzy candidate seen earlier, so identifier correlation wins over name
//! similarity whenever both are available.
//!
//! Matching is greedy and order-dependent: the first acceptable candidate in
//! list B order is taken, not a globally optimal assignment. A provider A
//! record can therefore consume a candidate that would have suited a later
//! record better. That is an explicit policy, kept behind [`PairingPolicy`]
//! so a stricter global matcher can be substituted without touching
//! extraction or normalization.

use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use serde_json::Value;

use crate::config::{LinkConfig, ResetTimezone};
use crate::error::LinkError;
use crate::record::{propagate_names, MatchMethod, MergedRecord, Provider, SourceRecord};
use crate::session::MatchSession;
use crate::similarity::{FuzzyMatcher, PartialRatioScorer, SimilarityScorer};


/// How a pairing policy linked a candidate to the probe record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairMethod {
    Id,
    Fuzzy,
}

impl From<PairMethod> for MatchMethod {
    fn from(method: PairMethod) -> Self {
        match method {
            PairMethod::Id => MatchMethod::Id,
            PairMethod::Fuzzy => MatchMethod::Fuzzy,
        }
    }
}

/// Candidate-selection seam.
///
/// `consumed[i]` marks candidates already linked to an earlier probe; the
/// policy must skip them and may not mutate anything.
pub trait PairingPolicy: Send + Sync {
    fn select(
        &self,
        probe: &SourceRecord,
        candidates: &[SourceRecord],
        consumed: &[bool],
        matcher: &FuzzyMatcher,
    ) -> Option<(usize, PairMethod)>;
}

/// Default policy: first id-overlapping candidate in scan order, else the
/// first name-equivalent candidate. One pass; the fuzzy candidate is held
/// back until the scan ends so a later id overlap can still take precedence.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyFirstFit;

impl PairingPolicy for GreedyFirstFit {
    fn select(
        &self,
        probe: &SourceRecord,
        candidates: &[SourceRecord],
        consumed: &[bool],
        matcher: &FuzzyMatcher,
    ) -> Option<(usize, PairMethod)> {
        let mut fuzzy_hit: Option<usize> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            if consumed[idx] {
                continue;
            }
            if probe.ids.intersection(&candidate.ids).next().is_some() {
                tracing::debug!(
                    candidate = idx,
                    overlap = ?probe.ids.intersection(&candidate.ids).collect::<Vec<_>>(),
                    "id overlap found"
                );
                return Some((idx, PairMethod::Id));
            }
            if fuzzy_hit.is_none()
                && matcher.pairs_equivalent(
                    &probe.home,
                    &probe.away,
                    &candidate.home,
                    &candidate.away,
                )
            {
                fuzzy_hit = Some(idx);
            }
        }
        fuzzy_hit.map(|idx| (idx, PairMethod::Fuzzy))
    }
}

/// Merges two provider record lists into one canonical list.
pub struct RecordLinker {
    config: LinkConfig,
    matcher: FuzzyMatcher,
    policy: Box<dyn PairingPolicy>,
}

impl RecordLinker {
    /// Construct a linker with the default partial-ratio scorer and greedy
    /// first-fit policy. The config is validated here; a bad config never
    /// reaches a merge.
    pub fn new(config: LinkConfig) -> Result<Self, LinkError> {
        Self::with_scorer(config, Arc::new(PartialRatioScorer))
    }

    /// Construct a linker with a custom similarity scorer.
    pub fn with_scorer(
        config: LinkConfig,
        scorer: Arc<dyn SimilarityScorer>,
    ) -> Result<Self, LinkError> {
        Self::with_parts(config, scorer, Box::new(GreedyFirstFit))
    }

    /// Construct a linker with explicit scorer and pairing policy.
    pub fn with_parts(
        config: LinkConfig,
        scorer: Arc<dyn SimilarityScorer>,
        policy: Box<dyn PairingPolicy>,
    ) -> Result<Self, LinkError> {
        config.validate()?;
        let matcher = FuzzyMatcher::new(config.fuzzy_threshold, scorer);
        Ok(Self {
            config,
            matcher,
            policy,
        })
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Merge the two lists. Every input record appears in exactly one output
    /// record; malformed records are logged and degraded to unmatched, so
    /// this never fails.
    pub fn merge(
        &self,
        list_a: &[Value],
        list_b: &[Value],
        session: &mut MatchSession,
    ) -> Vec<MergedRecord> {
        session.roll_over(self.today());

        // Pre-pass: extract provider B keys once instead of inside the scan.
        let b_records: Vec<SourceRecord> = list_b
            .iter()
            .enumerate()
            .map(|(idx, payload)| self.build_record(Provider::B, idx, payload))
            .collect();
        let mut consumed = vec![false; b_records.len()];

        let mut merged: Vec<MergedRecord> = Vec::with_capacity(list_a.len() + list_b.len());
        let mut id_matches = 0usize;
        let mut fuzzy_matches = 0usize;
        let mut unmatched_a = 0usize;

        for (idx, payload) in list_a.iter().enumerate() {
            let probe = self.build_record(Provider::A, idx, payload);
            match self
                .policy
                .select(&probe, &b_records, &consumed, &self.matcher)
            {
                Some((b_idx, method)) => {
                    consumed[b_idx] = true;
                    match method {
                        PairMethod::Id => id_matches += 1,
                        PairMethod::Fuzzy => {
                            fuzzy_matches += 1;
                            session.record_fuzzy_fallback();
                        }
                    }
                    merged.push(self.link(probe, &b_records[b_idx], method));
                }
                None => {
                    unmatched_a += 1;
                    tracing::debug!(
                        index = idx,
                        home = %probe.home,
                        away = %probe.away,
                        ids = ?probe.ids,
                        "provider A record unmatched"
                    );
                    merged.push(MergedRecord {
                        home: probe.home,
                        away: probe.away,
                        provider_a: Some(probe.payload),
                        provider_b: None,
                        method: MatchMethod::UnmatchedA,
                    });
                }
            }
        }

        let mut unmatched_b = 0usize;
        for (idx, record) in b_records.into_iter().enumerate() {
            if consumed[idx] {
                continue;
            }
            unmatched_b += 1;
            merged.push(MergedRecord {
                home: record.home,
                away: record.away,
                provider_a: None,
                provider_b: Some(record.payload),
                method: MatchMethod::UnmatchedB,
            });
        }

        tracing::info!(
            provider_a_total = list_a.len(),
            provider_b_total = list_b.len(),
            id_matches,
            fuzzy_matches,
            unmatched_a,
            unmatched_b,
            "merge complete"
        );
        if session.fuzzy_fallback_count > self.config.fuzzy_warning_threshold {
            tracing::warn!(
                fuzzy_fallback_count = session.fuzzy_fallback_count,
                threshold = self.config.fuzzy_warning_threshold,
                "elevated fuzzy-fallback usage today; provider id schemes may have drifted"
            );
        }

        merged
    }

    fn today(&self) -> NaiveDate {
        match self.config.reset_timezone {
            ResetTimezone::Utc => Utc::now().date_naive(),
            ResetTimezone::Local => Local::now().date_naive(),
        }
    }

    fn build_record(&self, provider: Provider, index: usize, payload: &Value) -> SourceRecord {
        let fields = match provider {
            Provider::A => &self.config.provider_a,
            Provider::B => &self.config.provider_b,
        };
        match SourceRecord::from_payload(provider, payload.clone(), fields, &self.config.id_fields)
        {
            Ok(record) => record,
            Err(error) => {
                tracing::error!(
                    ?provider,
                    index,
                    %error,
                    "record extraction failed; degrading to unmatched"
                );
                SourceRecord::degraded(provider, payload.clone())
            }
        }
    }

    /// Attach both payloads under the canonical names. Provider B's pair is
    /// authoritative when it is complete, else provider A's; the chosen
    /// names are written back into the participant fields of both payloads.
    fn link(&self, probe: SourceRecord, candidate: &SourceRecord, method: PairMethod) -> MergedRecord {
        let (home, away) = if !candidate.home.is_empty() && !candidate.away.is_empty() {
            (candidate.home.clone(), candidate.away.clone())
        } else {
            (probe.home.clone(), probe.away.clone())
        };

        let mut payload_a = probe.payload;
        let mut payload_b = candidate.payload.clone();
        propagate_names(&mut payload_a, &self.config.provider_a, &home, &away);
        propagate_names(&mut payload_b, &self.config.provider_b, &home, &away);

        MergedRecord {
            home,
            away,
            provider_a: Some(payload_a),
            provider_b: Some(payload_b),
            method: method.into(),
        }
    }
}
