//! Record data model.
//!
//! A [`SourceRecord`] is built once per raw payload at the start of a merge:
//! provider tag, owned payload, the participant pair resolved from the
//! provider's configured name path, and the identifier-candidate set. It is
//! immutable for the duration of the merge call. A [`MergedRecord`] is the
//! engine's output: canonical names, zero-to-two attached payloads and the
//! method that linked them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ProviderFields;
use crate::error::RecordError;
use crate::extract::extract_ids;

/// Which input list a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    A,
    B,
}

/// How a merged record's payloads were linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    /// Overlapping identifier candidates.
    Id,
    /// Name-similarity fallback.
    Fuzzy,
    /// Provider A record with no counterpart.
    UnmatchedA,
    /// Provider B record with no counterpart.
    UnmatchedB,
}

/// One provider record, with its comparison keys pre-extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRecord {
    pub provider: Provider,
    pub payload: Value,
    pub home: String,
    pub away: String,
    pub ids: BTreeSet<String>,
}

impl SourceRecord {
    /// Build a record from a raw payload using the provider's field layout.
    ///
    /// Missing or non-string name fields resolve to empty names and an
    /// absent id scope to an empty candidate set; only a structurally
    /// unusable payload (not an object, or a configured root path resolving
    /// to a non-object value) is an error.
    pub fn from_payload(
        provider: Provider,
        payload: Value,
        fields: &ProviderFields,
        id_fields: &[String],
    ) -> Result<Self, RecordError> {
        if !payload.is_object() {
            return Err(RecordError::NotAnObject);
        }

        let name_scope = resolve_root(&payload, &fields.name_root)?;
        let home = string_field(name_scope, &fields.home_field);
        let away = string_field(name_scope, &fields.away_field);

        let id_scope = resolve_root(&payload, &fields.id_root)?;
        let ids = extract_ids(id_scope, id_fields);

        Ok(Self {
            provider,
            payload,
            home,
            away,
            ids,
        })
    }

    /// Fallback for payloads that failed extraction: empty names and an
    /// empty id set can never match anything, so the record falls through
    /// the scan and surfaces as unmatched.
    pub fn degraded(provider: Provider, payload: Value) -> Self {
        Self {
            provider,
            payload,
            home: String::new(),
            away: String::new(),
            ids: BTreeSet::new(),
        }
    }
}

/// A canonical output record: one or both provider payloads plus the names
/// chosen as authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    /// Canonical home participant name.
    pub home: String,
    /// Canonical away participant name.
    pub away: String,
    /// Provider A payload, when this record has one.
    pub provider_a: Option<Value>,
    /// Provider B payload, when this record has one.
    pub provider_b: Option<Value>,
    pub method: MatchMethod,
}

impl MergedRecord {
    /// Whether both provider payloads are present.
    pub fn is_matched(&self) -> bool {
        self.provider_a.is_some() && self.provider_b.is_some()
    }
}

static EMPTY_SCOPE: Value = Value::Null;

/// Walk `path` from the payload root, requiring an object at every step.
fn resolve_root<'a>(payload: &'a Value, path: &[String]) -> Result<&'a Value, RecordError> {
    let mut current = payload;
    for key in path {
        let map = current.as_object().ok_or_else(|| RecordError::BadRoot(key.clone()))?;
        match map.get(key) {
            Some(next) => current = next,
            // Missing roots are tolerated as an empty scope.
            None => return Ok(&EMPTY_SCOPE),
        }
    }
    if current.is_object() || current.is_null() {
        Ok(current)
    } else {
        Err(RecordError::BadRoot(path.join(".")))
    }
}

fn string_field(scope: &Value, field: &str) -> String {
    scope
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Write the canonical names back into the configured participant fields of
/// a payload, so every nested copy of the names agrees with the merged
/// record. Does nothing when the name path is absent.
pub(crate) fn propagate_names(
    payload: &mut Value,
    fields: &ProviderFields,
    home: &str,
    away: &str,
) {
    let mut current = payload;
    for key in &fields.name_root {
        let Some(next) = current.get_mut(key) else {
            return;
        };
        current = next;
    }
    let Some(map) = current.as_object_mut() else {
        return;
    };
    map.insert(fields.home_field.clone(), Value::String(home.to_string()));
    map.insert(fields.away_field.clone(), Value::String(away.to_string()));
}
