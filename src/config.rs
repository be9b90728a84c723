//! Linker configuration.
//!
//! The engine is parameterized by field names rather than hard-coded per
//! sport, so the same linker serves different record shapes. Defaults mirror
//! the tennis feeds this engine was first built for: provider A delivers
//! in-play records with teams under `raw_event_data`, provider B delivers
//! prematch records with players under `players`.
//!
//! Validation is eager: a bad config is rejected when the linker is
//! constructed, never silently mid-merge.

use serde::{Deserialize, Serialize};

use crate::error::LinkError;

/// Calendar used to decide when "a new day" starts for the fuzzy-fallback
/// counter reset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResetTimezone {
    #[default]
    Utc,
    Local,
}

/// Where one provider keeps participant names and identifier fields inside
/// its payloads.
///
/// Paths are sequences of object keys walked from the payload root; an empty
/// path means the payload root itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderFields {
    /// Path to the mapping holding the home/away name fields.
    #[serde(default)]
    pub name_root: Vec<String>,
    /// Field holding the home participant name, under `name_root`.
    pub home_field: String,
    /// Field holding the away participant name, under `name_root`.
    pub away_field: String,
    /// Path to the mapping scanned for identifier fields.
    #[serde(default)]
    pub id_root: Vec<String>,
}

/// Configuration for one [`RecordLinker`](crate::RecordLinker).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkConfig {
    /// Minimum similarity score (0..=100) for a fuzzy name match.
    #[serde(default = "LinkConfig::default_fuzzy_threshold")]
    pub fuzzy_threshold: u8,
    /// Ordered list of fields scanned for identifier candidates.
    pub id_fields: Vec<String>,
    /// Daily fuzzy-fallback count above which usage is flagged; elevated
    /// usage suggests provider-side identifier schemes have drifted.
    #[serde(default = "LinkConfig::default_fuzzy_warning_threshold")]
    pub fuzzy_warning_threshold: u64,
    /// Calendar deciding when the daily counter resets.
    #[serde(default)]
    pub reset_timezone: ResetTimezone,
    /// Payload layout for provider A records (first input list).
    pub provider_a: ProviderFields,
    /// Payload layout for provider B records (second input list).
    pub provider_b: ProviderFields,
}

impl LinkConfig {
    pub(crate) fn default_fuzzy_threshold() -> u8 {
        80
    }

    pub(crate) fn default_fuzzy_warning_threshold() -> u64 {
        10
    }

    /// Validate the configuration. Run once at linker construction.
    pub fn validate(&self) -> Result<(), LinkError> {
        if self.fuzzy_threshold > 100 {
            return Err(LinkError::InvalidConfig(
                "fuzzy_threshold must be between 0 and 100".into(),
            ));
        }
        if self.id_fields.is_empty() {
            return Err(LinkError::InvalidConfig(
                "id_fields must name at least one field".into(),
            ));
        }
        if self.id_fields.iter().any(|f| f.trim().is_empty()) {
            return Err(LinkError::InvalidConfig(
                "id_fields must not contain blank names".into(),
            ));
        }
        if self.fuzzy_warning_threshold == 0 {
            return Err(LinkError::InvalidConfig(
                "fuzzy_warning_threshold must be greater than zero".into(),
            ));
        }
        for (label, provider) in [("provider_a", &self.provider_a), ("provider_b", &self.provider_b)]
        {
            if provider.home_field.trim().is_empty() || provider.away_field.trim().is_empty() {
                return Err(LinkError::InvalidConfig(format!(
                    "{label}: home_field and away_field must not be blank"
                )));
            }
        }
        Ok(())
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: Self::default_fuzzy_threshold(),
            id_fields: vec!["eventId".into(), "bet365_id".into(), "FI".into()],
            fuzzy_warning_threshold: Self::default_fuzzy_warning_threshold(),
            reset_timezone: ResetTimezone::default(),
            provider_a: ProviderFields {
                name_root: vec!["raw_event_data".into()],
                home_field: "team1".into(),
                away_field: "team2".into(),
                id_root: vec!["raw_event_data".into()],
            },
            provider_b: ProviderFields {
                name_root: vec!["players".into()],
                home_field: "home".into(),
                away_field: "away".into(),
                id_root: Vec::new(),
            },
        }
    }
}
