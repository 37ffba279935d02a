//! Store policy
//!
//! One store, several business rules. The switches here cover every
//! difference between the historical bill tracker variants.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::{Error, Result};

/// How due dates typed by the user are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateParsing {
    /// Reject anything that is not `YYYY-MM-DD`
    #[default]
    Strict,
    /// Store the text as entered
    Lenient,
}

/// What happens to the ids of other bills when one is removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// Ids are permanent; gaps are allowed
    #[default]
    Stable,
    /// Every id above the removed one shifts down by one
    Renumber,
}

impl FromStr for IdPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "stable" => Ok(IdPolicy::Stable),
            "renumber" | "compact" => Ok(IdPolicy::Renumber),
            _ => Err(Error::Config(format!("Unknown id policy: {}", s))),
        }
    }
}

/// Named starting points for a [`StorePolicy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyPreset {
    /// Strict dates, stable ids, no unpaid window
    #[default]
    Default,
    /// See [`StorePolicy::legacy_lenient`]
    LegacyLenient,
    /// See [`StorePolicy::legacy_strict`]
    LegacyStrict,
}

impl PolicyPreset {
    pub fn policy(&self) -> StorePolicy {
        match self {
            PolicyPreset::Default => StorePolicy::default(),
            PolicyPreset::LegacyLenient => StorePolicy::legacy_lenient(),
            PolicyPreset::LegacyStrict => StorePolicy::legacy_strict(),
        }
    }
}

impl FromStr for PolicyPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "default" => Ok(PolicyPreset::Default),
            "legacy-lenient" => Ok(PolicyPreset::LegacyLenient),
            "legacy-strict" => Ok(PolicyPreset::LegacyStrict),
            _ => Err(Error::Config(format!("Unknown policy preset: {}", s))),
        }
    }
}

/// Business rules applied by [`crate::BillStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorePolicy {
    pub date_parsing: DateParsing,
    /// Default cutoff for the unpaid listing, in days from today
    pub unpaid_window_days: Option<u32>,
    /// Whether the cutoff also restricts the total owed
    pub window_limits_total: bool,
    /// Changing a due date marks the bill unpaid again
    pub reopen_on_due_date_change: bool,
    pub id_policy: IdPolicy,
}

impl Default for StorePolicy {
    fn default() -> Self {
        Self {
            date_parsing: DateParsing::Strict,
            unpaid_window_days: None,
            window_limits_total: false,
            reopen_on_due_date_change: true,
            id_policy: IdPolicy::Stable,
        }
    }
}

impl StorePolicy {
    /// First tracker: free-text dates, every unpaid bill listed, ids compacted.
    pub fn legacy_lenient() -> Self {
        Self {
            date_parsing: DateParsing::Lenient,
            unpaid_window_days: None,
            window_limits_total: false,
            reopen_on_due_date_change: true,
            id_policy: IdPolicy::Renumber,
        }
    }

    /// Later trackers: validated dates, 30-day unpaid window, ids compacted.
    pub fn legacy_strict() -> Self {
        Self {
            date_parsing: DateParsing::Strict,
            unpaid_window_days: Some(30),
            window_limits_total: false,
            reopen_on_due_date_change: true,
            id_policy: IdPolicy::Renumber,
        }
    }

    pub fn with_date_parsing(mut self, date_parsing: DateParsing) -> Self {
        self.date_parsing = date_parsing;
        self
    }

    pub fn with_unpaid_window(mut self, days: Option<u32>) -> Self {
        self.unpaid_window_days = days;
        self
    }

    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict_and_stable() {
        let policy = StorePolicy::default();
        assert_eq!(policy.date_parsing, DateParsing::Strict);
        assert_eq!(policy.id_policy, IdPolicy::Stable);
        assert!(policy.reopen_on_due_date_change);
        assert!(!policy.window_limits_total);
        assert_eq!(policy.unpaid_window_days, None);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let policy: StorePolicy = toml::from_str(
            r#"
            date_parsing = "lenient"
            unpaid_window_days = 30
            "#,
        )
        .unwrap();
        assert_eq!(policy.date_parsing, DateParsing::Lenient);
        assert_eq!(policy.unpaid_window_days, Some(30));
        assert_eq!(policy.id_policy, IdPolicy::Stable);
        assert!(policy.reopen_on_due_date_change);
    }

    #[test]
    fn test_legacy_presets() {
        let lenient = StorePolicy::legacy_lenient();
        assert_eq!(lenient.date_parsing, DateParsing::Lenient);
        assert_eq!(lenient.unpaid_window_days, None);
        assert_eq!(lenient.id_policy, IdPolicy::Renumber);

        let strict = StorePolicy::legacy_strict();
        assert_eq!(strict.date_parsing, DateParsing::Strict);
        assert_eq!(strict.unpaid_window_days, Some(30));
        assert!(!strict.window_limits_total);
    }

    #[test]
    fn test_preset_from_str() {
        let preset: PolicyPreset = "legacy-strict".parse().unwrap();
        assert_eq!(preset.policy(), StorePolicy::legacy_strict());
        assert_eq!("LEGACY_LENIENT".parse::<PolicyPreset>().unwrap(), PolicyPreset::LegacyLenient);
        assert_eq!("default".parse::<PolicyPreset>().unwrap().policy(), StorePolicy::default());
        assert!("legacy".parse::<PolicyPreset>().is_err());
    }

    #[test]
    fn test_id_policy_from_str() {
        assert_eq!("Renumber".parse::<IdPolicy>().unwrap(), IdPolicy::Renumber);
        assert_eq!("stable".parse::<IdPolicy>().unwrap(), IdPolicy::Stable);
        assert!("shuffle".parse::<IdPolicy>().is_err());
    }
}
