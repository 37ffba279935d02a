use crate::policy::{DateParsing, IdPolicy, PolicyPreset, StorePolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BilltrackConfig {
    pub database: Option<String>,
    /// Used when there is no `[policy]` table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<PolicyPreset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<StorePolicy>,
}

/// Policy settings given on the command line
#[derive(Debug, Clone, Default)]
pub struct PolicyOverrides {
    /// Replaces whatever the config file selects
    pub preset: Option<PolicyPreset>,
    pub lenient: bool,
    pub id_policy: Option<IdPolicy>,
    pub unpaid_window_days: Option<u32>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("billtrack.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("bill_tracker.db")
}

impl BilltrackConfig {
    /// Database path from the config, or the default next to the working directory
    pub fn database_path(&self) -> PathBuf {
        self.database
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(default_database_path)
    }

    /// Resolve the store policy: a command-line preset, else the `[policy]`
    /// table, else the config preset, else defaults. Individual flags apply last.
    pub fn effective_policy(&self, overrides: &PolicyOverrides) -> StorePolicy {
        let mut policy = match overrides.preset {
            Some(preset) => preset.policy(),
            None => self
                .policy
                .clone()
                .unwrap_or_else(|| self.preset.unwrap_or_default().policy()),
        };

        if overrides.lenient {
            policy = policy.with_date_parsing(DateParsing::Lenient);
        }
        if let Some(id_policy) = overrides.id_policy {
            policy = policy.with_id_policy(id_policy);
        }
        if let Some(days) = overrides.unpaid_window_days {
            policy = policy.with_unpaid_window(Some(days));
        }
        policy
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<BilltrackConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: BilltrackConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &BilltrackConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billtrack.toml");
        let config = BilltrackConfig {
            database: Some("bills/home.db".to_string()),
            preset: None,
            policy: Some(StorePolicy::legacy_strict()),
        };

        write_config(&path, &config, false).unwrap();
        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.database_path(), PathBuf::from("bills/home.db"));
    }

    #[test]
    fn test_write_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billtrack.toml");
        write_config(&path, &BilltrackConfig::default(), false).unwrap();

        assert!(write_config(&path, &BilltrackConfig::default(), false).is_err());
        assert!(write_config(&path, &BilltrackConfig::default(), true).is_ok());
    }

    #[test]
    fn test_policy_table_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billtrack.toml");
        std::fs::write(&path, "database = \"x.db\"\n").unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.policy, None);
        assert_eq!(loaded.effective_policy(&PolicyOverrides::default()), StorePolicy::default());

        std::fs::write(
            &path,
            "[policy]\ndate_parsing = \"lenient\"\nid_policy = \"renumber\"\n",
        )
        .unwrap();
        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.database_path(), default_database_path());
        let policy = loaded.effective_policy(&PolicyOverrides::default());
        assert_eq!(policy.date_parsing, DateParsing::Lenient);
        assert_eq!(policy.id_policy, IdPolicy::Renumber);
    }

    #[test]
    fn test_config_preset_selects_legacy_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("billtrack.toml");
        std::fs::write(&path, "preset = \"legacy-strict\"\n").unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.preset, Some(PolicyPreset::LegacyStrict));
        assert_eq!(
            loaded.effective_policy(&PolicyOverrides::default()),
            StorePolicy::legacy_strict()
        );
    }

    #[test]
    fn test_policy_table_wins_over_config_preset() {
        let config = BilltrackConfig {
            database: None,
            preset: Some(PolicyPreset::LegacyLenient),
            policy: Some(StorePolicy::default()),
        };
        assert_eq!(config.effective_policy(&PolicyOverrides::default()), StorePolicy::default());
    }

    #[test]
    fn test_flags_override_preset() {
        let config = BilltrackConfig {
            preset: Some(PolicyPreset::LegacyLenient),
            ..BilltrackConfig::default()
        };
        let overrides = PolicyOverrides {
            preset: Some(PolicyPreset::LegacyStrict),
            lenient: true,
            id_policy: Some(IdPolicy::Stable),
            unpaid_window_days: Some(14),
        };

        let policy = config.effective_policy(&overrides);
        assert_eq!(policy.date_parsing, DateParsing::Lenient);
        assert_eq!(policy.id_policy, IdPolicy::Stable);
        assert_eq!(policy.unpaid_window_days, Some(14));
        assert!(policy.reopen_on_due_date_change);
    }

    #[test]
    fn test_cli_preset_alone_gives_legacy_renumbering() {
        let overrides = PolicyOverrides {
            preset: Some(PolicyPreset::LegacyStrict),
            ..PolicyOverrides::default()
        };
        let policy = BilltrackConfig::default().effective_policy(&overrides);
        assert_eq!(policy.id_policy, IdPolicy::Renumber);
        assert_eq!(policy.unpaid_window_days, Some(30));
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("bills.db");
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
