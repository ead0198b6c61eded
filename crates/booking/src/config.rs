//! Draft store configuration.
//!
//! Values come from the environment (the runner loads `.env.local` / `.env`
//! first). The 24h TTL is a domain constant and intentionally not here.

use std::path::PathBuf;

use crate::ports::outbound::storage_keys;

pub const ENV_DRAFT_KEY: &str = "MAGNETIQ_DRAFT_KEY";
pub const ENV_STEP_KEY: &str = "MAGNETIQ_DRAFT_STEP_KEY";
pub const ENV_STORAGE_DIR: &str = "MAGNETIQ_STORAGE_DIR";
pub const ENV_SESSION_QUOTA: &str = "MAGNETIQ_SESSION_QUOTA_BYTES";

/// Name of the file backing the long-lived medium on desktop.
pub const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    EmptyValue { var: &'static str },

    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Draft key and step key must differ (both are {0:?})")]
    KeyCollision(String),
}

/// Keys under which the draft and its step are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftKeys {
    pub draft: String,
    pub step: String,
}

impl Default for DraftKeys {
    fn default() -> Self {
        Self {
            draft: storage_keys::BOOKING_DRAFT.to_string(),
            step: storage_keys::BOOKING_DRAFT_STEP.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftStoreConfig {
    pub keys: DraftKeys,
    /// Directory for the long-lived medium's file; platform config dir when unset.
    pub storage_dir: Option<PathBuf>,
    /// Optional size cap on the in-memory session medium.
    pub session_quota_bytes: Option<usize>,
}

impl DraftStoreConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DraftKeys::default();
        let keys = DraftKeys {
            draft: key_var(&lookup, ENV_DRAFT_KEY)?.unwrap_or(defaults.draft),
            step: key_var(&lookup, ENV_STEP_KEY)?.unwrap_or(defaults.step),
        };
        if keys.draft == keys.step {
            return Err(ConfigError::KeyCollision(keys.draft));
        }

        let storage_dir = lookup(ENV_STORAGE_DIR)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let session_quota_bytes = match lookup(ENV_SESSION_QUOTA) {
            None => None,
            Some(raw) => {
                let quota = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| ConfigError::InvalidValue {
                        var: ENV_SESSION_QUOTA,
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?;
                if quota == 0 {
                    return Err(ConfigError::InvalidValue {
                        var: ENV_SESSION_QUOTA,
                        value: raw,
                        reason: "quota must be positive".to_string(),
                    });
                }
                Some(quota)
            }
        };

        Ok(Self {
            keys,
            storage_dir,
            session_quota_bytes,
        })
    }

    /// Path of the long-lived medium's backing file on desktop.
    ///
    /// - explicit `MAGNETIQ_STORAGE_DIR` if set
    /// - Linux: ~/.config/magnetiq/booking/storage.json (and OS equivalents)
    /// - current directory as a last resort
    #[cfg(not(target_arch = "wasm32"))]
    pub fn storage_file(&self) -> PathBuf {
        if let Some(dir) = &self.storage_dir {
            return dir.join(STORAGE_FILE_NAME);
        }
        match directories::ProjectDirs::from("io", "magnetiq", "booking") {
            Some(dirs) => dirs.config_dir().join(STORAGE_FILE_NAME),
            None => PathBuf::from("magnetiq_storage.json"),
        }
    }
}

fn key_var<F>(lookup: &F, var: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyValue { var }),
        Some(value) => Ok(Some(value.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_match_frontend_keys() {
        let config = DraftStoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.keys.draft, "booking_draft");
        assert_eq!(config.keys.step, "booking_draft_step");
        assert_eq!(config.storage_dir, None);
        assert_eq!(config.session_quota_bytes, None);
        assert_eq!(config, DraftStoreConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = DraftStoreConfig::from_lookup(lookup(&[
            (ENV_DRAFT_KEY, " draft_v2 "),
            (ENV_STEP_KEY, "draft_v2_step"),
            (ENV_STORAGE_DIR, "/tmp/magnetiq"),
            (ENV_SESSION_QUOTA, "5242880"),
        ]))
        .unwrap();
        assert_eq!(config.keys.draft, "draft_v2");
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/magnetiq")));
        assert_eq!(config.session_quota_bytes, Some(5_242_880));
        assert_eq!(
            config.storage_file(),
            PathBuf::from("/tmp/magnetiq").join(STORAGE_FILE_NAME)
        );
    }

    #[test]
    fn rejects_blank_key() {
        let err = DraftStoreConfig::from_lookup(lookup(&[(ENV_DRAFT_KEY, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::EmptyValue { var: ENV_DRAFT_KEY });
    }

    #[test]
    fn rejects_colliding_keys() {
        let err = DraftStoreConfig::from_lookup(lookup(&[(ENV_STEP_KEY, "booking_draft")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::KeyCollision(_)));
    }

    #[test]
    fn rejects_bad_quota() {
        let err =
            DraftStoreConfig::from_lookup(lookup(&[(ENV_SESSION_QUOTA, "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = DraftStoreConfig::from_lookup(lookup(&[(ENV_SESSION_QUOTA, "0")])).unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn blank_storage_dir_falls_back_to_default() {
        let config = DraftStoreConfig::from_lookup(lookup(&[(ENV_STORAGE_DIR, "")])).unwrap();
        assert_eq!(config.storage_dir, None);
        assert!(config.storage_file().ends_with(STORAGE_FILE_NAME));
    }
}
