use crate::engine::EngineConfig;
use crate::engine::achievements::RelockPolicy;
use std::{env, path::PathBuf, time::Duration};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";
const DEFAULT_DAY_CHECK_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub data_path: PathBuf,
    pub day_check_interval: Duration,
    pub engine: EngineConfig,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparseable values are logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parsed(&lookup, "PORT").unwrap_or(DEFAULT_PORT);
        let data_path = lookup("APP_DATA_PATH")
            .filter(|path| !path.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);
        let day_check_secs = parsed(&lookup, "DAY_CHECK_SECS")
            .filter(|secs: &u64| *secs > 0)
            .unwrap_or(DEFAULT_DAY_CHECK_SECS);
        let relock_policy = parsed::<RelockPolicy>(&lookup, "XP_RELOCK_POLICY").unwrap_or_default();

        Self {
            port,
            data_path,
            day_check_interval: Duration::from_secs(day_check_secs),
            engine: EngineConfig {
                relock_policy,
                ..EngineConfig::default()
            },
        }
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(key, value = %raw, "ignoring invalid setting: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let settings = settings(&[]);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.data_path, PathBuf::from("data/state.json"));
        assert_eq!(settings.day_check_interval, Duration::from_secs(60));
        assert_eq!(settings.engine.relock_policy, RelockPolicy::Refund);
        assert_eq!(settings.engine.curve.xp_per_level, 100);
    }

    #[test]
    fn reads_overrides() {
        let settings = settings(&[
            ("PORT", "9000"),
            ("APP_DATA_PATH", "/tmp/xp.json"),
            ("DAY_CHECK_SECS", "5"),
            ("XP_RELOCK_POLICY", "keep-bonus"),
        ]);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.data_path, PathBuf::from("/tmp/xp.json"));
        assert_eq!(settings.day_check_interval, Duration::from_secs(5));
        assert_eq!(settings.engine.relock_policy, RelockPolicy::KeepBonus);
    }

    #[test]
    fn invalid_values_fall_back() {
        let settings = settings(&[
            ("PORT", "not-a-port"),
            ("DAY_CHECK_SECS", "0"),
            ("XP_RELOCK_POLICY", "sometimes"),
        ]);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.day_check_interval, Duration::from_secs(60));
        assert_eq!(settings.engine.relock_policy, RelockPolicy::Refund);
    }
}
