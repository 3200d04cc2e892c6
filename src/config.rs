use tracing::warn;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://vaultstats.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_LEADERBOARD_TOP_N: usize = 10;

/// Runtime configuration, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Leaderboard size when a request doesn't ask for one
    pub leaderboard_top_n: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            leaderboard_top_n: DEFAULT_LEADERBOARD_TOP_N,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Missing or unparsable values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let leaderboard_top_n = match lookup("LEADERBOARD_TOP_N") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(value = %raw, "Invalid LEADERBOARD_TOP_N, using default");
                defaults.leaderboard_top_n
            }),
            None => defaults.leaderboard_top_n,
        };

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            leaderboard_top_n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn uses_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.leaderboard_top_n, 10);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("LEADERBOARD_TOP_N", "20"),
        ]));

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.leaderboard_top_n, 20);
    }

    #[test]
    fn falls_back_on_unparsable_top_n() {
        let config = AppConfig::from_lookup(lookup_from(&[("LEADERBOARD_TOP_N", "-3")]));
        assert_eq!(config.leaderboard_top_n, DEFAULT_LEADERBOARD_TOP_N);
    }
}
