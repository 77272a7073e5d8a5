use std::env;

use gazette_base::GazetteResult;

/// Default listen port when `GAZETTE_PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;
/// Default database file when `GAZETTE_DB` is not set.
pub const DEFAULT_DATABASE: &str = "gazette.db.json";

/// Runtime configuration, sourced from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Store connection string: a JSON file path, or `:memory:` for
    /// the in-memory store.
    pub database: String,
}

impl Config {
    /// Reads the configuration from `GAZETTE_PORT` and `GAZETTE_DB`.
    pub fn from_env() -> GazetteResult<Self> {
        Self::resolve(env::var("GAZETTE_PORT").ok(), env::var("GAZETTE_DB").ok())
    }

    /// Builds a configuration from raw values, applying defaults.
    /// Blank values count as unset.
    pub fn resolve(port: Option<String>, database: Option<String>) -> GazetteResult<Self> {
        let port = match port.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_PORT,
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| gazette_base::err!("Invalid port number: {}", raw))?,
        };
        let database = match database.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_DATABASE.to_string(),
            Some(raw) => raw.to_string(),
        };
        Ok(Self { port, database })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_unset() {
        let config = Config::resolve(None, None).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database, "gazette.db.json");
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = Config::resolve(
            Some("9090".to_string()),
            Some("/var/lib/gazette/posts.json".to_string()),
        )
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.database, "/var/lib/gazette/posts.json");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::resolve(Some("".to_string()), Some("   ".to_string())).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database, DEFAULT_DATABASE);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let error = Config::resolve(Some("eighty".to_string()), None).unwrap_err();
        assert_eq!(error.to_string(), "Invalid port number: eighty");

        assert!(Config::resolve(Some("99999".to_string()), None).is_err());
    }

    #[test]
    fn test_memory_database_is_preserved() {
        let config = Config::resolve(None, Some(":memory:".to_string())).unwrap();
        assert_eq!(config.database, ":memory:");
    }
}
