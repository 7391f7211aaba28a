//! Client configuration
//!
//! Settings are layered: defaults, then an optional JSON/YAML/TOML file, then the
//! `FEEDSEARCH_ENV` and `FEEDSEARCH_URL` environment variables. The CLI applies
//! its own flags on top of the result.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable selecting the [`Environment`]
pub const ENV_VAR: &str = "FEEDSEARCH_ENV";

/// Environment variable overriding the base URL
pub const URL_VAR: &str = "FEEDSEARCH_URL";

/// Deployment target of the photo feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Base URL the feed is served from in this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Development => "https://www.flickr.com/",
            Environment::Production => "https://api.flickr.com/",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    /// Parses an environment name, case-insensitive. `dev` and `prod` are accepted too.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment(input.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Environment::Development => "development",
                Environment::Production => "production",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Environment whose base URL is used when `base_url` is unset
    pub environment: Environment,

    /// Explicit base URL, wins over `environment`
    pub base_url: Option<String>,

    /// Per-request timeout of the HTTP client
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            environment: Environment::default(),
            base_url: None,
            timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Loads settings from a JSON, YAML or TOML file.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        parse_file::<_, Settings>(path)?.validated()
    }

    /// Rejects values the HTTP client cannot work with.
    ///
    /// A zero timeout would make every request fail.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(self)
    }

    /// Applies the `FEEDSEARCH_ENV` and `FEEDSEARCH_URL` process variables.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `lookup`.
    ///
    /// Empty values are treated as unset.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(environment) = lookup(ENV_VAR).filter(|v| !v.trim().is_empty()) {
            self.environment = environment.parse()?;
        }

        if let Some(url) = lookup(URL_VAR).filter(|v| !v.trim().is_empty()) {
            self.base_url = Some(url);
        }

        Ok(self)
    }

    /// The base URL requests are sent to
    pub fn resolved_base_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.as_str(),
            None => self.environment.base_url(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parses a JSON, YAML or TOML file into the specified type
///
/// JSON is tried first, then YAML, then TOML.
pub fn parse_file<P, T>(path: P) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;

    if let Ok(content) = serde_json::from_str(&content) {
        return Ok(content);
    }

    if let Ok(content) = serde_yaml::from_str(&content) {
        return Ok(content);
    }

    toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn write_config(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Could not create temp file");
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Development);
        assert_eq!(settings.resolved_base_url(), "https://www.flickr.com/");
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!(
            "Production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(ConfigError::UnknownEnvironment(_))
        ));
    }

    #[test]
    fn test_explicit_url_wins_over_environment() {
        let settings = Settings {
            environment: Environment::Production,
            base_url: Some("http://localhost:8080/".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.resolved_base_url(), "http://localhost:8080/");
    }

    #[test]
    fn test_from_json_file() {
        let file = write_config(".json", r#"{"environment": "production", "timeout_secs": 5}"#);
        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.environment, Environment::Production);
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.base_url, None);
    }

    #[test]
    fn test_from_yaml_file() {
        let file = write_config(".yaml", "base_url: http://localhost:9000/\n");
        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.resolved_base_url(), "http://localhost:9000/");
        assert_eq!(settings.timeout_secs, 30);
    }

    #[test]
    fn test_from_toml_file() {
        let file = write_config(".toml", "environment = \"production\"\ntimeout_secs = 10\n");
        let settings = Settings::from_file(file.path()).unwrap();

        assert_eq!(settings.environment, Environment::Production);
        assert_eq!(settings.timeout_secs, 10);
    }

    #[test]
    fn test_unparsable_file() {
        let file = write_config(".conf", "environment = = production");
        assert!(matches!(
            Settings::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let file = write_config(".json", r#"{"timeout_secs": 0}"#);
        assert!(matches!(
            Settings::from_file(file.path()),
            Err(ConfigError::ZeroTimeout)
        ));

        let settings = Settings {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(settings.validated(), Err(ConfigError::ZeroTimeout)));
        assert!(Settings::default().validated().is_ok());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Settings::from_file("does/not/exist.toml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            (ENV_VAR, "production".to_string()),
            (URL_VAR, "http://127.0.0.1:5000/".to_string()),
        ]);

        let settings = Settings::default()
            .with_overrides(|key| vars.get(key).cloned())
            .unwrap();

        assert_eq!(settings.environment, Environment::Production);
        assert_eq!(settings.resolved_base_url(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn test_empty_overrides_are_ignored() {
        let settings = Settings::default()
            .with_overrides(|_| Some(String::new()))
            .unwrap();
        assert_eq!(settings, Settings::default());
    }
}
