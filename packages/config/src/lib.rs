// ABOUTME: Environment-driven configuration for Todo Tracker
// ABOUTME: Selects the runtime environment and where the todo database lives

pub mod constants;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment: {0}. Must be one of: test, development, production")]
    InvalidEnvironment(String),
    #[error("Unable to determine home directory")]
    NoHomeDirectory,
}

/// Runtime environment, each with its own database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Test,
    Development,
    #[default]
    Production,
}

impl Environment {
    /// Name of the database used in this environment
    pub fn database_name(&self) -> &'static str {
        match self {
            Environment::Test => "todos.test",
            Environment::Development => "todos.devel",
            Environment::Production => "todos",
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var(constants::TODOS_ENV) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Environment::default()),
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" | "devel" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Test => "test",
            Environment::Development => "development",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

/// Where the todo database lives for the current environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub environment: Environment,
    pub data_dir: PathBuf,
    pub database_url: Option<String>,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env()?;

        let data_dir = match env::var(constants::TODOS_DATA_DIR) {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_data_dir()?,
        };

        let database_url = env::var(constants::TODOS_DATABASE_URL)
            .ok()
            .filter(|url| !url.trim().is_empty());

        debug!(
            "Loaded database config (environment: {}, data_dir: {}, url override: {})",
            environment,
            data_dir.display(),
            database_url.is_some()
        );

        Ok(Self {
            environment,
            data_dir,
            database_url,
        })
    }

    /// Path of the SQLite file for this environment
    pub fn database_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("{}.db", self.environment.database_name()))
    }

    /// Connection URL, honouring an explicit override
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!("sqlite:{}", self.database_path().display()),
        }
    }
}

/// Get the default data directory (~/.todos)
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var(constants::HOME) {
        return Ok(PathBuf::from(home).join(constants::DEFAULT_DATA_DIR_NAME));
    }

    dirs::home_dir()
        .map(|home| home.join(constants::DEFAULT_DATA_DIR_NAME))
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        env::remove_var(constants::TODOS_ENV);
        env::remove_var(constants::TODOS_DATA_DIR);
        env::remove_var(constants::TODOS_DATABASE_URL);
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("test".parse::<Environment>(), Ok(Environment::Test));
        assert_eq!("Development".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!(
            "staging".parse::<Environment>(),
            Err(ConfigError::InvalidEnvironment("staging".to_string()))
        );
    }

    #[test]
    fn test_database_names() {
        assert_eq!(Environment::Test.database_name(), "todos.test");
        assert_eq!(Environment::Development.database_name(), "todos.devel");
        assert_eq!(Environment::Production.database_name(), "todos");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_to_production() {
        clear_env();
        env::set_var(constants::TODOS_DATA_DIR, "/var/lib/todos");

        let config = DatabaseConfig::from_env().unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.database_path(), PathBuf::from("/var/lib/todos/todos.db"));
        assert_eq!(config.database_url(), "sqlite:/var/lib/todos/todos.db");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_test_environment() {
        clear_env();
        env::set_var(constants::TODOS_ENV, "test");
        env::set_var(constants::TODOS_DATA_DIR, "/tmp/todos");

        let config = DatabaseConfig::from_env().unwrap();

        assert_eq!(config.environment, Environment::Test);
        assert_eq!(config.database_path(), PathBuf::from("/tmp/todos/todos.test.db"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_database_url_override() {
        clear_env();
        env::set_var(constants::TODOS_DATABASE_URL, "sqlite::memory:");

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.database_url(), "sqlite::memory:");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_environment_is_rejected() {
        clear_env();
        env::set_var(constants::TODOS_ENV, "staging");

        let result = DatabaseConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidEnvironment(_))));

        clear_env();
    }
}
