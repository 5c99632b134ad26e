use std::net::SocketAddr;
use std::path::PathBuf;
use studypath_core::schedule::StudyDays;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// When the success model is loaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelInit {
    /// Load at startup and refuse to start if loading fails.
    Eager,
    /// Load on the first request that needs a prediction.
    Lazy,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub curriculum_path: Option<PathBuf>,
    pub model_path: Option<PathBuf>,
    pub model_init: ModelInit,
    pub study_days: StudyDays,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let curriculum_path = optional_path("CURRICULUM_PATH");
        let model_path = optional_path("MODEL_PATH");

        let model_init_str = std::env::var("MODEL_INIT").unwrap_or_else(|_| "eager".to_string());
        let model_init = match model_init_str.to_lowercase().as_str() {
            "eager" => ModelInit::Eager,
            "lazy" => ModelInit::Lazy,
            other => {
                return Err(ConfigError::InvalidValue(
                    "MODEL_INIT".to_string(),
                    format!("'{}' is neither 'eager' nor 'lazy'", other),
                ));
            }
        };

        let study_days = match std::env::var("STUDY_DAYS") {
            Ok(value) => value
                .parse::<StudyDays>()
                .map_err(|e| ConfigError::InvalidValue("STUDY_DAYS".to_string(), e))?,
            Err(_) => StudyDays::AllWeek,
        };

        Ok(Self {
            bind_address,
            log_level,
            curriculum_path,
            model_path,
            model_init,
            study_days,
        })
    }
}

/// Reads a path variable, treating an empty value as unset.
fn optional_path(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tracing::Level;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("BIND_ADDRESS");
            env::remove_var("RUST_LOG");
            env::remove_var("CURRICULUM_PATH");
            env::remove_var("MODEL_PATH");
            env::remove_var("MODEL_INIT");
            env::remove_var("STUDY_DAYS");
        }
    }

    #[test]
    fn test_config_error_display() {
        let invalid_value =
            ConfigError::InvalidValue("TEST_VAR".to_string(), "bad_value".to_string());
        assert_eq!(
            format!("{}", invalid_value),
            "Invalid value for environment variable TEST_VAR: bad_value"
        );
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_env_vars();

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.curriculum_path, None);
        assert_eq!(config.model_path, None);
        assert_eq!(config.model_init, ModelInit::Eager);
        assert_eq!(config.study_days, StudyDays::AllWeek);
    }

    #[test]
    #[serial]
    fn test_config_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "127.0.0.1:8080");
            env::set_var("RUST_LOG", "debug");
            env::set_var("CURRICULUM_PATH", "/data/curriculum.json");
            env::set_var("MODEL_PATH", "/data/model.json");
            env::set_var("MODEL_INIT", "Lazy");
            env::set_var("STUDY_DAYS", "weekdays");
        }

        let config = Config::from_env().expect("Config should load successfully");

        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(
            config.curriculum_path,
            Some(PathBuf::from("/data/curriculum.json"))
        );
        assert_eq!(config.model_path, Some(PathBuf::from("/data/model.json")));
        assert_eq!(config.model_init, ModelInit::Lazy);
        assert_eq!(config.study_days, StudyDays::Weekdays);
    }

    #[test]
    #[serial]
    fn test_config_empty_paths_are_unset() {
        clear_env_vars();
        unsafe {
            env::set_var("CURRICULUM_PATH", "  ");
        }

        let config = Config::from_env().expect("Config should load successfully");
        assert_eq!(config.curriculum_path, None);
    }

    #[test]
    #[serial]
    fn test_config_invalid_bind_address() {
        clear_env_vars();
        unsafe {
            env::set_var("BIND_ADDRESS", "not-a-valid-address");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "BIND_ADDRESS"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_log_level() {
        clear_env_vars();
        unsafe {
            env::set_var("RUST_LOG", "not-a-level");
        }

        let err = Config::from_env().unwrap_err();
        match err {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "RUST_LOG"),
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_model_init_and_study_days() {
        clear_env_vars();
        unsafe {
            env::set_var("MODEL_INIT", "sometimes");
        }
        match Config::from_env().unwrap_err() {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "MODEL_INIT"),
        }

        clear_env_vars();
        unsafe {
            env::set_var("STUDY_DAYS", "6");
        }
        match Config::from_env().unwrap_err() {
            ConfigError::InvalidValue(var, _) => assert_eq!(var, "STUDY_DAYS"),
        }
    }
}
