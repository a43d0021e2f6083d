use std::path::PathBuf;
use std::time::Duration;

use regex::Regex;
use thiserror::Error;

/// Default Ed API endpoint.
pub const DEFAULT_ED_BASE_URL: &str = "https://us.edstem.org/api";

/// Default title pattern: matches the "Special Participation E" thread
/// naming convention, tolerant of stray characters inside the phrase.
pub const DEFAULT_THREAD_PATTERN: &str = r"(?i)special\s+part.*n\s+e";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Ed API
    pub ed_base_url: String,
    pub ed_api_token: Option<String>,
    pub course_id: u64,

    // Collection
    pub thread_pattern: String,
    pub batch_size: usize,
    pub request_delay: Duration,

    // Files
    pub posts_path: PathBuf,
    pub template_path: PathBuf,
    pub site_output_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable holds an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Ed API
            ed_base_url: env_or_default("ED_BASE_URL", DEFAULT_ED_BASE_URL),
            ed_api_token: optional_env("ED_API_TOKEN"),
            course_id: parse_env_u64("COURSE_ID", 84647)?,

            // Collection
            thread_pattern: env_or_default("THREAD_PATTERN", DEFAULT_THREAD_PATTERN),
            batch_size: parse_env_usize("BATCH_SIZE", 50)?,
            request_delay: Duration::from_millis(parse_env_u64("REQUEST_DELAY_MS", 200)?),

            // Files
            posts_path: PathBuf::from(env_or_default("POSTS_PATH", "posts.json")),
            template_path: PathBuf::from(env_or_default("TEMPLATE_PATH", "template.html")),
            site_output_path: PathBuf::from(env_or_default("SITE_OUTPUT_PATH", "index.html")),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "BATCH_SIZE".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.ed_base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "ED_BASE_URL".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        self.compiled_thread_pattern()?;
        Ok(())
    }

    /// Compile the thread title pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regular expression.
    pub fn compiled_thread_pattern(&self) -> Result<Regex, ConfigError> {
        Regex::new(&self.thread_pattern).map_err(|e| ConfigError::InvalidValue {
            name: "THREAD_PATTERN".to_string(),
            message: e.to_string(),
        })
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            ed_base_url: DEFAULT_ED_BASE_URL.to_string(),
            ed_api_token: Some("token".to_string()),
            course_id: 84647,
            thread_pattern: DEFAULT_THREAD_PATTERN.to_string(),
            batch_size: 50,
            request_delay: Duration::from_millis(200),
            posts_path: PathBuf::from("posts.json"),
            template_path: PathBuf::from("template.html"),
            site_output_path: PathBuf::from("index.html"),
        }
    }

    #[test]
    fn test_env_defaults() {
        assert_eq!(parse_env_u64("NONEXISTENT_VAR", 42).unwrap(), 42);
        assert_eq!(env_or_default("NONEXISTENT_VAR", "fallback"), "fallback");
        assert!(optional_env("NONEXISTENT_VAR").is_none());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_batch_size() {
        let config = Config {
            batch_size: 0,
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let config = Config {
            thread_pattern: "(unclosed".to_string(),
            ..base_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_pattern_tolerates_noise() {
        let re = base_config().compiled_thread_pattern().unwrap();
        assert!(re.is_match("Special Participation E: my project"));
        assert!(re.is_match("special  partic1pation e"));
        assert!(!re.is_match("Regular homework question"));
    }
}
