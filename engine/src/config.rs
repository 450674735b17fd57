use chrono::NaiveDate;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

use crate::merger::CarryForward;
use crate::model::TermField;
use crate::validator::ValidationOptions;

/// Batch configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with CL_ prefix (always wins)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub validate: ValidateConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Directory holding the canonical YAML collections.
    #[serde(default = "default_data_dir")]
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MergeConfig {
    /// Term fields carried into a reelection term for the same seat.
    /// Accepts either an array or comma-separated string.
    #[serde(
        default = "default_reelection_fields",
        deserialize_with = "deserialize_field_names"
    )]
    pub reelection_fields: Vec<String>,

    /// Term fields carried across continuous service in the same chamber.
    #[serde(
        default = "default_continuing_fields",
        deserialize_with = "deserialize_field_names"
    )]
    pub continuing_fields: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ValidateConfig {
    /// Reference date for "today". Defaults to the local date at run time.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,

    /// Warn when a current legislator has no birthday.
    #[serde(default = "default_true")]
    pub warn_missing_birthday: bool,

    /// Warn when a current legislator's term has no website.
    #[serde(default = "default_true")]
    pub warn_missing_url: bool,
}

/// Deserialize field names from comma-separated string or array, filtering empty values.
fn deserialize_field_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(names
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn default_data_dir() -> String {
    ".".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reelection_fields() -> Vec<String> {
    vec!["url".into(), "rss_url".into()]
}

fn default_continuing_fields() -> Vec<String> {
    vec!["office".into(), "phone".into(), "address".into()]
}

#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            reelection_fields: default_reelection_fields(),
            continuing_fields: default_continuing_fields(),
        }
    }
}

impl Default for ValidateConfig {
    fn default() -> Self {
        Self {
            as_of: None,
            warn_missing_birthday: default_true(),
            warn_missing_url: default_true(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn parse_fields(key: &str, names: &[String]) -> Result<Vec<TermField>, ConfigError> {
    names
        .iter()
        .map(|name| {
            name.parse::<TermField>().map_err(|e| {
                ConfigError::Validation(format!("merge.{key}: {e}"))
            })
        })
        .collect()
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with CL_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("CL_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "data.dir cannot be empty. Set CL_DATA__DIR or configure in config.yaml.".into(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("logging.level cannot be empty".into()));
        }

        self.carry_forward()?;
        Ok(())
    }

    /// The declared carry-forward field lists.
    ///
    /// # Errors
    /// Returns a validation error naming the first unknown field.
    pub fn carry_forward(&self) -> Result<CarryForward, ConfigError> {
        Ok(CarryForward {
            reelection: parse_fields("reelection_fields", &self.merge.reelection_fields)?,
            continuing: parse_fields("continuing_fields", &self.merge.continuing_fields)?,
        })
    }

    /// Validator options, with `as_of` resolved against `today` when unset.
    #[must_use]
    pub fn validation_options(&self, today: NaiveDate) -> ValidationOptions {
        ValidationOptions {
            as_of: self.validate.as_of.unwrap_or(today),
            warn_missing_birthday: self.validate.warn_missing_birthday,
            warn_missing_url: self.validate.warn_missing_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data.dir, ".");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.merge.reelection_fields, vec!["url", "rss_url"]);
        assert_eq!(config.merge.continuing_fields, vec!["office", "phone", "address"]);
        assert!(config.validate.as_of.is_none());
        assert!(config.validate.warn_missing_birthday);
        assert!(config.validate.warn_missing_url);
    }

    #[test]
    fn test_validation_accepts_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_default_carry_forward_matches_merger_default() {
        let carry = Config::default().carry_forward().expect("default fields parse");
        assert_eq!(carry, CarryForward::default());
    }

    #[test]
    fn test_validation_rejects_unknown_field() {
        let mut config = Config::default();
        config.merge.continuing_fields = vec!["office".into(), "birthday".into()];
        let result = config.validate();
        assert!(result.is_err());
        let message = result.expect_err("should fail").to_string();
        assert!(message.contains("merge.continuing_fields"));
        assert!(message.contains("birthday"));
    }

    #[test]
    fn test_fields_deserialize_comma_separated_string() {
        let json = r#"{"reelection_fields": "url, rss_url,contact_form"}"#;
        let config: MergeConfig = serde_json::from_str(json).expect("should parse");
        assert_eq!(config.reelection_fields, vec!["url", "rss_url", "contact_form"]);
        assert_eq!(config.continuing_fields, default_continuing_fields());
    }

    #[test]
    fn test_fields_deserialize_empty_string() {
        let json = r#"{"continuing_fields": ""}"#;
        let config: MergeConfig = serde_json::from_str(json).expect("should parse");
        assert!(config.continuing_fields.is_empty());
    }

    #[test]
    fn test_validation_options_resolve_as_of() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).expect("date");
        let mut config = Config::default();
        assert_eq!(config.validation_options(today).as_of, today);

        let pinned = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        config.validate.as_of = Some(pinned);
        config.validate.warn_missing_url = false;
        let options = config.validation_options(today);
        assert_eq!(options.as_of, pinned);
        assert!(!options.warn_missing_url);
    }

    #[test]
    fn test_yaml_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                "data:\n  dir: /srv/congress\nmerge:\n  reelection_fields: [url]\nvalidate:\n  as_of: 2025-01-03\n",
            )?;
            jail.set_env("CL_LOGGING__LEVEL", "debug");
            jail.set_env("CL_DATA__DIR", "/tmp/override");

            let config = Config::load().map_err(|e| e.to_string())?;
            assert_eq!(config.data.dir, "/tmp/override");
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.merge.reelection_fields, vec!["url"]);
            assert_eq!(config.validate.as_of, NaiveDate::from_ymd_opt(2025, 1, 3));
            Ok(())
        });
    }

    #[test]
    fn test_env_comma_separated_fields() {
        Jail::expect_with(|jail| {
            jail.set_env("CL_MERGE__CONTINUING_FIELDS", "office,fax");
            let config = Config::load_from("missing.yaml").map_err(|e| e.to_string())?;
            let carry = config.carry_forward().map_err(|e| e.to_string())?;
            assert_eq!(carry.continuing, vec![TermField::Office, TermField::Fax]);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_unknown_env_field() {
        Jail::expect_with(|jail| {
            jail.set_env("CL_MERGE__REELECTION_FIELDS", "url,nonsense");
            let result = Config::load();
            assert!(matches!(result, Err(ConfigError::Validation(_))));
            Ok(())
        });
    }

    // Table-driven boundary tests for validation rules

    #[test]
    fn data_dir_boundaries() {
        let cases = [
            ("", false, "empty"),
            ("   ", false, "whitespace only"),
            (".", true, "current directory"),
            ("/srv/congress-legislators", true, "absolute path"),
        ];

        for (dir, should_pass, desc) in cases {
            let mut config = Config::default();
            config.data.dir = dir.into();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }

    #[test]
    fn carry_forward_field_boundaries() {
        let cases = [
            (vec![], true, "empty list"),
            (vec!["url"], true, "single field"),
            (vec!["contact_form", "caucus"], true, "less common fields"),
            (vec!["URL"], false, "wrong case"),
            (vec!["state"], false, "seat field"),
        ];

        for (fields, should_pass, desc) in cases {
            let mut config = Config::default();
            config.merge.reelection_fields = fields.into_iter().map(String::from).collect();
            let result = config.validate();
            assert_eq!(result.is_ok(), should_pass, "case '{}': {:?}", desc, result);
        }
    }
}
