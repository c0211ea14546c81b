//! TOML run settings: where inputs live and what to write.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level run settings parsed from TOML.
///
/// All fields have defaults matching the standard project layout. Load from
/// TOML with [`RunSettings::from_toml_file`] or use [`RunSettings::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    /// Input file locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Output options.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Input file locations.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Panel catalog CSV.
    pub catalog: PathBuf,
    /// JSON parameter document (read for consumption, updated with the result).
    pub parameters: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("data/paineis.csv"),
            parameters: PathBuf::from("config/param.json"),
        }
    }
}

/// Output options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Optional CSV export of every evaluated panel option.
    pub options_csv: Option<PathBuf>,
    /// Write the result section back into the parameter document.
    pub persist: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            options_csv: None,
            persist: true,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"paths.catalog"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl RunSettings {
    /// Parses settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "settings".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the settings are valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let p = &self.paths;

        if p.catalog.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "paths.catalog".into(),
                message: "must not be empty".into(),
            });
        }
        if p.parameters.as_os_str().is_empty() {
            errors.push(ConfigError {
                field: "paths.parameters".into(),
                message: "must not be empty".into(),
            });
        }

        if let Some(out) = &self.output.options_csv {
            if out.as_os_str().is_empty() {
                errors.push(ConfigError {
                    field: "output.options_csv".into(),
                    message: "must not be empty when set".into(),
                });
            } else if out == &p.catalog || out == &p.parameters {
                errors.push(ConfigError {
                    field: "output.options_csv".into(),
                    message: "must differ from paths.catalog and paths.parameters".into(),
                });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = RunSettings::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "defaults should be valid: {errors:?}");
        assert_eq!(cfg.paths.catalog, Path::new("data/paineis.csv"));
        assert_eq!(cfg.paths.parameters, Path::new("config/param.json"));
        assert!(cfg.output.persist);
        assert!(cfg.output.options_csv.is_none());
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[paths]
catalog = "catalogs/2024.csv"
parameters = "run/param.json"

[output]
options_csv = "run/options.csv"
persist = false
"#;
        let cfg = RunSettings::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(
            cfg.as_ref().map(|c| c.paths.catalog.clone()),
            Some(PathBuf::from("catalogs/2024.csv"))
        );
        assert_eq!(cfg.as_ref().map(|c| c.output.persist), Some(false));
        assert_eq!(
            cfg.as_ref().and_then(|c| c.output.options_csv.clone()),
            Some(PathBuf::from("run/options.csv"))
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[output]
persist = false
"#;
        let cfg = RunSettings::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.output.persist), Some(false));
        assert_eq!(
            cfg.as_ref().map(|c| c.paths.parameters.clone()),
            Some(PathBuf::from("config/param.json"))
        );
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[paths]
catalog = "a.csv"
peak_sun_hours = 5.0
"#;
        assert!(RunSettings::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_catches_empty_paths() {
        let mut cfg = RunSettings::default();
        cfg.paths.catalog = PathBuf::new();
        cfg.paths.parameters = PathBuf::new();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "paths.catalog"));
        assert!(errors.iter().any(|e| e.field == "paths.parameters"));
    }

    #[test]
    fn validation_rejects_export_over_input() {
        let mut cfg = RunSettings::default();
        cfg.output.options_csv = Some(cfg.paths.catalog.clone());
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "output.options_csv"));
    }

    #[test]
    fn missing_file_is_error() {
        let err = RunSettings::from_toml_file(Path::new("/nonexistent/settings.toml"));
        assert!(err.is_err());
        assert!(err.unwrap_err().message.contains("cannot read"));
    }
}
