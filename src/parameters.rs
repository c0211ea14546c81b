//! JSON parameter document shared with the consumption analysis step.
//!
//! Consumption inputs are read from one section; the sizing result is merged
//! back into the same document under its own section, leaving every other
//! section untouched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::SizingError;
use crate::sizing::{FeedType, SizingResult};

/// Section holding the raw consumption analysis.
pub const CONSUMPTION_SECTION: &str = "Dados_Consumo_Bruto";
/// Section the sizing result is written to.
pub const RESULT_SECTION: &str = "Dados_Solar";

const MONTHLY_AVERAGE_KEY: &str = "media_mensal";
const FEED_TYPE_KEY: &str = "padrao_alimentacao";

/// Consumption inputs for a sizing run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionConfig {
    /// Raw monthly average consumption (kWh).
    pub monthly_average_kwh: f64,
    pub feed_type: FeedType,
}

impl ConsumptionConfig {
    /// Reads consumption inputs from the parameter document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::MissingConfiguration`] if the file is absent,
    /// unreadable, not valid JSON, or lacks the required keys.
    pub fn from_file(path: &Path) -> Result<Self, SizingError> {
        let missing = |reason: String| SizingError::MissingConfiguration {
            path: path.to_path_buf(),
            reason,
        };
        let content =
            fs::read_to_string(path).map_err(|e| missing(format!("cannot read: {e}")))?;
        let document: Value =
            serde_json::from_str(&content).map_err(|e| missing(format!("invalid JSON: {e}")))?;
        Self::from_document(&document).map_err(missing)
    }

    /// Extracts consumption inputs from an already-parsed document.
    ///
    /// `padrao_alimentacao` is looked up in the consumption section first and
    /// then at the top level.
    ///
    /// # Errors
    ///
    /// Returns a description of the first missing or mistyped key.
    pub fn from_document(document: &Value) -> Result<Self, String> {
        let section = document
            .get(CONSUMPTION_SECTION)
            .and_then(Value::as_object)
            .ok_or_else(|| format!("section \"{CONSUMPTION_SECTION}\" not found"))?;

        let key = format!("{CONSUMPTION_SECTION}.{MONTHLY_AVERAGE_KEY}");
        let monthly_average_kwh = section
            .get(MONTHLY_AVERAGE_KEY)
            .ok_or_else(|| format!("\"{key}\" not found"))?
            .as_f64()
            .ok_or_else(|| format!("\"{key}\" must be a number"))?;

        let label = section
            .get(FEED_TYPE_KEY)
            .or_else(|| document.get(FEED_TYPE_KEY))
            .ok_or_else(|| format!("\"{FEED_TYPE_KEY}\" not found"))?
            .as_str()
            .ok_or_else(|| format!("\"{FEED_TYPE_KEY}\" must be a string"))?;

        Ok(Self {
            monthly_average_kwh,
            feed_type: FeedType::from_label(label),
        })
    }
}

/// Read-merge-write access to the parameter document.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    path: PathBuf,
}

impl ParameterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document as a JSON object for merging.
    ///
    /// A missing file is an empty document. Unparseable content or a non-object
    /// root is also treated as empty and will be overwritten on save.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::PersistenceFailure`] if the file exists but cannot be read.
    pub fn load(&self) -> Result<Map<String, Value>, SizingError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(SizingError::PersistenceFailure {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                warn!(
                    "Parameter document {} is not a JSON object, it will be replaced",
                    self.path.display()
                );
                Ok(Map::new())
            }
            Err(e) => {
                warn!(
                    "Parameter document {} is corrupt ({e}), it will be replaced",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }

    /// Adds or replaces `section` with `value`, keeping all other sections.
    ///
    /// The full document is serialized before the file is touched, then written
    /// to a sibling temp file and renamed over the target. On failure the
    /// previous content is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::Serialization`] or [`SizingError::PersistenceFailure`].
    pub fn save_section(&self, section: &str, value: Value) -> Result<(), SizingError> {
        let mut document = self.load()?;
        document.insert(section.to_string(), value);

        let mut json = serde_json::to_string_pretty(&Value::Object(document))?;
        json.push('\n');

        self.write_atomic(&json)?;
        info!("Saved section \"{section}\" to {}", self.path.display());
        Ok(())
    }

    /// Writes the sizing result under [`RESULT_SECTION`].
    ///
    /// # Errors
    ///
    /// Same as [`ParameterStore::save_section`].
    pub fn save_result(&self, result: &SizingResult) -> Result<(), SizingError> {
        self.save_section(RESULT_SECTION, serde_json::to_value(result)?)
    }

    fn write_atomic(&self, contents: &str) -> Result<(), SizingError> {
        let fail = |source: io::Error| SizingError::PersistenceFailure {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(fail)?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        if let Err(e) = fs::write(&temp_path, contents) {
            let _ = fs::remove_file(&temp_path);
            return Err(fail(e));
        }
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(fail(e));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn reads_consumption_with_top_level_feed_type() {
        let doc = json!({
            "Dados_Consumo_Bruto": { "media_mensal": 450.0 },
            "padrao_alimentacao": "monofasico"
        });
        let cfg = ConsumptionConfig::from_document(&doc).expect("complete document");
        assert_eq!(cfg.monthly_average_kwh, 450.0);
        assert_eq!(cfg.feed_type, FeedType::SinglePhase);
    }

    #[test]
    fn section_feed_type_takes_precedence() {
        let doc = json!({
            "Dados_Consumo_Bruto": { "media_mensal": 300, "padrao_alimentacao": "bifasico" },
            "padrao_alimentacao": "monofasico"
        });
        let cfg = ConsumptionConfig::from_document(&doc).expect("complete document");
        assert_eq!(cfg.monthly_average_kwh, 300.0);
        assert_eq!(cfg.feed_type, FeedType::TwoPhase);
    }

    #[test]
    fn missing_keys_are_reported() {
        let no_section = json!({ "padrao_alimentacao": "monofasico" });
        let err = ConsumptionConfig::from_document(&no_section).unwrap_err();
        assert!(err.contains("Dados_Consumo_Bruto"));

        let no_average = json!({ "Dados_Consumo_Bruto": {}, "padrao_alimentacao": "x" });
        let err = ConsumptionConfig::from_document(&no_average).unwrap_err();
        assert!(err.contains("media_mensal"));

        let no_feed = json!({ "Dados_Consumo_Bruto": { "media_mensal": 1.0 } });
        let err = ConsumptionConfig::from_document(&no_feed).unwrap_err();
        assert!(err.contains("padrao_alimentacao"));

        let text_average = json!({
            "Dados_Consumo_Bruto": { "media_mensal": "450" },
            "padrao_alimentacao": "monofasico"
        });
        assert!(ConsumptionConfig::from_document(&text_average).is_err());
    }

    #[test]
    fn absent_or_corrupt_file_is_missing_configuration() {
        let dir = tempdir().unwrap();
        let absent = dir.path().join("param.json");
        assert!(matches!(
            ConsumptionConfig::from_file(&absent),
            Err(SizingError::MissingConfiguration { .. })
        ));

        fs::write(&absent, "{ not json").unwrap();
        assert!(matches!(
            ConsumptionConfig::from_file(&absent),
            Err(SizingError::MissingConfiguration { .. })
        ));
    }

    #[test]
    fn save_creates_missing_document_and_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join("param.json");
        let store = ParameterStore::new(&path);

        store.save_section("Dados_Solar", json!({ "demanda": 1.5 })).unwrap();

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, json!({ "Dados_Solar": { "demanda": 1.5 } }));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn save_preserves_other_sections_and_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("param.json");
        fs::write(
            &path,
            r#"{"zeta": {"a": [1, 2, {"b": null}]}, "Dados_Solar": {"old": true}, "alpha": "x"}"#,
        )
        .unwrap();
        let store = ParameterStore::new(&path);

        store.save_section("Dados_Solar", json!({ "new": 1 })).unwrap();

        let saved = store.load().unwrap();
        let keys: Vec<&str> = saved.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "Dados_Solar", "alpha"]);
        assert_eq!(saved["zeta"], json!({"a": [1, 2, {"b": null}]}));
        assert_eq!(saved["alpha"], "x");
        assert_eq!(saved["Dados_Solar"], json!({ "new": 1 }));
    }

    #[test]
    fn corrupt_document_is_replaced_on_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("param.json");
        fs::write(&path, "[1, 2").unwrap();
        let store = ParameterStore::new(&path);

        assert!(store.load().unwrap().is_empty());
        store.save_section("Dados_Solar", json!({})).unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn failed_temp_write_leaves_document_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("param.json");
        let original = b"{\n  \"Dados_Cliente\": {\"nome\": \"x\"},\n  \"Dados_Solar\": {\"old\": 1}\n}\n";
        fs::write(&path, original).unwrap();
        // A directory squatting on the temp path makes the temp write fail.
        let temp_path = path.with_extension("json.tmp");
        fs::create_dir(&temp_path).unwrap();
        fs::write(temp_path.join("occupied"), "").unwrap();
        let store = ParameterStore::new(&path);

        let err = store.save_section("Dados_Solar", json!({ "new": 2 }));

        assert!(matches!(err, Err(SizingError::PersistenceFailure { .. })));
        assert_eq!(fs::read(&path).unwrap(), original.to_vec());
    }

    #[test]
    fn unreadable_document_fails_before_writing() {
        let dir = tempdir().unwrap();
        // The target is a directory, so it cannot be read for merging.
        let path = dir.path().join("param.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.txt"), "keep").unwrap();
        let store = ParameterStore::new(&path);

        let err = store.save_section("Dados_Solar", json!({}));
        assert!(matches!(err, Err(SizingError::PersistenceFailure { .. })));
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "keep");
        assert!(!path.with_extension("json.tmp").exists());
    }
}
