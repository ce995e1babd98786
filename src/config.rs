//! Engine configuration.

use crate::error::{Error, Result};
use crate::syntax::SourceLanguage;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Configuration for an [`Injector`](crate::Injector).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// File to inject properties into.
    pub configuration_file: PathBuf,
    /// Template copied to `configuration_file` when it does not exist.
    pub blank_configuration_file: PathBuf,
    /// Look through wrapper calls such as `defineConfig({ ... })`.
    #[serde(default)]
    pub allow_wrapping_call: bool,
    /// Grammar override. Inferred from the file extension when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<SourceLanguage>,
    /// Dotted property names and the values to inject, in injection order.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl EngineConfig {
    pub fn new(configuration_file: impl Into<PathBuf>, blank_configuration_file: impl Into<PathBuf>) -> Self {
        Self {
            configuration_file: configuration_file.into(),
            blank_configuration_file: blank_configuration_file.into(),
            allow_wrapping_call: false,
            language: None,
            properties: Map::new(),
        }
    }

    pub fn with_wrapping_call(mut self, allow: bool) -> Self {
        self.allow_wrapping_call = allow;
        self
    }

    pub fn with_language(mut self, language: SourceLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Append a property. Re-adding a name keeps its original position.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Grammar for `configuration_file`.
    pub fn source_language(&self) -> SourceLanguage {
        self.language
            .unwrap_or_else(|| SourceLanguage::from_path(&self.configuration_file))
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config = match ext.to_ascii_lowercase().as_str() {
            "toml" => toml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            _ => {
                return Err(Error::UnsupportedConfigFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        tracing::debug!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }
}

/// A commented starter configuration in TOML.
pub fn generate_default_config() -> String {
    r#"# confsplice engine configuration

# Build tool configuration file to edit.
configuration_file = "./next.config.js"

# Copied to configuration_file when it does not exist yet.
blank_configuration_file = "./blank.config.js"

# Look through wrapper calls such as `defineConfig({ ... })`.
allow_wrapping_call = true

# Grammar override: "javascript", "typescript" or "tsx".
# language = "typescript"

# Dotted property names and JSON values, injected in this order.
[properties]
basePath = "/docs"
"images.unoptimized" = true
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let config: EngineConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.configuration_file, PathBuf::from("./next.config.js"));
        assert!(config.allow_wrapping_call);
        assert_eq!(config.language, None);
        let names: Vec<_> = config.properties.keys().cloned().collect();
        assert_eq!(names, vec!["basePath", "images.unoptimized"]);
        assert_eq!(config.properties["images.unoptimized"], json!(true));
    }

    #[test]
    fn test_load_json_keeps_property_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(
            &path,
            r#"{
                "configuration_file": "nuxt.config.ts",
                "blank_configuration_file": "blank.ts",
                "properties": { "target": "static", "router.base": "/docs/", "app": { "x": 1 } }
            }"#,
        )
        .unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert!(!config.allow_wrapping_call);
        assert_eq!(config.source_language(), SourceLanguage::TypeScript);
        let names: Vec<_> = config.properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["target", "router.base", "app"]);
    }

    #[test]
    fn test_load_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engine.yaml");
        std::fs::write(&path, "configuration_file: x").unwrap();
        assert!(matches!(
            EngineConfig::load(&path),
            Err(Error::UnsupportedConfigFormat { .. })
        ));
    }

    #[test]
    fn test_language_override() {
        let config = EngineConfig::new("app.config.js", "blank.js")
            .with_language(SourceLanguage::TypeScript)
            .with_property("a", 1);
        assert_eq!(config.source_language(), SourceLanguage::TypeScript);
        assert_eq!(config.properties["a"], json!(1));
    }
}
