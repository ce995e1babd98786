//! Injection engine.
//!
//! Each injection is a full parse → locate → resolve → splice cycle over the
//! current text. Byte ranges are invalidated by every edit, so no syntax node
//! outlives the step that produced it.

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::locator::locate;
use crate::resolver::{resolve, PropertyPath};
use crate::source;
use crate::splice;
use crate::syntax::{self, SourceLanguage, IN_MEMORY};
use serde_json::Value;
use std::path::PathBuf;

/// Set `property` (a dotted name) to `value` in the configuration object of
/// `source` and return the edited text.
pub fn inject_source(
    source: &str,
    language: SourceLanguage,
    allow_wrapping_call: bool,
    property: &str,
    value: &Value,
) -> Result<String> {
    let tree = syntax::parse(source, language)?;
    let located = locate(tree.root_node(), source, allow_wrapping_call).ok_or_else(|| {
        Error::ConfigurationNotFound {
            path: PathBuf::from(IN_MEMORY),
        }
    })?;

    let path = PropertyPath::parse(property);
    let resolution = resolve(located.node, source, path.segments());
    let edit = splice::plan(&resolution, value)?;
    let updated = edit.apply(source);

    // The edited text must stay parseable for the next step.
    syntax::parse(&updated, language)?;
    Ok(updated)
}

/// Source text of `property` if every segment resolves.
pub fn property_source(
    source: &str,
    language: SourceLanguage,
    allow_wrapping_call: bool,
    property: &str,
) -> Result<Option<String>> {
    let tree = syntax::parse(source, language)?;
    let located = locate(tree.root_node(), source, allow_wrapping_call).ok_or_else(|| {
        Error::ConfigurationNotFound {
            path: PathBuf::from(IN_MEMORY),
        }
    })?;

    let path = PropertyPath::parse(property);
    let resolution = resolve(located.node, source, path.segments());
    Ok(resolution
        .is_complete()
        .then(|| syntax::text(resolution.node, source).to_string()))
}

/// Injects properties into one configuration file.
///
/// Not safe to share a file between two injectors: the last write wins.
#[derive(Debug)]
pub struct Injector {
    config: EngineConfig,
    language: SourceLanguage,
    source: String,
}

impl Injector {
    /// Load the configuration file, creating it from the blank template when
    /// it does not exist.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let source = source::load_or_create(
            &config.configuration_file,
            &config.blank_configuration_file,
        )?;
        let language = config.source_language();

        Ok(Self {
            config,
            language,
            source,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current text of the configuration file.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Set a single property and rewrite the file.
    ///
    /// On failure neither the file nor the in-memory text is changed.
    pub fn inject(&mut self, property: &str, value: &Value) -> Result<()> {
        let path = &self.config.configuration_file;
        tracing::info!(
            "Injecting {}={} into {}",
            property,
            value,
            path.display()
        );

        let updated = inject_source(
            &self.source,
            self.language,
            self.config.allow_wrapping_call,
            property,
            value,
        )
        .map_err(|e| e.with_path(path))?;

        source::persist(path, &updated)?;
        tracing::debug!("New content of {}:\n{}", path.display(), updated);
        self.source = updated;
        Ok(())
    }

    /// Inject every configured property in order. Stops at the first failure.
    pub fn inject_all(&mut self) -> Result<()> {
        let properties = self.config.properties.clone();
        for (property, value) in &properties {
            self.inject(property, value)?;
        }
        Ok(())
    }
}
