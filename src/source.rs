//! Source loading and persistence.

use crate::error::{Error, Result};
use std::path::Path;

/// Read `target`, creating it from `blank` first if it does not exist.
///
/// The blank template is copied byte for byte.
pub fn load_or_create(target: &Path, blank: &Path) -> Result<String> {
    if !target.exists() {
        tracing::info!(
            "{} does not exist, creating it from {}",
            target.display(),
            blank.display()
        );
        let template = std::fs::read(blank).map_err(|e| Error::io(blank, e))?;
        std::fs::write(target, template).map_err(|e| Error::io(target, e))?;
    }

    std::fs::read_to_string(target).map_err(|e| Error::io(target, e))
}

/// Overwrite `target` with `content`.
pub fn persist(target: &Path, content: &str) -> Result<()> {
    std::fs::write(target, content).map_err(|e| Error::io(target, e))
}
