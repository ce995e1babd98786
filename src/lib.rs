//! confsplice: inject properties into JavaScript-family build tool
//! configuration files.
//!
//! The configuration object is found by matching the module against a fixed
//! set of export shapes (`export default { ... }`, `module.exports =
//! defineConfig({ ... })`, ...). Properties are then written with the
//! smallest possible text edit, so comments and formatting elsewhere in the
//! file are left untouched.
//!
//! ```no_run
//! use confsplice::{EngineConfig, Injector};
//!
//! let config = EngineConfig::new("next.config.js", "blank/next.js")
//!     .with_property("basePath", "/docs")
//!     .with_property("images.unoptimized", true);
//!
//! let mut injector = Injector::new(config)?;
//! injector.inject_all()?;
//! # Ok::<(), confsplice::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod locator;
pub mod resolver;
pub mod source;
pub mod splice;
pub mod syntax;

pub use config::{generate_default_config, EngineConfig};
pub use engine::{inject_source, property_source, Injector};
pub use error::{Error, Result};
pub use locator::{locate, ExportConvention, ExportIdiom, Located};
pub use resolver::{resolve, PropertyPath, Resolution};
pub use splice::Splice;
pub use syntax::SourceLanguage;
