//! CLI argument parsing and helpers shared with the binary.

use crate::config::EngineConfig;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File extensions the engine is known to handle.
pub const SUPPORTED_FILE_EXTENSIONS: &[&str] = &[".js", ".cjs", ".mjs", ".ts", ".mts", ".cts"];

/// Inject properties into JavaScript/TypeScript build tool configuration files
#[derive(Parser, Debug)]
#[command(name = "confsplice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inject properties into a configuration file
    ///
    /// Examples:
    ///   confsplice inject --file next.config.js --blank blank.js --set basePath=/docs
    ///   confsplice inject --config engine.toml --set images.unoptimized=true
    Inject {
        /// Engine configuration file (.toml or .json)
        #[arg(short, long, env = "CONFSPLICE_CONFIG")]
        config: Option<PathBuf>,

        /// Configuration file to edit
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Template copied to the configuration file when it is missing
        #[arg(short, long)]
        blank: Option<PathBuf>,

        /// Look through wrapper calls such as defineConfig({ ... })
        #[arg(long)]
        allow_wrapping_call: bool,

        /// Grammar override (javascript, typescript, tsx)
        #[arg(long)]
        language: Option<String>,

        /// Property to inject as name=value; value is JSON or a plain string
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },

    /// Show which export shape exposes the configuration object
    Locate {
        /// Configuration file to inspect
        file: PathBuf,

        #[arg(long)]
        allow_wrapping_call: bool,

        #[arg(long)]
        language: Option<String>,
    },

    /// Print the source text of a property
    Get {
        /// Configuration file to inspect
        file: PathBuf,

        /// Dotted property name
        property: String,

        #[arg(long)]
        allow_wrapping_call: bool,

        #[arg(long)]
        language: Option<String>,
    },

    /// Write a starter engine configuration
    Init {
        /// Output path
        #[arg(short, long, default_value = "confsplice.toml")]
        output: PathBuf,
    },
}

/// Split `name=value`. The value is parsed as JSON, or kept as a string.
pub fn parse_assignment(arg: &str) -> Result<(String, Value), String> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("Expected NAME=VALUE, got: {}", arg))?;

    // Whitespace around each segment is dropped: `a. b` names `a.b`.
    let segments: Vec<&str> = name.split('.').map(str::trim).collect();
    if segments.iter().any(|s| s.is_empty() || s.contains(char::is_whitespace)) {
        return Err(format!("Invalid property name: {:?}", name.trim()));
    }

    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((segments.join("."), value))
}

pub fn is_supported_extension(path: &Path) -> bool {
    let name = path.to_string_lossy();
    SUPPORTED_FILE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Warning emitted when a property could not be injected.
pub fn injection_warning(config: &EngineConfig) -> String {
    let intended = config
        .properties
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(", ");

    if !is_supported_extension(&config.configuration_file) {
        format!(
            "Unsupported configuration file extension for {}. Currently supported extensions: {}. \
            Please set {} by hand.",
            config.configuration_file.display(),
            SUPPORTED_FILE_EXTENSIONS
                .iter()
                .map(|ext| format!("{:?}", ext))
                .collect::<Vec<_>>()
                .join(", "),
            intended
        )
    } else {
        format!(
            "Unable to determine how to inject the configuration into {}. \
            Generated URLs may be incorrect. Please set {} by hand.",
            config.configuration_file.display(),
            intended
        )
    }
}
