//! CLI entry point for confsplice.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use confsplice::{
    cli::{injection_warning, parse_assignment, Cli, Commands},
    generate_default_config, locate, property_source, syntax, EngineConfig, Injector,
    SourceLanguage,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Inject {
            config,
            file,
            blank,
            allow_wrapping_call,
            language,
            set,
        } => {
            let mut engine_config = match (config, file) {
                (Some(path), file) => {
                    let mut loaded = EngineConfig::load(&path)?;
                    if let Some(file) = file {
                        loaded.configuration_file = file;
                    }
                    loaded
                }
                (None, Some(file)) => {
                    let blank = blank
                        .clone()
                        .ok_or_else(|| anyhow::anyhow!("--blank is required without --config"))?;
                    EngineConfig::new(file, blank)
                }
                (None, None) => {
                    return Err(anyhow::anyhow!("Specify --config or --file"));
                }
            };

            if let Some(blank) = blank {
                engine_config.blank_configuration_file = blank;
            }
            if allow_wrapping_call {
                engine_config.allow_wrapping_call = true;
            }
            if let Some(language) = parse_language(language.as_deref())? {
                engine_config.language = Some(language);
            }
            for arg in &set {
                let (name, value) = parse_assignment(arg).map_err(|e| anyhow::anyhow!(e))?;
                engine_config.properties.insert(name, value);
            }

            if engine_config.properties.is_empty() {
                eprintln!("{}", "No properties to inject.".yellow());
                return Ok(());
            }

            // Injection failures are reported as warnings, not errors.
            let result = Injector::new(engine_config.clone()).and_then(|mut injector| injector.inject_all());
            match result {
                Ok(()) => {
                    println!(
                        "{}",
                        format!(
                            "Injected {} propert{} into {}",
                            engine_config.properties.len(),
                            if engine_config.properties.len() == 1 { "y" } else { "ies" },
                            engine_config.configuration_file.display()
                        )
                        .green()
                    );
                }
                Err(e) => {
                    tracing::warn!("{} ({})", injection_warning(&engine_config), e);
                }
            }
        }

        Commands::Locate {
            file,
            allow_wrapping_call,
            language,
        } => {
            let (source, language) = read_source(&file, language.as_deref())?;
            let tree = syntax::parse(&source, language).map_err(|e| e.with_path(&file))?;

            match locate(tree.root_node(), &source, allow_wrapping_call) {
                Some(found) => {
                    let position = found.node.start_position();
                    println!("{}", format!("Idiom: {}", found.idiom).bold());
                    println!(
                        "Object: bytes {:?}, line {}, column {}",
                        found.node.byte_range(),
                        position.row + 1,
                        position.column + 1
                    );
                }
                None => {
                    eprintln!(
                        "{}",
                        format!("No configuration object found in {}", file.display()).yellow()
                    );
                    std::process::exit(1);
                }
            }
        }

        Commands::Get {
            file,
            property,
            allow_wrapping_call,
            language,
        } => {
            let (source, language) = read_source(&file, language.as_deref())?;
            let value = property_source(&source, language, allow_wrapping_call, &property)
                .map_err(|e| e.with_path(&file))?;

            match value {
                Some(text) => println!("{}", text),
                None => {
                    eprintln!("{}", format!("Property not set: {}", property).yellow());
                    std::process::exit(1);
                }
            }
        }

        Commands::Init { output } => {
            if output.exists() {
                eprintln!(
                    "{}",
                    format!("Config file already exists: {}", output.display()).yellow()
                );
                eprintln!("Use a different path or remove the existing file.");
                std::process::exit(1);
            }

            std::fs::write(&output, generate_default_config())?;
            println!(
                "{}",
                format!("Created config file: {}", output.display()).green()
            );
        }
    }

    Ok(())
}

fn parse_language(language: Option<&str>) -> Result<Option<SourceLanguage>> {
    language
        .map(|l| l.parse())
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))
}

fn read_source(file: &Path, language: Option<&str>) -> Result<(String, SourceLanguage)> {
    let source = std::fs::read_to_string(file)
        .map_err(|e| confsplice::Error::io(PathBuf::from(file), e))?;
    let language = parse_language(language)?.unwrap_or_else(|| SourceLanguage::from_path(file));
    Ok((source, language))
}
