//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use anota_core::models::config::AnotaConfig;
use anota_core::PhraseInterpreter;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "interpreter.utc_offset_minutes")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value, parsed as JSON when possible
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(super::default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn read_or_default(path: &Path) -> anyhow::Result<AnotaConfig> {
    if path.exists() {
        Ok(AnotaConfig::from_file(path)?)
    } else {
        Ok(AnotaConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = read_or_default(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, path: PathBuf) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or(path);

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    AnotaConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(read_or_default(path)?)?;

    let value = lookup(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let config = read_or_default(path)?;

    let parsed_value: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;
    let (parent_key, field) = match key.rsplit_once('.') {
        Some((parent, field)) => (Some(parent), field),
        None => (None, key),
    };

    let parent = match parent_key {
        Some(parent_key) => parent_key
            .split('.')
            .try_fold(&mut json, |current, part| current.get_mut(part))
            .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?,
        None => &mut json,
    };
    let object = parent
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;
    if !object.contains_key(field) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    object.insert(field.to_string(), parsed_value.clone());

    let config: AnotaConfig = serde_json::from_value(json)?;
    // Reject values the interpreter cannot start with, e.g. an unreadable vocabulary.
    PhraseInterpreter::from_config(&config.interpreter)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed_value)?
    );

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'anota config init' to create a configuration file.");
    }

    Ok(())
}
