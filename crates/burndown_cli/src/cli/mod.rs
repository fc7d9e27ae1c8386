use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the workspace snapshot file
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Team-wide burndown series
    ///
    /// Example: burndown team
    Team,
    /// Personal burndown series for one member
    ///
    /// Example: burndown personal ana@example.com
    /// Falls back to the default_member config value when EMAIL is omitted.
    Personal {
        #[arg(value_name = "EMAIL")]
        member: Option<String>,
    },
    /// Completed-points summary per member
    ///
    /// Example: burndown summary
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Interpolation,
    DefaultMember,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let canonical_key = canonicalize_flag_name(key_raw)
        .ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_key.as_str() {
        "interpolation" => ConfigOverrideTarget::Interpolation,
        "default_member" | "member" => ConfigOverrideTarget::DefaultMember,
        other => return Err(format!("unknown config field '{other}'")),
    };

    Ok(ParsedConfigOverride { target, value })
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
