use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::batch::batch::BatchConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "screen-locator",
    version,
    about = "Derive element locators and screen fingerprints from UI tree snapshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: screen-locator.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a locator (or fingerprint) for each snapshot
    Locate {
        /// Snapshot files or directories; prefix a path with '!' to force fingerprinting
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print occurrence counts per distinct locator instead of the locators
        #[arg(long)]
        counting: bool,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the structural fingerprint of one snapshot
    Fingerprint {
        /// Snapshot file
        path: String,
    },

    /// List blocklisted views present in one snapshot
    Check {
        /// Snapshot file
        path: String,

        /// Blocklist JSON, or @FILE to read it from a file
        #[arg(long)]
        blocklist: Option<String>,
    },

    /// Flag the element with the given provenance hash
    Mark {
        /// Snapshot file
        path: String,

        /// Provenance hash of the element to flag
        #[arg(long)]
        hash: i64,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `screen-locator.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Blocklist JSON, or @FILE
    pub blocklist: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("screen-locator.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file and environment)
// ============================================================================

/// Resolve batch options: CLI flag > config file > `COUNTING` env > default.
pub fn build_batch_config(cli_counting: bool, config: &AppConfig) -> BatchConfig {
    BatchConfig {
        counting: cli_counting
            || config.batch.counting
            || std::env::var_os("COUNTING").is_some(),
    }
}

/// Resolve the blocklist source: CLI > config file > `XPATH_BLKLST` env.
pub fn resolve_blocklist_source(cli_blocklist: Option<&str>, config: &AppConfig) -> Option<String> {
    cli_blocklist
        .map(str::to_string)
        .or_else(|| config.check.blocklist.clone())
        .or_else(|| std::env::var("XPATH_BLKLST").ok())
}
