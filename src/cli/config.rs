use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::device::controller::DeviceSettings;
use crate::device::input::DEFAULT_LONG_PRESS_MS;
use crate::elements::element_model::ExtractConfig;

pub const DEFAULT_CONFIG_PATH: &str = "android-automation.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "android-automation",
    version,
    about = "Capture Android screens and drive input through adb"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: android-automation.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Path to the adb binary
    #[arg(long, global = true)]
    pub adb: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List attached devices
    Devices,

    /// Capture a screenshot and UI dump, then extract interactable elements
    Capture {
        /// Device serial (from `devices`)
        #[arg(short, long)]
        device: String,

        /// File name prefix for the pulled screenshot and XML
        #[arg(long, default_value = "screen")]
        prefix: String,

        /// Local directory the captures are pulled into
        #[arg(short, long, default_value = "captures")]
        output_dir: String,

        /// Boolean node attribute to extract (repeatable, in priority order)
        #[arg(long = "attr")]
        attributes: Vec<String>,

        /// Append each node's sibling index to its identifier
        #[arg(long)]
        add_index: bool,

        /// Dedup radius in pixels
        #[arg(long)]
        min_dist: Option<u32>,
    },

    /// Extract elements from an existing UI dump file
    Extract {
        /// Path to a uiautomator XML dump
        #[arg(long)]
        xml: String,

        /// Boolean node attribute to extract (repeatable, in priority order)
        #[arg(long = "attr")]
        attributes: Vec<String>,

        /// Append each node's sibling index to its identifier
        #[arg(long)]
        add_index: bool,

        /// Dedup radius in pixels
        #[arg(long)]
        min_dist: Option<u32>,
    },

    /// Tap the center of bounds "[x1,y1][x2,y2]" or a normalized point "x,y"
    Tap {
        #[arg(short, long)]
        device: String,

        #[arg(long)]
        target: String,
    },

    /// Long-press a target
    LongPress {
        #[arg(short, long)]
        device: String,

        #[arg(long)]
        target: String,

        /// Press duration in milliseconds
        #[arg(long, default_value_t = DEFAULT_LONG_PRESS_MS)]
        duration: u64,
    },

    /// Swipe starting from a target
    Swipe {
        #[arg(short, long)]
        device: String,

        #[arg(long)]
        target: String,

        /// up, down, left or right
        #[arg(long)]
        direction: String,

        /// short, medium or long
        #[arg(long, default_value = "short")]
        distance: String,

        /// Use a fast fling instead of a drag
        #[arg(long)]
        quick: bool,
    },

    /// Type text into the focused field
    Text {
        #[arg(short, long)]
        device: String,

        #[arg(long)]
        text: String,
    },

    /// Press the back key
    Back {
        #[arg(short, long)]
        device: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `android-automation.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub device: DeviceSettings,
    #[serde(default)]
    pub extract: ExtractConfig,
    /// JSONL file that every controller action is appended to
    #[serde(default)]
    pub trace_file: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("ignoring malformed config '{}': {}", config_path, e);
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Build the extraction config: CLI flags override the file, which overrides defaults.
pub fn build_extract_config(
    config: &ExtractConfig,
    attributes: &[String],
    add_index: bool,
    min_dist: Option<u32>,
) -> ExtractConfig {
    ExtractConfig {
        min_dist: min_dist.unwrap_or(config.min_dist),
        attributes: if attributes.is_empty() {
            config.attributes.clone()
        } else {
            attributes.to_vec()
        },
        add_index: add_index || config.add_index,
    }
}

pub fn build_device_settings(config: &DeviceSettings, adb: Option<&str>) -> DeviceSettings {
    DeviceSettings {
        adb_path: adb.map(str::to_string).unwrap_or_else(|| config.adb_path.clone()),
        ..config.clone()
    }
}

/// Map `-v` occurrences to a default tracing level.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
