use crate::measure::CellFont;
use crate::wrap::{Strategy, WrapOptions, DEFAULT_ELLIPSIS};
use clap::Parser;
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use thiserror::Error;

// Using constants for default values makes them easy to change.
const DEFAULT_MAX_WIDTH: u32 = 40;
const DEFAULT_MAX_ROWS: usize = 3;
const DEFAULT_CELL_WIDTH: u32 = 1;
const DEFAULT_CELL_HEIGHT: u32 = 1;
const DEFAULT_LINE_SPACING: u32 = 0;
const DEFAULT_CENTER: bool = false;
const DEFAULT_NON_BREAKING_SPACES: bool = false;

const ENV_PREFIX: &str = "WRAP_LABEL";
const CONFIG_FILE_NAME: &str = "config.toml";

// Define potential errors during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Serde struct for deserializing config file values.
// Optional fields allow for layered config (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)] // Use Default trait for missing fields
struct FileConfig {
    max_width: Option<u32>,
    max_rows: Option<usize>,
    cell_width: Option<u32>,
    cell_height: Option<u32>,
    line_spacing: Option<u32>,
    center: Option<bool>,
    ellipsis: Option<String>,
    non_breaking_spaces: Option<bool>,
    strategy: Option<Strategy>,
    timeout_ms: Option<u64>,
}

// Final Config struct, combining all sources.
// Fields are non-optional as they will always have a value (default or overridden).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub max_width: u32,
    pub max_rows: usize,
    pub cell_width: u32,
    pub cell_height: u32,
    pub line_spacing: u32,
    pub center: bool,
    pub ellipsis: String,
    pub non_breaking_spaces: bool,
    pub strategy: Strategy,
    pub timeout_ms: Option<u64>, // No timeout unless asked for
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            max_width: DEFAULT_MAX_WIDTH,
            max_rows: DEFAULT_MAX_ROWS,
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            line_spacing: DEFAULT_LINE_SPACING,
            center: DEFAULT_CENTER,
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            non_breaking_spaces: DEFAULT_NON_BREAKING_SPACES,
            strategy: Strategy::default(),
            timeout_ms: None,
        }
    }
}

impl AppConfig {
    pub fn font(&self) -> CellFont {
        CellFont::new(self.cell_width, self.cell_height)
    }

    pub fn wrap_options(&self) -> WrapOptions {
        let options = WrapOptions::default()
            .centered(self.center)
            .line_spacing(self.line_spacing)
            .ellipsis(self.ellipsis.clone())
            .non_breaking_spaces(self.non_breaking_spaces)
            .strategy(self.strategy);

        match self.timeout_ms {
            Some(ms) => options.timeout(Duration::from_millis(ms)),
            None => options,
        }
    }
}

// Command line arguments defined using clap.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Wrap a label into the fewest rows that fit", long_about = None)]
pub struct CliArgs {
    /// Text of the label (words are joined with single spaces)
    pub text: Vec<String>,

    /// Path to a custom configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Open an interactive preview instead of printing
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub debug_config: bool,

    /// Log the wrapping search to stderr
    #[arg(short, long)]
    pub verbose: bool,

    // --- Layered settings ---
    /// Available width, in pixels (cells when the cell width is 1)
    #[arg(long)]
    pub max_width: Option<u32>,
    #[arg(long)]
    pub max_rows: Option<usize>,
    #[arg(long)]
    pub cell_width: Option<u32>,
    #[arg(long)]
    pub cell_height: Option<u32>,
    #[arg(long)]
    pub line_spacing: Option<u32>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub center: Option<bool>,
    #[arg(long)]
    pub ellipsis: Option<String>,
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub non_breaking_spaces: Option<bool>,
    #[arg(long, value_enum)]
    pub strategy: Option<Strategy>,
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl CliArgs {
    /// The label text, or `None` when no words were given.
    pub fn label_text(&self) -> Option<String> {
        if self.text.is_empty() {
            None
        } else {
            Some(self.text.join(" "))
        }
    }
}

// Function to load configuration from all sources.
pub fn load_config(args: &CliArgs) -> Result<AppConfig, ConfigError> {
    // Build environment source separately
    let env_source = Environment::with_prefix(ENV_PREFIX).try_parsing(true);
    // Collect environment settings into a map. Missing env vars are fine.
    let env_map: Map<String, Value> = env_source.collect()?;

    build_config_from_args(args, Some(env_map))
}

/// Default location of the config file, e.g. `~/.config/wrap-label/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "wrap-label").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

// Separate function to allow testing with specific args and override sources
fn build_config_from_args(
    args: &CliArgs,
    override_source: Option<Map<String, Value>>,
) -> Result<AppConfig, ConfigError> {
    // 1. Determine config file path
    let config_file_path = args.config.clone().or_else(default_config_path);

    // 2. Build configuration source using the `config` crate
    let mut config_builder = ConfigCrate::builder();

    // Layer on config file if path is determined and file exists
    if let Some(ref path) = config_file_path {
        let required = args.config.is_some();
        config_builder = config_builder.add_source(File::from(path.clone()).required(required));
    }

    // Layer on the provided override source (e.g., environment or test map)
    // with higher priority than the file source.
    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            config_builder = config_builder.set_override(&key, value)?;
        }
    }

    let loaded_sources: FileConfig = config_builder.build()?.try_deserialize()?;

    // 3. Layer the configurations: args > overrides > file > defaults
    let config = AppConfig {
        max_width: args
            .max_width
            .or(loaded_sources.max_width)
            .unwrap_or(DEFAULT_MAX_WIDTH),
        max_rows: args
            .max_rows
            .or(loaded_sources.max_rows)
            .unwrap_or(DEFAULT_MAX_ROWS),
        cell_width: args
            .cell_width
            .or(loaded_sources.cell_width)
            .unwrap_or(DEFAULT_CELL_WIDTH),
        cell_height: args
            .cell_height
            .or(loaded_sources.cell_height)
            .unwrap_or(DEFAULT_CELL_HEIGHT),
        line_spacing: args
            .line_spacing
            .or(loaded_sources.line_spacing)
            .unwrap_or(DEFAULT_LINE_SPACING),
        center: args
            .center
            .or(loaded_sources.center)
            .unwrap_or(DEFAULT_CENTER),
        ellipsis: args
            .ellipsis
            .clone()
            .or(loaded_sources.ellipsis)
            .unwrap_or_else(|| DEFAULT_ELLIPSIS.to_string()),
        non_breaking_spaces: args
            .non_breaking_spaces
            .or(loaded_sources.non_breaking_spaces)
            .unwrap_or(DEFAULT_NON_BREAKING_SPACES),
        strategy: args
            .strategy
            .or(loaded_sources.strategy)
            .unwrap_or_default(),
        timeout_ms: args.timeout_ms.or(loaded_sources.timeout_ms),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Validates the loaded configuration for values the wrapping search rejects.
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.max_width == 0 {
        return Err(ConfigError::ValidationError(
            "max_width must be at least 1".to_string(),
        ));
    }
    if config.max_rows == 0 {
        return Err(ConfigError::ValidationError(
            "max_rows must be at least 1".to_string(),
        ));
    }
    if config.cell_width == 0 || config.cell_height == 0 {
        return Err(ConfigError::ValidationError(
            "cell_width and cell_height must be at least 1".to_string(),
        ));
    }
    if config.ellipsis.is_empty() {
        return Err(ConfigError::ValidationError(
            "ellipsis must not be empty".to_string(),
        ));
    }

    Ok(())
}
