//! Configuration module for `campus-graph`

use crate::core::layout::SpringParams;
use crate::core::render::{RenderOptions, MAX_DPI};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the configuration directory in path values
const DIR_VARIABLE: &str = "$CAMPUS_GRAPH";

const fn default_dpi() -> u32 {
    crate::core::render::DEFAULT_DPI
}

const fn default_spring_k() -> f64 {
    2.0
}

const fn default_iterations() -> usize {
    50
}

const fn default_seed() -> u64 {
    42
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path; empty disables file logging
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Input and output locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Graph JSON read when no file is given on the command line
    #[serde(default)]
    pub input: String,
    /// Directory the PNG files are written to
    #[serde(default)]
    pub output_dir: String,
    /// File name of the simple rendering
    #[serde(default)]
    pub simple_image: String,
    /// File name of the detailed rendering
    #[serde(default)]
    pub detailed_image: String,
}

/// Rendering settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Output resolution in pixels per inch
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// TrueType font for labels; empty searches system locations
    #[serde(default)]
    pub font: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            font: String::new(),
        }
    }
}

/// Spring layout settings, used when nodes lack coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Optimal distance between nodes
    #[serde(default = "default_spring_k")]
    pub spring_k: f64,
    /// Simulation steps
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Seed for the initial positions
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            spring_k: default_spring_k(),
            iterations: default_iterations(),
            seed: default_seed(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Render settings
    #[serde(default)]
    pub render: RenderConfig,
    /// Layout settings
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override image output directory
    pub output_dir: Option<String>,
    /// Override output resolution
    pub dpi: Option<u32>,
    /// Override spring layout seed
    pub seed: Option<u64>,
}

/// Fill `target` from `default` when it is empty; reports whether it changed
fn merge_string(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        true
    } else {
        false
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("Invalid {kind} value for '{key}': '{value}'"))
}

impl Config {
    /// Get the `$CAMPUS_GRAPH` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/campusgraph`
    /// - macOS: `~/Library/Application Support/campusgraph`
    /// - Windows: `%APPDATA%\campusgraph`
    #[must_use]
    pub fn get_campus_graph_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("campusgraph")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Empty strings and a zero DPI, spring constant or iteration count are taken
    /// from `defaults`. This lets upgrades add new settings without touching
    /// values the user already chose.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        changed |= merge_string(&mut self.logging.level, &defaults.logging.level);
        changed |= merge_string(&mut self.logging.file, &defaults.logging.file);

        changed |= merge_string(&mut self.paths.input, &defaults.paths.input);
        changed |= merge_string(&mut self.paths.output_dir, &defaults.paths.output_dir);
        changed |= merge_string(&mut self.paths.simple_image, &defaults.paths.simple_image);
        changed |= merge_string(&mut self.paths.detailed_image, &defaults.paths.detailed_image);

        changed |= merge_string(&mut self.render.font, &defaults.render.font);
        if self.render.dpi == 0 || self.render.dpi > MAX_DPI {
            self.render.dpi = defaults.render.dpi;
            changed = true;
        }

        if self.layout.spring_k <= 0.0 || !self.layout.spring_k.is_finite() {
            self.layout.spring_k = defaults.layout.spring_k;
            changed = true;
        }
        if self.layout.iterations == 0 {
            self.layout.iterations = defaults.layout.iterations;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides only affect the current run; the configuration file is not
    /// modified. Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(output_dir) = &overrides.output_dir {
            self.paths.output_dir.clone_from(output_dir);
        }
        if let Some(dpi) = overrides.dpi {
            self.render.dpi = dpi;
        }
        if let Some(seed) = overrides.seed {
            self.layout.seed = seed;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_campus_graph_dir`](Self::get_campus_graph_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_campus_graph_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$CAMPUS_GRAPH` in a string to the configuration directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_campus_graph_dir();
            value.replace(DIR_VARIABLE, &dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$CAMPUS_GRAPH` is expanded in path values. Missing sections and fields
    /// take their serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.input = Self::expand_variables(&config.paths.input);
        config.paths.output_dir = Self::expand_variables(&config.paths.output_dir);
        config.render.font = Self::expand_variables(&config.render.font);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the compiled-in default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    /// on first run. Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from a specific file, creating it from defaults if absent
    ///
    /// Missing fields are merged from defaults and written back.
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        let Ok(content) = fs::read_to_string(config_file) else {
            return defaults;
        };
        match Self::from_toml(&content) {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(config_file);
                }
                config
            }
            Err(_) => defaults,
        }
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration as TOML to a specific file, creating parent directories
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `input`, `output_dir`,
    /// `simple_image`, `detailed_image`, `dpi`, `font`, `spring_k`,
    /// `iterations`, `seed`. Underscores may be written as hyphens.
    ///
    /// Returns `None` if the key is not recognized.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "input" => self.paths.input.clone(),
            "output_dir" => self.paths.output_dir.clone(),
            "simple_image" => self.paths.simple_image.clone(),
            "detailed_image" => self.paths.detailed_image.clone(),
            "dpi" => self.render.dpi.to_string(),
            "font" => self.render.font.clone(),
            "spring_k" => self.layout.spring_k.to_string(),
            "iterations" => self.layout.iterations.to_string(),
            "seed" => self.layout.seed.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Only the in-memory config changes; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value does not parse
    /// for that key (e.g. `"maybe"` for `verbose`, `0` for `dpi` or `iterations`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let key = key.replace('-', "_");
        match key.as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_value(&key, value, "boolean")?,
            "input" => self.paths.input = value.to_string(),
            "output_dir" => self.paths.output_dir = value.to_string(),
            "simple_image" => self.paths.simple_image = value.to_string(),
            "detailed_image" => self.paths.detailed_image = value.to_string(),
            "dpi" => {
                let dpi: u32 = parse_value(&key, value, "integer")?;
                if !(1..=MAX_DPI).contains(&dpi) {
                    return Err(format!("'dpi' must be between 1 and {MAX_DPI}"));
                }
                self.render.dpi = dpi;
            }
            "font" => self.render.font = value.to_string(),
            "spring_k" => {
                let k: f64 = parse_value(&key, value, "number")?;
                if !(k.is_finite() && k > 0.0) {
                    return Err("'spring_k' must be a positive number".to_string());
                }
                self.layout.spring_k = k;
            }
            "iterations" => {
                let iterations: usize = parse_value(&key, value, "integer")?;
                if iterations == 0 {
                    return Err("'iterations' must be greater than zero".to_string());
                }
                self.layout.iterations = iterations;
            }
            "seed" => self.layout.seed = parse_value(&key, value, "integer")?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Only the in-memory config changes; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "input" => self.paths.input.clone_from(&defaults.paths.input),
            "output_dir" => self.paths.output_dir.clone_from(&defaults.paths.output_dir),
            "simple_image" => self
                .paths
                .simple_image
                .clone_from(&defaults.paths.simple_image),
            "detailed_image" => self
                .paths
                .detailed_image
                .clone_from(&defaults.paths.detailed_image),
            "dpi" => self.render.dpi = defaults.render.dpi,
            "font" => self.render.font.clone_from(&defaults.render.font),
            "spring_k" => self.layout.spring_k = defaults.layout.spring_k,
            "iterations" => self.layout.iterations = defaults.layout.iterations,
            "seed" => self.layout.seed = defaults.layout.seed,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Spring layout parameters from the `[layout]` section
    #[must_use]
    pub const fn spring_params(&self) -> SpringParams {
        SpringParams {
            k: self.layout.spring_k,
            iterations: self.layout.iterations,
            seed: self.layout.seed,
        }
    }

    /// Render options from the `[render]` section
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            dpi: self.render.dpi,
            font: (!self.render.font.is_empty()).then(|| PathBuf::from(&self.render.font)),
        }
    }

    /// Path of the simple rendering
    #[must_use]
    pub fn simple_image_path(&self) -> PathBuf {
        Path::new(&self.paths.output_dir).join(&self.paths.simple_image)
    }

    /// Path of the detailed rendering
    #[must_use]
    pub fn detailed_image_path(&self) -> PathBuf {
        Path::new(&self.paths.output_dir).join(&self.paths.detailed_image)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  input = \"{}\"", self.paths.input)?;
        writeln!(f, "  output_dir = \"{}\"", self.paths.output_dir)?;
        writeln!(f, "  simple_image = \"{}\"", self.paths.simple_image)?;
        writeln!(f, "  detailed_image = \"{}\"", self.paths.detailed_image)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  dpi = {}", self.render.dpi)?;
        writeln!(f, "  font = \"{}\"", self.render.font)?;

        writeln!(f, "\n[layout]")?;
        writeln!(f, "  spring_k = {}", self.layout.spring_k)?;
        writeln!(f, "  iterations = {}", self.layout.iterations)?;
        writeln!(f, "  seed = {}", self.layout.seed)?;

        Ok(())
    }
}
