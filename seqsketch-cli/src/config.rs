//! Configuration handling for the seqsketch CLI
//!
//! Supports loading configuration from seqsketch.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use seqsketch_core::{SketchMethod, SketchParams};

use crate::error::CliError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sketch: SketchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default number of threads to use
    #[serde(default = "default_threads")]
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchConfig {
    /// Default sketch method
    #[serde(default = "default_method")]
    pub method: MethodType,

    /// Default k-mer size
    #[serde(default = "default_k")]
    pub k: usize,

    /// Minimizer window width in k-mers
    #[serde(default = "default_w")]
    pub w: usize,

    /// Syncmer s-mer size
    #[serde(default = "default_s")]
    pub s: usize,

    /// Reading frame for protein sketches of nucleotide input
    #[serde(default = "default_frame")]
    pub frame: i8,

    /// Treat every record as circular
    #[serde(default)]
    pub circular: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format for sketch hits
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodType {
    Minimizer,
    Syncmer,
    Protein,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Tsv,
    Json,
}

// Default value functions
fn default_threads() -> usize { num_cpus::get() }
fn default_method() -> MethodType { MethodType::Minimizer }
fn default_k() -> usize { 15 }
fn default_w() -> usize { 10 }
fn default_s() -> usize { 5 }
fn default_frame() -> i8 { 1 }
fn default_format() -> OutputFormat { OutputFormat::Tsv }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            k: default_k(),
            w: default_w(),
            s: default_s(),
            frame: default_frame(),
            circular: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct SketchOverrides {
    pub method: Option<MethodType>,
    pub k: Option<usize>,
    pub w: Option<usize>,
    pub s: Option<usize>,
    pub frame: Option<i8>,
    pub circular: bool,
}

impl SketchConfig {
    /// Merge `overrides` into these defaults and build core sketch parameters.
    pub fn params(&self, overrides: &SketchOverrides) -> Result<SketchParams, CliError> {
        let k = overrides.k.unwrap_or(self.k);
        let w = overrides.w.unwrap_or(self.w);
        let s = overrides.s.unwrap_or(self.s);
        let frame = overrides.frame.unwrap_or(self.frame);

        if k == 0 {
            return Err(CliError::validation("k must be at least 1"));
        }
        let method = match overrides.method.unwrap_or(self.method) {
            MethodType::Minimizer => SketchMethod::Minimizer { w },
            MethodType::Syncmer => {
                if s == 0 || s > k {
                    return Err(CliError::validation(format!(
                        "s must be within 1..={} for k = {}, got {}",
                        k, k, s
                    )));
                }
                SketchMethod::Syncmer { s }
            }
            MethodType::Protein => SketchMethod::ProteinMinimizer { w, frame },
        };
        if matches!(method, SketchMethod::Minimizer { .. } | SketchMethod::ProteinMinimizer { .. })
            && w == 0
        {
            return Err(CliError::validation("w must be at least 1"));
        }

        Ok(SketchParams {
            k,
            method,
            circular: overrides.circular || self.circular,
        })
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                // Try to find seqsketch.toml in current directory
                let default_path = PathBuf::from("seqsketch.toml");
                if default_path.exists() {
                    log::info!("Loading configuration from: seqsketch.toml");
                    Self::load_from_file(&default_path)?
                } else {
                    log::debug!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }

    /// Write the example configuration to `path`
    pub fn write_example(path: &Path) -> Result<()> {
        Self::default().save_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.sketch.method, MethodType::Minimizer);
        assert_eq!(config.sketch.k, 15);
        assert_eq!(config.sketch.w, 10);
        assert_eq!(config.output.format, OutputFormat::Tsv);
        assert!(config.general.threads >= 1);
    }

    #[test]
    fn test_config_roundtrip() -> Result<()> {
        let mut config = Config::default();
        config.sketch.method = MethodType::Syncmer;
        config.sketch.s = 7;
        let temp_file = NamedTempFile::new()?;

        config.save_to_file(temp_file.path())?;
        let loaded = Config::load_from_file(temp_file.path())?;

        assert_eq!(loaded.sketch.method, MethodType::Syncmer);
        assert_eq!(loaded.sketch.s, 7);
        assert_eq!(loaded.sketch.k, config.sketch.k);
        assert_eq!(loaded.general.threads, config.general.threads);

        Ok(())
    }

    #[test]
    fn test_partial_config_uses_defaults() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "[sketch]\nk = 21\nmethod = \"protein\"")?;

        let config = Config::load(Some(temp_file.path()))?;
        assert_eq!(config.sketch.k, 21);
        assert_eq!(config.sketch.method, MethodType::Protein);
        assert_eq!(config.sketch.w, 10);
        assert_eq!(config.output.format, OutputFormat::Tsv);

        Ok(())
    }

    #[test]
    fn test_invalid_config_is_reported() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "[sketch]\nk = \"fifteen\"")?;
        assert!(Config::load_from_file(temp_file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_example_toml_generation() -> Result<()> {
        let example = Config::example_toml()?;
        assert!(example.contains("[general]"));
        assert!(example.contains("[sketch]"));
        assert!(example.contains("[output]"));
        Ok(())
    }

    #[test]
    fn test_write_example_ignores_loaded_settings() -> Result<()> {
        let mut user = NamedTempFile::new()?;
        writeln!(user, "[sketch]\nk = 21")?;
        let loaded = Config::load(Some(user.path()))?;
        assert_eq!(loaded.sketch.k, 21);

        let out = NamedTempFile::new()?;
        Config::write_example(out.path())?;
        assert_eq!(std::fs::read_to_string(out.path())?, Config::example_toml()?);
        assert_eq!(Config::load_from_file(out.path())?.sketch.k, 15);
        Ok(())
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = SketchConfig::default();
        let overrides = SketchOverrides {
            method: Some(MethodType::Syncmer),
            k: Some(11),
            s: Some(3),
            circular: true,
            ..Default::default()
        };
        let params = config.params(&overrides).unwrap();
        assert_eq!(params.k, 11);
        assert_eq!(params.method, SketchMethod::Syncmer { s: 3 });
        assert!(params.circular);

        let params = config.params(&SketchOverrides::default()).unwrap();
        assert_eq!(params.method, SketchMethod::Minimizer { w: 10 });
    }

    #[test]
    fn test_invalid_overrides() {
        let config = SketchConfig::default();
        let bad_s = SketchOverrides {
            method: Some(MethodType::Syncmer),
            k: Some(5),
            s: Some(6),
            ..Default::default()
        };
        assert!(matches!(config.params(&bad_s), Err(CliError::Validation { .. })));

        let bad_w = SketchOverrides {
            w: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.params(&bad_w), Err(CliError::Validation { .. })));
    }
}
