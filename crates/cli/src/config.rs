//! Configuration management for the CLI
//!
//! Settings are layered: defaults, then a config file, then `SYNTH_*`
//! environment variables. Command-line flags are applied on top by the caller.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use synth_lib::engine::{
    EngineConfig, DEFAULT_CROSSOVER_RATE, DEFAULT_GENERATIONS, DEFAULT_MUTATION_RATE,
    DEFAULT_POPULATION_SIZE,
};

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    #[serde(default = "default_generations")]
    pub generations: usize,

    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,

    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,

    /// Seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,

    /// First day of the generated date window; today when absent
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

fn default_population_size() -> usize {
    DEFAULT_POPULATION_SIZE
}

fn default_generations() -> usize {
    DEFAULT_GENERATIONS
}

fn default_mutation_rate() -> f64 {
    DEFAULT_MUTATION_RATE
}

fn default_crossover_rate() -> f64 {
    DEFAULT_CROSSOVER_RATE
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            generations: default_generations(),
            mutation_rate: default_mutation_rate(),
            crossover_rate: default_crossover_rate(),
            seed: None,
            start_date: None,
        }
    }
}

impl SynthConfig {
    /// Load configuration from an optional file and the environment.
    ///
    /// An explicit path must exist; the default path is used only if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        match path {
            Some(path) => {
                builder = builder.add_source(config::File::from(path).required(true));
            }
            None => {
                if let Some(default_path) = Self::default_path() {
                    builder = builder.add_source(config::File::from(default_path).required(false));
                }
            }
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("SYNTH").try_parsing(true))
            .build()
            .context("Failed to load configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// `~/.config/finops-synth/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| {
            home.join(".config")
                .join("finops-synth")
                .join("config.toml")
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            population_size: self.population_size,
            mutation_rate: self.mutation_rate,
            crossover_rate: self.crossover_rate,
            generations: self.generations,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_engine() {
        let config = SynthConfig::default();
        assert_eq!(config.engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("synth.toml");
        std::fs::write(
            &path,
            "population_size = 12\nseed = 7\nstart_date = \"2026-01-31\"\n",
        )
        .unwrap();

        let config = SynthConfig::load(Some(&path)).unwrap();
        assert_eq!(config.population_size, 12);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2026, 1, 31));
        assert_eq!(config.generations, DEFAULT_GENERATIONS);
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(SynthConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
