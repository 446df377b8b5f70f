use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{DupError, DupResult};
use crate::search::{Algorithm, Fidelity, DEFAULT_STEP_BUDGET};

/// Process-wide settings for duplicate checks.
///
/// # Configuration Locations
///
/// Configuration is merged from these locations, later ones winning:
/// 1. Global `$CONFIG_DIR/dupscout/config.yaml`
/// 2. Local `.dupscout.yaml` in the current directory
/// 3. A file given with `--config` (must exist)
///
/// # Configuration Format
///
/// ```yaml
/// # naive | kmp | bm
/// algorithm: "kmp"
///
/// # fast | trace
/// fidelity: "fast"
///
/// # Trace steps before a traced search is cut off
/// step_budget: 350
///
/// # Input limits enforced before a batch runs
/// max_sentences: 30
/// max_sentence_chars: 5000
///
/// # Worker threads for batch evaluation (default: CPU cores)
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// Command-line flags take precedence, see [`DetectorConfig::merge_with_cli`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Algorithm used when the caller does not pick one
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Fidelity used when the caller does not pick one
    #[serde(default)]
    pub fidelity: Fidelity,

    /// Trace steps allowed per traced search before it ends as truncated
    #[serde(default = "default_step_budget")]
    pub step_budget: usize,

    /// Maximum number of sentences in one batch
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,

    /// Maximum length of a single sentence, in characters
    #[serde(default = "default_max_sentence_chars")]
    pub max_sentence_chars: usize,

    /// Number of worker threads for batch evaluation
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub algorithm: Option<Algorithm>,
    pub fidelity: Option<Fidelity>,
    pub step_budget: Option<usize>,
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
}

fn default_step_budget() -> usize {
    DEFAULT_STEP_BUDGET
}

fn default_max_sentences() -> usize {
    30
}

fn default_max_sentence_chars() -> usize {
    5000
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            fidelity: Fidelity::default(),
            step_budget: default_step_budget(),
            max_sentences: default_max_sentences(),
            max_sentence_chars: default_max_sentence_chars(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
        }
    }
}

impl DetectorConfig {
    /// Loads configuration from the default locations
    pub fn load() -> DupResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus an explicit file
    pub fn load_from(config_path: Option<&Path>) -> DupResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let discovered = [
            dirs::config_dir().map(|p| p.join("dupscout/config.yaml")),
            Some(PathBuf::from(".dupscout.yaml")),
        ];
        for path in discovered.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file has to exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no batch could run with
    pub fn validate(&self) -> DupResult<()> {
        if self.step_budget == 0 {
            return Err(DupError::config_error("step_budget must be at least 1"));
        }
        if self.max_sentences < 2 {
            return Err(DupError::config_error("max_sentences must be at least 2"));
        }
        if self.max_sentence_chars == 0 {
            return Err(DupError::config_error(
                "max_sentence_chars must be at least 1",
            ));
        }
        Ok(())
    }

    /// Merges command-line values over configuration file values
    pub fn merge_with_cli(mut self, cli: ConfigOverrides) -> Self {
        if let Some(algorithm) = cli.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(fidelity) = cli.fidelity {
            self.fidelity = fidelity;
        }
        if let Some(step_budget) = cli.step_budget {
            self.step_budget = step_budget;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        self
    }
}
