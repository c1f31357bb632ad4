//! Configuration for daycoach
//!
//! Everything is optional. A missing config file means the built-in defaults, which include the
//! compiled-in phase calendar.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{progress::phase::PhaseCalendar, utils::dir::expand_home};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory with the `YYYY_MM_DD.md` journal files. `~/` is expanded.
    #[serde(rename = "journal-dir")]
    pub journal_dir: String,

    /// How many days to walk back looking for the last journal with tasks
    #[serde(rename = "lookback-days")]
    pub lookback_days: u32,

    pub llm: LlmConfig,

    pub project: ProjectConfig,

    pub phases: PhaseCalendar,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            journal_dir: "~/Documents/journal/journals".to_string(),
            lookback_days: 7,
            llm: LlmConfig::default(),
            project: ProjectConfig::default(),
            phases: PhaseCalendar::default(),
        }
    }
}

impl Config {
    /// Load configuration. An explicit path has to exist, the default path is optional.
    pub fn load(explicit_path: Option<&Path>, default_path: &Path) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()));
        }

        if default_path.exists() {
            return Self::load_from_file(default_path)
                .with_context(|| format!("Failed to load config from {}", default_path.display()));
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    pub fn journal_dir(&self) -> PathBuf {
        expand_home(&self.journal_dir)
    }
}

/// Text-generation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    pub temperature: f32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.2,
            timeout_ms: 60_000,
        }
    }
}

/// What the coach is told about the project behind the phases
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub title: String,

    /// Where material for the project lives. Handed to the model as hints.
    pub resources: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            title: "Extreme-wave response of a floating offshore wind turbine for different \
                    mooring designs"
                .to_string(),
            resources: vec![
                "文献: ~/Documents/01Project/2411Masterarbeit/Resources + Zotero".to_string(),
                "仿真案例: ~/Programs/starccm case".to_string(),
            ],
        }
    }
}
