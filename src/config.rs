//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/challenges/challenges.toml`
//! 3. Local config: `<project_dir>/.challenges.toml`
//! 4. Environment variables: `CHALLENGES_*` prefix, `__` as section separator

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{TraversalStrategy, DEFAULT_RECURSION_LIMIT};

/// Tree rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Traversal used by `render`
    pub strategy: TraversalStrategy,
    /// Deepest tree the `auto` strategy renders recursively
    pub recursion_limit: usize,
    /// Tree file rendered when no file is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_tree: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            strategy: TraversalStrategy::default(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            default_tree: None,
        }
    }
}

/// Raw render config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub strategy: Option<TraversalStrategy>,
    pub recursion_limit: Option<usize>,
    pub default_tree: Option<PathBuf>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub render: RawRenderConfig,
}

impl RenderConfig {
    /// Merge overlay config onto self (base): overlay wins where specified.
    pub fn merge(&self, overlay: &RawRenderConfig) -> Self {
        Self {
            strategy: overlay.strategy.unwrap_or(self.strategy),
            recursion_limit: overlay.recursion_limit.unwrap_or(self.recursion_limit),
            default_tree: overlay
                .default_tree
                .clone()
                .or_else(|| self.default_tree.clone()),
        }
    }
}

/// Unified configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub render: RenderConfig,
}

/// Get the XDG config directory.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "challenges").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("challenges.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".challenges.toml")
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input untouched.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> ApplicationResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    parse_raw_settings(&content, path)
}

fn parse_raw_settings(content: &str, path: &Path) -> ApplicationResult<RawSettings> {
    toml::from_str(content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(tree) = &self.render.default_tree {
            let expanded = expand_env_vars(tree.to_string_lossy().as_ref());
            self.render.default_tree = Some(PathBuf::from(expanded));
        }
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            render: self.render.merge(&overlay.render),
        }
    }

    fn validate(&self) -> ApplicationResult<()> {
        if self.render.recursion_limit == 0 {
            return Err(ApplicationError::Config {
                message: "render.recursion_limit must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/challenges/challenges.toml`
    /// 3. Local config: `<project_dir>/.challenges.toml`
    /// 4. Environment variables: `CHALLENGES_*` prefix
    #[instrument(level = "debug")]
    pub fn load(project_dir: Option<&Path>) -> ApplicationResult<Self> {
        let global = global_config_path().filter(|p| p.exists());
        let local = project_dir
            .map(local_config_path)
            .filter(|p| p.exists());
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load settings from explicit config files (both optional), then env vars.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> ApplicationResult<Self> {
        let mut current = Self::default();

        for path in [global, local].into_iter().flatten() {
            debug!(path = %path.display(), "merging config file");
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Apply CHALLENGES_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> ApplicationResult<Self> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CHALLENGES")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("render.strategy") {
            settings.render.strategy = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("CHALLENGES_RENDER__STRATEGY: {e}"),
            })?;
        }
        if let Ok(val) = config.get_string("render.recursion_limit") {
            settings.render.recursion_limit =
                val.parse().map_err(|e| ApplicationError::Config {
                    message: format!("CHALLENGES_RENDER__RECURSION_LIMIT: {e}"),
                })?;
        }
        if let Ok(val) = config.get_string("render.default_tree") {
            settings.render.default_tree = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# challenges configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/challenges/challenges.toml
#   Local:  <project_dir>/.challenges.toml
#   Env:    CHALLENGES_* environment variables, e.g. CHALLENGES_RENDER__STRATEGY=stack

[render]
# Traversal: "stack", "recursive" or "auto"
# auto renders recursively when the tree is at most recursion_limit deep
# strategy = "auto"

# recursion_limit = 512

# Tree file used when `challenges render` gets no FILE argument
# default_tree = "~/trees/page.toml"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
