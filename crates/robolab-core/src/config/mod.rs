use crate::error::{Result, RobolabError};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobolabConfig {
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Simulated network latency, in milliseconds, applied before each store
/// operation resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(default = "default_auth_ms")]
    pub auth_ms: u64,
    #[serde(default = "default_catalog_ms")]
    pub catalog_ms: u64,
    #[serde(default = "default_initial_load_ms")]
    pub initial_load_ms: u64,
    #[serde(default = "default_restore_ms")]
    pub restore_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            auth_ms: default_auth_ms(),
            catalog_ms: default_catalog_ms(),
            initial_load_ms: default_initial_load_ms(),
            restore_ms: default_restore_ms(),
        }
    }
}

impl LatencyConfig {
    /// No delay at all. Used by tests and the non-interactive commands.
    pub fn instant() -> Self {
        Self {
            auth_ms: 0,
            catalog_ms: 0,
            initial_load_ms: 0,
            restore_ms: 0,
        }
    }

    pub fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }

    pub fn catalog(&self) -> Duration {
        Duration::from_millis(self.catalog_ms)
    }

    pub fn initial_load(&self) -> Duration {
        Duration::from_millis(self.initial_load_ms)
    }

    pub fn restore(&self) -> Duration {
        Duration::from_millis(self.restore_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval of the terminal UI.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// How many ticks a toast stays on screen.
    #[serde(default = "default_toast_ticks")]
    pub toast_ticks: u8,
    /// Recommendations shown on the student dashboard.
    #[serde(default = "default_recommended_limit")]
    pub recommended_limit: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            toast_ticks: default_toast_ticks(),
            recommended_limit: default_recommended_limit(),
        }
    }
}

/// Upper bound for any simulated delay.
pub const MAX_LATENCY_MS: u64 = 10_000;

// -- Defaults --

fn default_auth_ms() -> u64 {
    500
}
fn default_catalog_ms() -> u64 {
    500
}
fn default_initial_load_ms() -> u64 {
    800
}
fn default_restore_ms() -> u64 {
    500
}
fn default_tick_ms() -> u64 {
    50
}
fn default_toast_ticks() -> u8 {
    60
}
fn default_recommended_limit() -> usize {
    3
}

impl RobolabConfig {
    /// Load configuration with three-layer TOML merge:
    /// 1. ~/.config/robolab/config.toml (global)
    /// 2. .robolab/config.toml (project)
    /// 3. .robolab/config.local.toml (local, gitignored)
    pub fn load(project_dir: Option<&Path>) -> Result<(Self, Vec<String>)> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(dir) = project_dir {
            let project_config = dir.join(".robolab").join("config.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }

            let local_config = dir.join(".robolab").join("config.local.toml");
            if local_config.exists() {
                builder = builder.add_source(File::from(local_config).required(false));
            }
        }

        let config = builder
            .build()
            .map_err(|e| RobolabError::Config(e.to_string()))?;

        let mut cfg: Self = config
            .try_deserialize()
            .map_err(|e| RobolabError::Config(e.to_string()))?;

        let warnings = cfg.validate();
        Ok((cfg, warnings))
    }

    /// Defaults only (no files).
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Clamp out-of-range values and report what was changed.
    /// Lenient: fixes values rather than rejecting the config.
    pub fn validate(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (name, value) in [
            ("latency.auth_ms", &mut self.latency.auth_ms),
            ("latency.catalog_ms", &mut self.latency.catalog_ms),
            ("latency.initial_load_ms", &mut self.latency.initial_load_ms),
            ("latency.restore_ms", &mut self.latency.restore_ms),
        ] {
            if *value > MAX_LATENCY_MS {
                warnings.push(format!(
                    "{name} = {value} exceeds {MAX_LATENCY_MS}, clamping"
                ));
                *value = MAX_LATENCY_MS;
            }
        }

        if !(10..=1_000).contains(&self.ui.tick_ms) {
            let clamped = self.ui.tick_ms.clamp(10, 1_000);
            warnings.push(format!(
                "ui.tick_ms = {} out of range [10, 1000], clamping to {clamped}",
                self.ui.tick_ms
            ));
            self.ui.tick_ms = clamped;
        }

        if self.ui.toast_ticks == 0 {
            warnings.push("ui.toast_ticks must be at least 1, using default".to_string());
            self.ui.toast_ticks = default_toast_ticks();
        }

        if self.ui.recommended_limit == 0 {
            warnings.push("ui.recommended_limit must be at least 1, using default".to_string());
            self.ui.recommended_limit = default_recommended_limit();
        }

        warnings
    }
}

fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("robolab").join("config.toml"))
}
