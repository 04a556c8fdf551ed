//! Window and init configuration
//!
//! Settings come from `init.json` next to the executable, when present, and
//! can be overridden with `CAROL_`-prefixed environment variables
//! (`CAROL_VSYNC=false`, `CAROL_DEBUG=true`, `CAROL_FULLSCREEN_MODE=Exclusive`).

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "init.json";

/// How a fullscreen window takes over the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FullscreenMode {
    /// Borderless window covering the desktop, without a mode switch
    #[default]
    #[serde(alias = "desktop")]
    Desktop,
    /// Real video mode switch to the window resolution
    #[serde(alias = "exclusive")]
    Exclusive,
}

/// Settings used to open the game window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitConfig {
    #[serde(alias = "Title")]
    pub title: String,
    /// Window size in pixels, width then height
    #[serde(alias = "Resolution")]
    pub resolution: [u32; 2],
    /// Index of the display the window is centered on
    #[serde(alias = "Display")]
    pub display: u32,
    #[serde(alias = "Fullscreen")]
    pub fullscreen: bool,
    #[serde(alias = "FullscreenMode", alias = "fullscreenmode")]
    pub fullscreen_mode: FullscreenMode,
    #[serde(alias = "VSync")]
    pub vsync: bool,
    /// Request a debug context and forward driver diagnostics
    #[serde(alias = "Debug")]
    pub debug: bool,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            title: "Carol".to_string(),
            resolution: [1280, 720],
            display: 0,
            fullscreen: false,
            fullscreen_mode: FullscreenMode::Desktop,
            vsync: true,
            debug: false,
        }
    }
}

impl InitConfig {
    /// Load `init.json` from `dir`, then apply `CAROL_*` overrides
    ///
    /// A missing file leaves the defaults in place; a malformed one is an
    /// error.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(dir.as_ref(), Environment::with_prefix("CAROL"))
    }

    /// [`InitConfig::load`] from the directory of the running executable
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load(executable_dir()?)
    }

    pub(crate) fn load_with_env(dir: &Path, env: Environment) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let config = Config::builder()
            .add_source(File::from(path.as_path()).required(false))
            .add_source(env.try_parsing(true))
            .build()?;
        let init: InitConfig = config.try_deserialize()?;
        tracing::debug!(path = %path.display(), ?init, "Loaded init configuration");
        Ok(init)
    }

    pub fn width(&self) -> u32 {
        self.resolution[0]
    }

    pub fn height(&self) -> u32 {
        self.resolution[1]
    }
}

/// Directory containing the running executable
pub fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
