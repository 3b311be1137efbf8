use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

const APP_DIR: &str = "easel";
const APP_CONFIG_FILE: &str = "config.json";

const DEFAULT_TAP_THRESHOLD_PX: f64 = 2.0;
const DEFAULT_STOP_DELETE_WINDOW_MS: u64 = 300;
const DEFAULT_WHEEL_ZOOM_STEP: f64 = 0.1;

/// Interaction tunables from `config.json`.
///
/// These are empirical feel constants, not protocol requirements; every field
/// is optional and falls back to the shipped default.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Per-sample movement (px, either axis) past which a press is a drag,
    /// not a tap.
    pub tap_threshold_px: f64,
    /// Window within which a second activation of a threshold stop deletes it.
    pub stop_delete_window_ms: u64,
    /// Scale step per discrete wheel notch (0.1 = ±10%).
    pub wheel_zoom_step: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            tap_threshold_px: DEFAULT_TAP_THRESHOLD_PX,
            stop_delete_window_ms: DEFAULT_STOP_DELETE_WINDOW_MS,
            wheel_zoom_step: DEFAULT_WHEEL_ZOOM_STEP,
        }
    }
}

impl ViewerConfig {
    pub fn stop_delete_window(&self) -> Duration {
        Duration::from_millis(self.stop_delete_window_ms)
    }
}

pub fn load_viewer_config() -> ViewerConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_viewer_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_viewer_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> ViewerConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return ViewerConfig::default(),
    };
    if !path.exists() {
        return ViewerConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            ViewerConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            ViewerConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
