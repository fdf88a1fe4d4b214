use crate::control::appearance::{DEFAULT_PANEL_COLOR, DEFAULT_REVEALED_COLOR};
use crate::control::{
    Appearance, CONFIRM_THRESHOLD_FRACTION, ControlConfig, HexColor, LabelText,
    TRIGGER_AREA_FRACTION,
};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_WIDTH: i32 = 320;
pub const DEFAULT_HEIGHT: i32 = 56;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub label: LabelText,
    /// Fill of the draggable panel carrying the label.
    pub top_color: HexColor,
    /// Fill of the panel revealed underneath.
    pub bottom_color: HexColor,
    pub icon: Option<PathBuf>,
    pub width: i32,
    pub height: i32,
    pub trigger_area_fraction: f64,
    pub confirm_threshold_fraction: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            label: LabelText::default(),
            top_color: DEFAULT_PANEL_COLOR,
            bottom_color: DEFAULT_REVEALED_COLOR,
            icon: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            trigger_area_fraction: TRIGGER_AREA_FRACTION,
            confirm_threshold_fraction: CONFIRM_THRESHOLD_FRACTION,
        }
    }
}

impl Config {
    pub fn appearance(&self) -> Appearance {
        Appearance {
            label: self.label.clone(),
            panel_color: self.top_color,
            revealed_color: self.bottom_color,
            icon: self.icon.clone(),
        }
    }

    pub fn control_config(&self) -> ControlConfig {
        ControlConfig {
            trigger_area_fraction: self.trigger_area_fraction,
            confirm_threshold_fraction: self.confirm_threshold_fraction,
            ..ControlConfig::default()
        }
    }

    fn validated(self) -> Result<Self, ConfigError> {
        for (key, value) in [
            ("trigger_area_fraction", self.trigger_area_fraction),
            ("confirm_threshold_fraction", self.confirm_threshold_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidFraction { key, value });
            }
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("{key} must be in (0, 1], got {value}")]
    InvalidFraction { key: &'static str, value: f64 },
    #[error("Window size must be positive, got {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "slide", "slide-confirm")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("SLIDE"))
        .build()?;

    s.try_deserialize::<Config>()?.validated()
}

pub fn load_or_default(path: Option<&Path>) -> Config {
    let result = match path {
        Some(p) => load_config_from(p),
        None => load_config(),
    };

    result.unwrap_or_else(|e| {
        log::error!("Failed to load config, using defaults: {}", e);
        Config::default()
    })
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

/// Makes a user-supplied path absolute so it matches the paths notify reports.
pub fn resolve_config_path(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}

fn is_config_event(event: &notify::Event, config_path: &Path) -> bool {
    let meaningful_event = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    meaningful_event && event.paths.iter().any(|p| p == config_path)
}

fn watch_config_dir(
    config_dir: &Path,
    bridge_tx: Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
    let config_path = match resolve_config_path(&config_path) {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let _watcher = match watch_config_dir(&config_dir, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch config directory: {}", e);
            return;
        }
    };

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                if is_config_event(&event, &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
