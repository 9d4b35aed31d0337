//! Settings file loading and change watching.
//!
//! `enableRecords` is the only option applied while running. The default
//! record mode, default visibility and clipboard command are read once at
//! startup and need a restart to change.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use notify::event::EventKind;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use serde::Deserialize;

use crate::app::AppOp;
use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Show record controls and the record table.
    pub enable_records: bool,
    /// Initial record mode: absolute when true, relative otherwise.
    pub default_abs_record: bool,
    /// Whether the status item starts visible.
    pub default_show: bool,
    pub clipboard: ClipboardSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_records: true,
            default_abs_record: true,
            default_show: true,
            clipboard: ClipboardSettings::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClipboardSettings {
    /// External program and arguments that take the text on stdin,
    /// e.g. `["wl-copy"]`. Empty means the terminal escape sequence is used.
    pub command: Vec<String>,
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        directories::ProjectDirs::from("", "", "light-stopwatch").ok_or(ConfigError::NoHomeDir)?;
    Ok(proj_dirs.config_dir().join(CONFIG_FILE))
}

/// A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    match fs::read_to_string(path) {
        Ok(raw) => parse_settings(&raw, path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("no config at {}, using defaults", path.display());
            Ok(Settings::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn parse_settings(raw: &str, path: &Path) -> Result<Settings, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Posts [`AppOp::ConfigChanged`] whenever the settings file is created,
/// modified or removed. Watching stops when this is dropped.
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    pub fn spawn(path: &Path, tx: flume::Sender<AppOp>) -> Result<Self, ConfigError> {
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or_else(|| ConfigError::NoParentDir(path.to_path_buf()))?;
        let file_name = path.file_name().map(|name| name.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    let relevant = matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    ) && event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if relevant && tx.send(AppOp::ConfigChanged).is_err() {
                        log::debug!("event loop gone, dropping config change");
                    }
                }
                Err(e) => log::error!("Error received from config watcher: {e:?}"),
            },
            notify::Config::default(),
        )?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        log::info!("watching {} for changes", path.display());
        Ok(Self { _watcher: watcher })
    }
}
