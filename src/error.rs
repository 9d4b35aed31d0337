use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no home directory available for the default config path")]
    NoHomeDir,
    #[error("failed to read config {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid TOML config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("config file {} has no parent directory to watch", .0.display())]
    NoParentDir(PathBuf),
    #[error(transparent)]
    Watch(#[from] notify::Error),
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to launch {program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("{program} exited with {status}")]
    Exit { program: String, status: ExitStatus },
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown command: {0}")]
pub struct UnknownCommand(pub String);

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn {name} thread: {source}")]
    Thread {
        name: &'static str,
        source: io::Error,
    },
}
