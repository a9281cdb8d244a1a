use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub archive: ArchiveConfig,
    pub ingest: IngestConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ArchiveConfig {
    /// Base directory holding one subdirectory per year.
    pub root: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// External fetch-and-extract executable. Invoked with the archive
    /// URL as its sole argument.
    pub command: PathBuf,
    /// Working directory for the executable. Defaults to the
    /// executable's parent directory.
    #[serde(default)]
    pub workdir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

impl IngestConfig {
    /// Resolve the working directory the child process runs in.
    pub fn effective_workdir(&self) -> PathBuf {
        match &self.workdir {
            Some(dir) => dir.clone(),
            None => self
                .command
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.archive.root.as_os_str().is_empty() {
        anyhow::bail!("archive.root must not be empty");
    }

    if config.ingest.command.as_os_str().is_empty() {
        anyhow::bail!("ingest.command must not be empty");
    }

    if config.server.bind.is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(config)
}
