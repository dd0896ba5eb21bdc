//! Loading mapper settings and report batches from disk.

use std::fs;
use std::path::{Path, PathBuf};

use obds_model::{MapperSettings, VersionedReport};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML settings {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse reports {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings from a TOML file, or the defaults when no file is given.
///
/// Keys missing from the file keep their default values.
pub fn load_settings(path: Option<&Path>) -> Result<MapperSettings, ConfigError> {
    let Some(path) = path else {
        debug!("no settings file, using defaults");
        return Ok(MapperSettings::default());
    };
    let contents = read(path)?;
    let settings: MapperSettings = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// A JSON array of versioned reports.
pub fn read_reports(path: &Path) -> Result<Vec<VersionedReport>, ConfigError> {
    let contents = read(path)?;
    let reports: Vec<VersionedReport> =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), count = reports.len(), "read reports");
    Ok(reports)
}
