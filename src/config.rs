use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::ConfigError;

/// Environment variable pointing at the JSON config file.
pub const CONFIG_ENV_VAR: &str = "RSR_CONFIG_FILE";
const DEFAULT_CONFIG_FILE: &str = "rsr_convert.json";

/// Band name → RSR file path. `None` when nothing is configured for the band.
pub type FilenameTable = BTreeMap<String, Option<PathBuf>>;

// ---------------------------------------------------------------------------
// Config file
// ---------------------------------------------------------------------------

/// Top-level configuration.
///
/// ```json
/// {
///   "rsr_dir": "/tmp/rsr_out",
///   "FY-3F-mersi-3": {
///     "path": "/data/mersi3",
///     "ch1": "FY3F_MERSI_SRF_CH01.txt",
///     "ch2": "FY3F_MERSI_SRF_CH02.txt"
///   }
/// }
/// ```
///
/// Every key other than `rsr_dir` is kept as raw JSON and only decoded when a
/// platform asks for it, so unrelated entries never break a conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Output directory for archives.
    #[serde(default = "default_rsr_dir")]
    pub rsr_dir: PathBuf,

    #[serde(flatten)]
    sections: BTreeMap<String, JsonValue>,
}

fn default_rsr_dir() -> PathBuf {
    PathBuf::from("./")
}

/// One `"<platform>-<instrument>"` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InstrumentOptions {
    /// Directory the band filenames are relative to.
    pub path: PathBuf,

    /// Band name → filename. Non-string values count as "not configured".
    #[serde(flatten)]
    pub bands: BTreeMap<String, JsonValue>,
}

impl Config {
    /// Load from `$RSR_CONFIG_FILE`, or `rsr_convert.json` in the working
    /// directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::from_path(&path)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Decode the section for `platform_name`/`instrument`.
    pub fn instrument_options(
        &self,
        platform_name: &str,
        instrument: &str,
    ) -> Result<InstrumentOptions, ConfigError> {
        let section = format!("{platform_name}-{instrument}");
        let raw = self
            .sections
            .get(&section)
            .ok_or_else(|| ConfigError::MissingSection(section.clone()))?;

        InstrumentOptions::deserialize(raw)
            .map_err(|source| ConfigError::InvalidSection { section, source })
    }

    /// Build the filename table for every band in `band_names`.
    ///
    /// Configured files that do not exist are kept in the table (the loader
    /// decides what to do with them) but logged here.
    pub fn band_filenames(
        &self,
        platform_name: &str,
        instrument: &str,
        band_names: &[&str],
    ) -> Result<FilenameTable, ConfigError> {
        let options = self.instrument_options(platform_name, instrument)?;

        let mut filenames = FilenameTable::new();
        for &band in band_names {
            let filename = options.band_file(band);
            match &filename {
                Some(path) if !path.exists() => {
                    log::warn!("Couldn't find file for band {band}: {}", path.display());
                }
                None => log::debug!("No file configured for band {band}"),
                _ => {}
            }
            filenames.insert(band.to_string(), filename);
        }
        Ok(filenames)
    }
}

impl InstrumentOptions {
    /// Full path of the RSR file for `band`, if one is configured.
    pub fn band_file(&self, band: &str) -> Option<PathBuf> {
        self.bands
            .get(band)
            .and_then(JsonValue::as_str)
            .filter(|name| !name.trim().is_empty())
            .map(|name| self.path.join(name))
    }
}
