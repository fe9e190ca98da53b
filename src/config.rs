// src/config.rs

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_CONFIG_FILE: &str = "drops_config.toml";

pub const DEFAULT_OUT_FILE: &str = "UpcomingDrops.xlsx";
pub const DEFAULT_WARNING_TITLE: &str =
    "This is not financial Advice. Do your own research.";
pub const DEFAULT_WARNING_SUBTITLE: &str =
    "Having a project listed on this sheet is not an endorsement of that project.";

/// On-disk configuration. Every section and key is required; a file with
/// any of them missing aborts startup before the scraper runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub file_info: FileInfo,
    pub appearance: Appearance,
    pub functionality: Functionality,
    pub debug: Debug,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub filename: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    pub warning_title: String,
    pub warning_subtitle: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Functionality {
    pub days_to_export: usize,
    pub sheet_per_day: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Debug {
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_info: FileInfo {
                filename: PathBuf::from(DEFAULT_OUT_FILE),
            },
            appearance: Appearance {
                warning_title: s!(DEFAULT_WARNING_TITLE),
                warning_subtitle: s!(DEFAULT_WARNING_SUBTITLE),
            },
            functionality: Functionality {
                days_to_export: 1,
                sheet_per_day: false,
            },
            debug: Debug {
                log_level: s!("info"),
            },
        }
    }
}

impl Config {
    /// Load from `path`, creating the file with defaults on first run.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.is_file() {
            let config = Self::default();
            config.write(path)?;
            log::info!("Created default config at {}", path.display());
            return Ok(config);
        }

        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<log::LevelFilter> {
        self.debug
            .log_level
            .parse()
            .map_err(|_| Error::Config(format!("Unknown log level: {}", self.debug.log_level)))
    }
}

/* ---------- tests ---------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_run_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let config = Config::load_or_create(&path).unwrap();
        assert!(path.is_file());
        assert_eq!(config, Config::default());

        // Second load parses the file it just wrote
        let reloaded = Config::load_or_create(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn missing_section_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "[file_info]\nfilename = \"drops.xlsx\"\n").unwrap();

        assert!(matches!(
            Config::load_or_create(&path),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn missing_option_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");

        let mut text = toml::to_string_pretty(&Config::default()).unwrap();
        text = text.replace("days_to_export = 1\n", "");
        fs::write(&path, text).unwrap();

        assert!(matches!(
            Config::load_or_create(&path),
            Err(Error::ConfigParse { .. })
        ));
    }

    #[test]
    fn log_level_parses_known_names() {
        let mut config = Config::default();
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Info);

        config.debug.log_level = s!("debug");
        assert_eq!(config.log_level().unwrap(), log::LevelFilter::Debug);

        config.debug.log_level = s!("verbose");
        assert!(config.log_level().is_err());
    }
}
