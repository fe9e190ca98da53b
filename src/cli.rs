// src/cli.rs

use std::env;
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::{Error, Result};

/// Command-line overrides. Anything left `None` falls through to the
/// config file value.
#[derive(Debug, Default)]
pub struct Params {
    pub config_path: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub days: Option<usize>,
    pub sheet_per_day: bool,
    pub log_level: Option<String>,
}

impl Params {
    pub fn config_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Fold the overrides into a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(out) = &self.out {
            config.file_info.filename = out.clone();
        }
        if let Some(days) = self.days {
            config.functionality.days_to_export = days;
        }
        if self.sheet_per_day {
            config.functionality.sheet_per_day = true;
        }
        if let Some(level) = &self.log_level {
            config.debug.log_level = level.clone();
        }
    }
}

pub fn parse() -> Result<Params> {
    parse_from(env::args().skip(1))
}

fn parse_from(args: impl Iterator<Item = String>) -> Result<Params> {
    let mut params = Params::default();
    let mut args = args;

    while let Some(a) = args.next() {
        match a.as_str() {
            "-c" | "--config" => {
                let v = args.next().ok_or_else(|| missing("--config"))?;
                params.config_path = Some(PathBuf::from(v));
            }
            "-o" | "--out" => {
                let v = args.next().ok_or_else(|| missing("--out"))?;
                params.out = Some(PathBuf::from(v));
            }
            "-d" | "--days" => {
                let v = args.next().ok_or_else(|| missing("--days"))?;
                let days: usize = v
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid day count: {v}")))?;
                params.days = Some(days);
            }
            "--sheet-per-day" => params.sheet_per_day = true,
            "--log-level" => {
                let v = args.next().ok_or_else(|| missing("--log-level"))?;
                params.log_level = Some(v);
            }
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(Error::Config(format!("Unknown arg: {a}"))),
        }
    }

    Ok(params)
}

fn missing(flag: &str) -> Error {
    Error::Config(format!("Missing value for {flag}"))
}

/* ---------- tests ---------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_strs(args: &[&str]) -> Result<Params> {
        parse_from(args.iter().map(|a| s!(*a)))
    }

    #[test]
    fn overrides_fold_into_config() {
        let params = parse_strs(&["-o", "out.xlsx", "--days", "3", "--sheet-per-day"]).unwrap();

        let mut config = Config::default();
        params.apply(&mut config);

        assert_eq!(config.file_info.filename, PathBuf::from("out.xlsx"));
        assert_eq!(config.functionality.days_to_export, 3);
        assert!(config.functionality.sheet_per_day);
        // untouched fields keep their config values
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn no_args_means_no_overrides() {
        let params = parse_strs(&[]).unwrap();
        let mut config = Config::default();
        params.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_args_are_rejected() {
        assert!(parse_strs(&["--days", "many"]).is_err());
        assert!(parse_strs(&["--days"]).is_err());
        assert!(parse_strs(&["--frobnicate"]).is_err());
    }
}
