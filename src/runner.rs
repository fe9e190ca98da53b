// src/runner.rs

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use log::{error, info};
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::config::Config;
use crate::progress::Progress;
use crate::report::{ReportBuilder, ReportOptions};
use crate::scrape;
use crate::{Error, Result};

/// Decides what happens when the workbook cannot be written (typically
/// because the file is open in Excel). `true` means try again.
pub trait RetryPrompt {
    fn retry(&mut self, path: &Path, err: &XlsxError) -> bool;
}

/// Interactive policy: explain, wait for Enter, retry. Never gives up on
/// its own; the operator closes Excel or kills the process.
pub struct StdinPrompt;

impl RetryPrompt for StdinPrompt {
    fn retry(&mut self, path: &Path, err: &XlsxError) -> bool {
        error!(
            "Unable to export data to file: {} ({err}). \
             Do you have Excel open? Please close Excel and press ENTER.",
            path.display()
        );
        let _ = io::stdout().flush();
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
        true
    }
}

/// Summary of what was produced.
pub struct RunSummary {
    pub path: PathBuf,
    pub days_rendered: usize,
    pub drops_written: u32,
}

/// Top-level pipeline: fetch, extract, build the workbook, save it.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    config: &Config,
    progress: Option<&mut dyn Progress>,
    prompt: &mut dyn RetryPrompt,
) -> Result<RunSummary> {
    let drops = scrape::fetch_drops(progress)?;

    let mut builder = ReportBuilder::new(ReportOptions {
        warning_title: config.appearance.warning_title.clone(),
        warning_subtitle: config.appearance.warning_subtitle.clone(),
        day_limit: config.functionality.days_to_export,
        per_day_sheets: config.functionality.sheet_per_day,
    });
    let mut workbook = builder.build(&drops)?;

    let path = config.file_info.filename.clone();
    save_with_retry(&mut workbook, &path, prompt)?;
    info!("Drops saved to {}.", path.display());

    Ok(RunSummary {
        path,
        days_rendered: config.functionality.days_to_export.min(drops.len()),
        drops_written: builder.rows_written(),
    })
}

/// Keep saving until it works or the prompt says stop. The output file is
/// commonly open in a spreadsheet viewer, so failure here is routine.
pub fn save_with_retry(
    workbook: &mut Workbook,
    path: &Path,
    prompt: &mut dyn RetryPrompt,
) -> Result<()> {
    loop {
        match workbook.save(path) {
            Ok(()) => return Ok(()),
            Err(err) => {
                if !prompt.retry(path, &err) {
                    return Err(Error::SaveAborted(path.to_path_buf()));
                }
            }
        }
    }
}

/* ---------- tests ---------- */
