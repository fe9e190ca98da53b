// src/main.rs
// Scrape howrare.is/drops and export the upcoming mints to a styled
// .xlsx digest. Interactive by design: fatal errors and the final save
// both wait for the operator, since the sheet is usually open in Excel.

use std::io::{self, BufRead, Write};

use log::info;

use drops_scrape::cli;
use drops_scrape::config::Config;
use drops_scrape::progress::Progress;
use drops_scrape::runner::{self, StdinPrompt};

/// Inline dot spinner for row-by-row extraction. Stays out of the log
/// stream so partial lines never interleave with log records.
struct ConsoleProgress {
    count: usize,
}

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self) {
        self.count += 1;
        let dots = ".".repeat(self.count % 3 + 1);
        print!("\r{dots:<10}");
        let _ = io::stdout().flush();
    }

    fn finish(&mut self) {
        print!("\r{:<10}\r", "");
        let _ = io::stdout().flush();
    }
}

fn main() {
    if let Err(e) = run() {
        println!("A fatal error has occurred: {e}");
        println!("Press ENTER to exit...");
        wait_for_enter();
        std::process::exit(1);
    }

    println!("Done! Press Enter to exit...");
    wait_for_enter();
}

fn run() -> drops_scrape::Result<()> {
    let params = cli::parse()?;

    let mut config = Config::load_or_create(&params.config_path())?;
    params.apply(&mut config);

    init_logging(config.log_level()?);
    log_startup(&config);

    let mut progress = ConsoleProgress { count: 0 };
    let summary = runner::run(&config, Some(&mut progress), &mut StdinPrompt)?;

    info!(
        "Exported {} drops over {} days to {}.",
        summary.drops_written,
        summary.days_rendered,
        summary.path.display()
    );
    Ok(())
}

fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "{:<7}: {}", record.level(), record.args()))
        .init();
}

fn log_startup(config: &Config) {
    info!("Initializing drops scraper");
    info!(
        "    {:.<30} {}",
        "Filename",
        config.file_info.filename.display()
    );
    info!("    {:.<30} {}", "Warning Title", config.appearance.warning_title);
    info!(
        "    {:.<30} {}",
        "Warning Subtitle", config.appearance.warning_subtitle
    );
}

fn wait_for_enter() {
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}
