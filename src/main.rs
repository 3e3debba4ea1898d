use std::fs::File;
use std::path::Path;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use taskreview::cli::commands::Cli;
use taskreview::io::config_io::{read_settings, settings_path};

fn main() {
    let cli = Cli::parse();

    let path = cli.settings.clone().unwrap_or_else(settings_path);
    let mut settings = match read_settings(&path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    cli.apply(&mut settings);

    if let Some(file) = &settings.log.file {
        init_logging(file, &settings.log.level);
    }
    log::info!("taskreview starting, settings from {}", path.display());

    if let Err(e) = taskreview::tui::run(&settings, &cli.filter) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// File logger; the terminal belongs to the UI
fn init_logging(path: &Path, level: &str) {
    let level = level.parse().unwrap_or(LevelFilter::Info);
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, config, file);
        }
        Err(e) => eprintln!("warning: cannot open log file {}: {}", path.display(), e),
    }
}
