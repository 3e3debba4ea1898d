use std::path::PathBuf;

use clap::Parser;

use crate::model::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "taskreview",
    about = concat!("taskreview v", env!("CARGO_PKG_VERSION"), " - review your task backlog one key at a time"),
    version
)]
pub struct Cli {
    /// Initial filter, e.g. "project:web +@alice"
    #[arg(short = 'f', long = "filter", default_value = "")]
    pub filter: String,

    /// Keymap file used to persist key bindings
    #[arg(long)]
    pub keymap: Option<PathBuf>,

    /// Tag marking completed tasks as reviewed
    #[arg(long)]
    pub rtag: Option<String>,

    /// Settings file (defaults to $XDG_CONFIG_HOME/taskreview/config.toml)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Write a log to this file
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command-line overrides on top of the settings file
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.keymap {
            settings.keys.path = Some(path.clone());
        }
        if let Some(tag) = &self.rtag {
            settings.review.tag = tag.clone();
        }
        if let Some(path) = &self.log_file {
            settings.log.file = Some(path.clone());
        }
    }
}
