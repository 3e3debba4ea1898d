use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::task::Color;

/// Settings from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend executable, invoked as `<program> <filter...> export` and
    /// `<program> import -`
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            program: default_program(),
        }
    }
}

fn default_program() -> String {
    "task".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Tag added to completed items once reviewed
    #[serde(default = "default_review_tag")]
    pub tag: String,
    /// How long a review of an open item stays valid
    #[serde(default = "default_window_hours")]
    pub window_hours: i64,
    /// Color label added by the bulk fix and to new items
    #[serde(default = "default_color")]
    pub default_color: String,
    /// Filter token requesting completed items, one week per occurrence
    #[serde(default = "default_completed_token")]
    pub completed_token: String,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        ReviewConfig {
            tag: default_review_tag(),
            window_hours: default_window_hours(),
            default_color: default_color(),
            completed_token: default_completed_token(),
        }
    }
}

impl ReviewConfig {
    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::hours(self.window_hours)
    }

    /// The configured default color, falling back to green for unknown names
    pub fn default_color(&self) -> Color {
        Color::from_label(&self.default_color).unwrap_or(Color::Green)
    }
}

fn default_review_tag() -> String {
    let user = std::env::var("USER").unwrap_or_default();
    format!("r:{}", user)
}

fn default_window_hours() -> i64 {
    24
}

fn default_color() -> String {
    "green".to_string()
}

fn default_completed_token() -> String {
    "_end".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeysConfig {
    /// Keymap file; defaults to ~/.taskreview
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Maximum rows shown in the listing
    #[serde(default = "default_listing_rows")]
    pub listing_rows: usize,
    /// Display width of descriptions in summary rows
    #[serde(default = "default_description_width")]
    pub description_width: usize,
    /// Theme overrides, `name = "#RRGGBB"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            listing_rows: default_listing_rows(),
            description_width: default_description_width(),
            colors: HashMap::new(),
        }
    }
}

fn default_listing_rows() -> usize {
    30
}

fn default_description_width() -> usize {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// One of error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: None,
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
