use chrono::{DateTime, Utc};

use crate::model::{Context, Item, Keymap, SortMode};
use crate::ops::store::Conflict;

/// Key code delivered for Enter
pub const ENTER: char = '\n';
/// Key code delivered for Esc
pub const ESC: char = '\u{1b}';

/// Error type for console I/O
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error("interrupted")]
    Interrupted,
}

/// The interactive surface the review engine drives.
///
/// Input is one keystroke at a time; `read_line` is the only line-mode
/// input. Every call completes before the engine moves on.
pub trait Console {
    /// Replace what is on screen
    fn show(&mut self, screen: Screen) -> Result<(), ConsoleError>;
    /// Wait for a single keystroke
    fn read_key(&mut self) -> Result<char, ConsoleError>;
    /// Show a picker over the current screen and wait for a keystroke
    fn choose(&mut self, hints: KeyHints) -> Result<char, ConsoleError>;
    /// Prompt for a line of free text. Cancelling yields an empty string.
    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError>;
    /// Report a refused write and wait until the user acknowledges it
    fn acknowledge(&mut self, conflict: &Conflict) -> Result<(), ConsoleError>;
}

/// Key bindings shown to the user for one context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyHints {
    pub title: Option<String>,
    pub entries: Vec<(char, String)>,
}

impl KeyHints {
    pub fn for_context(keymap: &Keymap, context: Context, title: Option<&str>) -> Self {
        KeyHints {
            title: title.map(str::to_string),
            entries: keymap
                .bindings(context)
                .into_iter()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
        }
    }
}

/// One-letter review status shown in summary rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Deleted,
    Disputed,
    Reviewed,
    New,
}

impl Badge {
    pub fn symbol(self) -> &'static str {
        match self {
            Badge::Deleted => "X",
            Badge::Disputed => "D",
            Badge::Reviewed => "R",
            Badge::New => "N",
        }
    }
}

/// An item prepared for display
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub total: usize,
    pub badge: Badge,
    pub item: Item,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub rows: Vec<Row>,
    /// Items in the working set (rows may be capped)
    pub total: usize,
    /// Reviewed items hidden from the working set
    pub hidden: usize,
    pub show_all: bool,
    pub sort: SortMode,
    /// Free-text terms to highlight in descriptions
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub row: Row,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Shell { filter: String },
    Listing(ListingView),
    Detail(DetailView),
}

/// Everything needed to draw one screen
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub view: View,
    pub hints: KeyHints,
    pub status: Option<String>,
}
