use chrono::{DateTime, Utc};

use crate::model::{Item, ReviewConfig, Settings, SortMode, Status};

use super::console::Badge;

/// Per-process review state passed explicitly through the engine: the
/// current sort mode, whether reviewed items are shown, and the review
/// settings the engine needs.
#[derive(Debug, Clone)]
pub struct Session {
    pub sort: SortMode,
    pub show_all: bool,
    pub review: ReviewConfig,
    pub listing_rows: usize,
    clock: fn() -> DateTime<Utc>,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Session {
            sort: SortMode::default(),
            show_all: false,
            review: settings.review.clone(),
            listing_rows: settings.ui.listing_rows,
            clock: Utc::now,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn is_reviewed(&self, item: &Item) -> bool {
        item.is_reviewed(self.now(), self.review.window(), &self.review.tag)
    }

    pub fn badge(&self, item: &Item) -> Badge {
        if item.status == Status::Deleted {
            Badge::Deleted
        } else if item.is_disputed() {
            Badge::Disputed
        } else if self.is_reviewed(item) {
            Badge::Reviewed
        } else {
            Badge::New
        }
    }
}
