use log::{debug, info, warn};

use crate::io::backend::{Backend, BackendError};
use crate::model::{Color, Context, EditorAction, Item, Keymap, ListingAction, SortMode};
use crate::ops::edit;
use crate::ops::filter::Filter;
use crate::ops::sort::sort_items;
use crate::ops::store::{self, UpdateOutcome};

use super::console::{
    Console, ConsoleError, DetailView, ENTER, KeyHints, ListingView, Row, Screen, View,
};
use super::session::Session;

/// Error type for the review loop. Everything here is fatal.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Console(#[from] ConsoleError),
}

/// Where the review loop is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Listing,
    Editing(usize),
    Done,
}

/// Next state after moving `step` items from `index`. Stepping before the
/// first item returns to the listing; stepping past the last one ends the
/// review.
pub fn step_from(index: usize, step: isize, len: usize) -> ReviewState {
    match index.checked_add_signed(step) {
        None => ReviewState::Listing,
        Some(next) if next >= len => ReviewState::Done,
        Some(next) => ReviewState::Editing(next),
    }
}

/// The result of one query, owned by the review loop while it runs.
///
/// `visible` is what the listing shows and what editing indexes into; it is
/// only rebuilt when reviewed items are shown or hidden, so positions stay
/// put while paging through it.
#[derive(Debug, Clone)]
pub struct WorkingSet {
    all: Vec<Item>,
    visible: Vec<Item>,
    hidden: usize,
}

impl WorkingSet {
    pub fn new(items: Vec<Item>, session: &Session) -> Self {
        let mut set = WorkingSet {
            all: items,
            visible: Vec::new(),
            hidden: 0,
        };
        set.refilter(session);
        set
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.visible.get(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.visible
    }

    pub fn hidden(&self) -> usize {
        self.hidden
    }

    /// Rebuild the visible list, hiding reviewed items unless showing all
    pub fn refilter(&mut self, session: &Session) {
        self.visible = self
            .all
            .iter()
            .filter(|item| session.show_all || !session.is_reviewed(item))
            .cloned()
            .collect();
        self.hidden = self.all.len() - self.visible.len();
    }

    /// Swap in a fresh copy of the item at `index`
    pub fn replace(&mut self, index: usize, fresh: Item) {
        if let Some(uuid) = fresh.uuid.as_deref() {
            if let Some(slot) = self
                .all
                .iter_mut()
                .find(|i| i.uuid.as_deref() == Some(uuid))
            {
                *slot = fresh.clone();
            }
        }
        if let Some(slot) = self.visible.get_mut(index) {
            *slot = fresh;
        }
    }

    pub fn sort(&mut self, mode: SortMode) {
        sort_items(&mut self.all, mode);
        sort_items(&mut self.visible, mode);
    }
}

/// Drives the listing / editing loop over one working set
pub struct Reviewer<'a> {
    pub console: &'a mut dyn Console,
    pub backend: &'a mut dyn Backend,
    pub keymap: &'a Keymap,
    pub session: &'a mut Session,
}

impl Reviewer<'_> {
    /// Page through `items` until the user is done with them
    pub fn run(&mut self, items: Vec<Item>, filter: &Filter) -> Result<(), ReviewError> {
        let mut set = WorkingSet::new(items, self.session);
        let terms: Vec<String> = filter
            .search_terms(&self.session.review.completed_token)
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut status = None;
        let mut state = ReviewState::Listing;
        loop {
            state = match state {
                ReviewState::Listing => self.listing(&mut set, &terms, &mut status)?,
                ReviewState::Editing(index) => self.editing(&mut set, index)?,
                ReviewState::Done => return Ok(()),
            };
        }
    }

    fn listing(
        &mut self,
        set: &mut WorkingSet,
        terms: &[String],
        status: &mut Option<String>,
    ) -> Result<ReviewState, ReviewError> {
        let screen = self.listing_screen(set, terms, status.take());
        self.console.show(screen)?;

        let key = self.console.read_key()?;
        if key == ENTER {
            return Ok(ReviewState::Done);
        }
        let action = self
            .keymap
            .maps_to(key, Context::Listing)
            .and_then(ListingAction::from_name);
        debug!("listing key {:?} -> {:?}", key, action);

        let next = match action {
            Some(ListingAction::Goto) => {
                let answer = self.console.read_line("Jump to: ")?;
                match answer.trim().parse::<usize>() {
                    Ok(index) if index < set.len() => ReviewState::Editing(index),
                    _ => ReviewState::Listing,
                }
            }
            Some(ListingAction::Review) => ReviewState::Editing(0),
            Some(ListingAction::ToggleShowAll) => {
                self.session.show_all = !self.session.show_all;
                set.refilter(self.session);
                ReviewState::Listing
            }
            Some(ListingAction::SortUrgency) => self.resort(set, SortMode::Urgency),
            Some(ListingAction::SortDate) => self.resort(set, SortMode::Recency),
            Some(ListingAction::SortColor) => self.resort(set, SortMode::Color),
            Some(ListingAction::Fix) => {
                *status = Some(self.bulk_fix(set)?);
                ReviewState::Listing
            }
            Some(ListingAction::Quit) => ReviewState::Done,
            None => ReviewState::Listing,
        };
        Ok(next)
    }

    fn resort(&mut self, set: &mut WorkingSet, mode: SortMode) -> ReviewState {
        self.session.sort = mode;
        set.sort(mode);
        ReviewState::Listing
    }

    /// Give every uncolored item the default color. Conflicts are skipped
    /// and counted rather than interrupting the run. Every touched item is
    /// re-read, so a skipped one carries the backend's current stamp.
    fn bulk_fix(&mut self, set: &mut WorkingSet) -> Result<String, ReviewError> {
        let color = self.session.review.default_color();
        let mut fixed = 0;
        let mut skipped = 0;
        for index in 0..set.len() {
            let Some(candidate) = set.get(index).and_then(|i| edit::add_default_color(i, color))
            else {
                continue;
            };
            match store::update(self.backend, &candidate)? {
                UpdateOutcome::Written => fixed += 1,
                UpdateOutcome::Conflict(conflict) => {
                    warn!("bulk fix skipped {}", conflict.uuid);
                    skipped += 1;
                }
            }
            self.refresh(set, index, &candidate)?;
        }
        info!("bulk fix: {} fixed, {} skipped", fixed, skipped);
        Ok(match skipped {
            0 => format!("Fixed {} items.", fixed),
            _ => format!(
                "Fixed {} items, skipped {} changed elsewhere.",
                fixed, skipped
            ),
        })
    }

    fn editing(&mut self, set: &mut WorkingSet, index: usize) -> Result<ReviewState, ReviewError> {
        let Some(item) = set.get(index).cloned() else {
            return Ok(ReviewState::Done);
        };
        let screen = self.detail_screen(&item, index, set.len());
        self.console.show(screen)?;

        let key = self.console.read_key()?;
        let action = self
            .keymap
            .maps_to(key, Context::Editor)
            .and_then(EditorAction::from_name);
        debug!("editor key {:?} -> {:?}", key, action);

        let step = match action {
            Some(EditorAction::Back) => -1,
            Some(EditorAction::Quit) => return Ok(ReviewState::Done),
            Some(action) => {
                if let Some(candidate) = self.candidate(action, &item)? {
                    self.write(&candidate)?;
                    self.refresh(set, index, &item)?;
                }
                1
            }
            None => 1,
        };
        Ok(step_from(index, step, set.len()))
    }

    /// Build the edited copy of `item` for an editor action
    fn candidate(&mut self, action: EditorAction, item: &Item) -> Result<Option<Item>, ReviewError> {
        let now = self.session.now();
        let window = self.session.review.window();
        let review_tag = self.session.review.tag.clone();
        Ok(match action {
            EditorAction::Description => {
                let text = self.console.read_line("Enter description: ")?;
                edit::set_description(item, &text)
            }
            EditorAction::Assignee => self
                .pick(Context::Assignee, "Assign To")?
                .and_then(|name| edit::set_assignee(item, &name)),
            EditorAction::Project => self
                .pick(Context::Project, "Project")?
                .and_then(|project| edit::set_project(item, &project)),
            EditorAction::Color => self
                .pick(Context::Color, "Task Color")?
                .and_then(|label| Color::from_label(&label))
                .and_then(|color| edit::set_color(item, color)),
            EditorAction::Tags => self
                .pick(Context::Tag, "Tags")?
                .and_then(|tag| edit::toggle_tag(item, &tag)),
            EditorAction::Reviewed => edit::mark_reviewed(item, now, window, &review_tag),
            EditorAction::Done => edit::mark_done(item),
            EditorAction::Delete => edit::mark_deleted(item),
            EditorAction::Disputed => edit::mark_disputed(item),
            EditorAction::Back | EditorAction::Quit => None,
        })
    }

    /// Show a picker for `context` and resolve the chosen value
    fn pick(&mut self, context: Context, title: &str) -> Result<Option<String>, ReviewError> {
        let hints = KeyHints::for_context(self.keymap, context, Some(title));
        let key = self.console.choose(hints)?;
        Ok(self.keymap.maps_to(key, context).map(str::to_string))
    }

    /// Guarded write. A conflict is shown and must be acknowledged; the
    /// edit is then dropped.
    fn write(&mut self, candidate: &Item) -> Result<(), ReviewError> {
        if let UpdateOutcome::Conflict(conflict) = store::update(self.backend, candidate)? {
            self.console.acknowledge(&conflict)?;
        }
        Ok(())
    }

    fn refresh(&mut self, set: &mut WorkingSet, index: usize, item: &Item) -> Result<(), ReviewError> {
        if let Some(uuid) = item.uuid.as_deref() {
            let fresh = store::fetch_one(self.backend, uuid)?;
            set.replace(index, fresh);
        }
        Ok(())
    }

    fn row(&self, item: &Item, index: usize, total: usize) -> Row {
        Row {
            index,
            total,
            badge: self.session.badge(item),
            item: item.clone(),
        }
    }

    fn listing_screen(&self, set: &WorkingSet, terms: &[String], status: Option<String>) -> Screen {
        let total = set.len();
        let rows = set
            .items()
            .iter()
            .take(self.session.listing_rows)
            .enumerate()
            .map(|(i, item)| self.row(item, i, total))
            .collect();
        Screen {
            view: View::Listing(ListingView {
                rows,
                total,
                hidden: set.hidden(),
                show_all: self.session.show_all,
                sort: self.session.sort,
                terms: terms.to_vec(),
            }),
            hints: KeyHints::for_context(self.keymap, Context::Listing, None),
            status,
        }
    }

    fn detail_screen(&self, item: &Item, index: usize, total: usize) -> Screen {
        Screen {
            view: View::Detail(DetailView {
                row: self.row(item, index, total),
                now: self.session.now(),
            }),
            hints: KeyHints::for_context(self.keymap, Context::Editor, None),
            status: None,
        }
    }
}
