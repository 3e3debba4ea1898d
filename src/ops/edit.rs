//! Edit operations on items.
//!
//! Every operation takes the current item and returns the candidate to write
//! back, or `None` when the edit would change nothing. None of them talk to
//! the backend; writes go through [`crate::ops::store::update`].

use chrono::{DateTime, Duration, Utc};

use crate::model::{ASSIGNEE_SIGIL, Color, DISPUTED_LABEL, Item, Status};

/// Replace the description. Input is trimmed; empty input is a no-op.
pub fn set_description(item: &Item, text: &str) -> Option<Item> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut next = item.clone();
    next.description = text.to_string();
    Some(next)
}

/// Make `name` the only assignee label
pub fn set_assignee(item: &Item, name: &str) -> Option<Item> {
    let name = name.trim_start_matches(ASSIGNEE_SIGIL);
    if name.is_empty() {
        return None;
    }
    let mut next = item.clone();
    next.tags.retain(|t| !t.starts_with(ASSIGNEE_SIGIL));
    next.tags.push(format!("{}{}", ASSIGNEE_SIGIL, name));
    Some(next)
}

pub fn set_project(item: &Item, project: &str) -> Option<Item> {
    if project.is_empty() {
        return None;
    }
    let mut next = item.clone();
    next.project = Some(project.to_string());
    Some(next)
}

/// Make `color` the only color label
pub fn set_color(item: &Item, color: Color) -> Option<Item> {
    let mut next = item.clone();
    next.tags.retain(|t| Color::from_label(t).is_none());
    next.tags.push(color.as_str().to_string());
    Some(next)
}

/// Add `tag` if absent, remove every copy of it if present
pub fn toggle_tag(item: &Item, tag: &str) -> Option<Item> {
    if tag.is_empty() {
        return None;
    }
    let mut next = item.clone();
    if next.has_tag(tag) {
        next.tags.retain(|t| t != tag);
    } else {
        next.tags.push(tag.to_string());
    }
    Some(next)
}

/// Mark reviewed: a fresh marker for open items, the reviewer tag for
/// completed ones. No-op when already reviewed.
pub fn mark_reviewed(
    item: &Item,
    now: DateTime<Utc>,
    window: Duration,
    review_tag: &str,
) -> Option<Item> {
    if item.is_reviewed(now, window, review_tag) {
        return None;
    }
    let mut next = item.clone();
    if next.end.is_none() {
        next.reviewed = Some(now);
    } else {
        next.tags.push(review_tag.to_string());
    }
    Some(next)
}

pub fn mark_done(item: &Item) -> Option<Item> {
    let mut next = item.clone();
    next.status = Status::Completed;
    Some(next)
}

pub fn mark_deleted(item: &Item) -> Option<Item> {
    let mut next = item.clone();
    next.status = Status::Deleted;
    Some(next)
}

/// Set the dispute label; no-op when already disputed
pub fn mark_disputed(item: &Item) -> Option<Item> {
    if item.is_disputed() {
        return None;
    }
    let mut next = item.clone();
    next.tags.push(DISPUTED_LABEL.to_string());
    Some(next)
}

/// Give an uncolored item the default color; no-op when it has one
pub fn add_default_color(item: &Item, color: Color) -> Option<Item> {
    if item.color_label().is_some() {
        return None;
    }
    set_color(item, color)
}

/// A new pending item owned by `assignee` in `project`
pub fn new_item(project: &str, assignee: &str, description: &str, color: Color) -> Option<Item> {
    let description = description.trim();
    if description.is_empty() {
        return None;
    }
    let mut item = Item::new(description.to_string());
    item.project = Some(project.to_string()).filter(|p| !p.is_empty());
    item.tags = vec![
        format!("{}{}", ASSIGNEE_SIGIL, assignee.trim_start_matches(ASSIGNEE_SIGIL)),
        color.as_str().to_string(),
    ];
    Some(item)
}
