use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::io::backend::{Backend, BackendError};
use crate::model::{Item, SortMode, Status};
use crate::ops::filter::Filter;
use crate::ops::sort::sort_items;

/// A write refused because the backend record changed after it was loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub uuid: String,
    /// Last-modified stamp captured when the item was loaded
    pub captured: Option<String>,
    /// Last-modified stamp the backend reports now
    pub stored: Option<String>,
}

/// Result of a guarded write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Written,
    Conflict(Conflict),
}

/// Fetch a working set.
///
/// Deleted, waiting and recurring items are dropped. Without a completion token only open items are
/// kept; with N tokens only items completed within the last N weeks are.
pub fn fetch(
    backend: &mut dyn Backend,
    filter: &Filter,
    completed_token: &str,
    sort: SortMode,
    now: DateTime<Utc>,
) -> Result<Vec<Item>, BackendError> {
    let records = backend.export(&filter.backend_args(completed_token))?;
    let total = records.len();
    let window = filter.completed_window(completed_token);

    let mut items: Vec<Item> = records
        .into_iter()
        .filter(|item| item.status.is_reviewable())
        .filter(|item| match (window, item.end) {
            (None, end) => end.is_none(),
            (Some(window), Some(end)) => now - end < window,
            (Some(_), None) => false,
        })
        .collect();
    sort_items(&mut items, sort);
    info!(
        "fetched {} of {} records for filter {:?}",
        items.len(),
        total,
        filter.to_string()
    );
    Ok(items)
}

/// Re-read the single backend record for `uuid`
pub fn fetch_one(backend: &mut dyn Backend, uuid: &str) -> Result<Item, BackendError> {
    let mut records = backend.export(&[uuid.to_string()])?;
    match records.len() {
        0 => Err(BackendError::NotFound(uuid.to_string())),
        1 => Ok(records.remove(0)),
        count => Err(BackendError::DuplicateIdentity {
            uuid: uuid.to_string(),
            count,
        }),
    }
}

/// Write an edited item back, guarded against concurrent modification.
///
/// For an item with an identity, the current record is read first; if its
/// last-modified stamp differs from the one captured in `item`, nothing is
/// written and the conflict is returned. Items without an identity are
/// created unconditionally.
pub fn update(backend: &mut dyn Backend, item: &Item) -> Result<UpdateOutcome, BackendError> {
    if let Some(uuid) = &item.uuid {
        let records = backend.export(&[uuid.clone()])?;
        if records.len() > 1 {
            return Err(BackendError::DuplicateIdentity {
                uuid: uuid.clone(),
                count: records.len(),
            });
        }
        if let Some(current) = records.first() {
            if current.modified != item.modified {
                warn!(
                    "refusing to overwrite {}: modified {:?} -> {:?}",
                    uuid, item.modified, current.modified
                );
                return Ok(UpdateOutcome::Conflict(Conflict {
                    uuid: uuid.clone(),
                    captured: item.modified.clone(),
                    stored: current.modified.clone(),
                }));
            }
        }
    }
    backend.import(item)?;
    Ok(UpdateOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryBackend, at, record};
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        at(2025, 5, 20, 12)
    }

    #[test]
    fn fetch_drops_deleted_and_completed_by_default() {
        let mut backend = MemoryBackend::new();
        backend.insert(record("a", "open", 2.0));
        let mut done = record("b", "done", 5.0);
        done.status = Status::Completed;
        done.end = Some(now() - Duration::days(1));
        backend.insert(done);
        let mut gone = record("c", "gone", 9.0);
        gone.status = Status::Deleted;
        backend.insert(gone);

        let items = fetch(&mut backend, &Filter::default(), "_end", SortMode::Urgency, now()).unwrap();
        let uuids: Vec<_> = items.iter().map(|i| i.uuid.as_deref().unwrap()).collect();
        assert_eq!(uuids, vec!["a"]);
    }

    #[test]
    fn fetch_skips_waiting_and_recurring() {
        let mut backend = MemoryBackend::new();
        backend.insert(record("a", "open", 2.0));
        let mut later = record("w", "later", 8.0);
        later.status = Status::Waiting;
        backend.insert(later);
        let mut template = record("t", "weekly", 7.0);
        template.status = Status::Recurring;
        backend.insert(template);

        let items = fetch(&mut backend, &Filter::default(), "_end", SortMode::Urgency, now()).unwrap();
        let uuids: Vec<_> = items.iter().map(|i| i.uuid.as_deref().unwrap()).collect();
        assert_eq!(uuids, vec!["a"]);
    }

    #[test]
    fn completion_token_selects_recently_completed() {
        let mut backend = MemoryBackend::new();
        backend.insert(record("open", "open", 1.0));
        for (uuid, days) in [("d3", 3), ("d10", 10), ("d20", 20)] {
            let mut done = record(uuid, uuid, 1.0);
            done.status = Status::Completed;
            done.end = Some(now() - Duration::days(days));
            backend.insert(done);
        }

        let one_week = fetch(&mut backend, &Filter::parse("_end"), "_end", SortMode::Urgency, now()).unwrap();
        let uuids: Vec<_> = one_week.iter().map(|i| i.uuid.clone().unwrap()).collect();
        assert_eq!(uuids, vec!["d3"]);

        let two_weeks =
            fetch(&mut backend, &Filter::parse("_end _end"), "_end", SortMode::Urgency, now()).unwrap();
        assert_eq!(two_weeks.len(), 2);
        assert!(backend.exports.iter().all(|args| !args.contains(&"_end".to_string())));
    }

    #[test]
    fn fetch_sorts_by_mode() {
        let mut backend = MemoryBackend::new();
        backend.insert(record("a", "a", 5.0));
        backend.insert(record("b", "b", 9.0));
        backend.insert(record("c", "c", 1.0));
        let items = fetch(&mut backend, &Filter::default(), "_end", SortMode::Urgency, now()).unwrap();
        let urgencies: Vec<f64> = items.iter().map(|i| i.urgency).collect();
        assert_eq!(urgencies, vec![9.0, 5.0, 1.0]);
    }

    #[test]
    fn update_writes_when_unchanged_and_bumps_modified() {
        let mut backend = MemoryBackend::new();
        backend.insert(record("a", "Old", 1.0));
        let mut item = fetch_one(&mut backend, "a").unwrap();
        let before = item.modified.clone();
        item.description = "New".into();

        assert_eq!(update(&mut backend, &item).unwrap(), UpdateOutcome::Written);
        let after = fetch_one(&mut backend, "a").unwrap();
        assert_eq!(after.description, "New");
        assert_ne!(after.modified, before);
    }

    #[test]
    fn update_refuses_on_stale_timestamp() {
        let mut backend = MemoryBackend::new();
        let mut stored = record("a", "Stored", 1.0);
        stored.modified = Some("T2".into());
        backend.insert(stored);

        let mut mine = record("a", "Mine", 1.0);
        mine.modified = Some("T1".into());
        let outcome = update(&mut backend, &mine).unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::Conflict(Conflict {
                uuid: "a".into(),
                captured: Some("T1".into()),
                stored: Some("T2".into()),
            })
        );
        assert!(backend.imports.is_empty());
        assert_eq!(fetch_one(&mut backend, "a").unwrap().description, "Stored");
    }

    #[test]
    fn duplicate_identity_is_fatal() {
        let mut backend = MemoryBackend::new();
        backend.insert(record("a", "one", 1.0));
        backend.insert(record("a", "two", 1.0));
        let item = record("a", "edit", 1.0);
        assert!(matches!(
            update(&mut backend, &item),
            Err(BackendError::DuplicateIdentity { count: 2, .. })
        ));
        assert!(matches!(
            fetch_one(&mut backend, "a"),
            Err(BackendError::DuplicateIdentity { .. })
        ));
        assert!(backend.imports.is_empty());
    }

    #[test]
    fn creation_skips_guard() {
        let mut backend = MemoryBackend::new();
        let item = Item::new("Brand new".into());
        assert_eq!(update(&mut backend, &item).unwrap(), UpdateOutcome::Written);
        assert!(backend.exports.is_empty());
        assert_eq!(backend.imports.len(), 1);
    }

    #[test]
    fn missing_record_on_refresh_is_fatal() {
        let mut backend = MemoryBackend::new();
        assert!(matches!(
            fetch_one(&mut backend, "ghost"),
            Err(BackendError::NotFound(_))
        ));
    }
}
