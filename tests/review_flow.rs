use std::collections::VecDeque;

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskreview::io::backend::{Backend, BackendError};
use taskreview::model::{Context, Item, Keymap, Settings, Status};
use taskreview::ops::bindings;
use taskreview::ops::filter::Filter;
use taskreview::ops::store::{self, Conflict};
use taskreview::tui::console::{Console, ConsoleError, ENTER, KeyHints, Screen, View};
use taskreview::tui::review::Reviewer;
use taskreview::tui::session::Session;
use taskreview::tui::shell::Shell;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
}

/// Backend speaking the wire format, as the real process backend does
struct JsonBackend {
    records: Vec<serde_json::Value>,
    imports: Vec<serde_json::Value>,
    /// uuid edited by "someone else" on the next single-record export
    race: Option<String>,
    stamp: u32,
}

impl JsonBackend {
    fn new(records: serde_json::Value) -> Self {
        JsonBackend {
            records: records.as_array().cloned().unwrap_or_default(),
            imports: Vec::new(),
            race: None,
            stamp: 0,
        }
    }

    fn next_stamp(&mut self) -> String {
        self.stamp += 1;
        format!("20250602T0900{:02}Z", self.stamp)
    }

    fn find(&self, uuid: &str) -> Option<&serde_json::Value> {
        self.records.iter().find(|r| r["uuid"] == uuid)
    }
}

impl Backend for JsonBackend {
    fn export(&mut self, filter: &[String]) -> Result<Vec<Item>, BackendError> {
        let raced = match filter {
            [uuid] => self.race.as_deref() == Some(uuid.as_str()),
            _ => false,
        };
        if raced {
            let uuid = &filter[0];
            self.race = None;
            let stamp = self.next_stamp();
            if let Some(record) = self.records.iter_mut().find(|r| r["uuid"] == *uuid) {
                record["modified"] = stamp.into();
                record["description"] = "edited elsewhere".into();
            }
        }
        let selected: Vec<&serde_json::Value> = self
            .records
            .iter()
            .filter(|r| {
                filter.iter().all(|token| match token.strip_prefix("project:") {
                    Some(project) => r["project"] == project,
                    None => r["uuid"] == token.as_str(),
                })
            })
            .collect();
        let payload = serde_json::to_string(&selected)?;
        Ok(serde_json::from_str(&payload)?)
    }

    fn import(&mut self, item: &Item) -> Result<(), BackendError> {
        let mut value = serde_json::to_value(item)?;
        self.imports.push(value.clone());
        value["modified"] = self.next_stamp().into();
        let uuid = value["uuid"].as_str().map(str::to_string);
        match uuid.and_then(|u| self.records.iter().position(|r| r["uuid"] == u.as_str())) {
            Some(at) => self.records[at] = value,
            None => self.records.push(value),
        }
        Ok(())
    }
}

#[derive(Default)]
struct Keys {
    keys: VecDeque<char>,
    lines: VecDeque<String>,
    screens: Vec<Screen>,
    conflicts: Vec<Conflict>,
}

impl Keys {
    fn new(keys: &str, lines: &[&str]) -> Self {
        Keys {
            keys: keys.chars().collect(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl Console for Keys {
    fn show(&mut self, screen: Screen) -> Result<(), ConsoleError> {
        self.screens.push(screen);
        Ok(())
    }

    fn read_key(&mut self) -> Result<char, ConsoleError> {
        self.keys.pop_front().ok_or(ConsoleError::Interrupted)
    }

    fn choose(&mut self, _hints: KeyHints) -> Result<char, ConsoleError> {
        self.read_key()
    }

    fn read_line(&mut self, _prompt: &str) -> Result<String, ConsoleError> {
        self.lines.pop_front().ok_or(ConsoleError::Interrupted)
    }

    fn acknowledge(&mut self, conflict: &Conflict) -> Result<(), ConsoleError> {
        self.conflicts.push(conflict.clone());
        Ok(())
    }
}

fn fixture() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "uuid": "u-alpha",
            "status": "pending",
            "description": "Alpha",
            "project": "web",
            "entry": "20250520T080000Z",
            "modified": "20250601T120000Z",
            "urgency": 5.0,
            "tags": ["@alice", "docs"],
            "annotations": [{"entry": "20250521T080000Z", "description": "keep me"}]
        },
        {
            "id": 2,
            "uuid": "u-bravo",
            "status": "pending",
            "description": "Bravo",
            "project": "api",
            "entry": "20250521T080000Z",
            "modified": "20250601T120000Z",
            "urgency": 9.0,
            "tags": ["@bob", "red"]
        },
        {
            "id": 0,
            "uuid": "u-done",
            "status": "completed",
            "description": "Old work",
            "project": "ops",
            "entry": "20250501T080000Z",
            "end": "20250530T080000Z",
            "modified": "20250530T080000Z",
            "urgency": 0.0,
            "tags": ["@carol"]
        }
    ])
}

fn keymap_for(backend: &mut JsonBackend) -> Keymap {
    let mut keymap = Keymap::new();
    let all = backend.export(&[]).unwrap();
    bindings::generate(&mut keymap, &all);
    keymap
}

fn review(backend: &mut JsonBackend, console: &mut Keys, keymap: &Keymap, filter: &str) {
    let mut session = Session::new(&Settings::default()).with_clock(now);
    let filter = Filter::parse(filter);
    let items = store::fetch(backend, &filter, "_end", session.sort, now()).unwrap();
    Reviewer {
        console,
        backend,
        keymap,
        session: &mut session,
    }
    .run(items, &filter)
    .unwrap();
}

#[test]
fn reassign_round_trips_unknown_fields() {
    let mut backend = JsonBackend::new(fixture());
    let keymap = keymap_for(&mut backend);
    assert_eq!(keymap.maps_to('b', Context::Assignee), Some("bob"));

    // Alpha is second by urgency: skip Bravo, then assign Alpha to bob
    let mut console = Keys::new("r~abq", &[]);
    review(&mut backend, &mut console, &keymap, "");

    assert_eq!(backend.imports.len(), 1);
    let written = &backend.imports[0];
    assert_eq!(written["uuid"], "u-alpha");
    assert_eq!(written["tags"], serde_json::json!(["docs", "@bob"]));
    assert_eq!(written["annotations"][0]["description"], "keep me");
    assert_eq!(written["entry"], "20250520T080000Z");
    assert_eq!(written["modified"], "20250601T120000Z");
}

#[test]
fn concurrent_edit_is_not_overwritten() {
    let mut backend = JsonBackend::new(fixture());
    let keymap = keymap_for(&mut backend);
    backend.race = Some("u-bravo".into());

    // Mark Bravo done while someone else edits it
    let mut console = Keys::new("rdq", &[]);
    review(&mut backend, &mut console, &keymap, "");

    assert!(backend.imports.is_empty());
    assert_eq!(console.conflicts.len(), 1);
    assert_eq!(console.conflicts[0].uuid, "u-bravo");
    assert_eq!(
        console.conflicts[0].captured.as_deref(),
        Some("20250601T120000Z")
    );
    let bravo = backend.find("u-bravo").unwrap();
    assert_eq!(bravo["status"], "pending");
    assert_eq!(bravo["description"], "edited elsewhere");
}

#[test]
fn completed_items_need_the_completion_token() {
    let mut backend = JsonBackend::new(fixture());
    let keymap = keymap_for(&mut backend);

    let mut console = Keys::new("q", &[]);
    review(&mut backend, &mut console, &keymap, "_end");
    let View::Listing(listing) = &console.screens[0].view else {
        panic!("expected listing");
    };
    let names: Vec<&str> = listing
        .rows
        .iter()
        .map(|r| r.item.description.as_str())
        .collect();
    assert_eq!(names, vec!["Old work"]);

    // Vocabulary comes from open items only
    assert_eq!(keymap.key_for("ops", Context::Project), None);
    assert_eq!(keymap.key_for("carol", Context::Assignee), None);
}

#[test]
fn reviewing_completed_item_adds_reviewer_tag() {
    let mut backend = JsonBackend::new(fixture());
    let keymap = keymap_for(&mut backend);
    let tag = Settings::default().review.tag;

    let mut console = Keys::new("rrq", &[]);
    review(&mut backend, &mut console, &keymap, "_end");

    let done = backend.find("u-done").unwrap();
    let tags: Vec<&str> = done["tags"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t.as_str())
        .collect();
    assert_eq!(tags, vec!["@carol", tag.as_str()]);
    assert_eq!(done["status"], "completed");
}

#[test]
fn shell_creates_item_in_filtered_project() {
    let mut backend = JsonBackend::new(fixture());
    let keymap = keymap_for(&mut backend);
    let mut session = Session::new(&Settings::default()).with_clock(now);

    // project:web, assignee alice, then new item
    let mut console = Keys::new("pwaanq", &["Write changelog"]);
    let filter = Shell {
        console: &mut console,
        backend: &mut backend,
        keymap: &keymap,
        session: &mut session,
    }
    .run(Filter::default())
    .unwrap();

    assert_eq!(filter.to_string(), "project:web +@alice");
    let created = backend.imports.last().unwrap();
    assert!(created.get("uuid").is_none());
    assert_eq!(created["status"], "pending");
    assert_eq!(created["project"], "web");
    assert_eq!(created["tags"], serde_json::json!(["@alice", "green"]));
    assert_eq!(created["description"], "Write changelog");
}

#[test]
fn enter_on_shell_reviews_everything_open() {
    let mut backend = JsonBackend::new(fixture());
    let keymap = keymap_for(&mut backend);
    let mut session = Session::new(&Settings::default()).with_clock(now);
    let mut console = Keys::new(&format!("{}{}q", ENTER, ENTER), &[]);
    Shell {
        console: &mut console,
        backend: &mut backend,
        keymap: &keymap,
        session: &mut session,
    }
    .run(Filter::default())
    .unwrap();

    let View::Listing(listing) = &console.screens[1].view else {
        panic!("expected listing");
    };
    assert_eq!(listing.total, 2);
    assert!(backend.imports.is_empty());
}

#[test]
fn keymap_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keys.toml");

    let mut backend = JsonBackend::new(fixture());
    let first = keymap_for(&mut backend);
    first.save(&path).unwrap();

    // Next run: a new project appears, old bindings stay put
    let mut loaded = Keymap::load(&path);
    assert_eq!(loaded, first);
    let mut extra = Item::new("New".into());
    extra.project = Some("wiki".into());
    extra.status = Status::Pending;
    bindings::generate(&mut loaded, &[extra]);
    assert_eq!(loaded.maps_to('w', Context::Project), Some("web"));
    assert_eq!(loaded.maps_to('a', Context::Project), Some("api"));
    assert_eq!(loaded.maps_to('i', Context::Project), Some("wiki"));
}
