//! In-memory stand-ins for the backend and the terminal.

use std::collections::VecDeque;

use chrono::{DateTime, TimeZone, Utc};

use crate::io::backend::{Backend, BackendError};
use crate::model::Item;
use crate::ops::store::Conflict;
use crate::tui::console::{Console, ConsoleError, KeyHints, Screen};

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// The clock used by engine tests
pub fn fixed_now() -> DateTime<Utc> {
    at(2025, 5, 20, 12)
}

/// A pending record with an identity and a last-modified stamp
pub fn record(uuid: &str, description: &str, urgency: f64) -> Item {
    let mut item = Item::new(description.to_string());
    item.uuid = Some(uuid.to_string());
    item.modified = Some("T0".to_string());
    item.entry = Some(at(2025, 5, 1, 9));
    item.urgency = urgency;
    item
}

/// Backend keeping records in a Vec and logging every exchange
#[derive(Debug, Default)]
pub struct MemoryBackend {
    pub records: Vec<Item>,
    pub exports: Vec<Vec<String>>,
    pub imports: Vec<Item>,
    /// Simulates a concurrent edit: the next single-identity export for this
    /// uuid first rewrites its description
    pub on_next_export: Option<(String, String)>,
    counter: u64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record as-is, duplicates included
    pub fn insert(&mut self, item: Item) {
        self.records.push(item);
    }

    fn bump(&mut self) -> String {
        self.counter += 1;
        format!("T{}", self.counter)
    }

    fn matches(&self, item: &Item, token: &str) -> bool {
        if self.records.iter().any(|r| r.uuid.as_deref() == Some(token)) {
            return item.uuid.as_deref() == Some(token);
        }
        if let Some(project) = token.strip_prefix("project:") {
            item.project.as_deref() == Some(project)
        } else if let Some(tag) = token.strip_prefix('+') {
            item.has_tag(tag)
        } else if let Some(tag) = token.strip_prefix('-') {
            !item.has_tag(tag)
        } else {
            item.description.contains(token)
        }
    }
}

impl Backend for MemoryBackend {
    fn export(&mut self, filter: &[String]) -> Result<Vec<Item>, BackendError> {
        self.exports.push(filter.to_vec());
        let triggered = match (filter, &self.on_next_export) {
            ([only], Some((uuid, _))) => uuid == only,
            _ => false,
        };
        if triggered {
            if let Some((uuid, description)) = self.on_next_export.take() {
                let stamp = self.bump();
                for record in self.records.iter_mut().filter(|r| r.uuid.as_deref() == Some(&uuid)) {
                    record.description = description.clone();
                    record.modified = Some(stamp.clone());
                }
            }
        }
        Ok(self
            .records
            .iter()
            .filter(|item| filter.iter().all(|token| self.matches(item, token)))
            .cloned()
            .collect())
    }

    fn import(&mut self, item: &Item) -> Result<(), BackendError> {
        self.imports.push(item.clone());
        let mut stored = item.clone();
        stored.modified = Some(self.bump());
        match stored.uuid.clone() {
            Some(uuid) => match self
                .records
                .iter_mut()
                .find(|r| r.uuid.as_deref() == Some(&uuid))
            {
                Some(slot) => *slot = stored,
                None => self.records.push(stored),
            },
            None => {
                stored.uuid = Some(format!("new-{}", self.counter));
                self.records.push(stored);
            }
        }
        Ok(())
    }
}

/// One scripted user input
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Key(char),
    Line(String),
}

/// Console replaying scripted input and recording what was shown.
/// Running out of input reads as an interrupt.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    pub inputs: VecDeque<Input>,
    pub screens: Vec<Screen>,
    pub choices: Vec<KeyHints>,
    pub prompts: Vec<String>,
    pub conflicts: Vec<Conflict>,
}

impl ScriptedConsole {
    pub fn new(inputs: Vec<Input>) -> Self {
        ScriptedConsole {
            inputs: inputs.into(),
            ..Default::default()
        }
    }

    fn next_key(&mut self) -> Result<char, ConsoleError> {
        match self.inputs.pop_front() {
            Some(Input::Key(key)) => Ok(key),
            Some(Input::Line(line)) => panic!("expected a key, script has line {:?}", line),
            None => Err(ConsoleError::Interrupted),
        }
    }
}

impl Console for ScriptedConsole {
    fn show(&mut self, screen: Screen) -> Result<(), ConsoleError> {
        self.screens.push(screen);
        Ok(())
    }

    fn read_key(&mut self) -> Result<char, ConsoleError> {
        self.next_key()
    }

    fn choose(&mut self, hints: KeyHints) -> Result<char, ConsoleError> {
        self.choices.push(hints);
        self.next_key()
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.prompts.push(prompt.to_string());
        match self.inputs.pop_front() {
            Some(Input::Line(line)) => Ok(line),
            Some(Input::Key(key)) => panic!("expected a line, script has key {:?}", key),
            None => Err(ConsoleError::Interrupted),
        }
    }

    fn acknowledge(&mut self, conflict: &Conflict) -> Result<(), ConsoleError> {
        self.conflicts.push(conflict.clone());
        Ok(())
    }
}
