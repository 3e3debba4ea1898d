use indexmap::IndexMap;
use log::debug;

/// Characters tried, in order, when a preferred key is already taken
pub const FALLBACK_KEYS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Single-character shortcuts for named values, grouped by context.
///
/// Within one context a character maps to at most one value and a value is
/// bound to at most one character. Contexts are independent: `a` can mean
/// "assignee" in the item editor and "toggle show all" in the listing.
/// Insertion order is kept so that hints render and persist deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keymap {
    contexts: IndexMap<String, IndexMap<char, String>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` to the first of its own characters still free in
    /// `context`. Returns the key now bound to `value`, if any.
    pub fn auto_assign(&mut self, value: &str, context: impl AsRef<str>) -> Option<char> {
        let context = context.as_ref();
        if value.is_empty() {
            return None;
        }
        if let Some(existing) = self.key_for(value, context) {
            return Some(existing);
        }
        let candidate = value
            .chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .find(|c| !self.is_bound(*c, context))?;
        self.bind(candidate, value, context);
        Some(candidate)
    }

    /// Bind `value` to `preferred` if that key is free in `context`, else to
    /// the first free key of [`FALLBACK_KEYS`].
    pub fn best_effort_assign(
        &mut self,
        preferred: char,
        value: &str,
        context: impl AsRef<str>,
    ) -> Option<char> {
        let context = context.as_ref();
        if let Some(existing) = self.key_for(value, context) {
            return Some(existing);
        }
        let candidate = std::iter::once(preferred)
            .chain(FALLBACK_KEYS.chars())
            .find(|c| !self.is_bound(*c, context))?;
        self.bind(candidate, value, context);
        Some(candidate)
    }

    /// Resolve a keystroke in `context`
    pub fn maps_to(&self, key: char, context: impl AsRef<str>) -> Option<&str> {
        self.contexts
            .get(context.as_ref())
            .and_then(|keys| keys.get(&key))
            .map(|v| v.as_str())
    }

    /// The key bound to `value` in `context`
    pub fn key_for(&self, value: &str, context: impl AsRef<str>) -> Option<char> {
        self.contexts
            .get(context.as_ref())?
            .iter()
            .find(|(_, v)| v.as_str() == value)
            .map(|(k, _)| *k)
    }

    /// All bindings of a context in assignment order
    pub fn bindings(&self, context: impl AsRef<str>) -> Vec<(char, &str)> {
        self.contexts
            .get(context.as_ref())
            .map(|keys| keys.iter().map(|(k, v)| (*k, v.as_str())).collect())
            .unwrap_or_default()
    }

    /// Every (context, key, value) triple, contexts in first-seen order
    pub fn entries(&self) -> impl Iterator<Item = (&str, char, &str)> {
        self.contexts.iter().flat_map(|(ctx, keys)| {
            keys.iter()
                .map(move |(k, v)| (ctx.as_str(), *k, v.as_str()))
        })
    }

    /// Restore a persisted binding. Conflicting entries are ignored so that
    /// the one-key-per-value and one-value-per-key invariants still hold.
    pub fn restore(&mut self, context: &str, key: char, value: &str) -> bool {
        if self.is_bound(key, context) || self.key_for(value, context).is_some() {
            return false;
        }
        self.bind(key, value, context);
        true
    }

    fn is_bound(&self, key: char, context: &str) -> bool {
        self.contexts
            .get(context)
            .is_some_and(|keys| keys.contains_key(&key))
    }

    fn bind(&mut self, key: char, value: &str, context: &str) {
        debug!("bind {:?} -> {:?} in {}", key, value, context);
        self.contexts
            .entry(context.to_string())
            .or_default()
            .insert(key, value.to_string());
    }
}
