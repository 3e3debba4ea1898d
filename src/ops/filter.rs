use std::fmt;

use chrono::Duration;

use crate::model::ASSIGNEE_SIGIL;

/// A filter expression built up one fragment at a time in the shell.
///
/// Tokens are whitespace separated and passed to the backend verbatim,
/// except for the completion token which is consumed here: each occurrence
/// asks for one more week of completed items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    tokens: Vec<String>,
}

impl Filter {
    pub fn parse(expr: &str) -> Self {
        Filter {
            tokens: expr.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Append a fragment (may hold several tokens)
    pub fn push(&mut self, fragment: &str) {
        self.tokens
            .extend(fragment.split_whitespace().map(str::to_string));
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// How many times the completion token appears
    pub fn completed_weeks(&self, completed_token: &str) -> u32 {
        self.tokens.iter().filter(|t| *t == completed_token).count() as u32
    }

    /// Window of completed history requested, `None` for open items only
    pub fn completed_window(&self, completed_token: &str) -> Option<Duration> {
        match self.completed_weeks(completed_token) {
            0 => None,
            weeks => Some(Duration::weeks(weeks as i64)),
        }
    }

    /// Tokens handed to the backend (completion tokens stripped)
    pub fn backend_args(&self, completed_token: &str) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|t| *t != completed_token)
            .cloned()
            .collect()
    }

    /// Category named by a `project:` token
    pub fn project(&self) -> Option<&str> {
        self.tokens
            .iter()
            .rev()
            .find_map(|t| t.strip_prefix("project:"))
            .filter(|p| !p.is_empty())
    }

    /// Assignee named by a `+@name` token, without the sigil
    pub fn assignee(&self) -> Option<&str> {
        self.tokens
            .iter()
            .rev()
            .find_map(|t| t.strip_prefix('+')?.strip_prefix(ASSIGNEE_SIGIL))
            .filter(|a| !a.is_empty())
    }

    /// Free-text tokens (not `key:value`, `+tag` or `-tag` predicates)
    pub fn search_terms(&self, completed_token: &str) -> Vec<&str> {
        self.tokens
            .iter()
            .map(|t| t.as_str())
            .filter(|t| *t != completed_token)
            .filter(|t| !t.starts_with('+') && !t.starts_with('-') && !t.contains(':'))
            .collect()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
