//! Navigation/history seam between the explore controller and its host.

use serde::Serialize;
use std::fmt;

/// How an outbound URL write affects history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    /// Append a new history entry (undoable with back).
    Push,
    /// Overwrite the current entry.
    Replace,
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => f.write_str("push"),
            Self::Replace => f.write_str("replace"),
        }
    }
}

/// Host navigation API consumed by the controller.
///
/// Queries are passed without a leading `?`. Implementations must not call
/// back into the controller from `navigate`; inbound changes (back/forward,
/// direct loads) are delivered separately through
/// [`crate::ExploreController::on_navigation`].
pub trait Navigator {
    /// Query string of the current location.
    fn current_query(&self) -> String;

    /// Move to `query` using `mode`.
    fn navigate(&mut self, query: &str, mode: NavigationMode);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn current_query(&self) -> String {
        (**self).current_query()
    }

    fn navigate(&mut self, query: &str, mode: NavigationMode) {
        (**self).navigate(query, mode)
    }
}

/// A recorded outbound write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    pub query: String,
    pub mode: NavigationMode,
}

/// Browser-like history kept in memory.
///
/// `back`/`forward` only move the cursor and report the new location; hosts
/// forward that location to the controller as an inbound navigation.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
    writes: Vec<NavigationRecord>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl MemoryHistory {
    /// Start with a single entry, as after a direct load of `initial_query`.
    pub fn new(initial_query: &str) -> Self {
        Self {
            entries: vec![strip_question_mark(initial_query).to_string()],
            cursor: 0,
            writes: Vec::new(),
        }
    }

    /// Step back one entry, returning the new current query.
    pub fn back(&mut self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry, returning the new current query.
    pub fn forward(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Simulate typing a URL: a new entry that the controller must decode.
    pub fn open(&mut self, query: &str) -> String {
        self.push_entry(strip_question_mark(query).to_string());
        self.entries[self.cursor].clone()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes issued through [`Navigator::navigate`], in order.
    pub fn writes(&self) -> &[NavigationRecord] {
        &self.writes
    }

    fn push_entry(&mut self, query: String) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(query);
        self.cursor = self.entries.len() - 1;
    }
}

impl Navigator for MemoryHistory {
    fn current_query(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn navigate(&mut self, query: &str, mode: NavigationMode) {
        let query = strip_question_mark(query).to_string();
        self.writes.push(NavigationRecord {
            query: query.clone(),
            mode,
        });
        match mode {
            NavigationMode::Push => self.push_entry(query),
            NavigationMode::Replace => self.entries[self.cursor] = query,
        }
    }
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}
