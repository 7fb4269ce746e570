//! Session state — extracted numbers with their history, and the win catalog.
//!
//! `SessionState` is the unit the codec serializes and the reconciler
//! produces. It is only ever changed through the methods below.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::game::board::{Number, in_range};

/// Wins every session starts with. They can be checked but never deleted.
pub const PREDEFINED_WINS: [&str; 5] = ["Ambo", "Terna", "Quaterna", "Cinquina", "Tombola"];

/// Extracted numbers, with the order they were (re-)extracted in.
///
/// The set view is always exactly the distinct values of `history`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionState {
    extracted: HashSet<Number>,
    /// Oldest first.
    history: Vec<Number>,
}

impl ExtractionState {
    /// Build from a recorded history. Out-of-range numbers are dropped and
    /// a repeated number keeps its first position.
    pub fn from_history<I>(history: I) -> Self
    where
        I: IntoIterator<Item = Number>,
    {
        let mut state = Self::default();
        for n in history {
            if in_range(n as i64) && state.extracted.insert(n) {
                state.history.push(n);
            }
        }
        state
    }

    /// Flip `n`. Returns whether it is extracted afterwards.
    pub fn toggle(&mut self, n: Number) -> bool {
        if self.extracted.remove(&n) {
            self.history.retain(|&h| h != n);
            false
        } else {
            self.extracted.insert(n);
            self.history.push(n);
            true
        }
    }

    pub fn is_extracted(&self, n: Number) -> bool {
        self.extracted.contains(&n)
    }

    pub fn history(&self) -> &[Number] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Most recently extracted number.
    pub fn last(&self) -> Option<Number> {
        self.history.last().copied()
    }

    pub fn clear(&mut self) {
        self.extracted.clear();
        self.history.clear();
    }
}

/// Ordered win labels plus the subset currently marked achieved.
#[derive(Debug, Clone)]
pub struct WinCatalog {
    labels: Vec<String>,
    /// Kept in the order labels were checked.
    checked: Vec<String>,
}

impl Default for WinCatalog {
    fn default() -> Self {
        Self {
            labels: PREDEFINED_WINS.iter().map(|w| w.to_string()).collect(),
            checked: Vec::new(),
        }
    }
}

/// Label order matters; checked order does not.
impl PartialEq for WinCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
            && self.checked.len() == other.checked.len()
            && self.checked.iter().all(|l| other.is_checked(l))
    }
}

impl Eq for WinCatalog {}

impl WinCatalog {
    /// Build from decoded parts.
    ///
    /// Blank and repeated labels are dropped, predefined labels missing from
    /// `labels` are put back at the front in their usual order, and checked
    /// labels that are not in the resulting catalog are dropped.
    pub fn from_parts<L, C>(labels: L, checked: C) -> Self
    where
        L: IntoIterator<Item = String>,
        C: IntoIterator<Item = String>,
    {
        let mut listed: Vec<String> = Vec::new();
        for label in labels {
            if !label.trim().is_empty() && !listed.contains(&label) {
                listed.push(label);
            }
        }

        let mut all: Vec<String> = PREDEFINED_WINS
            .iter()
            .filter(|p| !listed.iter().any(|l| l == *p))
            .map(|p| p.to_string())
            .collect();
        all.extend(listed);

        let mut catalog = Self {
            labels: all,
            checked: Vec::new(),
        };
        for label in checked {
            if catalog.contains(&label) && !catalog.is_checked(&label) {
                catalog.checked.push(label);
            }
        }
        catalog
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn checked(&self) -> &[String] {
        &self.checked
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn is_checked(&self, label: &str) -> bool {
        self.checked.iter().any(|l| l == label)
    }

    pub fn is_predefined(label: &str) -> bool {
        PREDEFINED_WINS.contains(&label)
    }

    /// Append a custom win. Returns the stored (trimmed) label.
    pub fn add(&mut self, label: &str) -> Result<String> {
        let label = label.trim();
        if label.is_empty() {
            return Err(Error::EmptyWinLabel);
        }
        if self.contains(label) {
            return Err(Error::DuplicateWin(label.to_string()));
        }
        self.labels.push(label.to_string());
        Ok(label.to_string())
    }

    /// Remove a custom win and its checked mark. Returns whether the label
    /// was in the catalog; unknown labels are a no-op.
    pub fn delete(&mut self, label: &str) -> Result<bool> {
        if Self::is_predefined(label) {
            return Err(Error::PredefinedWinDeletionRejected(label.to_string()));
        }
        if !self.contains(label) {
            return Ok(false);
        }
        self.labels.retain(|l| l != label);
        self.checked.retain(|l| l != label);
        Ok(true)
    }

    /// Flip the checked mark. Returns whether it is checked afterwards.
    /// Labels outside the catalog are left unchecked.
    pub fn toggle_checked(&mut self, label: &str) -> bool {
        if !self.contains(label) {
            return false;
        }
        if self.is_checked(label) {
            self.checked.retain(|l| l != label);
            false
        } else {
            self.checked.push(label.to_string());
            true
        }
    }
}

/// Everything a session persists: extraction plus wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    extraction: ExtractionState,
    wins: WinCatalog,
}

impl SessionState {
    pub fn new(extraction: ExtractionState, wins: WinCatalog) -> Self {
        Self { extraction, wins }
    }

    pub fn extraction(&self) -> &ExtractionState {
        &self.extraction
    }

    pub fn wins(&self) -> &WinCatalog {
        &self.wins
    }

    pub fn history(&self) -> &[Number] {
        self.extraction.history()
    }

    pub fn is_extracted(&self, n: Number) -> bool {
        self.extraction.is_extracted(n)
    }

    pub fn toggle_extraction(&mut self, n: Number) -> bool {
        self.extraction.toggle(n)
    }

    pub fn add_win(&mut self, label: &str) -> Result<String> {
        self.wins.add(label)
    }

    pub fn delete_win(&mut self, label: &str) -> Result<bool> {
        self.wins.delete(label)
    }

    pub fn toggle_checked_win(&mut self, label: &str) -> bool {
        self.wins.toggle_checked(label)
    }

    /// Back to a fresh session: nothing extracted, predefined wins only.
    pub fn clear_all(&mut self) {
        self.extraction.clear();
        self.wins = WinCatalog::default();
    }
}
