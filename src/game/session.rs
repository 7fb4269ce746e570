//! Session — the boundary object the host talks to.
//!
//! Owns the board, the live `SessionState`, the store it persists to and
//! the current location. Every successful mutation is written to the store
//! and reflected in the location URL before the call returns, then
//! subscribers are told about it.

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::game::board::{Board, Number, generate_board};
use crate::game::codec;
use crate::game::reconcile::{Source, reconcile, theme_color};
use crate::game::state::SessionState;
use crate::game::store::Store;

/// Notifications for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// State changed and was persisted; `url` is the new location.
    StateChanged { url: String },
    /// Everything was cleared; the store slot is empty and `url` is bare.
    Cleared { url: String },
    /// The top-tier win was checked. Visual only.
    Celebrate { duration_ms: u32 },
}

type Listener = Box<dyn FnMut(&SessionEvent)>;

pub struct Session {
    config: Config,
    board: Board,
    state: SessionState,
    store: Box<dyn Store>,
    path: String,
    url: String,
    source: Source,
    rewrite: Option<String>,
    color: Option<String>,
    listeners: Vec<Listener>,
}

impl Session {
    /// Session restored from the store alone, at the root path.
    pub fn new(config: Config, store: Box<dyn Store>) -> Self {
        Self::restore(config, store, "/", "")
    }

    /// Session for a page loaded at `path` with `query`.
    pub fn restore(config: Config, store: Box<dyn Store>, path: &str, query: &str) -> Self {
        let restored = reconcile(query, store.as_ref(), &config);
        let color = theme_color(query, &config);

        let query = query.strip_prefix('?').unwrap_or(query);
        let rewrite = restored
            .rewrite
            .map(|token| state_url(path, &config.state_param, &token));
        let url = match &rewrite {
            Some(url) => url.clone(),
            None if query.is_empty() => path.to_string(),
            None => format!("{}?{}", path, query),
        };

        Self {
            board: generate_board(),
            state: restored.state,
            store,
            path: path.to_string(),
            url,
            source: restored.source,
            rewrite,
            color,
            listeners: Vec::new(),
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current location, path plus query.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Where the startup state came from.
    pub fn source(&self) -> Source {
        self.source
    }

    /// URL the host must switch to right after load, if any.
    pub fn rewrite(&self) -> Option<&str> {
        self.rewrite.as_deref()
    }

    /// Validated `#rrggbb` cell color override from the load URL.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// What the store slot holds now; `None` after `clear_all`.
    pub fn stored_blob(&self) -> Option<String> {
        self.store.get(&self.config.storage_key)
    }

    /// Shareable token for the current state.
    pub fn token(&self) -> String {
        codec::encode_for_url(&self.state)
    }

    /// Register a callback run after every state change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&SessionEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn toggle_extraction(&mut self, n: Number) -> bool {
        let extracted = self.state.toggle_extraction(n);
        tracing::debug!(number = n, extracted, "toggled extraction");
        self.persist();
        extracted
    }

    pub fn add_win(&mut self, label: &str) -> Result<String> {
        let added = self.state.add_win(label)?;
        tracing::debug!(label = %added, "added win");
        self.persist();
        Ok(added)
    }

    /// Unknown custom labels are accepted and change nothing.
    pub fn delete_win(&mut self, label: &str) -> Result<()> {
        if self.state.delete_win(label)? {
            tracing::debug!(label, "deleted win");
            self.persist();
        }
        Ok(())
    }

    /// Labels outside the catalog stay unchecked and nothing is persisted.
    pub fn toggle_checked_win(&mut self, label: &str) -> bool {
        if !self.state.wins().contains(label) {
            tracing::debug!(label, "ignoring toggle of unknown win");
            return false;
        }
        let checked = self.state.toggle_checked_win(label);
        tracing::debug!(label, checked, "toggled win");
        self.persist();
        if checked && label == self.config.celebrate_label {
            let duration_ms = self.config.celebration_ms;
            self.emit(&SessionEvent::Celebrate { duration_ms });
        }
        checked
    }

    /// Reset the session, empty the store slot and drop the URL state.
    /// The caller is expected to have asked the user first.
    pub fn clear_all(&mut self) {
        self.state.clear_all();
        self.store.remove(&self.config.storage_key);
        self.url = self.path.clone();
        tracing::debug!("cleared session");
        let url = self.url.clone();
        self.emit(&SessionEvent::Cleared { url });
    }

    fn persist(&mut self) {
        let blob = codec::encode_for_store(&self.state);
        self.store.set(&self.config.storage_key, &blob);
        self.url = state_url(&self.path, &self.config.state_param, &self.token());
        let url = self.url.clone();
        self.emit(&SessionEvent::StateChanged { url });
    }

    fn emit(&mut self, event: &SessionEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}

fn state_url(path: &str, param: &str, token: &str) -> String {
    format!("{}?{}={}", path, param, token)
}
