//! Tombola in-browser WASM server.
//!
//! Exports `init_session(path, query, stored, config)` for page load and
//! `handle_request(method, path, query, body)` for every interaction after
//! that. Uses `matchit` for URL routing — the same router engine that
//! powers Axum.
//!
//! The live session is kept in a `thread_local!` for the lifetime of the
//! page or worker; everything below `game` takes it as an explicit value.
//!
//! On the main thread the session writes `localStorage` itself. A worker
//! has no `localStorage`, so there the host passes the slot's content to
//! `init_session` and writes back the `store` field of every mutation
//! response (`blob: null` means remove the key).

use std::cell::RefCell;

use serde_json::json;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod game;
pub mod routes;
pub mod util;

use crate::config::Config;
use crate::game::session::{Session, SessionEvent};
use crate::game::store::{MemoryStore, Store, default_store};

/// The runtime's store, seeded with what the host read from the slot when
/// the runtime's own copy is empty.
fn seeded_store(config: &Config, stored: &str) -> Box<dyn Store> {
    let mut store = default_store();
    if !stored.is_empty() && store.get(&config.storage_key).is_none() {
        store.set(&config.storage_key, stored);
    }
    store
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    static EVENTS: RefCell<Vec<SessionEvent>> = const { RefCell::new(Vec::new()) };
}

/// Build a session whose events are queued for the next response.
fn open_session(config: Config, store: Box<dyn Store>, path: &str, query: &str) -> Session {
    let mut session = Session::restore(config, store, path, query);
    session.subscribe(|event| EVENTS.with(|q| q.borrow_mut().push(event.clone())));
    session
}

fn install(session: Session) {
    EVENTS.with(|q| q.borrow_mut().clear());
    SESSION.with(|s| *s.borrow_mut() = Some(session));
}

/// Execute a closure with the live session. Before `init_session` this is a fresh
/// in-memory session.
pub(crate) fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|cell| {
        let mut slot = cell.borrow_mut();
        let session = slot.get_or_insert_with(|| {
            open_session(Config::default(), Box::new(MemoryStore::new()), "/", "")
        });
        f(session)
    })
}

/// Events emitted since the last call, oldest first.
pub(crate) fn take_events() -> Vec<SessionEvent> {
    EVENTS.with(|q| std::mem::take(&mut *q.borrow_mut()))
}

/// Replace the live session with a fresh in-memory one.
#[cfg(test)]
pub(crate) fn reset_session() {
    install(open_session(Config::default(), Box::new(MemoryStore::new()), "/", ""));
}

/// Restore the session for a page load.
///
/// # Arguments
/// * `path`   — `location.pathname`
/// * `query`  — `location.search` (e.g. "?state=%7B...%7D&color=ff0000")
/// * `stored` — the storage slot's content as read by the host; empty if none
/// * `config` — JSON overrides for [`Config`]; empty for defaults
///
/// # Returns
/// JSON `{ source, url, rewrite, color, store, state }`. When `rewrite` is
/// set the host replaces the location with it before rendering.
#[wasm_bindgen]
pub fn init_session(path: &str, query: &str, stored: &str, config: &str) -> String {
    let config = Config::from_json(config).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "falling back to default config");
        Config::default()
    });
    let store = seeded_store(&config, stored);
    let session = open_session(config, store, path, query);
    let response = json!({
        "source": session.source(),
        "url": session.url(),
        "rewrite": session.rewrite(),
        "color": session.color(),
        "store": routes::store_slot(&session),
        "state": routes::snapshot(&session),
    })
    .to_string();
    install(session);
    response
}

/// Process an HTTP-like request and return a JSON string.
///
/// # Arguments
/// * `method` — HTTP method ("GET" or "POST")
/// * `path`   — URL path (e.g., "/api/extract")
/// * `query`  — Query string, may be empty
/// * `body`   — Form-encoded request body. Empty string for GET requests.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/board", "board").ok();
    router.insert("/api/state", "state").ok();
    router.insert("/api/share", "share").ok();
    router.insert("/api/extract", "extract").ok();
    router.insert("/api/wins", "wins").ok();
    router.insert("/api/clear", "clear").ok();

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("board", "GET") => routes::board::handle_board_get(query),
            ("state", "GET") => routes::session::handle_state_get(query),
            ("share", "GET") => routes::session::handle_share_get(query),

            ("extract", "POST") => routes::board::handle_extract_post(body),
            ("wins", "POST") => routes::wins::handle_wins_post(body),
            ("clear", "POST") => routes::session::handle_clear_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    routes::error(404, "route not found")
}

fn method_not_allowed() -> String {
    routes::error(405, "method not allowed")
}
