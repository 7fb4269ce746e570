//! Request handlers for the host page.
//!
//! Every handler returns a JSON string. Mutations answer with
//! `{ ok, url, store, events, state }` so the host can `replaceState` to
//! `url`, mirror `store` into `localStorage` when running in a worker, play
//! any celebration in `events` and re-render from `state`; rejected input
//! answers with `{ ok: false, error }`.

pub mod board;
pub mod session;
pub mod wins;

use serde_json::{Value, json};

use crate::game::session::Session;
use crate::game::state::WinCatalog;

/// JSON view of the session state.
pub fn snapshot(session: &Session) -> Value {
    let state = session.state();
    let wins: Vec<Value> = state
        .wins()
        .labels()
        .iter()
        .map(|label| {
            json!({
                "label": label,
                "checked": state.wins().is_checked(label),
                "custom": !WinCatalog::is_predefined(label),
            })
        })
        .collect();
    json!({
        "history": state.history(),
        "extracted_count": state.extraction().len(),
        "in_progress": !state.extraction().is_empty(),
        "last": state.extraction().last(),
        "wins": wins,
    })
}

/// The store slot as `{ key, blob }`. A null `blob` means the key was removed.
pub fn store_slot(session: &Session) -> Value {
    json!({
        "key": session.config().storage_key,
        "blob": session.stored_blob(),
    })
}

/// Successful mutation response. Drains the pending session events.
pub fn changed(session: &Session) -> String {
    changed_value(session).to_string()
}

pub fn changed_value(session: &Session) -> Value {
    json!({
        "ok": true,
        "url": session.url(),
        "store": store_slot(session),
        "events": crate::take_events(),
        "state": snapshot(session),
    })
}

/// Rejected request response.
pub fn error(status: u16, message: &str) -> String {
    json!({ "ok": false, "status": status, "error": message }).to_string()
}
