//! `/api/state`, `/api/share` and `/api/clear` routes.

use serde_json::json;

use crate::routes::{changed, snapshot};
use crate::with_session;

/// Handle GET /api/state
pub fn handle_state_get(_query: &str) -> String {
    with_session(|session| snapshot(session).to_string())
}

/// Handle GET /api/share
/// Returns the shareable token and the URL that carries it.
pub fn handle_share_get(_query: &str) -> String {
    with_session(|session| {
        let token = session.token();
        let url = format!("{}?{}={}", session.path(), session.config().state_param, token);
        json!({ "token": token, "url": url }).to_string()
    })
}

/// Handle POST /api/clear
/// Resets numbers and wins, empties the store slot and drops the URL state.
/// The host asks for confirmation before calling this.
pub fn handle_clear_post(_body: &str) -> String {
    with_session(|session| {
        session.clear_all();
        changed(session)
    })
}
