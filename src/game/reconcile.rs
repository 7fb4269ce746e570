//! Startup reconciliation between the shareable URL and the local store.
//!
//! ```text
//! ?state=… decodes      → Url    (store ignored for this load)
//! else store decodes    → Store  (URL rewritten to show it)
//! else                  → Fresh
//! ```
//!
//! A source that fails to decode counts as absent.

use serde::Serialize;

use crate::config::Config;
use crate::game::codec;
use crate::game::state::SessionState;
use crate::game::store::Store;
use crate::util::{get_param, parse_query, raw_param};

/// Where the startup state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Url,
    Store,
    Fresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    pub state: SessionState,
    pub source: Source,
    /// Token the host must put in the URL right away. Only set when the
    /// state came from the store.
    pub rewrite: Option<String>,
}

/// Pick the authoritative state for this load.
pub fn reconcile(query: &str, store: &dyn Store, config: &Config) -> Restored {
    if let Some(token) = raw_param(query, &config.state_param) {
        match codec::decode_from_url(token) {
            Ok(state) => {
                tracing::info!(numbers = state.history().len(), "state restored from URL");
                return Restored {
                    state,
                    source: Source::Url,
                    rewrite: None,
                };
            }
            Err(e) => tracing::warn!(error = %e, "ignoring URL state"),
        }
    }

    if let Some(blob) = store.get(&config.storage_key) {
        match codec::decode_from_store(&blob) {
            Ok(state) => {
                tracing::info!(numbers = state.history().len(), "state restored from store");
                let rewrite = Some(codec::encode_for_url(&state));
                return Restored {
                    state,
                    source: Source::Store,
                    rewrite,
                };
            }
            Err(e) => tracing::warn!(error = %e, "ignoring stored state"),
        }
    }

    tracing::info!("starting fresh session");
    Restored {
        state: SessionState::default(),
        source: Source::Fresh,
        rewrite: None,
    }
}

/// The `color` override as `#rrggbb`, if it is exactly six hex digits.
pub fn theme_color(query: &str, config: &Config) -> Option<String> {
    let params = parse_query(query);
    let color = get_param(&params, &config.color_param)?;
    (color.len() == 6 && color.bytes().all(|b| b.is_ascii_hexdigit()))
        .then(|| format!("#{}", color))
}
