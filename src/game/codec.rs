//! Session state codec — the URL token and the stored blob.
//!
//! Both carry the same JSON object:
//!
//! ```text
//! { "extracted": [5, 12],            history, oldest first
//!   "wins": ["Ambo"],                checked labels
//!   "wins-list": ["Ambo", ..., "Extra"] }   full catalog order
//! ```
//!
//! The URL token is that JSON percent-encoded like `encodeURIComponent`;
//! the blob is the JSON as-is. Decoding is lenient about content (entries
//! outside 1..=90 or that aren't whole numbers are dropped, missing fields take
//! their defaults) but strict about syntax.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::game::board::{Number, in_range};
use crate::game::state::{ExtractionState, SessionState, WinCatalog};
use crate::util::{percent_decode_strict, percent_encode};

#[derive(Debug, Serialize)]
struct WireStateRef<'a> {
    extracted: &'a [Number],
    wins: &'a [String],
    #[serde(rename = "wins-list")]
    wins_list: &'a [String],
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WireState {
    extracted: Vec<Value>,
    wins: Vec<Value>,
    #[serde(rename = "wins-list")]
    wins_list: Vec<Value>,
}

impl WireState {
    fn into_state(self) -> SessionState {
        let history = self
            .extracted
            .iter()
            .filter_map(whole_number)
            .filter(|&n| in_range(n))
            .map(|n| n as Number);
        let labels = strings(self.wins_list);
        let checked = strings(self.wins);
        SessionState::new(
            ExtractionState::from_history(history),
            WinCatalog::from_parts(labels, checked),
        )
    }
}

/// Integers, including floats with no fractional part (`5.0`).
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= 1e9)
            .map(|f| f as i64)
    })
}

fn strings(values: Vec<Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}

fn to_json(state: &SessionState) -> String {
    let wire = WireStateRef {
        extracted: state.history(),
        wins: state.wins().checked(),
        wins_list: state.wins().labels(),
    };
    // Serializing integers and strings into a String buffer does not fail.
    serde_json::to_string(&wire).unwrap_or_else(|_| "{}".to_string())
}

fn from_json(json: &str) -> std::result::Result<SessionState, String> {
    let value: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
    if value.is_null() {
        return Ok(SessionState::default());
    }
    let wire: WireState = serde_json::from_value(value).map_err(|e| e.to_string())?;
    Ok(wire.into_state())
}

/// Encode the state as a URL-safe `state` parameter value.
pub fn encode_for_url(state: &SessionState) -> String {
    percent_encode(&to_json(state))
}

/// Decode a `state` parameter value exactly as it appears in the URL.
pub fn decode_from_url(token: &str) -> Result<SessionState> {
    let json = percent_decode_strict(token).map_err(Error::MalformedToken)?;
    from_json(&json).map_err(Error::MalformedToken)
}

/// Encode the state for the local storage slot.
pub fn encode_for_store(state: &SessionState) -> String {
    to_json(state)
}

/// Decode a blob read from the local storage slot.
pub fn decode_from_store(blob: &str) -> Result<SessionState> {
    from_json(blob).map_err(Error::MalformedBlob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::PREDEFINED_WINS;
    use proptest::prelude::*;

    fn sample_state() -> SessionState {
        let mut state = SessionState::default();
        for n in [42, 7, 90, 1] {
            state.toggle_extraction(n);
        }
        state.add_win("Doppia cinquina").unwrap();
        state.add_win("Più di 10 & \"tutto\"").unwrap();
        state.toggle_checked_win("Terna");
        state.toggle_checked_win("Doppia cinquina");
        state
    }

    #[test]
    fn url_roundtrip() {
        let state = sample_state();
        let token = encode_for_url(&state);
        assert!(token.bytes().all(|b| b.is_ascii_alphanumeric() || b"-_.!~*'()%".contains(&b)));
        assert_eq!(decode_from_url(&token).unwrap(), state);
    }

    #[test]
    fn store_roundtrip() {
        let state = sample_state();
        let blob = encode_for_store(&state);
        assert_eq!(decode_from_store(&blob).unwrap(), state);
    }

    #[test]
    fn store_blob_uses_wire_field_names() {
        let mut state = SessionState::default();
        state.toggle_extraction(5);
        state.toggle_checked_win("Ambo");
        let blob = encode_for_store(&state);
        assert_eq!(
            blob,
            r#"{"extracted":[5],"wins":["Ambo"],"wins-list":["Ambo","Terna","Quaterna","Cinquina","Tombola"]}"#
        );
    }

    #[test]
    fn out_of_range_numbers_are_dropped() {
        let token = percent_encode(r#"{"extracted":[5,200,12],"wins":[],"wins-list":[]}"#);
        let state = decode_from_url(&token).unwrap();
        assert_eq!(state.history(), &[5, 12]);
        assert_eq!(state.wins().labels(), &PREDEFINED_WINS);
    }

    #[test]
    fn non_integer_entries_are_dropped() {
        let state = decode_from_store(r#"{"extracted":[3,"x",4.5,-1,0,90,null]}"#).unwrap();
        assert_eq!(state.history(), &[3, 90]);
    }

    #[test]
    fn whole_floats_are_kept() {
        let state = decode_from_store(r#"{"extracted":[5.0,12,7.5,90.0,91.0]}"#).unwrap();
        assert_eq!(state.history(), &[5, 12, 90]);
    }

    #[test]
    fn absent_fields_take_defaults() {
        let state = decode_from_url("%7B%7D").unwrap();
        assert_eq!(state, SessionState::default());
        let state = decode_from_store("null").unwrap();
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn checked_labels_outside_catalog_are_dropped() {
        let state =
            decode_from_store(r#"{"wins":["Ghost","Tombola"],"wins-list":["Extra"]}"#).unwrap();
        assert_eq!(state.wins().checked(), &["Tombola"]);
        assert_eq!(state.wins().labels().last().map(String::as_str), Some("Extra"));
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(matches!(decode_from_url("%7Bnot-json"), Err(Error::MalformedToken(_))));
        assert!(matches!(decode_from_url("%ZZ"), Err(Error::MalformedToken(_))));
        assert!(matches!(
            decode_from_url("%7B%22extracted%22%3A5%7D"),
            Err(Error::MalformedToken(_))
        ));
    }

    #[test]
    fn malformed_blob_is_rejected() {
        assert!(matches!(decode_from_store("{{{"), Err(Error::MalformedBlob(_))));
        assert!(matches!(decode_from_store("[1,2]"), Err(Error::MalformedBlob(_))));
    }

    fn arb_state() -> impl Strategy<Value = SessionState> {
        (
            proptest::collection::vec(1u8..=90, 0..40),
            proptest::collection::vec("[A-Za-z0-9 %&+\"è]{1,12}", 0..6),
            proptest::collection::vec(any::<proptest::sample::Index>(), 0..6),
        )
            .prop_map(|(toggles, customs, picks)| {
                let mut state = SessionState::default();
                for n in toggles {
                    state.toggle_extraction(n);
                }
                for label in customs {
                    let _ = state.add_win(&label);
                }
                let labels = state.wins().labels().to_vec();
                for pick in picks {
                    state.toggle_checked_win(pick.get(&labels).as_str());
                }
                state
            })
    }

    proptest! {
        #[test]
        fn prop_url_roundtrip(state in arb_state()) {
            prop_assert_eq!(decode_from_url(&encode_for_url(&state)).unwrap(), state);
        }

        #[test]
        fn prop_store_roundtrip(state in arb_state()) {
            prop_assert_eq!(decode_from_store(&encode_for_store(&state)).unwrap(), state);
        }
    }
}
