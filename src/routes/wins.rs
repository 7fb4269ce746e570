//! `/api/wins` route — custom wins and checked marks.

use crate::routes::{changed, error};
use crate::util::{get_param, parse_form_body};
use crate::with_session;

// ── POST /api/wins ─────────────────────────────────────────────────

/// Handle POST /api/wins
/// Body params:
///   - action=add&label={name}    → append a custom win
///   - action=delete&label={name} → remove a custom win
///   - action=toggle&label={name} → check / uncheck a win
///
/// A rejected add or delete leaves the state untouched and answers
/// `{ ok: false, error }` for the host to show.
pub fn handle_wins_post(body: &str) -> String {
    let params = parse_form_body(body);
    let action = get_param(&params, "action").unwrap_or("");
    let label = get_param(&params, "label").unwrap_or("");

    with_session(|session| {
        let outcome = match action {
            "add" => session.add_win(label).map(|_| ()),
            "delete" => session.delete_win(label),
            "toggle" => {
                session.toggle_checked_win(label);
                Ok(())
            }
            _ => return error(400, "Unknown wins action"),
        };
        match outcome {
            Ok(()) => changed(session),
            Err(e) => error(422, &e.to_string()),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reset_session;
    use serde_json::{Value, json};

    fn post(body: &str) -> Value {
        serde_json::from_str(&handle_wins_post(body)).unwrap()
    }

    fn labels(v: &Value) -> Vec<&str> {
        v["state"]["wins"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w["label"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn add_custom_win_is_trimmed() {
        reset_session();
        let v = post("action=add&label=+Doppia+cinquina+");
        assert_eq!(v["ok"], true);
        assert_eq!(labels(&v).last(), Some(&"Doppia cinquina"));
        assert_eq!(v["state"]["wins"][5]["custom"], true);
        assert_eq!(v["state"]["wins"][0]["custom"], false);
        reset_session();
    }

    #[test]
    fn duplicate_and_empty_are_rejected() {
        reset_session();
        let v = post("action=add&label=Ambo");
        assert_eq!(v["ok"], false);
        assert_eq!(v["error"], "this win already exists: Ambo");

        let v = post("action=add&label=%20");
        assert_eq!(v["ok"], false);
        assert_eq!(v["error"], "please enter a win name");
    }

    #[test]
    fn predefined_delete_is_rejected() {
        reset_session();
        let v = post("action=delete&label=Ambo");
        assert_eq!(v["ok"], false);
        assert_eq!(v["status"], 422);
    }

    #[test]
    fn toggle_tombola_reports_celebration() {
        reset_session();
        let v = post("action=toggle&label=Tombola");
        assert_eq!(v["state"]["wins"][4]["checked"], true);
        let events = v["events"].as_array().unwrap();
        assert!(events.contains(&json!({ "type": "celebrate", "duration_ms": 4000 })));

        let v = post("action=toggle&label=Tombola");
        assert_eq!(v["state"]["wins"][4]["checked"], false);
        assert!(!v["events"].as_array().unwrap().iter().any(|e| e["type"] == "celebrate"));
        reset_session();
    }

    #[test]
    fn deleting_checked_custom_win() {
        reset_session();
        post("action=add&label=Extra");
        post("action=toggle&label=Extra");
        let v = post("action=delete&label=Extra");
        assert_eq!(
            labels(&v),
            vec!["Ambo", "Terna", "Quaterna", "Cinquina", "Tombola"]
        );
        assert!(v["state"]["wins"].as_array().unwrap().iter().all(|w| w["checked"] == false));
        reset_session();
    }

    #[test]
    fn unknown_label_is_ignored_without_events() {
        reset_session();
        for body in ["action=toggle&label=Ghost", "action=delete&label=Ghost"] {
            let v = post(body);
            assert_eq!(v["ok"], true);
            assert_eq!(v["events"], json!([]));
            assert_eq!(v["store"]["blob"], Value::Null);
            assert_eq!(v["url"], "/");
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        reset_session();
        let v = post("action=rename&label=Ambo");
        assert_eq!(v["status"], 400);
    }
}
