//! `/api/board` and `/api/extract` — the six cards and number toggling.

use serde_json::{Value, json};

use crate::game::board::in_range;
use crate::routes::{changed_value, error};
use crate::util::{get_param, parse_form_body};
use crate::with_session;

// ── GET /api/board ─────────────────────────────────────────────────

/// Handle GET /api/board
/// Returns every card as three rows of `{ number, extracted }` cells.
pub fn handle_board_get(_query: &str) -> String {
    with_session(|session| {
        let cards: Vec<Value> = session
            .board()
            .cards()
            .iter()
            .map(|card| {
                let rows: Vec<Vec<Value>> = card
                    .rows()
                    .map(|row| {
                        row.iter()
                            .map(|&n| json!({ "number": n, "extracted": session.state().is_extracted(n) }))
                            .collect()
                    })
                    .collect();
                json!({ "rows": rows })
            })
            .collect();
        json!({ "cards": cards }).to_string()
    })
}

// ── POST /api/extract ──────────────────────────────────────────────

/// Handle POST /api/extract
/// Body: number={n} → toggle n in or out of the extracted numbers.
/// The response also names the card holding n, for the host to highlight.
pub fn handle_extract_post(body: &str) -> String {
    let params = parse_form_body(body);
    let number = get_param(&params, "number")
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&n| in_range(n));
    let Some(n) = number else {
        return error(400, "Missing or invalid number parameter");
    };

    let n = n as u8;
    with_session(|session| {
        let extracted = session.toggle_extraction(n);
        let mut response = changed_value(session);
        response["toggled"] = json!({
            "number": n,
            "extracted": extracted,
            "card": session.board().card_of(n),
        });
        response.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reset_session;

    #[test]
    fn board_lists_six_cards_of_three_rows() {
        reset_session();
        let v: Value = serde_json::from_str(&handle_board_get("")).unwrap();
        let cards = v["cards"].as_array().unwrap();
        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0]["rows"].as_array().unwrap().len(), 3);
        assert_eq!(cards[0]["rows"][1][0]["number"], 11);
        assert_eq!(cards[5]["rows"][2][4]["number"], 90);
    }

    #[test]
    fn extract_marks_board_cell() {
        reset_session();
        let v: Value = serde_json::from_str(&handle_extract_post("number=12")).unwrap();
        assert_eq!(v["ok"], true);
        assert_eq!(v["state"]["history"], json!([12]));
        assert_eq!(v["toggled"], json!({ "number": 12, "extracted": true, "card": 0 }));
        assert_eq!(v["state"]["in_progress"], true);

        let board: Value = serde_json::from_str(&handle_board_get("")).unwrap();
        assert_eq!(board["cards"][0]["rows"][0][0]["extracted"], false);
        assert_eq!(board["cards"][0]["rows"][1][1]["extracted"], true);
        reset_session();
    }

    #[test]
    fn extract_twice_empties_history() {
        reset_session();
        handle_extract_post("number=23");
        let v: Value = serde_json::from_str(&handle_extract_post("number=23")).unwrap();
        assert_eq!(v["state"]["history"], json!([]));
        assert_eq!(v["state"]["in_progress"], false);
        assert_eq!(v["toggled"]["extracted"], false);
        reset_session();
    }

    #[test]
    fn extract_names_owning_card() {
        reset_session();
        let v: Value = serde_json::from_str(&handle_extract_post("number=47")).unwrap();
        assert_eq!(v["toggled"]["card"], 3);
        let v: Value = serde_json::from_str(&handle_extract_post("number=90")).unwrap();
        assert_eq!(v["toggled"]["card"], 5);
        reset_session();
    }

    #[test]
    fn extract_response_carries_store_blob() {
        reset_session();
        let v: Value = serde_json::from_str(&handle_extract_post("number=8")).unwrap();
        assert_eq!(v["store"]["key"], "tombola-state");
        let blob = v["store"]["blob"].as_str().unwrap();
        let state = crate::game::codec::decode_from_store(blob).unwrap();
        assert_eq!(state.history(), &[8]);
        reset_session();
    }

    #[test]
    fn extract_rejects_out_of_range() {
        reset_session();
        for body in ["number=0", "number=91", "number=abc", ""] {
            let v: Value = serde_json::from_str(&handle_extract_post(body)).unwrap();
            assert_eq!(v["ok"], false);
            assert_eq!(v["status"], 400);
        }
    }
}
