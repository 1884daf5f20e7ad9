use serde::{Deserialize, Serialize};

use crate::board::{Mark, NUM_CELLS};

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Win(Mark),
    Tie,
}

impl Outcome {
    /// Key of the tally this outcome increments in the persisted scores.
    pub fn score_key(self) -> &'static str {
        match self {
            Outcome::Win(Mark::X) => "X",
            Outcome::Win(Mark::O) => "O",
            Outcome::Tie => "tie",
        }
    }
}

/// Win/tie tallies. Serialized as `{"X": n, "O": n, "tie": n}`.
///
/// Missing keys deserialize to zero, so a partial stored object is merged
/// into the defaults. Unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scores {
    #[serde(rename = "X")]
    pub x: u32,
    #[serde(rename = "O")]
    pub o: u32,
    pub tie: u32,
}

impl Scores {
    pub fn record(&mut self, outcome: Outcome) {
        let tally = match outcome {
            Outcome::Win(Mark::X) => &mut self.x,
            Outcome::Win(Mark::O) => &mut self.o,
            Outcome::Tie => &mut self.tie,
        };
        *tally = tally.saturating_add(1);
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 0=empty, 1=X, 2=O, row-major.
    pub board: [u8; NUM_CELLS],
    pub current_player: Mark,
    pub scores: Scores,
    /// Contract:
    /// - `Some` only on the snapshot returned by the click that ended a round.
    /// - The board in that snapshot is already reset.
    pub last_outcome: Option<Outcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_serialize_with_original_key_names() {
        let scores = Scores { x: 3, o: 1, tie: 2 };

        let json = serde_json::to_string(&scores).unwrap();

        assert_eq!(json, r#"{"X":3,"O":1,"tie":2}"#);
    }

    #[test]
    fn partial_scores_object_merges_into_defaults() {
        let scores: Scores = serde_json::from_str(r#"{"O":4}"#).unwrap();

        assert_eq!(scores, Scores { x: 0, o: 4, tie: 0 });
    }

    #[test]
    fn negative_or_non_integer_tallies_are_rejected() {
        assert!(serde_json::from_str::<Scores>(r#"{"X":-1,"O":0,"tie":0}"#).is_err());
        assert!(serde_json::from_str::<Scores>(r#"{"X":"3","O":0,"tie":0}"#).is_err());
        assert!(serde_json::from_str::<Scores>(r#"{"X":1.5}"#).is_err());
    }

    #[test]
    fn record_increments_only_matching_tally() {
        let mut scores = Scores::default();

        scores.record(Outcome::Win(Mark::O));
        scores.record(Outcome::Tie);
        scores.record(Outcome::Tie);

        assert_eq!(scores, Scores { x: 0, o: 1, tie: 2 });
    }

    #[test]
    fn score_keys_match_persisted_field_names() {
        assert_eq!(Outcome::Win(Mark::X).score_key(), "X");
        assert_eq!(Outcome::Win(Mark::O).score_key(), "O");
        assert_eq!(Outcome::Tie.score_key(), "tie");
    }
}
