use tracing::{debug, info, instrument, warn};

use crate::board::{Board, Mark, NUM_CELLS, evaluate_outcome};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::storage::{KeyValueStore, load_scores, save_scores};
use crate::types::{GameState, Outcome, Scores};

/// Everything a round of play needs, as one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub board: Board,
    pub current_player: Mark,
    pub scores: Scores,
}

impl Default for Round {
    fn default() -> Self {
        Self::with_scores(Scores::default())
    }
}

/// Result of one click, computed without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Occupied cell. Nothing changed.
    Ignored,
    /// Mark placed, turn passed to the other player.
    Continued(Round),
    /// Mark placed and the round ended. `round` is already reset and tallied.
    Concluded { round: Round, outcome: Outcome },
}

impl Round {
    pub fn with_scores(scores: Scores) -> Self {
        Self {
            board: Board::new(),
            current_player: Mark::X,
            scores,
        }
    }

    /// Places the current player's mark at `pos` and runs the post-move rule.
    /// Caller contract: `pos < 9`.
    pub fn click(&self, pos: usize) -> Transition {
        let Some(board) = self.board.place(pos, self.current_player) else {
            return Transition::Ignored;
        };

        match evaluate_outcome(&board) {
            Some(outcome) => {
                let mut scores = self.scores;
                scores.record(outcome);
                Transition::Concluded {
                    round: Round::with_scores(scores),
                    outcome,
                }
            }
            None => Transition::Continued(Round {
                board,
                current_player: !self.current_player,
                scores: self.scores,
            }),
        }
    }
}

pub struct GameController {
    round: Round,
    config: GameConfig,
    store: Box<dyn KeyValueStore>,
    last_outcome: Option<Outcome>,
}

impl GameController {
    /// Loads stored tallies once, then starts an empty round with X to move.
    #[instrument(skip(store), fields(key = %config.storage_key))]
    pub fn new(config: GameConfig, store: Box<dyn KeyValueStore>) -> Self {
        let scores = load_scores(store.as_ref(), &config.storage_key);
        debug!(?scores, "scores loaded");
        Self {
            round: Round::with_scores(scores),
            config,
            store,
            last_outcome: None,
        }
    }

    /// Handles a click on cell `pos`.
    ///
    /// Clicks on occupied cells are ignored. When the move ends the round the
    /// tallies are written to the store; a failed write is logged and play
    /// continues with the in-memory scores.
    #[instrument(skip(self), fields(player = %self.round.current_player))]
    pub fn handle_cell_click(&mut self, pos: usize) -> Result<Transition> {
        if pos >= NUM_CELLS {
            return Err(GameError::CellOutOfRange(pos));
        }

        let transition = self.round.click(pos);
        match transition {
            Transition::Ignored => {
                debug!("cell already marked");
                self.last_outcome = None;
            }
            Transition::Continued(round) => {
                self.round = round;
                self.last_outcome = None;
            }
            Transition::Concluded { round, outcome } => {
                info!(outcome = outcome.score_key(), scores = ?round.scores, "round concluded");
                self.round = round;
                self.last_outcome = Some(outcome);
                self.persist_scores();
            }
        }

        Ok(transition)
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn board(&self) -> &Board {
        &self.round.board
    }

    pub fn current_player(&self) -> Mark {
        self.round.current_player
    }

    pub fn scores(&self) -> &Scores {
        &self.round.scores
    }

    pub fn to_game_state(&self) -> GameState {
        GameState {
            board: self.round.board.to_array(),
            current_player: self.round.current_player,
            scores: self.round.scores,
            last_outcome: self.last_outcome,
        }
    }

    fn persist_scores(&mut self) {
        if let Err(err) = save_scores(
            self.store.as_mut(),
            &self.config.storage_key,
            &self.round.scores,
        ) {
            warn!(%err, "scores not persisted");
        }
    }
}
