use std::fmt;
use std::str::FromStr;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::board::Board;
use crate::error::{ReplyParseError, SelectionError};
use crate::types::Position;

/// A move-picking strategy for the side to move.
///
/// Contract: return `None` (pass) only when `board.valid_moves()` is empty,
/// otherwise return the position of one of those moves.
/// [`choose_reply`] enforces this.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board) -> Option<Position>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, board: &Board) -> Option<Position> {
        board.valid_moves().first().map(|mv| mv.at)
    }
}

/// Uniform choice over the legal moves.
///
/// With a fixed seed the sequence of choices is reproducible because
/// [`Board::valid_moves`] has a fixed order.
#[derive(Debug)]
pub struct RandomMoveSelector {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomMoveSelector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }
}

impl MoveSelector for RandomMoveSelector {
    fn select_move(&self, board: &Board) -> Option<Position> {
        let moves = board.valid_moves();
        let mut rng = self.rng.lock();
        moves.choose(&mut *rng).map(|mv| mv.at)
    }
}

/// Answer of the move service: the literal `PASS` or `[x,y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Pass,
    Place(Position),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Pass => f.write_str("PASS"),
            Reply::Place(pos) => write!(f, "{pos}"),
        }
    }
}

impl FromStr for Reply {
    type Err = ReplyParseError;

    /// Accepts `PASS`, `[x,y]` and square names such as `C5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let err = || ReplyParseError(s.to_string());

        if text.eq_ignore_ascii_case("pass") {
            return Ok(Reply::Pass);
        }

        if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            let (col, row) = inner.split_once(',').ok_or_else(err)?;
            let col = col.trim().parse().map_err(|_| err())?;
            let row = row.trim().parse().map_err(|_| err())?;
            let pos = Position::new(col, row);
            return Ok(if pos.is_valid() {
                Reply::Place(pos)
            } else {
                Reply::Pass
            });
        }

        Position::from_notation(text)
            .map(Reply::Place)
            .ok_or_else(err)
    }
}

/// Asks `selector` for a move and checks it against the legal-move set.
pub fn choose_reply(board: &Board, selector: &dyn MoveSelector) -> Result<Reply, SelectionError> {
    let available = board.valid_moves();

    match selector.select_move(board) {
        None if available.is_empty() => Ok(Reply::Pass),
        None => Err(SelectionError::PassWithMovesAvailable { available }),
        Some(chosen) if available.iter().any(|mv| mv.at == chosen) => Ok(Reply::Place(chosen)),
        Some(chosen) if available.is_empty() && chosen.is_pass() => Ok(Reply::Pass),
        Some(chosen) => Err(SelectionError::IllegalChoice { chosen, available }),
    }
}
