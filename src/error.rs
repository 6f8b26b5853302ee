//! Error types for the rules engine and the move-service boundary.
//!
//! Every engine error names the offending move so callers can report a
//! precise diagnostic. None of them are fatal: the caller decides whether an
//! illegal move is a protocol violation or a reason to ask again.

use std::fmt;

use thiserror::Error;

use crate::types::{Move, Piece, Position};

/// Why a move was rejected by [`Board::exec`](crate::board::Board::exec).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Placement onto a non-empty cell
    #[error("{mv} illegal move: {} is occupied by {occupant}", .mv.at)]
    OccupiedCell { mv: Move, occupant: Piece },

    /// Placement that flips nothing in any direction
    #[error("{mv} illegal move: no pieces were captured")]
    NoCapture { mv: Move },

    /// Pass while at least one placement is legal
    #[error("{mv} illegal move: there are valid moves available: {}", MoveList(.available))]
    IllegalPass { mv: Move, available: Vec<Move> },
}

/// Errors building or decoding a [`Board`](crate::board::Board).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no side to move (Next is Empty)")]
    EmptyNext,

    #[error("unknown piece code {0} (expected 0, 1 or 2)")]
    UnknownPiece(u8),

    #[error("unknown match outcome code {0} (expected 0 to 3)")]
    UnknownOutcome(u8),
}

/// A move selector broke its contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selector passed although {} moves are available", .available.len())]
    PassWithMovesAvailable { available: Vec<Move> },

    #[error("selector chose {chosen}, which is not one of: {}", MoveList(.available))]
    IllegalChoice { chosen: Position, available: Vec<Move> },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse move reply {0:?}")]
pub struct ReplyParseError(pub String);

struct MoveList<'a>(&'a [Move]);

impl fmt::Display for MoveList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, mv) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{mv}")?;
        }
        f.write_str("]")
    }
}
