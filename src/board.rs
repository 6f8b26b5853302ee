use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, MoveError};
use crate::types::{BOARD_SIZE, DIRECTIONS, Direction, Move, Piece, Position};

const WIDTH: usize = BOARD_SIZE as usize;

type Grid = [[Piece; WIDTH]; WIDTH];

/// Othello board: an 8x8 grid indexed by (row, column) plus the colour to move.
///
/// Boards are plain values. Mutating operations act on the receiver only;
/// use [`Board::after`] to get a successor without touching the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoardWire")]
pub struct Board {
    #[serde(rename = "Pieces")]
    pieces: Grid,
    #[serde(rename = "Next")]
    next: Piece,
}

#[derive(Deserialize)]
struct BoardWire {
    #[serde(rename = "Pieces", alias = "pieces")]
    pieces: Grid,
    #[serde(rename = "Next", alias = "next")]
    next: Piece,
}

impl TryFrom<BoardWire> for Board {
    type Error = BoardError;

    fn try_from(wire: BoardWire) -> Result<Self, Self::Error> {
        Board::from_pieces(wire.pieces, wire.next)
    }
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white, black to move.
    pub fn new() -> Self {
        let mut board = Self {
            pieces: [[Piece::Empty; WIDTH]; WIDTH],
            next: Piece::Black,
        };
        board.set(Position::new(4, 4), Piece::White);
        board.set(Position::new(5, 4), Piece::Black);
        board.set(Position::new(4, 5), Piece::Black);
        board.set(Position::new(5, 5), Piece::White);
        board
    }

    /// Builds a board from a raw grid. `pieces[row - 1][col - 1]` holds the
    /// cell at `Position::new(col, row)`.
    pub fn from_pieces(pieces: Grid, next: Piece) -> Result<Self, BoardError> {
        if !next.is_color() {
            return Err(BoardError::EmptyNext);
        }
        Ok(Self { pieces, next })
    }

    pub fn empty(next: Piece) -> Result<Self, BoardError> {
        Self::from_pieces([[Piece::Empty; WIDTH]; WIDTH], next)
    }

    /// Colour that must move next. Never [`Piece::Empty`].
    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn pieces(&self) -> &Grid {
        &self.pieces
    }

    /// Returns the piece at `pos`, or `None` when `pos` is off the board.
    pub fn get(&self, pos: Position) -> Option<Piece> {
        let (row, col) = index(pos)?;
        Some(self.pieces[row][col])
    }

    /// Writes `piece` at `pos` and returns what was there before.
    /// Returns `None` and changes nothing when `pos` is off the board.
    pub fn set(&mut self, pos: Position, piece: Piece) -> Option<Piece> {
        let (row, col) = index(pos)?;
        Some(std::mem::replace(&mut self.pieces[row][col], piece))
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        self.pieces
            .iter()
            .flatten()
            .fold((0, 0), |(black, white), piece| match piece {
                Piece::Black => (black + 1, white),
                Piece::White => (black, white + 1),
                Piece::Empty => (black, white),
            })
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black, white) = self.count();
        (WIDTH * WIDTH) as u8 - black - white
    }

    /// Checks a placement without executing it and returns the pieces it
    /// would flip. Performs no mutation.
    ///
    /// A pass pseudo-move never captures, so it reports
    /// [`MoveError::NoCapture`]; use [`Board::exec`] to play passes.
    pub fn try_move(&self, mv: Move) -> Result<Vec<Position>, MoveError> {
        let Some(occupant) = self.get(mv.at) else {
            return Err(MoveError::NoCapture { mv });
        };
        if occupant != Piece::Empty {
            return Err(MoveError::OccupiedCell { mv, occupant });
        }

        let captures: Vec<Position> = DIRECTIONS
            .iter()
            .flat_map(|&dir| self.find_captures(mv, dir))
            .collect();

        if captures.is_empty() {
            return Err(MoveError::NoCapture { mv });
        }
        Ok(captures)
    }

    /// Plays `mv` on this board and returns the flipped positions (empty for
    /// a pass). On error the board is left exactly as it was.
    ///
    /// The placement is judged for `mv.piece` as given; `next` flips on
    /// success whichever colour moved.
    pub fn exec(&mut self, mv: Move) -> Result<Vec<Position>, MoveError> {
        let captures = if mv.is_pass() {
            let available = self.valid_moves();
            if !available.is_empty() {
                return Err(MoveError::IllegalPass { mv, available });
            }
            Vec::new()
        } else {
            let captures = self.try_move(mv)?;
            for &pos in captures.iter().chain(std::iter::once(&mv.at)) {
                self.set(pos, mv.piece);
            }
            captures
        };

        self.next = self.next.opposite();
        Ok(captures)
    }

    /// Returns the board that results from `mv`, leaving `self` untouched.
    pub fn after(&self, mv: Move) -> Result<Board, MoveError> {
        let mut next = *self;
        next.exec(mv)?;
        Ok(next)
    }

    /// Legal placements for the side to move, in row-major order
    /// (row 1..8, then column 1..8). Empty means the side must pass.
    pub fn valid_moves(&self) -> Vec<Move> {
        (1..=BOARD_SIZE)
            .flat_map(|row| (1..=BOARD_SIZE).map(move |col| Position::new(col, row)))
            .map(|pos| Move::new(pos, self.next))
            .filter(|&mv| self.try_move(mv).is_ok())
            .collect()
    }

    pub fn must_pass(&self) -> bool {
        self.valid_moves().is_empty()
    }

    fn find_captures(&self, mv: Move, dir: Direction) -> Vec<Position> {
        let mut run = Vec::new();
        let mut pos = mv.at;
        loop {
            pos = pos.translate(dir);
            match self.get(pos) {
                None | Some(Piece::Empty) => return Vec::new(),
                Some(piece) if piece == mv.piece => return run,
                Some(_) => run.push(pos),
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LEGEND: &str = " |ABCDEFGH|";
        const FRAME: &str = "-+--------+";

        writeln!(f)?;
        writeln!(f, "{LEGEND}")?;
        writeln!(f, "{FRAME}")?;
        for (y, row) in self.pieces.iter().enumerate() {
            write!(f, "{}|", y + 1)?;
            for piece in row {
                write!(f, "{}", piece.glyph())?;
            }
            writeln!(f, "|{}", y + 1)?;
        }
        writeln!(f, "{FRAME}")?;
        writeln!(f, "{LEGEND}")
    }
}

fn index(pos: Position) -> Option<(usize, usize)> {
    if pos.is_valid() {
        Some(((pos.row - 1) as usize, (pos.col - 1) as usize))
    } else {
        None
    }
}
