use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

pub const BOARD_SIZE: i32 = 8;

/// The 8 unit vectors scanned outward from a candidate placement.
pub const DIRECTIONS: [Direction; 8] = [
    Direction::new(-1, -1),
    Direction::new(-1, 0),
    Direction::new(-1, 1),
    Direction::new(0, -1),
    Direction::new(0, 1),
    Direction::new(1, -1),
    Direction::new(1, 0),
    Direction::new(1, 1),
];

/// Contents of a single cell, and the colour of a player.
///
/// Wire code: 0=empty, 1=black, 2=white. Some match front-ends call the
/// colours red and blue; see [`Piece::RED`] and [`Piece::BLUE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Piece {
    #[default]
    Empty,
    Black,
    White,
}

impl Piece {
    pub const RED: Piece = Piece::Black;
    pub const BLUE: Piece = Piece::White;

    /// Black and white swap; empty stays empty.
    pub fn opposite(self) -> Self {
        match self {
            Piece::Black => Piece::White,
            Piece::White => Piece::Black,
            Piece::Empty => Piece::Empty,
        }
    }

    pub fn is_color(self) -> bool {
        self != Piece::Empty
    }

    /// Glyph used by the board diagram.
    pub fn glyph(self) -> char {
        match self {
            Piece::Black => 'X',
            Piece::White => 'O',
            Piece::Empty => ' ',
        }
    }
}

impl TryFrom<u8> for Piece {
    type Error = BoardError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Piece::Empty),
            1 => Ok(Piece::Black),
            2 => Ok(Piece::White),
            other => Err(BoardError::UnknownPiece(other)),
        }
    }
}

impl From<Piece> for u8 {
    fn from(piece: Piece) -> Self {
        match piece {
            Piece::Empty => 0,
            Piece::Black => 1,
            Piece::White => 2,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Piece::Empty => "Empty",
            Piece::Black => "Black",
            Piece::White => "White",
        };
        f.write_str(name)
    }
}

/// A board coordinate, 1-based: `col` and `row` are valid in `1..=8`.
///
/// Any other value is a pass. `Position::PASS` is the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub const PASS: Position = Position { col: 0, row: 0 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn is_valid(self) -> bool {
        let on_board = |i: i32| (1..=BOARD_SIZE).contains(&i);
        on_board(self.col) && on_board(self.row)
    }

    pub fn is_pass(self) -> bool {
        !self.is_valid()
    }

    /// Steps one cell in `dir`. The result may be off the board.
    pub fn translate(self, dir: Direction) -> Self {
        Self {
            col: self.col + dir.dcol,
            row: self.row + dir.drow,
        }
    }

    /// Square name such as `C5`, or `None` for a pass.
    pub fn notation(self) -> Option<String> {
        if self.is_pass() {
            return None;
        }
        let file = (b'A' + (self.col - 1) as u8) as char;
        Some(format!("{file}{}", self.row))
    }

    /// Parses a square name such as `C5` (case-insensitive).
    pub fn from_notation(text: &str) -> Option<Self> {
        let &[file, rank] = text.as_bytes() else {
            return None;
        };
        let file = file.to_ascii_uppercase();
        if !(b'A'..=b'H').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Self::new(
            (file - b'A') as i32 + 1,
            (rank - b'0') as i32,
        ))
    }
}

impl From<[i32; 2]> for Position {
    fn from([col, row]: [i32; 2]) -> Self {
        Self { col, row }
    }
}

impl From<Position> for [i32; 2] {
    fn from(pos: Position) -> Self {
        [pos.col, pos.row]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.col, self.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dcol: i32,
    pub drow: i32,
}

impl Direction {
    pub const fn new(dcol: i32, drow: i32) -> Self {
        Self { dcol, drow }
    }
}

/// A placement (or pass, when `at` is not a valid position) by `piece`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    #[serde(rename = "Where", alias = "where")]
    pub at: Position,
    #[serde(rename = "As", alias = "as")]
    pub piece: Piece,
}

impl Move {
    pub fn new(at: Position, piece: Piece) -> Self {
        Self { at, piece }
    }

    pub fn pass(piece: Piece) -> Self {
        Self::new(Position::PASS, piece)
    }

    pub fn is_pass(&self) -> bool {
        self.at.is_pass()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            write!(f, "{{PASS as {}}}", self.piece)
        } else {
            write!(f, "{{{} as {}}}", self.at, self.piece)
        }
    }
}

/// Winner field reported by the match server.
///
/// Kept apart from [`Piece`]: a tie is a match result, never a cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MatchOutcome {
    #[default]
    Undecided,
    Black,
    White,
    Tie,
}

impl MatchOutcome {
    pub fn is_decided(self) -> bool {
        self != MatchOutcome::Undecided
    }
}

impl TryFrom<u8> for MatchOutcome {
    type Error = BoardError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(MatchOutcome::Undecided),
            1 => Ok(MatchOutcome::Black),
            2 => Ok(MatchOutcome::White),
            3 => Ok(MatchOutcome::Tie),
            other => Err(BoardError::UnknownOutcome(other)),
        }
    }
}

impl From<MatchOutcome> for u8 {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome {
            MatchOutcome::Undecided => 0,
            MatchOutcome::Black => 1,
            MatchOutcome::White => 2,
            MatchOutcome::Tie => 3,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchOutcome::Undecided => "nobody yet",
            MatchOutcome::Black => "Black/X/Red",
            MatchOutcome::White => "White/O/Blue",
            MatchOutcome::Tie => "neither",
        };
        f.write_str(name)
    }
}
