pub mod board;
pub mod error;
pub mod game;
pub mod types;
pub mod wasm;
pub mod wire;

#[cfg(not(target_arch = "wasm32"))]
pub mod config;
#[cfg(not(target_arch = "wasm32"))]
pub mod reflector;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;

pub use board::Board;
pub use error::{BoardError, MoveError, SelectionError};
pub use game::{FirstLegalMoveSelector, MoveSelector, RandomMoveSelector, Reply, choose_reply};
pub use types::{MatchOutcome, Move, Piece, Position};
