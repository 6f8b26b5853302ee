//! JSON shapes exchanged with match servers and bots.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::MatchOutcome;

/// Body posted to a move service. Unknown fields are ignored, so the match
/// server's full game state decodes as a request too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    #[serde(alias = "Board")]
    pub board: Board,
}

/// Game state returned by the match server's poll endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    #[serde(default, alias = "Winner")]
    pub winner: MatchOutcome,
    #[serde(alias = "Board")]
    pub board: Board,
}
