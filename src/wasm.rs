//! JavaScript bindings for browser front-ends.
//!
//! Boards and moves cross the boundary in the same shapes as the JSON wire
//! format: `{Pieces, Next}` and `{Where, As}`.

use wasm_bindgen::prelude::*;

use crate::board::Board;
use crate::game::{RandomMoveSelector, choose_reply};
use crate::types::Move;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Legal placements for the side to move, in row-major order.
#[wasm_bindgen(js_name = validMoves)]
pub fn valid_moves(board: JsValue) -> Result<JsValue, JsValue> {
    let board: Board = from_js(board)?;
    to_js(&board.valid_moves())
}

/// Returns the board after `mv`; throws the engine's message when illegal.
#[wasm_bindgen(js_name = applyMove)]
pub fn apply_move(board: JsValue, mv: JsValue) -> Result<JsValue, JsValue> {
    let board: Board = from_js(board)?;
    let mv: Move = from_js(mv)?;
    let next = board
        .after(mv)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    to_js(&next)
}

/// Reply text (`PASS` or `[x,y]`) from a random pick seeded with `seed`.
#[wasm_bindgen(js_name = pickMove)]
pub fn pick_move(board: JsValue, seed: u64) -> Result<String, JsValue> {
    let board: Board = from_js(board)?;
    let selector = RandomMoveSelector::new(seed);
    choose_reply(&board, &selector)
        .map(|reply| reply.to_string())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsValue::from)
}

fn to_js<T: serde::Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}
