//! HTTP move service: "given this board, pick a move".

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::board::Board;
use crate::game::{MoveSelector, choose_reply};
use crate::wire::MoveRequest;

/// Shown when a request carries no board, so a game state copied from a
/// match viewer can be pasted in by hand.
const PASTE_FORM: &str = r#"
<body><form method=get>
Paste JSON here:<p/><textarea name=json cols=80 rows=24></textarea>
<p/><input type=submit>
</form>
</body>"#;

#[derive(Clone)]
pub struct AppState {
    selector: Arc<dyn MoveSelector>,
}

pub fn router(selector: Arc<dyn MoveSelector>) -> Router {
    Router::new()
        .route("/", get(get_move).post(get_move))
        .with_state(AppState { selector })
}

/// Binds `addr` and serves [`router`] until the process stops.
pub async fn serve(addr: SocketAddr, selector: Arc<dyn MoveSelector>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("move service listening on {}", listener.local_addr()?);
    axum::serve(listener, router(selector)).await
}

async fn get_move(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    let Some(js) = payload(&body, &params) else {
        return Html(PASTE_FORM).into_response();
    };

    let board = match decode_board(js) {
        Ok(board) => board,
        Err(err) => {
            warn!("rejecting request with invalid json: {err}");
            return (StatusCode::BAD_REQUEST, format!("invalid json {js}? {err}")).into_response();
        }
    };
    debug!("got board: {board}");

    match choose_reply(&board, state.selector.as_ref()) {
        Ok(reply) => {
            info!(next = %board.next(), %reply, "answering");
            reply.to_string().into_response()
        }
        Err(err) => {
            error!("move selector broke its contract: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

/// First non-blank source of the following: body, `json` query param,
/// `board` query param.
fn payload<'a>(body: &'a str, params: &'a HashMap<String, String>) -> Option<&'a str> {
    std::iter::once(body)
        .chain(params.get("json").map(String::as_str))
        .chain(params.get("board").map(String::as_str))
        .find(|text| !text.trim().is_empty())
}

/// Accepts either `{"board": {...}}` (extra fields ignored) or a bare board.
fn decode_board(js: &str) -> Result<Board, serde_json::Error> {
    match serde_json::from_str::<MoveRequest>(js) {
        Ok(request) => Ok(request.board),
        Err(err) => serde_json::from_str::<Board>(js).map_err(|_| err),
    }
}
