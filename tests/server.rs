//! Move service integration tests using the Router::oneshot pattern.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use othello::{
    Board, FirstLegalMoveSelector, MoveSelector, Piece, Position, RandomMoveSelector, Reply,
    server,
};
use serde_json::json;
use tower::ServiceExt;

struct CornerSelector;

impl MoveSelector for CornerSelector {
    fn select_move(&self, _board: &Board) -> Option<Position> {
        Some(Position::new(1, 1))
    }
}

fn app() -> Router {
    server::router(Arc::new(RandomMoveSelector::new(42)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

fn post(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn blocked_board() -> Board {
    let mut board = Board::empty(Piece::White).unwrap();
    board.set(Position::new(8, 8), Piece::Black);
    board
}

#[tokio::test]
async fn test_post_returns_one_of_the_legal_moves() {
    let board = Board::new();
    let body = json!({ "winner": 0, "board": board }).to_string();

    let (status, _, text) = send(app(), post(body)).await;

    assert_eq!(status, StatusCode::OK);
    let Ok(Reply::Place(at)) = text.parse::<Reply>() else {
        panic!("expected a coordinate reply, got {text:?}");
    };
    assert!(text.starts_with('[') && text.ends_with(']'));
    assert!(board.valid_moves().iter().any(|mv| mv.at == at));
}

#[tokio::test]
async fn test_pass_when_no_move_is_available() {
    let body = json!({ "board": blocked_board() }).to_string();

    let (status, _, text) = send(app(), post(body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "PASS");
}

#[tokio::test]
async fn test_first_legal_strategy_is_deterministic() {
    let app = server::router(Arc::new(FirstLegalMoveSelector));
    let body = json!({ "board": Board::new() }).to_string();

    let (_, _, text) = send(app, post(body)).await;

    assert_eq!(text, "[4,3]");
}

#[tokio::test]
async fn test_empty_request_serves_the_paste_form() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, content_type, text) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert!(text.contains("<textarea name=json"));
}

#[tokio::test]
async fn test_json_query_parameter_is_read_on_get() {
    let js = json!({ "board": blocked_board() }).to_string();
    let uri = format!("/?json={}", urlencode(&js));
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let (status, _, text) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "PASS");
}

#[tokio::test]
async fn test_bare_board_query_parameter_is_accepted() {
    let js = serde_json::to_string(&Board::new()).unwrap();
    let uri = format!("/?board={}", urlencode(&js));
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let app = server::router(Arc::new(FirstLegalMoveSelector));

    let (status, _, text) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(text, "[4,3]");
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let (status, _, text) = send(app(), post("{\"board\": [".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.starts_with("invalid json {\"board\": [?"));
}

#[tokio::test]
async fn test_board_without_side_to_move_is_a_bad_request() {
    let mut board = json!(Board::new());
    board["Next"] = json!(0);
    let body = json!({ "board": board }).to_string();

    let (status, _, _) = send(app(), post(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_selector_contract_violation_is_a_server_error() {
    let app = server::router(Arc::new(CornerSelector));
    let body = json!({ "board": Board::new() }).to_string();

    let (status, _, text) = send(app, post(body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(text.contains("selector chose [1,1]"));
}

fn urlencode(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}
