//! Rules-engine invariants checked over generated boards.

use othello::{Board, Move, MoveError, Piece, Position};
use proptest::prelude::*;

fn color() -> impl Strategy<Value = Piece> {
    prop_oneof![Just(Piece::Black), Just(Piece::White)]
}

/// Arbitrary cell contents, not necessarily reachable in a real game.
fn scattered_board() -> impl Strategy<Value = Board> {
    let cell = (0u8..3).prop_map(|code| Piece::try_from(code).unwrap());
    let grid = proptest::array::uniform8(proptest::array::uniform8(cell));
    (grid, color()).prop_map(|(pieces, next)| Board::from_pieces(pieces, next).unwrap())
}

/// Positions reached by playing `choices` from the start, passing when forced.
fn played_board() -> impl Strategy<Value = Board> {
    proptest::collection::vec(any::<u8>(), 0..60).prop_map(|choices| {
        let mut board = Board::new();
        for choice in choices {
            let moves = board.valid_moves();
            let mv = if moves.is_empty() {
                Move::pass(board.next())
            } else {
                moves[choice as usize % moves.len()]
            };
            board.exec(mv).unwrap();
        }
        board
    })
}

fn any_board() -> impl Strategy<Value = Board> {
    prop_oneof![scattered_board(), played_board()]
}

fn all_positions() -> impl Iterator<Item = Position> {
    (1..=8).flat_map(|row| (1..=8).map(move |col| Position::new(col, row)))
}

proptest! {
    #[test]
    fn every_enumerated_move_is_legal_and_captures(board in any_board()) {
        for mv in board.valid_moves() {
            prop_assert_eq!(mv.piece, board.next());
            let captures = board.try_move(mv).unwrap();
            prop_assert!(!captures.is_empty());
            prop_assert!(captures.iter().all(|&p| board.get(p) == Some(board.next().opposite())));
        }
    }

    #[test]
    fn every_other_square_is_rejected(board in any_board()) {
        let legal: Vec<Position> = board.valid_moves().iter().map(|mv| mv.at).collect();
        for pos in all_positions().filter(|p| !legal.contains(p)) {
            let result = board.try_move(Move::new(pos, board.next()));
            let rejected = matches!(
                result,
                Err(MoveError::OccupiedCell { .. }) | Err(MoveError::NoCapture { .. })
            );
            prop_assert!(rejected);
        }
    }

    #[test]
    fn pass_is_legal_exactly_when_no_move_exists(board in any_board()) {
        let available = board.valid_moves();
        let mv = Move::pass(board.next());
        match board.after(mv) {
            Ok(next) => {
                prop_assert!(available.is_empty());
                prop_assert_eq!(next.pieces(), board.pieces());
                prop_assert_eq!(next.next(), board.next().opposite());
            }
            Err(err) => prop_assert_eq!(err, MoveError::IllegalPass { mv, available }),
        }
    }

    #[test]
    fn successful_moves_flip_the_turn_and_the_captures(board in any_board()) {
        for mv in board.valid_moves() {
            let captures = board.try_move(mv).unwrap();
            let mut next = board;
            prop_assert_eq!(next.exec(mv), Ok(captures.clone()));
            prop_assert_eq!(next.next(), board.next().opposite());
            prop_assert_eq!(next.get(mv.at), Some(mv.piece));
            for pos in all_positions() {
                let changed = pos == mv.at || captures.contains(&pos);
                let expected = if changed { Some(mv.piece) } else { board.get(pos) };
                prop_assert_eq!(next.get(pos), expected);
            }
        }
    }

    #[test]
    fn illegal_moves_leave_the_board_untouched(
        board in any_board(),
        col in 1i32..=8,
        row in 1i32..=8,
    ) {
        let mv = Move::new(Position::new(col, row), board.next());
        let mut copy = board;
        if copy.exec(mv).is_err() {
            prop_assert_eq!(copy, board);
            prop_assert!(board.after(mv).is_err());
        }
    }

    #[test]
    fn capture_scan_is_deterministic(board in any_board(), col in 1i32..=8, row in 1i32..=8) {
        let mv = Move::new(Position::new(col, row), board.next());
        prop_assert_eq!(board.try_move(mv), board.try_move(mv));
    }

    #[test]
    fn played_games_keep_piece_counts_consistent(board in played_board()) {
        let (black, white) = board.count();
        prop_assert!(black + white >= 4);
        prop_assert_eq!(black + white + board.empty_count(), 64);
    }
}
