//! Tests for positions, moves, and the turn stack.

use checkers_client::{Move, Position, Turn};

#[test]
fn test_position_validity() {
    assert!(Position::new(0, 0).is_valid());
    assert!(Position::new(7, 7).is_valid());
    assert!(!Position::new(8, 0).is_valid());
    assert!(!Position::new(0, 8).is_valid());
}

#[test]
fn test_position_inverse_mirrors_the_board() {
    assert_eq!(Position::new(0, 0).inverse(), Position::new(7, 7));
    assert_eq!(Position::new(2, 1).inverse(), Position::new(5, 6));
    // involution
    let pos = Position::new(3, 4);
    assert_eq!(pos.inverse().inverse(), pos);
}

#[test]
fn test_move_reverse_swaps_endpoints() {
    let mv = Move::new(Position::new(2, 1), Position::new(3, 2));
    let back = mv.reverse();
    assert_eq!(back.start(), mv.end());
    assert_eq!(back.end(), mv.start());
    assert_eq!(back.reverse(), mv);
}

#[test]
fn test_move_classification() {
    let simple = Move::new(Position::new(2, 1), Position::new(3, 2));
    assert!(simple.is_simple_move());
    assert!(!simple.is_jump());

    let jump = Move::new(Position::new(2, 1), Position::new(4, 3));
    assert!(jump.is_jump());
    assert!(!jump.is_simple_move());

    // neither a step nor a jump
    let sideways = Move::new(Position::new(2, 1), Position::new(2, 3));
    assert!(!sideways.is_simple_move());
    assert!(!sideways.is_jump());
}

#[test]
fn test_turn_stack_discipline() {
    let m1 = Move::new(Position::new(2, 1), Position::new(3, 2));
    let m2 = Move::new(Position::new(3, 2), Position::new(4, 3));

    let mut turn = Turn::new();
    assert!(turn.is_empty());

    turn.push(m1);
    turn.push(m2);
    assert_eq!(turn.len(), 2);
    assert_eq!(turn.moves(), &[m1, m2]);

    // pop is the exact inverse of the most recent push
    let before = turn.clone();
    turn.push(Move::new(Position::new(4, 3), Position::new(5, 4)));
    turn.pop();
    assert_eq!(turn, before);

    assert_eq!(turn.pop(), Some(m2));
    assert_eq!(turn.pop(), Some(m1));
    assert_eq!(turn.pop(), None);
    assert!(turn.is_empty());
}
