#![no_main]
use std::num::NonZeroU32;

use libfuzzer_sys::fuzz_target;
use mailbox::chess::board::Board;
use mailbox::chess::core::{Piece, PieceKind, Player, Square};
use mailbox::chess::position::Position;

const KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
];

// The first byte decides the turn, each of the following bytes fills one
// square: values below 12 place a piece, everything else leaves it empty.
fuzz_target!(|data: &[u8]| {
    let Some((&turn, squares)) = data.split_first() else {
        return;
    };
    let mut board = Board::empty();
    for (square, &byte) in Square::iter().zip(squares) {
        if byte < 12 {
            let owner = if byte < 6 { Player::White } else { Player::Black };
            let _ = board.set(square, Some(Piece::new(owner, KINDS[usize::from(byte % 6)])));
        }
    }
    let position = Position::new(board, NonZeroU32::MIN.saturating_add(u32::from(turn)));
    let us = position.current_turn();
    for next_move in position.list_next_moves() {
        assert_eq!(position.board().owner(next_move.from()), Some(us));
        assert_ne!(position.board().owner(next_move.to()), Some(us));
        assert!(position.make_move(next_move).is_ok());
    }
});
