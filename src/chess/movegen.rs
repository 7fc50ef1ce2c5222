//! Per-piece [pseudo-legal] move rules over the square-centric
//! [`Board`].
//!
//! Every rule only reads the board: it takes the square a piece stands on and
//! appends the squares it can go to. A destination is valid if it is on the
//! board and not occupied by a piece of the same side; pawns additionally
//! distinguish pushes (onto empty squares) from captures (onto opponent
//! pieces). Whether the move leaves the own king in check is not considered.
//!
//! [pseudo-legal]: https://www.chessprogramming.org/Pseudo-Legal_Move

use crate::chess::board::Board;
use crate::chess::core::{Direction, Move, PieceKind, Player, Rank, Square};
use crate::chess::position::Targets;

/// Queen standing in the center of an empty board reaches 27 squares, which is
/// the maximum for any piece.
pub(super) const MAX_TARGETS: usize = 27;

const ROOK_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Right,
    Direction::Left,
];

const BISHOP_DIRECTIONS: [Direction; 4] = [
    Direction::UpRight,
    Direction::UpLeft,
    Direction::DownRight,
    Direction::DownLeft,
];

// (rank delta, file delta).
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (1, -2),
    (-1, 2),
    (1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Collects the moves of all pieces owned by `us`, visiting the squares in
/// rank-major order.
pub(super) fn generate_moves(board: &Board, us: Player) -> Vec<Move> {
    // 16 pieces with a handful of moves each; the starting position has 20.
    let mut moves = Vec::with_capacity(64);
    for (from, _) in board.pieces(us) {
        moves.extend(targets(board, from).into_iter().map(|to| Move::new(from, to)));
    }
    moves
}

/// Destinations of the piece standing on `from`, from the perspective of its
/// owner. Empty squares have no targets.
pub(super) fn targets(board: &Board, from: Square) -> Targets {
    let mut targets = Targets::new();
    let Some(piece) = board.at(from) else {
        return targets;
    };
    let us = piece.owner;
    match piece.kind {
        PieceKind::Pawn => pawn_targets(board, us, from, &mut targets),
        PieceKind::Rook => slider_targets(board, us, from, &ROOK_DIRECTIONS, &mut targets),
        PieceKind::Knight => leaper_targets(board, us, from, &KNIGHT_OFFSETS, &mut targets),
        PieceKind::Bishop => slider_targets(board, us, from, &BISHOP_DIRECTIONS, &mut targets),
        PieceKind::Queen => {
            slider_targets(board, us, from, &ROOK_DIRECTIONS, &mut targets);
            slider_targets(board, us, from, &BISHOP_DIRECTIONS, &mut targets);
        },
        PieceKind::King => leaper_targets(board, us, from, &KING_OFFSETS, &mut targets),
    }
    targets
}

/// Single push, double push from the starting rank and diagonal captures (in
/// that order). Both squares in front of the pawn have to be empty for the
/// double push.
fn pawn_targets(board: &Board, us: Player, from: Square, targets: &mut Targets) {
    let push_direction = us.push_direction();
    if let Some(single_push) = from.shift(push_direction) {
        if board.is_vacant(single_push) {
            targets.push(single_push);
            if from.rank() == Rank::pawns_starting(us) {
                if let Some(double_push) = single_push
                    .shift(push_direction)
                    .filter(|square| board.is_vacant(*square))
                {
                    targets.push(double_push);
                }
            }
        }
    }
    let (forward, _) = push_direction.delta();
    for file_delta in [-1, 1] {
        if let Some(capture) = from.offset(forward, file_delta) {
            // Only opponent pieces can be captured.
            if board.owner(capture) == Some(us.opponent()) {
                targets.push(capture);
            }
        }
    }
}

/// Walks each ray until the edge of the board or the first piece. Opponent
/// piece blocking the ray can be captured, our own one can not.
fn slider_targets(
    board: &Board,
    us: Player,
    from: Square,
    directions: &[Direction],
    targets: &mut Targets,
) {
    for &direction in directions {
        let mut current = from;
        while let Some(next) = current.shift(direction) {
            match board.owner(next) {
                None => targets.push(next),
                Some(owner) => {
                    if owner != us {
                        targets.push(next);
                    }
                    break;
                },
            }
            current = next;
        }
    }
}

/// Knights and kings jump to fixed offsets regardless of what stands in
/// between.
fn leaper_targets(
    board: &Board,
    us: Player,
    from: Square,
    offsets: &[(i8, i8)],
    targets: &mut Targets,
) {
    targets.extend(
        offsets
            .iter()
            .filter_map(|&(rank_delta, file_delta)| from.offset(rank_delta, file_delta))
            .filter(|&to| board.owner(to) != Some(us)),
    );
}
