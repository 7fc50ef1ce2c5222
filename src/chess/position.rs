//! Provides the state of the game: the [`Board`] together with the turn
//! counter that decides which side is to move.
//!
//! The entry point of the move generator lives here: [`Position::list_next_moves`]
//! enumerates [pseudo-legal] moves of the side to move. [`Position`] is never
//! mutated by the generator. Advancing the turn and applying moves are done by
//! the caller through [`Position::next_turn`] and [`Position::make_move`],
//! both of which produce a new [`Position`].
//!
//! [pseudo-legal]: https://www.chessprogramming.org/Pseudo-Legal_Move

use std::fmt;
use std::num::NonZeroU32;

use anyhow::bail;
use arrayvec::ArrayVec;
use log::trace;

use crate::chess::board::Board;
use crate::chess::core::{Move, Player, Square};
use crate::chess::movegen;

/// Destinations of a single piece. No piece can reach more than 27 squares, so
/// these are stored inline.
pub type Targets = ArrayVec<Square, { movegen::MAX_TARGETS }>;

/// Board and the turn counter.
///
/// The turn counter starts at 1 and is incremented after every move of either
/// side. Odd turns belong to White, even turns belong to Black. The counter
/// never wraps: advancing past [`u32::MAX`] is an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    turn: NonZeroU32,
}

impl Position {
    /// Creates the starting position of the standard chess variant with White
    /// to move.
    ///
    /// ```
    /// use mailbox::chess::core::Player;
    /// use mailbox::chess::position::Position;
    ///
    /// let starting_position = Position::starting();
    /// assert_eq!(starting_position.turn().get(), 1);
    /// assert_eq!(starting_position.current_turn(), Player::White);
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        Self::new(Board::starting(), NonZeroU32::MIN)
    }

    /// Creates an empty board with White to move.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Board::empty(), NonZeroU32::MIN)
    }

    /// Creates a position from an arbitrary board at the given turn.
    #[must_use]
    pub const fn new(board: Board, turn: NonZeroU32) -> Self {
        Self { board, turn }
    }

    /// Read access to the piece placement.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Value of the turn counter, starting at 1.
    #[must_use]
    pub const fn turn(&self) -> NonZeroU32 {
        self.turn
    }

    /// Returns the side to move: White on odd turns, Black on even ones.
    ///
    /// ```
    /// use mailbox::chess::core::Player;
    /// use mailbox::chess::position::Position;
    ///
    /// let position = Position::starting();
    /// assert_eq!(position.current_turn(), Player::White);
    /// assert_eq!(position.next_turn()?.current_turn(), Player::Black);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub const fn current_turn(&self) -> Player {
        if self.turn.get() % 2 == 1 {
            Player::White
        } else {
            Player::Black
        }
    }

    /// Calculates the list of pseudo-legal moves for the side to move: every
    /// piece follows its movement rules and never lands on a square occupied by
    /// its own side, but checks are not taken into account.
    ///
    /// Moves are grouped by the piece making them and pieces are visited in
    /// rank-major order (A1, B1, ..., H1, A2, ...). The order within a piece is
    /// fixed by its movement rule, which makes the output deterministic.
    #[must_use]
    pub fn list_next_moves(&self) -> Vec<Move> {
        let us = self.current_turn();
        let moves = movegen::generate_moves(&self.board, us);
        trace!("turn {}: {} moves for {us}", self.turn, moves.len());
        moves
    }

    /// Pseudo-legal destinations of the piece on `square` regardless of whose
    /// turn it is (the owner of the piece is considered to be moving). Returns
    /// no targets for an empty square.
    ///
    /// ```
    /// use mailbox::chess::core::Square;
    /// use mailbox::chess::position::Position;
    ///
    /// let position = Position::starting();
    /// assert_eq!(
    ///     position.targets(Square::G8).as_slice(),
    ///     &[Square::F6, Square::H6]
    /// );
    /// assert!(position.targets(Square::E4).is_empty());
    /// ```
    #[must_use]
    pub fn targets(&self, square: Square) -> Targets {
        movegen::targets(&self.board, square)
    }

    /// Returns the same board with the turn passed to the other side.
    ///
    /// # Errors
    ///
    /// If the turn counter is already at [`u32::MAX`].
    pub fn next_turn(&self) -> anyhow::Result<Self> {
        Ok(Self::new(self.board.clone(), self.advanced_turn()?))
    }

    /// Returns the position after the piece on `from` moves to `to` and the
    /// turn passes to the other side. Anything standing on `to` is captured.
    ///
    /// The move is not checked against the movement rules, only against the
    /// ownership of the moving piece.
    ///
    /// # Errors
    ///
    /// If there is no piece of the side to move on `from`, the move does not
    /// change the square or the turn counter is already at [`u32::MAX`].
    pub fn make_move(&self, next_move: Move) -> anyhow::Result<Self> {
        let (from, to) = (next_move.from(), next_move.to());
        if from == to {
            bail!("piece on {from} has to leave its square");
        }
        let turn = self.advanced_turn()?;
        let us = self.current_turn();
        let mut board = self.board.clone();
        let piece = match board.set(from, None) {
            Some(piece) if piece.owner == us => piece,
            Some(piece) => bail!("{from} holds a {} piece but {us} is to move", piece.owner),
            None => bail!("there is no piece on {from}"),
        };
        match board.set(to, Some(piece)) {
            Some(captured) => trace!("turn {}: {piece} {from}x{to} captures {captured}", self.turn),
            None => trace!("turn {}: {piece} {from}-{to}", self.turn),
        }
        Ok(Self::new(board, turn))
    }

    fn advanced_turn(&self) -> anyhow::Result<NonZeroU32> {
        match self.turn.checked_add(1) {
            Some(turn) => Ok(turn),
            None => bail!("turn counter overflow after turn {}", self.turn),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        write!(f, "Turn {}: {} to move", self.turn, self.current_turn())
    }
}

#[cfg(test)]
mod test {
    use std::num::NonZeroU32;

    use pretty_assertions::assert_eq;

    use super::Position;
    use crate::chess::board::Board;
    use crate::chess::core::{Move, Piece, PieceKind, Player, Square};

    #[test]
    fn turns_alternate() {
        let mut position = Position::starting();
        let mut players = vec![];
        for turn in 1..=6 {
            assert_eq!(position.turn().get(), turn);
            players.push(position.current_turn());
            position = position.next_turn().unwrap();
        }
        assert_eq!(
            players,
            vec![
                Player::White,
                Player::Black,
                Player::White,
                Player::Black,
                Player::White,
                Player::Black,
            ]
        );
    }

    #[test]
    fn parity_of_arbitrary_turns() {
        let white = NonZeroU32::new(41).unwrap();
        let black = NonZeroU32::new(1000).unwrap();
        assert_eq!(
            Position::new(Board::empty(), white).current_turn(),
            Player::White
        );
        assert_eq!(
            Position::new(Board::empty(), black).current_turn(),
            Player::Black
        );
    }

    #[test]
    fn next_turn_keeps_the_board() {
        let position = Position::starting();
        let next = position.next_turn().unwrap();
        assert_eq!(next.board(), position.board());
        assert_eq!(next.turn().get(), 2);
        // The previous position is left untouched.
        assert_eq!(position.turn().get(), 1);
    }

    #[test]
    fn make_move() {
        let position = Position::starting();
        let position = position.make_move(Move::new(Square::E2, Square::E4)).unwrap();
        assert_eq!(position.current_turn(), Player::Black);
        assert_eq!(position.board().at(Square::E2), None);
        assert_eq!(
            position.board().at(Square::E4),
            Some(Piece::new(Player::White, PieceKind::Pawn))
        );
        let position = position.make_move(Move::new(Square::D7, Square::D5)).unwrap();
        let position = position.make_move(Move::new(Square::E4, Square::D5)).unwrap();
        assert_eq!(position.board().count(Player::Black), 15);
        assert_eq!(position.board().count(Player::White), 16);
        assert_eq!(position.turn().get(), 4);
    }

    #[test]
    #[should_panic(expected = "there is no piece on e4")]
    fn make_move_from_empty_square() {
        let _ = Position::starting()
            .make_move(Move::new(Square::E4, Square::E5))
            .unwrap();
    }

    #[test]
    #[should_panic(expected = "e7 holds a black piece but white is to move")]
    fn make_move_with_opponent_piece() {
        let _ = Position::starting()
            .make_move(Move::new(Square::E7, Square::E5))
            .unwrap();
    }

    #[test]
    #[should_panic(expected = "piece on a1 has to leave its square")]
    fn null_move() {
        let _ = Position::starting()
            .make_move(Move::new(Square::A1, Square::A1))
            .unwrap();
    }

    #[test]
    fn last_turns_alternate() {
        let turn = NonZeroU32::new(u32::MAX - 1).unwrap();
        let position = Position::new(Board::empty(), turn);
        assert_eq!(position.current_turn(), Player::Black);
        let last = position.next_turn().unwrap();
        assert_eq!(last.turn(), NonZeroU32::MAX);
        assert_eq!(last.current_turn(), Player::White);
    }

    #[test]
    #[should_panic(expected = "turn counter overflow after turn 4294967295")]
    fn next_turn_after_last_turn() {
        let _ = Position::new(Board::empty(), NonZeroU32::MAX)
            .next_turn()
            .unwrap();
    }

    #[test]
    #[should_panic(expected = "turn counter overflow after turn 4294967295")]
    fn make_move_after_last_turn() {
        let mut board = Board::empty();
        let _ = board.set(Square::E1, Some(Piece::new(Player::White, PieceKind::King)));
        let position = Position::new(board, NonZeroU32::MAX);
        assert_eq!(position.current_turn(), Player::White);
        let _ = position
            .make_move(Move::new(Square::E1, Square::E2))
            .unwrap();
    }

    #[test]
    fn display() {
        let rendered = Position::starting().next_turn().unwrap().to_string();
        assert!(rendered.starts_with("---------------------------------\n| R | N | B | Q | K |"));
        assert!(rendered.ends_with("---------------------------------\nTurn 2: black to move"));
    }
}
