//! Square-centric ("[mailbox]") board representation: one slot per square,
//! each slot either holding a [`Piece`] or being empty.
//!
//! Mailbox boards are slower than bitboards for computing attack sets but make
//! "what is standing on this square" a single lookup, which is all the
//! pseudo-legal move generator needs.
//!
//! [mailbox]: https://www.chessprogramming.org/Mailbox

use std::fmt::{self, Write};
use std::mem;

use crate::chess::core::{File, Piece, PieceKind, Player, Rank, Square, BOARD_SIZE, BOARD_WIDTH};

/// Piece placement of the 8x8 board.
///
/// The board knows nothing about the side to move: that is tracked by
/// [`crate::chess::position::Position`].
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
}

impl Board {
    /// Board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
        }
    }

    /// Standard starting layout: White pieces on ranks 1 and 2, Black pieces
    /// mirrored on ranks 8 and 7.
    ///
    /// ```
    /// use mailbox::chess::board::Board;
    /// use mailbox::chess::core::{Piece, PieceKind, Player, Square};
    ///
    /// let board = Board::starting();
    /// assert_eq!(
    ///     board.at(Square::E1),
    ///     Some(Piece::new(Player::White, PieceKind::King))
    /// );
    /// assert_eq!(
    ///     board.at(Square::D8),
    ///     Some(Piece::new(Player::Black, PieceKind::Queen))
    /// );
    /// assert_eq!(board.at(Square::E4), None);
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for player in [Player::White, Player::Black] {
            for (file, kind) in File::iter().zip(BACKRANK) {
                let _ = board.set(
                    Square::new(file, Rank::backrank(player)),
                    Some(Piece::new(player, kind)),
                );
                let _ = board.set(
                    Square::new(file, Rank::pawns_starting(player)),
                    Some(Piece::new(player, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    /// Returns the piece standing on given square, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square as usize]
    }

    /// Puts `piece` on the square (or clears it when `piece` is [`None`]) and
    /// returns whatever was standing there before.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        mem::replace(&mut self.squares[square as usize], piece)
    }

    /// Returns true if there is no piece on given square.
    #[must_use]
    pub const fn is_vacant(&self, square: Square) -> bool {
        self.at(square).is_none()
    }

    /// Returns the owner of the piece on given square, if any.
    #[must_use]
    pub fn owner(&self, square: Square) -> Option<Player> {
        self.at(square).map(|piece| piece.owner)
    }

    /// Iterates over all squares and their contents in rank-major order (A1,
    /// B1, ..., H1, A2, ..., H8).
    pub fn iter(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::iter().map(|square| (square, self.at(square)))
    }

    /// Iterates over the squares occupied by `player` in rank-major order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, PieceKind)> + '_ {
        self.iter().filter_map(move |(square, piece)| match piece {
            Some(piece) if piece.owner == player => Some((square, piece.kind)),
            _ => None,
        })
    }

    /// Number of pieces `player` has on the board.
    #[must_use]
    pub fn count(&self, player: Player) -> usize {
        self.pieces(player).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for Board {
    /// Draws the board as an ASCII grid, starting with the first rank. Both
    /// sides use the same uppercase piece letters, empty squares are left
    /// blank.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(GRID_SEPARATOR)?;
        for rank in Rank::iter() {
            for file in File::iter() {
                let symbol = self
                    .at(Square::new(file, rank))
                    .map_or(' ', |piece| piece.kind.symbol());
                write!(f, "| {symbol} ")?;
            }
            f.write_str("|\n")?;
            f.write_str(GRID_SEPARATOR)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, uppercase
    /// letters for White pieces and lowercase letters for Black pieces).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if rank != Rank::One {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

const GRID_SEPARATOR: &str = "---------------------------------\n";
const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::Board;
    use crate::chess::core::{Piece, PieceKind, Player, Rank, Square};

    #[test]
    fn empty() {
        let board = Board::empty();
        assert_eq!(board.count(Player::White), 0);
        assert_eq!(board.count(Player::Black), 0);
        assert!(board.iter().all(|(_, piece)| piece.is_none()));
    }

    #[test]
    fn starting_layout() {
        let board = Board::starting();
        assert_eq!(board.count(Player::White), 16);
        assert_eq!(board.count(Player::Black), 16);
        assert_eq!(board.iter().filter(|(_, piece)| piece.is_some()).count(), 32);
        for (square, piece) in board.iter() {
            match square.rank() {
                Rank::One | Rank::Two => assert_eq!(piece.map(|p| p.owner), Some(Player::White)),
                Rank::Seven | Rank::Eight => {
                    assert_eq!(piece.map(|p| p.owner), Some(Player::Black));
                },
                _ => assert_eq!(piece, None),
            }
        }
        // Black pieces mirror White ones.
        for (square, piece) in board.pieces(Player::White) {
            let mirrored = Square::new(square.file(), square.rank().mirror());
            assert_eq!(
                board.at(mirrored),
                Some(Piece::new(Player::Black, piece)),
                "{square} vs {mirrored}"
            );
        }
    }

    #[test]
    fn set_returns_previous_occupant() {
        let mut board = Board::starting();
        let knight = Piece::new(Player::White, PieceKind::Knight);
        assert_eq!(board.set(Square::G1, None), Some(knight));
        assert!(board.is_vacant(Square::G1));
        assert_eq!(board.set(Square::F3, Some(knight)), None);
        assert_eq!(board.owner(Square::F3), Some(Player::White));
        assert_eq!(board.count(Player::White), 16);
    }

    #[test]
    fn pieces_are_listed_in_rank_major_order() {
        let board = Board::starting();
        let squares: Vec<_> = board.pieces(Player::White).map(|(square, _)| square).collect();
        assert_eq!(squares.first(), Some(&Square::A1));
        assert_eq!(squares[7], Square::H1);
        assert_eq!(squares[8], Square::A2);
        assert_eq!(squares.last(), Some(&Square::H2));
    }

    #[test]
    fn render_grid() {
        let mut board = Board::starting();
        let _ = board.set(Square::E2, None);
        let _ = board.set(Square::E4, Some(Piece::new(Player::White, PieceKind::Pawn)));
        assert_eq!(
            board.to_string(),
            "---------------------------------\n\
             | R | N | B | Q | K | B | N | R |\n\
             ---------------------------------\n\
             | P | P | P | P |   | P | P | P |\n\
             ---------------------------------\n\
             |   |   |   |   |   |   |   |   |\n\
             ---------------------------------\n\
             |   |   |   |   | P |   |   |   |\n\
             ---------------------------------\n\
             |   |   |   |   |   |   |   |   |\n\
             ---------------------------------\n\
             |   |   |   |   |   |   |   |   |\n\
             ---------------------------------\n\
             | P | P | P | P | P | P | P | P |\n\
             ---------------------------------\n\
             | R | N | B | Q | K | B | N | R |\n\
             ---------------------------------\n"
        );
    }

    #[test]
    fn dump() {
        assert_eq!(
            format!("{:?}", Board::starting()),
            "r n b q k b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B Q K B N R"
        );
    }
}
