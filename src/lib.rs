//! Square-centric ("mailbox") chessboard and pseudo-legal move generator.
//!
//! The crate models a standard 8x8 board, keeps track of the side to move
//! through a turn counter and enumerates every move the pieces of that side
//! are geometrically allowed to make. The generated moves are
//! [pseudo-legal]: they respect piece movement and square occupancy but do
//! not take checks into account. Castling, en passant and promotions are not
//! generated.
//!
//! ```
//! use mailbox::chess::core::Player;
//! use mailbox::chess::position::Position;
//!
//! let position = Position::starting();
//! assert_eq!(position.current_turn(), Player::White);
//! assert_eq!(position.list_next_moves().len(), 20);
//! ```
//!
//! [pseudo-legal]: https://www.chessprogramming.org/Pseudo-Legal_Move

// Rustdoc lints.
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Performance is extremely important.
#![deny(clippy::perf)]

pub mod chess;

use shadow_rs::shadow;

shadow!(build);

/// Returns the full crate version that can be used to identify how it was
/// built in the first place.
#[must_use]
pub fn version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}
