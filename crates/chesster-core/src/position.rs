//! Full-board piece arrangement.

use crate::fen::{self, FenError};
use crate::{Move, Piece, PieceKind, Side, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("a position needs exactly 64 pieces, got {0}")]
    PieceCount(usize),
    #[error(transparent)]
    Fen(#[from] FenError),
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

const STARTING: [Piece; 64] = {
    let mut pieces = [Piece::Empty; 64];
    let mut file = 0;
    while file < 8 {
        pieces[file] = Piece::new(BACK_RANK[file], Side::White);
        pieces[8 + file] = Piece::new(PieceKind::Pawn, Side::White);
        pieces[48 + file] = Piece::new(PieceKind::Pawn, Side::Black);
        pieces[56 + file] = Piece::new(BACK_RANK[file], Side::Black);
        file += 1;
    }
    pieces
};

/// 64 squares of pieces, addressed only through [`Square`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Position {
    pieces: [Piece; 64],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    pub const fn empty() -> Self {
        Self {
            pieces: [Piece::Empty; 64],
        }
    }

    /// The standard starting position.
    pub const fn starting() -> Self {
        Self { pieces: STARTING }
    }

    /// Build a position from pieces in board index order (`a1 = 0`).
    pub fn from_pieces(pieces: &[Piece]) -> Result<Self, PositionError> {
        let pieces: [Piece; 64] = pieces
            .try_into()
            .map_err(|_| PositionError::PieceCount(pieces.len()))?;
        Ok(Self { pieces })
    }

    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Ok(Self {
            pieces: fen::decode(fen)?,
        })
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece; 64] {
        &self.pieces
    }

    #[inline]
    pub fn get(&self, square: Square) -> Piece {
        self.pieces[square.index()]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Piece) {
        self.pieces[square.index()] = piece;
    }

    /// Non-empty squares in board index order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all()
            .map(|sq| (sq, self[sq]))
            .filter(|(_, piece)| !piece.is_empty())
    }

    /// The board rotated by 180 degrees: square `i` moves to `63 - i`.
    pub fn inverted(&self) -> Self {
        let mut pieces = self.pieces;
        pieces.reverse();
        Self { pieces }
    }

    pub fn invert(&mut self) {
        self.pieces.reverse();
    }

    /// Move the source piece to the destination, promoting if requested.
    pub fn apply(&mut self, mv: &Move) {
        let moving = self[mv.source];
        self[mv.destination] = moving;
        self[mv.source] = Piece::Empty;

        if let Some(promotion) = mv.promotion {
            self[mv.destination] = match moving.side() {
                Some(side) => promotion.with_side(side),
                None => promotion,
            };
        }
    }

    /// Placement field only.
    pub fn to_fen(&self) -> String {
        fen::encode(&self.pieces)
    }

    /// Full FEN record with the given side to move and no castling/en passant.
    pub fn to_fen_with_side(&self, side: Side) -> String {
        format!("{} {} - - 0 1", self.to_fen(), side.fen_char())
    }
}

impl Index<Square> for Position {
    type Output = Piece;

    fn index(&self, square: Square) -> &Piece {
        &self.pieces[square.index()]
    }
}

impl IndexMut<Square> for Position {
    fn index_mut(&mut self, square: Square) -> &mut Piece {
        &mut self.pieces[square.index()]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen())
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_fen()
    }
}

impl TryFrom<String> for Position {
    type Error = PositionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_fen(&value)
    }
}
