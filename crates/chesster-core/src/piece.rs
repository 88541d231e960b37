//! Pieces, sides and the fixed piece <-> FEN character table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Side to which a piece belongs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// FEN side-to-move letter.
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];
}

/// Content of a single square: empty or one of twelve side/kind pieces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Piece {
    #[default]
    Empty = 0,

    WhitePawn,
    WhiteKnight,
    WhiteBishop,
    WhiteRook,
    WhiteQueen,
    WhiteKing,

    BlackPawn,
    BlackKnight,
    BlackBishop,
    BlackRook,
    BlackQueen,
    BlackKing,
}

/// FEN letters, indexed by `piece as usize - 1`.
const PIECE_CHARS: [(Piece, char); 12] = [
    (Piece::WhitePawn, 'P'),
    (Piece::WhiteKnight, 'N'),
    (Piece::WhiteBishop, 'B'),
    (Piece::WhiteRook, 'R'),
    (Piece::WhiteQueen, 'Q'),
    (Piece::WhiteKing, 'K'),
    (Piece::BlackPawn, 'p'),
    (Piece::BlackKnight, 'n'),
    (Piece::BlackBishop, 'b'),
    (Piece::BlackRook, 'r'),
    (Piece::BlackQueen, 'q'),
    (Piece::BlackKing, 'k'),
];

const fn validate_piece_chars() {
    let mut i = 0;
    while i < PIECE_CHARS.len() {
        assert!(
            PIECE_CHARS[i].0 as usize == i + 1,
            "piece table must follow enum order"
        );
        let mut j = i + 1;
        while j < PIECE_CHARS.len() {
            assert!(
                PIECE_CHARS[i].1 != PIECE_CHARS[j].1,
                "piece characters must be unique"
            );
            j += 1;
        }
        i += 1;
    }
}

const _: () = validate_piece_chars();

const LABELS: [&str; 13] = [
    "empty",
    "white_pawn",
    "white_knight",
    "white_bishop",
    "white_rook",
    "white_queen",
    "white_king",
    "black_pawn",
    "black_knight",
    "black_bishop",
    "black_rook",
    "black_queen",
    "black_king",
];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown piece label {0:?}")]
pub struct PieceLabelError(pub String);

impl Piece {
    pub const ALL: [Piece; 13] = [
        Piece::Empty,
        Piece::WhitePawn,
        Piece::WhiteKnight,
        Piece::WhiteBishop,
        Piece::WhiteRook,
        Piece::WhiteQueen,
        Piece::WhiteKing,
        Piece::BlackPawn,
        Piece::BlackKnight,
        Piece::BlackBishop,
        Piece::BlackRook,
        Piece::BlackQueen,
        Piece::BlackKing,
    ];

    /// Build a piece from its kind and side.
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        let offset = match side {
            Side::White => 1,
            Side::Black => 7,
        };
        Self::ALL[offset + kind as usize]
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Piece::Empty)
    }

    pub const fn side(self) -> Option<Side> {
        match self as u8 {
            0 => None,
            1..=6 => Some(Side::White),
            _ => Some(Side::Black),
        }
    }

    pub const fn kind(self) -> Option<PieceKind> {
        match self as u8 {
            0 => None,
            v => Some(PieceKind::ALL[((v - 1) % 6) as usize]),
        }
    }

    /// Same kind, recoloured to `side`. `Empty` stays `Empty`.
    pub const fn with_side(self, side: Side) -> Self {
        match self.kind() {
            Some(kind) => Piece::new(kind, side),
            None => Piece::Empty,
        }
    }

    /// FEN letter, upper case for white. `None` for `Empty`.
    pub const fn to_fen_char(self) -> Option<char> {
        match self {
            Piece::Empty => None,
            p => Some(PIECE_CHARS[p as usize - 1].1),
        }
    }

    pub fn from_fen_char(c: char) -> Option<Self> {
        PIECE_CHARS
            .iter()
            .find(|(_, ch)| *ch == c)
            .map(|(piece, _)| *piece)
    }

    /// Snake-case label, as emitted by a piece classifier.
    pub const fn label(self) -> &'static str {
        LABELS[self as usize]
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Piece {
    type Err = PieceLabelError;

    /// Case-insensitive; underscores are optional and `none` means `Empty`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if key == "none" {
            return Ok(Piece::Empty);
        }
        Piece::ALL
            .iter()
            .copied()
            .find(|p| p.label().replace('_', "") == key)
            .ok_or_else(|| PieceLabelError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_table_is_bijective() {
        for piece in Piece::ALL.iter().copied().filter(|p| !p.is_empty()) {
            let c = piece.to_fen_char().expect("non-empty piece has a char");
            assert_eq!(Piece::from_fen_char(c), Some(piece));
        }
        assert_eq!(Piece::Empty.to_fen_char(), None);
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char(' '), None);
    }

    #[test]
    fn kind_and_side_recompose() {
        for piece in Piece::ALL.iter().copied().filter(|p| !p.is_empty()) {
            let kind = piece.kind().expect("kind");
            let side = piece.side().expect("side");
            assert_eq!(Piece::new(kind, side), piece);
        }
        assert_eq!(Piece::Empty.kind(), None);
        assert_eq!(Piece::Empty.side(), None);
    }

    #[test]
    fn with_side_recolours() {
        assert_eq!(Piece::BlackQueen.with_side(Side::White), Piece::WhiteQueen);
        assert_eq!(Piece::WhiteKnight.with_side(Side::Black), Piece::BlackKnight);
        assert_eq!(Piece::WhiteKnight.with_side(Side::White), Piece::WhiteKnight);
        assert_eq!(Piece::Empty.with_side(Side::Black), Piece::Empty);
    }

    #[test]
    fn labels_parse_back() {
        for piece in Piece::ALL {
            assert_eq!(piece.label().parse::<Piece>().expect("label"), piece);
        }
        assert_eq!("WhitePawn".parse::<Piece>().expect("legacy"), Piece::WhitePawn);
        assert_eq!("none".parse::<Piece>().expect("none"), Piece::Empty);
        assert!("dragon".parse::<Piece>().is_err());
    }
}
