//! Moves in coordinate notation (`e2e4`, `e7e8q`).

use crate::{Piece, PieceKind, Position, Side, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("invalid move notation {0:?}")]
    InvalidNotation(String),
    #[error("invalid promotion piece {0:?}")]
    InvalidPromotion(char),
}

/// A move from `source` to `destination`, optionally promoting.
///
/// The promotion piece's side is irrelevant: applying the move recolours it
/// to the side of the moving piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub source: Square,
    pub destination: Square,
    #[serde(default)]
    pub promotion: Option<Piece>,
}

impl Move {
    pub fn new(source: Square, destination: Square) -> Self {
        Self {
            source,
            destination,
            promotion: None,
        }
    }

    pub fn with_promotion(source: Square, destination: Square, promotion: Piece) -> Self {
        Self {
            source,
            destination,
            promotion: Some(promotion),
        }
    }

    /// Piece letter of the moving piece followed by the destination, e.g. `Nf3`.
    pub fn describe(&self, context: &Position) -> String {
        match context[self.source].to_fen_char() {
            Some(c) => format!("{c}{}", self.destination),
            None => self.destination.to_string(),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.destination)?;
        if let Some(c) = self
            .promotion
            .and_then(|p| p.with_side(Side::Black).to_fen_char())
        {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoveError::InvalidNotation(s.to_string());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }
        let source: Square = s[0..2].parse().map_err(|_| invalid())?;
        let destination: Square = s[2..4].parse().map_err(|_| invalid())?;

        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => {
                let piece = Piece::from_fen_char(c).ok_or(MoveError::InvalidPromotion(c))?;
                match piece.kind() {
                    Some(PieceKind::Pawn | PieceKind::King) | None => {
                        return Err(MoveError::InvalidPromotion(c))
                    }
                    Some(_) => Some(piece),
                }
            }
        };

        Ok(Self {
            source,
            destination,
            promotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().expect("square")
    }

    #[test]
    fn parses_coordinate_notation() {
        let cases = [
            ("c2c4", Move::new(sq("c2"), sq("c4"))),
            ("f3f8", Move::new(sq("f3"), sq("f8"))),
            ("a1h8", Move::new(sq("a1"), sq("h8"))),
        ];
        for (text, expected) in cases {
            assert_eq!(text.parse::<Move>().expect("move"), expected);
            assert_eq!(expected.to_string(), text);
        }
    }

    #[test]
    fn parses_promotions() {
        let m: Move = "e7e8q".parse().expect("promotion");
        assert_eq!(m.promotion, Some(Piece::BlackQueen));
        assert_eq!(m.to_string(), "e7e8q");

        let m: Move = "b2b1N".parse().expect("upper-case promotion");
        assert_eq!(m.promotion, Some(Piece::WhiteKnight));
        assert_eq!(m.to_string(), "b2b1n");
    }

    #[test]
    fn rejects_malformed_notation() {
        for bad in ["a1z2, c3a9", "Ea2", "Ox08", "a1a", "a1a9", "", "e7e8k", "e7e8p", "e7e8x"] {
            assert!(bad.parse::<Move>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn describe_uses_piece_letter() {
        let pos = Position::starting();
        assert_eq!("g1f3".parse::<Move>().expect("move").describe(&pos), "Nf3");
        assert_eq!("e7e5".parse::<Move>().expect("move").describe(&pos), "pe5");
        assert_eq!("e4e5".parse::<Move>().expect("move").describe(&pos), "e5");
    }
}
