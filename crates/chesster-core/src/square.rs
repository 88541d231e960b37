//! Board coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: u8 = 8;

/// Square construction / parsing errors.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("square coordinates out of bounds [0-7] (file={file}, rank={rank})")]
    OutOfBounds { file: u8, rank: u8 },
    #[error("board index {0} out of bounds [0-63]")]
    IndexOutOfBounds(usize),
    #[error("invalid square notation {0:?}")]
    InvalidNotation(String),
}

/// A square on the board.
///
/// `file` counts columns from the left (`a..h`), `rank` counts rows from the
/// bottom (`1..8`), both zero-based. Both are always in `0..8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Create a square, failing if either coordinate is outside `0..8`.
    pub fn new(file: u8, rank: u8) -> Result<Self, SquareError> {
        if file >= BOARD_SIZE || rank >= BOARD_SIZE {
            return Err(SquareError::OutOfBounds { file, rank });
        }
        Ok(Self { file, rank })
    }

    /// Create a square from its linear board index (`a1 = 0`, `h8 = 63`).
    pub fn from_index(index: usize) -> Result<Self, SquareError> {
        if index >= 64 {
            return Err(SquareError::IndexOutOfBounds(index));
        }
        Ok(Self {
            file: (index % 8) as u8,
            rank: (index / 8) as u8,
        })
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Linear board index, `file + rank * 8`.
    #[inline]
    pub const fn index(self) -> usize {
        self.file as usize + self.rank as usize * 8
    }

    /// Point reflection through the board centre (`a1 <-> h8`).
    #[inline]
    pub const fn flipped(self) -> Self {
        Self {
            file: BOARD_SIZE - 1 - self.file,
            rank: BOARD_SIZE - 1 - self.rank,
        }
    }

    /// All 64 squares in board index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Square { file, rank }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).map_err(|_| invalid())
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl TryFrom<String> for Square {
    type Error = SquareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_file_plus_rank_times_eight() {
        for file in 0..8 {
            for rank in 0..8 {
                let sq = Square::new(file, rank).expect("in range");
                assert_eq!(sq.index(), file as usize + rank as usize * 8);
                assert_eq!(Square::from_index(sq.index()).expect("index"), sq);
            }
        }
    }

    #[test]
    fn out_of_range_construction_fails() {
        assert!(Square::new(8, 0).is_err());
        assert!(Square::new(0, 8).is_err());
        assert!(Square::new(255, 255).is_err());
        assert!(Square::from_index(64).is_err());
    }

    #[test]
    fn parses_and_prints_algebraic_notation() {
        let g3: Square = "g3".parse().expect("g3");
        assert_eq!((g3.file(), g3.rank()), (6, 2));
        assert_eq!(g3.to_string(), "g3");
        assert_eq!("a1".parse::<Square>().expect("a1").index(), 0);
        assert_eq!("h8".parse::<Square>().expect("h8").index(), 63);
    }

    #[test]
    fn rejects_malformed_notation() {
        for bad in ["", "a", "a9", "i1", "a0", "A1", "a10", "1a"] {
            assert!(bad.parse::<Square>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn flipped_mirrors_index() {
        for sq in Square::all() {
            assert_eq!(sq.flipped().index(), 63 - sq.index());
        }
    }

    #[test]
    fn all_is_in_index_order() {
        let indices: Vec<usize> = Square::all().map(Square::index).collect();
        assert_eq!(indices, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn serializes_as_notation() {
        let sq: Square = "e4".parse().expect("e4");
        let json = serde_json::to_string(&sq).expect("serialize");
        assert_eq!(json, "\"e4\"");
        let back: Square = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, sq);
        assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
    }
}
