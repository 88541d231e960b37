//! Piece-placement codec (the first field of a FEN record).
//!
//! Ranks are written 8 -> 1, files a -> h within a rank, runs of empty squares
//! are compressed to a digit and ranks are separated by `/`.

use crate::Piece;

/// Placement field of the standard starting position.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("empty FEN")]
    Empty,
    #[error("invalid character {ch:?} in FEN")]
    InvalidChar { ch: char },
    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {squares} squares instead of 8")]
    RankLength { rank: u8, squares: usize },
}

/// Encode 64 pieces (board index order, `a1 = 0`) as a placement string.
pub fn encode(pieces: &[Piece; 64]) -> String {
    let mut out = String::with_capacity(64 + 7);
    for rank in (0..8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8 {
            match pieces[rank * 8 + file].to_fen_char() {
                Some(c) => {
                    if empty_run > 0 {
                        out.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    out.push(c);
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push((b'0' + empty_run) as char);
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

/// Decode a placement string into 64 pieces.
///
/// Only the first whitespace-separated field is read, so full FEN records are
/// accepted. Any malformed input fails as a whole.
pub fn decode(fen: &str) -> Result<[Piece; 64], FenError> {
    let placement = fen.split_whitespace().next().ok_or(FenError::Empty)?;

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut pieces = [Piece::Empty; 64];
    for (row, text) in ranks.iter().enumerate() {
        let rank = 7 - row;
        let mut file = 0usize;
        for ch in text.chars() {
            let (piece, width) = match ch {
                '1'..='8' => (None, ch as usize - '0' as usize),
                _ => (
                    Some(Piece::from_fen_char(ch).ok_or(FenError::InvalidChar { ch })?),
                    1,
                ),
            };
            if file + width > 8 {
                return Err(FenError::RankLength {
                    rank: rank as u8 + 1,
                    squares: file + width,
                });
            }
            if let Some(piece) = piece {
                pieces[rank * 8 + file] = piece;
            }
            file += width;
        }
        if file != 8 {
            return Err(FenError::RankLength {
                rank: rank as u8 + 1,
                squares: file,
            });
        }
    }

    Ok(pieces)
}
