//! Data exchanged with an external move-evaluation engine.
//!
//! Only the request/response shapes live here; running an engine is left to
//! downstream consumers.

use crate::{Move, Position, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_SEARCH_DEPTH: u32 = 20;

/// Engine score, always from white's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Score {
    Centipawns(i32),
    /// Forced mate in this many moves; negative when black mates.
    MateIn(i32),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Score::Centipawns(cp) => {
                let sign = if cp >= 0 { "+" } else { "-" };
                let abs = cp.unsigned_abs();
                write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
            }
            Score::MateIn(n) => write!(f, "#{n}"),
        }
    }
}

/// What an engine needs to evaluate a recognized board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub position: Position,
    pub side: Side,
    pub depth: u32,
}

impl EvaluationRequest {
    pub fn new(position: Position, side: Side) -> Self {
        Self {
            position,
            side,
            depth: DEFAULT_SEARCH_DEPTH,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    /// FEN record handed to the engine.
    pub fn fen(&self) -> String {
        self.position.to_fen_with_side(self.side)
    }
}

/// Best line and score reported by an engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub depth: u32,
    pub sel_depth: u32,
    pub nodes: u64,
    pub score: Score,
    pub line: Vec<Move>,
}

impl Evaluation {
    /// Score followed by the line replayed on `context`, with move numbers:
    /// `+0.35: 1. Pe4 pe5 2. Ng3`.
    ///
    /// `context` is not modified. Move numbers assume white moves first.
    pub fn display_line(&self, context: &Position) -> String {
        let mut board = *context;
        let mut moves = Vec::with_capacity(self.line.len());
        for (i, mv) in self.line.iter().enumerate() {
            let described = mv.describe(&board);
            if i % 2 == 0 {
                moves.push(format!("{}. {described}", i / 2 + 1));
            } else {
                moves.push(described);
            }
            board.apply(mv);
        }
        format!("{}: {}", self.score, moves.join(" "))
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.score)?;
        for mv in &self.line {
            write!(f, " {mv}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(moves: &[&str]) -> Vec<Move> {
        moves.iter().map(|m| m.parse().expect("move")).collect()
    }

    #[test]
    fn score_formatting() {
        assert_eq!(Score::Centipawns(35).to_string(), "+0.35");
        assert_eq!(Score::Centipawns(-120).to_string(), "-1.20");
        assert_eq!(Score::Centipawns(0).to_string(), "+0.00");
        assert_eq!(Score::MateIn(3).to_string(), "#3");
        assert_eq!(Score::MateIn(-2).to_string(), "#-2");
    }

    #[test]
    fn request_fen_carries_side() {
        let req = EvaluationRequest::new(Position::starting(), Side::White).with_depth(12);
        assert_eq!(req.depth, 12);
        assert_eq!(
            req.fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"
        );
    }

    #[test]
    fn evaluation_display_variants() {
        let eval = Evaluation {
            depth: 20,
            sel_depth: 28,
            nodes: 1_000_000,
            score: Score::Centipawns(35),
            line: line(&["e2e4", "e7e5", "g1f3"]),
        };
        assert_eq!(eval.to_string(), "+0.35: e2e4 e7e5 g1f3");

        let start = Position::starting();
        assert_eq!(eval.display_line(&start), "+0.35: 1. Pe4 pe5 2. Nf3");
        assert_eq!(start, Position::starting());
    }
}
