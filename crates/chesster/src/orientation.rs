//! Feature encoding consumed by board orientation classifiers.

use crate::core::{Piece, PieceKind, Position, Side};
use crate::vision::OrientationClassifier;
use std::convert::Infallible;

/// Material weight of a piece kind, as seen by the orientation model.
pub const fn material_weight(kind: PieceKind) -> f32 {
    match kind {
        PieceKind::Pawn => 0.1,
        PieceKind::Knight => 0.3,
        PieceKind::Bishop => 0.35,
        PieceKind::Rook => 0.5,
        PieceKind::Queen => 0.8,
        PieceKind::King => 1.0,
    }
}

/// Signed weight of one square: white positive, black negative, empty zero.
pub fn piece_weight(piece: Piece) -> f32 {
    match (piece.kind(), piece.side()) {
        (Some(kind), Some(Side::White)) => material_weight(kind),
        (Some(kind), Some(Side::Black)) => -material_weight(kind),
        _ => 0.0,
    }
}

/// 64 signed weights in square index order (`a1` first).
pub fn orientation_features(position: &Position) -> [f32; 64] {
    let mut features = [0.0f32; 64];
    for (f, &piece) in features.iter_mut().zip(position.pieces().iter()) {
        *f = piece_weight(piece);
    }
    features
}

/// Orientation classifier with a fixed answer, for inputs whose orientation is
/// known in advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedOrientation(pub bool);

impl OrientationClassifier for FixedOrientation {
    type Error = Infallible;

    fn is_inverted(&mut self, _position: &Position) -> Result<bool, Infallible> {
        Ok(self.0)
    }
}
