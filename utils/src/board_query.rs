use arrayvec::ArrayVec;
use cozy_chess::{BitBoard, Color, Piece, Square};

use crate::PositionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub piece: Piece,
    pub color: Color,
}

/// What the metrics need to know about a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSummary {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

pub type Occupancy = ArrayVec<(Square, Occupant), 64>;

/// Board queries the metrics are written against.
///
/// Rules (decoding, move legality) belong to the implementor; the metrics only
/// read piece placement and enumerate moves.
pub trait BoardQuery: Sized {
    /// Decode a position encoding (FEN).
    fn parse(encoding: &str) -> Result<Self, PositionError>;

    /// Encode back into the form `parse` accepts.
    fn encode(&self) -> String;

    fn occupant(&self, square: Square) -> Option<Occupant>;

    /// Every occupied square with its piece.
    fn occupied(&self) -> Occupancy;

    fn side_to_move(&self) -> Color;

    /// A copy of this position with `side` to move. Never mutates `self`.
    fn with_side_to_move(&self, side: Color) -> Self;

    /// Moves available to the side to move.
    fn legal_moves(&self) -> Vec<MoveSummary>;

    fn king_square(&self, color: Color) -> Option<Square> {
        self.occupied()
            .into_iter()
            .find(|(_, o)| o.piece == Piece::King && o.color == color)
            .map(|(sq, _)| sq)
    }

    fn colored_pieces(&self, color: Color, piece: Piece) -> BitBoard {
        self.occupied()
            .into_iter()
            .filter(|(_, o)| o.piece == piece && o.color == color)
            .fold(BitBoard::EMPTY, |bb, (sq, _)| bb | sq.bitboard())
    }
}
