use cozy_chess::{Color, Piece, Square};
use utils::{clamp01, forward, offset, relative_rank, BoardQuery};

use crate::weights::{
    king_pressure_weight, KING_CASTLED_MIN_SHIELD, KING_CASTLED_PLACEMENT,
    KING_MAX_PRESSURE_PENALTY, KING_MOBILITY_WEIGHT, KING_NEIGHBOURS, KING_NEUTRAL_SCORE,
    KING_PLACEMENT_SCALE, KING_PRESSURE_RADIUS, KING_PRESSURE_SCALE, KING_SHIELD_SQUARES,
    KING_SHIELD_WEIGHT, KING_SMOOTH_LINEAR, KING_SMOOTH_QUADRATIC,
};

// Shield, placement and mobility add up; enemy pressure subtracts.
// The final blend squashes low scores harder than high ones.
pub fn evaluate<B: BoardQuery>(board: &B, color: Color) -> f32 {
    let Some(king) = board.king_square(color) else {
        return KING_NEUTRAL_SCORE;
    };

    let shield = pawn_shield(board, king, color);
    let raw = shield * KING_SHIELD_WEIGHT
        + placement(king, color, shield)
        + mobility(board, king) * KING_MOBILITY_WEIGHT
        - enemy_pressure(board, king, color);

    let score = clamp01(raw);
    clamp01(KING_SMOOTH_LINEAR * score + KING_SMOOTH_QUADRATIC * score * score)
}

// Own pawns on the three squares straight ahead of the king.
fn pawn_shield<B: BoardQuery>(board: &B, king: Square, color: Color) -> f32 {
    let step = forward(color);
    let shield = (-1..=1)
        .filter_map(|file_delta| offset(king, file_delta, step))
        .filter(|&sq| {
            board
                .occupant(sq)
                .is_some_and(|o| o.piece == Piece::Pawn && o.color == color)
        })
        .count();
    shield as f32 / KING_SHIELD_SQUARES
}

// Deeper in the own camp is safer; a castled king behind an intact shield gets a flat bonus.
fn placement(king: Square, color: Color, shield: f32) -> f32 {
    if castled_squares(color).contains(&king) && shield >= KING_CASTLED_MIN_SHIELD {
        return KING_CASTLED_PLACEMENT;
    }
    let depth = 1.0 - relative_rank(king, color) as f32 / 7.0;
    depth * KING_PLACEMENT_SCALE
}

#[inline(always)]
fn castled_squares(color: Color) -> [Square; 2] {
    match color {
        Color::White => [Square::G1, Square::C1],
        Color::Black => [Square::G8, Square::C8],
    }
}

// Empty neighbouring squares out of eight.
fn mobility<B: BoardQuery>(board: &B, king: Square) -> f32 {
    let mut free = 0;
    for rank_delta in -1..=1 {
        for file_delta in -1..=1 {
            if rank_delta == 0 && file_delta == 0 {
                continue;
            }
            if let Some(sq) = offset(king, file_delta, rank_delta) {
                if board.occupant(sq).is_none() {
                    free += 1;
                }
            }
        }
    }
    free as f32 / KING_NEIGHBOURS
}

// Enemy pieces in the 7x7 window around the king, decayed by Manhattan distance.
fn enemy_pressure<B: BoardQuery>(board: &B, king: Square, color: Color) -> f32 {
    let mut pressure = 0.0;
    for rank_delta in -KING_PRESSURE_RADIUS..=KING_PRESSURE_RADIUS {
        for file_delta in -KING_PRESSURE_RADIUS..=KING_PRESSURE_RADIUS {
            if rank_delta == 0 && file_delta == 0 {
                continue;
            }
            let Some(sq) = offset(king, file_delta, rank_delta) else {
                continue;
            };
            if let Some(o) = board.occupant(sq) {
                if o.color != color {
                    let distance = (rank_delta.abs() + file_delta.abs()) as f32;
                    pressure += king_pressure_weight(o.piece) / distance;
                }
            }
        }
    }
    (pressure / KING_PRESSURE_SCALE).min(KING_MAX_PRESSURE_PENALTY)
}
