use cozy_chess::{BitBoard, Color, Piece};
use utils::{clamp01, in_enemy_half, BoardQuery};

use crate::weights::{
    space_presence_weight, SPACE_FOOTHOLD_WEIGHT, SPACE_PRESENCE_WEIGHT, SPACE_REACH_NORM,
    SPACE_REACH_WEIGHT,
};

/// c, d, e and f files.
const CENTRAL_FILES: BitBoard = BitBoard(0x3C3C_3C3C_3C3C_3C3C);

/// Reach into the enemy half, weighted presence there, and central-file footholds.
pub fn evaluate<B: BoardQuery>(board: &B, color: Color) -> f32 {
    let score = reach(board, color) * SPACE_REACH_WEIGHT
        + presence(board, color) * SPACE_PRESENCE_WEIGHT
        + foothold(board, color) * SPACE_FOOTHOLD_WEIGHT;
    clamp01(score)
}

// Distinct enemy-half squares reachable by non-king moves, as if `color` were to move.
fn reach<B: BoardQuery>(board: &B, color: Color) -> f32 {
    let variant = board.with_side_to_move(color);
    let targets = variant
        .legal_moves()
        .iter()
        .filter(|mv| mv.piece != Piece::King && in_enemy_half(mv.to, color))
        .fold(BitBoard::EMPTY, |bb, mv| bb | mv.to.bitboard());

    (targets.len() as f32 / SPACE_REACH_NORM).min(1.0)
}

// Share of the side's weighted material standing in the enemy half.
fn presence<B: BoardQuery>(board: &B, color: Color) -> f32 {
    let mut total = 0.0;
    let mut advanced = 0.0;
    for (sq, o) in board.occupied() {
        if o.color != color {
            continue;
        }
        let weight = space_presence_weight(o.piece);
        total += weight;
        if in_enemy_half(sq, color) {
            advanced += weight;
        }
    }

    if total > 0.0 {
        advanced / total
    } else {
        0.0
    }
}

// Of the side's pieces on the central files, the share standing in the enemy half.
fn foothold<B: BoardQuery>(board: &B, color: Color) -> f32 {
    let mut central = 0;
    let mut advanced = 0;
    for (sq, o) in board.occupied() {
        if o.color != color || !CENTRAL_FILES.has(sq) {
            continue;
        }
        central += 1;
        if in_enemy_half(sq, color) {
            advanced += 1;
        }
    }

    if central > 0 {
        advanced as f32 / central as f32
    } else {
        0.0
    }
}
