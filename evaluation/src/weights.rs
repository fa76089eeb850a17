//! Fixed weights of the five metrics.
//!
//! These are part of the output contract: changing any of them changes every
//! score a caller has ever stored, so treat an edit as a breaking change.

use cozy_chess::Piece;

// Material

pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;
pub const KING_VALUE: i32 = 0;

/// Largest one-sided total without promotions: 8*1 + 2*3 + 2*3 + 2*5 + 9.
pub const MAX_SIDE_MATERIAL: f32 = 39.0;
/// Full symmetric range of the material difference.
pub const MATERIAL_RANGE: f32 = 2.0 * MAX_SIDE_MATERIAL;

#[inline(always)]
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}

// King safety

pub const KING_NEUTRAL_SCORE: f32 = 0.5;
pub const KING_SHIELD_WEIGHT: f32 = 0.45;
pub const KING_SHIELD_SQUARES: f32 = 3.0;
pub const KING_PLACEMENT_SCALE: f32 = 0.3;
pub const KING_CASTLED_PLACEMENT: f32 = 0.35;
pub const KING_CASTLED_MIN_SHIELD: f32 = 0.66; // two of three shield pawns
pub const KING_MOBILITY_WEIGHT: f32 = 0.05;
pub const KING_NEIGHBOURS: f32 = 8.0;
pub const KING_PRESSURE_RADIUS: i8 = 3;
pub const KING_PRESSURE_SCALE: f32 = 10.0;
pub const KING_MAX_PRESSURE_PENALTY: f32 = 0.25;
pub const KING_SMOOTH_LINEAR: f32 = 0.7;
pub const KING_SMOOTH_QUADRATIC: f32 = 0.3;

/// Weight of an enemy piece near the king before distance decay.
#[inline(always)]
pub fn king_pressure_weight(piece: Piece) -> f32 {
    match piece {
        Piece::Queen => 3.0,
        Piece::Rook => 2.0,
        Piece::Bishop => 1.5,
        Piece::Knight => 1.2,
        Piece::Pawn => 0.8,
        Piece::King => 1.0,
    }
}

// Activity

pub const ACTIVITY_MOVE_NORM: f32 = 40.0;
pub const ACTIVITY_CENTRAL_MINOR_BONUS: f32 = 0.1;

// Pawn structure: penalties

pub const ISOLATED_WEIGHT: f32 = 0.40;
pub const DOUBLED_WEIGHT: f32 = 0.55;
pub const BACKWARD_WEIGHT: f32 = 0.25;
pub const OVER_ADVANCED_WEIGHT: f32 = 0.20;
pub const CENTRAL_DOUBLED_WEIGHT: f32 = 0.20;
pub const ISLANDS_WEIGHT: f32 = 0.10;
pub const CHAIN_BASE_WEIGHT: f32 = 0.05;
pub const WEAK_PAWNS_WEIGHT: f32 = 0.10;
pub const WEAK_SQUARES_WEIGHT: f32 = 0.10;
pub const HANGING_WEIGHT: f32 = 0.05;
pub const RAMS_WEIGHT: f32 = 0.10;

// Pawn structure: bonuses

pub const PASSED_WEIGHT: f32 = 0.40;
pub const CANDIDATE_PASSED_WEIGHT: f32 = 0.15;
pub const CHAINS_WEIGHT: f32 = 0.10;
pub const LEVERS_WEIGHT: f32 = 0.05;
pub const FLANK_WEIGHT: f32 = 0.02;

// Pawn structure: fixed denominators

pub const ISLANDS_NORM: f32 = 4.0;
pub const CHAINS_NORM: f32 = 4.0;
pub const HANGING_NORM: f32 = 4.0;
pub const RAMS_NORM: f32 = 8.0;
pub const WEAK_SQUARES_NORM: f32 = 8.0;

// Pawn structure: side-relative rank thresholds (0 = own back rank)

pub const HANGING_MIN_RANK: i8 = 3;
pub const OVER_ADVANCED_MIN_RANK: i8 = 4;
pub const WEAK_SQUARE_RANKS: std::ops::RangeInclusive<i8> = 0..=3;

// Space

pub const SPACE_REACH_WEIGHT: f32 = 0.55;
pub const SPACE_REACH_NORM: f32 = 28.0; // empirical maximum
pub const SPACE_PRESENCE_WEIGHT: f32 = 0.30;
pub const SPACE_FOOTHOLD_WEIGHT: f32 = 0.15;

#[inline(always)]
pub fn space_presence_weight(piece: Piece) -> f32 {
    match piece {
        Piece::Pawn => 1.0,
        Piece::Knight | Piece::Bishop => 0.8,
        Piece::Rook => 0.6,
        Piece::Queen => 0.5,
        Piece::King => 0.2,
    }
}
