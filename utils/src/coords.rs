use cozy_chess::{Color, File, Rank, Square};

/// Clamp a score into [0, 1]. NaN collapses to 0.
#[inline(always)]
pub fn clamp01(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Rank step a side's pawns advance by: +1 for White, -1 for Black.
#[inline(always)]
pub fn forward(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

#[inline(always)]
pub fn file_index(square: Square) -> i8 {
    square.file() as i8
}

#[inline(always)]
pub fn rank_index(square: Square) -> i8 {
    square.rank() as i8
}

/// Rank index (0..=7) seen from `color`'s side, 0 being its own back rank.
#[inline(always)]
pub fn relative_rank(square: Square, color: Color) -> i8 {
    match color {
        Color::White => rank_index(square),
        Color::Black => 7 - rank_index(square),
    }
}

/// Square at zero-based file/rank indices, or None when off the board.
#[inline(always)]
pub fn square_at(file: i8, rank: i8) -> Option<Square> {
    if !(0..8).contains(&file) || !(0..8).contains(&rank) {
        return None;
    }
    Some(Square::new(
        File::index(file as usize),
        Rank::index(rank as usize),
    ))
}

/// Square shifted by file/rank deltas, or None when that leaves the board.
#[inline(always)]
pub fn offset(square: Square, file_delta: i8, rank_delta: i8) -> Option<Square> {
    square_at(file_index(square) + file_delta, rank_index(square) + rank_delta)
}

/// Ranks 5-8 for White, 1-4 for Black.
#[inline(always)]
pub fn in_enemy_half(square: Square, color: Color) -> bool {
    relative_rank(square, color) >= 4
}
