use cozy_chess::{get_pawn_attacks, BitBoard, Color, File, Rank, Square};
use utils::{clamp01, forward, offset, relative_rank, BoardQuery};

use super::pawn_cache::{PawnCache, PawnLayout};
use crate::weights::{
    BACKWARD_WEIGHT, CANDIDATE_PASSED_WEIGHT, CENTRAL_DOUBLED_WEIGHT, CHAINS_NORM, CHAINS_WEIGHT,
    CHAIN_BASE_WEIGHT, DOUBLED_WEIGHT, FLANK_WEIGHT, HANGING_MIN_RANK, HANGING_NORM,
    HANGING_WEIGHT, ISLANDS_NORM, ISLANDS_WEIGHT, ISOLATED_WEIGHT, LEVERS_WEIGHT,
    OVER_ADVANCED_MIN_RANK, OVER_ADVANCED_WEIGHT, PASSED_WEIGHT, RAMS_NORM, RAMS_WEIGHT,
    WEAK_PAWNS_WEIGHT, WEAK_SQUARES_NORM, WEAK_SQUARES_WEIGHT, WEAK_SQUARE_RANKS,
};

const QUEENSIDE: BitBoard = BitBoard(0x0707_0707_0707_0707); // a-c
const KINGSIDE: BitBoard = BitBoard(0xE0E0_E0E0_E0E0_E0E0); // f-h

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Open,
    Closed,
    /// Only the opponent has pawns on the file.
    HalfOpen,
    /// Only this side has pawns on the file.
    OpponentHalfOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlankBalance {
    Majority,
    Equal,
    Minority,
}

impl FlankBalance {
    #[inline(always)]
    fn bonus(self) -> f32 {
        match self {
            FlankBalance::Majority => FLANK_WEIGHT,
            FlankBalance::Equal => 0.0,
            FlankBalance::Minority => -FLANK_WEIGHT,
        }
    }
}

/// Every pawn feature counted for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PawnStructureReport {
    pub pawns: u32,
    pub isolated: u32,
    pub doubled: u32,
    pub islands: u32,
    pub passed: u32,
    pub candidate_passed: u32,
    pub backward: u32,
    pub hanging: u32,
    pub chains: u32,
    pub chain_bases: u32,
    pub rams: u32,
    pub levers: u32,
    pub over_advanced: u32,
    pub central_doubled: u32,
    pub weak_squares: u32,
    pub files: [FileKind; 8],
    pub queenside: FlankBalance,
    pub kingside: FlankBalance,
}

impl PawnStructureReport {
    /// Isolated, backward and over-advanced pawns. A pawn in two groups counts twice.
    #[inline(always)]
    pub fn weak_pawns(&self) -> u32 {
        self.isolated + self.backward + self.over_advanced
    }
}

/// Pawn-structure score for `color`, served from `cache` when the layout was seen before.
pub fn evaluate<B: BoardQuery>(board: &B, color: Color, cache: &PawnCache) -> f32 {
    let layout = PawnLayout::from_board(board);
    if let Some(cached) = cache.get(&layout, color) {
        return cached;
    }

    let fresh = score(&analyze(&layout, color));
    cache.set(layout, color, fresh);
    fresh
}

/// Weighted sum of the report's features, clamped to [0, 1].
pub fn score(report: &PawnStructureReport) -> f32 {
    let total = report.pawns.max(1) as f32;
    let per_pawn = |count: u32| count as f32 / total;
    let extra_islands = report.islands.saturating_sub(1) as f32;

    let score = 1.0
        - ISOLATED_WEIGHT * per_pawn(report.isolated)
        - DOUBLED_WEIGHT * per_pawn(report.doubled)
        - BACKWARD_WEIGHT * per_pawn(report.backward)
        - OVER_ADVANCED_WEIGHT * per_pawn(report.over_advanced)
        - CENTRAL_DOUBLED_WEIGHT * per_pawn(report.central_doubled)
        - ISLANDS_WEIGHT * (extra_islands / ISLANDS_NORM)
        - CHAIN_BASE_WEIGHT * per_pawn(report.chain_bases)
        - WEAK_PAWNS_WEIGHT * per_pawn(report.weak_pawns())
        - WEAK_SQUARES_WEIGHT * (report.weak_squares as f32 / WEAK_SQUARES_NORM)
        - HANGING_WEIGHT * (report.hanging as f32 / HANGING_NORM)
        - RAMS_WEIGHT * (report.rams as f32 / RAMS_NORM)
        + PASSED_WEIGHT * per_pawn(report.passed)
        + CANDIDATE_PASSED_WEIGHT * per_pawn(report.candidate_passed)
        + CHAINS_WEIGHT * (report.chains as f32 / CHAINS_NORM)
        + LEVERS_WEIGHT * per_pawn(report.levers)
        + report.queenside.bonus()
        + report.kingside.bonus();

    clamp01(score)
}

/// Run every detector for `color` over a pawn layout.
pub fn analyze(layout: &PawnLayout, color: Color) -> PawnStructureReport {
    let mine = layout.pawns(color);
    let theirs = layout.pawns(!color);
    let all = layout.all();

    let mut isolated = 0;
    let mut passed = 0;
    let mut candidate_passed = 0;
    let mut backward = 0;
    let mut rams = 0;
    let mut levers = 0;
    let mut over_advanced = 0;

    for sq in mine {
        isolated += is_isolated(sq, mine) as u32;
        passed += is_passed(sq, color, mine, theirs) as u32;
        candidate_passed += is_candidate(sq, color, mine, theirs, all) as u32;
        backward += is_backward(sq, color, mine, theirs) as u32;
        rams += is_ram(sq, color, theirs) as u32;
        levers += (!(get_pawn_attacks(sq, color) & theirs).is_empty()) as u32;
        over_advanced += is_over_advanced(sq, color, mine) as u32;
    }

    let (chains, chain_bases) = chains(mine, color);

    PawnStructureReport {
        pawns: mine.len(),
        isolated,
        doubled: doubled(mine, &File::ALL),
        islands: islands(mine),
        passed,
        candidate_passed,
        backward,
        hanging: hanging(mine, color),
        chains,
        chain_bases,
        rams,
        levers,
        over_advanced,
        central_doubled: doubled(mine, &[File::D, File::E]),
        weak_squares: weak_squares(mine, color),
        files: file_kinds(mine, theirs),
        queenside: flank_balance(mine, theirs, QUEENSIDE),
        kingside: flank_balance(mine, theirs, KINGSIDE),
    }
}

#[inline(always)]
fn is_isolated(sq: Square, mine: BitBoard) -> bool {
    (mine & sq.file().adjacent()).is_empty()
}

// No enemy pawn in front on this or a neighbouring file, and no own pawn in front
// on this file (the rear pawn of a doubled pair is not passed).
#[inline(always)]
fn is_passed(sq: Square, color: Color, mine: BitBoard, theirs: BitBoard) -> bool {
    let ahead = ranks_above(relative_rank(sq, color), color);
    let span = ahead & (sq.file().bitboard() | sq.file().adjacent());
    (theirs & span).is_empty() && (mine & ahead & sq.file().bitboard()).is_empty()
}

// On a file without enemy pawns, free to step forward, and with a friendly pawn
// behind on a neighbouring file that can walk up and defend it.
fn is_candidate(sq: Square, color: Color, mine: BitBoard, theirs: BitBoard, all: BitBoard) -> bool {
    let file = sq.file();
    if !(theirs & file.bitboard()).is_empty() {
        return false;
    }
    // `all` holds pawns only. The score is cached per pawn layout, so pieces
    // must not influence it.
    match offset(sq, 0, forward(color)) {
        Some(stop) if !all.has(stop) => {}
        _ => return false,
    }

    let support_rank = relative_rank(sq, color) - 1;
    let helpers = mine & file.adjacent() & ranks_up_to(support_rank, color);
    helpers.into_iter().any(|helper| {
        let path = helper.file().bitboard()
            & ranks_above(relative_rank(helper, color), color)
            & ranks_up_to(support_rank, color);
        (all & path).is_empty()
    })
}

// https://www.chessprogramming.org/Backward_Pawn
//
// No own pawn on a neighbouring file level with or behind it (so nothing defends
// the stop square now or after advancing), and an enemy pawn attacks the stop square.
fn is_backward(sq: Square, color: Color, mine: BitBoard, theirs: BitBoard) -> bool {
    let Some(stop) = offset(sq, 0, forward(color)) else {
        return false;
    };

    let supporters = mine & sq.file().adjacent() & ranks_up_to(relative_rank(sq, color), color);
    if !supporters.is_empty() {
        return false;
    }

    // Forward diagonals of the stop square are where attacking enemy pawns stand.
    !(get_pawn_attacks(stop, color) & theirs).is_empty()
}

#[inline(always)]
fn is_ram(sq: Square, color: Color, theirs: BitBoard) -> bool {
    offset(sq, 0, forward(color)).is_some_and(|stop| theirs.has(stop))
}

// Far up the board with no neighbouring own pawn behind to back it up.
fn is_over_advanced(sq: Square, color: Color, mine: BitBoard) -> bool {
    let rank = relative_rank(sq, color);
    rank >= OVER_ADVANCED_MIN_RANK
        && (mine & sq.file().adjacent() & ranks_up_to(rank - 1, color)).is_empty()
}

// Pawns beyond the first on each file.
fn doubled(mine: BitBoard, files: &[File]) -> u32 {
    files
        .iter()
        .map(|file| (mine & file.bitboard()).len().saturating_sub(1))
        .sum()
}

// Runs of adjacent files holding own pawns.
fn islands(mine: BitBoard) -> u32 {
    let mut islands = 0;
    let mut in_island = false;
    for file in File::ALL {
        let occupied = !(mine & file.bitboard()).is_empty();
        if occupied && !in_island {
            islands += 1;
        }
        in_island = occupied;
    }
    islands
}

// Advanced pawns side by side with no own pawns on either outer file.
fn hanging(mine: BitBoard, color: Color) -> u32 {
    let advanced = mine & ranks_above(HANGING_MIN_RANK - 1, color);
    let mut duos = 0;
    for left in 0..7i8 {
        if (advanced & file_mask(left)).is_empty() || (advanced & file_mask(left + 1)).is_empty() {
            continue;
        }
        if (mine & (file_mask(left - 1) | file_mask(left + 2))).is_empty() {
            duos += 1;
        }
    }
    duos
}

// Groups of pawns linked by diagonal defence. Returns (chains, bases): a chain has
// at least two pawns, a base is a chain pawn no other pawn defends.
fn chains(mine: BitBoard, color: Color) -> (u32, u32) {
    let mut seen = BitBoard::EMPTY;
    let mut chains = 0;
    let mut bases = 0;

    for start in mine {
        if seen.has(start) {
            continue;
        }

        let mut chain = start.bitboard();
        let mut frontier = chain;
        while !frontier.is_empty() {
            let mut linked = BitBoard::EMPTY;
            for sq in frontier {
                linked |= (get_pawn_attacks(sq, color) | get_pawn_attacks(sq, !color)) & mine;
            }
            frontier = linked & !chain;
            chain |= frontier;
        }
        seen |= chain;

        if chain.len() > 1 {
            chains += 1;
            bases += chain
                .into_iter()
                .filter(|&sq| (get_pawn_attacks(sq, !color) & mine).is_empty())
                .count() as u32;
        }
    }

    (chains, bases)
}

// Squares in the own half that no own pawn can ever defend: defending needs an
// own pawn on a neighbouring file at most one rank below. The first two ranks
// are always weak.
fn weak_squares(mine: BitBoard, color: Color) -> u32 {
    let mut weak = 0;
    for rank in WEAK_SQUARE_RANKS {
        for file in File::ALL {
            if (mine & file.adjacent() & ranks_up_to(rank - 1, color)).is_empty() {
                weak += 1;
            }
        }
    }
    weak
}

fn file_kinds(mine: BitBoard, theirs: BitBoard) -> [FileKind; 8] {
    let mut kinds = [FileKind::Open; 8];
    for file in File::ALL {
        let ours = !(mine & file.bitboard()).is_empty();
        let others = !(theirs & file.bitboard()).is_empty();
        kinds[file as usize] = match (ours, others) {
            (false, false) => FileKind::Open,
            (true, true) => FileKind::Closed,
            (false, true) => FileKind::HalfOpen,
            (true, false) => FileKind::OpponentHalfOpen,
        };
    }
    kinds
}

fn flank_balance(mine: BitBoard, theirs: BitBoard, flank: BitBoard) -> FlankBalance {
    let ours = (mine & flank).len();
    let others = (theirs & flank).len();
    match ours.cmp(&others) {
        std::cmp::Ordering::Greater => FlankBalance::Majority,
        std::cmp::Ordering::Equal => FlankBalance::Equal,
        std::cmp::Ordering::Less => FlankBalance::Minority,
    }
}

#[inline(always)]
fn file_mask(file: i8) -> BitBoard {
    if (0..8).contains(&file) {
        File::index(file as usize).bitboard()
    } else {
        BitBoard::EMPTY
    }
}

#[inline(always)]
fn rank_mask(relative: i8, color: Color) -> BitBoard {
    let absolute = match color {
        Color::White => relative,
        Color::Black => 7 - relative,
    };
    Rank::index(absolute as usize).bitboard()
}

/// Ranks at or below `relative` from `color`'s side. Empty for a negative rank.
#[inline(always)]
fn ranks_up_to(relative: i8, color: Color) -> BitBoard {
    (0..=relative.min(7)).fold(BitBoard::EMPTY, |bb, rank| bb | rank_mask(rank, color))
}

/// Ranks strictly above `relative` from `color`'s side.
#[inline(always)]
fn ranks_above(relative: i8, color: Color) -> BitBoard {
    ((relative.max(-1) + 1)..8).fold(BitBoard::EMPTY, |bb, rank| bb | rank_mask(rank, color))
}
