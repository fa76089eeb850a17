use ahash::AHashMap;
use cozy_chess::{BitBoard, Color, Piece};
use log::{debug, trace};
use std::sync::RwLock;
use utils::BoardQuery;

/// Both sides' pawn squares. Pawn-structure scores depend on nothing else,
/// so this doubles as the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PawnLayout {
    white: u64,
    black: u64,
}

impl PawnLayout {
    pub fn new(white: BitBoard, black: BitBoard) -> Self {
        Self {
            white: white.0,
            black: black.0,
        }
    }

    pub fn from_board<B: BoardQuery>(board: &B) -> Self {
        Self::new(
            board.colored_pieces(Color::White, Piece::Pawn),
            board.colored_pieces(Color::Black, Piece::Pawn),
        )
    }

    #[inline(always)]
    pub fn pawns(&self, color: Color) -> BitBoard {
        match color {
            Color::White => BitBoard(self.white),
            Color::Black => BitBoard(self.black),
        }
    }

    #[inline(always)]
    pub fn all(&self) -> BitBoard {
        BitBoard(self.white | self.black)
    }
}

/// Per-side scores for one layout; a side is filled in the first time it is asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CachedPawnEvaluation {
    pub white: Option<f32>,
    pub black: Option<f32>,
}

impl CachedPawnEvaluation {
    #[inline(always)]
    pub fn get(&self, color: Color) -> Option<f32> {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    #[inline(always)]
    fn set(&mut self, color: Color, score: f32) {
        match color {
            Color::White => self.white = Some(score),
            Color::Black => self.black = Some(score),
        }
    }
}

// Pawn layouts repeat across positions (every piece move keeps them), so scores are
// kept per layout. Safe to share between threads; the per-layout merge happens
// under the write lock so one side never overwrites the other.
pub struct PawnCache {
    entries: RwLock<AHashMap<PawnLayout, CachedPawnEvaluation>>,
    capacity: Option<usize>,
}

impl PawnCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(AHashMap::new()),
            capacity: None,
        }
    }

    /// A cache that is cleared whenever a new layout would exceed `limit` entries.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            entries: RwLock::new(AHashMap::with_capacity(limit.min(1 << 16))),
            capacity: Some(limit.max(1)),
        }
    }

    pub fn get(&self, layout: &PawnLayout, color: Color) -> Option<f32> {
        let entries = self.entries.read().ok()?;
        let score = entries.get(layout)?.get(color);
        if score.is_some() {
            trace!("Pawn cache hit for {:?}", color);
        }
        score
    }

    pub fn set(&self, layout: PawnLayout, color: Color, score: f32) {
        let Ok(mut entries) = self.entries.write() else {
            return;
        };

        if let Some(limit) = self.capacity {
            if entries.len() >= limit && !entries.contains_key(&layout) {
                debug!("Pawn cache reached {} layouts, clearing", entries.len());
                entries.clear();
            }
        }

        entries.entry(layout).or_default().set(color, score);
    }

    /// Both sides' scores for a layout, if any are cached.
    pub fn entry(&self, layout: &PawnLayout) -> Option<CachedPawnEvaluation> {
        self.entries.read().ok()?.get(layout).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

impl Default for PawnCache {
    fn default() -> Self {
        Self::new()
    }
}
