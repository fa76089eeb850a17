mod eval_activity;
mod eval_king;
mod eval_material;
mod eval_pawns;
mod eval_space;
mod pawn_cache;

pub use eval_activity::evaluate as activity;
pub use eval_king::evaluate as king_safety;
pub use eval_material::evaluate as material;
pub use eval_pawns::evaluate as pawn_structure;
pub use eval_pawns::{analyze, score, FileKind, FlankBalance, PawnStructureReport};
pub use eval_space::evaluate as space;
pub use pawn_cache::{CachedPawnEvaluation, PawnCache, PawnLayout};

use cozy_chess::Color;
use log::debug;
use rayon::prelude::*;
use utils::{BoardQuery, Position};

use crate::config::EvaluatorConfig;
use crate::def::{Metric, MetricResult, SideScores};

/// Computes the five metrics for both sides of a position.
///
/// Owns the pawn-structure cache, so keep one evaluator alive for a session of
/// related positions. Shareable between threads.
pub struct Evaluator {
    pawn_cache: PawnCache,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        let pawn_cache = match config.pawn_cache_capacity {
            Some(limit) => PawnCache::with_capacity_limit(limit),
            None => PawnCache::new(),
        };
        Self { pawn_cache }
    }

    pub fn pawn_cache(&self) -> &PawnCache {
        &self.pawn_cache
    }

    /// Decode `encoding` and score it. An encoding that does not decode gives an
    /// empty list; otherwise all five metrics are returned in fixed order.
    pub fn compute(&self, encoding: &str) -> Vec<MetricResult> {
        match Position::parse(encoding) {
            Ok(position) => self.evaluate_position(&position).to_vec(),
            Err(e) => {
                debug!("Rejected position: {}", e);
                Vec::new()
            }
        }
    }

    /// `compute` for many encodings in parallel. Output order follows input order.
    pub fn compute_batch<S: AsRef<str> + Sync>(&self, encodings: &[S]) -> Vec<Vec<MetricResult>> {
        encodings
            .par_iter()
            .map(|encoding| self.compute(encoding.as_ref()))
            .collect()
    }

    pub fn evaluate_position<B: BoardQuery>(&self, board: &B) -> [MetricResult; 5] {
        Metric::ALL.map(|metric| {
            let scores = self.side_scores(board, metric);
            MetricResult::new(metric, scores.white, scores.black)
        })
    }

    fn side_scores<B: BoardQuery>(&self, board: &B, metric: Metric) -> SideScores {
        let both = |evaluate: fn(&B, Color) -> f32| SideScores {
            white: evaluate(board, Color::White),
            black: evaluate(board, Color::Black),
        };

        match metric {
            Metric::Material => material(board),
            Metric::KingSafety => both(king_safety::<B>),
            Metric::Activity => both(activity::<B>),
            Metric::PawnStructure => SideScores {
                white: pawn_structure(board, Color::White, &self.pawn_cache),
                black: pawn_structure(board, Color::Black, &self.pawn_cache),
            },
            Metric::Space => both(space::<B>),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

/// Score one encoded position. Uses a fresh evaluator, so nothing is retained
/// between calls; hold an [`Evaluator`] to reuse the pawn cache.
pub fn compute_kmaps(encoding: &str) -> Vec<MetricResult> {
    Evaluator::default().compute(encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    const POSITIONS: &[&str] = &[
        START,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkb1r/ppppp1pp/7n/4Pp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "4k3/8/8/8/8/8/8/r3K3 w - - 0 1",
    ];

    fn by_name<'a>(results: &'a [MetricResult], name: &str) -> &'a MetricResult {
        results.iter().find(|r| r.metric == name).unwrap()
    }

    #[test]
    fn test_fixed_shape_and_order() {
        let results = compute_kmaps(START);
        let names: Vec<_> = results.iter().map(|r| r.metric).collect();
        assert_eq!(
            names,
            ["Material", "King Safety", "Activity", "Pawn Structure", "Space"]
        );
    }

    #[test]
    fn test_invalid_input_gives_empty_list() {
        assert!(compute_kmaps("").is_empty());
        assert!(compute_kmaps("   ").is_empty());
        assert!(compute_kmaps("hello world").is_empty());
        assert!(compute_kmaps("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1").is_empty());
        // No black king.
        assert!(compute_kmaps("8/8/8/8/8/8/8/K7 w - - 0 1").is_empty());
    }

    #[test]
    fn test_all_scores_in_unit_range() {
        for fen in POSITIONS {
            let results = compute_kmaps(fen);
            assert_eq!(results.len(), 5, "{}", fen);
            for r in &results {
                assert!((0.0..=1.0).contains(&r.white), "{} {:?}", fen, r);
                assert!((0.0..=1.0).contains(&r.black), "{} {:?}", fen, r);
            }
        }
    }

    #[test]
    fn test_material_is_zero_sum() {
        for fen in POSITIONS {
            let results = compute_kmaps(fen);
            let material = by_name(&results, "Material");
            assert!((material.white + material.black - 1.0).abs() < 1e-6, "{}", fen);
        }
    }

    #[test]
    fn test_starting_position_properties() {
        let results = compute_kmaps(START);

        let material = by_name(&results, "Material");
        assert_eq!((material.white, material.black), (0.5, 0.5));

        let king = by_name(&results, "King Safety");
        assert!(king.white > 0.4 && king.white <= 1.0);
        assert!(king.black > 0.4 && king.black <= 1.0);

        let space = by_name(&results, "Space");
        assert!((space.white - space.black).abs() < 0.1);

        let activity = by_name(&results, "Activity");
        assert!(activity.white < 0.5 && activity.black < 0.5);
    }

    #[test]
    fn test_idempotent_with_shared_cache() {
        let evaluator = Evaluator::default();
        for fen in POSITIONS {
            let first = evaluator.compute(fen);
            let second = evaluator.compute(fen);
            assert_eq!(first, second, "{}", fen);
            assert_eq!(first, compute_kmaps(fen), "{}", fen);
        }
        assert!(!evaluator.pawn_cache().is_empty());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let evaluator = Evaluator::new(EvaluatorConfig {
            pawn_cache_capacity: Some(2),
        });
        let mut encodings: Vec<&str> = POSITIONS.to_vec();
        encodings.push("garbage");

        let batch = evaluator.compute_batch(&encodings);
        assert_eq!(batch.len(), encodings.len());
        for (fen, results) in encodings.iter().zip(&batch) {
            assert_eq!(results, &compute_kmaps(fen), "{}", fen);
        }
        assert!(batch.last().unwrap().is_empty());
        assert!(evaluator.pawn_cache().len() <= 2);
    }

    #[test]
    fn test_json_field_names() {
        let results = compute_kmaps(START);
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["metric"], "Material");
        assert_eq!(json["White"], 0.5);
        assert_eq!(json["Black"], 0.5);
    }

    #[test]
    fn test_evaluate_position_on_decoded_board() {
        let position: Position = START.parse().unwrap();
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate_position(&position).to_vec(), compute_kmaps(START));
    }
}
