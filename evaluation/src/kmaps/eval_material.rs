use cozy_chess::Color;
use log::debug;
use utils::{clamp01, BoardQuery};

use crate::def::SideScores;
use crate::weights::{piece_value, MATERIAL_RANGE, MAX_SIDE_MATERIAL};

/// Zero-sum material balance: equal material is 0.5 for both sides and the
/// two scores always add up to 1 inside the clamp range.
pub fn evaluate<B: BoardQuery>(board: &B) -> SideScores {
    let mut totals = [0i32; Color::NUM];
    for (_, occupant) in board.occupied() {
        totals[occupant.color as usize] += piece_value(occupant.piece);
    }

    // Only reachable through promotions or non-standard setups; clamped below.
    if totals.iter().any(|&t| t as f32 > MAX_SIDE_MATERIAL) {
        debug!("Material beyond {} on one side: {:?}", MAX_SIDE_MATERIAL, totals);
    }

    let diff = (totals[Color::White as usize] - totals[Color::Black as usize]) as f32;
    SideScores {
        white: clamp01((diff + MAX_SIDE_MATERIAL) / MATERIAL_RANGE),
        black: clamp01((-diff + MAX_SIDE_MATERIAL) / MATERIAL_RANGE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utils::Position;

    fn material(fen: &str) -> SideScores {
        evaluate(&fen.parse::<Position>().unwrap())
    }

    #[test]
    fn test_startpos_is_balanced() {
        let scores = evaluate(&Position::default());
        assert_eq!(scores.white, 0.5);
        assert_eq!(scores.black, 0.5);
    }

    #[test]
    fn test_pawn_up_favours_that_side() {
        // Black's e-pawn is gone.
        let scores = material("rnbqkbnr/pppp1ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(scores.white > scores.black);
        assert!((scores.white - 40.0 / 78.0).abs() < 1e-6);
    }

    #[test]
    fn test_scores_sum_to_one() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "3qk3/8/8/8/8/8/8/4K3 w - - 0 1",
        ] {
            let scores = material(fen);
            assert!((scores.white + scores.black - 1.0).abs() < 1e-6, "{}", fen);
        }
    }

    #[test]
    fn test_lone_queen_against_bare_king() {
        let scores = material("3qk3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert!((scores.black - 48.0 / 78.0).abs() < 1e-6);
        assert!((scores.white - 30.0 / 78.0).abs() < 1e-6);
    }

    #[test]
    fn test_extra_promoted_material_is_clamped() {
        // Eight white queens against a bare king.
        let scores = material("4k3/8/8/8/8/8/QQQQ4/QQQQK3 w - - 0 1");
        assert_eq!(scores.white, 1.0);
        assert_eq!(scores.black, 0.0);
    }
}
