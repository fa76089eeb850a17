use cozy_chess::{BitBoard, Color, Piece};
use utils::{clamp01, BoardQuery};

use crate::weights::{ACTIVITY_CENTRAL_MINOR_BONUS, ACTIVITY_MOVE_NORM};

/// d4, e4, d5, e5.
const CENTER: BitBoard = BitBoard(0x0000_0018_1800_0000);

/// Non-pawn mobility of `color` plus a bonus per minor piece on a center square.
/// Moves are counted as if `color` were to move.
pub fn evaluate<B: BoardQuery>(board: &B, color: Color) -> f32 {
    let variant = board.with_side_to_move(color);
    let piece_moves = variant
        .legal_moves()
        .iter()
        .filter(|mv| mv.piece != Piece::Pawn)
        .count();

    let mobility = (piece_moves as f32 / ACTIVITY_MOVE_NORM).min(1.0);

    let minors = board.colored_pieces(color, Piece::Knight) | board.colored_pieces(color, Piece::Bishop);
    let centralized = (minors & CENTER).len() as f32;

    clamp01(mobility + centralized * ACTIVITY_CENTRAL_MINOR_BONUS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use utils::Position;

    fn activity(fen: &str, color: Color) -> f32 {
        evaluate(&fen.parse::<Position>().unwrap(), color)
    }

    #[test]
    fn test_startpos_is_low_for_both() {
        let position = Position::default();
        // Four knight moves each.
        assert!((evaluate(&position, Color::White) - 0.1).abs() < 1e-6);
        assert!((evaluate(&position, Color::Black) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_developed_position_is_more_active() {
        let open = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQK2R w KQkq - 6 5";
        let start = Position::default();
        assert!(activity(open, Color::White) > evaluate(&start, Color::White));
        assert!(activity(open, Color::Black) > evaluate(&start, Color::Black));
    }

    #[test]
    fn test_central_minor_bonus() {
        // Same knight on e4 and in the a1 corner.
        let central = activity("4k3/8/8/8/4N3/8/8/4K3 w - - 0 1", Color::White);
        let corner = activity("4k3/8/8/8/8/8/8/N3K3 w - - 0 1", Color::White);
        // Ne4: 8 knight moves + 5 king moves, plus the center bonus.
        assert!((central - (13.0 / 40.0 + 0.1)).abs() < 1e-6, "{}", central);
        // Na1: 2 knight moves + 5 king moves.
        assert!((corner - 7.0 / 40.0).abs() < 1e-6, "{}", corner);
    }

    #[test]
    fn test_counts_moves_for_the_side_not_to_move() {
        let fen = "4k3/8/8/8/4N3/8/8/4K3 b - - 0 1";
        assert!((activity(fen, Color::White) - (13.0 / 40.0 + 0.1)).abs() < 1e-6);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let position: Position = "4k3/8/8/8/4N3/8/8/4K3 b - - 0 1".parse().unwrap();
        let before = position.encode();
        evaluate(&position, Color::White);
        assert_eq!(position.encode(), before);
    }
}
