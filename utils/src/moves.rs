use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_pawn_quiets,
    get_rook_moves, Board, Color, Piece,
};

use crate::MoveSummary;

/// Collect all legal moves of the side to move.
#[inline(always)]
pub fn collect_legal_moves(board: &Board) -> Vec<MoveSummary> {
    let mut moves = Vec::with_capacity(64);
    board.generate_moves(|batch| {
        let piece = batch.piece;
        moves.extend(batch.into_iter().map(|mv| MoveSummary {
            piece,
            from: mv.from,
            to: mv.to,
        }));
        false
    });
    moves
}

/// Moves for `color` on a board where it is not allowed to move (the opponent
/// stands in check, so no null move exists). Built from attack tables: pins,
/// castling and en passant are ignored and the enemy king is never a target.
pub fn collect_pseudo_legal_moves(board: &Board, color: Color) -> Vec<MoveSummary> {
    let occupied = board.occupied();
    let enemy = board.colors(!color);
    let targets = !board.colors(color) & !board.colored_pieces(!color, Piece::King);

    let mut moves = Vec::with_capacity(64);
    for piece in Piece::ALL {
        for from in board.colored_pieces(color, piece) {
            let reach = match piece {
                Piece::Pawn => {
                    get_pawn_quiets(from, color, occupied) | (get_pawn_attacks(from, color) & enemy)
                }
                Piece::Knight => get_knight_moves(from),
                Piece::Bishop => get_bishop_moves(from, occupied),
                Piece::Rook => get_rook_moves(from, occupied),
                Piece::Queen => get_bishop_moves(from, occupied) | get_rook_moves(from, occupied),
                Piece::King => get_king_moves(from),
            };
            for to in reach & targets {
                moves.push(MoveSummary { piece, from, to });
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_has_twenty_moves() {
        let moves = collect_legal_moves(&Board::default());
        assert_eq!(moves.len(), 20);
        assert_eq!(
            moves.iter().filter(|m| m.piece == Piece::Knight).count(),
            4
        );
    }

    #[test]
    fn test_pseudo_legal_never_captures_king() {
        // White to move and in check from the rook; Black's rook could "take" the king.
        let board: Board = "4k3/8/8/8/8/8/8/r3K3 w - - 0 1".parse().unwrap();
        let moves = collect_pseudo_legal_moves(&board, Color::Black);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.to != cozy_chess::Square::E1));
    }

    #[test]
    fn test_pseudo_legal_matches_legal_in_quiet_position() {
        let board = Board::default();
        let legal = collect_legal_moves(&board);
        let pseudo = collect_pseudo_legal_moves(&board, Color::White);
        assert_eq!(legal.len(), pseudo.len());
    }
}
