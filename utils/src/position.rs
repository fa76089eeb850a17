use cozy_chess::{Board, Color};
use std::fmt;
use std::str::FromStr;

use crate::moves::{collect_legal_moves, collect_pseudo_legal_moves};
use crate::{BoardQuery, MoveSummary, Occupancy, Occupant, PositionError};

/// A decoded position backed by `cozy-chess`.
///
/// `turn` normally equals the board's side to move. It only differs for a
/// variant whose requested side cannot be given the move (the other side is
/// in check); moves are then enumerated pseudo-legally.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    turn: Color,
}

impl Default for Position {
    fn default() -> Self {
        Self::from(Board::default())
    }
}

impl From<Board> for Position {
    fn from(board: Board) -> Self {
        let turn = board.side_to_move();
        Self { board, turn }
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as BoardQuery>::parse(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl BoardQuery for Position {
    fn parse(encoding: &str) -> Result<Self, PositionError> {
        let fen = encoding.trim();
        if fen.is_empty() {
            return Err(PositionError::Empty);
        }

        let board = Board::from_str(fen).map_err(|e| PositionError::InvalidEncoding {
            encoding: fen.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self::from(board))
    }

    fn encode(&self) -> String {
        let fen = self.board.to_string();
        if self.turn == self.board.side_to_move() {
            return fen;
        }

        let side = match self.turn {
            Color::White => "w",
            Color::Black => "b",
        };
        fen.split(' ')
            .enumerate()
            .map(|(idx, field)| if idx == 1 { side } else { field })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[inline(always)]
    fn occupant(&self, square: cozy_chess::Square) -> Option<Occupant> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some(Occupant { piece, color })
    }

    fn occupied(&self) -> Occupancy {
        self.board
            .occupied()
            .into_iter()
            .filter_map(|sq| self.occupant(sq).map(|o| (sq, o)))
            .collect()
    }

    #[inline(always)]
    fn side_to_move(&self) -> Color {
        self.turn
    }

    fn with_side_to_move(&self, side: Color) -> Self {
        if side == self.board.side_to_move() {
            return Self {
                board: self.board.clone(),
                turn: side,
            };
        }

        match self.board.null_move() {
            Some(board) => Self { board, turn: side },
            None => {
                log::trace!("no null move available, {:?} moves pseudo-legally", side);
                Self {
                    board: self.board.clone(),
                    turn: side,
                }
            }
        }
    }

    fn legal_moves(&self) -> Vec<MoveSummary> {
        if self.turn == self.board.side_to_move() {
            collect_legal_moves(&self.board)
        } else {
            collect_pseudo_legal_moves(&self.board, self.turn)
        }
    }

    #[inline(always)]
    fn king_square(&self, color: Color) -> Option<cozy_chess::Square> {
        self.board
            .colored_pieces(color, cozy_chess::Piece::King)
            .into_iter()
            .next()
    }

    #[inline(always)]
    fn colored_pieces(&self, color: Color, piece: cozy_chess::Piece) -> cozy_chess::BitBoard {
        self.board.colored_pieces(color, piece)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cozy_chess::{Piece, Square};

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_parse_encode_round_trip() {
        let position: Position = START.parse().unwrap();
        assert_eq!(position.encode(), START);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(Position::parse("   "), Err(PositionError::Empty)));
        assert!(matches!(
            Position::parse("not a fen"),
            Err(PositionError::InvalidEncoding { .. })
        ));
        assert!(Position::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_king() {
        assert!(Position::parse("8/8/8/8/8/8/8/K7 w - - 0 1").is_err());
    }

    #[test]
    fn test_occupant_lookup() {
        let position = Position::default();
        assert_eq!(
            position.occupant(Square::E1),
            Some(Occupant {
                piece: Piece::King,
                color: Color::White
            })
        );
        assert_eq!(position.occupant(Square::E4), None);
        assert_eq!(position.occupied().len(), 32);
    }

    #[test]
    fn test_with_side_to_move_does_not_mutate() {
        let position = Position::default();
        let flipped = position.with_side_to_move(Color::Black);

        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(flipped.side_to_move(), Color::Black);
        assert_eq!(flipped.legal_moves().len(), 20);
        assert!(flipped
            .legal_moves()
            .iter()
            .all(|m| position.occupant(m.from).map(|o| o.color) == Some(Color::Black)));
    }

    #[test]
    fn test_with_side_to_move_while_in_check() {
        // White is in check, so Black cannot simply be handed the move.
        let position: Position = "4k3/8/8/8/8/8/8/r3K3 w - - 0 1".parse().unwrap();
        let variant = position.with_side_to_move(Color::Black);

        assert_eq!(variant.side_to_move(), Color::Black);
        assert!(variant.encode().contains(" b "));
        assert!(!variant.legal_moves().is_empty());
    }

    #[test]
    fn test_king_square() {
        let position = Position::default();
        assert_eq!(position.king_square(Color::White), Some(Square::E1));
        assert_eq!(position.king_square(Color::Black), Some(Square::E8));
    }
}
