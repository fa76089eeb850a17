mod board_query;
pub mod coords;
mod error;
pub mod moves;
mod position;

pub use board_query::{BoardQuery, MoveSummary, Occupancy, Occupant};
pub use coords::{clamp01, forward, in_enemy_half, offset, relative_rank, square_at};
pub use error::PositionError;
pub use position::Position;
