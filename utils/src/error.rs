/// The one failure the core knows about: an encoding that does not decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("empty position encoding")]
    Empty,

    #[error("invalid position encoding '{encoding}': {reason}")]
    InvalidEncoding { encoding: String, reason: String },
}
