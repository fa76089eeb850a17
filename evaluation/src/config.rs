#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluatorConfig {
    /// Most pawn layouts kept before the pawn cache is cleared. None = unbounded.
    pub pawn_cache_capacity: Option<usize>,
}
