use serde::Serialize;

/// The five metrics, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Material,
    KingSafety,
    Activity,
    PawnStructure,
    Space,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Material,
        Metric::KingSafety,
        Metric::Activity,
        Metric::PawnStructure,
        Metric::Space,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Metric::Material => "Material",
            Metric::KingSafety => "King Safety",
            Metric::Activity => "Activity",
            Metric::PawnStructure => "Pawn Structure",
            Metric::Space => "Space",
        }
    }
}

/// One metric for both sides. Serializes as `{"metric", "White", "Black"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricResult {
    pub metric: &'static str,
    #[serde(rename = "White")]
    pub white: f32,
    #[serde(rename = "Black")]
    pub black: f32,
}

impl MetricResult {
    pub fn new(metric: Metric, white: f32, black: f32) -> Self {
        Self {
            metric: metric.name(),
            white,
            black,
        }
    }
}

/// A score pair, as returned by metrics that evaluate both sides at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideScores {
    pub white: f32,
    pub black: f32,
}

