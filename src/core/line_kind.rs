use serde::{Deserialize, Serialize};

/// How a chart line is drawn.
///
/// Drawing itself happens outside this crate; the engine only needs the two
/// predicates below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    #[default]
    Line,
    Dot,
    Bar,
    /// Bar drawn from the axis minimum instead of zero.
    BarClamp,
    /// High/low/close bar.
    BarHlc,
    Horizontal,
    ExpandVertical,
    ExpandHorizontalAll,
    ExpandHorizontalFirst,
}

impl LineKind {
    /// `true` when the line's `high`/`low` take part in autoscaling.
    #[must_use]
    pub const fn has_high_low(self) -> bool {
        matches!(self, Self::BarHlc)
    }

    /// `true` when the drawn width follows the skeleton tick width.
    #[must_use]
    pub const fn has_resizable_width(self) -> bool {
        matches!(self, Self::Bar | Self::BarClamp | Self::BarHlc)
    }
}
