//! Visual emphasis weights for the selected trajectory.

/// Opacity and line width applied to one trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Alpha in [0,1].
    pub opacity: f32,
    /// Width in physical pixels.
    pub width_px: f32,
}

/// Baseline weight for non-selected trajectories.
pub const BASELINE: LineStyle = LineStyle { opacity: 0.7, width_px: 2.0 };

/// Boosted weight for the selected trajectory.
pub const EMPHASIZED: LineStyle = LineStyle { opacity: 1.0, width_px: 4.0 };

/// Style for trajectory `index` when `selected` holds the emphasis.
///
/// A pure mapping from (index, selection) to weight, so re-applying the
/// same selection is idempotent by construction and clearing it restores
/// the uniform baseline for every trajectory.
pub fn style_for(index: usize, selected: Option<usize>) -> LineStyle {
    if selected == Some(index) {
        EMPHASIZED
    } else {
        BASELINE
    }
}
