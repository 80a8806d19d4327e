use crate::error::Result;
use crate::footprint::{Footprint, FootprintId};
use crate::geometry::{require_polygonal, Planar};

use super::params::ScoringMode;

/// Overlap magnitude of a footprint pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapScore {
    /// Score in `[0, 1]` under the scorer's mode.
    pub ratio: f64,
    /// Raw area of the shared region.
    pub intersection_area: f64,
}

impl OverlapScore {
    /// Returns `true` if the score is strictly above `threshold`.
    #[must_use]
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.ratio > threshold
    }
}

/// Scores footprint pairs under one [`ScoringMode`].
#[derive(Debug, Clone, Copy)]
pub struct OverlapScorer {
    mode: ScoringMode,
}

impl OverlapScorer {
    #[must_use]
    pub fn new(mode: ScoringMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(&self) -> ScoringMode {
        self.mode
    }

    /// Scores two footprints.
    ///
    /// Both must be non-degenerate; a zero-area operand scores `0`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidGeometryKind` if either geometry is not
    /// a polygon or multi-polygon.
    pub fn score<G: Planar>(
        &self,
        a: (FootprintId, &Footprint<G>),
        b: (FootprintId, &Footprint<G>),
    ) -> Result<OverlapScore> {
        require_polygonal(a.0, a.1.geometry())?;
        require_polygonal(b.0, b.1.geometry())?;
        let (area_a, area_b) = (a.1.area(), b.1.area());
        let intersection_area = a.1.geometry().intersection(b.1.geometry()).area().max(0.0);

        let ratio = match self.mode {
            ScoringMode::Containment => {
                fraction(intersection_area, area_a).max(fraction(intersection_area, area_b))
            }
            // Union area by inclusion-exclusion.
            ScoringMode::IntersectionOverUnion => {
                fraction(intersection_area, area_a + area_b - intersection_area)
            }
        };
        Ok(OverlapScore {
            ratio,
            intersection_area,
        })
    }
}

fn fraction(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
