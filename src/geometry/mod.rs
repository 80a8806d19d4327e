//! Geometry capability consumed by the consolidation engine.
//!
//! The engine never inspects coordinates directly. It only needs area,
//! intersection, union and envelope, plus a kind check, so any geometry type
//! implementing [`Planar`] can be consolidated.

mod planar;

use crate::error::GeometryError;
use crate::footprint::FootprintId;

pub use planar::empty_polygon;

/// Shape kind as seen by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
    /// Any non-areal kind, named for error reporting.
    Other(&'static str),
}

impl GeometryKind {
    /// Returns `true` for polygon and multi-polygon kinds.
    #[must_use]
    pub fn is_polygonal(self) -> bool {
        matches!(self, Self::Polygon | Self::MultiPolygon)
    }

    /// Human-readable name of the kind.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
            Self::Other(name) => name,
        }
    }
}

/// Planar geometry operations required by the engine.
///
/// Implementations must return non-negative areas. Operations on
/// non-polygonal kinds may return an empty shape; the engine validates kinds
/// before calling them.
pub trait Planar: Clone {
    /// Kind of this shape.
    fn kind(&self) -> GeometryKind;

    /// Unsigned area.
    fn area(&self) -> f64;

    /// Shared region of `self` and `other`.
    #[must_use]
    fn intersection(&self, other: &Self) -> Self;

    /// Combined region of `self` and `other`.
    #[must_use]
    fn union(&self, other: &Self) -> Self;

    /// Minimum axis-aligned bounding rectangle, as a shape.
    #[must_use]
    fn envelope(&self) -> Self;

    /// Envelope of the union of `self` and `other`.
    ///
    /// Implementations whose boolean ops round coordinates should override
    /// this so the result covers both operands exactly.
    #[must_use]
    fn union_envelope(&self, other: &Self) -> Self {
        self.union(other).envelope()
    }
}

/// Fails unless `geometry` is a polygon or multi-polygon.
pub(crate) fn require_polygonal<G: Planar>(
    id: FootprintId,
    geometry: &G,
) -> Result<(), GeometryError> {
    let kind = geometry.kind();
    if kind.is_polygonal() {
        Ok(())
    } else {
        Err(GeometryError::InvalidGeometryKind {
            id,
            kind: kind.name(),
        })
    }
}
