use geo::{coord, Coord, Geometry, MapCoords};

use crate::error::{ProjectionError, Result};
use crate::footprint::FootprintSet;
use crate::math::Point2;
use crate::projection::CoordinateProjector;

/// Which way a [`Reproject`] maps coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Geographic to projected.
    Forward,
    /// Projected to geographic.
    Inverse,
}

/// Maps every footprint of a set through a [`CoordinateProjector`].
///
/// Ids and scan order are preserved; cached areas are recomputed in the new
/// system.
pub struct Reproject<'a, P: ?Sized> {
    projector: &'a P,
    direction: Direction,
}

impl<'a, P: CoordinateProjector + ?Sized> Reproject<'a, P> {
    /// Creates a new `Reproject` operation.
    #[must_use]
    pub fn new(projector: &'a P, direction: Direction) -> Self {
        Self {
            projector,
            direction,
        }
    }

    /// Geographic to projected.
    #[must_use]
    pub fn forward(projector: &'a P) -> Self {
        Self::new(projector, Direction::Forward)
    }

    /// Projected back to geographic.
    #[must_use]
    pub fn inverse(projector: &'a P) -> Self {
        Self::new(projector, Direction::Inverse)
    }

    /// Executes the reprojection, returning a new set.
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError::CrsMismatch` if `set` is not in the system
    /// this direction expects, or `ProjectionError::OutOfDomain` if any vertex
    /// cannot be mapped.
    pub fn execute(
        &self,
        set: &FootprintSet<Geometry<f64>>,
    ) -> Result<FootprintSet<Geometry<f64>>> {
        let (from, to) = match self.direction {
            Direction::Forward => (self.projector.source(), self.projector.target()),
            Direction::Inverse => (self.projector.target(), self.projector.source()),
        };
        if set.crs() != from {
            return Err(ProjectionError::CrsMismatch {
                expected: from,
                found: set.crs(),
            }
            .into());
        }
        set.try_map_geometries(to, |_, geometry| {
            Ok(geometry.try_map_coords(move |c| self.map(c))?)
        })
    }

    fn map(&self, c: Coord<f64>) -> std::result::Result<Coord<f64>, ProjectionError> {
        let p = Point2::new(c.x, c.y);
        let q = match self.direction {
            Direction::Forward => self.projector.forward(p)?,
            Direction::Inverse => self.projector.inverse(p)?,
        };
        Ok(coord! { x: q.x, y: q.y })
    }
}
