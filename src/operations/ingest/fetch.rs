use geo::Geometry;

use crate::error::Result;
use crate::footprint::FootprintSet;
use crate::geometry::Planar;
use crate::operations::transform::Reproject;
use crate::projection::{CoordinateProjector, QueryBounds};
use crate::provider::FootprintProvider;

/// Fetches building outlines for a query rectangle and brings them into the
/// projector's metric system.
///
/// Only polygons and multi-polygons are kept; other kinds returned by the
/// provider (nodes, open ways) are discarded before the set is built.
pub struct Ingest<'a, F: ?Sized, P: ?Sized> {
    provider: &'a F,
    projector: &'a P,
}

impl<'a, F, P> Ingest<'a, F, P>
where
    F: FootprintProvider + ?Sized,
    P: CoordinateProjector + ?Sized,
{
    /// Creates a new `Ingest` operation.
    #[must_use]
    pub fn new(provider: &'a F, projector: &'a P) -> Self {
        Self {
            provider,
            projector,
        }
    }

    /// Executes the fetch, returning a projected footprint set in provider
    /// order.
    ///
    /// # Errors
    ///
    /// Propagates provider failures, and returns a `ProjectionError` if the
    /// provider's system differs from the projector's source or a vertex
    /// cannot be projected.
    pub fn execute(&self, bounds: &QueryBounds) -> Result<FootprintSet<Geometry<f64>>> {
        let raw = self.provider.fetch(bounds)?;
        let fetched = raw.len();
        let polygonal: Vec<_> = raw.into_iter().filter(|g| g.kind().is_polygonal()).collect();
        let discarded = fetched - polygonal.len();
        if discarded > 0 {
            tracing::debug!(fetched, discarded, "discarded non-polygonal features");
        }

        let geographic = FootprintSet::from_geometries(self.provider.crs(), polygonal);
        Reproject::forward(self.projector).execute(&geographic)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{FootprintError, ProviderError};
    use crate::footprint::Crs;
    use crate::math::Point2;
    use crate::operations::consolidate::{Consolidate, ConsolidationParams};
    use crate::operations::transform::DeriveEnvelopes;
    use crate::projection::{ImageFrame, LambertConformalConic};
    use crate::provider::StaticProvider;
    use geo::{coord, line_string, point, Rect};

    struct FailingProvider;

    impl FootprintProvider for FailingProvider {
        fn fetch(&self, _bounds: &QueryBounds) -> Result<Vec<Geometry<f64>>> {
            Err(ProviderError::Failed("service unavailable".into()).into())
        }
    }

    fn building(lon: f64, lat: f64, d_lon: f64, d_lat: f64) -> Geometry<f64> {
        let rect = Rect::new(coord! { x: lon, y: lat }, coord! { x: lon + d_lon, y: lat + d_lat });
        Geometry::Polygon(rect.to_polygon())
    }

    fn lyon_bounds(proj: &LambertConformalConic) -> QueryBounds {
        let center = Point2::new(4.835_169, 45.758_683);
        QueryBounds::around(center, &ImageFrame::default(), proj).unwrap()
    }

    #[test]
    fn keeps_polygons_and_projects_them() {
        let proj = LambertConformalConic::lambert_93();
        let provider = StaticProvider::new(vec![
            building(4.8350, 45.7585, 0.0002, 0.0002),
            point! { x: 4.8351, y: 45.7586 }.into(),
            line_string![(x: 4.8350, y: 45.7585), (x: 4.8352, y: 45.7587)].into(),
            building(4.8352, 45.7587, 0.0001, 0.0001),
        ]);
        let set = Ingest::new(&provider, &proj).execute(&lyon_bounds(&proj)).unwrap();
        assert_eq!(set.crs(), Crs::LAMBERT_93);
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|(_, fp)| fp.area() > 10.0));
    }

    #[test]
    fn fetched_outlines_consolidate_end_to_end() {
        let proj = LambertConformalConic::lambert_93();
        let provider = StaticProvider::new(vec![
            building(4.8350, 45.7585, 0.0002, 0.0002),
            building(4.83505, 45.7585, 0.0002, 0.0002),
            building(4.8360, 45.7592, 0.0001, 0.0001),
        ]);
        let set = Ingest::new(&provider, &proj).execute(&lyon_bounds(&proj)).unwrap();
        let boxes = DeriveEnvelopes::new().execute(&set).unwrap();
        let done = Consolidate::new(ConsolidationParams::new()).execute(boxes).unwrap();
        assert!(done.converged);
        assert_eq!(done.footprints.len(), 2);
    }

    #[test]
    fn provider_failure_propagates() {
        let proj = LambertConformalConic::lambert_93();
        let err = Ingest::new(&FailingProvider, &proj)
            .execute(&lyon_bounds(&proj))
            .unwrap_err();
        assert!(matches!(err, FootprintError::Provider(ProviderError::Failed(_))));
    }
}
