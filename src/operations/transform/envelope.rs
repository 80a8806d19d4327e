use crate::error::Result;
use crate::footprint::FootprintSet;
use crate::geometry::{require_polygonal, Planar};

/// Replaces every footprint by its minimum axis-aligned bounding rectangle.
///
/// Ids and order are preserved. Boundary detail is discarded, so the area of
/// each footprint can only grow.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeriveEnvelopes;

impl DeriveEnvelopes {
    /// Creates a new `DeriveEnvelopes` operation.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the operation, returning a new set.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnprojectedCoordinateSystem` for geographic
    /// input, or `GeometryError::InvalidGeometryKind` for non-polygonal
    /// footprints.
    pub fn execute<G: Planar>(&self, set: &FootprintSet<G>) -> Result<FootprintSet<G>> {
        set.crs().require_projected()?;
        set.try_map_geometries(set.crs(), |id, geometry| {
            require_polygonal(id, geometry)?;
            Ok(geometry.envelope())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{FootprintError, GeometryError};
    use crate::footprint::Crs;
    use approx::assert_abs_diff_eq;
    use geo::{line_string, point, Geometry, MultiPolygon, Polygon};

    fn triangle_polygon(x: f64) -> Polygon<f64> {
        Polygon::new(
            line_string![(x: x, y: 0.0), (x: x + 4.0, y: 0.0), (x: x, y: 3.0), (x: x, y: 0.0)],
            vec![],
        )
    }

    fn triangle(x: f64) -> Geometry<f64> {
        Geometry::Polygon(triangle_polygon(x))
    }

    #[test]
    fn envelopes_keep_ids_and_order() {
        let mut set = FootprintSet::new(Crs::LAMBERT_93);
        let a = set.push(triangle(0.0));
        let b = set.push(triangle(10.0));
        let boxes = DeriveEnvelopes::new().execute(&set).unwrap();

        assert_eq!(boxes.ids().collect::<Vec<_>>(), vec![a, b]);
        assert_abs_diff_eq!(set.get(a).unwrap().area(), 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(boxes.get(a).unwrap().area(), 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(boxes.get(b).unwrap().area(), 12.0, epsilon = 1e-9);
    }

    #[test]
    fn multi_polygon_envelope_spans_all_parts() {
        let parts = MultiPolygon::new(vec![triangle_polygon(0.0), triangle_polygon(10.0)]);
        let set =
            FootprintSet::from_geometries(Crs::LAMBERT_93, vec![Geometry::MultiPolygon(parts)]);
        let boxes = DeriveEnvelopes::new().execute(&set).unwrap();
        let (_, env) = boxes.iter().next().unwrap();
        assert_abs_diff_eq!(env.area(), 14.0 * 3.0, epsilon = 1e-9);
    }

    #[test]
    fn geographic_input_fails_fast() {
        let set = FootprintSet::from_geometries(Crs::WGS84, vec![triangle(0.0)]);
        let err = DeriveEnvelopes::new().execute(&set).unwrap_err();
        assert!(matches!(
            err,
            FootprintError::Geometry(GeometryError::UnprojectedCoordinateSystem { .. })
        ));
    }

    #[test]
    fn non_polygonal_input_is_rejected() {
        let mut set = FootprintSet::new(Crs::LAMBERT_93);
        set.push(triangle(0.0));
        set.push(point! { x: 1.0, y: 1.0 }.into());
        assert!(DeriveEnvelopes::new().execute(&set).is_err());
    }
}
