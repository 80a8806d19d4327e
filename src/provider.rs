//! Sources of raw building outlines.

use geo::{BoundingRect, Geometry, Intersects};

use crate::error::Result;
use crate::footprint::Crs;
use crate::projection::QueryBounds;

/// Supplies raw geometries intersecting a geographic query rectangle.
///
/// Results may contain any geometry kind; ingestion keeps only polygonal ones.
pub trait FootprintProvider {
    /// Geographic system of the returned geometries.
    fn crs(&self) -> Crs {
        Crs::WGS84
    }

    /// Fetches geometries for `bounds`, in provider order.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the source cannot be queried.
    fn fetch(&self, bounds: &QueryBounds) -> Result<Vec<Geometry<f64>>>;
}

/// Provider replaying an in-memory feature list, e.g. a previous download.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    features: Vec<Geometry<f64>>,
}

impl StaticProvider {
    #[must_use]
    pub fn new(features: Vec<Geometry<f64>>) -> Self {
        Self { features }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl FootprintProvider for StaticProvider {
    fn fetch(&self, bounds: &QueryBounds) -> Result<Vec<Geometry<f64>>> {
        let query = bounds.to_rect();
        Ok(self
            .features
            .iter()
            .filter(|g| g.bounding_rect().is_some_and(|r| r.intersects(&query)))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use geo::{coord, point, Rect};

    fn square(x: f64, y: f64) -> Geometry<f64> {
        let rect = Rect::new(coord! { x: x, y: y }, coord! { x: x + 0.001, y: y + 0.001 });
        Geometry::Polygon(rect.to_polygon())
    }

    #[test]
    fn fetch_returns_features_touching_bounds_in_order() {
        let provider = StaticProvider::new(vec![
            square(2.35, 48.856),
            square(10.0, 10.0),
            point! { x: 2.3505, y: 48.8568 }.into(),
            square(2.3495, 48.8565),
        ]);
        let bounds = QueryBounds {
            west: 2.3499,
            south: 48.8563,
            east: 2.3510,
            north: 48.8573,
        };
        assert_eq!(provider.len(), 4);
        assert!(!provider.is_empty());
        assert!(StaticProvider::new(Vec::new()).is_empty());

        let found = provider.fetch(&bounds).unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], square(2.35, 48.856));
        assert_eq!(found[2], square(2.3495, 48.8565));
    }
}
