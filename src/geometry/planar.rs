use std::borrow::Cow;

use geo::{
    coord, Area, BooleanOps, BoundingRect, Geometry, Intersects, LineString, MultiPolygon,
    Polygon, Rect,
};

use super::{GeometryKind, Planar};

/// Returns a polygon with no vertices and zero area.
#[must_use]
pub fn empty_polygon() -> Polygon<f64> {
    Polygon::new(LineString::new(Vec::new()), Vec::new())
}

/// Views a polygonal geometry as a multi-polygon so boolean ops see one type.
fn as_multi_polygon(geometry: &Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geometry {
        Geometry::Polygon(polygon) => Some(MultiPolygon::new(vec![polygon.clone()])),
        Geometry::MultiPolygon(multi) => Some(dissolve(multi).into_owned()),
        _ => None,
    }
}

/// Merges overlapping parts of a multi-polygon.
///
/// The boolean ops treat overlapping parts with an even-odd fill, which
/// cancels the shared region, while a plain area sum counts it twice.
/// Parts with pairwise disjoint bounding rectangles are returned as is.
fn dissolve(multi: &MultiPolygon<f64>) -> Cow<'_, MultiPolygon<f64>> {
    let rects: Vec<Rect<f64>> = multi.0.iter().filter_map(|part| part.bounding_rect()).collect();
    let disjoint = rects
        .iter()
        .enumerate()
        .all(|(i, r)| rects[i + 1..].iter().all(|other| !r.intersects(other)));
    if disjoint {
        return Cow::Borrowed(multi);
    }
    let merged = multi.0.iter().fold(MultiPolygon::new(Vec::new()), |acc, part| {
        acc.union(&MultiPolygon::new(vec![part.clone()]))
    });
    Cow::Owned(merged)
}

/// Smallest rectangle covering both rectangles.
fn cover(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

impl Planar for Geometry<f64> {
    fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::Point(_) => GeometryKind::Other("Point"),
            Geometry::Line(_) => GeometryKind::Other("Line"),
            Geometry::LineString(_) => GeometryKind::Other("LineString"),
            Geometry::MultiPoint(_) => GeometryKind::Other("MultiPoint"),
            Geometry::MultiLineString(_) => GeometryKind::Other("MultiLineString"),
            Geometry::GeometryCollection(_) => GeometryKind::Other("GeometryCollection"),
            Geometry::Rect(_) => GeometryKind::Other("Rect"),
            Geometry::Triangle(_) => GeometryKind::Other("Triangle"),
        }
    }

    fn area(&self) -> f64 {
        match self {
            Geometry::MultiPolygon(multi) => dissolve(multi).unsigned_area(),
            _ => self.unsigned_area(),
        }
    }

    fn intersection(&self, other: &Self) -> Self {
        match (as_multi_polygon(self), as_multi_polygon(other)) {
            (Some(a), Some(b)) => Geometry::MultiPolygon(a.intersection(&b)),
            _ => Geometry::MultiPolygon(MultiPolygon::new(Vec::new())),
        }
    }

    fn union(&self, other: &Self) -> Self {
        match (as_multi_polygon(self), as_multi_polygon(other)) {
            (Some(a), Some(b)) => Geometry::MultiPolygon(a.union(&b)),
            _ => Geometry::MultiPolygon(MultiPolygon::new(Vec::new())),
        }
    }

    fn envelope(&self) -> Self {
        match self.bounding_rect() {
            Some(rect) => Geometry::Polygon(rect.to_polygon()),
            None => Geometry::Polygon(empty_polygon()),
        }
    }

    // The boolean union snaps coordinates to a grid; bounding rectangles do not.
    fn union_envelope(&self, other: &Self) -> Self {
        let rect = match (self.bounding_rect(), other.bounding_rect()) {
            (Some(a), Some(b)) => Some(cover(a, b)),
            (rect, None) | (None, rect) => rect,
        };
        rect.map_or_else(
            || Geometry::Polygon(empty_polygon()),
            |rect| Geometry::Polygon(rect.to_polygon()),
        )
    }
}
