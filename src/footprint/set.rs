use geo::Geometry;
use slotmap::SlotMap;

use super::Crs;
use crate::error::Result;
use crate::geometry::Planar;

slotmap::new_key_type! {
    /// Stable identifier of a footprint within a [`FootprintSet`].
    ///
    /// Ids survive reduction passes: a footprint carried forward keeps its id,
    /// and merged footprints receive fresh ids distinct from both parents.
    pub struct FootprintId;
}

/// A single planar outline with its cached area.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint<G = Geometry<f64>> {
    geometry: G,
    area: f64,
}

impl<G: Planar> Footprint<G> {
    /// Wraps a geometry, caching its area.
    #[must_use]
    pub fn new(geometry: G) -> Self {
        let area = geometry.area().max(0.0);
        Self { geometry, area }
    }

    /// Replaces the geometry and recomputes the cached area.
    pub fn set_geometry(&mut self, geometry: G) {
        self.area = geometry.area().max(0.0);
        self.geometry = geometry;
    }
}

impl<G> Footprint<G> {
    /// The outline.
    #[must_use]
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Cached unsigned area, never negative.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Zero-area footprints are never matched or merged.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.area <= 0.0
    }

    /// Consumes the footprint, returning its outline.
    #[must_use]
    pub fn into_geometry(self) -> G {
        self.geometry
    }
}

/// Ordered collection of footprints sharing one coordinate system.
///
/// Insertion order is the scan order of the reducer, so it is preserved by
/// every operation on the set.
#[derive(Debug, Clone)]
pub struct FootprintSet<G = Geometry<f64>> {
    crs: Crs,
    entries: SlotMap<FootprintId, Footprint<G>>,
    order: Vec<FootprintId>,
}

impl<G> FootprintSet<G> {
    /// Creates an empty set.
    #[must_use]
    pub fn new(crs: Crs) -> Self {
        Self {
            crs,
            entries: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Coordinate system of every footprint in the set.
    #[must_use]
    pub fn crs(&self) -> Crs {
        self.crs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: FootprintId) -> bool {
        self.entries.contains_key(id)
    }

    /// Returns the footprint with the given id, if present.
    #[must_use]
    pub fn get(&self, id: FootprintId) -> Option<&Footprint<G>> {
        self.entries.get(id)
    }

    /// Footprint ids in scan order.
    pub fn ids(&self) -> impl Iterator<Item = FootprintId> + '_ {
        self.order.iter().copied()
    }

    /// Footprints in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (FootprintId, &Footprint<G>)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.entries.get(id).map(|fp| (id, fp)))
    }

    /// Sum of cached areas.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.iter().map(|(_, fp)| fp.area()).sum()
    }
}

impl<G: Planar> FootprintSet<G> {
    /// Builds a set from geometries, in iteration order.
    pub fn from_geometries(crs: Crs, geometries: impl IntoIterator<Item = G>) -> Self {
        let mut set = Self::new(crs);
        for geometry in geometries {
            set.push(geometry);
        }
        set
    }

    /// Appends a footprint at the end of the scan order.
    pub fn push(&mut self, geometry: G) -> FootprintId {
        let id = self.entries.insert(Footprint::new(geometry));
        self.order.push(id);
        id
    }

    /// Builds the successor of this set: footprints for which `keep` holds stay
    /// in their relative order with their ids, then `created` is appended.
    ///
    /// `self` is left untouched.
    pub(crate) fn carry_forward(
        &self,
        keep: impl Fn(FootprintId) -> bool,
        created: Vec<G>,
    ) -> Self {
        let mut entries = self.entries.clone();
        let mut order = Vec::with_capacity(self.order.len());
        for &id in &self.order {
            if keep(id) {
                order.push(id);
            } else {
                entries.remove(id);
            }
        }
        for geometry in created {
            order.push(entries.insert(Footprint::new(geometry)));
        }
        Self {
            crs: self.crs,
            entries,
            order,
        }
    }

    /// Maps every geometry through `f`, keeping ids and order, and tags the
    /// result with `crs`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`; no partial set is returned.
    pub fn try_map_geometries<F>(&self, crs: Crs, mut f: F) -> Result<Self>
    where
        F: FnMut(FootprintId, &G) -> Result<G>,
    {
        let mut entries = self.entries.clone();
        for &id in &self.order {
            if let Some(fp) = entries.get_mut(id) {
                let mapped = f(id, fp.geometry())?;
                fp.set_geometry(mapped);
            }
        }
        Ok(Self {
            crs,
            entries,
            order: self.order.clone(),
        })
    }
}
