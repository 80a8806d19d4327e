use std::fmt;

use crate::error::GeometryError;

/// Coordinate reference system a footprint set is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crs {
    /// Angular longitude/latitude coordinates.
    Geographic { epsg: u32 },
    /// Planar coordinates in metres.
    Projected { epsg: u32 },
}

impl Crs {
    /// WGS 84 longitude/latitude.
    pub const WGS84: Crs = Crs::Geographic { epsg: 4326 };

    /// RGF93 / Lambert-93, the metric system used for French map data.
    pub const LAMBERT_93: Crs = Crs::Projected { epsg: 2154 };

    /// EPSG code of this system.
    #[must_use]
    pub fn epsg(self) -> u32 {
        match self {
            Self::Geographic { epsg } | Self::Projected { epsg } => epsg,
        }
    }

    /// Returns `true` for planar systems where areas are meaningful.
    #[must_use]
    pub fn is_projected(self) -> bool {
        matches!(self, Self::Projected { .. })
    }

    /// Fails unless this system is projected.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::UnprojectedCoordinateSystem` for geographic systems.
    pub fn require_projected(self) -> Result<(), GeometryError> {
        if self.is_projected() {
            Ok(())
        } else {
            Err(GeometryError::UnprojectedCoordinateSystem { crs: self })
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_epsg_code() {
        assert_eq!(Crs::WGS84.to_string(), "EPSG:4326");
        assert_eq!(Crs::LAMBERT_93.to_string(), "EPSG:2154");
    }

    #[test]
    fn geographic_is_rejected() {
        assert!(Crs::LAMBERT_93.require_projected().is_ok());
        assert!(matches!(
            Crs::WGS84.require_projected(),
            Err(GeometryError::UnprojectedCoordinateSystem { crs }) if crs == Crs::WGS84
        ));
    }
}
