//! Conversion between geographic and projected coordinates.

mod lambert;

pub use lambert::{LambertConformalConic, LambertParams};

use geo::{coord, Rect};

use crate::error::{ConfigError, ProjectionError, Result};
use crate::footprint::Crs;
use crate::math::{Point2, Vector2};

/// Bidirectional transform between a geographic and a projected system.
pub trait CoordinateProjector {
    /// Geographic system accepted by [`forward`](Self::forward).
    fn source(&self) -> Crs;

    /// Projected system produced by [`forward`](Self::forward).
    fn target(&self) -> Crs;

    /// Geographic `(lon, lat)` to projected `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError::OutOfDomain` for points the projection cannot map.
    fn forward(&self, point: Point2) -> std::result::Result<Point2, ProjectionError>;

    /// Projected `(x, y)` to geographic `(lon, lat)`.
    ///
    /// # Errors
    ///
    /// Returns `ProjectionError::OutOfDomain` for points the projection cannot map.
    fn inverse(&self, point: Point2) -> std::result::Result<Point2, ProjectionError>;
}

/// Pixel raster covered by a query, used to size the query rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageFrame {
    pub width_px: u32,
    pub height_px: u32,
    /// Ground size of one pixel, metres.
    pub pixel_size: f64,
}

impl Default for ImageFrame {
    /// 512 × 512 px at 0.4 m, plus the 30 px attribution strip imagery
    /// providers add at the bottom.
    fn default() -> Self {
        Self {
            width_px: 512,
            height_px: 512 + 30,
            pixel_size: 0.4,
        }
    }
}

impl ImageFrame {
    #[must_use]
    pub fn new(width_px: u32, height_px: u32, pixel_size: f64) -> Self {
        Self {
            width_px,
            height_px,
            pixel_size,
        }
    }

    /// Checks the frame has a positive extent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFrame` for empty frames or a non-positive
    /// pixel size.
    pub fn validate(&self) -> Result<()> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(ConfigError::InvalidFrame(format!(
                "{}x{} px has no area",
                self.width_px, self.height_px
            ))
            .into());
        }
        if !self.pixel_size.is_finite() || self.pixel_size <= 0.0 {
            return Err(ConfigError::InvalidFrame(format!(
                "pixel size {} must be positive",
                self.pixel_size
            ))
            .into());
        }
        Ok(())
    }

    /// Half the ground extent of the frame, metres.
    #[must_use]
    pub fn half_extent(&self) -> Vector2 {
        Vector2::new(
            f64::from(self.width_px) * self.pixel_size / 2.0,
            f64::from(self.height_px) * self.pixel_size / 2.0,
        )
    }
}

/// Geographic query rectangle, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryBounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl QueryBounds {
    /// Rectangle covering `frame` centred on the geographic point `center`.
    ///
    /// The frame is laid out in the projector's metric system and its corners
    /// are converted back, so the ground extent is exact in metres.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidFrame` for an empty frame, or a
    /// `ProjectionError` if a corner cannot be projected.
    pub fn around<P>(center: Point2, frame: &ImageFrame, projector: &P) -> Result<Self>
    where
        P: CoordinateProjector + ?Sized,
    {
        frame.validate()?;
        let projected = projector.forward(center)?;
        let half = frame.half_extent();
        let south_west = projector.inverse(projected - half)?;
        let north_east = projector.inverse(projected + half)?;
        Ok(Self {
            west: south_west.x,
            south: south_west.y,
            east: north_east.x,
            north: north_east.y,
        })
    }

    /// The rectangle as a `geo` shape in `(lon, lat)` order.
    #[must_use]
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.west, y: self.south },
            coord! { x: self.east, y: self.north },
        )
    }
}
