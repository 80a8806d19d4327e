use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;

use super::CoordinateProjector;
use crate::error::ProjectionError;
use crate::footprint::Crs;
use crate::math::Point2;

/// GRS 80 semi-major axis in metres.
const GRS80_A: f64 = 6_378_137.0;
/// GRS 80 flattening.
const GRS80_F: f64 = 1.0 / 298.257_222_101;

const MAX_LATITUDE_ITERATIONS: usize = 32;
const LATITUDE_EPS: f64 = 1e-12;

/// Defining constants of a two-standard-parallel Lambert conformal conic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertParams {
    /// First standard parallel, degrees.
    pub lat_1: f64,
    /// Second standard parallel, degrees.
    pub lat_2: f64,
    /// Latitude of the false origin, degrees.
    pub lat_0: f64,
    /// Central meridian, degrees.
    pub lon_0: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl LambertParams {
    /// Lambert-93 (EPSG:2154).
    pub const LAMBERT_93: LambertParams = LambertParams {
        lat_1: 49.0,
        lat_2: 44.0,
        lat_0: 46.5,
        lon_0: 3.0,
        false_easting: 700_000.0,
        false_northing: 6_600_000.0,
    };
}

/// Lambert conformal conic projection on the GRS 80 ellipsoid.
///
/// Geographic points are `(longitude, latitude)` in degrees; projected points
/// are `(easting, northing)` in metres.
#[derive(Debug, Clone, Copy)]
pub struct LambertConformalConic {
    target: Crs,
    e: f64,
    n: f64,
    /// Semi-major axis times the cone constant `F`.
    a_f: f64,
    rho_0: f64,
    lon_0: f64,
    false_easting: f64,
    false_northing: f64,
}

impl LambertConformalConic {
    /// Builds the projection for `params`, tagging output with `target`.
    #[must_use]
    pub fn new(target: Crs, params: LambertParams) -> Self {
        let e = (GRS80_F * (2.0 - GRS80_F)).sqrt();
        let (phi_1, phi_2) = (params.lat_1.to_radians(), params.lat_2.to_radians());
        let (m_1, m_2) = (m(phi_1, e), m(phi_2, e));
        let (t_1, t_2) = (t(phi_1, e), t(phi_2, e));

        let n = (m_1.ln() - m_2.ln()) / (t_1.ln() - t_2.ln());
        let a_f = GRS80_A * m_1 / (n * t_1.powf(n));
        let rho_0 = a_f * t(params.lat_0.to_radians(), e).powf(n);
        Self {
            target,
            e,
            n,
            a_f,
            rho_0,
            lon_0: params.lon_0.to_radians(),
            false_easting: params.false_easting,
            false_northing: params.false_northing,
        }
    }

    /// RGF93 / Lambert-93.
    #[must_use]
    pub fn lambert_93() -> Self {
        Self::new(Crs::LAMBERT_93, LambertParams::LAMBERT_93)
    }
}

impl CoordinateProjector for LambertConformalConic {
    fn source(&self) -> Crs {
        Crs::WGS84
    }

    fn target(&self) -> Crs {
        self.target
    }

    fn forward(&self, point: Point2) -> Result<Point2, ProjectionError> {
        let (lon, lat) = (point.x, point.y);
        if !lon.is_finite() || !lat.is_finite() || lon.abs() > 180.0 || lat.abs() >= 90.0 {
            return Err(ProjectionError::OutOfDomain { x: lon, y: lat });
        }
        let rho = self.a_f * t(lat.to_radians(), self.e).powf(self.n);
        let theta = self.n * (lon.to_radians() - self.lon_0);
        Ok(Point2::new(
            self.false_easting + rho * theta.sin(),
            self.false_northing + self.rho_0 - rho * theta.cos(),
        ))
    }

    fn inverse(&self, point: Point2) -> Result<Point2, ProjectionError> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ProjectionError::OutOfDomain {
                x: point.x,
                y: point.y,
            });
        }
        let sign = self.n.signum();
        let dx = point.x - self.false_easting;
        let dy = self.rho_0 - (point.y - self.false_northing);
        let rho = sign * dx.hypot(dy);
        let theta = (sign * dx).atan2(sign * dy);
        let t_p = (rho / self.a_f).powf(1.0 / self.n);

        let half_e = self.e / 2.0;
        let mut phi = FRAC_PI_2 - 2.0 * t_p.atan();
        for _ in 0..MAX_LATITUDE_ITERATIONS {
            let es = self.e * phi.sin();
            let next = FRAC_PI_2 - 2.0 * (t_p * ((1.0 - es) / (1.0 + es)).powf(half_e)).atan();
            let done = (next - phi).abs() < LATITUDE_EPS;
            phi = next;
            if done {
                break;
            }
        }

        let lon = (theta / self.n + self.lon_0).to_degrees();
        let lat = phi.to_degrees();
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjectionError::OutOfDomain {
                x: point.x,
                y: point.y,
            });
        }
        Ok(Point2::new(lon, lat))
    }
}

fn m(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    phi.cos() / (1.0 - es * es).sqrt()
}

fn t(phi: f64, e: f64) -> f64 {
    let es = e * phi.sin();
    (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn origin_maps_to_false_origin() {
        let proj = LambertConformalConic::lambert_93();
        let p = proj.forward(Point2::new(3.0, 46.5)).unwrap();
        assert_abs_diff_eq!(p.x, 700_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p.y, 6_600_000.0, epsilon = 1e-6);
    }

    #[test]
    fn one_degree_north_is_about_111_km() {
        let proj = LambertConformalConic::lambert_93();
        let p = proj.forward(Point2::new(3.0, 47.5)).unwrap();
        assert_abs_diff_eq!(p.x, 700_000.0, epsilon = 1e-6);
        let dy = p.y - 6_600_000.0;
        assert!((110_500.0..111_700.0).contains(&dy), "dy = {dy}");
    }

    #[test]
    fn east_of_meridian_has_larger_easting() {
        let proj = LambertConformalConic::lambert_93();
        let west = proj.forward(Point2::new(2.0, 46.5)).unwrap();
        let east = proj.forward(Point2::new(4.0, 46.5)).unwrap();
        assert!(west.x < 700_000.0 && east.x > 700_000.0);
        assert_abs_diff_eq!(700_000.0 - west.x, east.x - 700_000.0, epsilon = 1e-6);
    }

    #[test]
    fn round_trip_over_france() {
        let proj = LambertConformalConic::lambert_93();
        for &(lon, lat) in &[
            (2.3504, 48.8568),
            (4.8352, 45.7587),
            (-2.9453, 48.2837),
            (6.1866, 45.8604),
            (-1.15, 46.18),
        ] {
            let projected = proj.forward(Point2::new(lon, lat)).unwrap();
            let back = proj.inverse(projected).unwrap();
            assert_abs_diff_eq!(back.x, lon, epsilon = 1e-9);
            assert_abs_diff_eq!(back.y, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn rejects_out_of_domain_input() {
        let proj = LambertConformalConic::lambert_93();
        assert!(proj.forward(Point2::new(3.0, 90.0)).is_err());
        assert!(proj.forward(Point2::new(f64::NAN, 45.0)).is_err());
        assert!(proj.forward(Point2::new(200.0, 45.0)).is_err());
        assert!(proj.inverse(Point2::new(f64::INFINITY, 0.0)).is_err());
    }
}
