use thiserror::Error;

use crate::footprint::{Crs, FootprintId};

/// Top-level error type for footprint consolidation.
#[derive(Debug, Error)]
pub enum FootprintError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Errors raised while validating footprint geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("footprint {id:?} has geometry kind {kind}, expected polygon or multi-polygon")]
    InvalidGeometryKind { id: FootprintId, kind: &'static str },

    #[error("area computations require a projected coordinate system, got {crs}")]
    UnprojectedCoordinateSystem { crs: Crs },
}

/// Errors in caller-supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("overlap threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    #[error("invalid image frame: {0}")]
    InvalidFrame(String),
}

/// Errors related to coordinate reprojection.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("coordinate ({x}, {y}) is outside the projection domain")]
    OutOfDomain { x: f64, y: f64 },

    #[error("expected coordinates in {expected}, found {found}")]
    CrsMismatch { expected: Crs, found: Crs },
}

/// Errors reported by a footprint provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("footprint provider failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`FootprintError`].
pub type Result<T> = std::result::Result<T, FootprintError>;
