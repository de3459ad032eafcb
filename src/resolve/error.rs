use crate::resolve::Pk;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("geometry has {0} vertices, at least 2 are required")]
    TooFewVertices(usize),

    #[error("no segment of the line brackets the raw measure {0}")]
    NoBracket(f64),

    #[error("PK {measure} is outside the calibrated range of the road ({start} to {end})")]
    OutOfRange { measure: Pk, start: Pk, end: Pk },

    #[error("coordinates and measures must be finite")]
    NonFinite,

    #[error("invalid PK value '{0}'")]
    InvalidPk(String),
}

impl ResolveError {
    /// If the error stems from unusable line geometry, rather than from the query.
    pub fn is_geometry(&self) -> bool {
        matches!(
            self,
            ResolveError::TooFewVertices(_) | ResolveError::NoBracket(_)
        )
    }
}
