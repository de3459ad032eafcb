use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::resolve::ResolveError;

/// Formats a kilometer value as a PK string, `KK+MMM`.
///
/// Kilometers are zero-padded to at least two digits and meters are always
/// three digits. Meters are rounded to the nearest integer, and a rounding
/// which lands on exactly 1000 carries into the kilometer component.
/// Negative values keep their sign in front of the kilometer component.
///
/// ```rust
/// use pk_tools::resolve::format_pk;
/// assert_eq!(format_pk(0.0), "00+000");
/// assert_eq!(format_pk(12.3456), "12+346");
/// assert_eq!(format_pk(0.9995), "01+000");
/// ```
pub fn format_pk(measure_km: f64) -> String {
    let sign = if measure_km < 0.0 { "-" } else { "" };
    let value = measure_km.abs();

    let mut km = value.trunc() as u64;
    let mut m = ((value - value.trunc()) * 1000.0).round() as u64;

    if m == 1000 {
        km += 1;
        m = 0;
    }

    format!("{sign}{km:02}+{m:03}")
}

/// A kilometer-point: a position along a road, in kilometers.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Pk(pub f64);

impl Pk {
    pub const fn km(&self) -> f64 {
        self.0
    }

    /// Builds a PK from the kilometer and meter components a user types in.
    ///
    /// The kilometer component may be fractional, the meter component must
    /// be an integer. `("12", "345")` is PK `12+345`.
    pub fn from_parts(km: &str, m: &str) -> Result<Pk, ResolveError> {
        let invalid = || ResolveError::InvalidPk(format!("{}+{}", km.trim(), m.trim()));

        let km = km.trim().parse::<f64>().map_err(|_| invalid())?;
        let m = m.trim().parse::<i64>().map_err(|_| invalid())?;

        let total = km + m as f64 / 1000.0;
        if !total.is_finite() {
            return Err(invalid());
        }

        Ok(Pk(total))
    }
}

impl Display for Pk {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_pk(self.0))
    }
}

impl FromStr for Pk {
    type Err = ResolveError;

    /// Accepts either `KK+MMM` notation or a decimal kilometer value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('+') {
            Some((km, m)) => Pk::from_parts(km, m),
            None => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .map(Pk)
                .ok_or_else(|| ResolveError::InvalidPk(s.trim().to_string())),
        }
    }
}

/// The divisor that turns a layer's raw measure values into kilometers.
///
/// Layers calibrated in meters use [`UnitScale::METERS`] (1000),
/// those calibrated in kilometers use [`UnitScale::KILOMETERS`] (1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitScale(f64);

impl UnitScale {
    pub const METERS: UnitScale = UnitScale(1000.0);
    pub const KILOMETERS: UnitScale = UnitScale(1.0);

    /// Creates a scale from its divisor, which must be positive and finite.
    pub fn new(divisor: f64) -> Option<UnitScale> {
        (divisor.is_finite() && divisor > 0.0).then_some(UnitScale(divisor))
    }

    /// Raw layer measure to kilometers.
    #[inline]
    pub fn to_km(&self, raw: f64) -> f64 {
        raw / self.0
    }

    /// Kilometers to the layer's raw measure unit.
    #[inline]
    pub fn from_km(&self, km: f64) -> f64 {
        km * self.0
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        UnitScale::METERS
    }
}
