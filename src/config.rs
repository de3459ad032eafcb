//! Runtime configuration of the PK tools.
//!
//! Values come from the process environment (optionally seeded from a
//! `.env` file by the binary), falling back to the defaults below.
//!
//! ```bash
//! PK_UNIT_SCALE=1000        # 1000 for meter calibrated layers, 1 for kilometers
//! PK_ROAD_FIELD=ID_ROAD     # attribute holding the road identifier
//! PK_CANDIDATES=5           # lines considered per click
//! PK_HISTORY_CAPACITY=30
//! PK_ZOOM_SCALE=25000
//! PK_MAP_CRS=EPSG:4326
//! ```

use std::env;
use std::str::FromStr;

use log::debug;
use pk_geo::Crs;
use thiserror::Error;

use crate::resolve::UnitScale;

pub const UNIT_SCALE_KEY: &str = "PK_UNIT_SCALE";
pub const ROAD_FIELD_KEY: &str = "PK_ROAD_FIELD";
pub const CANDIDATES_KEY: &str = "PK_CANDIDATES";
pub const HISTORY_CAPACITY_KEY: &str = "PK_HISTORY_CAPACITY";
pub const ZOOM_SCALE_KEY: &str = "PK_ZOOM_SCALE";
pub const MAP_CRS_KEY: &str = "PK_MAP_CRS";

pub const DEFAULT_ROAD_FIELD: &str = "ID_ROAD";
pub const DEFAULT_CANDIDATES: usize = 5;
pub const DEFAULT_HISTORY_CAPACITY: usize = 30;
pub const DEFAULT_ZOOM_SCALE: f64 = 25_000.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Divisor turning raw layer measures into kilometers.
    pub unit_scale: UnitScale,
    /// Attribute holding the road identifier.
    pub road_field: String,
    /// How many spatial index candidates are examined per click.
    pub candidates: usize,
    pub history_capacity: usize,
    /// Map scale denominator used when zooming to a located PK.
    pub zoom_scale: f64,
    /// Reference system of the map canvas.
    pub map_crs: Crs,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unit_scale: UnitScale::METERS,
            road_field: DEFAULT_ROAD_FIELD.to_string(),
            candidates: DEFAULT_CANDIDATES,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            zoom_scale: DEFAULT_ZOOM_SCALE,
            map_crs: Crs::WGS84,
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

fn positive<T: PartialOrd + Default>(key: &'static str, value: &str, parsed: T) -> Result<T, ConfigError> {
    if parsed > T::default() {
        Ok(parsed)
    } else {
        Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the raw
    /// value for a key, or `None` when it is unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(value) = lookup(UNIT_SCALE_KEY) {
            let divisor = parse::<f64>(UNIT_SCALE_KEY, &value)?;
            config.unit_scale = UnitScale::new(divisor).ok_or(ConfigError::InvalidValue {
                key: UNIT_SCALE_KEY,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ROAD_FIELD_KEY) {
            let field = value.trim();
            if field.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: ROAD_FIELD_KEY,
                    value,
                });
            }

            config.road_field = field.to_string();
        }

        if let Some(value) = lookup(CANDIDATES_KEY) {
            config.candidates = positive(CANDIDATES_KEY, &value, parse(CANDIDATES_KEY, &value)?)?;
        }

        if let Some(value) = lookup(HISTORY_CAPACITY_KEY) {
            config.history_capacity =
                positive(HISTORY_CAPACITY_KEY, &value, parse(HISTORY_CAPACITY_KEY, &value)?)?;
        }

        if let Some(value) = lookup(ZOOM_SCALE_KEY) {
            config.zoom_scale = positive(ZOOM_SCALE_KEY, &value, parse(ZOOM_SCALE_KEY, &value)?)?;
        }

        if let Some(value) = lookup(MAP_CRS_KEY) {
            config.map_crs = parse(MAP_CRS_KEY, &value)?;
        }

        debug!("Loaded configuration: {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();

        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).expect("Defaults must load");
        assert_eq!(config, Config::default());
        assert_eq!(config.candidates, 5);
        assert_eq!(config.history_capacity, 30);
        assert_eq!(config.unit_scale, UnitScale::METERS);
    }

    #[test]
    fn overrides_from_lookup() {
        let config = Config::from_lookup(lookup(&[
            (UNIT_SCALE_KEY, "1"),
            (ROAD_FIELD_KEY, " VIA "),
            (CANDIDATES_KEY, "8"),
            (HISTORY_CAPACITY_KEY, "10"),
            (ZOOM_SCALE_KEY, "5000"),
            (MAP_CRS_KEY, "EPSG:3857"),
        ]))
        .expect("Overrides must load");

        assert_eq!(config.unit_scale, UnitScale::KILOMETERS);
        assert_eq!(config.road_field, "VIA");
        assert_eq!(config.candidates, 8);
        assert_eq!(config.history_capacity, 10);
        assert_eq!(config.zoom_scale, 5000.0);
        assert_eq!(config.map_crs, Crs::WEB_MERCATOR);
    }

    #[test]
    fn rejects_invalid_values() {
        for (key, value) in [
            (UNIT_SCALE_KEY, "0"),
            (UNIT_SCALE_KEY, "meters"),
            (ROAD_FIELD_KEY, "  "),
            (CANDIDATES_KEY, "0"),
            (HISTORY_CAPACITY_KEY, "-3"),
            (ZOOM_SCALE_KEY, "-1"),
            (MAP_CRS_KEY, "WGS84"),
        ] {
            let result = Config::from_lookup(lookup(&[(key, value)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { key: k, .. }) if k == key),
                "{key}={value} should be rejected"
            );
        }
    }
}
