use std::collections::BTreeMap;

use geo::Point;
use pk_geo::MeasuredLine;
use rstar::{AABB, Envelope, PointDistance, RTreeObject};

/// Displayed in place of a missing or empty road identifier.
pub const UNKNOWN_ROAD: &str = "Unknown road";

pub type FeatureId = u64;

/// A calibrated line and its attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    pub id: FeatureId,
    pub attributes: BTreeMap<String, String>,
    pub geometry: MeasuredLine,
}

impl Feature {
    pub fn new(id: FeatureId, geometry: MeasuredLine) -> Self {
        Feature {
            id,
            attributes: BTreeMap::new(),
            geometry,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The road identifier held in `road_field`, or [`UNKNOWN_ROAD`].
    pub fn road_name(&self, road_field: &str) -> &str {
        self.attribute(road_field)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_ROAD)
    }
}

/// The spatial index entry of a [`Feature`]: its identifier and envelope.
///
/// ### Note
///
/// Distances measured against an entry are distances to its bounding box,
/// not to the line itself. They bound the true distance from below, which
/// is what orders the nearest-neighbour iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedFeature {
    pub id: FeatureId,
    pub envelope: AABB<Point>,
}

impl IndexedFeature {
    pub fn new(feature: &Feature) -> Option<Self> {
        feature.geometry.envelope().map(|envelope| IndexedFeature {
            id: feature.id,
            envelope,
        })
    }
}

impl RTreeObject for IndexedFeature {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl PointDistance for IndexedFeature {
    fn distance_2(&self, point: &Point) -> f64 {
        self.envelope.distance_2(point)
    }
}
