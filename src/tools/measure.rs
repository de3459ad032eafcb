use std::sync::Arc;

use geo::Point;
use log::{debug, info};

use crate::config::Config;
use crate::layer::{FeatureId, Layer};
use crate::resolve::{LinearPosition, format_pk, nearest_point, project_nearest};
use crate::scan::Scan;
use crate::session::Session;
use crate::tools::{Host, MapTool, MarkerStyle, Notice, report, select};
use crate::{Error, Result};

/// Linear distances are reported in kilometers, assuming a metric layer.
const LINEAR_UNITS_PER_KM: f64 = 1000.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum MeasureState {
    #[default]
    Empty,
    FirstCaptured {
        feature: FeatureId,
        road_name: String,
        position: LinearPosition,
    },
}

/// The outcome of a two-point measurement along one road.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasureReport {
    pub road_name: String,
    pub first: LinearPosition,
    pub second: LinearPosition,
    /// Difference between the two PKs, in kilometers.
    pub pk_distance_km: f64,
    /// Difference between the two arclengths, in layer units over 1000.
    pub linear_distance_km: f64,
}

impl MeasureReport {
    pub fn new(road_name: String, first: LinearPosition, second: LinearPosition) -> Self {
        MeasureReport {
            pk_distance_km: (second.measure_km - first.measure_km).abs(),
            linear_distance_km: (second.arclength_from_start - first.arclength_from_start).abs()
                / LINEAR_UNITS_PER_KM,
            road_name,
            first,
            second,
        }
    }

    pub fn notice(&self, title: &'static str) -> Notice {
        let text = format!(
            "{} | PK1: {} · PK2: {} | PK distance: {:.3} km · Linear distance: {:.3} km",
            self.road_name,
            format_pk(self.first.measure_km),
            format_pk(self.second.measure_km),
            self.pk_distance_km,
            self.linear_distance_km
        );

        Notice::info(title, text)
            .with_copy("Copy PK distance", format!("{:.3} km", self.pk_distance_km))
            .with_copy("Copy linear distance", format!("{:.3} km", self.linear_distance_km))
    }
}

/// Measures the distance between two clicks along the road under the first.
///
/// The first click selects the nearest road and captures its PK. The second
/// is projected onto that same road, the report is shown and the tool
/// returns to [`MeasureState::Empty`]. Both markers stay on the map until
/// the next click starts a new measurement.
pub struct MeasureTool {
    config: Config,
    session: Option<Session>,
    state: MeasureState,
}

impl MeasureTool {
    pub const TITLE: &'static str = "Measure PK distance";

    pub fn new(config: Config) -> Self {
        MeasureTool {
            config,
            session: None,
            state: MeasureState::Empty,
        }
    }

    pub fn state(&self) -> &MeasureState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Binds the tool to one of `layers`, starting a new measurement.
    /// Returns if the tool is active.
    pub fn activate(&mut self, host: &mut impl Host, layers: &[Arc<Layer>]) -> bool {
        match select::bind(host, &mut self.session, layers, &self.config, Self::TITLE, None) {
            Ok(()) => {
                self.reset(host);
                true
            }
            Err(error) => {
                report(host, Self::TITLE, error);
                false
            }
        }
    }

    pub fn deactivate(&mut self, host: &mut impl Host) {
        self.reset(host);
        self.session = None;
    }

    /// Drops any captured point and removes the markers.
    pub fn reset(&mut self, host: &mut impl Host) {
        self.state = MeasureState::Empty;
        if let Some(session) = self.session.as_mut() {
            session.clear_markers(host);
        }
    }

    /// Advances the measurement with a click at `point`, in the map's
    /// reference system. Returns the report once the second point is in.
    ///
    /// A failed second click leaves the first point captured.
    pub fn measure(&mut self, host: &mut impl Host, point: Point) -> Result<Option<MeasureReport>> {
        if matches!(self.state, MeasureState::Empty) {
            self.reset(host);
        }

        let session = self.session.as_mut().ok_or(Error::NoLayerBound)?;
        let layer = Arc::clone(session.layer());

        let map_crs = host.map_crs();
        let query = host.transform(point, map_crs, layer.crs())?;

        match &self.state {
            MeasureState::Empty => {
                let (feature, nearest) = layer
                    .nearest_feature(&query, self.config.candidates)
                    .ok_or(Error::NoCandidate)?;

                let position = project_nearest(&feature.geometry, &nearest, self.config.unit_scale)?;
                let projected = host.transform(position.point(), layer.crs(), map_crs)?;
                session.add_marker(host, projected, MarkerStyle::Measure);

                let road_name = feature.road_name(&self.config.road_field).to_string();
                debug!("First point on '{road_name}' at {:.6} km", position.measure_km);

                self.state = MeasureState::FirstCaptured {
                    feature: feature.id,
                    road_name,
                    position,
                };

                Ok(None)
            }
            MeasureState::FirstCaptured {
                feature,
                road_name,
                position: first,
            } => {
                let feature = layer.feature(*feature).ok_or(Error::NoCandidate)?;

                let nearest = nearest_point(&feature.geometry, query)?;
                let second = project_nearest(&feature.geometry, &nearest, self.config.unit_scale)?;
                let projected = host.transform(second.point(), layer.crs(), map_crs)?;
                session.add_marker(host, projected, MarkerStyle::Measure);

                let report = MeasureReport::new(road_name.clone(), *first, second);
                info!(
                    "Measured {:.3} km of PK and {:.3} km along '{}'",
                    report.pk_distance_km, report.linear_distance_km, report.road_name
                );

                self.state = MeasureState::Empty;
                host.push_message(report.notice(Self::TITLE));

                Ok(Some(report))
            }
        }
    }
}

impl MapTool for MeasureTool {
    fn on_click<H: Host>(&mut self, host: &mut H, point: Point) {
        if let Err(error) = self.measure(host, point) {
            report(host, Self::TITLE, error);
        }
    }
}
