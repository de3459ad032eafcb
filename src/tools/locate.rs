use std::sync::Arc;

use geo::Point;
use log::debug;
use pk_geo::Crs;

use crate::config::Config;
use crate::layer::Layer;
use crate::resolve::{Pk, locate};
use crate::session::{ExportTarget, HistoryEntry, Session};
use crate::tools::host::HostTransform;
use crate::tools::{Host, MarkerStyle, Notice, notice, report, select};
use crate::{Error, Result};

/// Finds the map position of a PK typed in by the user.
pub struct LocateTool {
    config: Config,
    session: Option<Session>,
}

impl LocateTool {
    pub const TITLE: &'static str = "Locate PK";

    /// Exports are always geographic.
    pub const EXPORT: ExportTarget = ExportTarget {
        name: "PK location",
        crs: Some(Crs::WGS84),
    };

    pub fn new(config: Config) -> Self {
        LocateTool {
            config,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Binds the tool to one of `layers`. Returns if the tool is active.
    pub fn activate(&mut self, host: &mut impl Host, layers: &[Arc<Layer>]) -> bool {
        match select::bind(host, &mut self.session, layers, &self.config, Self::TITLE, Some(Self::EXPORT)) {
            Ok(()) => true,
            Err(error) => {
                report(host, Self::TITLE, error);
                false
            }
        }
    }

    pub fn deactivate(&mut self, host: &mut impl Host) {
        if let Some(mut session) = self.session.take() {
            session.clear_markers(host);
        }
    }

    /// Road identifiers offered for completion, sorted.
    pub fn road_names(&self) -> Vec<String> {
        self.session
            .as_ref()
            .map(|session| {
                session
                    .layer()
                    .road_names(&self.config.road_field)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Handles the locate dialog: a road and the kilometer and meter
    /// components of a PK, as typed.
    pub fn submit(&mut self, host: &mut impl Host, road: &str, km: &str, m: &str) -> Option<HistoryEntry> {
        Pk::from_parts(km, m)
            .map_err(Error::from)
            .and_then(|pk| self.locate(host, road, pk))
            .map_err(|error| report(host, Self::TITLE, error))
            .ok()
    }

    /// Resolves `pk` on the first feature of `road`, replacing the marker
    /// and remembering the result.
    pub fn locate(&mut self, host: &mut impl Host, road: &str, pk: Pk) -> Result<HistoryEntry> {
        let session = self.session.as_mut().ok_or(Error::NoLayerBound)?;
        let layer = Arc::clone(session.layer());

        let road = road.trim();
        let feature = layer
            .find_road(&self.config.road_field, road)
            .ok_or_else(|| Error::RoadNotFound(road.to_string()))?;

        let located = locate(&feature.geometry, pk.km(), self.config.unit_scale)?;
        let map_point = host.transform(located, layer.crs(), host.map_crs())?;

        debug!("Located PK {pk} of '{road}' at {map_point:?}");

        session.replace_marker(host, map_point, MarkerStyle::Locate);

        let entry = HistoryEntry::new(road, pk.km(), map_point);
        session.push_history(entry.clone());

        let message = Self::notice(host, &entry);
        host.push_message(message);
        Ok(entry)
    }

    /// Redraws the history entry at `index` (most recent first) without
    /// recording it again.
    pub fn show_from_history(&mut self, host: &mut impl Host, index: usize) -> Result<HistoryEntry> {
        let session = self.session.as_mut().ok_or(Error::NoLayerBound)?;

        let entry = match session.history().recent(index) {
            Some(entry) => entry.clone(),
            None if session.history().is_empty() => return Err(Error::EmptyHistory),
            None => return Err(Error::EmptySelection),
        };

        session.replace_marker(host, entry.point(), MarkerStyle::Locate);
        let message = Self::notice(host, &entry);
        host.push_message(message);

        Ok(entry)
    }

    /// Centers the map on `point` at the configured zoom scale.
    pub fn zoom_to(&self, host: &mut impl Host, point: Point) {
        host.set_center(point, self.config.zoom_scale);
    }

    pub fn clear_marker(&mut self, host: &mut impl Host) {
        if let Some(session) = self.session.as_mut() {
            session.clear_markers(host);
        }
    }

    /// Forgets the resolved PKs and removes the tool's markers.
    pub fn clear_history(&mut self, host: &mut impl Host) {
        if let Some(session) = self.session.as_mut() {
            session.clear(host);
        }
    }

    /// Copies the selected history entries, indexed most recent first,
    /// into a geographic point layer. Returns the number exported.
    pub fn export(&mut self, host: &mut impl Host, selection: &[usize]) -> Option<usize> {
        let result = match self.session.as_mut() {
            Some(session) => session.export(&HostTransform(&*host), host.map_crs(), selection),
            None => Err(Error::NoLayerBound),
        };

        result.map_err(|error| report(host, Self::TITLE, error)).ok()
    }

    fn notice(host: &impl Host, entry: &HistoryEntry) -> Notice {
        let wgs84 = host.transform(entry.point(), host.map_crs(), Crs::WGS84).ok();
        notice::resolved(Self::TITLE, entry, wgs84)
    }
}
