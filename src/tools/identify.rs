use std::sync::Arc;

use geo::Point;
use log::debug;
use pk_geo::Crs;

use crate::config::Config;
use crate::layer::Layer;
use crate::resolve::project_nearest;
use crate::scan::Scan;
use crate::session::{ExportTarget, HistoryEntry, Session};
use crate::tools::host::HostTransform;
use crate::tools::{Host, MapTool, MarkerStyle, notice, report, select};
use crate::{Error, Result};

/// Resolves map clicks to the PK of the nearest calibrated road.
pub struct IdentifyTool {
    config: Config,
    session: Option<Session>,
}

impl IdentifyTool {
    pub const TITLE: &'static str = "Identify PK";

    /// Exports land in the map's reference system.
    pub const EXPORT: ExportTarget = ExportTarget {
        name: "PK identification",
        crs: None,
    };

    pub fn new(config: Config) -> Self {
        IdentifyTool {
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

    /// Removes the tool's markers and ends its session.
    pub fn deactivate(&mut self, host: &mut impl Host) {
        if let Some(mut session) = self.session.take() {
            session.clear_markers(host);
        }
    }

    /// Resolves `point`, given in the map's reference system, to the PK of
    /// the nearest road. The projection is marked on the map, remembered in
    /// the history and announced to the user.
    pub fn identify(&mut self, host: &mut impl Host, point: Point) -> Result<HistoryEntry> {
        let session = self.session.as_mut().ok_or(Error::NoLayerBound)?;
        let layer = Arc::clone(session.layer());

        let map_crs = host.map_crs();
        let query = host.transform(point, map_crs, layer.crs())?;

        let (feature, nearest) = layer
            .nearest_feature(&query, self.config.candidates)
            .ok_or(Error::NoCandidate)?;

        let position = project_nearest(&feature.geometry, &nearest, self.config.unit_scale)?;
        let projected = host.transform(position.point(), layer.crs(), map_crs)?;

        debug!(
            "Identified feature {} at {:.6} km, {:.3} from the click",
            feature.id, position.measure_km, position.offset
        );

        session.replace_marker(host, projected, MarkerStyle::Identify);

        let entry = HistoryEntry::new(
            feature.road_name(&self.config.road_field),
            position.measure_km,
            projected,
        );
        session.push_history(entry.clone());

        let wgs84 = host.transform(projected, map_crs, Crs::WGS84).ok();
        host.push_message(notice::resolved(Self::TITLE, &entry, wgs84));

        Ok(entry)
    }

    /// Forgets the resolved PKs and removes the tool's markers.
    pub fn clear_history(&mut self, host: &mut impl Host) {
        if let Some(session) = self.session.as_mut() {
            session.clear(host);
        }
    }

    /// Copies the selected history entries, indexed most recent first,
    /// into the identification layer. Returns the number exported.
    pub fn export(&mut self, host: &mut impl Host, selection: &[usize]) -> Option<usize> {
        let result = match self.session.as_mut() {
            Some(session) => session.export(&HostTransform(&*host), host.map_crs(), selection),
            None => Err(Error::NoLayerBound),
        };

        result.map_err(|error| report(host, Self::TITLE, error)).ok()
    }
}

impl MapTool for IdentifyTool {
    fn on_click<H: Host>(&mut self, host: &mut H, point: Point) {
        if let Err(error) = self.identify(host, point) {
            report(host, Self::TITLE, error);
        }
    }
}
