//! Per-tool session state.
//!
//! A [`Session`] is created when a tool is bound to a layer and dropped
//! when the tool is deactivated. It owns everything a tool draws or
//! remembers: the markers on the map, the history of resolved PKs and
//! the export layer those PKs may be copied into.

#[doc(hidden)]
pub mod export;
#[doc(hidden)]
pub mod history;
#[doc(hidden)]
#[cfg(test)]
mod test;

#[doc(inline)]
pub use export::{ExportLayer, ExportedPoint, PK_FIELD, VIA_FIELD};
#[doc(inline)]
pub use history::{History, HistoryEntry};

use std::collections::BTreeSet;
use std::sync::Arc;

use geo::Point;
use log::{debug, info};
use pk_geo::{Crs, Reproject};
use smallvec::SmallVec;

use crate::layer::Layer;
use crate::tools::{Host, Marker, MarkerId, MarkerShape, MarkerStyle};
use crate::{Error, Result};

/// Where, and in which reference system, a session exports its history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportTarget {
    pub name: &'static str,
    /// Reference system of the exported points, the map's when `None`.
    pub crs: Option<Crs>,
}

pub struct Session {
    layer: Arc<Layer>,
    markers: SmallVec<[MarkerId; 4]>,
    history: History,
    target: Option<ExportTarget>,
    export: Option<ExportLayer>,
}

impl Session {
    pub fn new(layer: Arc<Layer>, history_capacity: usize, target: Option<ExportTarget>) -> Self {
        Session {
            layer,
            markers: SmallVec::new(),
            history: History::new(history_capacity),
            target,
            export: None,
        }
    }

    pub fn layer(&self) -> &Arc<Layer> {
        &self.layer
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn markers(&self) -> &[MarkerId] {
        &self.markers
    }

    /// The export layer, once the first export has created it.
    pub fn export_layer(&self) -> Option<&ExportLayer> {
        self.export.as_ref()
    }

    /// Binds the session to another layer. Markers drawn against the
    /// previous layer are removed, the history is kept.
    pub fn rebind(&mut self, host: &mut impl Host, layer: Arc<Layer>) {
        info!("Rebinding session from '{}' to '{}'", self.layer.name(), layer.name());

        self.clear_markers(host);
        self.layer = layer;
    }

    /// Removes every marker and forgets the history. The export layer
    /// and the points already copied into it are kept.
    pub fn clear(&mut self, host: &mut impl Host) {
        self.clear_markers(host);
        self.history.clear();
    }

    pub fn clear_markers(&mut self, host: &mut impl Host) {
        for id in self.markers.drain(..) {
            host.remove_marker(id);
        }
    }

    /// Draws a ring and dot marker at `position`, keeping earlier markers.
    pub fn add_marker(&mut self, host: &mut impl Host, position: Point, style: MarkerStyle) {
        for shape in [MarkerShape::Ring, MarkerShape::Dot] {
            let id = host.add_marker(Marker {
                position,
                style,
                shape,
            });

            self.markers.push(id);
        }
    }

    /// Draws a ring and dot marker at `position`, removing earlier markers.
    pub fn replace_marker(&mut self, host: &mut impl Host, position: Point, style: MarkerStyle) {
        self.clear_markers(host);
        self.add_marker(host, position, style);
    }

    pub fn push_history(&mut self, entry: HistoryEntry) {
        debug!("Remembering {}", entry.label());
        self.history.push(entry);
    }

    /// Copies the selected history entries into the export layer, creating
    /// it on first use. `selection` holds indices into
    /// [`History::recent_first`]; unknown and repeated indices are ignored.
    ///
    /// Returns the number of exported points.
    pub fn export(
        &mut self,
        transform: &impl Reproject,
        map_crs: Crs,
        selection: &[usize],
    ) -> Result<usize> {
        let target = self.target.ok_or(Error::NoExportTarget)?;
        if self.history.is_empty() {
            return Err(Error::EmptyHistory);
        }

        let selected = selection
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter_map(|index| self.history.recent(index))
            .collect::<Vec<_>>();

        if selected.is_empty() {
            return Err(Error::EmptySelection);
        }

        // A reused layer keeps the reference system it was created in.
        let crs = self
            .export
            .as_ref()
            .map(ExportLayer::crs)
            .unwrap_or(target.crs.unwrap_or(map_crs));
        let points = selected
            .into_iter()
            .map(|entry| -> Result<(String, String, Point)> {
                let point = transform.transform(entry.point(), map_crs, crs)?;
                Ok((entry.road_name.clone(), entry.display_string.clone(), point))
            })
            .collect::<Result<Vec<_>>>()?;

        let layer = self.export.get_or_insert_with(|| ExportLayer::new(target.name, crs));

        let count = points.len();
        for (via, pk, point) in points {
            layer.push(via, pk, point);
        }

        info!("Exported {count} points to '{}'", layer.name());
        Ok(count)
    }
}
