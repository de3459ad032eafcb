use std::sync::Arc;

use log::{debug, info};

use crate::config::Config;
use crate::layer::Layer;
use crate::session::{ExportTarget, Session};
use crate::tools::Host;
use crate::{Error, Result};

/// Picks the layer a tool works against, among those calibrated for
/// `road_field`. A single candidate is used directly, several are offered
/// to the user through [`Host::choose_layer`].
pub fn select_layer(host: &mut impl Host, layers: &[Arc<Layer>], road_field: &str) -> Result<Arc<Layer>> {
    let valid = layers
        .iter()
        .filter(|layer| layer.is_calibrated(road_field))
        .collect::<Vec<_>>();

    debug!("{} of {} layers are calibrated for {road_field}", valid.len(), layers.len());

    match valid.as_slice() {
        [] => Err(Error::NoValidLayer),
        [layer] => Ok(Arc::clone(layer)),
        many => {
            let names = many.iter().map(|layer| layer.name()).collect::<Vec<_>>();

            host.choose_layer(&names)
                .and_then(|index| many.get(index).copied())
                .cloned()
                .ok_or(Error::SelectionCancelled)
        }
    }
}

/// Selects a layer and binds `session` to it, creating the session on
/// first activation.
pub(crate) fn bind(
    host: &mut impl Host,
    session: &mut Option<Session>,
    layers: &[Arc<Layer>],
    config: &Config,
    tool: &'static str,
    target: Option<ExportTarget>,
) -> Result<()> {
    let layer = select_layer(host, layers, &config.road_field)?;
    info!("Binding {tool} to {layer:?}");

    match session {
        Some(session) => session.rebind(host, layer),
        None => *session = Some(Session::new(layer, config.history_capacity, target)),
    }

    Ok(())
}
