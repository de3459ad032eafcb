use pk_geo::GeoError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::impl_err;
use crate::layer::LayerError;
use crate::resolve::ResolveError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Geo(GeoError),

    #[error(transparent)]
    Resolve(ResolveError),

    #[error(transparent)]
    Layer(LayerError),

    #[error(transparent)]
    Config(ConfigError),

    #[error("no calibrated line layer was found")]
    NoValidLayer,

    #[error("no calibrated layer is assigned to the tool")]
    NoLayerBound,

    #[error("no line was found near the clicked point")]
    NoCandidate,

    #[error("selection was cancelled")]
    SelectionCancelled,

    #[error("road '{0}' was not found")]
    RoadNotFound(String),

    #[error("there are no points in the history")]
    EmptyHistory,

    #[error("no points were selected")]
    EmptySelection,

    #[error("the tool has no export layer")]
    NoExportTarget,
}

impl_err!(GeoError, Geo);
impl_err!(ResolveError, Resolve);
impl_err!(LayerError, Layer);
impl_err!(ConfigError, Config);
