use std::io;

use pk_geo::GeoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayerError {
    #[error("could not read layer: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected '<road><TAB><wkt>'")]
    Malformed { line: usize },

    #[error("line {line}: {source}")]
    Geometry {
        line: usize,
        #[source]
        source: GeoError,
    },

    #[error("line {line}: invalid header '{header}'")]
    Header { line: usize, header: String },
}
