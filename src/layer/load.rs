//! Plain-text layer loading.
//!
//! One feature per line, `<road><TAB><wkt>`, where the geometry is a
//! measured line (`LINESTRING M`, `LINESTRING ZM` or `MULTILINESTRING M`).
//! Blank lines and `#` comments are skipped. Two header directives are
//! understood, anywhere before the first feature:
//!
//! ```text
//! #crs=EPSG:25830
//! #field=ID_ROAD
//! A-1	LINESTRING M (0 0 0, 1000 0 1000)
//! ```
//!
//! The CRS defaults to EPSG:4326 and the road column is stored under
//! the [`DEFAULT_ROAD_FIELD`] attribute unless `#field=` renames it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use pk_geo::{Crs, MeasuredLine};

use crate::config::DEFAULT_ROAD_FIELD;
use crate::layer::{Feature, FeatureId, Layer, LayerError};

const CRS_DIRECTIVE: &str = "#crs=";
const FIELD_DIRECTIVE: &str = "#field=";

impl Layer {
    /// Loads a layer file, naming the layer after the file stem.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Layer, LayerError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let layer = Layer::from_reader(name, BufReader::new(File::open(path)?))?;
        info!("Loaded {layer:?} from {}", path.display());

        Ok(layer)
    }

    /// Reads a layer from any buffered source.
    ///
    /// Feature identifiers are assigned sequentially from 1, in file order.
    pub fn from_reader(name: impl Into<String>, reader: impl BufRead) -> Result<Layer, LayerError> {
        let mut crs = Crs::default();
        let mut field = DEFAULT_ROAD_FIELD.to_string();
        let mut features = vec![];

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }

            if let Some(value) = trimmed.strip_prefix(CRS_DIRECTIVE) {
                let header = || LayerError::Header {
                    line: number,
                    header: trimmed.to_string(),
                };

                if !features.is_empty() {
                    return Err(header());
                }

                crs = value.parse().map_err(|_| header())?;
                continue;
            }

            if let Some(value) = trimmed.strip_prefix(FIELD_DIRECTIVE) {
                let value = value.trim();
                if value.is_empty() || !features.is_empty() {
                    return Err(LayerError::Header {
                        line: number,
                        header: trimmed.to_string(),
                    });
                }

                field = value.to_string();
                continue;
            }

            if trimmed.starts_with('#') {
                continue;
            }

            // The road column may be empty, so only the line end is trimmed.
            let (road, wkt) = line
                .trim_end()
                .split_once('\t')
                .ok_or(LayerError::Malformed { line: number })?;

            let geometry = MeasuredLine::from_wkt(wkt.trim()).map_err(|source| LayerError::Geometry {
                line: number,
                source,
            })?;

            let id = features.len() as FeatureId + 1;
            features.push(Feature::new(id, geometry).with_attribute(field.as_str(), road.trim()));
        }

        debug!("Read {} features in {crs}", features.len());
        Ok(Layer::new(name, crs, vec![field], features))
    }
}
