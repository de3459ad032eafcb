//! Calibrated road fixtures shared by tests and benches.

use std::path::PathBuf;

/// A small meter-calibrated road network in web mercator.
pub const METRIC_ROADS: &str = "metric_roads.txt";

/// Three-vertex L-shaped road whose measures share the position units.
pub const L_SHAPED_ROAD: &str = "LINESTRING M (0 0 0, 10 0 10, 10 10 15)";

/// A road with a duplicated vertex, producing a zero-length segment.
pub const DUPLICATE_VERTEX_ROAD: &str = "LINESTRING M (0 0 0, 5 0 5, 5 0 5, 10 0 10)";

/// A road whose calibration dips backwards half way along.
pub const IRREGULAR_ROAD: &str = "LINESTRING M (0 0 0, 10 0 10, 20 0 9, 30 0 30)";

/// Resolves the on-disk path of a fixture file.
pub fn fixture_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(file)
}

/// Builds a straight road of `vertices` points, spaced `spacing` units
/// apart along the x axis, with measures equal to the distance travelled.
pub fn straight_road(vertices: usize, spacing: f64) -> String {
    let coords = (0..vertices)
        .map(|index| {
            let offset = index as f64 * spacing;
            format!("{offset} 0 {offset}")
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("LINESTRING M ({coords})")
}
