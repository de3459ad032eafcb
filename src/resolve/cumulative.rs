use geo::{Distance, Euclidean};
use itertools::Itertools;
use pk_geo::MeasuredLine;

/// The cumulative arclength table of a line.
///
/// Entry `i` is the planar distance travelled along the line from its first
/// vertex to vertex `i`, so the table starts at zero and never decreases.
/// Duplicate consecutive vertices produce repeated entries.
///
/// The table is derived from the geometry and is not cached; it must be
/// rebuilt whenever the vertices change.
#[derive(Clone, Debug, PartialEq)]
pub struct CumulativeLength(Vec<f64>);

impl CumulativeLength {
    pub fn new(line: &MeasuredLine) -> Self {
        if line.is_empty() {
            return CumulativeLength(vec![]);
        }

        let table = std::iter::once(0.0)
            .chain(
                line.vertices()
                    .iter()
                    .tuple_windows()
                    .scan(0.0, |travelled, (source, target)| {
                        *travelled += Euclidean.distance(source.point(), target.point());
                        Some(*travelled)
                    }),
            )
            .collect();

        CumulativeLength(table)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The total length of the line.
    #[inline]
    pub fn total(&self) -> f64 {
        self.0.last().copied().unwrap_or_default()
    }

    /// The length of segment `index`, between vertex `index` and `index + 1`.
    #[inline]
    pub fn segment_length(&self, index: usize) -> f64 {
        self.0[index + 1] - self.0[index]
    }

    /// Finds the first segment `i` with `cum[i] <= arclength <= cum[i + 1]`.
    ///
    /// When no segment brackets the value, which happens when floating-point
    /// drift pushes an arclength past the end of the table, the last
    /// segment is returned instead.
    ///
    /// The table must describe at least two vertices.
    pub fn bracket(&self, arclength: f64) -> usize {
        self.0
            .iter()
            .tuple_windows()
            .position(|(start, end)| *start <= arclength && arclength <= *end)
            .unwrap_or(self.0.len().saturating_sub(2))
    }
}
