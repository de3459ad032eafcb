use std::collections::VecDeque;

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::resolve::format_pk;

/// A resolved PK, as remembered by a tool session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub road_name: String,
    pub measure_km: f64,
    /// Position of the resolved PK in the map's reference system.
    pub map_point: (f64, f64),
    /// The PK formatted as `KK+MMM`.
    pub display_string: String,
}

impl HistoryEntry {
    pub fn new(road_name: impl Into<String>, measure_km: f64, map_point: Point) -> Self {
        HistoryEntry {
            road_name: road_name.into(),
            measure_km,
            map_point: map_point.x_y(),
            display_string: format_pk(measure_km),
        }
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point::from(self.map_point)
    }

    /// The label shown in history listings, `<road> - <PK>`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.road_name, self.display_string)
    }
}

/// A bounded record of resolved PKs.
///
/// Entries are only ever appended. Once the capacity is reached, every
/// push evicts the oldest entry.
#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    /// Creates an empty history. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        History {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }

        self.entries.push_back(entry);
    }

    /// Entries from the most recent to the oldest, the order used for
    /// display and for export selection.
    pub fn recent_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// The entry at `index` in [`recent_first`](History::recent_first) order.
    pub fn recent(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries
            .len()
            .checked_sub(index + 1)
            .and_then(|position| self.entries.get(position))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
