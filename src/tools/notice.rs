use geo::Point;
use log::{debug, info, warn};

use crate::Error;
use crate::resolve::ResolveError;
use crate::session::HistoryEntry;
use crate::tools::{Host, Level, Notice};

/// A Google Street View panorama link for a WGS84 position.
pub fn street_view_url(wgs84: Point) -> String {
    format!(
        "https://www.google.com/maps/@?api=1&map_action=pano&viewpoint={:.6},{:.6}&heading=0&pitch=10&fov=250",
        wgs84.y(),
        wgs84.x()
    )
}

/// `lat,lon` with six decimals, as copied to the clipboard.
pub fn coordinates(wgs84: Point) -> String {
    format!("{:.6},{:.6}", wgs84.y(), wgs84.x())
}

/// How an error is surfaced to the user, or `None` when it is not.
pub fn severity(error: &Error) -> Option<Level> {
    match error {
        Error::SelectionCancelled => None,
        Error::NoCandidate
        | Error::NoValidLayer
        | Error::RoadNotFound(_)
        | Error::EmptyHistory
        | Error::EmptySelection => Some(Level::Info),
        Error::Resolve(ResolveError::OutOfRange { .. }) => Some(Level::Info),
        _ => Some(Level::Warning),
    }
}

/// Converts a failed operation into a notice on the host. Nothing is
/// propagated further.
pub fn report(host: &mut impl Host, title: &'static str, error: Error) {
    let Some(level) = severity(&error) else {
        debug!("{title}: {error}");
        return;
    };

    let notice = match level {
        Level::Info => {
            info!("{title}: {error}");
            Notice::info(title, error.to_string())
        }
        Level::Warning => {
            warn!("{title}: {error}");
            Notice::warning(title, error.to_string())
        }
    };

    host.push_message(notice);
}

/// The notice shown for a resolved PK, with a Street View link when the
/// position could be brought to WGS84.
pub(crate) fn resolved(title: &'static str, entry: &HistoryEntry, wgs84: Option<Point>) -> Notice {
    let text = format!(
        "Road: {} - PK {} ({:.3} km)",
        entry.road_name, entry.display_string, entry.measure_km
    );

    let notice = Notice::info(title, text)
        .with_copy("Copy road", entry.road_name.clone())
        .with_copy("Copy PK", entry.display_string.clone());

    match wgs84 {
        Some(wgs84) => notice
            .with_link(street_view_url(wgs84))
            .with_copy("Copy coordinates", coordinates(wgs84)),
        None => notice,
    }
}
