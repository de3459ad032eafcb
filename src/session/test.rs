use geo::point;
use pk_geo::{Crs, SphericalMercator};

use crate::Error;
use crate::session::*;
use crate::tools::MarkerStyle;
use crate::tools::test::{RecordingHost, metric_roads};

const TARGET: ExportTarget = ExportTarget {
    name: "exported",
    crs: None,
};

fn entry(road: &str, measure_km: f64) -> HistoryEntry {
    HistoryEntry::new(road, measure_km, point! { x: measure_km * 1000.0, y: 0.0 })
}

#[test]
fn history_is_bounded() {
    let mut history = History::new(3);

    for km in 1..=5 {
        history.push(entry("A-1", km as f64));
    }

    assert_eq!(history.len(), 3);
    assert_eq!(
        history.recent_first().map(|entry| entry.measure_km).collect::<Vec<_>>(),
        vec![5.0, 4.0, 3.0]
    );

    assert_eq!(history.recent(0).map(|entry| entry.display_string.as_str()), Some("05+000"));
    assert_eq!(history.recent(2).map(|entry| entry.measure_km), Some(3.0));
    assert!(history.recent(3).is_none());

    history.clear();
    assert!(history.is_empty());
    assert!(history.recent(0).is_none());
}

#[test]
fn zero_capacity_keeps_latest() {
    let mut history = History::new(0);
    history.push(entry("A-1", 1.0));
    history.push(entry("A-1", 2.0));

    assert_eq!(history.capacity(), 1);
    assert_eq!(history.recent(0).map(|entry| entry.measure_km), Some(2.0));
}

#[test]
fn history_entry_labels() {
    let entry = HistoryEntry::new("M-30", 12.3456, point! { x: 1.0, y: 2.0 });

    assert_eq!(entry.display_string, "12+346");
    assert_eq!(entry.label(), "M-30 - 12+346");
    assert_eq!(entry.point(), point! { x: 1.0, y: 2.0 });
}

#[test_log::test]
fn markers_and_rebinding() {
    let mut host = RecordingHost::new(Crs::WEB_MERCATOR);
    let mut session = Session::new(metric_roads(), 30, Some(TARGET));

    session.add_marker(&mut host, point! { x: 0.0, y: 0.0 }, MarkerStyle::Measure);
    session.add_marker(&mut host, point! { x: 5.0, y: 0.0 }, MarkerStyle::Measure);
    assert_eq!(session.markers().len(), 4);
    assert_eq!(host.markers.len(), 4);

    session.replace_marker(&mut host, point! { x: 9.0, y: 0.0 }, MarkerStyle::Locate);
    assert_eq!(host.marker_positions(), vec![point! { x: 9.0, y: 0.0 }]);

    session.push_history(entry("A-1", 1.0));
    session.rebind(&mut host, metric_roads());

    assert!(host.markers.is_empty());
    assert!(session.markers().is_empty());
    assert_eq!(session.history().len(), 1);

    session.replace_marker(&mut host, point! { x: 9.0, y: 0.0 }, MarkerStyle::Locate);
    session.clear(&mut host);

    assert!(host.markers.is_empty());
    assert!(session.history().is_empty());
}

#[test]
fn export_requires_history_and_selection() {
    let mut session = Session::new(metric_roads(), 30, Some(TARGET));

    assert!(matches!(
        session.export(&SphericalMercator, Crs::WEB_MERCATOR, &[0]),
        Err(Error::EmptyHistory)
    ));

    session.push_history(entry("A-1", 1.0));

    assert!(matches!(
        session.export(&SphericalMercator, Crs::WEB_MERCATOR, &[]),
        Err(Error::EmptySelection)
    ));
    assert!(matches!(
        session.export(&SphericalMercator, Crs::WEB_MERCATOR, &[4]),
        Err(Error::EmptySelection)
    ));
    assert!(session.export_layer().is_none());
}

#[test]
fn export_layer_is_created_once() {
    let mut session = Session::new(
        metric_roads(),
        30,
        Some(ExportTarget {
            name: "geographic",
            crs: Some(Crs::WGS84),
        }),
    );

    session.push_history(entry("A-1", 1.0));
    session.push_history(entry("A-2", 6.5));

    assert_eq!(session.export(&SphericalMercator, Crs::WEB_MERCATOR, &[1, 0, 1]).ok(), Some(2));
    assert_eq!(session.export(&SphericalMercator, Crs::WEB_MERCATOR, &[0]).ok(), Some(1));

    let layer = session.export_layer().expect("Export layer was created");
    assert_eq!(layer.name(), "geographic");
    assert_eq!(layer.crs(), Crs::WGS84);
    assert_eq!(layer.fields(), [VIA_FIELD, PK_FIELD]);
    assert_eq!(
        layer.points().iter().map(|point| point.via.as_str()).collect::<Vec<_>>(),
        vec!["A-2", "A-1", "A-2"]
    );
    assert_eq!(layer.points()[0].point(), SphericalMercator::inverse(point! { x: 6500.0, y: 0.0 }));
}

#[test]
fn export_failure_leaves_layer_untouched() {
    let target = ExportTarget {
        name: "geographic",
        crs: Some(Crs::WGS84),
    };

    let mut session = Session::new(metric_roads(), 30, Some(target));
    session.push_history(entry("A-1", 1.0));

    let result = session.export(&SphericalMercator, Crs(25830), &[0]);
    assert!(matches!(result, Err(Error::Geo(_))));
    assert!(session.export_layer().is_none());
}

#[test]
fn export_layer_as_text() {
    let mut layer = ExportLayer::new("out", Crs::WEB_MERCATOR);
    assert!(layer.is_empty());

    layer.push("A-1", "01+300", point! { x: 1000.0, y: 300.0 });

    let mut buffer = vec![];
    layer.write_tsv(&mut buffer).expect("Writing to memory");

    let text = String::from_utf8(buffer).expect("Output is UTF-8");
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some("#crs=EPSG:3857"));
    assert_eq!(lines.next(), Some("VIA\tPK\tWKT"));
    assert!(lines.next().is_some_and(|row| row.starts_with("A-1\t01+300\tPOINT")));
    assert_eq!(lines.next(), None);
}

#[test]
fn sessions_without_target_cannot_export() {
    let mut session = Session::new(metric_roads(), 30, None);
    session.push_history(entry("A-1", 1.0));

    assert!(matches!(
        session.export(&SphericalMercator, Crs::WEB_MERCATOR, &[0]),
        Err(Error::NoExportTarget)
    ));
    assert!(session.export_layer().is_none());
}
