use crate::resolve::*;

use approx::assert_relative_eq;
use fixtures::{DUPLICATE_VERTEX_ROAD, IRREGULAR_ROAD, L_SHAPED_ROAD, straight_road};
use geo::{Point, point};
use pk_geo::MeasuredLine;

fn line(wkt: &str) -> MeasuredLine {
    MeasuredLine::from_wkt(wkt).expect("Fixture must parse")
}

#[test]
fn pk_formatting() {
    assert_eq!(format_pk(0.0), "00+000");
    assert_eq!(format_pk(12.3456), "12+346");
    assert_eq!(format_pk(0.9995), "01+000");
    assert_eq!(format_pk(5.0), "05+000");
    assert_eq!(format_pk(123.4), "123+400");
    assert_eq!(format_pk(-0.25), "-00+250");
    assert_eq!(Pk(8.2).to_string(), "08+200");
}

#[test]
fn pk_parsing() {
    assert_eq!("12+345".parse::<Pk>(), Ok(Pk(12.345)));
    assert_eq!(" 3.5 ".parse::<Pk>(), Ok(Pk(3.5)));
    assert_eq!(Pk::from_parts("0", "000"), Ok(Pk(0.0)));
    assert_eq!(Pk::from_parts("1.5", "250"), Ok(Pk(1.75)));

    assert!(matches!(Pk::from_parts("1", "2.5"), Err(ResolveError::InvalidPk(_))));
    assert!(matches!(Pk::from_parts("abc", "0"), Err(ResolveError::InvalidPk(_))));
    assert!(matches!("12+".parse::<Pk>(), Err(ResolveError::InvalidPk(_))));
    assert!(matches!("inf".parse::<Pk>(), Err(ResolveError::InvalidPk(_))));
}

#[test]
fn unit_scale_rejects_invalid_divisors() {
    assert!(UnitScale::new(0.0).is_none());
    assert!(UnitScale::new(-1.0).is_none());
    assert!(UnitScale::new(f64::NAN).is_none());
    assert_eq!(UnitScale::new(1000.0), Some(UnitScale::METERS));
}

#[test]
fn cumulative_table() {
    let table = CumulativeLength::new(&line(L_SHAPED_ROAD));

    assert_eq!(table.as_slice(), &[0.0, 10.0, 20.0]);
    assert_eq!(table.total(), 20.0);
    assert_eq!(table.segment_length(1), 10.0);

    assert_eq!(table.bracket(0.0), 0);
    assert_eq!(table.bracket(10.0), 0);
    assert_eq!(table.bracket(10.5), 1);
    // Past the end falls back to the last segment
    assert_eq!(table.bracket(20.0 + 1e-9), 1);
}

#[test]
fn cumulative_table_repeats_for_duplicate_vertices() {
    let table = CumulativeLength::new(&line(DUPLICATE_VERTEX_ROAD));
    assert_eq!(table.as_slice(), &[0.0, 5.0, 5.0, 10.0]);
}

#[test]
fn nearest_point_lands_inside_segment() {
    let road = line(L_SHAPED_ROAD);
    let nearest = nearest_point(&road, point! { x: 4.0, y: -3.0 }).expect("Projection failed");

    assert_eq!(nearest.point, point! { x: 4.0, y: 0.0 });
    assert_eq!(nearest.segment, 0);
    assert_eq!(nearest.distance, 3.0);
    assert_eq!(nearest.arclength, 4.0);
}

#[test]
fn nearest_point_prefers_earlier_segment_on_ties() {
    let road = line(L_SHAPED_ROAD);
    let nearest = nearest_point(&road, point! { x: 10.0, y: 0.0 }).expect("Projection failed");

    assert_eq!(nearest.segment, 0);
    assert_eq!(nearest.arclength, 10.0);
}

#[test]
fn end_to_end_scenario() {
    let road = line(L_SHAPED_ROAD);

    let position =
        project(&road, point! { x: 10.0, y: 0.0 }, UnitScale::KILOMETERS).expect("Projection failed");
    assert_eq!(position.measure_km, 10.0);
    assert_eq!(position.arclength_from_start, 10.0);
    assert_eq!(position.offset, 0.0);

    let located = locate(&road, 12.5, UnitScale::KILOMETERS).expect("Location failed");
    assert_eq!(located, point! { x: 10.0, y: 5.0 });
}

#[test]
fn projection_of_off_line_points() {
    let road = line(L_SHAPED_ROAD);

    let beside = project(&road, point! { x: 13.0, y: 6.0 }, UnitScale::KILOMETERS)
        .expect("Projection failed");
    assert_eq!(beside.point(), point! { x: 10.0, y: 6.0 });
    assert_eq!(beside.measure_km, 13.0);
    assert_eq!(beside.offset, 3.0);

    let before_start = project(&road, point! { x: -5.0, y: -1.0 }, UnitScale::KILOMETERS)
        .expect("Projection failed");
    assert_eq!(before_start.measure_km, 0.0);
    assert_eq!(before_start.projected_point, (0.0, 0.0));

    let past_end = project(&road, point! { x: 10.0, y: 40.0 }, UnitScale::KILOMETERS)
        .expect("Projection failed");
    assert_eq!(past_end.measure_km, 15.0);
    assert_eq!(past_end.arclength_from_start, 20.0);
}

#[test]
fn meter_calibrated_measures_become_kilometers() {
    let road = line("LINESTRING M (0 0 0, 1000 0 1000, 1000 1000 2000)");

    let position = project(&road, point! { x: 1010.0, y: 500.0 }, UnitScale::METERS)
        .expect("Projection failed");
    assert_relative_eq!(position.measure_km, 1.5);

    let located = locate(&road, 1.5, UnitScale::METERS).expect("Location failed");
    assert_eq!(located, point! { x: 1000.0, y: 500.0 });
}

#[test]
fn projection_is_idempotent() {
    let road = line(IRREGULAR_ROAD);
    let query = point! { x: 17.3, y: 2.1 };

    let first = project(&road, query, UnitScale::KILOMETERS);
    let second = project(&road, query, UnitScale::KILOMETERS);

    assert!(first.is_ok());
    assert_eq!(first, second);
}

#[test]
fn locate_then_project_round_trips() {
    let road = line("LINESTRING M (0 0 0, 300 400 480, 300 900 1000, 1200 900 2150)");
    let measures = road.measures().collect::<Vec<_>>();

    for pair in measures.windows(2) {
        for step in 0..=10 {
            let t = step as f64 / 10.0;
            let measure_km = UnitScale::METERS.to_km(pair[0] + t * (pair[1] - pair[0]));

            let located = locate(&road, measure_km, UnitScale::METERS).expect("Location failed");
            let resolved = project(&road, located, UnitScale::METERS).expect("Projection failed");

            assert_relative_eq!(
                resolved.measure_km,
                measure_km,
                epsilon = 1e-12,
                max_relative = 1e-6
            );
        }
    }
}

#[test]
fn locate_boundaries_are_exact() {
    let road = line("LINESTRING M (0.1 0.7 100, 0.3 0.9 300, 1.7 2.3 900)");

    assert_eq!(locate(&road, 0.1, UnitScale::METERS), Ok(point! { x: 0.1, y: 0.7 }));
    assert_eq!(locate(&road, 0.9, UnitScale::METERS), Ok(point! { x: 1.7, y: 2.3 }));

    assert!(matches!(
        locate(&road, 0.099, UnitScale::METERS),
        Err(ResolveError::OutOfRange { .. })
    ));
    assert!(matches!(
        locate(&road, 0.901, UnitScale::METERS),
        Err(ResolveError::OutOfRange { .. })
    ));
}

#[test]
fn locate_one_unit_outside_range() {
    let road = line(L_SHAPED_ROAD);

    let below = locate(&road, -1.0, UnitScale::KILOMETERS);
    assert_eq!(
        below,
        Err(ResolveError::OutOfRange {
            measure: Pk(-1.0),
            start: Pk(0.0),
            end: Pk(15.0),
        })
    );

    assert!(matches!(
        locate(&road, 16.0, UnitScale::KILOMETERS),
        Err(ResolveError::OutOfRange { .. })
    ));
}

#[test]
fn zero_length_segment_interpolates_from_its_start() {
    let road = line("LINESTRING M (0 0 0, 0 0 4, 10 0 10)");

    let position =
        project(&road, point! { x: 0.0, y: 0.0 }, UnitScale::KILOMETERS).expect("Projection failed");
    assert_eq!(position.measure_km, 0.0);

    let duplicate = line(DUPLICATE_VERTEX_ROAD);
    let position = project(&duplicate, point! { x: 5.0, y: 1.0 }, UnitScale::KILOMETERS)
        .expect("Projection failed");
    assert_eq!(position.measure_km, 5.0);
}

#[test]
fn equal_bracketing_measures_resolve_to_first_vertex() {
    let flat = line("LINESTRING M (0 0 5, 10 0 5)");
    assert_eq!(locate(&flat, 5.0, UnitScale::KILOMETERS), Ok(point! { x: 0.0, y: 0.0 }));

    let duplicate = line(DUPLICATE_VERTEX_ROAD);
    assert_eq!(locate(&duplicate, 5.0, UnitScale::KILOMETERS), Ok(point! { x: 5.0, y: 0.0 }));
}

#[test]
fn irregular_calibration_uses_first_bracket() {
    let road = line(IRREGULAR_ROAD);

    let early = locate(&road, 9.5, UnitScale::KILOMETERS).expect("Location failed");
    assert_eq!(early, point! { x: 9.5, y: 0.0 });

    let late = locate(&road, 20.0, UnitScale::KILOMETERS).expect("Location failed");
    assert_relative_eq!(late.x(), 20.0 + 10.0 * 11.0 / 21.0, max_relative = 1e-12);

    // Projection over the dip interpolates without failing
    let dip = project(&road, point! { x: 15.0, y: 0.0 }, UnitScale::KILOMETERS)
        .expect("Projection failed");
    assert_eq!(dip.measure_km, 9.5);
}

#[test]
fn unbracketed_measure_is_a_geometry_error() {
    let road = MeasuredLine::from(vec![(0.0, 0.0, 0.0), (5.0, 0.0, f64::NAN), (10.0, 0.0, 10.0)]);

    let result = locate(&road, 5.0, UnitScale::KILOMETERS);
    assert_eq!(result, Err(ResolveError::NoBracket(5.0)));
    assert!(result.unwrap_err().is_geometry());
}

#[test]
fn non_finite_measures_do_not_project() {
    let road = MeasuredLine::from(vec![(0.0, 0.0, f64::NAN), (10.0, 0.0, 10.0)]);

    let result = project(&road, point! { x: 2.0, y: 0.0 }, UnitScale::KILOMETERS);
    assert_eq!(result, Err(ResolveError::NonFinite));
}

#[test]
fn meter_road_ends_locate_exactly() {
    let road = line("LINESTRING M (0 0 1001, 1006 0 2007)");
    let scale = UnitScale::METERS;

    // 1.001 km and 2.007 km do not survive the round trip back to meters.
    let start = locate(&road, scale.to_km(1001.0), scale);
    assert_eq!(start, Ok(point! { x: 0.0, y: 0.0 }));

    let end = locate(&road, scale.to_km(2007.0), scale);
    assert_eq!(end, Ok(point! { x: 1006.0, y: 0.0 }));

    let typed = Pk::from_parts("2", "007").expect("Valid PK");
    assert_eq!(locate(&road, typed.km(), scale), Ok(point! { x: 1006.0, y: 0.0 }));

    let beyond = locate(&road, 2.008, scale);
    assert!(matches!(beyond, Err(ResolveError::OutOfRange { .. })));
}

#[test]
fn too_few_vertices() {
    let single = MeasuredLine::from(vec![(1.0, 1.0, 0.0)]);
    let empty = MeasuredLine::default();

    for road in [&single, &empty] {
        let projected = project(road, point! { x: 0.0, y: 0.0 }, UnitScale::METERS);
        assert_eq!(projected, Err(ResolveError::TooFewVertices(road.len())));

        let located = locate(road, 0.0, UnitScale::METERS);
        assert!(located.is_err_and(|err| err.is_geometry()));
    }
}

#[test]
fn non_finite_queries_are_rejected() {
    let road = line(L_SHAPED_ROAD);

    assert_eq!(
        project(&road, Point::new(f64::NAN, 0.0), UnitScale::KILOMETERS),
        Err(ResolveError::NonFinite)
    );
    assert_eq!(
        locate(&road, f64::INFINITY, UnitScale::KILOMETERS),
        Err(ResolveError::NonFinite)
    );
}

#[test_log::test]
fn long_road_resolution() {
    let road = line(&straight_road(2_000, 25.0));

    let position = project(&road, point! { x: 31_337.0, y: 12.0 }, UnitScale::METERS)
        .expect("Projection failed");
    assert_relative_eq!(position.measure_km, 31.337, max_relative = 1e-12);
    assert_eq!(format_pk(position.measure_km), "31+337");

    let located = locate(&road, 49.975, UnitScale::METERS).expect("Location failed");
    assert_eq!(located, point! { x: 49_975.0, y: 0.0 });
}
