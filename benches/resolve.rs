use criterion::criterion_main;
use fixtures::{METRIC_ROADS, fixture_path, straight_road};
use geo::point;
use pk_geo::MeasuredLine;
use pk_tools::Layer;
use pk_tools::resolve::{UnitScale, format_pk, locate, project};
use pk_tools::scan::Scan;

struct ResolveScenario {
    name: &'static str,
    vertices: usize,
    spacing: f64,
}

const RESOLVE_CASES: [ResolveScenario; 2] = [
    ResolveScenario {
        name: "SHORT_ROAD",
        vertices: 50,
        spacing: 20.0,
    },
    ResolveScenario {
        name: "LONG_ROAD",
        vertices: 20_000,
        spacing: 5.0,
    },
];

fn resolve_benchmark(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.significance_level(0.1).sample_size(50);

    RESOLVE_CASES.into_iter().for_each(|sc| {
        let line = MeasuredLine::from_wkt(&straight_road(sc.vertices, sc.spacing))
            .expect("Road must parse successfully.");

        let length = (sc.vertices - 1) as f64 * sc.spacing;
        let query = point! { x: length * 0.73, y: 4.0 };

        group.bench_function(format!("project: {}", sc.name), |b| {
            b.iter(|| {
                let position = project(&line, query, UnitScale::METERS)
                    .expect("Projection must complete successfully");

                format_pk(position.measure_km)
            })
        });

        group.bench_function(format!("locate: {}", sc.name), |b| {
            b.iter(|| {
                locate(&line, length * 0.00073, UnitScale::METERS)
                    .expect("Location must complete successfully")
            })
        });
    });

    group.finish();
}

fn scan_benchmark(c: &mut criterion::Criterion) {
    let layer = Layer::from_path(fixture_path(METRIC_ROADS)).expect("Layer must load");

    c.bench_function("scan: nearest feature", |b| {
        b.iter(|| {
            layer
                .nearest_feature(&point! { x: 900.0, y: 300.0 }, 5)
                .expect("A feature must be found")
        })
    });
}

criterion::criterion_group!(resolve_benches, resolve_benchmark, scan_benchmark);
criterion_main!(resolve_benches);
