use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geo::point;
use geo::prelude::*;

use petshelter_common::{haversine, Location};
use petshelter_shelters::{find_closest, Address, Shelter};

fn setup() -> (Location, Location) {
    let point1 = Location::new(48.573174, 2.319671);
    let point2 = Location::new(48.566757, 2.303015);
    (point1, point2)
}

fn self_haversines(c: &mut Criterion) {
    let (point1, point2) = setup();

    c.bench_function("self::haversines", |b| {
        b.iter(|| {
            black_box(haversine(&point1, &point2));
        })
    });
}

fn geo_haversines(c: &mut Criterion) {
    let (point1, point2) = setup();

    let p1 = point!(x: point1.lon, y: point1.lat);
    let p2 = point!(x: point2.lon, y: point2.lat);

    c.bench_function("geo::haversines", |b| {
        b.iter(|| {
            black_box(p1.haversine_distance(&p2));
        })
    });
}

fn closest_of_1000(c: &mut Criterion) {
    let origin = Location::new(40.0, -3.0);
    let list: Vec<Shelter> = (0..1000)
        .map(|i| Shelter {
            id: i.to_string(),
            name: format!("shelter-{i}"),
            address: Address::new(39.0 + (i % 200) as f64 * 0.01, -4.0 + (i / 200) as f64 * 0.3),
            ..Default::default()
        })
        .collect();

    c.bench_function("find_closest/1000", |b| {
        b.iter(|| {
            black_box(find_closest(&origin, black_box(&list)));
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = self_haversines, geo_haversines, closest_of_1000
}

criterion_main!(benches);
