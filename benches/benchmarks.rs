criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        estimating_mesh_size,
        building_mesh_three_axes,
        enumerating_mesh_points,
        interpolating_inverse_distance,
        interpolating_nearest,
        matching_contiguous_modes,
}

fn spec() -> InterpolationSpec {
    let axis = |lo, hi, steps| AxisSpec::new(Bounds::new(lo, hi).unwrap(), steps).unwrap();
    InterpolationSpec::new()
        .declare(Axis::Mass, axis(1.4, 2.6, 40))
        .unwrap()
        .declare(Axis::Hydrogen, axis(0.1, 0.7, 40))
        .unwrap()
        .declare(Axis::Rotation, axis(0.0, 50.0, 20))
        .unwrap()
}

fn inputs() -> (Array2<f64>, Array2<f64>) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let rows = 500;
    let features = Array2::from_shape_fn((rows, 6), |(_, j)| match j {
        0 => rng.random_range(1.4..2.6),
        4 => rng.random_range(0.1..0.7),
        5 => rng.random_range(0.0..50.0),
        _ => 0.0,
    });
    let values = Array2::from_shape_fn((rows, 30), |(i, j)| {
        features[[i, 0]] + features[[i, 4]] * j as f64 + features[[i, 5]] * 1e-3
    });
    (features, values)
}

fn estimating_mesh_size(c: &mut criterion::Criterion) {
    let spec = spec();
    c.bench_function("estimate a 32k-point Mesh", |b| {
        b.iter(|| MeshBuilder::estimate(&spec))
    });
}

fn building_mesh_three_axes(c: &mut criterion::Criterion) {
    let spec = spec();
    c.bench_function("build a 32k-point Mesh", |b| {
        b.iter(|| MeshBuilder::default().prepare(&spec).map(|m| m.size()))
    });
}

fn enumerating_mesh_points(c: &mut criterion::Criterion) {
    let mut builder = MeshBuilder::default();
    let mesh = builder.prepare(&spec()).unwrap().clone();
    c.bench_function("enumerate 32k Mesh points", |b| {
        b.iter(|| (0..mesh.size()).map(|i| mesh.point(i)).count())
    });
}

fn interpolating_inverse_distance(c: &mut criterion::Criterion) {
    let mut builder = MeshBuilder::default();
    let mesh = builder.prepare(&spec()).unwrap().clone();
    let (features, values) = inputs();
    let method = Method::InverseDistance { power: IDW_POWER };
    c.bench_function("interpolate 32k points from 500 rows (IDW)", |b| {
        b.iter(|| evaluate(&features, &values, &mesh, method))
    });
}

fn interpolating_nearest(c: &mut criterion::Criterion) {
    let mut builder = MeshBuilder::default();
    let mesh = builder.prepare(&spec()).unwrap().clone();
    let (features, values) = inputs();
    c.bench_function("interpolate 32k points from 500 rows (nearest)", |b| {
        b.iter(|| evaluate(&features, &values, &mesh, Method::Nearest))
    });
}

fn matching_contiguous_modes(c: &mut criterion::Criterion) {
    let kind = ModeType::new(1, 0).unwrap();
    let modes = (-40..-10)
        .map(|n| Mode {
            n,
            kind,
            freq: 3.0 - n as f32 * 0.05,
        })
        .collect::<Vec<_>>();
    let observed = modes
        .iter()
        .rev()
        .map(|m| ObservedMode::new(m.freq + 0.001, Unit::PerDay))
        .collect::<Vec<_>>();
    c.bench_function("match 30 observed modes (contiguous)", |b| {
        b.iter(|| MatchRule::Contiguous.apply(&modes, &observed))
    });
}

use ndarray::Array2;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use seismogrid::*;
