//! End-to-end pipeline benchmarks across a few representative mesh sizes
//! and morphology/smoothing configurations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voxel_blueprint::geom::{Triangle, Vec3f};
use voxel_blueprint::{build_blueprint, BlueprintConfig};

/// A unit icosahedron-ish bump mesh, tessellated finely enough that refining
/// it at resolution 1.0 yields a few hundred lattice points.
fn sphere_mesh(radius: f64, subdivisions: usize) -> Vec<Triangle> {
  let mut triangles = Vec::new();
  let lat_steps = subdivisions;
  let lon_steps = subdivisions * 2;

  for i in 0..lat_steps {
    let theta0 = std::f64::consts::PI * i as f64 / lat_steps as f64;
    let theta1 = std::f64::consts::PI * (i + 1) as f64 / lat_steps as f64;

    for j in 0..lon_steps {
      let phi0 = 2.0 * std::f64::consts::PI * j as f64 / lon_steps as f64;
      let phi1 = 2.0 * std::f64::consts::PI * (j + 1) as f64 / lon_steps as f64;

      let vertex = |theta: f64, phi: f64| {
        Vec3f::new(radius * theta.sin() * phi.cos(), radius * theta.sin() * phi.sin(), radius * theta.cos())
      };

      let p00 = vertex(theta0, phi0);
      let p01 = vertex(theta0, phi1);
      let p10 = vertex(theta1, phi0);
      let p11 = vertex(theta1, phi1);

      triangles.push(Triangle::new(p00, p10, p11));
      triangles.push(Triangle::new(p00, p11, p01));
    }
  }

  triangles
}

fn bench_build_blueprint_by_mesh_size(c: &mut Criterion) {
  let mut group = c.benchmark_group("pipeline/build_blueprint");

  for &subdivisions in &[4usize, 8, 16] {
    let triangles = sphere_mesh(10.0, subdivisions);
    group.bench_with_input(BenchmarkId::new("default_config", subdivisions), &triangles, |b, tris| {
      let config = BlueprintConfig::default();
      b.iter(|| black_box(build_blueprint(black_box(tris), black_box(&config)).unwrap()))
    });
  }

  group.finish();
}

fn bench_build_blueprint_by_config(c: &mut Criterion) {
  let mut group = c.benchmark_group("pipeline/build_blueprint_config");
  let triangles = sphere_mesh(10.0, 8);

  let mut no_smoothing = BlueprintConfig::default();
  no_smoothing.disable_smoothing = true;

  let mut no_hollow = BlueprintConfig::default();
  no_hollow.flood_hollow = false;

  let mut serial = BlueprintConfig::default();
  serial.disable_multithreading = true;

  for (name, config) in [
    ("default", BlueprintConfig::default()),
    ("no_smoothing", no_smoothing),
    ("no_flood_hollow", no_hollow),
    ("serial", serial),
  ] {
    group.bench_function(name, |b| {
      b.iter(|| black_box(build_blueprint(black_box(&triangles), black_box(&config)).unwrap()))
    });
  }

  group.finish();
}

criterion_group!(pipeline, bench_build_blueprint_by_mesh_size, bench_build_blueprint_by_config);
criterion_main!(pipeline);
