use super::*;
use crate::geom::{Vec3f, Vec3i};

#[test]
fn scenario_a_single_triangle_coarse_resolution() {
  let tri = Triangle::new(Vec3f::new(0.0, 0.0, 0.0), Vec3f::new(1.0, 0.0, 0.0), Vec3f::new(0.0, 1.0, 0.0));
  let pts = refine(tri, 1.0);
  assert!(pts.contains(&Vec3i::new(0, 0, 0)));
  assert!(pts.contains(&Vec3i::new(1, 0, 0)));
  assert!(pts.contains(&Vec3i::new(0, 1, 0)));
}

#[test]
fn scenario_b_unit_cube_hull() {
  // Twelve triangles forming the surface of the cube [0,2]^3 (two per face).
  let corners = |x: f64, y: f64, z: f64| Vec3f::new(x, y, z);
  #[rustfmt::skip]
  let quads = [
    // bottom z=0, top z=2
    [(0.,0.,0.),(2.,0.,0.),(2.,2.,0.)], [(0.,0.,0.),(2.,2.,0.),(0.,2.,0.)],
    [(0.,0.,2.),(2.,0.,2.),(2.,2.,2.)], [(0.,0.,2.),(2.,2.,2.),(0.,2.,2.)],
    // front y=0, back y=2
    [(0.,0.,0.),(2.,0.,0.),(2.,0.,2.)], [(0.,0.,0.),(2.,0.,2.),(0.,0.,2.)],
    [(0.,2.,0.),(2.,2.,0.),(2.,2.,2.)], [(0.,2.,0.),(2.,2.,2.),(0.,2.,2.)],
    // left x=0, right x=2
    [(0.,0.,0.),(0.,2.,0.),(0.,2.,2.)], [(0.,0.,0.),(0.,2.,2.),(0.,0.,2.)],
    [(2.,0.,0.),(2.,2.,0.),(2.,2.,2.)], [(2.,0.,0.),(2.,2.,2.),(2.,0.,2.)],
  ];
  let tris: Vec<Triangle> = quads
    .iter()
    .map(|[a, b, c]| {
      Triangle::new(
        corners(a.0, a.1, a.2),
        corners(b.0, b.1, b.2),
        corners(c.0, c.1, c.2),
      )
    })
    .collect();

  let pts = refine_batch(&tris, 1.0, DEFAULT_BATCH_SIZE);

  for i in 0..=2 {
    for j in 0..=2 {
      for k in 0..=2 {
        if (i, j, k) == (1, 1, 1) {
          continue; // interior point is not on the surface
        }
        assert!(
          pts.contains(&Vec3i::new(i, j, k)),
          "missing surface lattice point ({i},{j},{k})"
        );
      }
    }
  }
}

#[test]
fn invariant_idempotent_refinement() {
  let tri = Triangle::new(Vec3f::new(0.0, 0.0, 0.0), Vec3f::new(3.0, 0.0, 0.0), Vec3f::new(0.0, 3.0, 0.0));
  let once = refine(tri, 0.7);
  let twice: HashSet<_> = once.union(&once).cloned().collect();
  assert_eq!(once, twice);
}

#[test]
fn invariant_resolution_coverage() {
  let resolution = 0.5;
  let tri = Triangle::new(Vec3f::new(0.0, 0.0, 0.0), Vec3f::new(2.0, 0.0, 0.0), Vec3f::new(0.0, 2.0, 0.0));
  let pts: Vec<_> = refine(tri, resolution).into_iter().collect();
  let bound = resolution * 3f64.sqrt() / 2.0;

  // Sample a handful of surface points, including vertices and an edge midpoint.
  let samples = [tri.a, tri.b, tri.c, tri.a.midpoint(&tri.b), tri.centroid()];
  for sample in samples {
    let best = pts
      .iter()
      .map(|p| {
        let world = Vec3f::new(p.x as f64 * resolution, p.y as f64 * resolution, p.z as f64 * resolution);
        (world - sample).l2_norm()
      })
      .fold(f64::INFINITY, f64::min);
    assert!(best <= bound + 1e-9, "closest lattice point {best} exceeds bound {bound}");
  }
}

#[test]
fn zero_area_triangle_terminates_with_rounded_vertices() {
  let p = Vec3f::new(1.2, -0.6, 0.4);
  let tri = Triangle::new(p, p, p);
  let pts = refine(tri, 1.0);
  assert_eq!(pts.len(), 1);
  assert!(pts.contains(&p.round_to_lattice(1.0)));
}

#[test]
fn batching_does_not_change_the_result() {
  let tri = Triangle::new(Vec3f::new(0.0, 0.0, 0.0), Vec3f::new(4.0, 0.0, 0.0), Vec3f::new(0.0, 4.0, 0.0));
  let small_batches = refine_batch(std::slice::from_ref(&tri), 0.6, 1);
  let one_batch = refine_batch(std::slice::from_ref(&tri), 0.6, 10_000);
  assert_eq!(small_batches, one_batch);
}
