//! Adaptive triangle refinement: hexasect each triangle until every
//! sub-triangle's longest edge is at or below the target resolution, then
//! round surviving vertices onto the integer lattice.

use std::collections::HashSet;

use crate::geom::{LatticePoint, Resolution, Triangle};

/// Default number of triangles accumulated between deduplication passes,
/// bounding the peak size of the working point/triangle lists.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Hexasect `tri` repeatedly until every resulting sub-triangle's longest
/// edge is at most `resolution`. Zero-area triangles terminate immediately:
/// `max_edge_norm() == 0.0 <= resolution` holds on the very first check.
fn split_triangle(tri: Triangle, resolution: Resolution) -> Vec<Triangle> {
  let mut small = Vec::new();
  let mut large = vec![tri];

  while !large.is_empty() {
    let mut next_large = Vec::with_capacity(large.len() * 2);
    for t in large.drain(..) {
      for sub in t.hexasect() {
        if sub.max_edge_norm() > resolution {
          next_large.push(sub);
        } else {
          small.push(sub);
        }
      }
    }
    large = next_large;
  }

  small
}

/// Refine a batch of triangles, emitting deduplicated lattice points.
///
/// Triangles are split one at a time; every [`DEFAULT_BATCH_SIZE`]-th triangle
/// triggers a flatten-and-dedup pass over the accumulated points so the
/// working set never grows past one batch's worth of un-deduplicated
/// vertices, bounding memory for large meshes.
pub fn refine_batch(triangles: &[Triangle], resolution: Resolution, batch_size: usize) -> HashSet<LatticePoint> {
  let batch_size = batch_size.max(1);
  let mut points: HashSet<LatticePoint> = HashSet::new();
  let mut pending: Vec<Triangle> = Vec::new();

  let mut flush = |pending: &mut Vec<Triangle>, points: &mut HashSet<LatticePoint>| {
    for t in pending.drain(..) {
      points.insert(t.a.round_to_lattice(resolution));
      points.insert(t.b.round_to_lattice(resolution));
      points.insert(t.c.round_to_lattice(resolution));
    }
  };

  for tri in triangles {
    pending.extend(split_triangle(*tri, resolution));
    if pending.len() >= batch_size {
      flush(&mut pending, &mut points);
    }
  }
  flush(&mut pending, &mut points);

  points
}

/// Refine a single triangle to the target resolution, returning its
/// deduplicated lattice points.
///
/// Guarantee: for every point `x` on the triangle's surface, the returned
/// set contains a lattice point `p` with `‖resolution·p − x‖₂ ≤
/// resolution·√3/2` — the half-diagonal of one lattice cell, since every
/// surviving sub-triangle's longest edge (and therefore its circumradius
/// bound) is at most `resolution`.
pub fn refine(triangle: Triangle, resolution: Resolution) -> HashSet<LatticePoint> {
  refine_batch(std::slice::from_ref(&triangle), resolution, DEFAULT_BATCH_SIZE)
}

#[cfg(test)]
#[path = "refine_test.rs"]
mod refine_test;
