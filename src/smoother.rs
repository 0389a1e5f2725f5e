//! Slope smoothing: for every full-cube voxel, look outward along each axis
//! and place the gentlest conflict-free slope run that keeps the surface
//! within the original voxel set's convex hull.

use crate::geom::{LatticePoint, UnitDir, Vec3i};
use crate::voxel::{BlockKind, Cell, Orientation, OrientedBlock, SlopeKind, VoxelMap, DEFAULT_DIM_WEIGHT, VALID_SLOPE_LENGTHS};
use smallvec::SmallVec;
use std::collections::HashSet;

/// `a < b` → `Some(true)`, `a > b` → `Some(false)`, `a == b` → `None`. Ties
/// at every tri-state comparison in the conflict resolution below are
/// genuinely undecidable rather than falling back to a default winner.
fn leq(a: i64, b: i64) -> Option<bool> {
  if a < b {
    Some(true)
  } else if a > b {
    Some(false)
  } else {
    None
  }
}

/// Seed a voxel map from a refined lattice point set: every point starts as
/// a plain full cube.
pub fn build_voxel_map(points: &HashSet<LatticePoint>) -> VoxelMap {
  points.iter().map(|&p| (p, Cell::Full)).collect()
}

/// For each direction perpendicular to `forward` with an adjacent full cube,
/// return that direction paired with its opposite (the slope's up vector).
///
/// An empty result means `position` has no exposed face perpendicular to
/// `forward`; more than one means the corner is ambiguous and is skipped
/// unless smoothing is running in aggressive mode.
fn adjacency_vectors(position: LatticePoint, forward: UnitDir, points: &VoxelMap) -> SmallVec<[(UnitDir, UnitDir); 4]> {
  UnitDir::ALL
    .iter()
    .copied()
    .filter(|v| v.dot(&forward.as_vec3i()) == 0)
    .filter_map(|v| match points.get(&(position + v.as_vec3i())) {
      Some(Cell::Full) => Some((v, v.negate())),
      _ => None,
    })
    .collect()
}

/// Evaluate and place (or reject) a slope run starting at `position` and
/// extending along `forward`, resolving conflicts with any existing slope
/// that already occupies the same voxels.
///
/// Mutates `points` in place: on success, inserts the chosen slope's voxels
/// (overwriting any existing slope that loses the conflict); on an
/// undecidable tie, removes the contested voxel entirely rather than
/// guessing a winner.
pub fn slope_check_single(position: LatticePoint, forward: UnitDir, points: &mut VoxelMap, aggressive: bool, dim_weight: [i64; 3]) {
  let adjacencies = adjacency_vectors(position + forward.as_vec3i(), forward, points);

  if !aggressive && adjacencies.len() > 1 {
    return;
  }

  let max_slope = VALID_SLOPE_LENGTHS.iter().copied().max().unwrap_or(0);

  for (down_vec, up_vec) in adjacencies {
    let perpendicular: SmallVec<[UnitDir; 4]> = UnitDir::ALL
      .iter()
      .copied()
      .filter(|v| v.dot(&forward.as_vec3i()) == 0 && *v != down_vec)
      .collect();

    let mut viable_slope: i64 = 0;
    for slope_length in 1..=max_slope {
      let p = position + forward.as_vec3i() * slope_length;
      let below = p + down_vec.as_vec3i();

      if !matches!(points.get(&below), Some(Cell::Full)) {
        viable_slope = slope_length - 1;
        break;
      }
      if matches!(points.get(&p), Some(Cell::Full)) {
        viable_slope = slope_length - 1;
        break;
      }

      let interior = perpendicular.iter().any(|v| matches!(points.get(&(p + v.as_vec3i())), Some(Cell::Full)));
      if interior && !aggressive {
        viable_slope = slope_length - 1;
        break;
      }

      viable_slope = slope_length;
    }

    let mut chosen_slope = viable_slope;
    let mut clear_path = false;

    while viable_slope > 0 && !clear_path {
      chosen_slope = VALID_SLOPE_LENGTHS
        .iter()
        .copied()
        .filter(|&len| len <= viable_slope)
        .max()
        .unwrap_or(0);

      let mut conflicted = false;
      for i in 1..=chosen_slope {
        let p = position + forward.as_vec3i() * i;

        let existing = match points.get(&p) {
          Some(Cell::Oriented(block)) => *block,
          _ => {
            clear_path = true;
            continue;
          }
        };

        let existing_length = match existing.kind {
          BlockKind::Slope(s) => s.length,
          BlockKind::Corner(_) => {
            clear_path = true;
            continue;
          }
        };

        let test_slope = leq(existing_length, chosen_slope);

        let sign = p.sign();
        let p_weight = Vec3i::new(sign.x * dim_weight[0], sign.y * dim_weight[1], sign.z * dim_weight[2]);
        let test_forward = leq(
          p_weight.dot(&existing.orientation.forward.as_vec3i()),
          p_weight.dot(&forward.as_vec3i()),
        );
        let test_up = leq(p_weight.dot(&existing.orientation.up.as_vec3i()), p_weight.dot(&up_vec.as_vec3i()));

        if test_forward.is_none() && test_up.is_none() && test_slope.is_none() {
          points.remove(&p);
          chosen_slope -= 1;
          viable_slope = chosen_slope;
          clear_path = false;
          conflicted = true;
          break;
        } else if test_slope == Some(true)
          || (test_slope.is_none() && test_forward == Some(true))
          || (test_slope.is_none() && test_forward.is_none() && test_up == Some(true))
        {
          clear_path = true;
        } else {
          chosen_slope -= 1;
          viable_slope = chosen_slope;
          clear_path = false;
          conflicted = true;
          break;
        }
      }

      if !conflicted {
        break;
      }
    }

    for i in 1..=chosen_slope {
      let p = position + forward.as_vec3i() * i;
      points.insert(
        p,
        Cell::Oriented(OrientedBlock {
          kind: BlockKind::Slope(SlopeKind::new(chosen_slope, i)),
          orientation: Orientation { forward, up: up_vec },
        }),
      );
    }
  }
}

/// Run slope smoothing over every voxel present when the pass begins.
///
/// New slope voxels inserted mid-pass are not themselves re-examined in the
/// same pass (matching the single-sweep behavior the smoother is specified
/// against): the position list is snapshotted up front.
pub fn smooth(points: &mut VoxelMap, aggressive: bool) {
  let positions: Vec<LatticePoint> = points.keys().copied().collect();
  for position in positions {
    for dir in UnitDir::ALL {
      slope_check_single(position, dir, points, aggressive, DEFAULT_DIM_WEIGHT);
    }
  }
}

/// Build a fresh voxel map from a refined point set and smooth it.
pub fn smooth_surface(points: &HashSet<LatticePoint>, aggressive: bool) -> VoxelMap {
  let mut map = build_voxel_map(points);
  smooth(&mut map, aggressive);
  map
}

#[cfg(test)]
#[path = "smoother_test.rs"]
mod smoother_test;
