use super::*;
use crate::geom::Vec3i;
use crate::voxel::BlockKind;
use std::collections::HashSet;

/// A flat 5x5 floor at z=0, exposed upward along +z.
fn flat_floor() -> HashSet<LatticePoint> {
  let mut pts = HashSet::new();
  for x in -2..=2 {
    for y in -2..=2 {
      pts.insert(Vec3i::new(x, y, 0));
    }
  }
  pts
}

#[test]
fn flat_floor_gets_no_slopes_without_a_vertical_drop() {
  // A perfectly flat floor has no adjacent full cube "below" any exposed
  // face in a perpendicular direction, so no slope run is viable: every
  // direction's adjacency requires a full-cube neighbor perpendicular to
  // the forward vector, and the floor has none above or below itself.
  let map = smooth_surface(&flat_floor(), false);
  assert!(map.values().all(|c| matches!(c, Cell::Full)));
}

#[test]
fn a_stepped_ledge_grows_a_slope_down_into_the_gap() {
  // An upper floor at z=1 overhanging a lower floor at z=0 by one cube:
  // the exposed edge of the upper floor should grow a slope downward.
  let mut pts = HashSet::new();
  for x in -3..=3 {
    for y in -2..=2 {
      pts.insert(Vec3i::new(x, y, 0));
    }
  }
  for x in 0..=3 {
    for y in -2..=2 {
      pts.insert(Vec3i::new(x, y, 1));
    }
  }

  let map = smooth_surface(&pts, false);
  let slopes: Vec<_> = map
    .iter()
    .filter(|(_, c)| matches!(c, Cell::Oriented(_)))
    .collect();
  assert!(!slopes.is_empty(), "expected at least one slope at the stepped ledge");
}

#[test]
fn aggressive_mode_permits_interior_corners_that_normal_mode_skips() {
  let pts = flat_floor();
  let normal = smooth_surface(&pts, false);
  let aggressive = smooth_surface(&pts, true);
  // Aggressive mode never places fewer oriented blocks than normal mode.
  let normal_count = normal.values().filter(|c| matches!(c, Cell::Oriented(_))).count();
  let aggressive_count = aggressive.values().filter(|c| matches!(c, Cell::Oriented(_))).count();
  assert!(aggressive_count >= normal_count);
}

#[test]
fn gentler_slope_length_two_wins_conflict_over_length_one() {
  let a = SlopeKind::new(2, 1);
  let b = SlopeKind::new(1, 1);
  assert!(a.is_at_least_as_gentle_as(&b));
  assert!(!b.is_at_least_as_gentle_as(&a));
}

#[test]
fn slope_kind_part_stays_within_its_run_length() {
  let run = SlopeKind::new(2, 2);
  assert_eq!(run.length, 2);
  assert_eq!(run.part, 2);
}

#[test]
fn single_isolated_voxel_never_forms_a_slope() {
  let mut pts = HashSet::new();
  pts.insert(Vec3i::new(0, 0, 0));
  let map = smooth_surface(&pts, false);
  assert_eq!(map.len(), 1);
  assert!(matches!(map.get(&Vec3i::new(0, 0, 0)), Some(Cell::Full)));
}

#[test]
fn slope_orientation_records_the_forward_and_up_used_to_place_it() {
  let mut pts = HashSet::new();
  for x in -3..=3 {
    for y in -2..=2 {
      pts.insert(Vec3i::new(x, y, 0));
    }
  }
  for x in 0..=3 {
    for y in -2..=2 {
      pts.insert(Vec3i::new(x, y, 1));
    }
  }
  let map = smooth_surface(&pts, false);
  for cell in map.values() {
    if let Cell::Oriented(OrientedBlock { kind: BlockKind::Slope(_), orientation }) = cell {
      assert_eq!(orientation.forward.dot(&orientation.up.as_vec3i()), 0);
    }
  }
}
