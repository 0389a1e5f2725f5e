//! Corner filling: after slope smoothing, find unambiguous places where two
//! perpendicular slopes of the same shape meet and insert a corner block to
//! close the gap between them.

use crate::geom::Vec3i;
use crate::voxel::{BlockKind, Cell, CornerKind, OrientedBlock, VoxelMap};

/// The twelve edge-adjacent (not face- or vertex-adjacent) neighbor offsets:
/// every `(i, j, k) in {-1, 0, 1}^3` with L1 norm exactly 2.
fn edge_offsets() -> Vec<Vec3i> {
  let mut out = Vec::with_capacity(12);
  for i in -1..=1 {
    for j in -1..=1 {
      for k in -1..=1 {
        let v = Vec3i::new(i, j, k);
        if v.l1_norm() == 2 {
          out.push(v);
        }
      }
    }
  }
  out
}

/// Scan every slope voxel for an edge-adjacent slope of the same kind and
/// facing whose forward vectors are perpendicular, and fill the corner
/// between them if the corner position is still empty.
///
/// Runs to a single fixed point: corner voxels inserted by this pass are not
/// themselves slopes, so they never trigger further corner placement.
pub fn fill_corners(points: &mut VoxelMap) {
  let offsets = edge_offsets();
  let mut corners: VoxelMap = VoxelMap::new();

  for (&coord, cell) in points.iter() {
    let block = match cell {
      Cell::Oriented(b @ OrientedBlock { kind: BlockKind::Slope(_), .. }) => *b,
      _ => continue,
    };
    let slope = match block.kind {
      BlockKind::Slope(s) => s,
      BlockKind::Corner(_) => unreachable!(),
    };

    for &offset in &offsets {
      let other_coord = coord + offset;
      let other = match points.get(&other_coord) {
        Some(Cell::Oriented(b @ OrientedBlock { kind: BlockKind::Slope(_), .. })) => *b,
        _ => continue,
      };
      let other_slope = match other.kind {
        BlockKind::Slope(s) => s,
        BlockKind::Corner(_) => unreachable!(),
      };

      if slope != other_slope {
        continue;
      }
      if block.orientation.up != other.orientation.up {
        continue;
      }
      if block.orientation.forward.dot(&other.orientation.forward.as_vec3i()) != 0 {
        continue;
      }

      let forward = block.orientation.forward.as_vec3i();
      let other_forward = other.orientation.forward.as_vec3i();

      // An interior closed-off pocket: both slopes point into the same gap.
      let cut_corner = (coord + forward == other_coord + other_forward).then(|| (CornerKind::Cut, coord - other_forward));

      // A normal exterior corner: both slopes point away from the same gap.
      let normal_corner =
        (coord - forward == other_coord - other_forward).then(|| (CornerKind::Normal(slope), coord + other_forward));

      // Both checks are independent; when both match, the normal-corner
      // classification takes precedence (it is evaluated after CutCorner).
      if let Some((kind, pos)) = normal_corner.or(cut_corner) {
        if !points.contains_key(&pos) {
          corners.insert(
            pos,
            Cell::Oriented(OrientedBlock {
              kind: BlockKind::Corner(kind),
              orientation: block.orientation,
            }),
          );
        }
      }
    }
  }

  points.extend(corners);
}

#[cfg(test)]
#[path = "corners_test.rs"]
mod corners_test;
