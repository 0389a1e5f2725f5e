//! Dense grid construction: translate a sparse, possibly negative-indexed
//! `VoxelMap` into a flat, zero-origin 3D buffer sized exactly to its
//! bounding box.

use crate::error::{BlueprintError, Result};
use crate::geom::Vec3i;
use crate::voxel::{Cell, VoxelMap};

/// Minimum and maximum occupied coordinate on each axis.
pub fn bounding_box(points: &VoxelMap) -> Option<(Vec3i, Vec3i)> {
  let mut iter = points.keys();
  let first = *iter.next()?;
  let mut min = first;
  let mut max = first;
  for &p in iter {
    min = Vec3i::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
    max = Vec3i::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
  }
  Some((min, max))
}

/// A zero-origin, densely-packed 3D array of voxel cells, plus the shift
/// that was applied to move the sparse map's minimum corner to the origin.
///
/// Indexed `[x][y][z]` in row-major order with `z` fastest-varying, so flood
/// fill's 6-directional neighbor walk and the bitmask encoder's iteration
/// order agree on which axis varies fastest.
pub struct DenseGrid {
  pub dims: (usize, usize, usize),
  pub shift: Vec3i,
  cells: Vec<Option<Cell>>,
}

impl DenseGrid {
  /// Build a dense grid sized exactly to `points`'s bounding box, shifting
  /// every coordinate so the minimum corner lands at the origin.
  pub fn from_voxel_map(points: &VoxelMap) -> Result<DenseGrid> {
    let (min, max) = bounding_box(points).ok_or(BlueprintError::EmptyMesh)?;
    let dims = (
      (max.x - min.x + 1) as usize,
      (max.y - min.y + 1) as usize,
      (max.z - min.z + 1) as usize,
    );
    let mut cells = vec![None; dims.0 * dims.1 * dims.2];

    for (&p, &cell) in points {
      let local = p - min;
      let idx = Self::index(dims, local.x as usize, local.y as usize, local.z as usize);
      cells[idx] = Some(cell);
    }

    Ok(DenseGrid { dims, shift: min, cells })
  }

  fn index(dims: (usize, usize, usize), x: usize, y: usize, z: usize) -> usize {
    (x * dims.1 + y) * dims.2 + z
  }

  /// The linear buffer index of `(x, y, z)`, exposed so callers keeping a
  /// parallel same-shape buffer (e.g. flood fill's visitation marks) can
  /// address it with the same layout this grid uses, instead of
  /// re-deriving the formula.
  pub fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
    Self::index(self.dims, x, y, z)
  }

  pub fn in_bounds(&self, x: i64, y: i64, z: i64) -> bool {
    x >= 0 && y >= 0 && z >= 0 && (x as usize) < self.dims.0 && (y as usize) < self.dims.1 && (z as usize) < self.dims.2
  }

  pub fn get(&self, x: usize, y: usize, z: usize) -> Option<Cell> {
    self.cells[Self::index(self.dims, x, y, z)]
  }

  pub fn get_i(&self, x: i64, y: i64, z: i64) -> Option<Cell> {
    if !self.in_bounds(x, y, z) {
      return None;
    }
    self.get(x as usize, y as usize, z as usize)
  }

  pub fn set(&mut self, x: usize, y: usize, z: usize, cell: Option<Cell>) {
    let idx = Self::index(self.dims, x, y, z);
    self.cells[idx] = cell;
  }

  /// Iterate every `(x, y, z, cell)` triple in row-major order.
  pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize, Option<Cell>)> + '_ {
    let (dx, dy, dz) = self.dims;
    (0..dx).flat_map(move |x| (0..dy).flat_map(move |y| (0..dz).map(move |z| (x, y, z, self.get(x, y, z)))))
  }

  /// Reconstruct a sparse `VoxelMap`, undoing the origin shift applied by
  /// [`DenseGrid::from_voxel_map`].
  pub fn to_voxel_map(&self) -> VoxelMap {
    self
      .iter()
      .filter_map(|(x, y, z, cell)| cell.map(|c| (Vec3i::new(x as i64, y as i64, z as i64) + self.shift, c)))
      .collect()
  }
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
