//! Exterior flood fill hollowing: trace the empty space reachable from
//! outside the bounding box, then delete every occupied voxel the flood
//! never touched (fully enclosed interior blocks invisible from outside).

use smallvec::SmallVec;

use crate::geom::UnitDir;
use crate::grid::DenseGrid;
use crate::voxel::Cell;

/// The default keep-predicate for [`flood_hollow`]: spares nothing. No cell
/// produced by this crate's smoother or corner-filler carries a sentinel
/// shape that should survive hollowing, so the only default consistent with
/// every occupied cell this implementation can produce is "remove every
/// unreached interior cell."
pub fn spare_nothing(_cell: &Cell) -> bool {
  false
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
  Unvisited,
  VisitedEmpty,
  VisitedOccupied,
}

/// Flood outward from `start`, iteratively (an explicit stack rather than
/// recursion, since blueprint volumes can be tens of thousands of cells
/// deep along a single flood path).
///
/// Each stack frame pairs a visited position with the directions still
/// untried from it; frames pop once exhausted, backtracking the flood
/// exactly like a depth-first walk would, without growing the native call
/// stack.
fn flood_from(grid: &DenseGrid, marks: &mut [Mark], start: (usize, usize, usize)) {
  let (dx, dy, dz) = grid.dims;

  let start_occupied = grid.get(start.0, start.1, start.2).is_some();
  let start_i = grid.linear_index(start.0, start.1, start.2);

  if start_occupied {
    if marks[start_i] != Mark::VisitedOccupied {
      marks[start_i] = Mark::VisitedOccupied;
    }
    return;
  }
  if marks[start_i] == Mark::VisitedEmpty {
    return;
  }
  marks[start_i] = Mark::VisitedEmpty;

  let mut trail: Vec<(usize, usize, usize, SmallVec<[UnitDir; 6]>)> = vec![(start.0, start.1, start.2, SmallVec::from(UnitDir::ALL))];

  while let Some(frame) = trail.last_mut() {
    let (cx, cy, cz) = (frame.0, frame.1, frame.2);
    let Some(dir) = frame.3.pop() else {
      trail.pop();
      continue;
    };

    let d = dir.as_vec3i();
    let nx = cx as i64 + d.x;
    let ny = cy as i64 + d.y;
    let nz = cz as i64 + d.z;
    if nx < 0 || ny < 0 || nz < 0 || nx as usize >= dx || ny as usize >= dy || nz as usize >= dz {
      continue;
    }
    let (nx, ny, nz) = (nx as usize, ny as usize, nz as usize);
    let ni = grid.linear_index(nx, ny, nz);

    if grid.get(nx, ny, nz).is_some() {
      if marks[ni] != Mark::VisitedOccupied {
        marks[ni] = Mark::VisitedOccupied;
      }
      continue;
    }
    if marks[ni] == Mark::VisitedEmpty {
      continue;
    }
    marks[ni] = Mark::VisitedEmpty;
    trail.push((nx, ny, nz, SmallVec::from(UnitDir::ALL)));
  }
}

/// Hollow `grid` in place: flood every exterior-reachable empty cell from
/// all six faces of the bounding box, then clear any occupied cell the
/// flood never reached as "visited occupied" (an interior voxel with no
/// path to open air), unless `keep` returns true for that cell.
///
/// The resulting occupied set is exactly the visited-occupied set union the
/// set of interior cells `keep` spared.
pub fn flood_hollow(grid: &mut DenseGrid, keep: impl Fn(&Cell) -> bool) {
  let (dx, dy, dz) = grid.dims;
  let mut marks = vec![Mark::Unvisited; dx * dy * dz];

  let mut starts = Vec::with_capacity(2 * (dx * dy + dx * dz + dy * dz));
  for y in 0..dy {
    for z in 0..dz {
      starts.push((0, y, z));
      starts.push((dx - 1, y, z));
    }
  }
  for x in 0..dx {
    for z in 0..dz {
      starts.push((x, 0, z));
      starts.push((x, dy - 1, z));
    }
  }
  for x in 0..dx {
    for y in 0..dy {
      starts.push((x, y, 0));
      starts.push((x, y, dz - 1));
    }
  }

  for start in starts {
    flood_from(grid, &mut marks, start);
  }

  for x in 0..dx {
    for y in 0..dy {
      for z in 0..dz {
        let i = grid.linear_index(x, y, z);
        if let Some(cell) = grid.get(x, y, z) {
          if marks[i] != Mark::VisitedOccupied && !keep(&cell) {
            grid.set(x, y, z, None);
          }
        }
      }
    }
  }
}

#[cfg(test)]
#[path = "flood_test.rs"]
mod flood_test;
