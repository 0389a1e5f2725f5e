//! Voxel classification types shared by the smoother, corner filler, and
//! block-code mapper: what shape a lattice point resolves to, and which way
//! it faces.

use std::collections::HashMap;

use crate::geom::{LatticePoint, UnitDir};

/// Per-axis weighting used to break position/orientation ties during slope
/// conflict resolution (§4.4). Indexed by axis (x, y, z); a point's sign
/// vector dotted with this weight ranks how strongly it sits away from the
/// origin along each axis, with later axes weighted more heavily so ties on
/// the first axis fall through to the next.
pub const DEFAULT_DIM_WEIGHT: [i64; 3] = [1, 2, 4];

/// Slope lengths the smoother is willing to place, longest first.
pub const VALID_SLOPE_LENGTHS: [i64; 2] = [2, 1];

/// A single step of a slope run: `length` is the run's total length, `part`
/// is this voxel's 1-based position along the run (e.g. the second voxel of
/// a length-2 run has `length: 2, part: 2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlopeKind {
  pub length: i64,
  pub part: i64,
}

impl SlopeKind {
  pub fn new(length: i64, part: i64) -> Self {
    debug_assert!(part >= 1 && part <= length);
    Self { length, part }
  }

  /// Gentler (shallower) slopes take precedence over steeper ones when two
  /// candidates conflict at the same position; a run's gentleness is
  /// captured entirely by its total length.
  pub fn is_at_least_as_gentle_as(&self, other: &SlopeKind) -> bool {
    self.length >= other.length
  }
}

/// Whether a corner-filled voxel closes off an interior pocket (`Cut`) or
/// bridges two slopes on the exterior surface (`Normal`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerKind {
  Cut,
  Normal(SlopeKind),
}

/// What shape a non-cube voxel takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
  Slope(SlopeKind),
  Corner(CornerKind),
}

/// A block's facing: the direction it slopes away from (`forward`) and the
/// direction its sloped face tips toward (`up`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
  pub forward: UnitDir,
  pub up: UnitDir,
}

/// A non-cube voxel: its shape plus its facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientedBlock {
  pub kind: BlockKind,
  pub orientation: Orientation,
}

/// The resolved classification of one lattice point: a plain cube, or a
/// shaped block with a facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
  Full,
  Oriented(OrientedBlock),
}

/// The working map from lattice point to resolved voxel shape, threaded
/// through smoothing and corner-filling before being handed to the grid
/// builder.
pub type VoxelMap = HashMap<LatticePoint, Cell>;
