//! Block-code mapping: translate a resolved voxel shape into the two bytes
//! the binary block record actually stores — a shape/class byte and a
//! rotation byte encoding the block's forward/up facing.

use crate::error::{BlueprintError, Result};
use crate::geom::UnitDir;
use crate::voxel::{BlockKind, Cell, CornerKind, Orientation, SlopeKind};

/// Map a resolved cell to its shape byte. Full cubes need no orientation;
/// every other shape is one of the seven slope/corner classes the smoother
/// and corner-filler can produce.
pub fn shape_code(cell: &Cell) -> Result<u8> {
  let block = match cell {
    Cell::Full => return Ok(0x00),
    Cell::Oriented(b) => b,
  };

  match block.kind {
    BlockKind::Slope(SlopeKind { length: 1, part: 1 }) => Ok(0x14),
    BlockKind::Slope(SlopeKind { length: 2, part: 1 }) => Ok(0x12),
    BlockKind::Slope(SlopeKind { length: 2, part: 2 }) => Ok(0x10),
    BlockKind::Corner(CornerKind::Cut) => Ok(0x02),
    BlockKind::Corner(CornerKind::Normal(SlopeKind { length: 1, part: 1 })) => Ok(0x0c),
    BlockKind::Corner(CornerKind::Normal(SlopeKind { length: 2, part: 1 })) => Ok(0x08),
    BlockKind::Corner(CornerKind::Normal(SlopeKind { length: 2, part: 2 })) => Ok(0x0a),
    BlockKind::Slope(s) => Err(BlueprintError::InternalInvariant(slope_kind_message(s))),
    BlockKind::Corner(CornerKind::Normal(s)) => Err(BlueprintError::InternalInvariant(slope_kind_message(s))),
  }
}

fn slope_kind_message(_s: SlopeKind) -> &'static str {
  "slope run produced a (length, part) pair outside the fixed VALID_SLOPE_LENGTHS table"
}

/// The 24-entry rotation-code table: every (forward, up) pair a block can be
/// placed with, each a fixed byte in the target format's rotation space.
const ROTATION_TABLE: [(UnitDir, UnitDir, u8); 24] = {
  use UnitDir::*;
  [
    (PosY, PosZ, 0x01),
    (PosX, PosZ, 0x09),
    (NegY, PosZ, 0x11),
    (NegX, PosZ, 0x19),
    (PosY, PosX, 0x21),
    (PosZ, PosX, 0x29),
    (NegY, PosX, 0x31),
    (NegZ, PosX, 0x39),
    (NegY, NegZ, 0x41),
    (NegX, NegZ, 0x49),
    (PosY, NegZ, 0x51),
    (PosX, NegZ, 0x59),
    (PosY, NegX, 0x61),
    (PosZ, NegX, 0x69),
    (NegY, NegX, 0x71),
    (NegZ, NegX, 0x79),
    (PosZ, NegY, 0x81),
    (PosX, NegY, 0x89),
    (NegZ, NegY, 0x91),
    (NegX, NegY, 0x99),
    (NegX, PosY, 0xA1),
    (NegZ, PosY, 0xA9),
    (PosX, PosY, 0xB1),
    (PosZ, PosY, 0xB9),
  ]
};

/// Default rotation byte for full cubes, which carry no facing; also a
/// valid orientation code `(+y, +z)` in its own right.
pub const DEFAULT_ROTATION: u8 = 0x01;

/// Map an orientation to its fixed rotation byte.
pub fn rotation_code(orientation: &Orientation) -> Result<u8> {
  ROTATION_TABLE
    .iter()
    .find(|(f, u, _)| *f == orientation.forward && *u == orientation.up)
    .map(|(_, _, code)| *code)
    .ok_or(BlueprintError::InternalInvariant(
      "orientation is not one of the 24 fixed forward/up combinations",
    ))
}

/// Map a resolved cell to its `(shape, rotation)` byte pair.
pub fn block_codes(cell: &Cell) -> Result<(u8, u8)> {
  let shape = shape_code(cell)?;
  let rotation = match cell {
    Cell::Full => DEFAULT_ROTATION,
    Cell::Oriented(b) => rotation_code(&b.orientation)?,
  };
  Ok((shape, rotation))
}

#[cfg(test)]
#[path = "blockcode_test.rs"]
mod blockcode_test;
