//! Binary blueprint encoding: header bit-mask plus a parallel block-record
//! stream, closed off with the fixed trailer the target container expects.

use crate::blockcode::block_codes;
use crate::error::Result;
use crate::grid::DenseGrid;

/// Fixed material byte used for every emitted block (steel, small grid).
const BLOCK_TYPE: u8 = 0x87;

/// A finished, wire-ready blueprint payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBlueprint {
  pub dims: (usize, usize, usize),
  pub bytes: Vec<u8>,
}

/// Encode an empty grid: the `N = 0` header, no bit-mask bytes, no block
/// records, and a trailer whose four auxiliary sections are themselves
/// zero-length.
pub fn encode_empty() -> EncodedBlueprint {
  let mut bytes = Vec::new();
  write_header_and_trailer(&mut bytes, 0);
  EncodedBlueprint { dims: (0, 0, 0), bytes }
}

/// Encode a finished dense grid: header, bit-mask, block stream, trailer.
pub fn encode(grid: &DenseGrid) -> Result<EncodedBlueprint> {
  let (dx, dy, dz) = grid.dims;
  let total_cells = dx * dy * dz;
  let n = total_cells.div_ceil(8);

  let mut bitmask = vec![0u8; n];
  let mut block_stream = Vec::new();

  let mut bit_index = 0usize;
  for x in 0..dx {
    for y in 0..dy {
      for z in 0..dz {
        if let Some(cell) = grid.get(x, y, z) {
          bitmask[bit_index / 8] |= 1 << (bit_index % 8);

          let (shape, rotation) = block_codes(&cell)?;
          block_stream.push(BLOCK_TYPE);
          block_stream.push(rotation);
          block_stream.push(0x00);
          block_stream.push(shape);
        }
        bit_index += 1;
      }
    }
  }

  let mut bytes = Vec::with_capacity(4 + n + block_stream.len() + 2 + 4 * (4 + n));
  bytes.extend_from_slice(&(n as u32).to_le_bytes());
  bytes.extend_from_slice(&bitmask);
  bytes.extend_from_slice(&block_stream);
  write_trailer(&mut bytes, n);

  Ok(EncodedBlueprint { dims: grid.dims, bytes })
}

fn write_header_and_trailer(bytes: &mut Vec<u8>, n: usize) {
  bytes.extend_from_slice(&(n as u32).to_le_bytes());
  write_trailer(bytes, n);
}

fn write_trailer(bytes: &mut Vec<u8>, n: usize) {
  bytes.push(0x01);
  bytes.push(0x7F);
  for _ in 0..4 {
    bytes.extend_from_slice(&(n as u32).to_le_bytes());
    bytes.extend(std::iter::repeat(0u8).take(n));
  }
}

#[cfg(test)]
#[path = "encode_test.rs"]
mod encode_test;
