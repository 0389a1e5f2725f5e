//! Mesh ingestion adapter: ASCII/binary STL parsing into a flat `Vec<Triangle>`.
//!
//! The core pipeline takes `&[Triangle]` directly and never calls this module
//! itself; it exists as a thin, swappable convenience for callers that start
//! from an STL file on disk rather than an already-parsed triangle list.

use std::io::{BufRead, Read};

use crate::error::{BlueprintError, Result};
use crate::geom::{Triangle, Vec3f};

const ASCII_MARKER: &[u8] = b"solid";

/// Read an STL mesh from `reader`, sniffing ASCII vs. binary from the first
/// five bytes (`b"solid"` for ASCII). Ignores normal-vector data in both
/// forms and any solid-name grouping, returning every triangle in file order.
pub fn read_stl<R: Read>(mut reader: R) -> Result<Vec<Triangle>> {
  let mut prefix = [0u8; 5];
  let n = reader.read(&mut prefix)?;
  let mut rest = Vec::new();
  reader.read_to_end(&mut rest)?;

  let mut full = prefix[..n].to_vec();
  full.extend_from_slice(&rest);

  if n == ASCII_MARKER.len() && prefix[..n] == *ASCII_MARKER {
    read_ascii_stl(&full[..])
  } else {
    read_binary_stl(&full[..])
  }
}

/// Parse an ASCII STL buffer (every `solid`/`endsolid` section flattened
/// into one triangle list; solid names are discarded).
pub fn read_ascii_stl(bytes: &[u8]) -> Result<Vec<Triangle>> {
  let mut lines = bytes.lines();
  let mut triangles = Vec::new();

  loop {
    let Some(line) = lines.next() else { break };
    let line = line?;
    let trimmed = line.trim();
    if !trimmed.starts_with("vertex") {
      continue;
    }
    let a = parse_vertex_line(trimmed)?;
    let b_line = lines
      .next()
      .ok_or_else(|| BlueprintError::MeshIo("unexpected end of ASCII STL".into()))??;
    let c_line = lines
      .next()
      .ok_or_else(|| BlueprintError::MeshIo("unexpected end of ASCII STL".into()))??;
    let b = parse_vertex_line(b_line.trim())?;
    let c = parse_vertex_line(c_line.trim())?;
    triangles.push(Triangle::new(a, b, c));
  }

  Ok(triangles)
}

/// Parse a single `vertex x y z` line into a point.
fn parse_vertex_line(line: &str) -> Result<Vec3f> {
  let mut parts = line.split_whitespace();
  let tag = parts.next();
  if tag != Some("vertex") {
    return Err(BlueprintError::MeshIo(format!("expected 'vertex' line, got: {line}")));
  }
  let mut coords = [0.0f64; 3];
  for slot in coords.iter_mut() {
    let token = parts
      .next()
      .ok_or_else(|| BlueprintError::MeshIo("vertex line missing coordinate".into()))?;
    *slot = token
      .parse()
      .map_err(|_| BlueprintError::MeshIo(format!("malformed coordinate: {token}")))?;
  }
  Ok(Vec3f::new(coords[0], coords[1], coords[2]))
}

/// Parse a binary STL buffer: an 80-byte header, a little-endian `u32`
/// triangle count at offset 80, then 50 bytes per triangle (12 bytes normal,
/// 3 × 12 bytes vertices, 2 bytes attribute count, discarded).
pub fn read_binary_stl(bytes: &[u8]) -> Result<Vec<Triangle>> {
  if bytes.len() < 84 {
    return Err(BlueprintError::MeshIo("binary STL shorter than header".into()));
  }
  let count = u32::from_le_bytes(bytes[80..84].try_into().unwrap()) as usize;
  let mut triangles = Vec::with_capacity(count);
  let mut offset = 84usize;

  for _ in 0..count {
    if offset + 50 > bytes.len() {
      return Err(BlueprintError::MeshIo("binary STL truncated mid-triangle".into()));
    }
    // Skip the 12-byte facet normal; it is not used.
    let read_f32_triplet = |at: usize| -> Vec3f {
      let x = f32::from_le_bytes(bytes[at..at + 4].try_into().unwrap()) as f64;
      let y = f32::from_le_bytes(bytes[at + 4..at + 8].try_into().unwrap()) as f64;
      let z = f32::from_le_bytes(bytes[at + 8..at + 12].try_into().unwrap()) as f64;
      Vec3f::new(x, y, z)
    };
    let a = read_f32_triplet(offset + 12);
    let b = read_f32_triplet(offset + 24);
    let c = read_f32_triplet(offset + 36);
    triangles.push(Triangle::new(a, b, c));
    offset += 50; // 12 normal + 36 vertices + 2 attribute byte count
  }

  Ok(triangles)
}

#[cfg(test)]
#[path = "mesh_io_test.rs"]
mod mesh_io_test;
