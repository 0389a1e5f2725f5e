use super::*;
use crate::geom::Vec3f;
use std::collections::HashSet;

fn unit_square_tris() -> Vec<Triangle> {
  vec![
    Triangle::new(Vec3f::new(0.0, 0.0, 0.0), Vec3f::new(4.0, 0.0, 0.0), Vec3f::new(4.0, 4.0, 0.0)),
    Triangle::new(Vec3f::new(0.0, 0.0, 0.0), Vec3f::new(4.0, 4.0, 0.0), Vec3f::new(0.0, 4.0, 0.0)),
  ]
}

#[test]
fn estimate_chunk_size_is_never_zero() {
  let tris = unit_square_tris();
  let size = estimate_chunk_size(&tris, 0.5, 4);
  assert!(size >= 1);
}

#[test]
fn estimate_chunk_size_handles_empty_input() {
  assert_eq!(estimate_chunk_size(&[], 0.5, 4), 1);
}

#[test]
fn dispatch_refine_matches_serial_result() {
  let tris = unit_square_tris();
  let cancel = CancelToken::new();

  let serial = dispatch_refine(&tris, 0.5, 1, false, &cancel, crate::refine::refine_batch);
  let parallel = dispatch_refine(&tris, 0.5, 4, true, &cancel, crate::refine::refine_batch);

  assert_eq!(serial, parallel);
  assert!(!serial.is_empty());
}

#[test]
fn dispatch_refine_empty_input_is_empty() {
  let cancel = CancelToken::new();
  let result = dispatch_refine(&[], 0.5, 4, true, &cancel, crate::refine::refine_batch);
  assert!(result.is_empty());
}

#[test]
fn cancel_token_short_circuits_merge() {
  let cancel = CancelToken::new();
  cancel.cancel();
  assert!(cancel.is_cancelled());

  let chunks: Vec<Vec<i32>> = vec![vec![1], vec![2], vec![3]];
  let result = dispatch_merge(&chunks, &cancel, |chunk| {
    chunk
      .iter()
      .map(|&v| crate::geom::Vec3i::new(v as i64, 0, 0))
      .collect::<HashSet<_>>()
  });
  assert!(result.is_empty());
}

#[test]
fn dispatch_set_op_matches_serial_result() {
  let items: Vec<i64> = (0..50).collect();
  let cancel = CancelToken::new();
  let op = |chunk: &[i64]| chunk.iter().map(|&v| v * 2).collect::<HashSet<_>>();

  let serial = dispatch_set_op(&items, 1, false, &cancel, op);
  let parallel = dispatch_set_op(&items, 4, true, &cancel, op);

  assert_eq!(serial, parallel);
}
