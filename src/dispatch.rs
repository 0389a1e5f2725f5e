//! Parallel dispatcher: splits triangle refinement (and morphological
//! dilate/erode/shell-hollow) into chunks, runs them across rayon's thread
//! pool, and merges the owned per-chunk result sets.
//!
//! Workers never share mutable state; each consumes an owned chunk and
//! returns an owned `HashSet`. Results are delivered back over a bounded
//! `crossbeam-channel` so the dispatcher can drain completions without a
//! naive join-then-collect, the same channel-drain shape an
//! `AsyncPipeline` uses to hand rayon-spawned work back to its caller.

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::bounded;

use crate::geom::{triangle_list_bounds, Resolution, Triangle};

/// Target number of deduplicated points produced by a single worker.
const TARGET_POINTS_PER_WORKER: usize = 2000;

/// Cooperative cancellation flag shared between a dispatcher and its workers.
///
/// Workers only observe this between batches (never mid-batch), so a
/// cancelled dispatch still returns well-formed (if incomplete) partial
/// work, which the dispatcher then discards.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
  pub fn new() -> Self {
    Self(Arc::new(AtomicBool::new(false)))
  }

  pub fn cancel(&self) {
    self.0.store(true, Ordering::Relaxed);
  }

  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::Relaxed)
  }
}

/// Runtime capability probe: is a shared-memory worker pool available?
///
/// Every target this crate compiles for has real OS threads, so the probe
/// always succeeds; it is kept as a named function (rather than inlined
/// `true`) so the serial fallback path stays reachable and testable via
/// [`dispatch_refine`]'s `parallel: false` argument.
pub fn parallel_capable() -> bool {
  true
}

/// Choose how many triangles each worker should receive.
///
/// Estimates primitive density from the input's bounding volume, derives an
/// expected point yield per primitive, and picks a chunk size targeting
/// [`TARGET_POINTS_PER_WORKER`] points per worker while guaranteeing at
/// least `3 * worker_count` chunks so no single worker dominates wall time.
pub fn estimate_chunk_size(triangles: &[Triangle], resolution: Resolution, worker_count: usize) -> usize {
  let worker_count = worker_count.max(1);
  if triangles.is_empty() {
    return 1;
  }

  let volume = match triangle_list_bounds(triangles) {
    Some(bounds) => {
      let dx = (bounds[0].1 - bounds[0].0).max(resolution);
      let dy = (bounds[1].1 - bounds[1].0).max(resolution);
      let dz = (bounds[2].1 - bounds[2].0).max(resolution);
      dx * dy * dz
    }
    None => return 1,
  };

  let density = triangles.len() as f64 / volume.max(f64::EPSILON);
  let points_per_primitive = 1.0 / (resolution * density.cbrt()).max(f64::EPSILON);
  let primitives_per_worker = (TARGET_POINTS_PER_WORKER as f64 / points_per_primitive).ceil().max(1.0) as usize;

  let min_chunks = 3 * worker_count;
  let max_chunk_size = (triangles.len() / min_chunks.max(1)).max(1);

  primitives_per_worker.min(max_chunk_size).max(1)
}

/// Run `refine_fn` over `triangles`, in parallel when `parallel` is true and
/// the host is [`parallel_capable`], merging every chunk's result set.
///
/// `refine_fn` must be a pure function of its chunk (no shared mutable
/// state) so that chunk ordering never affects the merged output.
pub fn dispatch_refine<F>(
  triangles: &[Triangle],
  resolution: Resolution,
  worker_count: usize,
  parallel: bool,
  cancel: &CancelToken,
  refine_fn: F,
) -> HashSet<crate::geom::LatticePoint>
where
  F: Fn(&[Triangle], Resolution) -> HashSet<crate::geom::LatticePoint> + Sync,
{
  if triangles.is_empty() {
    return HashSet::new();
  }

  if !parallel || !parallel_capable() || worker_count <= 1 {
    return refine_fn(triangles, resolution);
  }

  let chunk_size = estimate_chunk_size(triangles, resolution, worker_count);
  let chunks: Vec<&[Triangle]> = triangles.chunks(chunk_size).collect();

  dispatch_merge(&chunks, cancel, |chunk| refine_fn(chunk, resolution))
}

/// Generic parallel map-then-union dispatcher used by both the refiner and
/// the morphological operators.
///
/// Spawns one rayon task per chunk; each task sends its owned result over a
/// bounded channel so the dispatcher drains completions as they arrive
/// rather than blocking on a single collective join. If `cancel` is set
/// before all chunks complete, already-received partial results are
/// discarded and an empty set is returned.
pub fn dispatch_merge<T, F>(chunks: &[T], cancel: &CancelToken, work: F) -> HashSet<crate::geom::LatticePoint>
where
  T: Sync,
  F: Fn(&T) -> HashSet<crate::geom::LatticePoint> + Sync,
{
  let (tx, rx) = bounded(chunks.len().max(1));

  rayon::scope(|scope| {
    for chunk in chunks {
      let tx = tx.clone();
      scope.spawn(move |_| {
        let result = work(chunk);
        let _ = tx.send(result);
      });
    }
    drop(tx);
  });

  let mut merged: HashSet<crate::geom::LatticePoint> = HashSet::new();
  for result in rx.iter() {
    if cancel.is_cancelled() {
      return HashSet::new();
    }
    merged.extend(result);
  }
  merged
}

/// Parallel map-then-union over an arbitrary hashable item type, used by the
/// dilate/erode/shell-hollow work-items (§4.3) which dispatch over the same
/// chunking strategy as refinement but operate on `Vec3i` sets rather than
/// `Triangle` lists.
pub fn dispatch_set_op<T, F>(items: &[T], worker_count: usize, parallel: bool, cancel: &CancelToken, op: F) -> HashSet<T>
where
  T: Eq + Hash + Clone + Send + Sync,
  F: Fn(&[T]) -> HashSet<T> + Sync,
{
  if items.is_empty() {
    return HashSet::new();
  }
  if !parallel || !parallel_capable() || worker_count <= 1 {
    return op(items);
  }

  let chunk_size = (items.len() / (3 * worker_count).max(1)).max(1);
  let chunks: Vec<&[T]> = items.chunks(chunk_size).collect();

  let (tx, rx) = bounded(chunks.len().max(1));
  rayon::scope(|scope| {
    for chunk in &chunks {
      let tx = tx.clone();
      scope.spawn(move |_| {
        let result = op(chunk);
        let _ = tx.send(result);
      });
    }
    drop(tx);
  });

  let mut merged = HashSet::new();
  for result in rx.iter() {
    if cancel.is_cancelled() {
      return HashSet::new();
    }
    merged.extend(result);
  }
  merged
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;
