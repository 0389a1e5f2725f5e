//! Pipeline metrics collection.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use voxel_blueprint::metrics::{PipelineStats, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let mut stats = PipelineStats::new();
//! stats.record_stage_timing(PipelineStage::Refine, elapsed_us);
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Rolling window for storing recent values (e.g., per-stage timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.buffer.iter().copied().sum::<u64>() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    if self.buffer.is_empty() {
      None
    } else {
      let min = *self.buffer.iter().min().unwrap();
      let max = *self.buffer.iter().max().unwrap();
      Some((min, max))
    }
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(32)
  }
}

/// One stage of the pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
  Refine,
  Dispatch,
  Morphology,
  Smooth,
  CornerFill,
  FloodHollow,
  Encode,
}

const STAGE_COUNT: usize = 7;

impl PipelineStage {
  fn index(self) -> usize {
    match self {
      PipelineStage::Refine => 0,
      PipelineStage::Dispatch => 1,
      PipelineStage::Morphology => 2,
      PipelineStage::Smooth => 3,
      PipelineStage::CornerFill => 4,
      PipelineStage::FloodHollow => 5,
      PipelineStage::Encode => 6,
    }
  }
}

/// Per-stage voxel/block counts and timings collected over one
/// `build_blueprint` run.
#[derive(Debug, Clone)]
pub struct PipelineStats {
  /// Rolling window of timings in microseconds, indexed by [`PipelineStage::index`].
  stage_timings: [RollingWindow<u64>; STAGE_COUNT],
  /// Most recent timing per stage, for a quick one-shot summary.
  pub last_stage_us: [u64; STAGE_COUNT],

  /// Lattice points emitted by refinement.
  pub refined_points: u64,
  /// Voxels remaining after morphology.
  pub morphology_points: u64,
  /// Oriented blocks placed by smoothing (slopes and corners).
  pub oriented_blocks: u64,
  /// Voxels removed by flood-hollow.
  pub hollowed_voxels: u64,
  /// Final encoded payload size in bytes.
  pub encoded_bytes: u64,
}

impl Default for PipelineStats {
  fn default() -> Self {
    Self {
      stage_timings: std::array::from_fn(|_| RollingWindow::default()),
      last_stage_us: [0; STAGE_COUNT],
      refined_points: 0,
      morphology_points: 0,
      oriented_blocks: 0,
      hollowed_voxels: 0,
      encoded_bytes: 0,
    }
  }
}

impl PipelineStats {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn record_stage_timing(&mut self, stage: PipelineStage, timing_us: u64) {
    if !is_enabled() {
      return;
    }
    let idx = stage.index();
    self.stage_timings[idx].push(timing_us);
    self.last_stage_us[idx] = timing_us;
  }

  pub fn avg_stage_timing_us(&self, stage: PipelineStage) -> f64 {
    self.stage_timings[stage.index()].average()
  }

  pub fn total_us(&self) -> u64 {
    self.last_stage_us.iter().sum()
  }
}
