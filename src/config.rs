//! Pipeline configuration: every optional knob `build_blueprint` accepts,
//! collected into one validated aggregate instead of threaded as separate
//! parameters through every stage.

use crate::error::{BlueprintError, Result};
use crate::refine::DEFAULT_BATCH_SIZE;

/// Every tunable the pipeline accepts, mirroring the CLI-adjacent knobs the
/// external collaborator exposes (dimension remap/mirror, morphology radii,
/// hollow radius, smoothing/corner toggles, parallelism, batch size).
#[derive(Debug, Clone, PartialEq)]
pub struct BlueprintConfig {
  /// Units per lattice step; must be strictly positive.
  pub resolution: f64,

  /// Optional permutation of axes `{1, 2, 3}` applied to every vertex before
  /// refinement, e.g. `[2, 1, 3]` swaps X and Y. `None` is the identity.
  pub dim_remap: Option<[u8; 3]>,

  /// Which axes (by 1-based index) to mirror through the origin before
  /// refinement.
  pub mirror: [bool; 3],

  /// Morphological dilate radius applied to the refined point set before
  /// smoothing; `0` is a no-op.
  pub dilate_radius: i64,

  /// Morphological erode radius; `0` is a no-op.
  pub erode_radius: i64,

  /// Shell-hollow radius applied ahead of smoothing; `0` is a no-op.
  pub shell_hollow_radius: i64,

  /// Skip slope smoothing entirely, leaving every voxel a full cube.
  pub disable_smoothing: bool,

  /// Run the smoother in aggressive mode, placing slopes even where doing
  /// so creates an otherwise-skipped interior corner.
  pub aggressive_smoothing: bool,

  /// Run the corner-filling pass after smoothing.
  pub corner_blocks: bool,

  /// Run flood-fill hollowing over the final grid before encoding.
  pub flood_hollow: bool,

  /// Disable the rayon-backed dispatcher, forcing every parallelizable
  /// stage onto the calling thread.
  pub disable_multithreading: bool,

  /// Triangles accumulated between refinement's dedup-and-flush passes.
  pub batch_size: usize,
}

impl Default for BlueprintConfig {
  fn default() -> Self {
    Self {
      resolution: 1.0,
      dim_remap: None,
      mirror: [false, false, false],
      dilate_radius: 0,
      erode_radius: 0,
      shell_hollow_radius: 0,
      disable_smoothing: false,
      aggressive_smoothing: false,
      corner_blocks: true,
      flood_hollow: true,
      disable_multithreading: false,
      batch_size: DEFAULT_BATCH_SIZE,
    }
  }
}

impl BlueprintConfig {
  /// Reject configurations `build_blueprint` cannot act on.
  pub fn validate(&self) -> Result<()> {
    if !(self.resolution > 0.0) {
      return Err(BlueprintError::InvalidResolution(self.resolution));
    }
    if let Some(remap) = self.dim_remap {
      let mut sorted = remap;
      sorted.sort_unstable();
      if sorted != [1, 2, 3] {
        return Err(BlueprintError::InvalidDimRemap(remap.to_vec()));
      }
    }
    if self.dilate_radius < 0 || self.erode_radius < 0 || self.shell_hollow_radius < 0 {
      let bad = [self.dilate_radius, self.erode_radius, self.shell_hollow_radius]
        .into_iter()
        .find(|&r| r < 0)
        .unwrap();
      return Err(BlueprintError::InvalidMorphology(bad));
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
