//! Pipeline orchestrator: runs refine → morphology → smooth → corner-fill →
//! flood-hollow → encode in order and hands back the finished payload
//! alongside a stats summary. This is the one public entry point most
//! callers need.

use std::collections::HashSet;
use std::time::Instant;

use crate::config::BlueprintConfig;
use crate::corners;
use crate::dispatch::{self, CancelToken};
use crate::encode::{self, EncodedBlueprint};
use crate::error::Result;
use crate::flood;
use crate::geom::{LatticePoint, Triangle, Vec3f};
use crate::grid::DenseGrid;
use crate::metrics::{PipelineStage, PipelineStats};
use crate::morphology;
use crate::refine;
use crate::smoother;
use crate::voxel::Cell;

/// The finished blueprint payload plus the grid dimensions it was encoded
/// from.
pub type BlueprintOutput = EncodedBlueprint;

/// Apply the configured axis remap/mirror to every triangle vertex ahead of
/// refinement. `dim_remap` is 1-based (axis `i` of the output takes its
/// value from axis `dim_remap[i] - 1` of the input).
fn transform_triangles(triangles: &[Triangle], config: &BlueprintConfig) -> Vec<Triangle> {
  let remap_vertex = |v: Vec3f| -> Vec3f {
    match config.dim_remap {
      Some(remap) => {
        let src = [v.x, v.y, v.z];
        Vec3f::new(
          src[remap[0] as usize - 1],
          src[remap[1] as usize - 1],
          src[remap[2] as usize - 1],
        )
      }
      None => v,
    }
  };

  triangles
    .iter()
    .map(|t| {
      let remapped = Triangle::new(remap_vertex(t.a), remap_vertex(t.b), remap_vertex(t.c));
      remapped.reflect(config.mirror[0], config.mirror[1], config.mirror[2])
    })
    .collect()
}

/// Run the full mesh-to-blueprint pipeline and return the encoded payload.
///
/// Validates `config` before touching `triangles`. An empty input (or an
/// input that refines to zero lattice points) yields the empty-payload
/// encoding rather than an error — [`crate::error::BlueprintError::EmptyMesh`]
/// never surfaces from this entry point.
pub fn build_blueprint(triangles: &[Triangle], config: &BlueprintConfig) -> Result<BlueprintOutput> {
  let (output, _stats) = build_blueprint_timed(triangles, config)?;
  Ok(output)
}

/// Same as [`build_blueprint`] but also returns per-stage timing and count
/// statistics.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pipeline::build_blueprint"))]
pub fn build_blueprint_timed(
  triangles: &[Triangle],
  config: &BlueprintConfig,
) -> Result<(BlueprintOutput, PipelineStats)> {
  config.validate()?;
  let mut stats = PipelineStats::new();

  if triangles.is_empty() {
    return Ok((encode::encode_empty(), stats));
  }

  let worker_count = rayon::current_num_threads();
  let parallel = !config.disable_multithreading;
  let cancel = CancelToken::new();

  let transformed = transform_triangles(triangles, config);

  let refine_start = Instant::now();
  let mut points: HashSet<LatticePoint> = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("refine", triangle_count = transformed.len()).entered();
    dispatch::dispatch_refine(&transformed, config.resolution, worker_count, parallel, &cancel, |chunk, res| {
      refine::refine_batch(chunk, res, config.batch_size)
    })
  };
  stats.record_stage_timing(PipelineStage::Refine, refine_start.elapsed().as_micros() as u64);
  stats.refined_points = points.len() as u64;

  if points.is_empty() {
    return Ok((encode::encode_empty(), stats));
  }

  if config.dilate_radius > 0 || config.erode_radius > 0 || config.shell_hollow_radius > 0 {
    let morph_start = Instant::now();
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!(
      "morphology",
      dilate = config.dilate_radius,
      erode = config.erode_radius,
      shell_hollow = config.shell_hollow_radius
    )
    .entered();

    if config.dilate_radius > 0 {
      let items: Vec<LatticePoint> = points.iter().copied().collect();
      points = dispatch::dispatch_set_op(&items, worker_count, parallel, &cancel, |chunk| {
        let chunk_set: HashSet<LatticePoint> = chunk.iter().copied().collect();
        morphology::dilate(&chunk_set, config.dilate_radius)
      });
    }
    if config.erode_radius > 0 {
      let reference = points.clone();
      let items: Vec<LatticePoint> = points.iter().copied().collect();
      points = dispatch::dispatch_set_op(&items, worker_count, parallel, &cancel, |chunk| {
        let chunk_set: HashSet<LatticePoint> = chunk.iter().copied().collect();
        morphology::erode(&chunk_set, config.erode_radius, &reference)
      });
    }
    if config.shell_hollow_radius > 0 {
      let reference = points.clone();
      let items: Vec<LatticePoint> = points.iter().copied().collect();
      points = dispatch::dispatch_set_op(&items, worker_count, parallel, &cancel, |chunk| {
        let chunk_set: HashSet<LatticePoint> = chunk.iter().copied().collect();
        morphology::shell_hollow(&chunk_set, config.shell_hollow_radius, &reference)
      });
    }
    stats.record_stage_timing(PipelineStage::Morphology, morph_start.elapsed().as_micros() as u64);
  }

  if points.is_empty() {
    return Ok((encode::encode_empty(), stats));
  }

  let mut voxels = if config.disable_smoothing {
    smoother::build_voxel_map(&points)
  } else {
    let smooth_start = Instant::now();
    let voxels = {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("smooth", aggressive = config.aggressive_smoothing).entered();
      smoother::smooth_surface(&points, config.aggressive_smoothing)
    };
    stats.record_stage_timing(PipelineStage::Smooth, smooth_start.elapsed().as_micros() as u64);
    voxels
  };

  if config.corner_blocks {
    let corner_start = Instant::now();
    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("corner_fill").entered();
      corners::fill_corners(&mut voxels);
    }
    stats.record_stage_timing(PipelineStage::CornerFill, corner_start.elapsed().as_micros() as u64);
  }
  stats.oriented_blocks = voxels.values().filter(|c| matches!(c, Cell::Oriented(_))).count() as u64;

  let mut grid = DenseGrid::from_voxel_map(&voxels)?;

  if config.flood_hollow {
    let flood_start = Instant::now();
    let before = grid.iter().filter(|(_, _, _, c)| c.is_some()).count();
    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("flood_hollow").entered();
      flood::flood_hollow(&mut grid, flood::spare_nothing);
    }
    let after = grid.iter().filter(|(_, _, _, c)| c.is_some()).count();
    stats.hollowed_voxels = before.saturating_sub(after) as u64;
    stats.record_stage_timing(PipelineStage::FloodHollow, flood_start.elapsed().as_micros() as u64);
  }

  let encode_start = Instant::now();
  let output = {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("encode").entered();
    encode::encode(&grid)?
  };
  stats.record_stage_timing(PipelineStage::Encode, encode_start.elapsed().as_micros() as u64);
  stats.encoded_bytes = output.bytes.len() as u64;

  Ok((output, stats))
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;
