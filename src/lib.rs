//! voxel_blueprint - mesh-to-voxel-blueprint geometry pipeline
//!
//! Takes a triangle mesh and turns it into an oriented-voxel blueprint ready
//! for a block-building game's binary container format: adaptive triangle
//! refinement onto an integer lattice, optional dilate/erode/shell-hollow
//! morphology, slope smoothing with corner-filling, optional interior
//! flood-hollowing, and a bit-masked block-record encoding.
//!
//! # Example
//!
//! ```ignore
//! use voxel_blueprint::{build_blueprint, BlueprintConfig};
//!
//! let triangles = voxel_blueprint::mesh_io::read_stl(std::fs::File::open("model.stl")?)?;
//! let output = build_blueprint(&triangles, &BlueprintConfig::default())?;
//! std::fs::write("model.blueprint", &output.bytes)?;
//! ```

pub mod geom;

pub mod error;
pub use error::{BlueprintError, Result};

pub mod refine;
pub use refine::{refine, refine_batch};

pub mod dispatch;
pub use dispatch::CancelToken;

pub mod morphology;

pub mod voxel;
pub use voxel::{BlockKind, Cell, CornerKind, Orientation, OrientedBlock, SlopeKind, VoxelMap};

pub mod smoother;

pub mod corners;

pub mod grid;
pub use grid::DenseGrid;

pub mod flood;

pub mod blockcode;

pub mod encode;
pub use encode::EncodedBlueprint;

pub mod config;
pub use config::BlueprintConfig;

pub mod metrics;

pub mod mesh_io;

pub mod pipeline;
pub use pipeline::{build_blueprint, build_blueprint_timed, BlueprintOutput};
