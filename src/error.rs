//! Typed error taxonomy for the blueprint pipeline.

/// Every way a call into this crate's public entry points can fail.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BlueprintError {
  #[error("resolution must be positive, got {0}")]
  InvalidResolution(f64),

  #[error("mesh contains no triangles")]
  EmptyMesh,

  #[error("dimension remap {0:?} is not a permutation of {{1, 2, 3}}")]
  InvalidDimRemap(Vec<u8>),

  #[error("invalid block class byte {0:#04x}")]
  InvalidClass(u8),

  #[error("morphology radius must be non-negative, got {0}")]
  InvalidMorphology(i64),

  #[error("internal invariant violated: {0}")]
  InternalInvariant(&'static str),

  #[error("mesh I/O error: {0}")]
  MeshIo(String),
}

impl From<std::io::Error> for BlueprintError {
  fn from(e: std::io::Error) -> Self {
    BlueprintError::MeshIo(e.to_string())
  }
}

pub type Result<T> = std::result::Result<T, BlueprintError>;
