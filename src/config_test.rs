use super::*;

#[test]
fn default_config_is_valid() {
  assert!(BlueprintConfig::default().validate().is_ok());
}

#[test]
fn non_positive_resolution_is_rejected() {
  let mut cfg = BlueprintConfig::default();
  cfg.resolution = 0.0;
  assert!(matches!(cfg.validate(), Err(BlueprintError::InvalidResolution(_))));

  cfg.resolution = -1.0;
  assert!(matches!(cfg.validate(), Err(BlueprintError::InvalidResolution(_))));
}

#[test]
fn non_permutation_dim_remap_is_rejected() {
  let mut cfg = BlueprintConfig::default();
  cfg.dim_remap = Some([1, 1, 3]);
  assert!(matches!(cfg.validate(), Err(BlueprintError::InvalidDimRemap(_))));
}

#[test]
fn valid_dim_remap_permutation_is_accepted() {
  let mut cfg = BlueprintConfig::default();
  cfg.dim_remap = Some([3, 1, 2]);
  assert!(cfg.validate().is_ok());
}

#[test]
fn negative_dilate_radius_is_rejected() {
  let mut cfg = BlueprintConfig::default();
  cfg.dilate_radius = -1;
  assert!(matches!(cfg.validate(), Err(BlueprintError::InvalidMorphology(_))));
}

#[test]
fn negative_shell_hollow_radius_is_rejected() {
  let mut cfg = BlueprintConfig::default();
  cfg.shell_hollow_radius = -1;
  assert!(matches!(cfg.validate(), Err(BlueprintError::InvalidMorphology(_))));
}
