//! Integer-ball morphology: dilate, erode, and the inverted-erosion "shell
//! hollow" pass used ahead of slope smoothing.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::geom::Vec3i;

/// All integer offsets within `radius` of the origin under the Euclidean
/// norm, i.e. a discrete ball. Cached per radius since the same radius is
/// reused across every point in a dilate/erode/hollow call.
pub fn ball(radius: i64) -> &'static [Vec3i] {
  static CACHE: OnceLock<std::sync::Mutex<std::collections::HashMap<i64, &'static [Vec3i]>>> = OnceLock::new();
  let cache = CACHE.get_or_init(|| std::sync::Mutex::new(std::collections::HashMap::new()));

  let mut guard = cache.lock().expect("ball cache mutex poisoned");
  if let Some(existing) = guard.get(&radius) {
    return existing;
  }

  let r = radius.max(0);
  let mut pts = Vec::new();
  for x in -r..=r {
    for y in -r..=r {
      for z in -r..=r {
        let norm = ((x * x + y * y + z * z) as f64).sqrt();
        if norm <= r as f64 {
          pts.push(Vec3i::new(x, y, z));
        }
      }
    }
  }
  let leaked: &'static [Vec3i] = Vec::leak(pts);
  guard.insert(radius, leaked);
  leaked
}

/// Grow `pts` to include every point within `radius` of some member.
///
/// A radius-0 ball contains only the origin, so dilation is a no-op.
pub fn dilate(pts: &HashSet<Vec3i>, radius: i64) -> HashSet<Vec3i> {
  let brush = ball(radius);
  if brush.len() <= 1 {
    return pts.clone();
  }

  let mut out = HashSet::with_capacity(pts.len() * 2);
  for &p in pts {
    for &b in brush {
      out.insert(p + b);
    }
  }
  out.extend(pts.iter().copied());
  out
}

/// Shrink `pts` to only those whose entire `radius`-ball lies within
/// `all_pts` (the reference surface the erosion test is evaluated against).
pub fn erode(pts: &HashSet<Vec3i>, radius: i64, all_pts: &HashSet<Vec3i>) -> HashSet<Vec3i> {
  let brush = ball(radius);
  if brush.len() <= 1 {
    return pts.clone();
  }

  pts
    .iter()
    .copied()
    .filter(|&p| brush.iter().all(|&b| all_pts.contains(&(p + b))))
    .collect()
}

/// Inverted erosion: keep exactly the points that would have *failed* the
/// erosion test against `all_pts`, i.e. the points lying within `radius` of
/// the surface boundary. Used to peel an outer shell of thickness `radius`
/// ahead of smoothing, rather than eroding the interior away.
pub fn shell_hollow(pts: &HashSet<Vec3i>, radius: i64, all_pts: &HashSet<Vec3i>) -> HashSet<Vec3i> {
  let brush = ball(radius);
  if brush.len() <= 1 {
    return pts.clone();
  }

  pts
    .iter()
    .copied()
    .filter(|&p| brush.iter().any(|&b| !all_pts.contains(&(p + b))))
    .collect()
}

#[cfg(test)]
#[path = "morphology_test.rs"]
mod morphology_test;
