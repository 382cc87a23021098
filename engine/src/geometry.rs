//! Dive → renderable polyline conversion.

use crate::colorscale::twistiness_color;
use crate::dive::{DataShapeError, Dive};

/// Render-space polyline derived from one dive.
///
/// Positions carry the one-time depth-inversion transform (deeper = more
/// negative y); the source record is never mutated. Colors are parallel
/// to positions, one twistiness sample each.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryGeometry {
    /// Index of the source dive within its store.
    pub dive_index: usize,
    /// Render-space positions, one per path point.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex linear RGB from the twistiness scale.
    pub colors: Vec<[f32; 3]>,
    /// Arithmetic mean of `positions`; the camera retarget anchor.
    pub centroid: [f32; 3],
}

/// Build render geometry for one dive. O(path length), single pass.
///
/// A path shorter than 2 points cannot form a line and is rejected here
/// rather than rendered as a stray dot at the grid origin.
pub fn build(dive: &Dive, dive_index: usize) -> Result<TrajectoryGeometry, DataShapeError> {
    dive.validate()?;
    let n = dive.path.len();
    let mut positions = Vec::with_capacity(n);
    let mut colors = Vec::with_capacity(n);
    let mut sum = [0.0f64; 3];
    for (p, &t) in dive.path.iter().zip(dive.twistiness.iter()) {
        let pos = [p.x, -p.depth, p.z];
        sum[0] += pos[0] as f64;
        sum[1] += pos[1] as f64;
        sum[2] += pos[2] as f64;
        positions.push(pos);
        colors.push(twistiness_color(t));
    }
    let inv = 1.0 / n as f64;
    let centroid = [(sum[0] * inv) as f32, (sum[1] * inv) as f32, (sum[2] * inv) as f32];
    Ok(TrajectoryGeometry { dive_index, positions, colors, centroid })
}

/// Build geometries for a whole dive slice.
///
/// Dives that fail validation are skipped and logged; the result indexes
/// surviving dives by their position in `dives`.
pub fn build_all(dives: &[Dive]) -> Vec<TrajectoryGeometry> {
    let mut out = Vec::with_capacity(dives.len());
    for (i, d) in dives.iter().enumerate() {
        match build(d, i) {
            Ok(g) => out.push(g),
            Err(e) => log::warn!("[geometry] dropping dive {}: {}", d.id, e),
        }
    }
    out
}
