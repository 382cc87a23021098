//! Screen-space polyline picking.
//!
//! A pointer hit is resolved by projecting every trajectory segment
//! through the current camera and measuring the pixel distance from the
//! pointer to the projected segment. The tolerance radius makes the
//! zero-measure line pickable. When several trajectories fall inside the
//! radius the nearest projected depth wins, which keeps the choice
//! deterministic for overlapping trajectories.

use glam::{Mat4, Vec2, Vec4};

use crate::camera::OrbitCamera;
use crate::geometry::TrajectoryGeometry;

/// Default hit tolerance in physical pixels.
pub const PICK_TOLERANCE_PX: f32 = 8.0;

/// Project a scene-space point to (pixel position, NDC depth).
/// Returns None for points at or behind the eye plane.
fn project(view_proj: &Mat4, p: [f32; 3], viewport_px: Vec2) -> Option<(Vec2, f32)> {
    let clip = *view_proj * Vec4::new(p[0], p[1], p[2], 1.0);
    if clip.w <= 1e-6 {
        return None;
    }
    let ndc = clip / clip.w;
    let px = Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport_px.x,
        (1.0 - (ndc.y * 0.5 + 0.5)) * viewport_px.y,
    );
    Some((px, ndc.z))
}

/// Pixel distance from `p` to segment `ab`, with the interpolation
/// factor of the closest approach.
fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> (f32, f32) {
    let ab = b - a;
    let len2 = ab.length_squared();
    let t = if len2 <= f32::EPSILON { 0.0 } else { ((p - a).dot(ab) / len2).clamp(0.0, 1.0) };
    ((a + ab * t - p).length(), t)
}

/// Resolve a pointer position to a dive index.
///
/// Returns `None` when no segment's closest approach falls within
/// `tolerance_px`. A miss is a normal outcome, not an error, and mutates
/// nothing. Each vertex is projected exactly once, so the scan is linear
/// in total path length.
pub fn pick_at(
    pointer_px: Vec2,
    viewport_px: Vec2,
    camera: &OrbitCamera,
    geometries: &[TrajectoryGeometry],
    tolerance_px: f32,
) -> Option<usize> {
    let vp = camera.view_proj();
    let mut best: Option<(usize, f32)> = None;
    for geom in geometries {
        let mut prev: Option<(Vec2, f32)> = None;
        for &pos in &geom.positions {
            let cur = project(&vp, pos, viewport_px);
            if let (Some((pa, za)), Some((pb, zb))) = (prev, cur) {
                let (d, t) = point_segment_distance(pointer_px, pa, pb);
                if d <= tolerance_px {
                    let depth = za + (zb - za) * t;
                    let closer = match best {
                        None => true,
                        Some((_, best_depth)) => depth < best_depth,
                    };
                    if closer {
                        best = Some((geom.dive_index, depth));
                    }
                }
            }
            prev = cur;
        }
    }
    best.map(|(i, _)| i)
}
