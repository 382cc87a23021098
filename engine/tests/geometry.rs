use engine::dive::{DataShapeError, Dive, PathPoint};
use engine::geometry;

fn dive_with(id: u32, points: &[(f32, f32, f32)], twist: &[f32]) -> Dive {
    Dive {
        id,
        path: points.iter().map(|&(x, depth, z)| PathPoint { x, depth, z }).collect(),
        twistiness: twist.to_vec(),
        max_depth_m: 0.0,
        duration_s: 0.0,
        start_time: String::new(),
    }
}

#[test]
fn buffers_match_path_length_and_depth_is_inverted() {
    let d = dive_with(
        1,
        &[(0.0, 0.0, 0.0), (1.0, 5.0, 0.0), (2.0, 10.0, 1.0)],
        &[0.0, 0.5, 1.0],
    );
    let g = geometry::build(&d, 0).expect("valid dive");
    assert_eq!(g.positions.len(), 3);
    assert_eq!(g.colors.len(), 3);
    assert_eq!(g.dive_index, 0);
    // Depth sign inverted into y, x/z untouched
    assert_eq!(g.positions[1], [1.0, -5.0, 0.0]);
    assert_eq!(g.positions[2], [2.0, -10.0, 1.0]);
}

#[test]
fn centroid_is_mean_of_render_positions() {
    let d = dive_with(2, &[(0.0, 0.0, 0.0), (2.0, 4.0, 6.0)], &[0.0, 0.0]);
    let g = geometry::build(&d, 0).expect("valid dive");
    assert_eq!(g.centroid, [1.0, -2.0, 3.0]);
}

#[test]
fn colors_follow_the_scale() {
    let d = dive_with(3, &[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0)], &[0.0, 1.0]);
    let g = geometry::build(&d, 0).expect("valid dive");
    assert_eq!(g.colors[0], [0.0, 0.0, 1.0]);
    assert_eq!(g.colors[1], [1.0, 0.0, 0.0]);
}

#[test]
fn short_path_is_rejected() {
    let d = dive_with(7, &[(0.0, 0.0, 0.0)], &[0.2]);
    let err = geometry::build(&d, 0).expect_err("one point cannot form a line");
    assert_eq!(err, DataShapeError::PathTooShort { id: 7, len: 1 });
}

#[test]
fn length_mismatch_is_rejected() {
    let d = dive_with(8, &[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0)], &[0.2]);
    let err = geometry::build(&d, 0).expect_err("mismatched twistiness");
    assert_eq!(err, DataShapeError::LengthMismatch { id: 8, path_len: 2, twist_len: 1 });
}

#[test]
fn build_all_skips_malformed_dives() {
    let good = dive_with(1, &[(0.0, 0.0, 0.0), (1.0, 1.0, 0.0)], &[0.0, 0.5]);
    let bad = dive_with(2, &[], &[]);
    let also_good = dive_with(3, &[(0.0, 1.0, 0.0), (0.0, 2.0, 0.0)], &[0.1, 0.9]);
    let out = geometry::build_all(&[good, bad, also_good]);
    assert_eq!(out.len(), 2);
    // Indices refer to positions in the input slice, not compacted
    assert_eq!(out[0].dive_index, 0);
    assert_eq!(out[1].dive_index, 2);
}
