use engine::camera::{ease_out_cubic, CameraRig, OrbitCamera, RETARGET_SECS};
use glam::Vec3;

#[test]
fn ease_out_cubic_endpoints_and_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    // Clamped outside [0,1]
    assert_eq!(ease_out_cubic(-1.0), 0.0);
    assert_eq!(ease_out_cubic(2.0), 1.0);
    // Monotonic, decelerating: early progress outpaces late progress
    let early = ease_out_cubic(0.25);
    let late = 1.0 - ease_out_cubic(0.75);
    assert!(early > 0.25);
    assert!(late < 0.25);
}

#[test]
fn retarget_reaches_destination_and_stops() {
    let mut rig = CameraRig::default();
    let dest = Vec3::new(10.0, -5.0, 3.0);
    rig.retarget(dest);
    assert!(rig.is_animating());
    rig.tick(RETARGET_SECS * 2.0);
    assert_eq!(rig.camera.target, dest);
    assert!(!rig.is_animating());
    // Further ticks are inert
    rig.tick(1.0);
    assert_eq!(rig.camera.target, dest);
}

#[test]
fn override_restarts_from_current_position_without_jump() {
    let mut rig = CameraRig::default();
    rig.retarget(Vec3::new(10.0, 0.0, 0.0));
    rig.tick(RETARGET_SECS * 0.5);
    let mid = rig.camera.target;
    assert!(mid.x > 0.0 && mid.x < 10.0);

    // A new selection mid-animation restarts from the interpolated
    // position, not from where the previous animation was heading.
    rig.retarget(Vec3::new(0.0, 0.0, 20.0));
    rig.tick(0.0);
    assert_eq!(rig.camera.target, mid);

    rig.tick(RETARGET_SECS * 2.0);
    assert_eq!(rig.camera.target, Vec3::new(0.0, 0.0, 20.0));
}

#[test]
fn eye_orbits_the_target() {
    let mut cam = OrbitCamera { yaw: 0.0, pitch: 0.0, distance: 50.0, ..Default::default() };
    cam.target = Vec3::new(1.0, 2.0, 3.0);
    let eye = cam.eye();
    assert!(((eye - cam.target).length() - 50.0).abs() < 1e-4);
    assert!((eye.x - 51.0).abs() < 1e-4);
    assert!((eye.y - 2.0).abs() < 1e-4);
    assert!((eye.z - 3.0).abs() < 1e-4);
}

#[test]
fn view_proj_is_finite() {
    let cam = OrbitCamera::default();
    let m = cam.view_proj();
    assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
}
