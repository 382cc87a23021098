//! Orbit camera with an eased look-at retarget animation.

use glam::{Mat4, Vec3};

/// Orbit camera: yaw/pitch/distance around a movable look-at target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Azimuth angle in radians.
    pub yaw: f32,
    /// Elevation angle in radians, clamped by the input layer.
    pub pitch: f32,
    /// Distance from target to eye.
    pub distance: f32,
    /// Look-at point in scene space.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clip plane.
    pub z_near: f32,
    /// Far clip plane.
    pub z_far: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.4,
            distance: 120.0,
            target: Vec3::ZERO,
            fov_y: 60f32.to_radians(),
            aspect: 1.6,
            z_near: 0.1,
            z_far: 2000.0,
        }
    }
}

impl OrbitCamera {
    /// Eye position derived from yaw/pitch/distance around the target.
    pub fn eye(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.yaw.cos() * self.pitch.cos(),
                self.distance * self.pitch.sin(),
                self.distance * self.yaw.sin() * self.pitch.cos(),
            )
    }

    /// Combined view-projection matrix (right-handed, depth 0..1).
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        let proj =
            Mat4::perspective_rh(self.fov_y, self.aspect.max(1e-3), self.z_near, self.z_far);
        proj * view
    }
}

/// Duration of a look-at retarget in seconds.
pub const RETARGET_SECS: f32 = 1.0;

/// Ease-out cubic: maximal velocity at t=0, decelerating smoothly to
/// zero at t=1 so the camera settles instead of snapping.
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

/// One in-flight look-at retarget.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Retarget {
    from: Vec3,
    to: Vec3,
    elapsed: f32,
    duration: f32,
}

impl Retarget {
    /// Advance by `dt` seconds; returns the interpolated target and
    /// whether the animation has finished.
    fn tick(&mut self, dt: f32) -> (Vec3, bool) {
        self.elapsed += dt.max(0.0);
        let t = if self.duration <= 0.0 { 1.0 } else { (self.elapsed / self.duration).min(1.0) };
        (self.from.lerp(self.to, ease_out_cubic(t)), t >= 1.0)
    }
}

/// Per-frame camera state: the orbit camera plus at most one retarget.
///
/// There is only ever one active animation and one thread driving it, so
/// overriding it from a later selection event needs no lock: `retarget`
/// simply replaces the animation, restarting from the camera's current
/// interpolated target rather than the previous destination, which keeps
/// the motion continuous.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// The orbit camera fed to both the renderer and the picker.
    pub camera: OrbitCamera,
    anim: Option<Retarget>,
}

impl CameraRig {
    /// Wrap a camera with no animation in flight.
    pub fn new(camera: OrbitCamera) -> Self {
        Self { camera, anim: None }
    }

    /// Begin an eased retarget toward `to`, cancelling any in-flight
    /// animation.
    pub fn retarget(&mut self, to: Vec3) {
        self.anim =
            Some(Retarget { from: self.camera.target, to, elapsed: 0.0, duration: RETARGET_SECS });
    }

    /// Advance the animation; invoked once per frame by the render loop.
    pub fn tick(&mut self, dt: f32) {
        if let Some(a) = self.anim.as_mut() {
            let (target, done) = a.tick(dt);
            self.camera.target = target;
            if done {
                self.anim = None;
            }
        }
    }

    /// True while a retarget is in flight.
    pub fn is_animating(&self) -> bool {
        self.anim.is_some()
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(OrbitCamera::default())
    }
}
