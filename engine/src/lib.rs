//! Dive-trajectory engine crate: data model, color scale, render
//! geometry, orbit camera, picking, and the selection bus.
//! CPU only; the viewer crate owns the GPU and the window.
#![deny(missing_docs)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod bus;
pub mod camera;
pub mod colorscale;
pub mod dive;
pub mod geometry;
pub mod loader;
pub mod picking;
pub mod synth;

/// Returns the engine version string from Cargo metadata.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_semver_like() {
        assert!(version().split('.').count() >= 3);
    }
}
