#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

pub mod emphasis;
pub mod hud;
pub mod line_pipeline;
pub mod scene;
