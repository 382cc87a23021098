//! Twistiness color scale.
//!
//! Piecewise-linear 4-segment rainbow, blue→cyan→green→yellow→red over
//! [0, 1]. Each segment moves exactly one channel, and both formulas at a
//! segment boundary yield the same color, so the ramp is continuous and
//! does not band. Out-of-range input is clamped, never extrapolated.

/// Map a twistiness value in [0,1] to linear RGB in [0,1]^3.
pub fn twistiness_color(value: f32) -> [f32; 3] {
    let v = value.clamp(0.0, 1.0);
    if v < 0.25 {
        // Blue to cyan: green rises
        [0.0, v * 4.0, 1.0]
    } else if v < 0.5 {
        // Cyan to green: blue falls
        [0.0, 1.0, 1.0 - (v - 0.25) * 4.0]
    } else if v < 0.75 {
        // Green to yellow: red rises
        [(v - 0.5) * 4.0, 1.0, 0.0]
    } else {
        // Yellow to red: green falls
        [1.0, 1.0 - (v - 0.75) * 4.0, 0.0]
    }
}

/// Convert a scale sample to 8-bit sRGB-ish bytes for UI swatches.
pub fn to_rgb8(rgb: [f32; 3]) -> [u8; 3] {
    [
        (rgb[0].clamp(0.0, 1.0) * 255.0 + 0.5) as u8,
        (rgb[1].clamp(0.0, 1.0) * 255.0 + 0.5) as u8,
        (rgb[2].clamp(0.0, 1.0) * 255.0 + 0.5) as u8,
    ]
}
