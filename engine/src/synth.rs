//! Deterministic placeholder dive generation.
//!
//! Used when no data source is reachable so the scene always has
//! something renderable. Dives are laid out on a ground grid and fall
//! into a few shape families by index (feeding loop, side roll, vertical
//! loop, plain dive). The exact waveform tuning is arbitrary; only the
//! record shape matters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dive::{Dive, PathPoint};

/// Parameters for the synthetic set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthParams {
    /// Number of dives to generate.
    pub count: usize,
    /// RNG seed; the same seed reproduces the same set.
    pub seed: u64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self { count: 128, seed: 12345 }
    }
}

/// Generate `params.count` placeholder dives.
pub fn synthesize(params: SynthParams) -> Vec<Dive> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut dives = Vec::with_capacity(params.count);
    for i in 0..params.count {
        let len = rng.gen_range(50usize..150);
        let max_depth = 5.0 + rng.gen::<f32>() * 30.0;
        let duration = 30.0 + rng.gen::<f32>() * 270.0;
        let start_x = (i % 10) as f32 * 10.0;
        let start_z = (i / 10) as f32 * 10.0;

        let mut path = Vec::with_capacity(len);
        let mut twistiness = Vec::with_capacity(len);
        for j in 0..len {
            let u = j as f32 / len as f32;
            let depth = max_depth * (u * std::f32::consts::PI).sin();
            let (dx, dz, twist) = if i % 10 == 0 {
                // Feeding loop
                let a = u * std::f32::consts::TAU;
                (a.sin() * 3.0, a.cos() * 3.0, 0.7 + (u * std::f32::consts::PI * 8.0).sin() * 0.3)
            } else if i % 7 == 0 {
                // Side roll
                let a = u * std::f32::consts::PI * 4.0;
                (a.sin() * 2.0, 0.0, 0.3 + a.sin().abs() * 0.7)
            } else if i % 5 == 0 {
                // Vertical loop
                let a = u * std::f32::consts::PI * 3.0;
                (0.0, a.sin() * 2.0, 0.4 + (u * std::f32::consts::PI * 6.0).sin().abs() * 0.6)
            } else {
                // Plain dive with mild jitter
                let a = u * std::f32::consts::PI;
                (a.sin(), a.cos(), 0.1 + rng.gen::<f32>() * 0.3)
            };
            path.push(PathPoint { x: start_x + dx, depth, z: start_z + dz });
            twistiness.push(twist.clamp(0.0, 1.0));
        }

        dives.push(Dive {
            id: i as u32 + 1,
            path,
            twistiness,
            max_depth_m: max_depth,
            duration_s: duration,
            start_time: String::new(),
        });
    }
    dives
}
