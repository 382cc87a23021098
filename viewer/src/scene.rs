//! Scene manager: camera rig, lights, helper geometry, and the live set
//! of trajectory renderables.
//!
//! The trajectory set is owned exclusively here and rebuilt wholesale on
//! every `load`; dive counts are small and loads are rare, so there is
//! no incremental patching. Emphasis state is applied lazily: the bus
//! subscriber records the change, `prepare` flushes the style uniforms
//! on the next frame.

use engine::camera::CameraRig;
use engine::dive::Dive;
use engine::geometry::{self, TrajectoryGeometry};
use glam::Vec3;

use crate::emphasis::{self, LineStyle};
use crate::line_pipeline::{LightParams, LinePipeline, LineSet, SegmentInstance};

/// Grid helper extent in scene units.
const GRID_SIZE: f32 = 100.0;
/// Grid helper line count per axis.
const GRID_DIVISIONS: u32 = 20;
/// Axes helper length.
const AXES_LEN: f32 = 5.0;

const GRID_COLOR: [f32; 3] = [0.13, 0.13, 0.13];
const GRID_CENTER_COLOR: [f32; 3] = [0.27, 0.27, 0.27];
const GRID_STYLE: LineStyle = LineStyle { opacity: 1.0, width_px: 1.0 };

pub struct SceneManager {
    pipeline: LinePipeline,
    geometries: Vec<TrajectoryGeometry>,
    trajectories: Vec<LineSet>,
    grid: LineSet,
    axes: LineSet,
    emphasis: Option<usize>,
    styles_dirty: bool,
    /// Orbit camera plus the eased retarget animation.
    pub rig: CameraRig,
    /// Scene lights, uniform across all lines.
    pub lights: LightParams,
}

impl SceneManager {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let pipeline = LinePipeline::new(device, surface_format);
        let grid = LineSet::new(device, &pipeline, &grid_segments(), GRID_STYLE);
        let axes = LineSet::new(device, &pipeline, &axes_segments(), GRID_STYLE);
        Self {
            pipeline,
            geometries: Vec::new(),
            trajectories: Vec::new(),
            grid,
            axes,
            emphasis: None,
            styles_dirty: false,
            rig: CameraRig::default(),
            lights: LightParams::default(),
        }
    }

    /// Rebuild the renderable set from scratch.
    ///
    /// Malformed dives are dropped individually inside the geometry
    /// builder (each id logged); the swap is all-or-nothing so a frame
    /// never observes a partially built set. An emphasis index that no
    /// longer exists is cleared.
    pub fn load(&mut self, device: &wgpu::Device, dives: &[Dive]) {
        let geometries = geometry::build_all(dives);
        if self.emphasis.is_some_and(|i| i >= dives.len()) {
            self.emphasis = None;
        }
        let mut trajectories = Vec::with_capacity(geometries.len());
        for geom in &geometries {
            let style = emphasis::style_for(geom.dive_index, self.emphasis);
            trajectories.push(LineSet::new(
                device,
                &self.pipeline,
                &trajectory_segments(geom),
                style,
            ));
        }
        log::info!(
            "[scene] loaded {} of {} dives ({} segments)",
            geometries.len(),
            dives.len(),
            geometries.iter().map(|g| g.positions.len().saturating_sub(1)).sum::<usize>()
        );
        self.geometries = geometries;
        self.trajectories = trajectories;
        self.styles_dirty = true;
    }

    /// Move the visual emphasis to `selected` (`None` = uniform
    /// baseline). Idempotent; the uniforms are written on the next
    /// `prepare`.
    pub fn set_emphasis(&mut self, selected: Option<usize>) {
        self.emphasis = selected;
        self.styles_dirty = true;
    }

    /// Current emphasis index.
    pub fn emphasis(&self) -> Option<usize> {
        self.emphasis
    }

    /// Geometries for the picker, indexed by dive.
    pub fn geometries(&self) -> &[TrajectoryGeometry] {
        &self.geometries
    }

    /// Centroid of the trajectory for `dive_index`, if it was renderable.
    pub fn centroid_of(&self, dive_index: usize) -> Option<Vec3> {
        self.geometries
            .iter()
            .find(|g| g.dive_index == dive_index)
            .map(|g| Vec3::from_array(g.centroid))
    }

    /// Number of renderable trajectories.
    pub fn trajectory_count(&self) -> usize {
        self.trajectories.len()
    }

    /// Per-frame upload: camera globals and any pending style changes.
    pub fn prepare(&mut self, queue: &wgpu::Queue, viewport_px: [f32; 2]) {
        self.rig.camera.aspect = viewport_px[0] / viewport_px[1].max(1.0);
        self.pipeline.update_globals(
            queue,
            self.rig.camera.view_proj().to_cols_array_2d(),
            viewport_px,
            self.lights,
        );
        if self.styles_dirty {
            for (set, geom) in self.trajectories.iter().zip(self.geometries.iter()) {
                set.write_style(queue, emphasis::style_for(geom.dive_index, self.emphasis));
            }
            self.styles_dirty = false;
        }
    }

    /// Record all draw calls into an open render pass.
    pub fn draw<'a>(&'a self, rpass: &mut wgpu::RenderPass<'a>) {
        self.grid.draw(&self.pipeline, rpass);
        self.axes.draw(&self.pipeline, rpass);
        for set in &self.trajectories {
            set.draw(&self.pipeline, rpass);
        }
    }
}

fn trajectory_segments(geom: &TrajectoryGeometry) -> Vec<SegmentInstance> {
    let mut segments = Vec::with_capacity(geom.positions.len().saturating_sub(1));
    for i in 0..geom.positions.len().saturating_sub(1) {
        segments.push(SegmentInstance {
            pos_a: geom.positions[i],
            col_a: geom.colors[i],
            pos_b: geom.positions[i + 1],
            col_b: geom.colors[i + 1],
        });
    }
    segments
}

fn grid_segments() -> Vec<SegmentInstance> {
    let half = GRID_SIZE * 0.5;
    let step = GRID_SIZE / GRID_DIVISIONS as f32;
    let mut segments = Vec::with_capacity((GRID_DIVISIONS as usize + 1) * 2);
    for i in 0..=GRID_DIVISIONS {
        let k = -half + i as f32 * step;
        let color = if i == GRID_DIVISIONS / 2 { GRID_CENTER_COLOR } else { GRID_COLOR };
        segments.push(SegmentInstance {
            pos_a: [k, 0.0, -half],
            col_a: color,
            pos_b: [k, 0.0, half],
            col_b: color,
        });
        segments.push(SegmentInstance {
            pos_a: [-half, 0.0, k],
            col_a: color,
            pos_b: [half, 0.0, k],
            col_b: color,
        });
    }
    segments
}

fn axes_segments() -> Vec<SegmentInstance> {
    let axes = [
        ([AXES_LEN, 0.0, 0.0], [1.0, 0.2, 0.2]),
        ([0.0, AXES_LEN, 0.0], [0.2, 1.0, 0.2]),
        ([0.0, 0.0, AXES_LEN], [0.2, 0.4, 1.0]),
    ];
    axes.iter()
        .map(|&(end, color)| SegmentInstance {
            pos_a: [0.0; 3],
            col_a: color,
            pos_b: end,
            col_b: color,
        })
        .collect()
}
