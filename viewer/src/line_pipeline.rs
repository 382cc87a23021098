//! wgpu pipeline for width-styled, vertex-colored polylines.
//!
//! Each polyline is drawn as one instanced quad per segment, extruded to
//! its pixel width in the vertex shader. Group 0 holds per-frame
//! globals (camera, viewport, lights); group 1 holds the per-line style
//! (opacity, width) so emphasis changes touch one small uniform.

use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::emphasis::LineStyle;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    viewport: [f32; 2],
    ambient: f32,
    light_strength: f32,
    light_dir: [f32; 3],
    _pad: f32,
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct StyleUniform {
    opacity: f32,
    width_px: f32,
    _pad: [f32; 2],
}

/// One line segment with per-endpoint colors; instanced by the pipeline.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SegmentInstance {
    /// Segment start in scene space.
    pub pos_a: [f32; 3],
    /// Color at the start.
    pub col_a: [f32; 3],
    /// Segment end in scene space.
    pub pos_b: [f32; 3],
    /// Color at the end.
    pub col_b: [f32; 3],
}

/// Scene light parameters, applied uniformly to all lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightParams {
    /// Flat base intensity.
    pub ambient: f32,
    /// Directional contribution scaled by segment orientation.
    pub strength: f32,
    /// Light direction (normalized in the shader).
    pub direction: Vec3,
}

impl Default for LightParams {
    fn default() -> Self {
        Self { ambient: 0.4, strength: 0.6, direction: Vec3::new(1.0, 1.0, 1.0) }
    }
}

pub struct LinePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group0: wgpu::BindGroup,
    uniform_buf: wgpu::Buffer,
    style_bgl: wgpu::BindGroupLayout,
    quad_index_buf: wgpu::Buffer,
}

impl LinePipeline {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let globals_init = Globals {
            view_proj: [[0.0; 4]; 4],
            viewport: [1.0, 1.0],
            ambient: 1.0,
            light_strength: 0.0,
            light_dir: [0.0, 1.0, 0.0],
            _pad: 0.0,
        };
        let uniform_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line globals"),
            contents: bytemuck::bytes_of(&globals_init),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("line bgl0 globals"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    min_binding_size: None,
                    has_dynamic_offset: false,
                },
                count: None,
            }],
        });

        let style_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("line bgl1 style"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    min_binding_size: None,
                    has_dynamic_offset: false,
                },
                count: None,
            }],
        });

        let bind_group0 = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("line bg0"),
            layout: &bgl0,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buf.as_entire_binding(),
            }],
        });

        let vert = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line vert"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.vert.wgsl").into()),
        });
        let frag = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line frag"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/line.frag.wgsl").into()),
        });

        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("line pl"),
            bind_group_layouts: &[&bgl0, &style_bgl],
            push_constant_ranges: &[],
        });

        let instance_layout = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SegmentInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                },
                wgpu::VertexAttribute {
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                },
                wgpu::VertexAttribute {
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 24,
                },
                wgpu::VertexAttribute {
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 36,
                },
            ],
        }];

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("line pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &vert,
                entry_point: "main",
                buffers: &instance_layout,
            },
            fragment: Some(wgpu::FragmentState {
                module: &frag,
                entry_point: "main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        // Two triangles covering the extruded segment quad
        let quad_index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line quad indices"),
            contents: bytemuck::cast_slice(&[0u32, 1, 2, 2, 1, 3]),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self { pipeline, bind_group0, uniform_buf, style_bgl, quad_index_buf }
    }

    pub fn update_globals(
        &self,
        queue: &wgpu::Queue,
        view_proj: [[f32; 4]; 4],
        viewport: [f32; 2],
        lights: LightParams,
    ) {
        let u = Globals {
            view_proj,
            viewport,
            ambient: lights.ambient,
            light_strength: lights.strength,
            light_dir: lights.direction.to_array(),
            _pad: 0.0,
        };
        queue.write_buffer(&self.uniform_buf, 0, bytemuck::bytes_of(&u));
    }
}

/// Segment list plus its style uniform; one per polyline or helper.
pub struct LineSet {
    instance_buf: wgpu::Buffer,
    instance_count: u32,
    style_buf: wgpu::Buffer,
    style_bg: wgpu::BindGroup,
}

impl LineSet {
    pub fn new(
        device: &wgpu::Device,
        pipeline: &LinePipeline,
        segments: &[SegmentInstance],
        style: LineStyle,
    ) -> Self {
        let instance_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line instances"),
            contents: bytemuck::cast_slice(segments),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let style_init =
            StyleUniform { opacity: style.opacity, width_px: style.width_px, _pad: [0.0; 2] };
        let style_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("line style"),
            contents: bytemuck::bytes_of(&style_init),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let style_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("line style bg"),
            layout: &pipeline.style_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: style_buf.as_entire_binding(),
            }],
        });
        Self { instance_buf, instance_count: segments.len() as u32, style_bg, style_buf }
    }

    pub fn write_style(&self, queue: &wgpu::Queue, style: LineStyle) {
        let u = StyleUniform { opacity: style.opacity, width_px: style.width_px, _pad: [0.0; 2] };
        queue.write_buffer(&self.style_buf, 0, bytemuck::bytes_of(&u));
    }

    pub fn draw<'a>(&'a self, pipeline: &'a LinePipeline, rpass: &mut wgpu::RenderPass<'a>) {
        if self.instance_count == 0 {
            return;
        }
        rpass.set_pipeline(&pipeline.pipeline);
        rpass.set_bind_group(0, &pipeline.bind_group0, &[]);
        rpass.set_bind_group(1, &self.style_bg, &[]);
        rpass.set_vertex_buffer(0, self.instance_buf.slice(..));
        rpass.set_index_buffer(pipeline.quad_index_buf.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..6, 0, 0..self.instance_count);
    }
}
