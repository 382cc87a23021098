//! Dive viewer binary.
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::dbg_macro, clippy::large_enum_variant)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::mpsc;

use egui_wgpu::Renderer as EguiRenderer;
use egui_wgpu::ScreenDescriptor;
use egui_winit::State as EguiWinitState;
use glam::{Vec2, Vec3};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use engine::bus::{FramePort, SelectionBus};
use engine::dive::{Dive, DiveStore};
use engine::picking::{self, PICK_TOLERANCE_PX};
use engine::synth::SynthParams;

use viewer::hud::{HudResponse, HudState};
use viewer::scene::SceneManager;

/// Pointer travel below this many pixels between press and release is a
/// click; anything larger is an orbit drag.
const CLICK_SLOP_PX: f64 = 4.0;

struct GpuState<'w> {
    _instance: wgpu::Instance,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w Window) -> Self {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = match instance.create_surface(window) {
            Ok(s) => s,
            Err(e) => panic!("create surface: {e}"),
        };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap_or_else(|| panic!("no suitable GPU adapters"));

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .unwrap_or_else(|e| panic!("request device: {e}"));

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Self { _instance: instance, surface, device, queue, config }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }
}

/// Orbit input: RMB (or Alt+LMB) drag rotates, scroll zooms. Suppressed
/// while egui owns the pointer.
fn update_camera_from_input(
    ctx: &egui::Context,
    cam: &mut engine::camera::OrbitCamera,
    ui_hijacked: bool,
) {
    if ui_hijacked {
        return;
    }
    ctx.input(|i| {
        let dragging_rmb = i.pointer.button_down(egui::PointerButton::Secondary)
            || (i.modifiers.alt && i.pointer.button_down(egui::PointerButton::Primary));
        if dragging_rmb {
            let d = i.pointer.delta();
            let k = 0.005f32;
            cam.yaw -= d.x * k;
            cam.pitch -= d.y * k;
            let lim = core::f32::consts::FRAC_PI_2 - 0.017;
            cam.pitch = cam.pitch.clamp(-lim, lim);
        }
        let scroll = i.smooth_scroll_delta.y;
        if scroll.abs() > 0.0 {
            let factor = (-scroll * 0.0015).exp();
            cam.distance = (cam.distance * factor).clamp(20.0, 600.0);
        }
    });
}

fn main() {
    env_logger::init();

    let event_loop = EventLoop::new().unwrap_or_else(|e| panic!("event loop: {e}"));
    let title = format!("Dive Viewer v{}", engine::version());
    let window_init = WindowBuilder::new()
        .with_title(title)
        .build(&event_loop)
        .unwrap_or_else(|e| panic!("create window: {e}"));

    // Leak the window to obtain a 'static reference for the surface lifetime without unsafe.
    let window: &'static Window = Box::leak(Box::new(window_init));
    let mut gpu = pollster::block_on(GpuState::new(window));
    let egui_ctx = egui::Context::default();
    let mut egui_state =
        EguiWinitState::new(egui_ctx.clone(), egui::ViewportId::ROOT, &event_loop, None, None);
    let surface_format = gpu.config.format;
    let mut egui_renderer = EguiRenderer::new(&gpu.device, surface_format, None, 1);

    let scene = Rc::new(RefCell::new(SceneManager::new(&gpu.device, surface_format)));
    let hud = Rc::new(RefCell::new(HudState::default()));
    let bus = Rc::new(SelectionBus::new());

    // Subscribers in registration order: slider widgets, the frame port,
    // then the scene's emphasis/camera reaction.
    {
        let hud = Rc::clone(&hud);
        bus.subscribe(Box::new(move |sel| hud.borrow_mut().apply_selection(sel)));
    }
    let frame_port = FramePort::attach(&bus);
    {
        let scene = Rc::clone(&scene);
        bus.subscribe(Box::new(move |sel| {
            let mut s = scene.borrow_mut();
            s.set_emphasis(sel);
            if let Some(c) = sel.and_then(|i| s.centroid_of(i)) {
                s.rig.retarget(c);
            }
        }));
    }

    // One-shot asynchronous fetch: the scene renders empty until the
    // loader thread delivers a set, then `load` runs exactly once.
    let data_path = std::env::args().nth(1).map_or_else(|| PathBuf::from("data/dives.json"), PathBuf::from);
    let cache_path = data_path.with_extension("cache.json");
    let (load_tx, load_rx) = mpsc::channel::<Vec<Dive>>();
    std::thread::spawn(move || {
        let dives =
            engine::loader::load_or_synthesize(&data_path, Some(&cache_path), SynthParams::default());
        let _ = load_tx.send(dives);
    });
    let mut load_rx = Some(load_rx);
    let mut store = DiveStore::default();

    let mut cursor_px = Vec2::ZERO;
    let mut press_px: Option<Vec2> = None;
    let mut last_frame = std::time::Instant::now();
    let mut fps: f32 = 0.0;

    event_loop
        .run(move |event, elwt| {
            match event {
                Event::AboutToWait => {
                    window.request_redraw();
                }
                Event::WindowEvent { event, window_id } if window_id == window.id() => {
                    let egui_resp = egui_state.on_window_event(window, &event);
                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::Resized(size) => {
                            gpu.resize(size);
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            cursor_px = Vec2::new(position.x as f32, position.y as f32);
                        }
                        WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                            match state {
                                ElementState::Pressed => {
                                    press_px = Some(cursor_px);
                                }
                                ElementState::Released => {
                                    let was_click = press_px
                                        .take()
                                        .is_some_and(|p| {
                                            (p - cursor_px).length() as f64 <= CLICK_SLOP_PX
                                        });
                                    if was_click && !egui_resp.consumed {
                                        let viewport = Vec2::new(
                                            gpu.config.width as f32,
                                            gpu.config.height as f32,
                                        );
                                        let hit = {
                                            let s = scene.borrow();
                                            picking::pick_at(
                                                cursor_px,
                                                viewport,
                                                &s.rig.camera,
                                                s.geometries(),
                                                PICK_TOLERANCE_PX,
                                            )
                                        };
                                        // A miss is normal and leaves the
                                        // selection untouched.
                                        if let Some(i) = hit {
                                            bus.set_selection(Some(i));
                                        }
                                    }
                                }
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            // Completed one-shot load?
                            if let Some(rx) = load_rx.as_ref() {
                                if let Ok(dives) = rx.try_recv() {
                                    store = DiveStore::from_records(dives);
                                    scene.borrow_mut().load(&gpu.device, store.dives());
                                    if bus.selection().is_some_and(|i| i >= store.len()) {
                                        bus.set_selection(None);
                                    }
                                    load_rx = None;
                                }
                            }

                            let now = std::time::Instant::now();
                            let dt = now.duration_since(last_frame).as_secs_f32();
                            last_frame = now;
                            if dt > 0.0 {
                                fps = 0.9 * fps + 0.1 * (1.0 / dt);
                            }

                            let mut hud_resp = HudResponse::default();
                            let raw_input = egui_state.take_egui_input(window);
                            let full_output = egui_ctx.run(raw_input, |ctx| {
                                hud_resp = hud.borrow_mut().ui(
                                    ctx,
                                    store.dives(),
                                    store.dropped().len(),
                                    fps,
                                );
                                let mut s = scene.borrow_mut();
                                update_camera_from_input(
                                    ctx,
                                    &mut s.rig.camera,
                                    ctx.wants_pointer_input(),
                                );
                                if hud.borrow().auto_orbit {
                                    s.rig.camera.yaw += 0.15 * dt;
                                }
                                s.rig.tick(dt);
                            });

                            // Apply HUD requests with every borrow released,
                            // so bus notification can reach the scene and HUD.
                            if let Some(n) = hud_resp.slider_changed {
                                bus.set_selection(Some(n as usize - 1));
                            }
                            if hud_resp.reset_view {
                                scene.borrow_mut().rig.retarget(Vec3::ZERO);
                            }

                            // Outbound half of the cross-boundary channel: the
                            // embedding host drains and delivers these.
                            for msg in frame_port.drain_outbound() {
                                match serde_json::to_string(&msg) {
                                    Ok(json) => log::debug!("[frame] outbound {json}"),
                                    Err(e) => log::warn!("[frame] outbound encode: {e}"),
                                }
                            }

                            for (id, image_delta) in &full_output.textures_delta.set {
                                egui_renderer.update_texture(
                                    &gpu.device,
                                    &gpu.queue,
                                    *id,
                                    image_delta,
                                );
                            }
                            for id in &full_output.textures_delta.free {
                                egui_renderer.free_texture(id);
                            }
                            let ppp = window.scale_factor() as f32;
                            let paint_jobs = egui_ctx.tessellate(full_output.shapes, ppp);

                            let frame = match gpu.surface.get_current_texture() {
                                Ok(f) => f,
                                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                    gpu.resize(window.inner_size());
                                    return;
                                }
                                Err(wgpu::SurfaceError::OutOfMemory) => {
                                    elwt.exit();
                                    return;
                                }
                                Err(wgpu::SurfaceError::Timeout) => {
                                    return;
                                }
                            };
                            let view = frame
                                .texture
                                .create_view(&wgpu::TextureViewDescriptor::default());
                            let mut encoder = gpu.device.create_command_encoder(
                                &wgpu::CommandEncoderDescriptor { label: Some("encoder") },
                            );

                            {
                                let mut s = scene.borrow_mut();
                                s.prepare(
                                    &gpu.queue,
                                    [gpu.config.width as f32, gpu.config.height as f32],
                                );
                                let mut rpass =
                                    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                        label: Some("scene pass"),
                                        color_attachments: &[Some(
                                            wgpu::RenderPassColorAttachment {
                                                view: &view,
                                                resolve_target: None,
                                                ops: wgpu::Operations {
                                                    load: wgpu::LoadOp::Clear(wgpu::Color {
                                                        r: 0.02,
                                                        g: 0.02,
                                                        b: 0.04,
                                                        a: 1.0,
                                                    }),
                                                    store: wgpu::StoreOp::Store,
                                                },
                                            },
                                        )],
                                        depth_stencil_attachment: None,
                                        occlusion_query_set: None,
                                        timestamp_writes: None,
                                    });
                                s.draw(&mut rpass);
                            }

                            let screen_desc = ScreenDescriptor {
                                size_in_pixels: [gpu.config.width, gpu.config.height],
                                pixels_per_point: ppp,
                            };
                            egui_renderer.update_buffers(
                                &gpu.device,
                                &gpu.queue,
                                &mut encoder,
                                &paint_jobs,
                                &screen_desc,
                            );

                            {
                                let mut rpass =
                                    encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                                        label: Some("egui pass"),
                                        color_attachments: &[Some(
                                            wgpu::RenderPassColorAttachment {
                                                view: &view,
                                                resolve_target: None,
                                                ops: wgpu::Operations {
                                                    load: wgpu::LoadOp::Load,
                                                    store: wgpu::StoreOp::Store,
                                                },
                                            },
                                        )],
                                        depth_stencil_attachment: None,
                                        occlusion_query_set: None,
                                        timestamp_writes: None,
                                    });
                                egui_renderer.render(&mut rpass, &paint_jobs, &screen_desc);
                            }
                            gpu.queue.submit(std::iter::once(encoder.finish()));
                            frame.present();

                            egui_state
                                .handle_platform_output(window, full_output.platform_output);
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        })
        .unwrap_or_else(|e| panic!("run app: {e}"));
}
