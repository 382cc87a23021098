//! egui HUD: dive slider, selection readout, twistiness legend, and
//! view controls.

use engine::colorscale;
use engine::dive::Dive;

/// HUD widget state, updated by the bus subscriber and by user input.
pub struct HudState {
    /// HUD panel visibility (toggled with H).
    pub show_hud: bool,
    /// Slider position as a 1-based dive number.
    pub slider_value: u32,
    /// Slow yaw drift while enabled.
    pub auto_orbit: bool,
    /// Mirror of the bus selection (0-based).
    pub selected: Option<usize>,
}

impl Default for HudState {
    fn default() -> Self {
        Self { show_hud: true, slider_value: 1, auto_orbit: false, selected: None }
    }
}

/// What the HUD asked for this frame; applied by the caller after the
/// egui pass so no component is borrowed during bus notification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HudResponse {
    /// Slider moved to this 1-based dive number.
    pub slider_changed: Option<u32>,
    /// Reset-view button pressed.
    pub reset_view: bool,
}

impl HudState {
    /// Reflect a bus selection change into the widgets.
    pub fn apply_selection(&mut self, selected: Option<usize>) {
        self.selected = selected;
        if let Some(i) = selected {
            self.slider_value = i as u32 + 1;
        }
    }

    /// Build the HUD for one frame.
    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        dives: &[Dive],
        dropped: usize,
        fps: f32,
    ) -> HudResponse {
        if ctx.input(|i| i.key_pressed(egui::Key::H)) {
            self.show_hud = !self.show_hud;
        }

        let mut response = HudResponse::default();
        egui::TopBottomPanel::top("hud").show_animated(ctx, self.show_hud, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label("Click a dive to select it  |  RMB drag: orbit  |  Scroll: zoom  |  H: HUD");
                ui.separator();
                ui.label(format!("dives={}  FPS: {:.0}", dives.len(), fps));
                if dropped > 0 {
                    ui.separator();
                    ui.label(format!("{dropped} malformed dive(s) dropped"));
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                if dives.is_empty() {
                    ui.label("Loading dives…");
                } else {
                    let max = dives.len() as u32;
                    self.slider_value = self.slider_value.clamp(1, max);
                    let slider =
                        egui::Slider::new(&mut self.slider_value, 1..=max).text("Dive");
                    if ui.add(slider).changed() {
                        response.slider_changed = Some(self.slider_value);
                    }
                    match self.selected.and_then(|i| dives.get(i)) {
                        Some(d) => ui.label(format!(
                            "Dive {}  max depth {:.1} m  duration {:.0} s",
                            self.selected.map_or(0, |i| i + 1),
                            d.max_depth_m,
                            d.duration_s
                        )),
                        None => ui.label("No dive selected"),
                    };
                }
            });
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Reset view").clicked() {
                    response.reset_view = true;
                }
                ui.checkbox(&mut self.auto_orbit, "Auto-orbit");
                ui.separator();
                legend(ui);
            });
        });
        response
    }
}

/// Horizontal twistiness gradient with Low/Medium/High labels, sampled
/// from the same scale that colors the trajectories.
fn legend(ui: &mut egui::Ui) {
    ui.label("Twistiness:");
    let (rect, _) = ui.allocate_exact_size(egui::vec2(160.0, 12.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let steps = 64;
    let w = rect.width() / steps as f32;
    for k in 0..steps {
        let t = (k as f32 + 0.5) / steps as f32;
        let [r, g, b] = colorscale::to_rgb8(colorscale::twistiness_color(t));
        let x0 = rect.left() + k as f32 * w;
        painter.rect_filled(
            egui::Rect::from_min_max(
                egui::pos2(x0, rect.top()),
                egui::pos2(x0 + w, rect.bottom()),
            ),
            0.0,
            egui::Color32::from_rgb(r, g, b),
        );
    }
    ui.label("Low");
    ui.label("…");
    ui.label("High");
}
