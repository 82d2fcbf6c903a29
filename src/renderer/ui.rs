use crate::composer::Lifecycle;
use crate::params::{ParamKind, ParamValue, ParameterSet};

/// Read-only numbers shown next to the controls
#[derive(Debug, Clone, Copy)]
pub struct FrameStats {
    pub fps: f32,
    pub frame: u64,
    pub lifecycle: Lifecycle,
    pub resolution: (u32, u32),
}

/// Draw one widget per parameter. Edited values are pushed to `changes`
/// unclamped; the control panel constrains them before they reach the scene.
pub fn draw_controls(
    ctx: &egui::Context,
    title: &str,
    params: &ParameterSet,
    changes: &mut Vec<(&'static str, ParamValue)>,
) {
    egui::Window::new(title)
        .title_bar(true)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .default_width(260.0)
        .show(ctx, |ui| {
            for spec in params.specs() {
                let Some(current) = params.get(spec.name) else {
                    continue;
                };

                match (spec.kind, current) {
                    (ParamKind::Float { min, max, step }, ParamValue::Float(value)) => {
                        let mut edited = value;
                        let slider = egui::Slider::new(&mut edited, min..=max)
                            .step_by(step as f64)
                            .text(spec.label);
                        if ui.add(slider).changed() {
                            changes.push((spec.name, ParamValue::Float(edited)));
                        }
                    }
                    (ParamKind::Toggle, ParamValue::Bool(value)) => {
                        let mut edited = value;
                        if ui.checkbox(&mut edited, spec.label).changed() {
                            changes.push((spec.name, ParamValue::Bool(edited)));
                        }
                    }
                    _ => {}
                }
            }
        });
}

pub fn draw_stats(ctx: &egui::Context, stats: &FrameStats) {
    egui::Window::new("Stats")
        .title_bar(false)
        .resizable(false)
        .fixed_pos(egui::pos2(10.0, 10.0))
        .show(ctx, |ui| {
            ui.heading(
                egui::RichText::new(format!("{:.0} FPS", stats.fps))
                    .size(20.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.monospace(format!("Frame: {}", stats.frame));
            ui.monospace(format!(
                "Resolution: {}x{}",
                stats.resolution.0, stats.resolution.1
            ));
            if stats.lifecycle != Lifecycle::Running {
                ui.label(
                    egui::RichText::new(format!("{:?}", stats.lifecycle))
                        .color(egui::Color32::from_rgb(255, 100, 100)),
                );
            }
        });
}
