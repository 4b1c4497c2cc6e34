//! HUD panel definitions and rendering.

use egui::{Align2, Context, Window};

use super::state::HudState;
use super::theme::{HudColors, HudTheme, HudTypography};
use super::widgets::{key_value, section_header, GradientBar, Swatch};
use super::HudAction;
use crate::color::VisualizationMode;
use crate::state::FrameMetrics;

/// Render all HUD panels, pushing user requests onto `actions`
pub fn render_panels(
    ctx: &Context,
    state: &HudState,
    metrics: &FrameMetrics,
    actions: &mut Vec<HudAction>,
) {
    if !state.hud_enabled {
        return;
    }

    if state.show_controls_panel {
        render_controls_panel(ctx, metrics, actions);
    }

    if state.show_legend_panel {
        render_legend_panel(ctx, metrics.mode);
    }

    if state.show_stats_panel {
        render_stats_panel(ctx, metrics);
    }

    if state.show_help {
        render_help_overlay(ctx);
    }
}

/// Mode selection and animation toggles (top-left)
fn render_controls_panel(ctx: &Context, metrics: &FrameMetrics, actions: &mut Vec<HudAction>) {
    Window::new("HEMODYNAMICS")
        .anchor(Align2::LEFT_TOP, [12.0, 12.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(true)
        .show(ctx, |ui| {
            ui.set_min_width(220.0);

            section_header(ui, "MODE");
            ui.horizontal(|ui| {
                for mode in VisualizationMode::ALL {
                    let selected = metrics.mode == mode;
                    if ui.selectable_label(selected, mode.label()).clicked() && !selected {
                        actions.push(HudAction::SetMode(mode));
                    }
                }
            });

            ui.add_space(4.0);
            let mut animating = metrics.is_animating;
            if ui.checkbox(&mut animating, "Enable Flow Animation").changed() {
                actions.push(HudAction::SetAnimating(animating));
            }
            let mut particles = metrics.show_particles;
            if ui.checkbox(&mut particles, "Show Particle Flow Streaks").changed() {
                actions.push(HudAction::SetShowParticles(particles));
            }

            ui.add_space(4.0);
            if ui.button("Reset Camera").clicked() {
                actions.push(HudAction::ResetCamera);
            }
        });
}

/// Color legend and clinical interpretation for the active mode (top-right)
fn render_legend_panel(ctx: &Context, mode: VisualizationMode) {
    let legend = mode.legend();
    let stops = legend.stop_colors();

    Window::new("LEGEND")
        .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(true)
        .show(ctx, |ui| {
            ui.set_max_width(260.0);

            ui.label(
                egui::RichText::new(mode.label())
                    .size(HudTypography::TITLE_SIZE)
                    .color(HudColors::TEXT_PRIMARY)
                    .strong(),
            );
            ui.add(GradientBar::new(legend).size(240.0, 10.0));
            ui.label(
                egui::RichText::new(legend.caption)
                    .size(HudTypography::SMALL_SIZE)
                    .color(HudColors::TEXT_SECONDARY),
            );

            section_header(ui, "INTERPRETATION");
            let last = legend.notes.len().saturating_sub(1);
            for (i, (name, meaning)) in legend.notes.iter().enumerate() {
                let stop = if i == last { stops[2] } else { stops[0] };
                ui.add(Swatch::new(HudTheme::color32(stop), format!("{}: {}", name, meaning)));
            }

            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!("Clinical Risk: {}", legend.clinical_risk))
                    .size(HudTypography::LABEL_SIZE)
                    .color(HudColors::WARNING),
            );
        });
}

/// Scene statistics (bottom-left)
fn render_stats_panel(ctx: &Context, metrics: &FrameMetrics) {
    Window::new("SCENE")
        .anchor(Align2::LEFT_BOTTOM, [12.0, -12.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(true)
        .show(ctx, |ui| {
            ui.set_min_width(160.0);

            key_value(
                ui,
                "FPS",
                &format!("{:.0}", metrics.fps),
                Some(HudTheme::fps_color(metrics.fps)),
            );
            key_value(ui, "Vessels", &metrics.vessel_count.to_string(), None);
            key_value(ui, "Triangles", &metrics.triangle_count.to_string(), None);
            key_value(ui, "Particles", &metrics.particle_count.to_string(), None);

            section_header(ui, "RESOURCES");
            key_value(ui, "Live buffers", &metrics.live_resources.to_string(), None);
            key_value(ui, "Rebuilds", &metrics.rebuild_count.to_string(), None);

            let (flow, flow_color) = if metrics.is_animating {
                ("RUNNING", HudColors::SUCCESS)
            } else {
                ("PAUSED", HudColors::TEXT_SECONDARY)
            };
            key_value(ui, "Flow", flow, Some(flow_color));
        });
}

/// Help overlay (center)
fn render_help_overlay(ctx: &Context) {
    Window::new("KEYBOARD SHORTCUTS")
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(true)
        .show(ctx, |ui| {
            ui.set_min_width(280.0);

            section_header(ui, "CAMERA");
            key_value(ui, "Mouse Drag", "Orbit camera", None);
            key_value(ui, "Scroll", "Zoom", None);
            key_value(ui, "R", "Reset camera", None);

            section_header(ui, "FLOW");
            key_value(ui, "1 / 2 / 3", "Velocity / Pressure / WSS", None);
            key_value(ui, "Space", "Toggle animation", None);
            key_value(ui, "P", "Toggle particles", None);

            section_header(ui, "HUD");
            key_value(ui, "H", "Toggle HUD", None);
            key_value(ui, "L", "Toggle legend", None);
            key_value(ui, "S", "Toggle scene stats", None);
            key_value(ui, "F1", "Toggle help", None);
            key_value(ui, "Esc", "Exit", None);

            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Press F1 to close")
                    .size(HudTypography::SMALL_SIZE)
                    .color(HudColors::TEXT_SECONDARY),
            );
        });
}
