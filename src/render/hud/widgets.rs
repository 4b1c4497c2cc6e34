//! Custom HUD widgets.

use egui::{Color32, Mesh, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2, Widget};

use super::theme::{HudColors, HudTheme, HudTypography};
use crate::color::Legend;

/// Horizontal color ramp through a legend's stops
pub struct GradientBar {
    stops: Vec<Color32>,
    width: f32,
    height: f32,
}

impl GradientBar {
    pub fn new(legend: &Legend) -> Self {
        Self {
            stops: legend.stop_colors().into_iter().map(HudTheme::color32).collect(),
            width: 220.0,
            height: 10.0,
        }
    }

    /// Set bar dimensions
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Widget for GradientBar {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(self.width, self.height), Sense::hover());

        if ui.is_rect_visible(rect) && self.stops.len() >= 2 {
            // One quad per pair of stops, colors interpolated across each
            let mut mesh = Mesh::default();
            let last = (self.stops.len() - 1) as f32;
            for (i, &color) in self.stops.iter().enumerate() {
                let x = rect.left() + rect.width() * i as f32 / last;
                mesh.colored_vertex(Pos2::new(x, rect.top()), color);
                mesh.colored_vertex(Pos2::new(x, rect.bottom()), color);
                if i > 0 {
                    let base = (2 * i) as u32;
                    mesh.add_triangle(base - 2, base - 1, base);
                    mesh.add_triangle(base - 1, base + 1, base);
                }
            }
            let painter = ui.painter();
            painter.add(egui::Shape::mesh(mesh));
            painter.rect_stroke(rect, 2.0, Stroke::new(1.0, HudColors::BORDER));
        }

        response
    }
}

/// Small filled swatch followed by a label
pub struct Swatch {
    color: Color32,
    label: String,
}

impl Swatch {
    pub fn new(color: Color32, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
        }
    }
}

impl Widget for Swatch {
    fn ui(self, ui: &mut Ui) -> Response {
        let response = ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
            ui.painter().rect_filled(Rect::from_center_size(rect.center(), Vec2::splat(9.0)), 2.0, self.color);
            ui.label(
                egui::RichText::new(&self.label)
                    .size(HudTypography::LABEL_SIZE)
                    .color(HudColors::TEXT_SECONDARY),
            );
        });
        response.response
    }
}

/// Section header with subtle line
pub fn section_header(ui: &mut Ui, text: &str) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(text)
                .size(HudTypography::LABEL_SIZE)
                .color(HudColors::TEXT_LABEL)
                .strong(),
        );
        ui.add_space(4.0);
        let rect = ui.available_rect_before_wrap();
        ui.painter().line_segment(
            [
                Pos2::new(rect.left(), rect.center().y),
                Pos2::new(rect.right(), rect.center().y),
            ],
            Stroke::new(1.0, HudColors::BORDER),
        );
    });
    ui.add_space(2.0);
}

/// Key-value pair in compact format
pub fn key_value(ui: &mut Ui, key: &str, value: &str, color: Option<Color32>) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(key)
                .size(HudTypography::LABEL_SIZE)
                .color(HudColors::TEXT_LABEL),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(value)
                    .size(HudTypography::VALUE_SIZE)
                    .family(egui::FontFamily::Monospace)
                    .color(color.unwrap_or(HudColors::TEXT_PRIMARY)),
            );
        });
    });
}
