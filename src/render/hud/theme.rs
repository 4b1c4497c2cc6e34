//! HUD theme: dark slate panels with a sky-blue accent.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use crate::color::Rgb;

/// HUD color palette
pub struct HudColors;

impl HudColors {
    // === Background Colors ===
    /// Slate-950 - main background
    pub const BACKGROUND: Color32 = Color32::from_rgb(2, 6, 23);
    /// Slate-900 panel background (95% opacity)
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(14, 22, 40, 242);
    /// Slightly lighter for hover states
    pub const PANEL_BG_HOVER: Color32 = Color32::from_rgb(30, 41, 59);

    // === Text Colors ===
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(226, 232, 240);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(148, 163, 184);
    pub const TEXT_LABEL: Color32 = Color32::from_rgb(100, 116, 139);

    // === Status Colors ===
    /// Sky blue - accent color
    pub const ACCENT: Color32 = Color32::from_rgb(14, 165, 233);
    pub const SUCCESS: Color32 = Color32::from_rgb(16, 185, 129);
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11);
    pub const CRITICAL: Color32 = Color32::from_rgb(239, 68, 68);

    // === UI Element Colors ===
    pub const BAR_BG: Color32 = Color32::from_rgb(30, 35, 45);
    pub const BORDER: Color32 = Color32::from_rgb(51, 65, 85);
}

/// Typography sizes
pub struct HudTypography;

impl HudTypography {
    pub const TITLE_SIZE: f32 = 14.0;
    pub const VALUE_SIZE: f32 = 14.0;
    pub const LABEL_SIZE: f32 = 11.0;
    pub const SMALL_SIZE: f32 = 10.0;
}

/// HUD theme configuration
pub struct HudTheme {
    /// Panel corner rounding
    pub panel_rounding: f32,
    /// Button rounding
    pub button_rounding: f32,
    /// Panel padding
    pub panel_padding: f32,
    /// Spacing between elements
    pub item_spacing: f32,
    /// Legend gradient height
    pub bar_height: f32,
}

impl Default for HudTheme {
    fn default() -> Self {
        Self {
            panel_rounding: 8.0,
            button_rounding: 6.0,
            panel_padding: 12.0,
            item_spacing: 6.0,
            bar_height: 10.0,
        }
    }
}

impl HudTheme {
    /// Apply theme to egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();
        let mut visuals = Visuals::dark();

        visuals.panel_fill = HudColors::PANEL_BG;
        visuals.window_fill = HudColors::PANEL_BG;
        visuals.extreme_bg_color = HudColors::BACKGROUND;
        visuals.faint_bg_color = HudColors::PANEL_BG_HOVER;
        visuals.override_text_color = Some(HudColors::TEXT_PRIMARY);

        visuals.widgets.noninteractive.bg_fill = HudColors::PANEL_BG;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, HudColors::TEXT_SECONDARY);
        visuals.widgets.noninteractive.rounding = Rounding::same(self.panel_rounding);

        visuals.widgets.inactive.bg_fill = HudColors::BAR_BG;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, HudColors::TEXT_SECONDARY);
        visuals.widgets.inactive.rounding = Rounding::same(self.button_rounding);

        visuals.widgets.hovered.bg_fill = HudColors::PANEL_BG_HOVER;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, HudColors::TEXT_PRIMARY);
        visuals.widgets.hovered.rounding = Rounding::same(self.button_rounding);

        visuals.widgets.active.bg_fill = HudColors::ACCENT;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, HudColors::TEXT_PRIMARY);

        visuals.selection.bg_fill = HudColors::ACCENT.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, HudColors::ACCENT);

        visuals.window_stroke = Stroke::new(1.0, HudColors::BORDER);
        visuals.window_rounding = Rounding::same(self.panel_rounding);

        style.visuals = visuals;

        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.window_margin = egui::Margin::same(self.panel_padding);
        style.spacing.button_padding = egui::vec2(10.0, 5.0);

        style.text_styles.insert(
            TextStyle::Heading,
            FontId::new(HudTypography::TITLE_SIZE, FontFamily::Proportional),
        );
        style.text_styles.insert(
            TextStyle::Body,
            FontId::new(HudTypography::VALUE_SIZE, FontFamily::Proportional),
        );
        style.text_styles.insert(
            TextStyle::Small,
            FontId::new(HudTypography::SMALL_SIZE, FontFamily::Proportional),
        );
        style.text_styles.insert(
            TextStyle::Monospace,
            FontId::new(HudTypography::VALUE_SIZE, FontFamily::Monospace),
        );

        ctx.set_style(style);
    }

    /// Convert an engine color to an egui color
    pub fn color32(color: Rgb) -> Color32 {
        let [r, g, b] = color.to_rgb8();
        Color32::from_rgb(r, g, b)
    }

    /// Color for a frame rate readout
    pub fn fps_color(fps: f32) -> Color32 {
        if fps >= 55.0 {
            HudColors::SUCCESS
        } else if fps >= 30.0 {
            HudColors::WARNING
        } else {
            HudColors::CRITICAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color32_from_hex() {
        let c = HudTheme::color32(Rgb::from_hex(0xdc2626));
        assert_eq!(c, Color32::from_rgb(0xdc, 0x26, 0x26));
    }

    #[test]
    fn test_fps_color_bands() {
        assert_eq!(HudTheme::fps_color(60.0), HudColors::SUCCESS);
        assert_eq!(HudTheme::fps_color(40.0), HudColors::WARNING);
        assert_eq!(HudTheme::fps_color(12.0), HudColors::CRITICAL);
    }
}
