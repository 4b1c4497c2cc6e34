//! Scalar-to-color mapping for the three hemodynamic modes.
//!
//! The "measurements" are synthetic: each mode derives a normalized scalar
//! from the position along the vessel and the vessel's identity, then maps it
//! into HSL. Two vessels are singled out:
//! - `mca` carries the stenosis, so its velocity ramps faster
//! - `carotid` carries the aneurysm, so it has the higher pressure baseline
//!   and the low (thrombogenic) end of the shear stress range
//!
//! Any other vessel name takes the default branch of each formula.

use std::f32::consts::PI;

use super::{Rgb, VisualizationMode};

/// Vessel with the stenotic segment
pub const STENOTIC_VESSEL: &str = "mca";

/// Vessel with the aneurysm
pub const ANEURYSMAL_VESSEL: &str = "carotid";

/// Synthetic hemodynamic scalar at position `t` along a vessel
///
/// The result is not clamped; the surface formulas stay within [0.2, 1.0].
pub fn synthetic_scalar(t: f32, vessel_name: &str, mode: VisualizationMode) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match mode {
        VisualizationMode::Velocity => velocity_scalar(t, vessel_name),
        VisualizationMode::Pressure => {
            if vessel_name == ANEURYSMAL_VESSEL {
                0.6 + t * 0.3
            } else {
                0.3 + t * 0.2
            }
        }
        VisualizationMode::Wss => wss_scalar(t, vessel_name),
    }
}

/// Surface color of a vessel at position `t` for the given mode
pub fn color_for(t: f32, vessel_name: &str, mode: VisualizationMode) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let scalar = synthetic_scalar(t, vessel_name, mode);

    match mode {
        VisualizationMode::Velocity => Rgb::from_hsl(velocity_hue(scalar), 1.0, 0.5),
        VisualizationMode::Pressure => {
            let lightness = 0.45 + (t * PI).sin() * 0.1;
            Rgb::from_hsl(pressure_hue(scalar), 0.95, lightness)
        }
        VisualizationMode::Wss => {
            let saturation = 0.95 + (t * PI).sin() * 0.05;
            let lightness = 0.5 + (t * PI).cos() * 0.05;
            Rgb::from_hsl(wss_hue(scalar), saturation, lightness)
        }
    }
}

/// Particle color at spawn position `t`
///
/// Particles use a brighter, flatter palette than the surface. Their
/// pressure scalar has no per-vessel baseline, only the slope.
pub fn particle_color_for(t: f32, vessel_name: &str, mode: VisualizationMode) -> Rgb {
    let t = t.clamp(0.0, 1.0);

    match mode {
        VisualizationMode::Velocity => {
            Rgb::from_hsl(velocity_hue(velocity_scalar(t, vessel_name)), 0.95, 0.55)
        }
        VisualizationMode::Pressure => {
            let pressure = if vessel_name == ANEURYSMAL_VESSEL { t * 0.3 } else { t * 0.2 };
            Rgb::from_hsl(pressure_hue(pressure), 0.9, 0.5)
        }
        VisualizationMode::Wss => Rgb::from_hsl(wss_hue(wss_scalar(t, vessel_name)), 0.95, 0.55),
    }
}

fn velocity_scalar(t: f32, vessel_name: &str) -> f32 {
    if vessel_name == STENOTIC_VESSEL {
        0.8 + t * 0.2
    } else {
        0.3 + t * 0.4
    }
}

fn wss_scalar(t: f32, vessel_name: &str) -> f32 {
    if vessel_name == ANEURYSMAL_VESSEL {
        0.2 + t * 0.2
    } else {
        0.7 + t * 0.2
    }
}

/// Two ramps joined at 0.5: cyan to blue below, blue through magenta to red above
fn velocity_hue(velocity: f32) -> f32 {
    if velocity < 0.5 {
        0.55 + (0.5 - velocity) * 0.15
    } else {
        (1.0 - velocity) * 0.8
    }
}

/// Green to amber, floored at amber
fn pressure_hue(pressure: f32) -> f32 {
    (0.33 - pressure * 0.28).max(0.08)
}

/// Violet to magenta
fn wss_hue(wss: f32) -> f32 {
    0.88 - wss * 0.18
}
