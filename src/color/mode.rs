//! Visualization modes and their legends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Rgb;

/// Hemodynamic field shown on the vessel surface and particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationMode {
    /// Blood flow speed
    #[default]
    Velocity,
    /// Static pressure distribution
    Pressure,
    /// Wall shear stress
    Wss,
}

impl VisualizationMode {
    pub const ALL: [VisualizationMode; 3] = [Self::Velocity, Self::Pressure, Self::Wss];

    /// Identifier used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Velocity => "velocity",
            Self::Pressure => "pressure",
            Self::Wss => "wss",
        }
    }

    /// Human-readable label for the control panel
    pub fn label(&self) -> &'static str {
        match self {
            Self::Velocity => "Velocity Field",
            Self::Pressure => "Pressure",
            Self::Wss => "Wall Shear Stress",
        }
    }

    /// Next mode in display order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::Velocity => Self::Pressure,
            Self::Pressure => Self::Wss,
            Self::Wss => Self::Velocity,
        }
    }

    /// Color legend and clinical interpretation
    pub fn legend(&self) -> &'static Legend {
        match self {
            Self::Velocity => &VELOCITY_LEGEND,
            Self::Pressure => &PRESSURE_LEGEND,
            Self::Wss => &WSS_LEGEND,
        }
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown visualization mode '{}' (expected velocity, pressure or wss)",
            self.0
        )
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for VisualizationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "velocity" => Ok(Self::Velocity),
            "pressure" => Ok(Self::Pressure),
            "wss" | "wall-shear-stress" => Ok(Self::Wss),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Legend shown next to the scene for one mode
#[derive(Debug)]
pub struct Legend {
    /// Range caption, low end to high end
    pub caption: &'static str,
    /// Gradient stops as 0xRRGGBB, low to high
    pub stops: [u32; 3],
    /// (color name, meaning) pairs
    pub notes: &'static [(&'static str, &'static str)],
    /// Clinical risk summary
    pub clinical_risk: &'static str,
}

impl Legend {
    pub fn stop_colors(&self) -> [Rgb; 3] {
        self.stops.map(Rgb::from_hex)
    }
}

static VELOCITY_LEGEND: Legend = Legend {
    caption: "Low (Cyan) \u{2192} High (Red) Velocity",
    stops: [0x0891b2, 0x2563eb, 0xdc2626],
    notes: &[
        ("Cyan", "Normal/slow flow (stable hemodynamics)"),
        ("Red", "High-speed flow (stenosis, vessel narrowing)"),
    ],
    clinical_risk: "Red zones indicate flow acceleration and turbulence, increasing clot formation risk",
};

static PRESSURE_LEGEND: Legend = Legend {
    caption: "Low (Green) \u{2192} High (Amber) Pressure",
    stops: [0x059669, 0x84cc16, 0xd97706],
    notes: &[
        ("Green", "Normal pressure distribution (stable vessel)"),
        ("Amber", "Elevated pressure zones (stress points)"),
    ],
    clinical_risk: "High pressure zones correlate with aneurysm rupture risk and endothelial damage",
};

static WSS_LEGEND: Legend = Legend {
    caption: "Thrombus Risk (Violet) \u{2194} Rupture Risk (Magenta)",
    stops: [0x7c3aed, 0xa855f7, 0xe879f9],
    notes: &[
        ("Violet", "Low WSS zones (thrombogenic, clot risk)"),
        ("Magenta", "High WSS zones (rupture-prone regions)"),
    ],
    clinical_risk: "Both extremes are pathological: violet predicts clot formation, magenta predicts aneurysm rupture",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_names() {
        for mode in VisualizationMode::ALL {
            assert_eq!(mode.as_str().parse::<VisualizationMode>(), Ok(mode));
        }
        assert_eq!(" WSS ".parse::<VisualizationMode>(), Ok(VisualizationMode::Wss));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "vorticity".parse::<VisualizationMode>().unwrap_err();
        assert!(err.to_string().contains("vorticity"));
    }

    #[test]
    fn test_next_cycles_all_modes() {
        let mut mode = VisualizationMode::Velocity;
        for _ in 0..3 {
            mode = mode.next();
        }
        assert_eq!(mode, VisualizationMode::Velocity);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&VisualizationMode::Wss).unwrap();
        assert_eq!(json, "\"wss\"");
    }
}
