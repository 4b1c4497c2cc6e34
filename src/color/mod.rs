//! Scalar-to-color mapping for hemodynamic visualization modes.
//!
//! Converts a position along a vessel, the vessel's identity and the active
//! mode into an RGB color for the tube surface and the flow particles.

mod hsl;
mod mapper;
mod mode;

pub use hsl::Rgb;
pub use mapper::{
    color_for, particle_color_for, synthetic_scalar, ANEURYSMAL_VESSEL, STENOTIC_VESSEL,
};
pub use mode::{Legend, ParseModeError, VisualizationMode};
