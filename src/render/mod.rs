//! Rendering module using wgpu.
//!
//! Draws the vessel tubes and flow particles of a [`FlowScene`](crate::state::FlowScene)
//! with an egui HUD on top.

mod buffers;
mod camera;
pub mod hud;
mod pipeline;

pub use buffers::{GpuGeometryBackend, GpuTubeMesh, ParticleInstance};
pub use camera::{Camera, CameraUniform};
pub use hud::{HudAction, HudColors, HudOverlay, HudState, HudTheme};
pub use pipeline::{GpuFlowScene, RenderState};
