//! Cerebral Flow Viz - synthetic hemodynamics on a cerebral vessel tree
//!
//! Builds tube meshes for a carotid bifurcating into the middle and anterior
//! cerebral arteries, colors them by a synthetic velocity, pressure or wall
//! shear stress field, and advects flow particles along the centerlines.
//! The engine (geometry, color, particles, state) has no GPU dependency; the
//! `render` module draws it with wgpu.

pub mod color;
pub mod config;
pub mod geometry;
pub mod particles;
pub mod render;
pub mod state;

pub use color::{color_for, particle_color_for, Rgb, VisualizationMode};
pub use config::Parameters;
pub use geometry::{Centerline, Pathology, TubeMesh, Vessel};
pub use particles::ParticleSystem;
pub use render::{Camera, RenderState};
pub use state::{BuildPhase, FlowScene, HeadlessBackend, SceneGeometry};
