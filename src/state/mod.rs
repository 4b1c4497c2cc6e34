//! Scene state and resource ownership.
//!
//! [`SceneGeometry`] holds the per-vessel tube resources through an explicit
//! `Idle → Building → Ready` lifecycle; [`FlowScene`] ties it to the vessel
//! set, the active mode and the particle pool.

mod metrics;
mod resources;
mod scene;

pub use metrics::{FpsCounter, FrameMetrics};
pub use resources::{BuildPhase, GeometryBackend, HeadlessBackend, HeadlessHandle, SceneGeometry};
pub use scene::{FlowScene, VesselSway};
