//! Geometry module for vessel centerlines and tube meshes.
//!
//! Contains the Catmull-Rom centerline model, the vessel radius profile
//! (stenosis and aneurysm modulation) and the tube mesh builder.

mod centerline;
mod tube;
mod vessel;

pub use centerline::{Centerline, MIN_CONTROL_POINTS};
pub use tube::{RingFrame, TubeMesh, TubeVertex};
pub use vessel::{Pathology, Vessel, MAX_STENOSIS_SEVERITY, MIN_BASE_RADIUS};
