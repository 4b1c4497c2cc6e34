//! Parameter structures for the vessel scene.
//!
//! Every structure has a `Default` holding the reference scene (three
//! cerebral vessels, 100-segment tubes with 16-vertex rings, 1200 flow
//! particles) and can be overridden from a JSON file.

use std::path::Path;

use glam::Vec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::color::VisualizationMode;
use crate::geometry::{Centerline, Pathology, Vessel};

/// Top-level parameters container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Parameters {
    /// Vessel layout
    pub vessels: VesselParameters,
    /// Tube tessellation
    pub tube: TubeParameters,
    /// Flow particle pool
    pub particles: ParticleParameters,
    /// Camera and scene presentation
    pub view: ViewParameters,
}

impl Parameters {
    /// Load parameters from `data/parameters`, or use defaults if files don't exist
    pub fn load_or_default() -> Self {
        Self::load_from_dir("data/parameters")
    }

    /// Load parameters from specific directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            vessels: load_json_or_default(dir.join("vessels.json"), "vessel"),
            tube: load_json_or_default(dir.join("tube.json"), "tube"),
            particles: load_json_or_default(dir.join("particles.json"), "particle"),
            view: load_json_or_default(dir.join("view.json"), "view"),
        }
    }
}

/// Read a JSON parameter file, falling back to defaults on any failure
fn load_json_or_default<T, P>(path: P, label: &str) -> T
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    match std::fs::read_to_string(path.as_ref()) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(params) => {
                log::info!("Loaded {} parameters from {:?}", label, path.as_ref());
                params
            }
            Err(e) => {
                log::warn!("Failed to parse {} parameters: {}, using defaults", label, e);
                T::default()
            }
        },
        Err(_) => {
            log::info!("{} parameters file not found, using defaults", label);
            T::default()
        }
    }
}

/// One vessel of the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselSpec {
    /// Vessel identifier; "mca" and "carotid" carry pathologies
    pub name: String,
    /// Centerline control points (at least 4)
    pub control_points: Vec<[f32; 3]>,
    /// Unmodulated radius
    pub base_radius: f32,
    /// Characteristic particle speed
    pub flow_speed: f32,
    /// Explicit pathology; when absent the pathology follows the vessel name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathology: Option<Pathology>,
}

impl VesselSpec {
    pub fn to_vessel(&self) -> Vessel {
        let centerline = Centerline::new(
            self.control_points
                .iter()
                .copied()
                .map(Vec3::from_array)
                .collect(),
        );
        let vessel =
            Vessel::new(self.name.clone(), centerline, self.base_radius).with_flow_speed(self.flow_speed);
        match self.pathology {
            Some(pathology) => vessel.with_pathology(Some(pathology)),
            None => vessel,
        }
    }
}

/// Vessel layout of the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselParameters {
    pub vessels: Vec<VesselSpec>,
}

impl VesselParameters {
    /// Build the vessels in declaration order
    pub fn to_vessels(&self) -> Vec<Vessel> {
        self.vessels.iter().map(VesselSpec::to_vessel).collect()
    }
}

impl Default for VesselParameters {
    fn default() -> Self {
        // Carotid bifurcating into the middle and anterior cerebral arteries
        // at (0.8, 2.5, 0.5)
        Self {
            vessels: vec![
                VesselSpec {
                    name: "carotid".to_string(),
                    control_points: vec![
                        [0.0, -3.0, 0.0],
                        [0.5, -1.0, 0.0],
                        [0.7, 1.0, 0.0],
                        [0.8, 2.5, 0.5],
                    ],
                    base_radius: 0.35,
                    flow_speed: 0.3,
                    pathology: None,
                },
                VesselSpec {
                    name: "mca".to_string(),
                    control_points: vec![
                        [0.8, 2.5, 0.5],
                        [1.5, 3.0, 1.0],
                        [2.0, 3.5, 1.5],
                        [2.5, 4.0, 2.0],
                    ],
                    base_radius: 0.22,
                    flow_speed: 0.8,
                    pathology: None,
                },
                VesselSpec {
                    name: "aca".to_string(),
                    control_points: vec![
                        [0.8, 2.5, 0.5],
                        [0.5, 3.0, 1.0],
                        [0.0, 3.5, 1.5],
                        [-1.5, 4.0, 2.0],
                    ],
                    base_radius: 0.22,
                    flow_speed: 0.4,
                    pathology: None,
                },
            ],
        }
    }
}

/// Tube tessellation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeParameters {
    /// Centerline segments; the tube has `segments + 1` rings
    pub segments: usize,
    /// Vertices per ring
    pub ring_vertices: usize,
}

impl Default for TubeParameters {
    fn default() -> Self {
        Self {
            segments: 100,
            ring_vertices: 16,
        }
    }
}

/// Flow particle settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleParameters {
    /// Pool size
    pub count: usize,
    /// Multiplier from (seconds × speed) to curve parameter
    pub time_scale: f32,
    /// Amplitude of the shared pulsatile offset in curve parameter
    pub pulse_amplitude: f32,
    /// Angular frequency of the pulsatile offset (rad/s)
    pub pulse_frequency: f32,
    /// Half-width of the per-axis positional jitter
    pub jitter: f32,
    /// Full width of the per-particle speed jitter
    pub speed_jitter: f32,
}

impl Default for ParticleParameters {
    fn default() -> Self {
        Self {
            count: 1200,
            time_scale: 0.5,
            pulse_amplitude: 0.02,
            pulse_frequency: 2.0,
            jitter: 0.02,
            speed_jitter: 0.25,
        }
    }
}

/// Camera and presentation settings for the viewer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewParameters {
    /// Mode shown at startup
    pub initial_mode: VisualizationMode,
    /// Start with the flow animation running
    pub animate: bool,
    /// Start with the particle layer attached
    pub show_particles: bool,
    /// Camera distance from the orbit target
    pub camera_distance: f32,
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,
    /// Orbit target
    pub camera_target: [f32; 3],
    /// Camera auto-rotation (rad/s), 0 to disable
    pub auto_rotate_speed: f32,
    /// Particle sprite size in scene units
    pub particle_size: f32,
    /// Clear color
    pub background: [f32; 3],
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self {
            initial_mode: VisualizationMode::Velocity,
            animate: true,
            show_particles: true,
            camera_distance: 8.0,
            fov_degrees: 50.0,
            camera_target: [0.0, 0.0, 0.0],
            auto_rotate_speed: 0.21,
            particle_size: 0.18,
            background: [0.008, 0.024, 0.09],
        }
    }
}
