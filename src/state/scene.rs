//! The flow scene: vessels, tube geometry and particles driven together.

use glam::Mat4;

use super::resources::{BuildPhase, GeometryBackend, SceneGeometry};
use crate::color::VisualizationMode;
use crate::config::Parameters;
use crate::geometry::Vessel;
use crate::particles::ParticleSystem;

/// Yaw amplitude of the vessel sway (rad)
const SWAY_AMPLITUDE: f32 = 0.25;
/// Angular frequency of the vessel sway (rad/s)
const SWAY_FREQUENCY: f64 = 0.4;
/// Roll added to the vessel group every animated frame (rad)
const ROLL_PER_FRAME: f32 = 0.0002;

/// Slow rotation applied to the whole vessel group while animating
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VesselSway {
    pub rotation_y: f32,
    pub rotation_z: f32,
}

impl VesselSway {
    pub fn update(&mut self, time_sec: f64) {
        self.rotation_y = ((time_sec * SWAY_FREQUENCY).sin() as f32) * SWAY_AMPLITUDE;
        self.rotation_z += ROLL_PER_FRAME;
    }

    /// Model matrix of the vessel group
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y) * Mat4::from_rotation_z(self.rotation_z)
    }
}

/// Everything the viewer draws, with its resources owned in one place
pub struct FlowScene<B: GeometryBackend> {
    params: Parameters,
    vessels: Vec<Vessel>,
    vessels_revision: u64,
    mode: VisualizationMode,
    is_animating: bool,
    show_particles: bool,
    geometry: SceneGeometry<B>,
    particles: ParticleSystem,
    sway: VesselSway,
    frame_count: u64,
}

impl<B: GeometryBackend> FlowScene<B> {
    /// Build the scene described by `params`
    pub fn new(params: Parameters, backend: B) -> Self {
        let vessels = params.vessels.to_vessels();
        let particles = ParticleSystem::new(&vessels, params.view.initial_mode, params.particles);
        Self::assemble(params, vessels, backend, particles)
    }

    /// Build the scene with a reproducible particle pool
    pub fn with_seed(params: Parameters, backend: B, seed: u64) -> Self {
        let vessels = params.vessels.to_vessels();
        let particles =
            ParticleSystem::with_seed(&vessels, params.view.initial_mode, params.particles, seed);
        Self::assemble(params, vessels, backend, particles)
    }

    fn assemble(
        params: Parameters,
        vessels: Vec<Vessel>,
        backend: B,
        particles: ParticleSystem,
    ) -> Self {
        let mode = params.view.initial_mode;
        let mut scene = Self {
            is_animating: params.view.animate,
            show_particles: params.view.show_particles,
            params,
            vessels,
            vessels_revision: 0,
            mode,
            geometry: SceneGeometry::new(backend),
            particles,
            sway: VesselSway::default(),
            frame_count: 0,
        };
        scene.sync_geometry();
        log::info!(
            "Scene ready: {} vessels, {} particles, mode {}",
            scene.vessels.len(),
            scene.particles.len(),
            scene.mode
        );
        scene
    }

    fn sync_geometry(&mut self) -> bool {
        self.geometry.ensure(
            &self.vessels,
            self.vessels_revision,
            self.mode,
            &self.params.tube,
        )
    }

    /// Switch the hemodynamic mode, rebuilding tubes and recoloring particles
    pub fn set_mode(&mut self, mode: VisualizationMode) {
        if mode == self.mode {
            return;
        }
        log::info!("Visualization mode: {} -> {}", self.mode, mode);
        self.mode = mode;
        self.particles.set_mode(mode);
        self.sync_geometry();
    }

    /// Replace the vessel set
    pub fn set_vessels(&mut self, vessels: Vec<Vessel>) {
        self.vessels = vessels;
        self.vessels_revision += 1;
        self.particles.set_vessels(&self.vessels);
        self.sync_geometry();
    }

    pub fn set_animating(&mut self, is_animating: bool) {
        if is_animating != self.is_animating {
            log::info!("Flow animation {}", if is_animating { "on" } else { "off" });
        }
        self.is_animating = is_animating;
    }

    /// Show or hide the particle layer
    ///
    /// Showing a hidden layer starts from a fresh pool.
    pub fn set_show_particles(&mut self, show_particles: bool) {
        if show_particles != self.show_particles {
            log::info!("Particle flow {}", if show_particles { "shown" } else { "hidden" });
            if show_particles {
                self.particles.respawn();
            }
        }
        self.show_particles = show_particles;
    }

    /// Per-frame update
    ///
    /// Rebuilds geometry if it is stale; while animating, advances visible
    /// particles and sways the vessel group.
    pub fn frame(&mut self, time_sec: f64) {
        self.sync_geometry();
        if self.is_animating {
            if self.show_particles {
                self.particles.update(time_sec, true);
            }
            self.sway.update(time_sec);
        }
        self.frame_count += 1;
    }

    /// Release all geometry resources
    pub fn release(&mut self) {
        self.geometry.release();
    }

    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn show_particles(&self) -> bool {
        self.show_particles
    }

    pub fn vessels(&self) -> &[Vessel] {
        &self.vessels
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn geometry(&self) -> &SceneGeometry<B> {
        &self.geometry
    }

    pub fn phase(&self) -> BuildPhase {
        self.geometry.phase()
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut ParticleSystem {
        &mut self.particles
    }

    pub fn sway(&self) -> VesselSway {
        self.sway
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.sway.model_matrix()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HeadlessBackend;

    fn scene() -> FlowScene<HeadlessBackend> {
        FlowScene::with_seed(Parameters::default(), HeadlessBackend::new(), 11)
    }

    #[test]
    fn test_new_scene_is_ready() {
        let scene = scene();
        assert_eq!(scene.phase(), BuildPhase::Ready);
        assert_eq!(scene.geometry().meshes().len(), 3);
        assert_eq!(scene.particles().len(), 1200);
        assert_eq!(scene.mode(), VisualizationMode::Velocity);
    }

    #[test]
    fn test_mode_toggle_keeps_resource_count() {
        let mut scene = scene();
        let live = scene.geometry().live_resources();
        for mode in VisualizationMode::ALL.iter().cycle().take(12) {
            scene.set_mode(*mode);
            scene.frame(0.5);
        }
        assert_eq!(scene.geometry().live_resources(), live);
        assert_eq!(scene.particles().len(), 1200);
    }

    #[test]
    fn test_same_mode_is_noop() {
        let mut scene = scene();
        let rebuilds = scene.geometry().rebuild_count();
        scene.set_mode(VisualizationMode::Velocity);
        scene.frame(1.0);
        assert_eq!(scene.geometry().rebuild_count(), rebuilds);
        assert_eq!(scene.particles().generation(), 1);
    }

    #[test]
    fn test_cycling_modes_rebuilds_each_step() {
        let mut scene = scene();
        let rebuilds = scene.geometry().rebuild_count();
        let modes = std::iter::successors(Some(scene.mode().next()), |m| Some(m.next()))
            .take(VisualizationMode::ALL.len());
        for (step, mode) in modes.enumerate() {
            scene.set_mode(mode);
            assert_eq!(scene.geometry().rebuild_count(), rebuilds + step as u64 + 1);
            assert_eq!(scene.geometry().mode(), Some(mode));
        }
        assert_eq!(scene.mode(), VisualizationMode::Velocity);
    }

    #[test]
    fn test_paused_scene_freezes() {
        let mut scene = scene();
        scene.frame(2.0);
        scene.set_animating(false);
        let positions = scene.particles().positions().to_vec();
        let sway = scene.sway();
        for i in 0..30 {
            scene.frame(2.0 + i as f64 / 60.0);
        }
        assert_eq!(scene.particles().positions(), positions.as_slice());
        assert_eq!(scene.sway(), sway);
    }

    #[test]
    fn test_sway_follows_time() {
        let mut sway = VesselSway::default();
        sway.update(std::f64::consts::PI / 0.8);
        assert!((sway.rotation_y - 0.25).abs() < 1e-5);
        assert!((sway.rotation_z - ROLL_PER_FRAME).abs() < 1e-9);
    }

    #[test]
    fn test_set_vessels_rebuilds() {
        let mut scene = scene();
        let mut vessels = scene.vessels().to_vec();
        vessels.pop();
        scene.set_vessels(vessels);
        assert_eq!(scene.geometry().meshes().len(), 2);
        assert_eq!(scene.geometry().live_resources(), 2);
        assert_eq!(scene.particles().particles()[2].vessel_index, 0);
    }

    #[test]
    fn test_release_frees_everything() {
        let mut scene = scene();
        scene.release();
        assert_eq!(scene.phase(), BuildPhase::Idle);
        assert_eq!(scene.geometry().live_resources(), 0);
    }
}
