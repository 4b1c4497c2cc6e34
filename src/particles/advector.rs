//! Flow particle advection along vessel centerlines.
//!
//! Each particle is bound to one vessel (round-robin by index) and moves
//! along its centerline with a per-particle speed:
//!
//! t = clamp((time · speed · k) mod 1 + A · sin(ω · time), 0, 1)
//!
//! The sine term is shared by all particles and gives the flow a pulsatile
//! surge. A small random offset per axis is added every frame so the
//! particles read as streaks rather than beads on a wire.
//!
//! Colors are assigned once from each particle's spawn position and only
//! recomputed when the mode changes.
//!
//! `time` is wall-clock seconds since the Unix epoch. At that magnitude the
//! speed jitter alone spreads each vessel's particles over the whole curve,
//! so the pool looks fully developed from the first frame.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec3;
use rand::prelude::*;

use crate::color::{particle_color_for, VisualizationMode};
use crate::config::ParticleParameters;
use crate::geometry::{Centerline, Vessel};

/// Path a group of particles follows
#[derive(Debug, Clone)]
struct FlowPath {
    name: String,
    centerline: Centerline,
    speed: f32,
}

/// Current wall-clock time in seconds, the clock particles advance on
pub fn wall_clock_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Static per-particle data, fixed until the pool is reinitialized
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Index of the vessel the particle belongs to
    pub vessel_index: usize,
    /// Advection speed (vessel speed plus jitter)
    pub speed: f32,
    /// Curve parameter at spawn, used for coloring
    pub spawn_t: f32,
}

/// Fixed-size pool of flow particles
///
/// The system is the only writer of the position and color buffers; the
/// renderer reads them through [`positions`](Self::positions) and
/// [`colors`](Self::colors) and re-uploads when
/// [`take_dirty`](Self::take_dirty) reports a change.
pub struct ParticleSystem {
    params: ParticleParameters,
    mode: VisualizationMode,
    paths: Vec<FlowPath>,
    particles: Vec<Particle>,
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    /// Number of times the pool was (re)initialized
    generation: u64,
    dirty: bool,
    rng: StdRng,
}

impl ParticleSystem {
    /// Create a pool seeded from system entropy
    pub fn new(vessels: &[Vessel], mode: VisualizationMode, params: ParticleParameters) -> Self {
        Self::from_rng(vessels, mode, params, StdRng::from_entropy())
    }

    /// Create a reproducible pool
    pub fn with_seed(
        vessels: &[Vessel],
        mode: VisualizationMode,
        params: ParticleParameters,
        seed: u64,
    ) -> Self {
        Self::from_rng(vessels, mode, params, StdRng::seed_from_u64(seed))
    }

    fn from_rng(
        vessels: &[Vessel],
        mode: VisualizationMode,
        params: ParticleParameters,
        rng: StdRng,
    ) -> Self {
        let mut system = Self {
            params,
            mode,
            paths: Vec::new(),
            particles: Vec::new(),
            positions: Vec::new(),
            colors: Vec::new(),
            generation: 0,
            dirty: false,
            rng,
        };
        system.set_vessels(vessels);
        system
    }

    /// Replace the vessel set and respawn the pool
    pub fn set_vessels(&mut self, vessels: &[Vessel]) {
        self.paths = vessels
            .iter()
            .map(|v| FlowPath {
                name: v.name.clone(),
                centerline: v.centerline.clone(),
                speed: v.flow_speed,
            })
            .collect();
        self.respawn();
    }

    /// Switch mode, respawning the pool to recolor it
    ///
    /// The pool size does not change.
    pub fn set_mode(&mut self, mode: VisualizationMode) {
        self.mode = mode;
        self.respawn();
    }

    /// Discard the pool and spawn a fresh one of the same size
    ///
    /// Assigns vessels, spawn positions, speeds and colors.
    pub fn respawn(&mut self) {
        let count = if self.paths.is_empty() {
            if self.params.count > 0 {
                log::warn!("No vessels to advect particles along, pool left empty");
            }
            0
        } else {
            self.params.count
        };

        self.particles.clear();
        self.positions.clear();
        self.colors.clear();
        self.particles.reserve(count);
        self.positions.reserve(count);
        self.colors.reserve(count);

        for i in 0..count {
            let vessel_index = i % self.paths.len();
            let path = &self.paths[vessel_index];
            let spawn_t: f32 = self.rng.gen();
            let speed = path.speed + (self.rng.gen::<f32>() - 0.5) * self.params.speed_jitter;

            let position = path.centerline.try_point_at(spawn_t).unwrap_or(Vec3::ZERO);
            let color = particle_color_for(spawn_t, &path.name, self.mode);

            self.particles.push(Particle {
                vessel_index,
                speed,
                spawn_t,
            });
            self.positions.push(position.to_array());
            self.colors.push(color.to_array());
        }

        self.generation += 1;
        self.dirty = true;
    }

    /// Curve parameter of a particle with `speed` at `time_sec`
    pub fn flow_parameter(&self, speed: f32, time_sec: f64) -> f32 {
        let base = (time_sec * speed as f64 * self.params.time_scale as f64).rem_euclid(1.0);
        let pulse = (time_sec * self.params.pulse_frequency as f64).sin()
            * self.params.pulse_amplitude as f64;
        (base + pulse).clamp(0.0, 1.0) as f32
    }

    /// Move every particle to its position at `time_sec`
    ///
    /// A particle whose curve evaluation fails keeps its previous position.
    /// Returns the number of particles that were skipped.
    pub fn advance(&mut self, time_sec: f64) -> usize {
        let jitter = self.params.jitter;
        let mut skipped = 0;

        for i in 0..self.particles.len() {
            let particle = self.particles[i];
            let Some(path) = self.paths.get(particle.vessel_index) else {
                skipped += 1;
                continue;
            };

            let t = self.flow_parameter(particle.speed, time_sec);
            let Some(point) = path.centerline.try_point_at(t) else {
                skipped += 1;
                continue;
            };

            let offset = Vec3::new(
                (self.rng.gen::<f32>() - 0.5) * 2.0 * jitter,
                (self.rng.gen::<f32>() - 0.5) * 2.0 * jitter,
                (self.rng.gen::<f32>() - 0.5) * 2.0 * jitter,
            );
            self.positions[i] = (point + offset).to_array();
        }

        self.dirty = true;
        skipped
    }

    /// Per-frame update; positions only move while animating
    pub fn update(&mut self, time_sec: f64, is_animating: bool) {
        if is_animating {
            self.advance(time_sec);
        }
    }

    /// Returns true once after the buffers changed
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn params(&self) -> &ParticleParameters {
        &self.params
    }

    /// Name of the vessel a particle belongs to
    pub fn vessel_name(&self, particle_index: usize) -> Option<&str> {
        let particle = self.particles.get(particle_index)?;
        self.paths.get(particle.vessel_index).map(|p| p.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VesselParameters;

    fn system(seed: u64) -> ParticleSystem {
        let vessels = VesselParameters::default().to_vessels();
        ParticleSystem::with_seed(
            &vessels,
            VisualizationMode::Velocity,
            ParticleParameters::default(),
            seed,
        )
    }

    #[test]
    fn test_round_robin_assignment() {
        let sys = system(1);
        assert_eq!(sys.len(), 1200);
        for (i, p) in sys.particles().iter().enumerate() {
            assert_eq!(p.vessel_index, i % 3);
        }
        assert_eq!(sys.vessel_name(4), Some("mca"));
    }

    #[test]
    fn test_speed_jitter_bounds() {
        let sys = system(2);
        let base = [0.3, 0.8, 0.4];
        for p in sys.particles() {
            let delta = p.speed - base[p.vessel_index];
            assert!(delta.abs() <= 0.125 + 1e-6, "delta {}", delta);
        }
    }

    #[test]
    fn test_flow_parameter_in_unit_range() {
        let sys = system(3);
        for i in 0..500 {
            let time = i as f64 * 0.137 + 1.7e9;
            for speed in [0.175, 0.3, 0.8, 0.925] {
                let t = sys.flow_parameter(speed, time);
                assert!((0.0..=1.0).contains(&t));
            }
        }
    }

    #[test]
    fn test_advance_stays_near_centerline() {
        let vessels = VesselParameters::default().to_vessels();
        let mut sys = system(4);
        sys.advance(12.5);
        let jitter = sys.params().jitter;
        for (i, p) in sys.particles().iter().enumerate() {
            let t = sys.flow_parameter(p.speed, 12.5);
            let on_curve = vessels[p.vessel_index].centerline.point_at(t);
            let pos = Vec3::from_array(sys.positions()[i]);
            let d = (pos - on_curve).abs();
            assert!(d.max_element() <= jitter + 1e-5);
        }
    }

    #[test]
    fn test_mode_change_keeps_pool_size_and_recolors() {
        let mut sys = system(5);
        let before = sys.colors().to_vec();
        sys.set_mode(VisualizationMode::Wss);
        assert_eq!(sys.len(), 1200);
        assert_eq!(sys.mode(), VisualizationMode::Wss);
        assert_ne!(before, sys.colors());
        assert_eq!(sys.generation(), 2);
    }

    #[test]
    fn test_colors_follow_spawn_parameter() {
        let sys = system(6);
        for (i, p) in sys.particles().iter().enumerate().take(30) {
            let name = sys.vessel_name(i).unwrap();
            let expected = particle_color_for(p.spawn_t, name, VisualizationMode::Velocity);
            assert_eq!(sys.colors()[i], expected.to_array());
        }
    }

    #[test]
    fn test_paused_update_freezes_positions() {
        let mut sys = system(7);
        sys.update(1.0, true);
        let frozen = sys.positions().to_vec();
        assert!(sys.take_dirty());
        for frame in 0..10 {
            sys.update(1.0 + frame as f64 / 60.0, false);
        }
        assert_eq!(frozen, sys.positions());
        assert!(!sys.take_dirty());
    }

    #[test]
    fn test_failed_path_keeps_previous_position() {
        let mut vessels = VesselParameters::default().to_vessels();
        vessels[1].centerline = Centerline::new(vec![Vec3::splat(f32::NAN); 4]);
        let mut sys = ParticleSystem::with_seed(
            &vessels,
            VisualizationMode::Pressure,
            ParticleParameters::default(),
            8,
        );
        let before = sys.positions().to_vec();
        let skipped = sys.advance(3.0);
        assert_eq!(skipped, 400);
        for (i, p) in sys.particles().iter().enumerate() {
            if p.vessel_index == 1 {
                assert_eq!(sys.positions()[i], before[i]);
            } else {
                assert_ne!(sys.positions()[i], before[i]);
            }
        }
    }

    #[test]
    fn test_no_vessels_empty_pool() {
        let mut sys = ParticleSystem::with_seed(
            &[],
            VisualizationMode::Velocity,
            ParticleParameters::default(),
            9,
        );
        assert!(sys.is_empty());
        assert_eq!(sys.advance(1.0), 0);
    }

    #[test]
    fn test_seeded_pools_reproducible() {
        assert_eq!(system(42).particles(), system(42).particles());
    }
}
