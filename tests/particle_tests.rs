//! Integration tests for flow particle advection.
//!
//! Tests verify:
//! - Round-robin assignment and pool size across mode changes
//! - Pulsatile curve parameter stays in [0, 1]
//! - Positions freeze while the animation is paused
//! - Spawn colors only change with the mode

use cerebral_flow_viz::{
    color::{particle_color_for, VisualizationMode},
    config::{ParticleParameters, VesselParameters},
    geometry::Vessel,
    particles::{wall_clock_seconds, ParticleSystem},
};
use glam::Vec3;

fn vessels() -> Vec<Vessel> {
    VesselParameters::default().to_vessels()
}

fn seeded(mode: VisualizationMode, seed: u64) -> ParticleSystem {
    ParticleSystem::with_seed(&vessels(), mode, ParticleParameters::default(), seed)
}

#[test]
fn test_pool_size_invariant_across_modes() {
    let mut system = seeded(VisualizationMode::Velocity, 1);
    for mode in [
        VisualizationMode::Wss,
        VisualizationMode::Pressure,
        VisualizationMode::Velocity,
        VisualizationMode::Wss,
    ] {
        system.set_mode(mode);
        assert_eq!(system.len(), 1200);
        assert_eq!(system.positions().len(), 1200);
        assert_eq!(system.colors().len(), 1200);
    }
}

#[test]
fn test_round_robin_distribution() {
    let system = seeded(VisualizationMode::Velocity, 2);
    let mut per_vessel = [0usize; 3];
    for p in system.particles() {
        per_vessel[p.vessel_index] += 1;
    }
    assert_eq!(per_vessel, [400, 400, 400]);
    assert_eq!(system.vessel_name(0), Some("carotid"));
    assert_eq!(system.vessel_name(1), Some("mca"));
    assert_eq!(system.vessel_name(2), Some("aca"));
}

#[test]
fn test_custom_pool_size() {
    let params = ParticleParameters {
        count: 10,
        ..Default::default()
    };
    let system = ParticleSystem::with_seed(&vessels(), VisualizationMode::Pressure, params, 3);
    let indices: Vec<_> = system.particles().iter().map(|p| p.vessel_index).collect();
    assert_eq!(indices, [0, 1, 2, 0, 1, 2, 0, 1, 2, 0]);
}

#[test]
fn test_flow_parameter_bounds_over_long_run() {
    let system = seeded(VisualizationMode::Velocity, 4);
    for frame in 0..10_000 {
        let time = frame as f64 / 60.0;
        for p in system.particles().iter().take(6) {
            let t = system.flow_parameter(p.speed, time);
            assert!((0.0..=1.0).contains(&t), "t={} at frame {}", t, frame);
        }
    }
}

#[test]
fn test_pulse_term_shifts_parameter() {
    let system = seeded(VisualizationMode::Velocity, 5);
    // time · speed · 0.5 = 0.25, plus 0.02 · sin(2 · time)
    let a = system.flow_parameter(0.5, 1.0);
    let expected = 0.25 + (2.0f64).sin() as f32 * 0.02;
    assert!((a - expected).abs() < 1e-5, "{} vs {}", a, expected);
}

/// Range of curve parameters reached by one vessel's particles at `time`
fn vessel_parameter_range(system: &ParticleSystem, vessel_index: usize, time: f64) -> (f32, f32) {
    system
        .particles()
        .iter()
        .filter(|p| p.vessel_index == vessel_index)
        .map(|p| system.flow_parameter(p.speed, time))
        .fold((f32::MAX, f32::MIN), |(lo, hi), t| (lo.min(t), hi.max(t)))
}

#[test]
fn test_wall_clock_spreads_particles_along_vessels() {
    let system = seeded(VisualizationMode::Velocity, 1);
    for time in [1.79e9, wall_clock_seconds()] {
        for vessel_index in 0..3 {
            let (lo, hi) = vessel_parameter_range(&system, vessel_index, time);
            assert!(lo < 0.1 && hi > 0.9, "vessel {} covers [{}, {}] at {}", vessel_index, lo, hi, time);
        }
    }
}

#[test]
fn test_seconds_since_start_would_bunch_particles() {
    // A clock starting at zero leaves the pool in a narrow band for seconds
    let system = seeded(VisualizationMode::Velocity, 1);
    let (lo, hi) = vessel_parameter_range(&system, 0, 1.0);
    assert!(hi - lo < 0.5, "carotid covers [{}, {}]", lo, hi);
}

#[test]
fn test_wall_clock_is_epoch_seconds() {
    // Later than 2020-01-01
    assert!(wall_clock_seconds() > 1.5e9);
}

#[test]
fn test_respawn_keeps_pool_size() {
    let mut system = seeded(VisualizationMode::Pressure, 12);
    let spawn: Vec<f32> = system.particles().iter().map(|p| p.spawn_t).collect();
    system.respawn();
    assert_eq!(system.len(), 1200);
    assert_eq!(system.generation(), 2);
    let respawned: Vec<f32> = system.particles().iter().map(|p| p.spawn_t).collect();
    assert_ne!(spawn, respawned);
}

#[test]
fn test_positions_freeze_when_paused() {
    let mut system = seeded(VisualizationMode::Wss, 6);
    system.update(4.0, true);
    let snapshot = system.positions().to_vec();
    for frame in 1..=120 {
        system.update(4.0 + frame as f64 / 60.0, false);
    }
    assert_eq!(system.positions(), snapshot.as_slice());
}

#[test]
fn test_positions_move_when_animating() {
    let mut system = seeded(VisualizationMode::Velocity, 7);
    system.update(1.0, true);
    let first = system.positions().to_vec();
    system.update(1.5, true);
    let moved = first
        .iter()
        .zip(system.positions())
        .filter(|(a, b)| Vec3::from_array(**a).distance(Vec3::from_array(**b)) > 1e-3)
        .count();
    assert!(moved > 1000, "only {} particles moved", moved);
}

#[test]
fn test_colors_fixed_during_animation() {
    let mut system = seeded(VisualizationMode::Pressure, 8);
    let colors = system.colors().to_vec();
    for frame in 0..60 {
        system.update(frame as f64 / 60.0, true);
    }
    assert_eq!(system.colors(), colors.as_slice());
}

#[test]
fn test_mode_change_recolors_from_spawn() {
    let mut system = seeded(VisualizationMode::Velocity, 9);
    system.set_mode(VisualizationMode::Wss);
    for (i, p) in system.particles().iter().enumerate() {
        let name = system.vessel_name(i).expect("particle has a vessel");
        let expected = particle_color_for(p.spawn_t, name, VisualizationMode::Wss).to_array();
        assert_eq!(system.colors()[i], expected);
    }
}

#[test]
fn test_dirty_flag_tracks_uploads() {
    let mut system = seeded(VisualizationMode::Velocity, 10);
    assert!(system.take_dirty());
    assert!(!system.take_dirty());
    system.advance(0.5);
    assert!(system.is_dirty());
    assert!(system.take_dirty());
}
