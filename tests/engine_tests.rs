//! Engine tests for vessel geometry and scalar coloring.
//!
//! Properties checked against the default scene:
//! | Property | Expectation |
//! |----------|-------------|
//! | Radius | positive everywhere, continuous at pathology bounds |
//! | mca stenosis | dip inside (0.25, 0.75), minimum 0.45 × base at 0.5 |
//! | carotid aneurysm | bulge inside (0.45, 0.65), maximum 1.65 × base at 0.55 |
//! | Colors | channels in [0, 1] for every mode, vessel and t |
//! | Tubes | 2·C·(S−1) triangles, indices in range |

use cerebral_flow_viz::{
    color::{color_for, particle_color_for, synthetic_scalar, VisualizationMode},
    config::{TubeParameters, VesselParameters},
    geometry::{Centerline, TubeMesh, Vessel},
};
use glam::Vec3;

fn default_vessels() -> Vec<Vessel> {
    VesselParameters::default().to_vessels()
}

fn vessel(name: &str) -> Vessel {
    default_vessels()
        .into_iter()
        .find(|v| v.name == name)
        .expect("default vessel present")
}

// ============================================================================
// Radius Profile Tests
// ============================================================================

#[test]
fn test_radius_positive_everywhere() {
    for vessel in default_vessels() {
        for i in 0..=1000 {
            let t = i as f32 / 1000.0;
            let r = vessel.radius_at(t);
            assert!(r > 0.0, "{} radius at t={} is {}", vessel.name, t, r);
        }
    }
}

#[test]
fn test_mca_stenosis_dip() {
    let mca = vessel("mca");
    assert!((mca.base_radius - 0.22).abs() < 1e-6);
    assert!(mca.radius_at(0.5) < mca.radius_at(0.0));
    assert!((mca.radius_at(0.5) - 0.22 * 0.45).abs() < 1e-5);

    for i in 1..100 {
        let t = 0.25 + 0.5 * i as f32 / 100.0;
        assert!(mca.radius_at(t) < mca.base_radius, "no dip at t={}", t);
    }
    assert_eq!(mca.radius_at(0.1), mca.base_radius);
    assert_eq!(mca.radius_at(0.9), mca.base_radius);
}

#[test]
fn test_carotid_aneurysm_bulge() {
    let carotid = vessel("carotid");
    assert!((carotid.radius_at(0.55) - 0.35 * 1.65).abs() < 1e-4);
    for i in 1..50 {
        let t = 0.45 + 0.2 * i as f32 / 50.0;
        assert!(carotid.radius_at(t) > carotid.base_radius, "no bulge at t={}", t);
    }
    assert_eq!(carotid.radius_at(0.3), carotid.base_radius);
}

#[test]
fn test_radius_continuous_at_pathology_bounds() {
    let eps = 1e-5;
    for (name, bounds) in [("mca", [0.25, 0.75]), ("carotid", [0.45, 0.65])] {
        let v = vessel(name);
        for b in bounds {
            let jump = (v.radius_at(b + eps) - v.radius_at(b - eps)).abs();
            assert!(jump < 1e-3 * v.base_radius, "{} jumps by {} at {}", name, jump, b);
        }
    }
}

#[test]
fn test_aca_is_healthy() {
    let aca = vessel("aca");
    assert!(aca.pathology.is_none());
    assert_eq!(aca.radius_range(200), (0.22, 0.22));
}

// ============================================================================
// Color Mapping Tests
// ============================================================================

#[test]
fn test_colors_normalized_for_all_inputs() {
    for mode in VisualizationMode::ALL {
        for name in ["carotid", "mca", "aca", "basilar", ""] {
            for i in 0..=200 {
                let t = i as f32 / 200.0;
                let surface = color_for(t, name, mode);
                let particle = particle_color_for(t, name, mode);
                assert!(surface.is_normalized(), "{:?} {} {} {:?}", mode, name, t, surface);
                assert!(particle.is_normalized(), "{:?} {} {} {:?}", mode, name, t, particle);
            }
        }
    }
}

#[test]
fn test_mca_velocity_gradient_visible() {
    let start = color_for(0.0, "mca", VisualizationMode::Velocity);
    let end = color_for(1.0, "mca", VisualizationMode::Velocity);
    assert_ne!(start, end);
}

#[test]
fn test_stenosis_speeds_up_flow() {
    let inside = synthetic_scalar(0.5, "mca", VisualizationMode::Velocity);
    let outside = synthetic_scalar(0.5, "aca", VisualizationMode::Velocity);
    assert!(inside > outside);
}

#[test]
fn test_modes_color_differently() {
    let t = 0.5;
    let v = color_for(t, "carotid", VisualizationMode::Velocity);
    let p = color_for(t, "carotid", VisualizationMode::Pressure);
    let w = color_for(t, "carotid", VisualizationMode::Wss);
    assert_ne!(v, p);
    assert_ne!(p, w);
    assert_ne!(v, w);
}

// ============================================================================
// Tube Mesh Tests
// ============================================================================

#[test]
fn test_tube_counts_for_default_scene() {
    let params = TubeParameters::default();
    let meshes = TubeMesh::build_all(&default_vessels(), VisualizationMode::Pressure, &params);
    assert_eq!(meshes.len(), 3);
    for mesh in &meshes {
        assert_eq!(mesh.triangle_count(), 2 * 16 * 100);
        assert_eq!(mesh.vertex_count(), 101 * 16);
        let max = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }
}

#[test]
fn test_tube_counts_for_custom_tessellation() {
    let params = TubeParameters {
        segments: 7,
        ring_vertices: 9,
    };
    let mesh = TubeMesh::build(&vessel("aca"), VisualizationMode::Velocity, &params);
    assert_eq!(mesh.triangle_count(), 2 * 9 * 7);
}

#[test]
fn test_tube_colors_match_mapper() {
    let params = TubeParameters::default();
    let mca = vessel("mca");
    let mesh = TubeMesh::build(&mca, VisualizationMode::Wss, &params);
    for ring in [0, 25, 50, 100] {
        let t = ring as f32 / 100.0;
        let expected = color_for(t, "mca", VisualizationMode::Wss).to_array();
        assert_eq!(mesh.vertices[ring * 16].color, expected);
    }
}

#[test]
fn test_stenosis_narrows_tube() {
    let params = TubeParameters::default();
    let mca = vessel("mca");
    let mesh = TubeMesh::build(&mca, VisualizationMode::Velocity, &params);
    let centers = mca.centerline.sample(params.segments);

    let ring_radius = |ring: usize| mesh.vertices[ring * 16].position_vec3().distance(centers[ring]);
    assert!(ring_radius(50) < ring_radius(10) * 0.5);
}

// ============================================================================
// Centerline Tests
// ============================================================================

#[test]
fn test_centerline_interpolates_control_points() {
    let points = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 2.0, 0.0),
        Vec3::new(2.0, 2.5, 1.0),
        Vec3::new(4.0, 3.0, 1.0),
    ];
    let curve = Centerline::new(points.clone());
    assert!(curve.point_at(0.0).distance(points[0]) < 1e-5);
    assert!(curve.point_at(1.0).distance(points[3]) < 1e-5);
    assert!(curve.point_at(1.0 / 3.0).distance(points[1]) < 1e-4);
    assert!(curve.point_at(2.0 / 3.0).distance(points[2]) < 1e-4);
}

#[test]
fn test_centerline_sample_count() {
    let curve = vessel("carotid").centerline;
    let samples = curve.sample(100);
    assert_eq!(samples.len(), 101);
    assert!(samples.iter().all(|p| p.is_finite()));
}
