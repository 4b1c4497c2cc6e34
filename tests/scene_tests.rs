//! Integration tests for the scene resource lifecycle.
//!
//! The headless backend counts live allocations, so rebuild leaks show up
//! as a growing live count without a GPU.

use cerebral_flow_viz::{
    color::VisualizationMode,
    config::{Parameters, TubeParameters, VesselParameters},
    state::{BuildPhase, FlowScene, FrameMetrics, GeometryBackend, HeadlessBackend, SceneGeometry},
};

fn scene() -> FlowScene<HeadlessBackend> {
    FlowScene::with_seed(Parameters::default(), HeadlessBackend::new(), 21)
}

#[test]
fn test_identical_rebuilds_do_not_leak() {
    let vessels = VesselParameters::default().to_vessels();
    let params = TubeParameters::default();
    let mut geometry = SceneGeometry::new(HeadlessBackend::new());

    geometry.rebuild(&vessels, 0, VisualizationMode::Velocity, &params);
    let live = geometry.backend().live_count();
    let bytes = geometry.backend().live_bytes();

    geometry.rebuild(&vessels, 0, VisualizationMode::Velocity, &params);
    assert_eq!(geometry.backend().live_count(), live);
    assert_eq!(geometry.backend().live_bytes(), bytes);
    assert_eq!(geometry.phase(), BuildPhase::Ready);
}

#[test]
fn test_mode_toggling_does_not_accumulate() {
    let mut scene = scene();
    let live = scene.geometry().live_resources();
    let bytes = scene.geometry().backend().live_bytes();

    for i in 0..30 {
        scene.set_mode(VisualizationMode::ALL[i % 3]);
        scene.frame(i as f64 / 60.0);
    }

    assert_eq!(scene.geometry().live_resources(), live);
    assert_eq!(scene.geometry().backend().live_bytes(), bytes);
    assert_eq!(scene.geometry().backend().total_allocations(), 3 * 30);
}

#[test]
fn test_frame_does_not_rebuild_unchanged_scene() {
    let mut scene = scene();
    for i in 0..100 {
        scene.frame(i as f64 / 60.0);
    }
    assert_eq!(scene.geometry().rebuild_count(), 1);
}

#[test]
fn test_initial_mode_from_parameters() {
    let mut params = Parameters::default();
    params.view.initial_mode = VisualizationMode::Pressure;
    params.view.animate = false;
    let scene = FlowScene::with_seed(params, HeadlessBackend::new(), 1);
    assert_eq!(scene.mode(), VisualizationMode::Pressure);
    assert_eq!(scene.particles().mode(), VisualizationMode::Pressure);
    assert!(!scene.is_animating());
    assert!(scene
        .geometry()
        .meshes()
        .iter()
        .all(|m| m.mode == VisualizationMode::Pressure));
}

#[test]
fn test_hidden_particles_do_not_advance() {
    let mut scene = scene();
    scene.frame(1.0);
    scene.set_show_particles(false);
    let positions = scene.particles().positions().to_vec();
    scene.frame(2.0);
    assert_eq!(scene.particles().positions(), positions.as_slice());

    scene.set_show_particles(true);
    scene.frame(3.0);
    assert_ne!(scene.particles().positions(), positions.as_slice());
}

#[test]
fn test_showing_particles_starts_fresh_pool() {
    let mut scene = scene();
    assert_eq!(scene.particles().generation(), 1);

    scene.set_show_particles(false);
    assert_eq!(scene.particles().generation(), 1);
    scene.set_show_particles(false);
    scene.set_show_particles(true);
    assert_eq!(scene.particles().generation(), 2);
    assert_eq!(scene.particles().len(), 1200);

    // Already shown
    scene.set_show_particles(true);
    assert_eq!(scene.particles().generation(), 2);
}

#[test]
fn test_drop_releases_resources() {
    struct SharedCounter<'a>(&'a std::cell::Cell<usize>);

    impl GeometryBackend for SharedCounter<'_> {
        type Handle = ();

        fn allocate(&mut self, _mesh: &cerebral_flow_viz::TubeMesh) {
            self.0.set(self.0.get() + 1);
        }

        fn release(&mut self, _handle: ()) {
            self.0.set(self.0.get() - 1);
        }

        fn live_count(&self) -> usize {
            self.0.get()
        }
    }

    let live = std::cell::Cell::new(0);
    {
        let scene = FlowScene::with_seed(Parameters::default(), SharedCounter(&live), 5);
        assert_eq!(scene.geometry().live_resources(), 3);
    }
    assert_eq!(live.get(), 0);
}

#[test]
fn test_metrics_track_scene() {
    let mut scene = scene();
    scene.set_mode(VisualizationMode::Wss);
    scene.set_animating(false);
    let metrics = FrameMetrics::capture(&scene, 60.0);
    assert_eq!(metrics.mode, VisualizationMode::Wss);
    assert!(!metrics.is_animating);
    assert_eq!(metrics.rebuild_count, 2);
    assert_eq!(metrics.live_resources, 3);
}
