//! Per-frame scene statistics shown in the HUD and printed by diagnostics.

use serde::Serialize;

use super::resources::GeometryBackend;
use super::scene::FlowScene;
use crate::color::VisualizationMode;

/// Snapshot of the scene at one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameMetrics {
    pub fps: f32,
    pub mode: VisualizationMode,
    pub is_animating: bool,
    pub show_particles: bool,
    pub vessel_count: usize,
    pub particle_count: usize,
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub rebuild_count: u64,
    pub live_resources: usize,
    pub frame: u64,
}

impl FrameMetrics {
    pub fn capture<B: GeometryBackend>(scene: &FlowScene<B>, fps: f32) -> Self {
        let geometry = scene.geometry();
        Self {
            fps,
            mode: scene.mode(),
            is_animating: scene.is_animating(),
            show_particles: scene.show_particles(),
            vessel_count: scene.vessels().len(),
            particle_count: scene.particles().len(),
            triangle_count: geometry.triangle_count(),
            vertex_count: geometry.vertex_count(),
            rebuild_count: geometry.rebuild_count(),
            live_resources: geometry.live_resources(),
            frame: scene.frame_count(),
        }
    }
}

/// Exponentially smoothed frame rate
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    smoothed: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self { smoothed: 60.0 }
    }
}

impl FpsCounter {
    /// Feed one frame duration in seconds
    pub fn tick(&mut self, dt_sec: f32) -> f32 {
        if dt_sec > 0.0 && dt_sec.is_finite() {
            self.smoothed = self.smoothed * 0.9 + (1.0 / dt_sec) * 0.1;
        }
        self.smoothed
    }

    pub fn fps(&self) -> f32 {
        self.smoothed
    }
}
