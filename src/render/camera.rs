//! Orbit camera for the vessel scene.
//!
//! Orbits the bifurcation with mouse drag, zooms with scroll and slowly
//! auto-rotates. Also provides the billboard axes used by particle sprites.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::ViewParameters;

const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 30.0;

/// Camera uniform data sent to GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix
    pub view_proj: [[f32; 4]; 4],
    /// Camera position for lighting calculations
    pub camera_pos: [f32; 4],
    /// Camera right axis in world space (sprite billboarding)
    pub right: [f32; 4],
    /// Camera up axis in world space (sprite billboarding)
    pub up: [f32; 4],
}

/// Orbit camera that rotates around a target point
pub struct Camera {
    /// Target point to orbit around
    pub target: Vec3,
    /// Distance from target
    pub distance: f32,
    /// Azimuthal angle (radians, rotation around Y axis)
    pub azimuth: f32,
    /// Polar angle (radians, elevation from horizontal)
    pub elevation: f32,
    /// Vertical field of view (radians)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Auto-rotation speed (radians per second), 0 to disable
    pub auto_rotate_speed: f32,
    home_target: Vec3,
    home_distance: f32,
}

impl Camera {
    /// Create a camera looking at the scene head-on from `view.camera_distance`
    pub fn new(view: &ViewParameters, aspect: f32) -> Self {
        let target = Vec3::from_array(view.camera_target);
        let distance = view.camera_distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        Self {
            target,
            distance,
            azimuth: 0.0,
            elevation: 0.0,
            fov: view.fov_degrees.to_radians(),
            near: 0.1,
            far: 100.0,
            aspect,
            auto_rotate_speed: view.auto_rotate_speed,
            home_target: target,
            home_distance: distance,
        }
    }

    /// Calculate camera position from orbital parameters
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.sin();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get camera uniform data for GPU
    pub fn to_uniform(&self) -> CameraUniform {
        let position = self.position();
        let forward = (self.target - position).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            camera_pos: position.extend(1.0).to_array(),
            right: right.extend(0.0).to_array(),
            up: up.extend(0.0).to_array(),
        }
    }

    /// Orbit the camera by delta angles
    pub fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        self.azimuth += delta_azimuth;
        self.elevation = (self.elevation + delta_elevation)
            .clamp(-std::f32::consts::FRAC_PI_2 + 0.1, std::f32::consts::FRAC_PI_2 - 0.1);
    }

    /// Zoom by changing distance
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Advance auto-rotation
    pub fn update(&mut self, delta_time: f32) {
        if self.auto_rotate_speed != 0.0 {
            self.azimuth += self.auto_rotate_speed * delta_time;
        }
    }

    /// Return to the initial view
    pub fn reset(&mut self) {
        self.azimuth = 0.0;
        self.elevation = 0.0;
        self.distance = self.home_distance;
        self.target = self.home_target;
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}
