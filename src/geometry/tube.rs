//! Tube mesh generation along vessel centerlines.
//!
//! Sweeps a ring of vertices along the sampled centerline, scaling each ring
//! by the vessel's effective radius and coloring it from the active
//! hemodynamic mode, then stitches consecutive rings into quads.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use super::Vessel;
use crate::color::{color_for, VisualizationMode};
use crate::config::TubeParameters;

/// Tangents with |y| above this use world X as the up reference
const UP_PARALLEL_THRESHOLD: f32 = 0.9;

/// A vertex of the tube surface
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TubeVertex {
    /// Position in scene units
    pub position: [f32; 3],
    /// Outward surface normal (normalized)
    pub normal: [f32; 3],
    /// Linear RGB
    pub color: [f32; 3],
}

impl TubeVertex {
    pub fn position_vec3(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn normal_vec3(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}

/// Local orthonormal frame at one centerline sample
#[derive(Debug, Clone, Copy)]
pub struct RingFrame {
    pub tangent: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl RingFrame {
    /// Build a frame around `tangent`
    ///
    /// The up reference is world Y unless the tangent is nearly vertical, in
    /// which case world X is used. A zero tangent (last ring) yields a
    /// degenerate but finite frame.
    pub fn from_tangent(tangent: Vec3) -> Self {
        let reference = if tangent.y.abs() < UP_PARALLEL_THRESHOLD {
            Vec3::Y
        } else {
            Vec3::X
        };
        let right = tangent.cross(reference).normalize_or_zero();
        let up = right.cross(tangent).normalize_or_zero();
        Self { tangent, right, up }
    }

    /// Unit direction from the ring center at `angle` radians
    pub fn radial(&self, angle: f32) -> Vec3 {
        self.right * angle.cos() + self.up * angle.sin()
    }
}

/// Triangulated tube surface for one vessel
#[derive(Debug, Clone)]
pub struct TubeMesh {
    /// Name of the vessel this tube was built from
    pub vessel_name: String,
    /// Mode the vertex colors were computed for
    pub mode: VisualizationMode,
    /// Ring vertices, ring-major
    pub vertices: Vec<TubeVertex>,
    /// Triangle indices (3 per triangle)
    pub indices: Vec<u32>,
    /// Number of centerline samples (rings)
    pub ring_count: usize,
    /// Vertices per ring
    pub ring_vertices: usize,
}

impl TubeMesh {
    /// Build the tube for one vessel colored for `mode`
    pub fn build(vessel: &Vessel, mode: VisualizationMode, params: &TubeParameters) -> Self {
        let segments = params.segments.max(1);
        let ring_vertices = params.ring_vertices.max(3);
        let points = vessel.centerline.sample(segments);
        let ring_count = points.len();

        let mut vertices = Vec::with_capacity(ring_count * ring_vertices);
        let mut indices = Vec::with_capacity(6 * ring_vertices * (ring_count - 1));

        for (i, &point) in points.iter().enumerate() {
            let t = i as f32 / (ring_count - 1) as f32;

            // Forward difference; the last sample is its own neighbour
            let next = points.get(i + 1).copied().unwrap_or(point);
            let frame = RingFrame::from_tangent((next - point).normalize_or_zero());

            let radius = vessel.radius_at(t);
            let color = color_for(t, &vessel.name, mode).to_array();

            for j in 0..ring_vertices {
                let angle = j as f32 / ring_vertices as f32 * std::f32::consts::TAU;
                let radial = frame.radial(angle);
                vertices.push(TubeVertex {
                    position: (point + radial * radius).to_array(),
                    normal: radial.normalize_or_zero().to_array(),
                    color,
                });
            }
        }

        let c = ring_vertices as u32;
        for i in 0..(ring_count as u32 - 1) {
            for j in 0..c {
                let a = i * c + j;
                let b = i * c + (j + 1) % c;
                let cc = (i + 1) * c + (j + 1) % c;
                let d = (i + 1) * c + j;

                indices.extend_from_slice(&[a, b, cc]);
                indices.extend_from_slice(&[a, cc, d]);
            }
        }

        Self {
            vessel_name: vessel.name.clone(),
            mode,
            vertices,
            indices,
            ring_count,
            ring_vertices,
        }
    }

    /// Build one tube per vessel
    pub fn build_all(
        vessels: &[Vessel],
        mode: VisualizationMode,
        params: &TubeParameters,
    ) -> Vec<Self> {
        vessels
            .iter()
            .map(|vessel| Self::build(vessel, mode, params))
            .collect()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Calculate the surface area of the mesh
    pub fn surface_area(&self) -> f32 {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                let v1 = self.vertices[tri[0] as usize].position_vec3();
                let v2 = self.vertices[tri[1] as usize].position_vec3();
                let v3 = self.vertices[tri[2] as usize].position_vec3();
                (v2 - v1).cross(v3 - v1).length() / 2.0
            })
            .sum()
    }

    /// Size of the vertex and index data in bytes
    pub fn byte_size(&self) -> usize {
        std::mem::size_of_val(self.vertices.as_slice()) + std::mem::size_of_val(self.indices.as_slice())
    }
}
