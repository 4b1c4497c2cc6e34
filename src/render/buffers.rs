//! GPU-side storage for tube meshes and flow particles.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::geometry::TubeMesh;
use crate::particles::ParticleSystem;
use crate::state::GeometryBackend;

/// Vertex and index buffers of one uploaded tube
pub struct GpuTubeMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

/// [`GeometryBackend`] that uploads tubes to wgpu buffers
///
/// Released handles have their buffers destroyed immediately rather than
/// waiting for the last reference to drop.
pub struct GpuGeometryBackend {
    device: Arc<wgpu::Device>,
    live: usize,
}

impl GpuGeometryBackend {
    pub fn new(device: Arc<wgpu::Device>) -> Self {
        Self { device, live: 0 }
    }
}

impl GeometryBackend for GpuGeometryBackend {
    type Handle = GpuTubeMesh;

    fn allocate(&mut self, mesh: &TubeMesh) -> GpuTubeMesh {
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Tube Vertex Buffer ({})", mesh.vessel_name)),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Tube Index Buffer ({})", mesh.vessel_name)),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        self.live += 1;

        GpuTubeMesh {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    fn release(&mut self, handle: GpuTubeMesh) {
        handle.vertex_buffer.destroy();
        handle.index_buffer.destroy();
        self.live -= 1;
    }

    fn live_count(&self) -> usize {
        self.live
    }
}

/// Per-instance data of a particle sprite
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Instance buffer mirroring the particle pool
#[derive(Default)]
pub struct ParticleBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
    count: u32,
    staging: Vec<ParticleInstance>,
}

impl ParticleBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the pool if it changed since the last call
    pub fn sync(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, particles: &mut ParticleSystem) {
        if !particles.take_dirty() {
            return;
        }

        self.staging.clear();
        self.staging.extend(
            particles
                .positions()
                .iter()
                .zip(particles.colors())
                .map(|(&position, &color)| ParticleInstance { position, color }),
        );
        self.count = self.staging.len() as u32;

        if self.staging.is_empty() {
            return;
        }

        if self.staging.len() > self.capacity || self.buffer.is_none() {
            if let Some(old) = self.buffer.take() {
                old.destroy();
            }
            self.buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Particle Instance Buffer"),
                contents: bytemuck::cast_slice(&self.staging),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            }));
            self.capacity = self.staging.len();
            log::debug!("Allocated particle buffer for {} instances", self.capacity);
        } else if let Some(buffer) = &self.buffer {
            queue.write_buffer(buffer, 0, bytemuck::cast_slice(&self.staging));
        }
    }

    /// Buffer and instance count, if there is anything to draw
    pub fn drawable(&self) -> Option<(&wgpu::Buffer, u32)> {
        match &self.buffer {
            Some(buffer) if self.count > 0 => Some((buffer, self.count)),
            _ => None,
        }
    }
}

impl Drop for ParticleBuffer {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            buffer.destroy();
        }
    }
}
