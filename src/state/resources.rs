//! Ownership of the per-vessel GPU geometry.
//!
//! Tube meshes move through an explicit lifecycle:
//!
//! Idle ──rebuild──▶ Building ──▶ Ready ──rebuild──▶ Building ──▶ Ready …
//!   ▲                                        │
//!   └──────────────────release───────────────┘
//!
//! Entering `Building` releases every resource held by the previous `Ready`
//! state, so repeated mode toggles never accumulate allocations. The
//! allocation itself goes through [`GeometryBackend`], which lets the same
//! lifecycle drive wgpu buffers in the viewer and plain bookkeeping in
//! headless runs and tests.

use crate::color::VisualizationMode;
use crate::config::TubeParameters;
use crate::geometry::{TubeMesh, Vessel};

/// Allocates and releases renderable resources for tube meshes
pub trait GeometryBackend {
    /// Handle to the resources backing one tube mesh
    type Handle;

    /// Upload a mesh and return its handle
    fn allocate(&mut self, mesh: &TubeMesh) -> Self::Handle;

    /// Release the resources behind a handle
    fn release(&mut self, handle: Self::Handle);

    /// Number of handles allocated and not yet released
    fn live_count(&self) -> usize;
}

/// Lifecycle phase of [`SceneGeometry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// Nothing allocated
    Idle,
    /// Previous resources released, new ones being allocated
    Building,
    /// One resource per vessel held
    Ready,
}

/// Key identifying what the current geometry was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BuildKey {
    vessels_revision: u64,
    mode: VisualizationMode,
}

/// Owned tube geometry for a vessel set
pub struct SceneGeometry<B: GeometryBackend> {
    backend: B,
    phase: BuildPhase,
    meshes: Vec<TubeMesh>,
    handles: Vec<B::Handle>,
    built_for: Option<BuildKey>,
    rebuild_count: u64,
}

impl<B: GeometryBackend> SceneGeometry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            phase: BuildPhase::Idle,
            meshes: Vec::new(),
            handles: Vec::new(),
            built_for: None,
            rebuild_count: 0,
        }
    }

    /// Release current resources and build new tubes for `vessels` in `mode`
    pub fn rebuild(
        &mut self,
        vessels: &[Vessel],
        vessels_revision: u64,
        mode: VisualizationMode,
        params: &TubeParameters,
    ) {
        self.release_held();
        self.phase = BuildPhase::Building;

        self.meshes = TubeMesh::build_all(vessels, mode, params);
        self.handles = self
            .meshes
            .iter()
            .map(|mesh| self.backend.allocate(mesh))
            .collect();

        self.built_for = Some(BuildKey {
            vessels_revision,
            mode,
        });
        self.rebuild_count += 1;
        self.phase = BuildPhase::Ready;

        log::debug!(
            "Rebuilt {} tube meshes for {} ({} triangles, {} live resources)",
            self.meshes.len(),
            mode,
            self.triangle_count(),
            self.backend.live_count()
        );
    }

    /// Rebuild only if the vessel revision or mode differs from the last build
    ///
    /// Returns true when a rebuild happened.
    pub fn ensure(
        &mut self,
        vessels: &[Vessel],
        vessels_revision: u64,
        mode: VisualizationMode,
        params: &TubeParameters,
    ) -> bool {
        let key = BuildKey {
            vessels_revision,
            mode,
        };
        if self.phase == BuildPhase::Ready && self.built_for == Some(key) {
            return false;
        }
        self.rebuild(vessels, vessels_revision, mode, params);
        true
    }

    /// Release everything and return to `Idle`
    pub fn release(&mut self) {
        self.release_held();
        self.meshes.clear();
        self.built_for = None;
        self.phase = BuildPhase::Idle;
    }

    fn release_held(&mut self) {
        for handle in self.handles.drain(..) {
            self.backend.release(handle);
        }
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    pub fn meshes(&self) -> &[TubeMesh] {
        &self.meshes
    }

    pub fn handles(&self) -> &[B::Handle] {
        &self.handles
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mode of the current geometry, if any
    pub fn mode(&self) -> Option<VisualizationMode> {
        self.built_for.map(|key| key.mode)
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    pub fn live_resources(&self) -> usize {
        self.backend.live_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(TubeMesh::triangle_count).sum()
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(TubeMesh::vertex_count).sum()
    }
}

impl<B: GeometryBackend> Drop for SceneGeometry<B> {
    fn drop(&mut self) {
        self.release_held();
    }
}

/// Handle issued by [`HeadlessBackend`]
#[derive(Debug, PartialEq, Eq)]
pub struct HeadlessHandle {
    id: u64,
    bytes: usize,
}

/// Backend that only tracks allocations
///
/// Used for diagnostics without a GPU and for verifying that rebuilds do
/// not leak.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    next_id: u64,
    live: usize,
    live_bytes: usize,
    total_allocations: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes held by live handles
    pub fn live_bytes(&self) -> usize {
        self.live_bytes
    }

    /// Allocations made over the backend's lifetime
    pub fn total_allocations(&self) -> u64 {
        self.total_allocations
    }
}

impl GeometryBackend for HeadlessBackend {
    type Handle = HeadlessHandle;

    fn allocate(&mut self, mesh: &TubeMesh) -> HeadlessHandle {
        let bytes = mesh.byte_size();
        self.next_id += 1;
        self.live += 1;
        self.live_bytes += bytes;
        self.total_allocations += 1;
        HeadlessHandle {
            id: self.next_id,
            bytes,
        }
    }

    fn release(&mut self, handle: HeadlessHandle) {
        log::trace!("Released headless handle {} ({} bytes)", handle.id, handle.bytes);
        self.live -= 1;
        self.live_bytes -= handle.bytes;
    }

    fn live_count(&self) -> usize {
        self.live
    }
}
