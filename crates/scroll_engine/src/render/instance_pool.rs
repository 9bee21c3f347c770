//! Bounded per-shape instance pools
//!
//! One pool exists per distinct glyph (or per facet mesh). Every frame the
//! owning layout calls [`InstancePool::reset`] and then pushes the poses that
//! are visible this frame; nothing carries over between frames.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{constants::TAU, Mat4};

/// Instance data structure for GPU upload
///
/// Column-major model matrix, matching `mat4` in a vertex shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Model transformation matrix (4x4)
    pub model_matrix: [[f32; 4]; 4],
}

impl InstanceData {
    /// Create instance data from a model matrix
    pub fn from_matrix(matrix: &Mat4) -> Self {
        Self {
            model_matrix: (*matrix).into(),
        }
    }

    /// Model matrix as an nalgebra matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from(self.model_matrix)
    }
}

/// Number of repeats of one shape that can be visible on a `2π` path
///
/// `ceil(2π / angular_width)`, never less than one.
pub fn capacity_for_angle(angular_width: f32) -> usize {
    ((TAU / angular_width).ceil() as usize).max(1)
}

/// Fixed-capacity set of transform slots for one shape
#[derive(Debug, Clone)]
pub struct InstancePool {
    name: String,
    slots: Vec<InstanceData>,
    active_count: usize,
    visible: bool,
    dirty: bool,
}

impl InstancePool {
    /// Create a hidden pool with `capacity` zeroed slots
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            slots: vec![InstanceData::zeroed(); capacity],
            active_count: 0,
            visible: false,
            dirty: false,
        }
    }

    /// Pool name, the glyph character for text pools
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Maximum number of simultaneously active instances
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Instances written this frame
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Whether the shape is drawn this frame
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether slot contents changed since the last upload
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Hide the pool and drop every active instance
    ///
    /// A pool that was showing instances becomes dirty, so the renderer
    /// learns it is now empty.
    pub fn reset(&mut self) {
        if self.active_count > 0 {
            self.dirty = true;
        }
        self.active_count = 0;
        self.visible = false;
    }

    /// Write `matrix` into the next free slot
    ///
    /// Returns the slot index, or `None` when the pool is already full.
    pub fn push(&mut self, matrix: &Mat4) -> Option<usize> {
        if self.active_count == self.slots.len() {
            log::trace!(
                "Pool '{}' full at {} instances, dropping draw",
                self.name,
                self.active_count
            );
            return None;
        }
        let index = self.active_count;
        self.slots[index] = InstanceData::from_matrix(matrix);
        self.active_count += 1;
        self.visible = true;
        self.dirty = true;
        Some(index)
    }

    /// Active slots in draw order
    pub fn active_instances(&self) -> &[InstanceData] {
        &self.slots[..self.active_count]
    }

    /// Active slots as raw bytes for buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.active_instances())
    }

    /// Clear the dirty flag, returning its previous value
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}
