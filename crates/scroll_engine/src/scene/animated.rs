//! Time-driven scene parts

use crate::geometry::{Mesh, SpikedBackground};
use crate::render::InstancePool;
use crate::text::{CircularTextLayout, ToroidalTextLayout};

/// Scene part posed purely from elapsed time
///
/// `render` overwrites the previous frame's instance data; calling it twice
/// with the same time yields the same pools.
pub trait Animated {
    /// Pose every instance for `time`
    fn render(&mut self, time: f64);

    /// Static meshes, each named like the pool holding its instances
    fn meshes(&self) -> Vec<(&str, &Mesh)>;

    /// Instance pools fed by `render`
    fn pools(&self) -> Vec<&InstancePool>;

    /// Instance pools, mutably, for the upload pass
    fn pools_mut(&mut self) -> Vec<&mut InstancePool>;

    /// Instances drawn by the last `render`
    fn visible_count(&self) -> usize {
        self.pools().iter().map(|pool| pool.active_count()).sum()
    }
}

impl Animated for SpikedBackground {
    fn render(&mut self, time: f64) {
        SpikedBackground::render(self, time);
    }

    fn meshes(&self) -> Vec<(&str, &Mesh)> {
        SpikedBackground::meshes(self)
    }

    fn pools(&self) -> Vec<&InstancePool> {
        SpikedBackground::pools(self)
    }

    fn pools_mut(&mut self) -> Vec<&mut InstancePool> {
        SpikedBackground::pools_mut(self)
    }
}

impl Animated for CircularTextLayout {
    fn render(&mut self, time: f64) {
        CircularTextLayout::render(self, time);
    }

    fn meshes(&self) -> Vec<(&str, &Mesh)> {
        CircularTextLayout::meshes(self)
    }

    fn pools(&self) -> Vec<&InstancePool> {
        CircularTextLayout::pools(self)
    }

    fn pools_mut(&mut self) -> Vec<&mut InstancePool> {
        CircularTextLayout::pools_mut(self)
    }
}

impl Animated for ToroidalTextLayout {
    fn render(&mut self, time: f64) {
        ToroidalTextLayout::render(self, time);
    }

    fn meshes(&self) -> Vec<(&str, &Mesh)> {
        ToroidalTextLayout::meshes(self)
    }

    fn pools(&self) -> Vec<&InstancePool> {
        ToroidalTextLayout::pools(self)
    }

    fn pools_mut(&mut self) -> Vec<&mut InstancePool> {
        ToroidalTextLayout::pools_mut(self)
    }
}
