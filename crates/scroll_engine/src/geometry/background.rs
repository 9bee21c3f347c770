//! Spiked background
//!
//! A ring of tetrahedral spikes over a geodesic icosahedron, spun as one
//! group. Every `render` call sets (never accumulates) the spin from the
//! elapsed time.

use super::facet::{
    triangles_from_buffer, FacetGenerator, FacetInstance, FacetMode, StandaloneFacet,
};
use super::{icosahedron, Mesh};
use crate::config::{BackgroundConfig, SpinConfig};
use crate::error::BuildResult;
use crate::foundation::math::{utils::wrap_angle, EulerOrder, Quat, Transform, Vec3};
use crate::render::InstancePool;

/// Facet storage for either output form
#[derive(Debug, Clone)]
pub enum FacetSet {
    /// Shared pyramid mesh and one pool slot per facet
    Instanced {
        /// Canonical unit pyramid
        mesh: Mesh,
        /// Fixed per-facet poses
        instances: Vec<FacetInstance>,
        /// One slot per facet
        pool: InstancePool,
    },
    /// One mesh per facet, each with a single-slot pool for its transform
    Standalone {
        /// Centred facet meshes
        facets: Vec<StandaloneFacet>,
        /// Transform slot of each facet
        pools: Vec<InstancePool>,
    },
}

/// Spinning spiked background
#[derive(Debug, Clone)]
pub struct SpikedBackground {
    facets: FacetSet,
    spin: SpinConfig,
}

impl SpikedBackground {
    /// Composition order of the uniform spin
    pub const SPIN_ORDER: EulerOrder = EulerOrder::Xyz;

    /// Build over an icosahedron described by `config`
    pub fn new(config: &BackgroundConfig) -> BuildResult<Self> {
        config.validate()?;
        let buffer = icosahedron(config.radius, config.detail);
        Self::from_triangles(&buffer, config.mode, config.spin)
    }

    /// Build over an arbitrary triangle buffer (9 floats per triangle)
    pub fn from_triangles(buffer: &[f32], mode: FacetMode, spin: SpinConfig) -> BuildResult<Self> {
        spin.validate()?;
        let triangles = triangles_from_buffer(buffer)?;
        let facets = match mode {
            FacetMode::Instanced => {
                let instances = FacetGenerator::instances(&triangles)?;
                let pool = InstancePool::new("facets", instances.len());
                FacetSet::Instanced {
                    mesh: FacetGenerator::unit_pyramid(),
                    instances,
                    pool,
                }
            }
            FacetMode::Standalone => {
                let facets = FacetGenerator::standalone(&triangles)?;
                let pools = (0..facets.len())
                    .map(|i| InstancePool::new(format!("facet-{i}"), 1))
                    .collect();
                FacetSet::Standalone { facets, pools }
            }
        };
        log::info!("Built {} background facets ({:?})", triangles.len(), mode);
        Ok(Self { facets, spin })
    }

    /// Number of facets
    pub fn facet_count(&self) -> usize {
        match &self.facets {
            FacetSet::Instanced { instances, .. } => instances.len(),
            FacetSet::Standalone { facets, .. } => facets.len(),
        }
    }

    /// Output form
    pub fn mode(&self) -> FacetMode {
        match self.facets {
            FacetSet::Instanced { .. } => FacetMode::Instanced,
            FacetSet::Standalone { .. } => FacetMode::Standalone,
        }
    }

    /// Generated facets
    pub fn facets(&self) -> &FacetSet {
        &self.facets
    }

    /// Uniform spin at `time`: `(t/Sx, t/Sy, t/Sz)`
    pub fn spin_at(&self, time: f64) -> Quat {
        Self::SPIN_ORDER.quaternion(Vec3::new(
            wrap_angle(time / f64::from(self.spin.x)),
            wrap_angle(time / f64::from(self.spin.y)),
            wrap_angle(time / f64::from(self.spin.z)),
        ))
    }

    /// Pose every facet for `time`
    pub fn render(&mut self, time: f64) {
        let spin = self.spin_at(time);
        match &mut self.facets {
            FacetSet::Instanced { instances, pool, .. } => {
                pool.reset();
                for instance in instances.iter() {
                    pool.push(&instance.transform(spin).to_matrix());
                }
            }
            FacetSet::Standalone { facets, pools } => {
                for (facet, pool) in facets.iter().zip(pools.iter_mut()) {
                    pool.reset();
                    pool.push(&Transform::from_position_rotation(facet.position, spin).to_matrix());
                }
            }
        }
        log::trace!("Background posed at t={time}");
    }

    /// Meshes to upload once, named like the pool that draws them
    pub fn meshes(&self) -> Vec<(&str, &Mesh)> {
        match &self.facets {
            FacetSet::Instanced { mesh, pool, .. } => vec![(pool.name(), mesh)],
            FacetSet::Standalone { facets, pools } => facets
                .iter()
                .zip(pools)
                .map(|(facet, pool)| (pool.name(), &facet.mesh))
                .collect(),
        }
    }

    /// Instance pools
    pub fn pools(&self) -> Vec<&InstancePool> {
        match &self.facets {
            FacetSet::Instanced { pool, .. } => vec![pool],
            FacetSet::Standalone { pools, .. } => pools.iter().collect(),
        }
    }

    /// Instance pools, mutably
    pub fn pools_mut(&mut self) -> Vec<&mut InstancePool> {
        match &mut self.facets {
            FacetSet::Instanced { pool, .. } => vec![pool],
            FacetSet::Standalone { pools, .. } => pools.iter_mut().collect(),
        }
    }
}
