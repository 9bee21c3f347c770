//! Facet generation
//!
//! Turns every triangle of a base polyhedron into a tetrahedral spike. Two
//! output forms exist:
//!
//! - **Instanced**: one canonical unit pyramid mesh plus one
//!   [`FacetInstance`] pose per triangle.
//! - **Standalone**: one centred 4-face mesh per triangle.
//!
//! Both assume (near) equilateral source triangles. The apex height uses the
//! regular tetrahedron formula on a single edge, and the instanced scale is an
//! anisotropic fit `(|v1-v2|, |v1-v3|, 2/3 |v1-v3|)`. Irregular triangles
//! therefore get approximate, non-congruent pyramids; this is accepted and not
//! solved exactly.

use serde::{Deserialize, Serialize};

use super::Mesh;
use crate::error::{BuildError, BuildResult};
use crate::foundation::math::{
    constants::{EPSILON, SQRT_3},
    utils::tetrahedron_height,
    Quat, Transform, Vec3,
};

/// Edge ratio above which a triangle counts as irregular for logging
const IRREGULAR_EDGE_RATIO: f32 = 1.25;

/// Output form of the facet generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FacetMode {
    /// One shared pyramid mesh drawn through a single instance pool
    #[default]
    Instanced,
    /// One mesh per facet
    Standalone,
}

/// Source triangle; its normal is recomputed on demand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v1: Vec3,
    /// Second vertex
    pub v2: Vec3,
    /// Third vertex
    pub v3: Vec3,
}

impl Triangle {
    /// Create a triangle from its vertices
    pub fn new(v1: Vec3, v2: Vec3, v3: Vec3) -> Self {
        Self { v1, v2, v3 }
    }

    /// Unit face normal, `None` for collinear vertices
    pub fn normal(&self) -> Option<Vec3> {
        let n = (self.v2 - self.v1).cross(&(self.v3 - self.v1));
        (n.norm() > EPSILON).then(|| n.normalize())
    }

    /// Centroid
    pub fn midpoint(&self) -> Vec3 {
        (self.v1 + self.v2 + self.v3) / 3.0
    }

    /// Edge lengths `(|v1-v2|, |v1-v3|, |v2-v3|)`
    pub fn edge_lengths(&self) -> (f32, f32, f32) {
        (
            (self.v1 - self.v2).norm(),
            (self.v1 - self.v3).norm(),
            (self.v2 - self.v3).norm(),
        )
    }

    fn is_irregular(&self) -> bool {
        let (a, b, c) = self.edge_lengths();
        a.max(b).max(c) / a.min(b).min(c) > IRREGULAR_EDGE_RATIO
    }
}

/// Split a flat position buffer into triangles
///
/// The buffer must hold 9 floats per triangle.
pub fn triangles_from_buffer(buffer: &[f32]) -> BuildResult<Vec<Triangle>> {
    if buffer.len() % 9 != 0 {
        return Err(BuildError::InvalidGeometryInput { len: buffer.len() });
    }
    Ok(buffer
        .chunks_exact(9)
        .map(|t| {
            Triangle::new(
                Vec3::new(t[0], t[1], t[2]),
                Vec3::new(t[3], t[4], t[5]),
                Vec3::new(t[6], t[7], t[8]),
            )
        })
        .collect())
}

/// Regular-tetrahedron fit over one triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TetrahedronFit {
    /// Unit face normal
    pub normal: Vec3,
    /// Triangle centroid
    pub midpoint: Vec3,
    /// Apex height `sqrt(3)/4 * |v1-v2|`
    pub height: f32,
    /// `midpoint + normal * height`
    pub apex: Vec3,
    /// `midpoint + normal * height / 3`
    pub centroid: Vec3,
}

impl TetrahedronFit {
    /// Fit a tetrahedron onto triangle `index`
    pub fn new(triangle: &Triangle, index: usize) -> BuildResult<Self> {
        let (e12, e13, e23) = triangle.edge_lengths();
        if e12 <= EPSILON || e13 <= EPSILON || e23 <= EPSILON {
            return Err(BuildError::DegenerateTriangle { index });
        }
        let normal = triangle
            .normal()
            .ok_or(BuildError::DegenerateTriangle { index })?;
        let midpoint = triangle.midpoint();
        let height = tetrahedron_height(e12);
        Ok(Self {
            normal,
            midpoint,
            height,
            apex: midpoint + normal * height,
            centroid: midpoint + normal * (height / 3.0),
        })
    }
}

/// Pose placing the canonical unit pyramid onto one source triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacetInstance {
    /// Triangle centroid
    pub position: Vec3,
    /// Maps local +Z onto origin->centroid and local +Y towards `v3`
    pub orientation: Quat,
    /// `(|v1-v2|, |v1-v3|, 2/3 |v1-v3|)`
    pub scale: Vec3,
}

impl FacetInstance {
    /// Transform with `spin` applied in the facet's local frame
    pub fn transform(&self, spin: Quat) -> Transform {
        Transform::new(self.position, self.orientation * spin, self.scale)
    }
}

/// One self-contained pyramid mesh, positioned at its centroid
#[derive(Debug, Clone, PartialEq)]
pub struct StandaloneFacet {
    /// Four faces, vertices relative to `position`
    pub mesh: Mesh,
    /// Tetrahedron centroid
    pub position: Vec3,
}

/// Builds pyramid facets from triangle lists
pub struct FacetGenerator;

impl FacetGenerator {
    /// Canonical pyramid for instanced facets
    ///
    /// Unit-edge equilateral base in the local XY plane centred on the
    /// origin, one base vertex on +Y, apex on +Z at `sqrt(3)/4`.
    pub fn unit_pyramid() -> Mesh {
        let v1 = Vec3::new(-0.5, -SQRT_3 / 6.0, 0.0);
        let v2 = Vec3::new(0.5, -SQRT_3 / 6.0, 0.0);
        let v3 = Vec3::new(0.0, SQRT_3 / 3.0, 0.0);
        let v4 = Vec3::new(0.0, 0.0, tetrahedron_height(1.0));
        pyramid_mesh(v1, v2, v3, v4)
    }

    /// One instance pose per triangle
    pub fn instances(triangles: &[Triangle]) -> BuildResult<Vec<FacetInstance>> {
        let instances = triangles
            .iter()
            .enumerate()
            .map(|(index, triangle)| Self::instance(triangle, index))
            .collect::<BuildResult<Vec<_>>>()?;
        log_irregular(triangles);
        Ok(instances)
    }

    /// One centred mesh per triangle
    pub fn standalone(triangles: &[Triangle]) -> BuildResult<Vec<StandaloneFacet>> {
        let facets = triangles
            .iter()
            .enumerate()
            .map(|(index, triangle)| Self::standalone_facet(triangle, index))
            .collect::<BuildResult<Vec<_>>>()?;
        log_irregular(triangles);
        Ok(facets)
    }

    fn instance(triangle: &Triangle, index: usize) -> BuildResult<FacetInstance> {
        let fit = TetrahedronFit::new(triangle, index)?;
        let forward = if fit.midpoint.norm() > EPSILON {
            fit.midpoint.normalize()
        } else {
            fit.normal
        };
        let up = triangle.v3 - fit.midpoint;
        if forward.cross(&up).norm() <= EPSILON {
            return Err(BuildError::DegenerateTriangle { index });
        }
        let (e12, e13, _) = triangle.edge_lengths();
        Ok(FacetInstance {
            position: fit.midpoint,
            orientation: Quat::face_towards(&forward, &up.normalize()),
            scale: Vec3::new(e12, e13, e13 * 2.0 / 3.0),
        })
    }

    fn standalone_facet(triangle: &Triangle, index: usize) -> BuildResult<StandaloneFacet> {
        let fit = TetrahedronFit::new(triangle, index)?;
        let c = fit.centroid;
        Ok(StandaloneFacet {
            mesh: pyramid_mesh(triangle.v1 - c, triangle.v2 - c, triangle.v3 - c, fit.apex - c),
            position: c,
        })
    }
}

fn log_irregular(triangles: &[Triangle]) {
    let irregular = triangles.iter().filter(|t| t.is_irregular()).count();
    if irregular > 0 {
        log::warn!(
            "{irregular} of {} triangles are far from equilateral; their facets are approximate",
            triangles.len()
        );
    }
}

/// Four outward-facing faces over base `v1 v2 v3` and apex `v4`
fn pyramid_mesh(v1: Vec3, v2: Vec3, v3: Vec3, v4: Vec3) -> Mesh {
    Mesh::from_triangle_soup(&[v1, v3, v2, v1, v2, v4, v3, v1, v4, v3, v4, v2])
}
