//! Geometry generation
//!
//! Base polyhedra, generated meshes and the spiked background built from them.

pub mod background;
pub mod facet;
pub mod mesh;
pub mod polyhedron;

pub use background::{FacetSet, SpikedBackground};
pub use facet::{
    triangles_from_buffer, FacetGenerator, FacetInstance, FacetMode, StandaloneFacet,
    TetrahedronFit, Triangle,
};
pub use mesh::{Aabb, Mesh, Vertex};
pub use polyhedron::{icosahedron, icosahedron_triangle_count};
