//! Mesh representation for generated geometry
//!
//! Meshes here are plain data: the facet generator and the glyph builders
//! produce them, the rendering subsystem uploads them.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{constants::EPSILON, Vec3};

/// Vertex data structure with position and normal
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Position as a vector
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Extent along X
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Extent along Y
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Extent along Z
    pub fn depth(&self) -> f32 {
        self.max.z - self.min.z
    }
}

/// Triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Triangle indices
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from vertices and indices
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Build a non-indexed mesh from a triangle soup with flat normals
    ///
    /// `positions.len()` must be a multiple of 3.
    pub fn from_triangle_soup(positions: &[Vec3]) -> Self {
        debug_assert_eq!(positions.len() % 3, 0);
        let vertices = positions
            .iter()
            .map(|p| Vertex::new([p.x, p.y, p.z], [0.0, 0.0, 0.0]))
            .collect();
        let indices = (0..positions.len() as u32).collect();
        let mut mesh = Self { vertices, indices };
        mesh.compute_flat_normals();
        mesh
    }

    /// Axis-aligned box between two corners, 24 vertices with face normals
    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        let faces: [([f32; 3], [Vec3; 4]); 6] = [
            (
                [1.0, 0.0, 0.0],
                [
                    Vec3::new(max.x, min.y, min.z),
                    Vec3::new(max.x, max.y, min.z),
                    Vec3::new(max.x, max.y, max.z),
                    Vec3::new(max.x, min.y, max.z),
                ],
            ),
            (
                [-1.0, 0.0, 0.0],
                [
                    Vec3::new(min.x, min.y, max.z),
                    Vec3::new(min.x, max.y, max.z),
                    Vec3::new(min.x, max.y, min.z),
                    Vec3::new(min.x, min.y, min.z),
                ],
            ),
            (
                [0.0, 1.0, 0.0],
                [
                    Vec3::new(min.x, max.y, min.z),
                    Vec3::new(min.x, max.y, max.z),
                    Vec3::new(max.x, max.y, max.z),
                    Vec3::new(max.x, max.y, min.z),
                ],
            ),
            (
                [0.0, -1.0, 0.0],
                [
                    Vec3::new(min.x, min.y, max.z),
                    Vec3::new(min.x, min.y, min.z),
                    Vec3::new(max.x, min.y, min.z),
                    Vec3::new(max.x, min.y, max.z),
                ],
            ),
            (
                [0.0, 0.0, 1.0],
                [
                    Vec3::new(min.x, min.y, max.z),
                    Vec3::new(max.x, min.y, max.z),
                    Vec3::new(max.x, max.y, max.z),
                    Vec3::new(min.x, max.y, max.z),
                ],
            ),
            (
                [0.0, 0.0, -1.0],
                [
                    Vec3::new(max.x, min.y, min.z),
                    Vec3::new(min.x, min.y, min.z),
                    Vec3::new(min.x, max.y, min.z),
                    Vec3::new(max.x, max.y, min.z),
                ],
            ),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners) in faces {
            let base = vertices.len() as u32;
            vertices.extend(corners.iter().map(|c| Vertex::new([c.x, c.y, c.z], normal)));
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self { vertices, indices }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounding box of all vertices, `None` for an empty mesh
    pub fn bounding_box(&self) -> Option<Aabb> {
        let first = self.vertices.first()?.position();
        let (min, max) = self.vertices.iter().skip(1).fold((first, first), |(min, max), v| {
            let p = v.position();
            (min.inf(&p), max.sup(&p))
        });
        Some(Aabb { min, max })
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vec3) {
        for vertex in &mut self.vertices {
            vertex.position[0] += offset.x;
            vertex.position[1] += offset.y;
            vertex.position[2] += offset.z;
        }
    }

    /// Assign each triangle's face normal to its vertices
    ///
    /// Only meaningful for non-indexed meshes where no vertex is shared.
    pub fn compute_flat_normals(&mut self) {
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| self.vertices[i as usize].position());
            let n = (b - a).cross(&(c - a));
            let n = if n.norm() > EPSILON { n.normalize() } else { Vec3::zeros() };
            for &i in tri {
                self.vertices[i as usize].normal = [n.x, n.y, n.z];
            }
        }
    }

    /// Vertex data as raw bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cuboid_bounds_and_counts() {
        let mesh = Mesh::cuboid(Vec3::new(-1.0, 0.0, 0.5), Vec3::new(2.0, 3.0, 1.0));
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let bounds = mesh.bounding_box().expect("bounds");
        assert_relative_eq!(bounds.width(), 3.0);
        assert_relative_eq!(bounds.height(), 3.0);
        assert_relative_eq!(bounds.depth(), 0.5);
    }

    #[test]
    fn test_cuboid_winding_matches_normals() {
        let mesh = Mesh::cuboid(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.vertices[i as usize]);
            let face = (b.position() - a.position()).cross(&(c.position() - a.position()));
            assert!(face.dot(&Vec3::from(a.normal)) > 0.0);
        }
    }

    #[test]
    fn test_translate_moves_bounds() {
        let mut mesh = Mesh::cuboid(Vec3::zeros(), Vec3::new(2.0, 1.0, 1.0));
        mesh.translate(Vec3::new(-1.0, -0.25, 0.0));
        let bounds = mesh.bounding_box().expect("bounds");
        assert_relative_eq!(bounds.min, Vec3::new(-1.0, -0.25, 0.0));
        assert_relative_eq!(bounds.max, Vec3::new(1.0, 0.75, 1.0));
    }

    #[test]
    fn test_triangle_soup_flat_normals() {
        let mesh = Mesh::from_triangle_soup(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_empty_mesh_has_no_bounds() {
        assert!(Mesh::default().bounding_box().is_none());
    }
}
