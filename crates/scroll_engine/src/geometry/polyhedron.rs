//! Base polyhedra supplying triangle buffers to the facet generator
//!
//! Output is a flat, non-indexed position buffer: 3 floats per vertex,
//! 3 vertices per triangle, counter-clockwise when viewed from outside.

use crate::foundation::math::Vec3;

const ICOSAHEDRON_INDICES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices() -> [Vec3; 12] {
    let t = (1.0 + 5f32.sqrt()) / 2.0;
    [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
}

/// Number of triangles produced by [`icosahedron`] at `detail`
pub fn icosahedron_triangle_count(detail: u32) -> usize {
    let cols = detail as usize + 1;
    20 * cols * cols
}

/// Geodesic icosahedron as a flat triangle buffer
///
/// Each of the 20 faces is split into `(detail + 1)^2` triangles and every
/// vertex is pushed out onto the sphere of `radius`.
pub fn icosahedron(radius: f32, detail: u32) -> Vec<f32> {
    let base = icosahedron_vertices();
    let mut buffer = Vec::with_capacity(icosahedron_triangle_count(detail) * 9);
    for [a, b, c] in ICOSAHEDRON_INDICES {
        subdivide_face(base[a], base[b], base[c], detail as usize + 1, &mut |v| {
            let p = v.normalize() * radius;
            buffer.extend_from_slice(&[p.x, p.y, p.z]);
        });
    }
    buffer
}

fn subdivide_face(a: Vec3, b: Vec3, c: Vec3, cols: usize, emit: &mut impl FnMut(Vec3)) {
    // Row i runs from a->c to b->c and holds cols - i + 1 points.
    let mut grid: Vec<Vec<Vec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f32 / cols as f32;
        let aj = a.lerp(&c, t);
        let bj = b.lerp(&c, t);
        let rows = cols - i;
        let row = (0..=rows)
            .map(|j| {
                if rows == 0 {
                    aj
                } else {
                    aj.lerp(&bj, j as f32 / rows as f32)
                }
            })
            .collect();
        grid.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                emit(grid[i][k + 1]);
                emit(grid[i + 1][k]);
                emit(grid[i][k]);
            } else {
                emit(grid[i][k + 1]);
                emit(grid[i + 1][k + 1]);
                emit(grid[i + 1][k]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangles(buffer: &[f32]) -> Vec<[Vec3; 3]> {
        buffer
            .chunks_exact(9)
            .map(|t| {
                [
                    Vec3::new(t[0], t[1], t[2]),
                    Vec3::new(t[3], t[4], t[5]),
                    Vec3::new(t[6], t[7], t[8]),
                ]
            })
            .collect()
    }

    #[test]
    fn test_triangle_counts() {
        for detail in 0..4 {
            let buffer = icosahedron(1.0, detail);
            assert_eq!(buffer.len(), icosahedron_triangle_count(detail) * 9);
        }
        assert_eq!(icosahedron_triangle_count(0), 20);
        assert_eq!(icosahedron_triangle_count(1), 80);
    }

    #[test]
    fn test_vertices_lie_on_sphere() {
        for v in icosahedron(5.0, 2).chunks_exact(3) {
            assert_relative_eq!(Vec3::new(v[0], v[1], v[2]).norm(), 5.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_faces_wind_outwards() {
        for [v1, v2, v3] in triangles(&icosahedron(2.0, 1)) {
            let normal = (v2 - v1).cross(&(v3 - v1));
            let centroid = (v1 + v2 + v3) / 3.0;
            assert!(normal.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_base_faces_are_equilateral() {
        for [v1, v2, v3] in triangles(&icosahedron(1.0, 0)) {
            let e12 = (v1 - v2).norm();
            assert_relative_eq!(e12, (v1 - v3).norm(), epsilon = 1e-5);
            assert_relative_eq!(e12, (v2 - v3).norm(), epsilon = 1e-5);
        }
    }
}
