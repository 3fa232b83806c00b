//! Immutable triangle-list geometry shared read-only by all render tasks.

use glam::Vec3;

use crate::error::{Error, Result};

/// Vertex positions plus a flat index list, three indices per triangle.
///
/// Indices are validated on construction, so the render path can index
/// vertices without rechecking. Winding is clockwise in screen space after
/// projection; the opposite winding is silently culled by the containment
/// test rather than rejected here.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(Error::PartialTriangle(indices.len()));
        }
        for &index in &indices {
            if index as usize >= vertices.len() {
                return Err(Error::IndexOutOfRange {
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(Self { vertices, indices })
    }

    /// The fixture cube: unit extents spanning (0,0,0) to (1,1,1).
    pub fn unit_cube() -> Self {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let indices = vec![
            0, 2, 1, 0, 3, 2, 2, 3, 4, 2, 4, 5, 1, 2, 5, 1, 5, 6, 0, 7, 4, 0, 4, 3, 5, 4, 7, 5, 7,
            6, 0, 6, 7, 0, 1, 6,
        ];
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_eight_vertices_and_twelve_triangles() {
        let cube = Mesh::unit_cube();
        assert_eq!(cube.vertices().len(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.indices().iter().all(|&i| (i as usize) < 8));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let verts = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let err = Mesh::new(verts, vec![0, 1, 3]).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 3, .. }));
    }

    #[test]
    fn rejects_partial_triangle() {
        let verts = vec![Vec3::ZERO, Vec3::X];
        let err = Mesh::new(verts, vec![0, 1]).unwrap_err();
        assert!(matches!(err, Error::PartialTriangle(2)));
    }
}
