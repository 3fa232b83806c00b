//! Vertex projection: mesh-local positions to screen-ready NDC values.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// A vertex after projection and perspective divide.
///
/// `pos` packs NDC x and y, a device depth remapped into [-1,1], and the
/// undivided clip-space w. The w survives on purpose: it is both the
/// depth-test key and the scale for reconstructing camera-space quantities
/// at a pixel. `w > 0` means in front of the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedVertex {
    pub pos: Vec4,
}

impl ProjectedVertex {
    pub fn xy(self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y)
    }

    /// True when the vertex itself would survive the per-pixel bounds test.
    pub fn in_bounds(self) -> bool {
        in_ndc_bounds(self.pos)
    }
}

/// The acceptance test applied to every reconstructed fragment value:
/// x, y, z within the NDC cube and w strictly in front of the camera.
/// Comparisons are written so NaN fails every arm.
pub fn in_ndc_bounds(v: Vec4) -> bool {
    v.x >= -1.0
        && v.x <= 1.0
        && v.y >= -1.0
        && v.y <= 1.0
        && v.z >= -1.0
        && v.z <= 1.0
        && v.w > 0.0
}

/// Projects every vertex through the camera matrices, preserving order.
///
/// No near/far clipping happens here. Vertices at or behind the camera
/// plane produce infinite or NaN coordinates from the divide; those are
/// rejected pixel-by-pixel in the rasterizer's bounds test, never by
/// dropping whole triangles.
pub fn project(vertices: &[Vec3], world_view: Mat4, perspective: Mat4) -> Vec<ProjectedVertex> {
    vertices
        .iter()
        .map(|&point| {
            let clip = perspective * (world_view * point.extend(1.0));
            ProjectedVertex {
                pos: Vec4::new(
                    clip.x / clip.w,
                    clip.y / clip.w,
                    clip.z / clip.w * 2.0 - 1.0,
                    clip.w,
                ),
            }
        })
        .collect()
}
