//! Parallel triangle scan-conversion with depth testing.
//!
//! Triangles are prepared in a parallel pass (2D extraction, signed area,
//! pixel bounds), then rasterized by workers that each own whole rows of
//! the color and depth buffers. Row ownership is what makes the
//! depth-compare-then-write safe: no two workers can ever touch the same
//! pixel, and within a row triangles are visited in index order, so the
//! output is identical regardless of how rayon schedules the rows.

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::color::ColorF;
use crate::framebuffer::{DepthBuffer, FrameBuffer};
use crate::project::{ProjectedVertex, in_ndc_bounds};

/// Per-fragment shading seam.
///
/// Implementations receive the normalized barycentric weights and the
/// triangle's three projected vertices. Returning `None` skips the
/// fragment entirely (neither color nor depth is written), which is how
/// non-finite shading terms stay out of the framebuffer.
pub trait Shader: Sync {
    fn shade(
        &self,
        weights: Vec3,
        a: ProjectedVertex,
        b: ProjectedVertex,
        c: ProjectedVertex,
    ) -> Option<ColorF>;
}

/// Default shader: the barycentric weights as RGB, scaled by the
/// reciprocal of the weight-blended device z. Shaded pixels are always
/// opaque.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarycentricShader;

impl Shader for BarycentricShader {
    fn shade(
        &self,
        weights: Vec3,
        a: ProjectedVertex,
        b: ProjectedVertex,
        c: ProjectedVertex,
    ) -> Option<ColorF> {
        let z = weights.x * a.pos.z + weights.y * b.pos.z + weights.z * c.pos.z;
        let scale = z.recip();
        if !scale.is_finite() {
            return None;
        }
        Some(ColorF::from_rgb(weights * scale))
    }
}

/// Edge function: positive when `p` is on one side of the directed edge
/// `a -> b`, negative on the other, zero on the line. Doubles as a signed
/// (twice-)area when evaluated on the triangle's own third vertex.
#[inline(always)]
fn edge_function(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// A triangle ready to scan: projected vertices, their 2D positions,
/// signed area and the inclusive pixel bounds of its clamped NDC box.
struct ScreenTriangle {
    a: ProjectedVertex,
    b: ProjectedVertex,
    c: ProjectedVertex,
    pa: Vec2,
    pb: Vec2,
    pc: Vec2,
    area: f32,
    x_min: usize,
    x_max: usize,
    y_min: usize,
    y_max: usize,
}

impl ScreenTriangle {
    /// `None` when the projected triangle has exactly zero signed area;
    /// collinear points would put a division by zero into the weight
    /// normalization, so the whole triangle is skipped.
    fn new(
        a: ProjectedVertex,
        b: ProjectedVertex,
        c: ProjectedVertex,
        width: usize,
        height: usize,
    ) -> Option<Self> {
        let pa = a.xy();
        let pb = b.xy();
        let pc = c.xy();
        let area = edge_function(pa, pb, pc);
        if area == 0.0 {
            return None;
        }

        let min = pa.min(pb).min(pc).clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        let max = pa.max(pb).max(pc).clamp(Vec2::splat(-1.0), Vec2::splat(1.0));

        let w = width as f32;
        let h = height as f32;
        let x_min = ((w * (min.x + 1.0) / 2.0).floor() as i32).clamp(0, width as i32 - 1) as usize;
        let x_max = ((w * (max.x + 1.0) / 2.0).ceil() as i32).clamp(0, width as i32 - 1) as usize;
        // NDC y grows upward while pixel rows grow downward, so the NDC
        // maximum bounds the topmost row.
        let y_min =
            ((h - h * (max.y + 1.0) / 2.0).floor() as i32).clamp(0, height as i32 - 1) as usize;
        let y_max =
            ((h - h * (min.y + 1.0) / 2.0).ceil() as i32).clamp(0, height as i32 - 1) as usize;

        Some(Self {
            a,
            b,
            c,
            pa,
            pb,
            pc,
            area,
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Containment test and barycentric weights in one pass. Inside means
    /// all three edge values are non-positive (clockwise winding in screen
    /// orientation; the opposite winding never passes and is silently
    /// culled). Comparisons are written inverted so NaN fails fast like
    /// any outside point.
    #[inline(always)]
    fn weights_at(&self, p: Vec2) -> Option<Vec3> {
        let w0 = edge_function(self.pb, self.pc, p);
        if !(w0 <= 0.0) {
            return None;
        }
        let w1 = edge_function(self.pc, self.pa, p);
        if !(w1 <= 0.0) {
            return None;
        }
        let w2 = edge_function(self.pa, self.pb, p);
        if !(w2 <= 0.0) {
            return None;
        }
        Some(Vec3::new(w0, w1, w2) / self.area)
    }
}

fn prepare_triangles(
    indices: &[u32],
    projected: &[ProjectedVertex],
    width: usize,
    height: usize,
) -> Vec<ScreenTriangle> {
    indices
        .par_chunks_exact(3)
        .filter_map(|triangle| {
            ScreenTriangle::new(
                projected[triangle[0] as usize],
                projected[triangle[1] as usize],
                projected[triangle[2] as usize],
                width,
                height,
            )
        })
        .collect()
}

/// Clears both buffers, then scan-converts every triangle of `indices`
/// into them.
///
/// `indices` must index into `projected` (the mesh validates this at
/// construction). For each pixel of a triangle's bounding box the sample
/// at the pixel center is containment-tested, the full (x,y,z,w) of the
/// three vertices is blended with the barycentric weights, the blend must
/// pass the NDC bounds test (which rejects fragments behind or straddling
/// the camera plane), and a strictly smaller blended w than the stored
/// depth wins the pixel.
pub fn rasterize<S: Shader>(
    indices: &[u32],
    projected: &[ProjectedVertex],
    far_clip: f32,
    shader: &S,
    frame: &mut FrameBuffer,
    depth: &mut DepthBuffer,
) {
    debug_assert_eq!(frame.width(), depth.width());
    debug_assert_eq!(frame.height(), depth.height());

    frame.fill(ColorF::TRANSPARENT);
    depth.fill(far_clip);

    let width = frame.width();
    let height = frame.height();
    if width == 0 || height == 0 {
        return;
    }

    let triangles = prepare_triangles(indices, projected, width, height);
    if triangles.is_empty() {
        return;
    }

    frame
        .pixels_mut()
        .par_chunks_mut(width)
        .zip(depth.values_mut().par_chunks_mut(width))
        .enumerate()
        .for_each(|(y, (color_row, depth_row))| {
            for triangle in &triangles {
                if y < triangle.y_min || y > triangle.y_max {
                    continue;
                }
                scan_row(triangle, y, width, height, shader, color_row, depth_row);
            }
        });
}

fn scan_row<S: Shader>(
    triangle: &ScreenTriangle,
    y: usize,
    width: usize,
    height: usize,
    shader: &S,
    color_row: &mut [ColorF],
    depth_row: &mut [f32],
) {
    let sample_y = 2.0 * (height as f32 - y as f32 + 0.5) / height as f32 - 1.0;
    for x in triangle.x_min..=triangle.x_max {
        let sample = Vec2::new(2.0 * (x as f32 + 0.5) / width as f32 - 1.0, sample_y);
        let Some(weights) = triangle.weights_at(sample) else {
            continue;
        };
        let value = triangle.a.pos * weights.x
            + triangle.b.pos * weights.y
            + triangle.c.pos * weights.z;
        if !in_ndc_bounds(value) || value.w >= depth_row[x] {
            continue;
        }
        if let Some(color) = shader.shade(weights, triangle.a, triangle.b, triangle.c) {
            depth_row[x] = value.w;
            color_row[x] = color;
        }
    }
}
