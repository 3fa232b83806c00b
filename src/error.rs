use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures the core reports through `Result`.
///
/// Per-fragment numeric faults (degenerate triangles, non-finite shading
/// reciprocals) and zero-size viewports are not part of this taxonomy; the
/// pipeline recovers from those locally by skipping the triangle, pixel or
/// frame.
#[derive(Error, Debug)]
pub enum Error {
    #[error("triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("index count {0} does not form whole triangles")]
    PartialTriangle(usize),

    #[error("failed to write framebuffer snapshot")]
    Snapshot(#[from] image::ImageError),
}
