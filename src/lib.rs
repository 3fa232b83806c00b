//! A real-time software rasterizer with a free-flying camera.
//!
//! Every frame runs the same pipeline on the CPU:
//!
//! 1. [`CameraController::advance`] folds the frame's input snapshot into
//!    a new camera pose.
//! 2. [`project`] transforms the mesh vertices through the view and
//!    perspective matrices into normalized device coordinates, keeping
//!    the perspective divisor w alongside.
//! 3. [`rasterize`] scan-converts the triangles in parallel (rayon
//!    workers own disjoint rows of the buffers), depth-tests on blended
//!    w and shades surviving fragments through the [`Shader`] seam.
//!
//! The library is headless and deterministic: given the same inputs the
//! framebuffer comes out bit-identical, whatever the thread count. The
//! `window` feature adds a raylib front end (`cargo run --features
//! window`) that uploads the framebuffer as a GPU texture and draws a
//! diagnostic overlay on top.
//!
//! ```
//! use softras::{InputSnapshot, RenderContext};
//!
//! let mut ctx = RenderContext::new(320, 180);
//! let frame = ctx
//!     .frame(&InputSnapshot::default(), 320, 180, 1.0 / 60.0)
//!     .expect("non-zero viewport");
//! assert_eq!(frame.framebuffer.len(), 320 * 180);
//! ```

pub mod camera;
pub mod color;
pub mod context;
pub mod controller;
pub mod error;
pub mod framebuffer;
pub mod mesh;
pub mod project;
pub mod raster;

pub use camera::Camera;
pub use color::ColorF;
pub use context::{Frame, RenderContext};
pub use controller::{CameraController, InputSnapshot};
pub use error::{Error, Result};
pub use framebuffer::{DepthBuffer, FrameBuffer};
pub use mesh::Mesh;
pub use project::{ProjectedVertex, in_ndc_bounds, project};
pub use raster::{BarycentricShader, Shader, rasterize};
