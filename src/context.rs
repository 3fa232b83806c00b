//! Frame orchestration.
//!
//! [`RenderContext`] owns everything a frame touches: the mesh, the
//! camera and its controller, both target buffers and the shader. The
//! platform layer calls [`RenderContext::frame`] once per display frame
//! with the latest input snapshot and viewport size, and presents the
//! returned [`Frame`]. There is no global state anywhere; two contexts
//! render independently on the same thread pool.

use std::time::Instant;

use log::{debug, info, trace};

use crate::camera::Camera;
use crate::controller::{CameraController, InputSnapshot};
use crate::framebuffer::{DepthBuffer, FrameBuffer};
use crate::mesh::Mesh;
use crate::project::{ProjectedVertex, project};
use crate::raster::{BarycentricShader, Shader, rasterize};

/// One rendered frame, borrowed from the context that produced it.
///
/// Everything the presentation side needs: the color buffer to upload,
/// the projected vertices and camera pose for diagnostics, the current
/// sensitivities and whether the buffers were just reallocated (the GPU
/// texture must then be recreated before upload).
pub struct Frame<'a> {
    pub framebuffer: &'a FrameBuffer,
    pub projected: &'a [ProjectedVertex],
    pub camera: Camera,
    pub rotation_scale: f32,
    pub movement_scale: f32,
    pub resized: bool,
}

/// Owns the scene and all per-frame state.
pub struct RenderContext<S: Shader = BarycentricShader> {
    pub mesh: Mesh,
    pub camera: Camera,
    pub controller: CameraController,
    framebuffer: FrameBuffer,
    depth: DepthBuffer,
    shader: S,
    projected: Vec<ProjectedVertex>,
}

impl RenderContext<BarycentricShader> {
    /// A context with the default cube scene, camera and shader.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_shader(width, height, BarycentricShader)
    }
}

impl<S: Shader> RenderContext<S> {
    pub fn with_shader(width: usize, height: usize, shader: S) -> Self {
        Self {
            mesh: Mesh::unit_cube(),
            camera: Camera::default(),
            controller: CameraController::default(),
            framebuffer: FrameBuffer::new(width, height),
            depth: DepthBuffer::new(width, height),
            shader,
            projected: Vec::new(),
        }
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    /// Advances the camera by one input snapshot and renders.
    ///
    /// Returns `None` without touching the buffers when either viewport
    /// dimension is zero (a minimized window, typically); input is still
    /// folded into the camera so motion never stalls.
    pub fn frame(
        &mut self,
        input: &InputSnapshot,
        width: usize,
        height: usize,
        dt: f32,
    ) -> Option<Frame<'_>> {
        let (controller, camera) = self.controller.advance(&self.camera, input, dt);
        self.controller = controller;
        self.camera = camera;

        let Some(perspective) = self.camera.perspective(width, height) else {
            debug!("skipping frame, viewport is {width}x{height}");
            return None;
        };

        let resized = self.ensure_viewport(width, height);

        self.projected = project(self.mesh.vertices(), self.camera.world_to_view(), perspective);

        let started = Instant::now();
        rasterize(
            self.mesh.indices(),
            &self.projected,
            self.camera.far_clip,
            &self.shader,
            &mut self.framebuffer,
            &mut self.depth,
        );
        trace!(
            "rasterized {} triangles at {width}x{height} in {:.3?}",
            self.mesh.triangle_count(),
            started.elapsed()
        );

        Some(Frame {
            framebuffer: &self.framebuffer,
            projected: &self.projected,
            camera: self.camera,
            rotation_scale: self.controller.rotation_scale,
            movement_scale: self.controller.movement_scale,
            resized,
        })
    }

    fn ensure_viewport(&mut self, width: usize, height: usize) -> bool {
        if self.framebuffer.width() == width && self.framebuffer.height() == height {
            return false;
        }
        info!("viewport now {width}x{height}, reallocating buffers");
        self.framebuffer = FrameBuffer::new(width, height);
        self.depth = DepthBuffer::new(width, height);
        true
    }
}
