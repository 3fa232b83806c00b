//! Free-flight camera control.
//!
//! The controller is a pure state machine: it never reads devices itself.
//! The platform layer gathers one [`InputSnapshot`] per frame and
//! [`CameraController::advance`] folds it into a new controller and
//! camera, which keeps every step replayable in tests.

use glam::{Vec2, Vec3};

use crate::camera::Camera;

/// Everything the controller wants to know about one frame of input.
///
/// `mouse_offset` is the raw cursor displacement from the viewport center
/// in pixels; the platform layer recenters the cursor each frame while
/// `focused` is set and leaves the offset zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    pub focused: bool,
    pub mouse_offset: Vec2,
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub rotation_faster: bool,
    pub rotation_slower: bool,
    pub movement_faster: bool,
    pub movement_slower: bool,
    pub reset: bool,
}

/// Mouse and movement sensitivities, folded forward frame by frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraController {
    /// Degrees of rotation per pixel of mouse travel, clamped to [0, 2].
    pub rotation_scale: f32,
    /// World units per second at unit axis input, clamped to [0, 3].
    pub movement_scale: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            rotation_scale: 0.5,
            movement_scale: 1.0,
        }
    }
}

impl CameraController {
    /// Applies one frame of input to `camera`.
    ///
    /// The update order is load-bearing: sensitivities first, then mouse
    /// rotation, then movement along the freshly rotated axes, then yaw
    /// wrapping and pitch clamping, and a reset last so it overrides
    /// everything else in the same frame. Lens parameters pass through
    /// untouched.
    pub fn advance(
        &self,
        camera: &Camera,
        input: &InputSnapshot,
        dt: f32,
    ) -> (CameraController, Camera) {
        let mut next = *self;
        let mut camera = *camera;

        if input.rotation_faster {
            next.rotation_scale += 0.5 * dt;
        }
        if input.rotation_slower {
            next.rotation_scale -= 0.5 * dt;
        }
        next.rotation_scale = next.rotation_scale.clamp(0.0, 2.0);

        if input.focused {
            camera.rotation.x += input.mouse_offset.y * next.rotation_scale;
            camera.rotation.y += input.mouse_offset.x * next.rotation_scale;
        }

        if input.movement_faster {
            next.movement_scale += 0.5 * dt;
        }
        if input.movement_slower {
            next.movement_scale -= 0.5 * dt;
        }
        next.movement_scale = next.movement_scale.clamp(0.0, 3.0);

        let mut dz = 0.0;
        if input.forward {
            dz += 1.0;
        }
        if input.back {
            dz -= 1.0;
        }
        let mut dx = 0.0;
        if input.left {
            dx += 1.0;
        }
        if input.right {
            dx -= 1.0;
        }

        // Movement uses the rotation as updated above, before wrapping;
        // both describe the same heading, so the order is only visible to
        // the wrap itself.
        let yaw = -camera.rotation.y.to_radians();
        let pitch = -camera.rotation.x.to_radians();
        let step = dt * next.movement_scale;
        camera.position.x += step * (dz * yaw.sin() * pitch.cos() + dx * yaw.cos());
        camera.position.y += step * dz * pitch.sin();
        camera.position.z += step * (dz * yaw.cos() * pitch.cos() - dx * yaw.sin());

        if camera.rotation.y > 180.0 {
            camera.rotation.y -= 360.0;
        } else if camera.rotation.y < -180.0 {
            camera.rotation.y += 360.0;
        }
        camera.rotation.x = camera.rotation.x.clamp(-90.0, 90.0);

        if input.reset {
            camera.position = Camera::DEFAULT_POSITION;
            camera.rotation = Vec3::ZERO;
        }

        (next, camera)
    }
}
