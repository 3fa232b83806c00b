//! Camera pose, lens parameters and the per-frame view/projection matrices.

use glam::{Mat4, Vec3};

/// Free-flying camera: pose plus lens. Plain data; the controller replaces
/// it wholesale each frame, nothing mutates it mid-frame.
///
/// `rotation` is Euler degrees: x pitch, y yaw, z roll (always 0 in
/// practice).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Camera {
    /// Starting pose, also the reset target.
    pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, -5.0);

    pub fn new(position: Vec3, rotation: Vec3, fov: f32, near_clip: f32, far_clip: f32) -> Self {
        debug_assert!(fov > 0.0 && near_clip > 0.0 && near_clip < far_clip);
        Self {
            position,
            rotation,
            fov,
            near_clip,
            far_clip,
        }
    }

    /// World-to-view matrix: translate by −position, then rotate roll, yaw
    /// and pitch. The yaw term carries a +180° offset so that a zero
    /// rotation looks down the +Z world axis while view space stays
    /// right-handed (camera forward −Z). The exact composition order is
    /// part of the camera convention; do not reorder.
    pub fn world_to_view(&self) -> Mat4 {
        Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y((self.rotation.y + 180.0).to_radians())
            * Mat4::from_rotation_z(self.rotation.z.to_radians())
            * Mat4::from_translation(-self.position)
    }

    /// Right-handed perspective matrix with [0,1] device depth.
    ///
    /// Returns `None` for a degenerate viewport (zero width or height) so a
    /// transient zero-size frame skips rendering instead of dividing by
    /// zero in the aspect ratio.
    pub fn perspective(&self, width: usize, height: usize) -> Option<Mat4> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Mat4::perspective_rh(
            self.fov.to_radians(),
            width as f32 / height as f32,
            self.near_clip,
            self.far_clip,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITION, Vec3::ZERO, 75.0, 0.3, 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn default_pose_views_world_origin_ahead() {
        let camera = Camera::default();
        let view = camera.world_to_view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(view.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(view.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(view.z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_rotation_looks_down_positive_z() {
        let camera = Camera::new(Vec3::ZERO, Vec3::ZERO, 75.0, 0.3, 10.0);
        let ahead = camera.world_to_view() * Vec4::new(0.0, 0.0, 1.0, 1.0);
        // Camera forward is view-space -Z.
        assert_relative_eq!(ahead.z, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn translation_applies_before_rotation() {
        let camera =
            Camera::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, -90.0, 0.0), 75.0, 0.3, 10.0);
        // Yaw -90 looks toward world +X; a point one unit that way from the
        // camera position sits one unit ahead in view space.
        let view = camera.world_to_view() * Vec4::new(1.0, 0.0, -5.0, 1.0);
        assert_relative_eq!(view.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(view.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_matches_field_of_view() {
        let camera = Camera::default();
        let m = camera.perspective(640, 360).unwrap();
        let focal = 1.0 / (camera.fov.to_radians() / 2.0).tan();
        assert_relative_eq!(m.y_axis.y, focal, epsilon = 1e-5);
        assert_relative_eq!(m.x_axis.x, focal / (640.0 / 360.0), epsilon = 1e-5);
        // Depth maps to [0,1]: w' = -z, z' carries far/(near-far).
        assert_relative_eq!(m.z_axis.z, 10.0 / (0.3 - 10.0), epsilon = 1e-5);
        assert_relative_eq!(m.z_axis.w, -1.0);
        assert_relative_eq!(m.w_axis.z, 0.3 * 10.0 / (0.3 - 10.0), epsilon = 1e-5);
    }

    #[test]
    fn degenerate_viewport_yields_no_matrix() {
        let camera = Camera::default();
        assert!(camera.perspective(640, 0).is_none());
        assert!(camera.perspective(0, 360).is_none());
    }
}
