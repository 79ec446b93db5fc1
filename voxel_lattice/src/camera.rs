//! Fixed virtual camera used to cast placement rays.
//!
//! The live video feed is a static backdrop, so the camera never moves during
//! a session.  Conventions are OpenGL-style: right-handed, clip-space depth in
//! `[-1, 1]`, and an unrotated camera looks down −Z with +Y up.

use glam::{Mat4, Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub position:      Vec3,
    pub orientation:   Quat,
    /// Vertical field of view.
    pub fov_y_degrees: f32,
    /// Width / height of the viewport.
    pub aspect:        f32,
    pub near:          f32,
    pub far:           f32,
}

impl Default for CameraPose {
    fn default() -> Self {
        CameraPose {
            position:      Vec3::ZERO,
            orientation:   Quat::IDENTITY,
            fov_y_degrees: 75.0,
            aspect:        16.0 / 9.0,
            near:          0.1,
            far:           1000.0,
        }
    }
}

impl CameraPose {
    /// True when the pose yields an invertible, finite projection.
    pub fn is_valid(&self) -> bool {
        self.position.is_finite()
            && self.orientation.is_finite()
            && self.orientation.length_squared() > 0.0
            && self.fov_y_degrees > 0.0
            && self.fov_y_degrees < 180.0
            && self.aspect.is_finite()
            && self.aspect > 0.0
            && self.near > 0.0
            && self.far.is_finite()
            && self.far > self.near
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Camera-to-world transform.
    pub fn world_from_camera(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation.normalize(), self.position)
    }

    /// World-to-camera transform.
    pub fn view(&self) -> Mat4 { self.world_from_camera().inverse() }

    /// NDC point back to world space.
    pub fn unproject(&self, ndc: Vec3) -> Vec3 {
        (self.world_from_camera() * self.projection().inverse()).project_point3(ndc)
    }

    /// World point to normalised screen space (`[0,1]²`, origin top-left).
    ///
    /// Returns `None` for points at or behind the camera plane.  The second
    /// value is the view-space distance along the viewing axis.
    pub fn world_to_screen(&self, p: Vec3) -> Option<(Vec2, f32)> {
        let view = self.view().transform_point3(p);
        let depth = -view.z;
        if depth <= self.near { return None; }
        let ndc = self.projection().project_point3(view);
        Some((Vec2::new((ndc.x + 1.0) * 0.5, (1.0 - ndc.y) * 0.5), depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_is_valid() {
        assert!(CameraPose::default().is_valid());
    }

    #[test]
    fn degenerate_poses_are_invalid() {
        let base = CameraPose::default();
        assert!(!CameraPose { fov_y_degrees: 0.0, ..base }.is_valid());
        assert!(!CameraPose { aspect: 0.0, ..base }.is_valid());
        assert!(!CameraPose { near: 5.0, far: 1.0, ..base }.is_valid());
        assert!(!CameraPose { position: Vec3::NAN, ..base }.is_valid());
    }

    #[test]
    fn screen_centre_ahead_of_camera() {
        let cam = CameraPose::default();
        let (screen, depth) = cam.world_to_screen(Vec3::new(0.0, 0.0, -6.0)).unwrap();
        assert!((screen - Vec2::splat(0.5)).length() < 1e-5);
        assert!((depth - 6.0).abs() < 1e-5);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let cam = CameraPose::default();
        assert!(cam.world_to_screen(Vec3::new(0.0, 0.0, 3.0)).is_none());
    }

    #[test]
    fn screen_up_is_world_up() {
        let cam = CameraPose::default();
        let (screen, _) = cam.world_to_screen(Vec3::new(0.0, 1.0, -6.0)).unwrap();
        assert!(screen.y < 0.5);
    }
}
