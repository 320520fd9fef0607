//! Camera and view management.
//!
//! Matrices follow the Vulkan clip convention: depth in `[0, 1]` and y
//! pointing down.

use glam::{Mat4, Vec3, Vec4};
use isomesh_core::{Error, Result};

/// Camera holding a projection and a view matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    projection: Mat4,
    view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
        }
    }
}

impl Camera {
    /// Up vector used by the demo scenes. Screen y points down.
    pub const DEFAULT_UP: Vec3 = Vec3::NEG_Y;

    /// Map the box `[left, right] x [top, bottom] x [near, far]` to the
    /// canonical view volume.
    pub fn set_orthographic_projection(
        &mut self,
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    ) {
        self.projection = Mat4::from_cols(
            Vec4::new(2.0 / (right - left), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 / (bottom - top), 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0 / (far - near), 0.0),
            Vec4::new(
                -(right + left) / (right - left),
                -(bottom + top) / (bottom - top),
                -near / (far - near),
                1.0,
            ),
        );
    }

    /// Perspective frustum with vertical field of view `fov_y` in radians.
    pub fn set_perspective_projection(
        &mut self,
        fov_y: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Result<()> {
        if aspect_ratio.abs() <= f32::EPSILON || !aspect_ratio.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "aspect ratio must be finite and non-zero, got {aspect_ratio}"
            )));
        }

        let tan_half_fovy = (fov_y / 2.0).tan();
        self.projection = Mat4::from_cols(
            Vec4::new(1.0 / (aspect_ratio * tan_half_fovy), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0 / tan_half_fovy, 0.0, 0.0),
            Vec4::new(0.0, 0.0, far / (far - near), 1.0),
            Vec4::new(0.0, 0.0, -(far * near) / (far - near), 0.0),
        );
        Ok(())
    }

    /// Look from `position` along `direction`.
    pub fn set_view_direction(&mut self, position: Vec3, direction: Vec3, up: Vec3) {
        let w = direction.normalize();
        let u = w.cross(up).normalize();
        let v = w.cross(u);
        self.view = Self::view_from_basis(position, u, v, w);
    }

    /// Look from `position` towards `target`.
    pub fn set_view_target(&mut self, position: Vec3, target: Vec3, up: Vec3) {
        self.set_view_direction(position, target - position, up);
    }

    /// View from `position` with Tait-Bryan angles applied in Y, X, Z order.
    pub fn set_view_yxz(&mut self, position: Vec3, rotation: Vec3) {
        let (s3, c3) = rotation.z.sin_cos();
        let (s2, c2) = rotation.x.sin_cos();
        let (s1, c1) = rotation.y.sin_cos();
        let u = Vec3::new(c1 * c3 + s1 * s2 * s3, c2 * s3, c1 * s2 * s3 - c3 * s1);
        let v = Vec3::new(c3 * s1 * s2 - c1 * s3, c2 * c3, c1 * c3 * s2 + s1 * s3);
        let w = Vec3::new(c2 * s1, -s2, c1 * c2);
        self.view = Self::view_from_basis(position, u, v, w);
    }

    /// Rows `u`, `v`, `w` with the camera position moved to the origin.
    fn view_from_basis(position: Vec3, u: Vec3, v: Vec3, w: Vec3) -> Mat4 {
        Mat4::from_cols(
            Vec4::new(u.x, v.x, w.x, 0.0),
            Vec4::new(u.y, v.y, w.y, 0.0),
            Vec4::new(u.z, v.z, w.z, 0.0),
            Vec4::new(-u.dot(position), -v.dot(position), -w.dot(position), 1.0),
        )
    }

    pub const fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub const fn view(&self) -> &Mat4 {
        &self.view
    }

    /// Get the view-projection matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perspective_matches_left_handed_zero_to_one() {
        let mut camera = Camera::default();
        camera
            .set_perspective_projection(50f32.to_radians(), 1.5, 0.1, 10.0)
            .unwrap();
        let expected = Mat4::perspective_lh(50f32.to_radians(), 1.5, 0.1, 10.0);
        assert!(camera.projection().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn perspective_depth_range() {
        let mut camera = Camera::default();
        camera.set_perspective_projection(1.0, 1.0, 0.5, 20.0).unwrap();
        let near = camera.projection().project_point3(Vec3::new(0.0, 0.0, 0.5));
        let far = camera.projection().project_point3(Vec3::new(0.0, 0.0, 20.0));
        assert_relative_eq!(near.z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_aspect_rejected() {
        let mut camera = Camera::default();
        let err = camera
            .set_perspective_projection(1.0, 0.0, 0.1, 10.0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert_eq!(*camera.projection(), Mat4::IDENTITY);
    }

    #[test]
    fn orthographic_maps_box_to_clip_volume() {
        let mut camera = Camera::default();
        camera.set_orthographic_projection(-1.5, 1.5, -1.0, 1.0, -1.0, 1.0);
        let p = camera.projection();
        let corner = p.transform_point3(Vec3::new(-1.5, -1.0, -1.0));
        assert!(corner.abs_diff_eq(Vec3::new(-1.0, -1.0, 0.0), 1e-6));
        let corner = p.transform_point3(Vec3::new(1.5, 1.0, 1.0));
        assert!(corner.abs_diff_eq(Vec3::new(1.0, 1.0, 1.0), 1e-6));
        let expected = Mat4::orthographic_lh(-1.5, 1.5, -1.0, 1.0, -1.0, 1.0);
        assert!(p.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn view_direction_puts_camera_at_origin() {
        let mut camera = Camera::default();
        let position = Vec3::new(-1.0, -2.0, -2.0);
        camera.set_view_target(position, Vec3::new(0.0, 0.0, 2.5), Camera::DEFAULT_UP);
        let origin = camera.view().transform_point3(position);
        assert!(origin.abs_diff_eq(Vec3::ZERO, 1e-5));

        // the target sits straight ahead on +z
        let target = camera.view().transform_point3(Vec3::new(0.0, 0.0, 2.5));
        assert_relative_eq!(target.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target.y, 0.0, epsilon = 1e-5);
        assert!(target.z > 0.0);
    }

    #[test]
    fn view_direction_matches_flipped_up_look_to() {
        let mut camera = Camera::default();
        let position = Vec3::new(0.3, 1.0, -4.0);
        let direction = Vec3::new(0.5, 0.0, 1.0);
        camera.set_view_direction(position, direction, Camera::DEFAULT_UP);
        let expected = Mat4::look_to_lh(position, direction, -Camera::DEFAULT_UP);
        assert!(camera.view().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn view_yxz_inverts_object_transform() {
        let mut camera = Camera::default();
        let position = Vec3::new(1.0, -0.5, 3.0);
        let rotation = Vec3::new(0.4, 1.2, -0.3);
        camera.set_view_yxz(position, rotation);
        let camera_to_world = Mat4::from_translation(position)
            * Mat4::from_rotation_y(rotation.y)
            * Mat4::from_rotation_x(rotation.x)
            * Mat4::from_rotation_z(rotation.z);
        assert!(camera.view().abs_diff_eq(camera_to_world.inverse(), 1e-5));
    }
}
