//! Object transforms.

use glam::{Mat3, Mat4, Vec3, Vec4};

/// Translation, scale and Tait-Bryan rotation of a game object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformComponent {
    pub translation: Vec3,
    pub scale: Vec3,
    /// Rotation angles in radians, applied in Y, X, Z order.
    pub rotation: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        }
    }
}

impl TransformComponent {
    /// Transform at `translation` with unit scale and no rotation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Set the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Model matrix: `translate * Ry * Rx * Rz * scale`.
    pub fn mat4(&self) -> Mat4 {
        let [c1, s1, c2, s2, c3, s3] = self.trig();
        let s = self.scale;
        Mat4::from_cols(
            Vec4::new(
                s.x * (c1 * c3 + s1 * s2 * s3),
                s.x * (c2 * s3),
                s.x * (c1 * s2 * s3 - c3 * s1),
                0.0,
            ),
            Vec4::new(
                s.y * (c3 * s1 * s2 - c1 * s3),
                s.y * (c2 * c3),
                s.y * (c1 * c3 * s2 + s1 * s3),
                0.0,
            ),
            Vec4::new(s.z * (c2 * s1), s.z * (-s2), s.z * (c1 * c2), 0.0),
            self.translation.extend(1.0),
        )
    }

    /// Inverse-transpose of the upper 3x3 of [`Self::mat4`], for normals.
    pub fn normal_matrix(&self) -> Mat3 {
        let [c1, s1, c2, s2, c3, s3] = self.trig();
        let inv = self.scale.recip();
        Mat3::from_cols(
            Vec3::new(
                inv.x * (c1 * c3 + s1 * s2 * s3),
                inv.x * (c2 * s3),
                inv.x * (c1 * s2 * s3 - c3 * s1),
            ),
            Vec3::new(
                inv.y * (c3 * s1 * s2 - c1 * s3),
                inv.y * (c2 * c3),
                inv.y * (c1 * c3 * s2 + s1 * s3),
            ),
            Vec3::new(inv.z * (c2 * s1), inv.z * (-s2), inv.z * (c1 * c2)),
        )
    }

    fn trig(&self) -> [f32; 6] {
        let (s1, c1) = self.rotation.y.sin_cos();
        let (s2, c2) = self.rotation.x.sin_cos();
        let (s3, c3) = self.rotation.z.sin_cos();
        [c1, s1, c2, s2, c3, s3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransformComponent {
        TransformComponent::from_translation(Vec3::new(0.0, 0.5, 2.5))
            .with_scale(Vec3::new(0.5, 2.0, 1.5))
            .with_rotation(Vec3::new(0.3, -1.1, 0.7))
    }

    #[test]
    fn identity_by_default() {
        assert_eq!(TransformComponent::default().mat4(), Mat4::IDENTITY);
        assert_eq!(TransformComponent::default().normal_matrix(), Mat3::IDENTITY);
    }

    #[test]
    fn mat4_is_yxz_composition() {
        let t = sample();
        let expected = Mat4::from_translation(t.translation)
            * Mat4::from_rotation_y(t.rotation.y)
            * Mat4::from_rotation_x(t.rotation.x)
            * Mat4::from_rotation_z(t.rotation.z)
            * Mat4::from_scale(t.scale);
        assert!(t.mat4().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn normal_matrix_is_inverse_transpose() {
        let t = sample();
        let expected = Mat3::from_mat4(t.mat4()).inverse().transpose();
        assert!(t.normal_matrix().abs_diff_eq(expected, 1e-5));
    }
}
