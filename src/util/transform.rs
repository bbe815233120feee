//! Affine transform primitives shared by the camera and scene code.
//!
//! All matrices are column-major with column vectors (`p' = M * p`), the
//! same layout the GPU uniforms use. Composition helpers never introduce
//! scale or shear, so anything built from them keeps an orthonormal
//! upper-left 3x3 block.

use glam::{Mat3, Mat4, Vec2, Vec3};

/// Rotation about the x, y and z axes, composed x-then-y-then-z
/// (`Rx * Ry * Rz`).
#[must_use]
pub fn euler_rotation(angles: Vec3) -> Mat4 {
    Mat4::from_rotation_x(angles.x)
        * Mat4::from_rotation_y(angles.y)
        * Mat4::from_rotation_z(angles.z)
}

/// Pure translation by `offset`.
#[must_use]
pub fn translation(offset: Vec3) -> Mat4 {
    Mat4::from_translation(offset)
}

/// The rotation-only upper-left 3x3 block of `m`.
#[must_use]
pub fn upper_left(m: &Mat4) -> Mat3 {
    Mat3::from_mat4(*m)
}

/// Whether the upper-left 3x3 block of `m` is orthonormal (`RᵀR = I` and
/// `|det R| = 1`) within `tolerance`.
#[must_use]
pub fn is_rigid(m: &Mat4, tolerance: f32) -> bool {
    let r = upper_left(m);
    let gram = r.transpose() * r;
    gram.abs_diff_eq(Mat3::IDENTITY, tolerance)
        && (r.determinant().abs() - 1.0).abs() <= tolerance
}

/// Full-circle heading angle (radians about +z) for a 2D facing vector.
///
/// `asin` only covers half a turn, so the branch is flipped for `dy < 0`.
/// Returns `None` for a zero-length vector.
#[must_use]
pub fn yaw_from_direction(direction: Vec2) -> Option<f32> {
    let len = direction.x.hypot(direction.y);
    if len <= f32::EPSILON {
        return None;
    }
    let s = (direction.x / len).clamp(-1.0, 1.0).asin();
    if direction.y < 0.0 {
        Some(std::f32::consts::PI + s)
    } else {
        Some(-s)
    }
}

/// Column-major 3x3 padded to three 16-byte columns (WGSL `mat3x3<f32>`
/// layout).
#[must_use]
pub fn mat3_padded(m: &Mat3) -> [[f32; 4]; 3] {
    [
        m.x_axis.extend(0.0).to_array(),
        m.y_axis.extend(0.0).to_array(),
        m.z_axis.extend(0.0).to_array(),
    ]
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use glam::Vec4;

    use super::*;

    #[test]
    fn euler_rotation_composes_x_then_y_then_z() {
        let angles = Vec3::new(0.3, -0.7, 1.1);
        let expected = Mat4::from_rotation_x(angles.x)
            * Mat4::from_rotation_y(angles.y)
            * Mat4::from_rotation_z(angles.z);
        assert!(euler_rotation(angles).abs_diff_eq(expected, 1e-6));

        // First column of Rx*Ry*Rz in closed form.
        let (sx, cx) = angles.x.sin_cos();
        let (sy, cy) = angles.y.sin_cos();
        let (sz, cz) = angles.z.sin_cos();
        let col0 = Vec4::new(
            cy * cz,
            sx * sy * cz + cx * sz,
            -cx * sy * cz + sx * sz,
            0.0,
        );
        assert!(euler_rotation(angles).x_axis.abs_diff_eq(col0, 1e-6));
    }

    #[test]
    fn zero_angles_are_identity() {
        assert_eq!(euler_rotation(Vec3::ZERO), Mat4::IDENTITY);
        assert_eq!(translation(Vec3::ZERO), Mat4::IDENTITY);
    }

    #[test]
    fn rigid_detection() {
        let m = translation(Vec3::new(1.0, 2.0, 3.0))
            * euler_rotation(Vec3::new(0.4, 0.2, -2.0));
        assert!(is_rigid(&m, 1e-5));
        assert!(!is_rigid(&Mat4::from_scale(Vec3::splat(2.0)), 1e-5));
    }

    #[test]
    fn yaw_covers_all_quadrants() {
        let cases = [
            (Vec2::new(0.0, 1.0), 0.0),
            (Vec2::new(1.0, 0.0), -FRAC_PI_2),
            (Vec2::new(-1.0, 0.0), FRAC_PI_2),
            (Vec2::new(0.0, -1.0), PI),
            (Vec2::new(1.0, -1.0), PI + FRAC_PI_4),
        ];
        for (dir, expected) in cases {
            let yaw = yaw_from_direction(dir).unwrap();
            assert!((yaw - expected).abs() < 1e-5, "{dir:?}: {yaw}");
            // Rotating +y by the yaw lands back on the facing direction.
            let rotated = Mat3::from_rotation_z(yaw) * Vec3::Y;
            assert!(rotated.truncate().abs_diff_eq(dir.normalize(), 1e-5));
        }
        assert_eq!(yaw_from_direction(Vec2::ZERO), None);
    }

    #[test]
    fn padded_mat3_keeps_columns() {
        let m = Mat3::from_cols_array(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0,
        ]);
        let padded = mat3_padded(&m);
        assert_eq!(padded[0], [1.0, 2.0, 3.0, 0.0]);
        assert_eq!(padded[2], [7.0, 8.0, 9.0, 0.0]);
    }
}
