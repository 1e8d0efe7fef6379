/// 3D transformation matrices and vector helpers
use nalgebra::{Matrix4, Point3, Vector3};

/// Matrix builders for the rendering pipeline
pub struct Transform;

impl Transform {
    pub fn identity() -> Matrix4<f32> {
        Matrix4::identity()
    }

    /// Create a translation matrix
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(tx, ty, tz))
    }

    /// Create a (possibly non-uniform) scale matrix
    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Rotation about the x axis (radians, right-handed)
    pub fn x_rotation(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(angle, 0.0, 0.0))
    }

    /// Rotation about the y axis (radians, right-handed)
    pub fn y_rotation(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, angle, 0.0))
    }

    /// Rotation about the z axis (radians, right-handed)
    pub fn z_rotation(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle))
    }

    /// Apply a 4x4 transform to a point in homogeneous coordinates
    /// (implicit w = 1), dividing by the resulting w.
    ///
    /// This is the single application path for both affine and projective
    /// matrices: affine transforms produce w = 1 and the divide is a no-op,
    /// projection matrices get their perspective divide here.
    pub fn apply(matrix: &Matrix4<f32>, point: Point3<f32>) -> Point3<f32> {
        matrix.transform_point(&point)
    }
}

/// Centroid of three points
pub fn centroid(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Point3<f32> {
    Point3::from((a.coords + b.coords + c.coords) / 3.0)
}

/// Unit face normal anchored at the centroid.
///
/// Built from `edge1 = b - centroid` and `edge2 = c - centroid`; the cull
/// test in the mesh pipeline assumes exactly this edge order, so a triangle
/// wound counter-clockwise (seen from outside) gets an outward normal.
pub fn face_normal(centroid: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Vector3<f32> {
    let edge1 = b - centroid;
    let edge2 = c - centroid;
    edge1.cross(&edge2).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rotation_is_identity() {
        let matrix = Transform::x_rotation(0.0);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_translation_moves_point() {
        let matrix = Transform::translation(1.0, 2.0, 3.0);
        let moved = Transform::apply(&matrix, Point3::new(0.0, 0.0, 0.0));
        assert!((moved - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-6);
    }

    #[test]
    fn test_rotation_roundtrip() {
        let point = Point3::new(1.0, 2.0, 3.0);
        let forward = Transform::y_rotation(0.7);
        let back = Transform::y_rotation(-0.7);
        let restored = Transform::apply(&back, Transform::apply(&forward, point));
        assert!((restored - point).norm() < 1e-5);
    }

    #[test]
    fn test_apply_divides_by_w() {
        // Bottom row (0, 0, 1, 0) copies z into w, so every component is
        // divided by z.
        let mut projective = Matrix4::identity();
        projective[(3, 2)] = 1.0;
        projective[(3, 3)] = 0.0;
        let projected = Transform::apply(&projective, Point3::new(2.0, 4.0, 2.0));
        assert!((projected - Point3::new(1.0, 2.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_face_normal_orientation() {
        // Counter-clockwise in the xy plane, seen from +z.
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        let normal = face_normal(centroid(a, b, c), b, c);
        assert!((normal - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_centroid() {
        let center = centroid(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        );
        assert!((center - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-6);
    }
}
