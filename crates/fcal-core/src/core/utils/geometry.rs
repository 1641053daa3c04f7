use nalgebra::{Isometry3, Translation3, UnitQuaternion};

/// Builds a rotation from extrinsic rotations applied about z, then y, then x.
///
/// This is the rotation convention used throughout the plate and tower
/// builders: the composed matrix is `Rz(z) * Ry(y) * Rx(x)`.
pub fn rotation_zyx(z: f64, y: f64, x: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(x, y, z)
}

/// A pure translation transform.
pub fn translation(x: f64, y: f64, z: f64) -> Isometry3<f64> {
    Isometry3::from_parts(Translation3::new(x, y, z), UnitQuaternion::identity())
}

/// A rigid transform from a z-y-x rotation triple and a translation.
pub fn transform(rot: (f64, f64, f64), pos: (f64, f64, f64)) -> Isometry3<f64> {
    Isometry3::from_parts(
        Translation3::new(pos.0, pos.1, pos.2),
        rotation_zyx(rot.0, rot.1, rot.2),
    )
}
