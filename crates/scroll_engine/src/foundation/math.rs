//! Math utilities and types
//!
//! Provides the fundamental math types shared by the facet generator and the
//! text layouts.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, UnitQuaternion, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = UnitQuaternion<f32>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform from all three components
    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix (translation * rotation * scale)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Point3) -> Point3 {
        self.to_matrix().transform_point(&point)
    }

    /// Whether every component is finite
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|v| v.is_finite())
            && self.rotation.coords.iter().all(|v| v.is_finite())
            && self.scale.iter().all(|v| v.is_finite())
    }
}

/// Composition order for Euler angle triples.
///
/// Angles are always given as `(x, y, z)`; the order names which axis
/// rotation is applied outermost. `Xyz` produces `Rx * Ry * Rz`, `Yxz`
/// produces `Ry * Rx * Rz`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EulerOrder {
    /// `Rx * Ry * Rz`
    #[default]
    Xyz,
    /// `Rx * Rz * Ry`
    Xzy,
    /// `Ry * Rx * Rz`
    Yxz,
    /// `Ry * Rz * Rx`
    Yzx,
    /// `Rz * Rx * Ry`
    Zxy,
    /// `Rz * Ry * Rx`
    Zyx,
}

impl EulerOrder {
    /// Build the rotation for `angles` (radians about X, Y, Z) in this order
    pub fn quaternion(self, angles: Vec3) -> Quat {
        let x = Quat::from_axis_angle(&Vec3::x_axis(), angles.x);
        let y = Quat::from_axis_angle(&Vec3::y_axis(), angles.y);
        let z = Quat::from_axis_angle(&Vec3::z_axis(), angles.z);
        match self {
            Self::Xyz => x * y * z,
            Self::Xzy => x * z * y,
            Self::Yxz => y * x * z,
            Self::Yzx => y * z * x,
            Self::Zxy => z * x * y,
            Self::Zyx => z * y * x,
        }
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi, one full revolution
    pub const TAU: f32 = 2.0 * PI;

    /// Square root of three
    pub const SQRT_3: f32 = 1.732_050_8;

    /// Floating tolerance used for degeneracy checks
    pub const EPSILON: f32 = 1e-6;
}

/// Math utility functions
pub mod utils {
    use super::constants::SQRT_3;

    /// Apex height of a regular tetrahedron with the given edge length
    pub fn tetrahedron_height(edge: f32) -> f32 {
        SQRT_3 / 4.0 * edge
    }

    /// Reduce an `f64` angle into `[0, 2π)` before narrowing to `f32`
    pub fn wrap_angle(angle: f64) -> f32 {
        angle.rem_euclid(std::f64::consts::TAU) as f32
    }
}
