//! Quaternion conversions for BED orientation reconstruction
//!
//! The instrument logs its orientation as unit quaternions. For display and
//! analysis those are converted to ZYX Euler angles (Madgwick's formulation,
//! building only the five rotation-matrix entries the conversion needs) and
//! to axis-angle form (SpinCalc's formulation).
//!
//! Convention note: the historical Euler conversion reads angles from the
//! world-to-body direction cosine matrix, while the axis-angle conversion
//! treats the quaternion as a standard right-hand rotation. The two are NOT
//! inverses of each other for the same quaternion; each conversion here has
//! a matching constructor (`from_euler`, `from_axis_angle`) in its own
//! convention.

use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::error::{BedMotionError, Result};

/// Gimbal-lock detection threshold on |R[2,0]|
const GIMBAL_EPS: f64 = 1e-9;

/// Zero-rotation threshold on sin(mu/2) for the axis-angle conversion
const AXIS_EPS: f64 = 1e-12;

/// Unit quaternion (w, x, y, z), scalar first
///
/// The conversions assume unit norm; callers holding raw sensor output
/// should pass it through [`Quaternion::normalized`] first.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// ZYX Euler angles in radians: phi about X, theta about Y, psi about Z
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub phi: f64,
    pub theta: f64,
    pub psi: f64,
}

/// Rotation axis components and rotation angle about that axis in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub angle_deg: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Quaternion { w, x, y, z }
    }

    /// Conjugate (w, -x, -y, -z); for a unit quaternion this is the inverse
    /// rotation
    pub fn conjugate(&self) -> Self {
        Quaternion {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_unit(&self, eps: f64) -> bool {
        (self.norm() - 1.0).abs() <= eps
    }

    /// Scale to unit norm; returns the identity for a zero quaternion
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        if n < AXIS_EPS {
            return Quaternion::IDENTITY;
        }
        Quaternion {
            w: self.w / n,
            x: self.x / n,
            y: self.y / n,
            z: self.z / n,
        }
    }

    /// Build a quaternion from a rotation of `angle_rad` about `axis`
    /// (standard right-hand rotation; inverse of [`Quaternion::to_axis_angle`]).
    ///
    /// The axis is normalized internally; a zero axis yields the identity.
    pub fn from_axis_angle(axis: [f64; 3], angle_rad: f64) -> Self {
        let n = (axis[0] * axis[0] + axis[1] * axis[1] + axis[2] * axis[2]).sqrt();
        if n < AXIS_EPS {
            return Quaternion::IDENTITY;
        }
        let half = angle_rad / 2.0;
        let s = half.sin() / n;
        Quaternion {
            w: half.cos(),
            x: axis[0] * s,
            y: axis[1] * s,
            z: axis[2] * s,
        }
    }

    /// Build a quaternion from ZYX Euler angles in the convention of
    /// [`Quaternion::to_euler`], so the two round-trip away from the gimbal
    /// boundary.
    pub fn from_euler(phi: f64, theta: f64, psi: f64) -> Self {
        let (sr, cr) = (phi / 2.0).sin_cos();
        let (sp, cp) = (theta / 2.0).sin_cos();
        let (sy, cy) = (psi / 2.0).sin_cos();

        // Conjugate of the standard ZYX euler-to-quaternion composition:
        // to_euler() reads angles from the world-to-body matrix.
        Quaternion {
            w: cr * cp * cy + sr * sp * sy,
            x: cr * sp * sy - sr * cp * cy,
            y: -(cr * sp * cy + sr * cp * sy),
            z: sr * sp * cy - cr * cp * sy,
        }
    }

    /// Convert to ZYX Euler angles.
    ///
    /// Builds only the rotation-matrix entries the formulas use:
    ///
    ///   phi   = atan2(R[2,1], R[2,2])
    ///   theta = -atan(R[2,0] / sqrt(1 - R[2,0]^2))
    ///   psi   = atan2(R[1,0], R[0,0])
    ///
    /// At the gimbal-lock boundary (|R[2,0]| ~ 1, i.e. theta ~ +/-90 deg) the
    /// sqrt term vanishes and the decomposition is singular; that condition
    /// is detected up front and reported as `SingularOrientation` rather
    /// than producing NaN or +/-pi artifacts.
    pub fn to_euler(&self) -> Result<EulerAngles> {
        let (w, x, y, z) = (self.w, self.x, self.y, self.z);

        let r00 = 2.0 * w * w - 1.0 + 2.0 * x * x;
        let r10 = 2.0 * (x * y - w * z);
        let r20 = 2.0 * (x * z + w * y);
        let r21 = 2.0 * (y * z - w * x);
        let r22 = 2.0 * w * w - 1.0 + 2.0 * z * z;

        if r20.abs() >= 1.0 - GIMBAL_EPS {
            return Err(BedMotionError::SingularOrientation { r20 });
        }

        Ok(EulerAngles {
            phi: r21.atan2(r22),
            theta: -(r20 / (1.0 - r20 * r20).sqrt()).atan(),
            psi: r10.atan2(r00),
        })
    }

    /// Convert to axis-angle form.
    ///
    ///   mu = 2 * atan2(||(x, y, z)||, w)
    ///
    /// For a unit quaternion sin(mu/2) equals the vector-part norm; when it
    /// is below threshold (no rotation) the axis is undefined and the fixed
    /// fallback axis (1, 0, 0) is returned with the angle in degrees.
    pub fn to_axis_angle(&self) -> AxisAngle {
        let vnorm = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        let mu = 2.0 * vnorm.atan2(self.w);
        let s = (mu / 2.0).sin();

        if s.abs() > AXIS_EPS {
            AxisAngle {
                x: self.x / s,
                y: self.y / s,
                z: self.z / s,
                angle_deg: mu.to_degrees(),
            }
        } else {
            AxisAngle {
                x: 1.0,
                y: 0.0,
                z: 0.0,
                angle_deg: mu.to_degrees(),
            }
        }
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product; composes rotations
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}
