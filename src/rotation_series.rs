//! Rotation-series reduction for recorded quaternion streams
//!
//! Produces the per-sample quantities used for trajectory display and
//! analysis: Euler angles, axis-angle form, frame-to-frame rotation
//! increments from quaternion differencing, rotation rate, and cumulative
//! revolution count.

use log::warn;
use serde::Serialize;

use crate::quaternion::{AxisAngle, EulerAngles, Quaternion};

/// Reduced rotation record for a quaternion stream.
///
/// All vectors have one entry per input sample; the differenced quantities
/// (`rot_rate_deg_s`, `rot_count`) are zero at index 0.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RotationSeries {
    /// ZYX Euler angles per sample (radians)
    pub euler: Vec<EulerAngles>,
    /// Axis-angle form per sample
    pub axis_angle: Vec<AxisAngle>,
    /// Frame-to-frame rotation rate in degrees per second
    pub rot_rate_deg_s: Vec<f64>,
    /// Cumulative revolutions, from the running sum of rotation increments
    pub rot_count: Vec<f64>,
}

impl RotationSeries {
    pub fn len(&self) -> usize {
        self.euler.len()
    }

    pub fn is_empty(&self) -> bool {
        self.euler.is_empty()
    }
}

/// Reduce a quaternion stream sampled at `rate_hz`.
///
/// The rotation increment between samples is the axis-angle magnitude of
/// `dq = q_i * conj(q_{i-1})`. Sensor streams flip quaternion sign between
/// samples (q and -q encode the same rotation), so dq is negated when its
/// scalar part is negative to keep increments on the short arc.
///
/// A gimbal-locked sample has no Euler representation; the previous
/// sample's angles are carried forward with a warning (zeros when the first
/// sample is locked).
pub fn process_rotations(quats: &[Quaternion], rate_hz: f64) -> RotationSeries {
    let mut series = RotationSeries::default();
    let mut cum_deg = 0.0;
    let mut prev: Option<Quaternion> = None;

    for (i, &q) in quats.iter().enumerate() {
        let euler = match q.to_euler() {
            Ok(e) => e,
            Err(err) => {
                warn!("sample {i}: {err}; carrying previous Euler angles forward");
                series.euler.last().copied().unwrap_or_default()
            }
        };
        series.euler.push(euler);
        series.axis_angle.push(q.to_axis_angle());

        match prev {
            Some(p) => {
                let mut dq = q * p.conjugate();
                if dq.w < 0.0 {
                    dq = Quaternion::new(-dq.w, -dq.x, -dq.y, -dq.z);
                }
                let inc_deg = dq.to_axis_angle().angle_deg.abs();
                series.rot_rate_deg_s.push(inc_deg * rate_hz);
                cum_deg += inc_deg;
            }
            None => series.rot_rate_deg_s.push(0.0),
        }
        series.rot_count.push(cum_deg / 360.0);

        prev = Some(q);
    }

    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn spin_about_z(n: usize, step_deg: f64) -> Vec<Quaternion> {
        (0..n)
            .map(|i| {
                Quaternion::from_axis_angle([0.0, 0.0, 1.0], (i as f64 * step_deg).to_radians())
            })
            .collect()
    }

    #[test]
    fn test_constant_spin_rate() {
        // 20 samples at 10 Hz, 5 deg per sample: 50 deg/s throughout
        let quats = spin_about_z(20, 5.0);
        let series = process_rotations(&quats, 10.0);

        assert_eq!(series.len(), 20);
        assert_eq!(series.rot_rate_deg_s[0], 0.0);
        for &rate in &series.rot_rate_deg_s[1..] {
            assert_relative_eq!(rate, 50.0, epsilon = 1e-6);
        }

        // 19 increments of 5 deg = 95 deg of accumulated rotation
        let final_count = *series.rot_count.last().unwrap();
        assert_relative_eq!(final_count, 95.0 / 360.0, epsilon = 1e-9);
    }

    #[test]
    fn test_axis_angle_tracks_spin() {
        let quats = spin_about_z(10, 5.0);
        let series = process_rotations(&quats, 10.0);

        for (i, aa) in series.axis_angle.iter().enumerate().skip(1) {
            assert_relative_eq!(aa.z, 1.0, epsilon = 1e-9);
            assert_relative_eq!(aa.angle_deg, i as f64 * 5.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_gimbal_lock_carries_previous_euler() {
        let quats = [
            Quaternion::from_euler(0.2, 0.3, 0.4),
            Quaternion::from_euler(0.0, FRAC_PI_2, 0.0),
        ];
        let series = process_rotations(&quats, 50.0);

        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.euler[1].phi, series.euler[0].phi, epsilon = 1e-12);
        assert_relative_eq!(series.euler[1].theta, series.euler[0].theta, epsilon = 1e-12);
        assert_relative_eq!(series.euler[1].psi, series.euler[0].psi, epsilon = 1e-12);
    }

    #[test]
    fn test_sign_flip_is_not_a_rotation() {
        // q and -q encode the same orientation; the increment must be ~0
        let q = Quaternion::from_axis_angle([0.0, 1.0, 0.0], 0.8);
        let neg = Quaternion::new(-q.w, -q.x, -q.y, -q.z);
        let series = process_rotations(&[q, neg], 50.0);

        assert_relative_eq!(series.rot_rate_deg_s[1], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_stream() {
        let series = process_rotations(&[], 50.0);
        assert!(series.is_empty());
        assert!(series.rot_count.is_empty());
    }
}
