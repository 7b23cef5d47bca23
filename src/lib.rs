//! Motion and orientation data reduction for Benthic Event Detector (BED)
//! instruments
//!
//! BEDs log raw ADC housekeeping counts, orientation quaternions, and
//! position fixes during seafloor transport events. This crate turns those
//! raw values into engineering units, Euler/axis-angle orientation series,
//! rotation rates, and great-circle displacement.

pub mod adc;
pub mod error;
pub mod geo;
pub mod quaternion;
pub mod rotation_series;

pub use adc::{eng_value, raw_to_batt_volts, raw_to_volts, AdcChannelConfig, ADC_CHANNELS, VREF};
pub use error::{BedMotionError, Result};
pub use geo::{haversine_km, track_distance_km, GeoFix, EARTH_RADIUS_KM};
pub use quaternion::{AxisAngle, EulerAngles, Quaternion};
pub use rotation_series::{process_rotations, RotationSeries};
