use thiserror::Error;

/// BED data-reduction error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BedMotionError {
    #[error("ADC channel {channel} out of range (valid channels are 0..{max})")]
    ChannelOutOfRange { channel: u16, max: u16 },

    #[error("singular orientation: R[2,0] = {r20} is at the gimbal-lock boundary")]
    SingularOrientation { r20: f64 },

    #[error("invalid coordinate: lon {lon}, lat {lat} (expected lon in [-180, 180], lat in [-90, 90])")]
    InvalidCoordinate { lon: f64, lat: f64 },
}

/// Result type for BED data-reduction operations
pub type Result<T> = std::result::Result<T, BedMotionError>;
