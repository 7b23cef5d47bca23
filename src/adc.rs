//! ADC engineering-unit conversion for the BED instrument package
//!
//! The BED electronics sample housekeeping channels (battery voltage,
//! pressure, temperature, humidity) through a 16-bit ADC with a 2.5 V
//! reference. Each channel carries an affine calibration:
//!
//!   volts  = counts * VREF / 65536
//!   engval = slope * volts - intercept
//!
//! The table must match the channel assignments in the instrument firmware.

use serde::Serialize;

use crate::error::{BedMotionError, Result};

/// ADC reference voltage (volts)
pub const VREF: f64 = 2.50;

/// Full-scale count of the 16-bit converter
pub const ADC_FULL_SCALE: f64 = 65536.0;

// Channel assignments, fixed by the instrument wiring
pub const BATT_CHAN: u16 = 0;
pub const MODEM_CHAN: u16 = 1;
pub const EXT_PRESS_CHAN: u16 = 2;
pub const INT_PRESS_CHAN: u16 = 3;
pub const TEMP_CHAN: u16 = 4;
pub const HUMIDITY_CHAN: u16 = 5;

/// Calibration entry for one ADC channel
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AdcChannelConfig {
    pub channel: u16,
    pub name: &'static str,
    pub slope: f64,
    pub intercept: f64,
    pub units: &'static str,
}

/// Fixed calibration table, one entry per hardware channel
pub const ADC_CHANNELS: [AdcChannelConfig; 8] = [
    AdcChannelConfig { channel: 0, name: "VSys",   slope: 12.11,  intercept: 0.0,   units: "Batt Volts" },
    AdcChannelConfig { channel: 1, name: "VModem", slope: 12.11,  intercept: 0.0,   units: "Batt Volts" },
    AdcChannelConfig { channel: 2, name: "PR-EXT", slope: 50.0,   intercept: 12.5,  units: "bar" },
    AdcChannelConfig { channel: 3, name: "PR-INT", slope: 50.0,   intercept: 12.5,  units: "psia" },
    AdcChannelConfig { channel: 4, name: "Temp-I", slope: 100.0,  intercept: 50.0,  units: "degC" },
    AdcChannelConfig { channel: 5, name: "RelHum", slope: 47.175, intercept: 23.82, units: "%" },
    AdcChannelConfig { channel: 6, name: "??1",    slope: 1.0,    intercept: 0.0,   units: "ADCCounts" },
    AdcChannelConfig { channel: 7, name: "??2",    slope: 1.0,    intercept: 0.0,   units: "ADCCounts" },
];

/// Convert a raw ADC count to volts at the converter input
pub fn raw_to_volts(counts: u16) -> f64 {
    counts as f64 * VREF / ADC_FULL_SCALE
}

/// Convert a raw count on a battery channel to battery volts (12.11 divider)
pub fn raw_to_batt_volts(counts: u16) -> f64 {
    12.11 * raw_to_volts(counts)
}

/// Convert a raw count on `channel` to an engineering value and its units.
///
/// Returns `ChannelOutOfRange` for a channel index not in the calibration
/// table.
pub fn eng_value(channel: u16, counts: u16) -> Result<(f64, &'static str)> {
    let config = ADC_CHANNELS
        .get(channel as usize)
        .ok_or(BedMotionError::ChannelOutOfRange {
            channel,
            max: ADC_CHANNELS.len() as u16,
        })?;

    let engval = config.slope * raw_to_volts(counts) - config.intercept;
    Ok((engval, config.units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_temp_channel_midscale() {
        // Mid-scale count on Temp-I: 32768 * 2.5 / 65536 = 1.25 V,
        // 100 * 1.25 - 50 = 75 degC
        let (engval, units) = eng_value(TEMP_CHAN, 32768).expect("valid channel");
        assert_relative_eq!(engval, 75.0, epsilon = 1e-12);
        assert_eq!(units, "degC");
    }

    #[test]
    fn test_battery_channel_matches_helper() {
        let counts = 54321;
        let (engval, units) = eng_value(BATT_CHAN, counts).expect("valid channel");
        assert_relative_eq!(engval, raw_to_batt_volts(counts), epsilon = 1e-12);
        assert_eq!(units, "Batt Volts");
    }

    #[test]
    fn test_external_pressure_channel() {
        // 1.0 V input: 50 * (26214.4 counts -> ~1.0 V) - 12.5
        let counts = 26214; // 26214 * 2.5 / 65536 = 0.99998...
        let (engval, units) = eng_value(EXT_PRESS_CHAN, counts).expect("valid channel");
        assert_relative_eq!(engval, 50.0 * raw_to_volts(counts) - 12.5, epsilon = 1e-12);
        assert_eq!(units, "bar");
    }

    #[test]
    fn test_unknown_channel_rejected() {
        let err = eng_value(8, 0).unwrap_err();
        assert_eq!(err, BedMotionError::ChannelOutOfRange { channel: 8, max: 8 });
    }

    #[test]
    fn test_raw_to_volts_range() {
        assert_eq!(raw_to_volts(0), 0.0);
        assert_relative_eq!(raw_to_volts(32768), 1.25, epsilon = 1e-12);
        // Full-scale count stays just under VREF
        assert!(raw_to_volts(u16::MAX) < VREF);
    }
}
