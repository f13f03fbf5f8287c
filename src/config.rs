//! # Driver configuration
//! Operating configuration applied at initialization and the tunables of the
//! calibration run. Defaults reproduce the standard bring-up of the device.

use crate::scale::{AccelBandwidth, AccelRange, GyroBandwidth, GyroRange};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub accel_range: AccelRange,
    pub accel_bandwidth: AccelBandwidth,
    pub gyro_range: GyroRange,
    pub gyro_bandwidth: GyroBandwidth,
    /// Wait after a soft reset, ms.
    pub reset_delay_ms: u16,
    /// Wait after entering normal mode, ms.
    pub startup_delay_ms: u16,
    pub calibration: CalibrationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            accel_range: AccelRange::G16,
            accel_bandwidth: AccelBandwidth::Hz62_5,
            gyro_range: GyroRange::Dps2000,
            // limits the ODR to 400 Hz
            gyro_bandwidth: GyroBandwidth::Odr400Hz47,
            reset_delay_ms: 100,
            startup_delay_ms: 100,
            calibration: CalibrationConfig::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationConfig {
    /// Sample sets averaged per run.
    pub samples: u16,
    /// Pause between sample sets, ms.
    pub sample_delay_ms: u16,
    pub reset_delay_ms: u16,
    /// Pause between configuring and the first sample, ms.
    pub settle_delay_ms: u16,
    pub accel_bandwidth: AccelBandwidth,
    pub gyro_bandwidth: GyroBandwidth,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        CalibrationConfig {
            samples: 64,
            sample_delay_ms: 20,
            reset_delay_ms: 100,
            settle_delay_ms: 10,
            accel_bandwidth: AccelBandwidth::Hz125,
            gyro_bandwidth: GyroBandwidth::Odr400Hz47,
        }
    }
}
