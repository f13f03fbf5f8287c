//! # Accelerometer and gyroscope calibration
//! Bias estimation for both triads. The driver puts the device in its most
//! sensitive configuration and feeds samples into a `BiasAccumulator`; the
//! mean of each axis is the bias.
//!
//! ## Mounting
//! The device must be stationary and level with gravity along the z axis while
//! calibrating. The z mean then holds ±1 g on top of the sensor error and
//! `remove_gravity` strips it. A different orientation gives a wrong bias and
//! cannot be detected here.

use crate::scale::{AccelRange, GyroRange};

/// Range used while calibrating. Sensitivities below are fixed to these.
pub const CALIBRATION_ACCEL_RANGE: AccelRange = AccelRange::G2;
pub const CALIBRATION_GYRO_RANGE: GyroRange = GyroRange::Dps125;

/// g per count at 2 g.
pub const ACCEL_SENSITIVITY: f32 = 2.0 / 2048.0;
/// dps per count at 125 dps.
pub const GYRO_SENSITIVITY: f32 = 125.0 / 32768.0;

/// Biases held by the driver. An invalid record applies no correction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CalibrationData {
    pub valid: bool,
    pub accel_bias: [f32; 3],
    pub gyro_bias: [f32; 3],
}

impl CalibrationData {
    /// Zeroed biases unless the record is valid.
    pub fn bias_or_zero(&self) -> CalibrationData {
        if self.valid {
            *self
        } else {
            CalibrationData::default()
        }
    }
}

/// Output of a calibration run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bias {
    /// g
    pub accel: [f32; 3],
    /// degrees per second
    pub gyro: [f32; 3],
}

impl From<Bias> for CalibrationData {
    fn from(bias: Bias) -> Self {
        CalibrationData {
            valid: true,
            accel_bias: bias.accel,
            gyro_bias: bias.gyro,
        }
    }
}

/// Running sums in physical units.
#[derive(Clone, Debug, Default)]
pub struct BiasAccumulator {
    accel_sum: [f32; 3],
    gyro_sum: [f32; 3],
    samples: u32,
}

impl BiasAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, accel: [i16; 3], gyro: [i16; 3]) {
        for axis in 0..3 {
            self.accel_sum[axis] += f32::from(accel[axis]) * ACCEL_SENSITIVITY;
            self.gyro_sum[axis] += f32::from(gyro[axis]) * GYRO_SENSITIVITY;
        }
        self.samples += 1;
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Per-axis means with gravity removed from accelerometer z. No samples
    /// gives zero means.
    pub fn finish(&self) -> Bias {
        let n = self.samples.max(1) as f32;
        let mut accel = [0.0; 3];
        let mut gyro = [0.0; 3];
        for axis in 0..3 {
            accel[axis] = self.accel_sum[axis] / n;
            gyro[axis] = self.gyro_sum[axis] / n;
        }
        accel[2] = remove_gravity(accel[2]);

        Bias { accel, gyro }
    }
}

/// Takes one g off the vertical axis mean, toward zero when positive and
/// away from it otherwise.
pub fn remove_gravity(vertical_mean: f32) -> f32 {
    if vertical_mean > 0.0 {
        vertical_mean - 1.0
    } else {
        vertical_mean + 1.0
    }
}
