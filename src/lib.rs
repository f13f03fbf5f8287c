//! # BMI055
//!
//! Driver for the Bosch BMI055, a 12 bit accelerometer and 16 bit gyroscope
//! sharing one package, read over I2C through the `embedded-hal` blocking traits.
//!
//! The driver:
//! - checks the identity of both sub-devices and brings them up,
//! - selects measurement range and filter bandwidth,
//! - turns raw register words into g, degrees per second and °C,
//! - estimates bias for both triads with the device at rest.
//!
//! Calibration is not persisted. `calibrate` returns the biases; keep them
//! and hand them back to `init` as `CalibrationData` on the next start.
//!
//! ```no_run
//! use bmi055::{Bmi055, CalibrationData};
//! use linux_embedded_hal::{Delay, I2cdev};
//!
//! let i2c = I2cdev::new("/dev/i2c-1").unwrap();
//! let mut imu = Bmi055::new(i2c, Delay);
//! imu.init(CalibrationData::default(), 0x18).unwrap();
//!
//! let bias = imu.calibrate().unwrap();
//! imu.init(bias.into(), 0x18).unwrap();
//!
//! imu.sample_once().unwrap();
//! println!("{:?} {:?}", imu.acceleration(), imu.angular_rate());
//! ```

pub mod calibration;
pub mod config;
pub mod convert;
pub mod decode;
pub mod driver;
pub mod registers;
pub mod scale;

use core::fmt;

pub use calibration::{Bias, CalibrationData};
pub use config::{CalibrationConfig, Config};
pub use convert::Reading;
pub use decode::RawSample;
pub use driver::Bmi055;
pub use registers::Addresses;
pub use scale::{AccelBandwidth, AccelRange, GyroBandwidth, GyroRange, RangeSelection};

/// Errors in this crate
#[derive(Debug)]
pub enum Error<E> {
    /// I2C bus error
    Comm(E),
    /// Address selector matches neither address pair
    InvalidAddress(u8),
    /// Accelerometer returned this chip id
    AccelIdMismatch(u8),
    /// Gyroscope returned this chip id
    GyroIdMismatch(u8),
    /// Range index below zero
    InvalidRange(i32),
}

impl<E> Error<E> {
    /// Integer status in the convention of C-style sensor drivers.
    pub fn status_code(&self) -> i8 {
        match self {
            Error::InvalidAddress(_) | Error::InvalidRange(_) => -1,
            Error::AccelIdMismatch(_) => -2,
            Error::GyroIdMismatch(_) => -3,
            Error::Comm(_) => -4,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Comm(e) => write!(f, "i2c error: {:?}", e),
            Error::InvalidAddress(a) => write!(f, "invalid address selector {:#04x}", a),
            Error::AccelIdMismatch(id) => write!(f, "unexpected accelerometer chip id {:#04x}", id),
            Error::GyroIdMismatch(id) => write!(f, "unexpected gyroscope chip id {:#04x}", id),
            Error::InvalidRange(i) => write!(f, "invalid range index {}", i),
        }
    }
}

impl<E: fmt::Debug> std::error::Error for Error<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_distinct() {
        let codes = [
            Error::<()>::InvalidAddress(0x20).status_code(),
            Error::<()>::AccelIdMismatch(0).status_code(),
            Error::<()>::GyroIdMismatch(0).status_code(),
            Error::<()>::Comm(()).status_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn display() {
        assert_eq!(
            Error::<()>::InvalidAddress(0x20).to_string(),
            "invalid address selector 0x20"
        );
    }
}
