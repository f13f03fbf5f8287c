//! Register map of the BMI055.
//!
//! The accelerometer and the gyroscope sit behind separate I2C addresses and
//! expose their own register blocks.

// accelerometer
pub const ACCD_CHIPID: u8 = 0x00;
pub const ACCD_X_LSB: u8 = 0x02;
pub const PMU_RANGE: u8 = 0x0F;
pub const PMU_BW: u8 = 0x10;
pub const PMU_LPW: u8 = 0x11;
pub const BGW_SOFTRESET: u8 = 0x14;

// gyroscope
pub const GYR_CHIP_ID: u8 = 0x00;
pub const GYR_RATE_X_LSB: u8 = 0x02;
pub const GYR_RANGE: u8 = 0x0F;
pub const GYR_BW: u8 = 0x10;
pub const GYR_LPM1: u8 = 0x11;
pub const GYR_BGW_SOFTRESET: u8 = 0x14;

/// Identity byte reported by `ACCD_CHIPID`.
pub const ACCEL_ID: u8 = 0xFA;
/// Identity byte reported by `GYR_CHIP_ID`.
pub const GYRO_ID: u8 = 0x0F;

/// Written to either soft-reset register to reset that sub-device.
pub const SOFTRESET_CMD: u8 = 0xB6;
/// Normal power mode for `PMU_LPW` and `GYR_LPM1`.
pub const NORMAL_MODE: u8 = 0x00;

/// Six axis bytes followed by the temperature byte.
pub const ACCEL_FRAME_LEN: usize = 7;
pub const GYRO_FRAME_LEN: usize = 6;

/// I2C addresses of the two sub-devices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Addresses {
    pub accel: u8,
    pub gyro: u8,
}

impl Addresses {
    /// SDO pins low.
    pub const PRIMARY: Addresses = Addresses {
        accel: 0x18,
        gyro: 0x68,
    };
    /// SDO pins high.
    pub const SECONDARY: Addresses = Addresses {
        accel: 0x19,
        gyro: 0x69,
    };

    /// Either address of a pair selects the whole pair.
    pub fn from_selector(selector: u8) -> Option<Addresses> {
        match selector {
            0x18 | 0x68 => Some(Addresses::PRIMARY),
            0x19 | 0x69 => Some(Addresses::SECONDARY),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn either_half_of_a_pair_selects_it() {
        assert_eq!(Addresses::from_selector(0x18), Some(Addresses::PRIMARY));
        assert_eq!(Addresses::from_selector(0x68), Some(Addresses::PRIMARY));
        assert_eq!(Addresses::from_selector(0x19), Some(Addresses::SECONDARY));
        assert_eq!(Addresses::from_selector(0x69), Some(Addresses::SECONDARY));
    }

    #[test]
    fn unknown_selector() {
        assert_eq!(Addresses::from_selector(0x20), None);
        assert_eq!(Addresses::from_selector(0x00), None);
    }
}
