//! # Sample decoding
//! Turns the little-endian register pairs read from the device into signed counts.
//!
//! The accelerometer is 12 bit, left justified in its 16 bit register pair. The
//! low nibble of the LSB register carries status bits, so it is masked off and
//! the word is shifted down arithmetically to keep the sign.
//!
//! The gyroscope is a plain 16 bit two's complement word.

use crate::registers::{ACCEL_FRAME_LEN, GYRO_FRAME_LEN};

/// Signed counts straight off the registers, before any scaling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawSample {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
    pub temperature: i8,
}

impl RawSample {
    pub fn from_frames(
        accel: &[u8; ACCEL_FRAME_LEN],
        gyro: &[u8; GYRO_FRAME_LEN],
    ) -> RawSample {
        RawSample {
            accel: accel_counts(accel),
            gyro: gyro_counts(gyro),
            temperature: accel[6] as i8,
        }
    }
}

/// 12 bit accelerometer count in [-2048, 2047].
pub fn accel_word(lsb: u8, msb: u8) -> i16 {
    i16::from_le_bytes([lsb & 0xF0, msb]) >> 4
}

/// 16 bit gyroscope count.
pub fn gyro_word(lsb: u8, msb: u8) -> i16 {
    i16::from_le_bytes([lsb, msb])
}

/// Decodes x, y, z from the first six bytes of an accelerometer read.
pub fn accel_counts(raw: &[u8]) -> [i16; 3] {
    [
        accel_word(raw[0], raw[1]),
        accel_word(raw[2], raw[3]),
        accel_word(raw[4], raw[5]),
    ]
}

/// Decodes x, y, z from the first six bytes of a gyroscope read.
pub fn gyro_counts(raw: &[u8]) -> [i16; 3] {
    [
        gyro_word(raw[0], raw[1]),
        gyro_word(raw[2], raw[3]),
        gyro_word(raw[4], raw[5]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accel_positive() {
        assert_eq!(accel_word(0x00, 0x10), 0x100);
        assert_eq!(accel_word(0xF0, 0x7F), 2047);
    }

    #[test]
    fn accel_sign_extends() {
        assert_eq!(accel_word(0xF0, 0xFF), -1);
        assert_eq!(accel_word(0x00, 0x80), -2048);
    }

    #[test]
    fn accel_ignores_status_nibble() {
        assert_eq!(accel_word(0x0F, 0x10), accel_word(0x00, 0x10));
        assert_eq!(accel_word(0xFF, 0xFF), -1);
    }

    #[test]
    fn gyro() {
        assert_eq!(gyro_word(0x34, 0x12), 0x1234);
        assert_eq!(gyro_word(0xFF, 0xFF), -1);
        assert_eq!(gyro_word(0x00, 0x80), i16::MIN);
    }

    #[test]
    fn frames() {
        let accel = [0x00, 0x10, 0xF0, 0xFF, 0xA0, 0x40, 0xFE];
        let gyro = [0x34, 0x12, 0xFF, 0xFF, 0x00, 0x00];
        let raw = RawSample::from_frames(&accel, &gyro);

        assert_eq!(raw.accel, [256, -1, 1034]);
        assert_eq!(raw.gyro, [4660, -1, 0]);
        assert_eq!(raw.temperature, -2);
    }
}
