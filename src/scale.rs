//! # Range and bandwidth selection
//! Maps range indices onto full-scale settings, their register codes and the
//! matching scale factor (physical units per count).
//!
//! Indices past the widest range are clamped to it instead of being rejected.
//! Only negative indices are invalid.

/// Counts on either side of zero for the 12 bit accelerometer.
pub const ACCEL_HALF_SPAN: f32 = 2048.0;
/// Counts on either side of zero for the 16 bit gyroscope.
pub const GYRO_HALF_SPAN: f32 = 32768.0;

/// How a range index was interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeSelection {
    Valid(u8),
    ClampedToMax,
    Invalid,
}

impl RangeSelection {
    pub fn classify(index: i32, max_index: u8) -> RangeSelection {
        if index < 0 {
            RangeSelection::Invalid
        } else if index > i32::from(max_index) {
            RangeSelection::ClampedToMax
        } else {
            RangeSelection::Valid(index as u8)
        }
    }

    /// Index of the range actually applied, if any.
    pub fn applied(self, max_index: u8) -> Option<u8> {
        match self {
            RangeSelection::Valid(index) => Some(index),
            RangeSelection::ClampedToMax => Some(max_index),
            RangeSelection::Invalid => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelRange {
    G2,
    G4,
    G8,
    G16,
}

impl AccelRange {
    pub const MAX_INDEX: u8 = 3;

    /// Resolves an index into the range it selects, clamping large indices.
    pub fn select(index: i32) -> (RangeSelection, Option<AccelRange>) {
        let selection = RangeSelection::classify(index, Self::MAX_INDEX);
        let range = selection.applied(Self::MAX_INDEX).map(|i| match i {
            0 => AccelRange::G2,
            1 => AccelRange::G4,
            2 => AccelRange::G8,
            _ => AccelRange::G16,
        });
        (selection, range)
    }

    /// Full scale in g.
    pub fn full_scale(self) -> f32 {
        match self {
            AccelRange::G2 => 2.0,
            AccelRange::G4 => 4.0,
            AccelRange::G8 => 8.0,
            AccelRange::G16 => 16.0,
        }
    }

    /// Value for `PMU_RANGE`.
    pub fn register_code(self) -> u8 {
        match self {
            AccelRange::G2 => 0x03,
            AccelRange::G4 => 0x05,
            AccelRange::G8 => 0x08,
            AccelRange::G16 => 0x0C,
        }
    }

    /// g per count.
    pub fn scale_factor(self) -> f32 {
        self.full_scale() / ACCEL_HALF_SPAN
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GyroRange {
    Dps125,
    Dps250,
    Dps500,
    Dps1000,
    Dps2000,
}

impl GyroRange {
    pub const MAX_INDEX: u8 = 4;

    pub fn select(index: i32) -> (RangeSelection, Option<GyroRange>) {
        let selection = RangeSelection::classify(index, Self::MAX_INDEX);
        let range = selection.applied(Self::MAX_INDEX).map(|i| match i {
            0 => GyroRange::Dps125,
            1 => GyroRange::Dps250,
            2 => GyroRange::Dps500,
            3 => GyroRange::Dps1000,
            _ => GyroRange::Dps2000,
        });
        (selection, range)
    }

    /// Full scale in degrees per second.
    pub fn full_scale(self) -> f32 {
        match self {
            GyroRange::Dps125 => 125.0,
            GyroRange::Dps250 => 250.0,
            GyroRange::Dps500 => 500.0,
            GyroRange::Dps1000 => 1000.0,
            GyroRange::Dps2000 => 2000.0,
        }
    }

    /// Value for `GYR_RANGE`.
    pub fn register_code(self) -> u8 {
        match self {
            GyroRange::Dps125 => 0x04,
            GyroRange::Dps250 => 0x03,
            GyroRange::Dps500 => 0x02,
            GyroRange::Dps1000 => 0x01,
            GyroRange::Dps2000 => 0x00,
        }
    }

    /// Degrees per second per count.
    pub fn scale_factor(self) -> f32 {
        self.full_scale() / GYRO_HALF_SPAN
    }
}

/// Accelerometer low-pass filter bandwidth (`PMU_BW`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelBandwidth {
    Hz7_81,
    Hz15_63,
    Hz31_25,
    Hz62_5,
    Hz125,
    Hz250,
    Hz500,
    Hz1000,
}

impl AccelBandwidth {
    pub fn register_code(self) -> u8 {
        match self {
            AccelBandwidth::Hz7_81 => 0x08,
            AccelBandwidth::Hz15_63 => 0x09,
            AccelBandwidth::Hz31_25 => 0x0A,
            AccelBandwidth::Hz62_5 => 0x0B,
            AccelBandwidth::Hz125 => 0x0C,
            AccelBandwidth::Hz250 => 0x0D,
            AccelBandwidth::Hz500 => 0x0E,
            AccelBandwidth::Hz1000 => 0x0F,
        }
    }
}

/// Gyroscope filter bandwidth and output data rate (`GYR_BW`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GyroBandwidth {
    /// 2000 Hz ODR, unfiltered (523 Hz).
    Odr2000Unfiltered,
    Odr2000Hz230,
    Odr1000Hz116,
    Odr400Hz47,
    Odr200Hz23,
    Odr100Hz12,
    Odr200Hz64,
    Odr100Hz32,
}

impl GyroBandwidth {
    pub fn register_code(self) -> u8 {
        match self {
            GyroBandwidth::Odr2000Unfiltered => 0x00,
            GyroBandwidth::Odr2000Hz230 => 0x01,
            GyroBandwidth::Odr1000Hz116 => 0x02,
            GyroBandwidth::Odr400Hz47 => 0x03,
            GyroBandwidth::Odr200Hz23 => 0x04,
            GyroBandwidth::Odr100Hz12 => 0x05,
            GyroBandwidth::Odr200Hz64 => 0x06,
            GyroBandwidth::Odr100Hz32 => 0x07,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_float(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn accel_table() {
        let expected = [(2.0, 0x03), (4.0, 0x05), (8.0, 0x08), (16.0, 0x0C)];
        for (index, (full_scale, code)) in expected.iter().enumerate() {
            let (selection, range) = AccelRange::select(index as i32);
            let range = range.unwrap();
            assert_eq!(selection, RangeSelection::Valid(index as u8));
            assert_eq!(range.register_code(), *code);
            assert!(compare_float(range.scale_factor() * ACCEL_HALF_SPAN, *full_scale));
        }
    }

    #[test]
    fn gyro_table() {
        let expected = [
            (125.0, 0x04),
            (250.0, 0x03),
            (500.0, 0x02),
            (1000.0, 0x01),
            (2000.0, 0x00),
        ];
        for (index, (full_scale, code)) in expected.iter().enumerate() {
            let (selection, range) = GyroRange::select(index as i32);
            let range = range.unwrap();
            assert_eq!(selection, RangeSelection::Valid(index as u8));
            assert_eq!(range.register_code(), *code);
            assert!(compare_float(range.scale_factor() * GYRO_HALF_SPAN, *full_scale));
        }
    }

    #[test]
    fn large_index_clamps_to_widest() {
        assert_eq!(
            AccelRange::select(7),
            (RangeSelection::ClampedToMax, Some(AccelRange::G16))
        );
        assert_eq!(
            GyroRange::select(200),
            (RangeSelection::ClampedToMax, Some(GyroRange::Dps2000))
        );
    }

    #[test]
    fn negative_index_is_invalid() {
        assert_eq!(AccelRange::select(-1), (RangeSelection::Invalid, None));
        assert_eq!(GyroRange::select(i32::MIN), (RangeSelection::Invalid, None));
    }

    #[test]
    fn bandwidth_codes() {
        assert_eq!(AccelBandwidth::Hz62_5.register_code(), 0x0B);
        assert_eq!(AccelBandwidth::Hz125.register_code(), 0x0C);
        assert_eq!(GyroBandwidth::Odr400Hz47.register_code(), 0x03);
    }
}
