//! # Unit conversion
//! Scales raw counts into g and degrees per second, removes the calibration
//! bias, and decodes the accelerometer's temperature byte.

// Two-point conversion constants for the temperature byte, in °C.
const TEMP_SLOPE: f32 = -0.5;
const TEMP_HIGH: f32 = 86.5;
const TEMP_LOW: f32 = -40.5;
const TEMP_COUNTS: f32 = 128.0;
const TEMP_OFFSET: f32 = 20.0;

/// Calibrated values from a single sampling cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reading {
    /// g
    pub accel: [f32; 3],
    /// degrees per second
    pub gyro: [f32; 3],
    /// °C
    pub temperature: f32,
}

/// `count * scale - bias` for each axis.
pub fn scale_triad(counts: [i16; 3], scale: f32, bias: [f32; 3]) -> [f32; 3] {
    [
        f32::from(counts[0]) * scale - bias[0],
        f32::from(counts[1]) * scale - bias[1],
        f32::from(counts[2]) * scale - bias[2],
    ]
}

pub fn temperature_celsius(raw: i8) -> f32 {
    let t = f32::from(raw);
    -((t * TEMP_SLOPE) * (TEMP_HIGH - TEMP_LOW) / TEMP_COUNTS + TEMP_LOW) - TEMP_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_float(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn bias_is_subtracted_after_scaling() {
        let out = scale_triad([0, 1024, -1024], 2.0 / 2048.0, [0.5, 0.0, -0.25]);
        assert!(compare_float(out[0], -0.5));
        assert!(compare_float(out[1], 1.0));
        assert!(compare_float(out[2], -0.75));
    }

    #[test]
    fn zero_count_is_negated_bias_for_any_scale() {
        for scale in [16.0 / 2048.0, 2000.0 / 32768.0, 1.0].iter() {
            let out = scale_triad([0; 3], *scale, [0.5; 3]);
            assert!(out.iter().all(|v| compare_float(*v, -0.5)));
        }
    }

    #[test]
    fn temperature() {
        assert!(compare_float(temperature_celsius(0), 20.5));
        assert!(compare_float(temperature_celsius(2), 21.492_187_5));
        assert!(compare_float(temperature_celsius(-2), 19.507_812_5));
    }

    #[test]
    fn temperature_is_linear() {
        let step = temperature_celsius(1) - temperature_celsius(0);
        assert!(compare_float(step, 0.5 * 127.0 / 128.0));
        assert!(compare_float(
            temperature_celsius(100) - temperature_celsius(-100),
            200.0 * step
        ));
    }
}
