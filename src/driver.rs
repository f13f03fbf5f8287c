//! BMI055 driver.
//!
//! Owns the I2C bus and a delay source, holds the active scale factors and
//! the caller's calibration, and refreshes a calibrated reading on demand.
//! All calls block; callers must serialize access to one instance.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c::{Write, WriteRead};
use log::{debug, info, trace, warn};

use crate::calibration::{
    Bias, BiasAccumulator, CalibrationData, CALIBRATION_ACCEL_RANGE, CALIBRATION_GYRO_RANGE,
};
use crate::config::Config;
use crate::convert::{scale_triad, temperature_celsius, Reading};
use crate::decode::{accel_counts, gyro_counts, RawSample};
use crate::registers::*;
use crate::scale::{AccelBandwidth, AccelRange, GyroBandwidth, GyroRange, RangeSelection};
use crate::Error;

pub struct Bmi055<I2C, D> {
    i2c: I2C,
    delay: D,
    config: Config,
    addresses: Addresses,
    calibration: CalibrationData,
    accel_range: AccelRange,
    accel_bandwidth: AccelBandwidth,
    gyro_range: GyroRange,
    gyro_bandwidth: GyroBandwidth,
    reading: Reading,
}

impl<I2C, D, E> Bmi055<I2C, D>
where
    I2C: Write<Error = E> + WriteRead<Error = E>,
    D: DelayMs<u16>,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_config(i2c, delay, Config::default())
    }

    pub fn with_config(i2c: I2C, delay: D, config: Config) -> Self {
        Bmi055 {
            i2c,
            delay,
            config,
            addresses: Addresses::PRIMARY,
            calibration: CalibrationData::default(),
            accel_range: config.accel_range,
            accel_bandwidth: config.accel_bandwidth,
            gyro_range: config.gyro_range,
            gyro_bandwidth: config.gyro_bandwidth,
            reading: Reading::default(),
        }
    }

    /// Resolves the sub-device addresses, checks both identities, resets the
    /// device and applies the operating configuration.
    ///
    /// Nothing touches the bus when the address selector is unknown, and no
    /// register is written when an identity check fails.
    pub fn init(&mut self, calibration: CalibrationData, address: u8) -> Result<(), Error<E>> {
        let addresses =
            Addresses::from_selector(address).ok_or(Error::InvalidAddress(address))?;
        debug!(
            "accel at {:#04x}, gyro at {:#04x}",
            addresses.accel, addresses.gyro
        );

        let accel_id = self.read_register(addresses.accel, ACCD_CHIPID)?;
        if accel_id != ACCEL_ID {
            return Err(Error::AccelIdMismatch(accel_id));
        }
        let gyro_id = self.read_register(addresses.gyro, GYR_CHIP_ID)?;
        if gyro_id != GYRO_ID {
            return Err(Error::GyroIdMismatch(gyro_id));
        }

        self.addresses = addresses;
        self.calibration = calibration.bias_or_zero();

        self.soft_reset(self.config.reset_delay_ms)?;
        self.apply(
            self.config.accel_range,
            self.config.accel_bandwidth,
            self.config.gyro_range,
            self.config.gyro_bandwidth,
        )?;
        self.accel_range = self.config.accel_range;
        self.accel_bandwidth = self.config.accel_bandwidth;
        self.gyro_range = self.config.gyro_range;
        self.gyro_bandwidth = self.config.gyro_bandwidth;
        self.delay.delay_ms(self.config.startup_delay_ms);

        Ok(())
    }

    /// Reads both sub-devices once without scaling.
    pub fn read_raw(&mut self) -> Result<RawSample, Error<E>> {
        let mut accel = [0u8; ACCEL_FRAME_LEN];
        let mut gyro = [0u8; GYRO_FRAME_LEN];
        self.read_registers(self.addresses.accel, ACCD_X_LSB, &mut accel)?;
        self.read_registers(self.addresses.gyro, GYR_RATE_X_LSB, &mut gyro)?;

        Ok(RawSample::from_frames(&accel, &gyro))
    }

    /// Refreshes the held reading.
    pub fn sample_once(&mut self) -> Result<Reading, Error<E>> {
        let raw = self.read_raw()?;
        self.reading = Reading {
            accel: scale_triad(
                raw.accel,
                self.accel_range.scale_factor(),
                self.calibration.accel_bias,
            ),
            gyro: scale_triad(
                raw.gyro,
                self.gyro_range.scale_factor(),
                self.calibration.gyro_bias,
            ),
            temperature: temperature_celsius(raw.temperature),
        };
        trace!("{:?}", self.reading);

        Ok(self.reading)
    }

    /// Acceleration in g from the last `sample_once`.
    pub fn acceleration(&self) -> [f32; 3] {
        self.reading.accel
    }

    /// Angular rate in degrees per second from the last `sample_once`.
    pub fn angular_rate(&self) -> [f32; 3] {
        self.reading.gyro
    }

    /// Temperature in °C from the last `sample_once`.
    pub fn temperature(&self) -> f32 {
        self.reading.temperature
    }

    pub fn reading(&self) -> Reading {
        self.reading
    }

    pub fn calibration(&self) -> CalibrationData {
        self.calibration
    }

    pub fn addresses(&self) -> Addresses {
        self.addresses
    }

    pub fn accel_range(&self) -> AccelRange {
        self.accel_range
    }

    pub fn gyro_range(&self) -> GyroRange {
        self.gyro_range
    }

    /// Selects an accelerometer range by index (0 = 2 g .. 3 = 16 g). Larger
    /// indices select 16 g; negative ones are rejected with nothing written.
    pub fn set_accel_range(&mut self, index: i32) -> Result<RangeSelection, Error<E>> {
        let (selection, range) = AccelRange::select(index);
        let range = range.ok_or(Error::InvalidRange(index))?;
        if selection == RangeSelection::ClampedToMax {
            warn!("accel range index {} clamped to {:?}", index, range);
        }
        self.set_accel_range_to(range)?;
        Ok(selection)
    }

    pub fn set_accel_range_to(&mut self, range: AccelRange) -> Result<(), Error<E>> {
        self.write_register(self.addresses.accel, PMU_RANGE, range.register_code())?;
        self.accel_range = range;
        Ok(())
    }

    /// Selects a gyroscope range by index (0 = 125 dps .. 4 = 2000 dps). Larger
    /// indices select 2000 dps; negative ones are rejected with nothing written.
    pub fn set_gyro_range(&mut self, index: i32) -> Result<RangeSelection, Error<E>> {
        let (selection, range) = GyroRange::select(index);
        let range = range.ok_or(Error::InvalidRange(index))?;
        if selection == RangeSelection::ClampedToMax {
            warn!("gyro range index {} clamped to {:?}", index, range);
        }
        self.set_gyro_range_to(range)?;
        Ok(selection)
    }

    pub fn set_gyro_range_to(&mut self, range: GyroRange) -> Result<(), Error<E>> {
        self.write_register(self.addresses.gyro, GYR_RANGE, range.register_code())?;
        self.gyro_range = range;
        Ok(())
    }

    pub fn set_accel_bandwidth(&mut self, bandwidth: AccelBandwidth) -> Result<(), Error<E>> {
        self.write_register(self.addresses.accel, PMU_BW, bandwidth.register_code())?;
        self.accel_bandwidth = bandwidth;
        Ok(())
    }

    pub fn set_gyro_bandwidth(&mut self, bandwidth: GyroBandwidth) -> Result<(), Error<E>> {
        self.write_register(self.addresses.gyro, GYR_BW, bandwidth.register_code())?;
        self.gyro_bandwidth = bandwidth;
        Ok(())
    }

    /// Estimates accelerometer and gyroscope bias.
    ///
    /// Resets the device into 2 g / 125 dps, averages the configured number of
    /// sample sets and removes gravity from accelerometer z. The device must be
    /// still and level, z vertical. The operating range and bandwidth are
    /// written back afterwards, also when sampling fails part way. The held
    /// calibration is left alone; pass the result to `init` (via
    /// `CalibrationData::from`) to apply it.
    pub fn calibrate(&mut self) -> Result<Bias, Error<E>> {
        let result = self.collect_bias();
        if let Err(e) = &result {
            warn!("calibration aborted, status {}", e.status_code());
        }

        let restored = self.apply(
            self.accel_range,
            self.accel_bandwidth,
            self.gyro_range,
            self.gyro_bandwidth,
        );
        let bias = result?;
        restored?;

        Ok(bias)
    }

    fn collect_bias(&mut self) -> Result<Bias, Error<E>> {
        let cal = self.config.calibration;
        debug!("calibrating with {} samples", cal.samples);

        self.soft_reset(cal.reset_delay_ms)?;
        self.apply(
            CALIBRATION_ACCEL_RANGE,
            cal.accel_bandwidth,
            CALIBRATION_GYRO_RANGE,
            cal.gyro_bandwidth,
        )?;
        self.delay.delay_ms(cal.settle_delay_ms);

        let mut accumulator = BiasAccumulator::new();
        let mut accel = [0u8; 6];
        let mut gyro = [0u8; GYRO_FRAME_LEN];
        for _ in 0..cal.samples {
            self.read_registers(self.addresses.accel, ACCD_X_LSB, &mut accel)?;
            self.read_registers(self.addresses.gyro, GYR_RATE_X_LSB, &mut gyro)?;
            accumulator.add(accel_counts(&accel), gyro_counts(&gyro));
            self.delay.delay_ms(cal.sample_delay_ms);
        }
        let bias = accumulator.finish();
        info!("accel bias {:?} g, gyro bias {:?} dps", bias.accel, bias.gyro);

        Ok(bias)
    }

    /// Returns the bus and delay source.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn soft_reset(&mut self, wait_ms: u16) -> Result<(), Error<E>> {
        self.write_register(self.addresses.accel, BGW_SOFTRESET, SOFTRESET_CMD)?;
        self.write_register(self.addresses.gyro, GYR_BGW_SOFTRESET, SOFTRESET_CMD)?;
        self.delay.delay_ms(wait_ms);
        Ok(())
    }

    /// Writes range and bandwidth for both sub-devices and enters normal mode.
    fn apply(
        &mut self,
        accel_range: AccelRange,
        accel_bandwidth: AccelBandwidth,
        gyro_range: GyroRange,
        gyro_bandwidth: GyroBandwidth,
    ) -> Result<(), Error<E>> {
        debug!(
            "configuring {:?} {:?}, {:?} {:?}",
            accel_range, accel_bandwidth, gyro_range, gyro_bandwidth
        );
        let accel = self.addresses.accel;
        self.write_register(accel, PMU_RANGE, accel_range.register_code())?;
        self.write_register(accel, PMU_BW, accel_bandwidth.register_code())?;
        self.write_register(accel, PMU_LPW, NORMAL_MODE)?;

        let gyro = self.addresses.gyro;
        self.write_register(gyro, GYR_RANGE, gyro_range.register_code())?;
        self.write_register(gyro, GYR_BW, gyro_bandwidth.register_code())?;
        self.write_register(gyro, GYR_LPM1, NORMAL_MODE)?;
        Ok(())
    }

    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, Error<E>> {
        let mut buffer = [0u8; 1];
        self.read_registers(address, register, &mut buffer)?;
        Ok(buffer[0])
    }

    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error<E>> {
        self.i2c
            .write_read(address, &[register], buffer)
            .map_err(Error::Comm)
    }

    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), Error<E>> {
        self.i2c
            .write(address, &[register, value])
            .map_err(Error::Comm)
    }
}
