use std::env;
use std::error::Error;
use std::num::ParseIntError;
use std::thread::sleep;
use std::time::Duration;

use bmi055::{Bmi055, CalibrationData};
use linux_embedded_hal::{Delay, I2cdev};
use log::info;

const DEFAULT_BUS: &str = "/dev/i2c-1";
const DEFAULT_ADDRESS: u8 = 0x18;

/// Hex address, with or without a `0x`/`0X` prefix.
fn parse_address(value: &str) -> Result<u8, ParseIntError> {
    let value = value.trim();
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u8::from_str_radix(digits, 16)
}

fn address_from_env() -> Result<u8, Box<dyn Error>> {
    match env::var("BMI055_ADDRESS") {
        Ok(value) => Ok(parse_address(&value)?),
        Err(_) => Ok(DEFAULT_ADDRESS),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let bus = env::var("BMI055_I2C").unwrap_or_else(|_| DEFAULT_BUS.to_string());
    let address = address_from_env()?;
    let calibrate = env::args().any(|arg| arg == "calibrate");

    let i2c = I2cdev::new(&bus)?;
    let mut imu = Bmi055::new(i2c, Delay);
    imu.init(CalibrationData::default(), address)?;
    info!("BMI055 up on {} at {:#04x}", bus, address);

    if calibrate {
        // keep still and level until this returns
        let bias = imu.calibrate()?;
        println!("accel bias: {:?}", bias.accel);
        println!("gyro bias:  {:?}", bias.gyro);
        imu.init(bias.into(), address)?;
    }

    loop {
        imu.sample_once()?;
        println!(
            "{:?} {:?} {:.1}",
            imu.acceleration(),
            imu.angular_rate(),
            imu.temperature()
        );
        sleep(Duration::from_millis(50));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_prefixes() {
        assert_eq!(parse_address("0x18").unwrap(), 0x18);
        assert_eq!(parse_address("0X19").unwrap(), 0x19);
        assert_eq!(parse_address("68").unwrap(), 0x68);
        assert_eq!(parse_address(" 0x69\n").unwrap(), 0x69);
        assert!(parse_address("0xZZ").is_err());
    }
}
