use bmi055::{Bmi055, CalibrationData};
use linux_embedded_hal::{Delay, I2cdev};


fn main() {
    let i2c = I2cdev::new("/dev/i2c-1").unwrap();
    let mut imu = Bmi055::new(i2c, Delay);
    imu.init(CalibrationData::default(), 0x18).unwrap();
    loop {
        let raw = imu.read_raw().unwrap();
        println!("{:?} {:?} {}", raw.accel, raw.gyro, raw.temperature)
    }
}
