#![no_std]

//! Platform agnostic, blocking driver for the Bosch BMP280 pressure/temperature sensor.
//!
//! The driver speaks to the device over I2C or SPI through the [`bus::Bus`]
//! abstraction, decodes the factory calibration block once at construction and
//! converts the raw 20-bit ADC codes into degrees Celsius and pascals using the
//! vendor compensation formulas.
//!
//! # Examples
//! ```rust,no_run
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::i2c::I2c;
//! # use bmp280_rs::Bmp280Result;
//!  use bmp280_rs::{Bmp280, SdoPinState, ResetPolicy};
//!  use bmp280_rs::config::Configuration;
//! # fn demo<I: I2c, D: DelayNs>(i2c: I, mut delay: D) -> Bmp280Result<(), I::Error> {
//!
//!  let mut device = Bmp280::new_i2c(
//!     i2c,
//!     SdoPinState::Low,
//!     Configuration::default(),
//!     ResetPolicy::Soft,
//!     &mut delay
//!  )?;
//!
//!  let measurement = device.read_sensor_data()?;
//!  println!("{} Pa at {} degrees C", measurement.pressure, measurement.temperature);
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod bus;
pub mod config;
pub mod error;
pub mod register;

mod bmp280;
mod calibration;

#[cfg(test)]
pub(crate) mod testing;

pub use bmp280::{
    max_measurement_time_us, Bmp280, Bmp280Result, Measurement, ResetPolicy, SdoPinState,
};
pub use error::Bmp280Error;
