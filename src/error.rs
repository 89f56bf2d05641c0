//! Errors that can occur when using the BMP280 device.
//!
//! This module provides an error type that encapsulates all possible errors that can occur during communication with BMP280.
//! It is generic over the underlying bus (spi/i2c) error type.

/// This represents all possible errors that can occur when using the BMP280 device.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bmp280Error<BusError> {
    /// An error has occurred in the SPI / I2C driver
    Bus(BusError),

    /// Unable to communicate with BMP280
    ///
    /// The chip-id register did not answer with 0x58. Could possibly indicate an error
    /// with pin configuration and/or wiring, or a different chip on the expected address.
    NotConnected,

    /// A pressure compensation was requested before any temperature compensation has run.
    ///
    /// The pressure formula consumes the `t_fine` intermediate produced by the
    /// temperature formula, so at least one temperature read must happen first.
    NotCalibrated,
}
