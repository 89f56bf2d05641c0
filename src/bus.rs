//! Bus abstraction over the I2C and SPI interfaces of the BMP280.
//!
//! The driver only needs one primitive: address a register, then transfer a fixed
//! number of bytes. [`Bus`] expresses that primitive in terms of the typed register
//! markers from [`crate::register`]; [`I2c`] and [`Spi`] adapt it to the blocking
//! `embedded-hal` traits.

use crate::register::{Readable, Writable};
use embedded_hal::i2c::SevenBitAddress;

/// Size of the largest register block transferred in one burst (the 24-byte calibration block).
pub const MAX_REG_BYTES: usize = 24;

pub trait Bus {
    type Error;

    /// Reads `R::N` bytes starting at `R::ADDR` and decodes them.
    ///
    /// Multi-byte reads must be a single burst transfer; the device auto-increments
    /// the register address and shadows its output registers for the duration of the
    /// burst, so a burst cannot observe a torn sample.
    fn read<R: Readable>(&mut self) -> Result<R::Out, Self::Error>;

    /// Encodes `v` and writes it to `W::ADDR`.
    ///
    /// No read-back verification is performed; the configuration registers are
    /// write-and-forget on this device.
    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Self::Error>;
}

pub struct I2c<T> {
    i2c: T,
    address: u8,
}

impl<T> I2c<T>
where
    T: embedded_hal::i2c::I2c,
{
    pub(crate) fn new(i2c: T, address: SevenBitAddress) -> Self {
        Self { i2c, address }
    }

    /// Releases the underlying I2C peripheral.
    pub fn release(self) -> T {
        self.i2c
    }
}

impl<T> Bus for I2c<T>
where
    T: embedded_hal::i2c::I2c,
{
    type Error = <T as embedded_hal::i2c::ErrorType>::Error;

    fn read<R: Readable>(&mut self) -> Result<R::Out, Self::Error> {
        let mut buf = [0u8; MAX_REG_BYTES];
        self.i2c.write_read(self.address, &[R::ADDR], &mut buf[..R::N])?;

        Ok(R::decode(&buf[..R::N]))
    }

    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Self::Error> {
        let mut buf = [0u8; MAX_REG_BYTES + 1];
        buf[0] = W::ADDR;
        W::encode(v, &mut buf[1..W::N + 1]);

        // Address byte and payload in one transaction, so a register update cannot
        // interleave with other traffic on a shared bus.
        self.i2c.write(self.address, &buf[..W::N + 1])?;

        Ok(())
    }
}

pub struct Spi<T> {
    spi: T,
}

impl<T> Spi<T>
where
    T: embedded_hal::spi::SpiDevice,
{
    pub(crate) fn new(spi: T) -> Self {
        Self { spi }
    }

    /// Releases the underlying SPI device.
    pub fn release(self) -> T {
        self.spi
    }
}

impl<T> Bus for Spi<T>
where
    T: embedded_hal::spi::SpiDevice,
{
    type Error = <T as embedded_hal::spi::ErrorType>::Error;

    fn read<R: Readable>(&mut self) -> Result<R::Out, Self::Error> {
        use embedded_hal::spi::Operation;

        // Bit 7 of the address byte is the R/W flag: 1 = read, 0 = write.
        let mut buf = [0u8; MAX_REG_BYTES];
        self.spi.transaction(&mut [
            Operation::Write(&[R::ADDR | 0x80]),
            Operation::Read(&mut buf[..R::N]),
        ])?;

        Ok(R::decode(&buf[..R::N]))
    }

    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Self::Error> {
        let mut buf = [0u8; MAX_REG_BYTES + 1];
        buf[0] = W::ADDR & 0x7F;
        W::encode(v, &mut buf[1..W::N + 1]);

        self.spi.write(&buf[..W::N + 1])?;

        Ok(())
    }
}
