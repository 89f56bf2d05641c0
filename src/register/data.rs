//! ### PRESS / TEMP - Raw measurement output (`0xF7`..`0xFC`, R)
//!
//! Six read-only registers holding the raw 20-bit pressure and temperature
//! conversion results. [`Press`] and [`Temp`] read one channel each; [`Data`]
//! reads all six bytes in one burst so pressure and temperature come from the
//! same conversion.
#![doc(alias = "PRESS")]
#![doc(alias = "TEMP")]
use crate::register::{Readable, Reg};

/// 20-bit raw value left-justified across three bytes: MSB, LSB, then the
/// upper nibble of XLSB.
fn raw20(b: &[u8]) -> u32 {
    ((b[0] as u32) << 12) | ((b[1] as u32) << 4) | ((b[2] as u32) >> 4)
}

/// Marker struct for the raw pressure output registers (0xF7..0xF9)
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
pub struct Press;
impl Reg for Press { const ADDR: u8 = 0xF7; }

impl Readable for Press {
    type Out = u32;
    const N: usize = 3;
    fn decode(b: &[u8]) -> Self::Out {
        raw20(b)
    }
}

/// Marker struct for the raw temperature output registers (0xFA..0xFC)
///
/// - **Length:** 3 bytes
/// - **Access:** Read-only
pub struct Temp;
impl Reg for Temp { const ADDR: u8 = 0xFA; }

impl Readable for Temp {
    type Out = u32;
    const N: usize = 3;
    fn decode(b: &[u8]) -> Self::Out {
        raw20(b)
    }
}

/// Marker struct for a burst read of both output channels (0xF7..0xFC)
///
/// - **Length:** 6 bytes
/// - **Access:** Read-only
pub struct Data;
impl Reg for Data { const ADDR: u8 = 0xF7; }

/// A raw pressure and temperature pair taken from the same conversion.
#[derive(Copy, Clone, Debug)]
pub struct DataSample {
    pressure: u32,
    temperature: u32,
}

impl DataSample {
    /// Raw uncompensated pressure.
    pub fn pressure(&self) -> u32 { self.pressure }

    /// Raw uncompensated temperature.
    pub fn temperature(&self) -> u32 { self.temperature }
}

impl Readable for Data {
    type Out = DataSample;
    const N: usize = 6;
    fn decode(b: &[u8]) -> Self::Out {
        DataSample {
            pressure: raw20(&b[0..3]),
            temperature: raw20(&b[3..6]),
        }
    }
}
