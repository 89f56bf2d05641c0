//! Register catalog for the BMP280.
//!
//! Every register (or fixed-size register block) is represented by a marker type
//! implementing [`Readable`] and/or [`Writable`]. The marker carries the register
//! address and transfer length; `decode`/`encode` translate between raw bytes and
//! typed values. Markers are consumed by [`crate::bus::Bus`] and by the typed
//! [`crate::Bmp280::read`]/[`crate::Bmp280::write`] entry points.

pub mod calibration;
pub mod chip_id;
pub mod config;
pub mod ctrl_meas;
pub mod data;
pub mod reset;
pub mod status;

pub trait Reg { const ADDR: u8; }

pub trait Readable: Reg {
    type Out;
    const N: usize = 1;
    fn decode(b: &[u8]) -> Self::Out;
}

pub trait Writable: Reg {
    type In;
    const N: usize = 1;
    fn encode(v: &Self::In, out: &mut [u8]);
}
