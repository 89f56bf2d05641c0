//! ### RESET - Soft reset register (`0xE0`, 1 byte, R/W)
//!
//! Writing the magic byte 0xB6 triggers a power-on-reset sequence; any other
//! value is ignored by the device. The register reads back as 0x00 once the
//! reset has completed.
//!
//! ### Examples
//! ```rust,no_run
//! # use crate::bmp280_rs::{Bmp280, Bmp280Result};
//! # use crate::bmp280_rs::bus::Bus;
//! # fn demo<B: Bus>(mut device: Bmp280<B>)
//! #     -> Bmp280Result<(), B::Error> {
//! use bmp280_rs::register::reset::{Reset, ResetCmd::SoftReset};
//!
//! device.write::<Reset>(&SoftReset)?;
//!
//! # Ok(()) }
//! ```
//!
//! See also: [`Bmp280::soft_reset()`]
#![doc(alias = "RESET")]
use crate::register::{Readable, Reg, Writable};

/// Marker type for the RESET (0xE0) register
pub struct Reset;
impl Reg for Reset { const ADDR: u8 = 0xE0; }

/// The payload for the RESET (0xE0) register.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResetCmd {
    /// Resets the device using the complete power-on-reset procedure.
    ///
    /// All user configuration settings are overwritten with their default state.
    SoftReset,
}

impl Into<u8> for ResetCmd {
    fn into(self) -> u8 {
        match self {
            ResetCmd::SoftReset => 0xB6,
        }
    }
}

impl Readable for Reset {
    type Out = u8;
    fn decode(b: &[u8]) -> Self::Out {
        b[0]
    }
}

impl Writable for Reset {
    type In = ResetCmd;
    fn encode(v: &Self::In, out: &mut [u8]) {
        out[0] = (*v).into();
    }
}
