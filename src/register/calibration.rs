use crate::register::{Readable, Reg};

/// Marker struct for the factory calibration block (0x88..0x9F)
///
/// Twelve 16-bit trimming words programmed into NVM during production. The
/// block is read once at start-up and fed to the compensation routines.
///
/// - **Length:** 24 bytes
/// - **Access:** Read-only
pub struct Calibration;
impl Reg for Calibration { const ADDR: u8 = 0x88; }

/// The decoded trimming words, in register address order.
#[derive(Copy, Clone, Debug)]
pub struct CalibrationWords {
    pub(crate) dig_t1: u16,
    pub(crate) dig_t2: i16,
    pub(crate) dig_t3: i16,
    pub(crate) dig_p1: u16,
    pub(crate) dig_p2: i16,
    pub(crate) dig_p3: i16,
    pub(crate) dig_p4: i16,
    pub(crate) dig_p5: i16,
    pub(crate) dig_p6: i16,
    pub(crate) dig_p7: i16,
    pub(crate) dig_p8: i16,
    pub(crate) dig_p9: i16,
}

impl Readable for Calibration {
    type Out = CalibrationWords;
    const N: usize = 24;

    // Each word is two consecutive registers combined MSB-first, like every
    // other 16-bit quantity on this device.
    fn decode(b: &[u8]) -> Self::Out {
        CalibrationWords {
            dig_t1: u16::from_be_bytes([b[0], b[1]]),
            dig_t2: i16::from_be_bytes([b[2], b[3]]),
            dig_t3: i16::from_be_bytes([b[4], b[5]]),
            dig_p1: u16::from_be_bytes([b[6], b[7]]),
            dig_p2: i16::from_be_bytes([b[8], b[9]]),
            dig_p3: i16::from_be_bytes([b[10], b[11]]),
            dig_p4: i16::from_be_bytes([b[12], b[13]]),
            dig_p5: i16::from_be_bytes([b[14], b[15]]),
            dig_p6: i16::from_be_bytes([b[16], b[17]]),
            dig_p7: i16::from_be_bytes([b[18], b[19]]),
            dig_p8: i16::from_be_bytes([b[20], b[21]]),
            dig_p9: i16::from_be_bytes([b[22], b[23]]),
        }
    }
}
