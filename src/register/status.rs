use crate::register::{Readable, Reg};

/// Marker struct for the STATUS (0xF3) register
///
/// - **Length:** 1 byte
/// - **Access:** Read-only
///
/// Used with [`Bmp280::read::<Status>()`] or the convenience method
/// [`Bmp280::status`].
pub struct Status;

impl Reg for Status { const ADDR: u8 = 0xF3; }

pub struct StatusFlags {
    measuring: bool,
    im_update: bool,
}

impl StatusFlags {
    /// Is a conversion running?
    ///
    /// Set while the device samples and filters, cleared when the results have
    /// been copied to the data registers.
    pub fn measuring(&self) -> bool { self.measuring }

    /// Is NVM data being copied to the image registers?
    ///
    /// Set right after power-on-reset and before each conversion in normal mode.
    pub fn nvm_copy_in_progress(&self) -> bool { self.im_update }
}

impl Readable for Status {
    type Out = StatusFlags;
    fn decode(b: &[u8]) -> Self::Out {
        StatusFlags {
            measuring: (b[0] & 0b0000_1000) != 0,
            im_update: (b[0] & 0b0000_0001) != 0,
        }
    }
}
