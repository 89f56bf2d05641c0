use crate::bus::{Bus, MAX_REG_BYTES};
use crate::register::{Readable, Writable};
use embedded_hal::delay::DelayNs;
use heapless::LinearMap;

/// The trimming block from the datasheet compensation example, MSB-first.
pub const DATASHEET_CALIBRATION_BLOCK: [u8; 24] = [
    0x6B, 0x70, // T1 = 27504
    0x67, 0x43, // T2 = 26435
    0xFC, 0x18, // T3 = -1000
    0x8E, 0x7D, // P1 = 36477
    0xD6, 0x43, // P2 = -10685
    0x0B, 0xD0, // P3 = 3024
    0x0B, 0x27, // P4 = 2855
    0x00, 0x8C, // P5 = 140
    0xFF, 0xF9, // P6 = -7
    0x3C, 0x8C, // P7 = 15500
    0xC6, 0xF8, // P8 = -14600
    0x17, 0x70, // P9 = 6000
];

#[derive(Debug)]
enum RegisterValue {
    Data { bytes: [u8; MAX_REG_BYTES], len: usize },
    DontCare,
}

pub struct FakeBus<const N: usize> {
    regs: LinearMap<(u8, usize), RegisterValue, N>,
    writes: heapless::Vec<(u8, u8), 256>,
}

pub struct FakeDelay {}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, _: u32) {}
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            regs: LinearMap::new(),
            writes: heapless::Vec::new(),
        }
    }

    pub fn with_response<R: Readable>(&mut self, data: &[u8]) {
        let mut register_value = [0u8; MAX_REG_BYTES];
        register_value[..data.len()].copy_from_slice(data);
        self.regs
            .insert((R::ADDR, R::N), RegisterValue::Data { bytes: register_value, len: data.len() })
            .unwrap();
    }

    pub fn with_any_response<R: Readable>(&mut self) {
        self.regs
            .insert((R::ADDR, R::N), RegisterValue::DontCare)
            .unwrap();
    }

    /// Every byte written so far, as (register address, value) pairs.
    pub fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }
}

impl<const N: usize> Bus for FakeBus<N> {
    type Error = ();

    fn read<R: Readable>(&mut self) -> Result<R::Out, Self::Error> {
        if let Some(value) = self.regs.get(&(R::ADDR, R::N)) {
            match value {
                RegisterValue::Data { bytes, len } => {
                    if *len == R::N {
                        return Ok(R::decode(&bytes[..R::N]));
                    }
                }
                RegisterValue::DontCare => {
                    return Ok(R::decode(&[0u8; MAX_REG_BYTES][..R::N]));
                }
            }
        }

        panic!("No mocked value for register 0x{:x} and length {}", R::ADDR, R::N)
    }

    fn write<W: Writable>(&mut self, v: &W::In) -> Result<(), Self::Error> {
        let mut bytes = [0u8; MAX_REG_BYTES];
        W::encode(v, &mut bytes[..W::N]);

        for (i, b) in bytes[..W::N].iter().enumerate() {
            self.writes.push((W::ADDR + i as u8, *b)).unwrap();
        }

        // Reads reflect the latest write, like the image registers do.
        self.regs
            .insert((W::ADDR, W::N), RegisterValue::Data { bytes, len: W::N })
            .unwrap();

        Ok(())
    }
}
