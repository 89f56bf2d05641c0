use crate::register::{Readable, Reg, Writable};

/// Marker struct for the CTRL_MEAS (0xF4) register
///
/// Packs three independent configuration axes into one byte:
/// bits \[7:5\] temperature oversampling, bits \[4:2\] pressure oversampling,
/// bits \[1:0\] power mode.
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct CtrlMeas;
impl Reg for CtrlMeas { const ADDR: u8 = 0xF4; }

#[derive(Copy, Clone, Debug)]
pub struct CtrlMeasCfg {
    pub osrs_t: Oversampling,
    pub osrs_p: Oversampling,
    pub mode: PowerMode,
}

impl Readable for CtrlMeas {
    type Out = CtrlMeasCfg;
    fn decode(b: &[u8]) -> Self::Out {
        CtrlMeasCfg {
            osrs_t: Oversampling::from((b[0] >> 5) & 0b111),
            osrs_p: Oversampling::from((b[0] >> 2) & 0b111),
            mode: PowerMode::from(b[0] & 0b11),
        }
    }
}

impl Writable for CtrlMeas {
    type In = CtrlMeasCfg;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let osrs_t: u8 = v.osrs_t.into();
        let osrs_p: u8 = v.osrs_p.into();
        let mode: u8 = v.mode.into();
        out[0] = (osrs_t << 5) | (osrs_p << 2) | mode;
    }
}

/// Oversampling settings for the temperature and pressure channels.
///
/// Each measurement averages 2^n internal samples, reducing noise at the cost
/// of conversion time. See datasheet sections 3.3.1 and 3.3.2.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// No measurement is performed on this channel; its output registers keep
    /// the reset value 0x80000.
    Skipped,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl From<u8> for Oversampling {
    fn from(field: u8) -> Self {
        match field {
            0b000 => Oversampling::Skipped,
            0b001 => Oversampling::X1,
            0b010 => Oversampling::X2,
            0b011 => Oversampling::X4,
            0b100 => Oversampling::X8,
            // 0b101, 0b110 and 0b111 all select x16 per the datasheet.
            _ => Oversampling::X16,
        }
    }
}

impl Into<u8> for Oversampling {
    fn into(self) -> u8 {
        match self {
            Oversampling::Skipped => 0b000,
            Oversampling::X1 => 0b001,
            Oversampling::X2 => 0b010,
            Oversampling::X4 => 0b011,
            Oversampling::X8 => 0b100,
            Oversampling::X16 => 0b101,
        }
    }
}

impl Oversampling {
    /// The number of internal samples averaged per measurement, or [`None`]
    /// when the channel is skipped.
    pub(crate) fn factor(&self) -> Option<u32> {
        match self {
            Oversampling::Skipped => None,
            Oversampling::X1 => Some(1),
            Oversampling::X2 => Some(2),
            Oversampling::X4 => Some(4),
            Oversampling::X8 => Some(8),
            Oversampling::X16 => Some(16),
        }
    }
}

/// Describes the different power modes that can be set in the CTRL_MEAS register.
///
/// For more information, see section 3.6 in the datasheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Sleep mode. This is the default mode after power on reset.
    Sleep,
    /// Forced mode. In this mode, a single measurement is performed after which the device returns to Sleep mode.
    Forced,
    /// Normal mode. In this mode, the device cycles between measurements and the configured standby period.
    Normal,
}

impl From<u8> for PowerMode {
    fn from(field: u8) -> Self {
        match field {
            0b00 => PowerMode::Sleep,
            0b01 | 0b10 => PowerMode::Forced,
            _ => PowerMode::Normal,
        }
    }
}

impl Into<u8> for PowerMode {
    fn into(self) -> u8 {
        match self {
            PowerMode::Sleep => 0b00,
            PowerMode::Forced => 0b10,
            PowerMode::Normal => 0b11,
        }
    }
}
