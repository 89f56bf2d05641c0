use crate::register::{Readable, Reg, Writable};

/// Marker struct for the CONFIG (0xF5) register
///
/// Holds the normal-mode standby duration in bits \[7:5\], the IIR filter
/// coefficient in bits \[4:2\] and the 3-wire SPI enable in bit 0. Bit 1 is
/// reserved and always written as zero.
///
/// - **Length:** 1 byte
/// - **Access:** Read/Write
pub struct Config;
impl Reg for Config { const ADDR: u8 = 0xF5; }

#[derive(Copy, Clone, Debug)]
pub struct ConfigFields {
    pub standby: StandbyTime,
    pub filter: Filter,
    pub spi3w_en: bool,
}

impl Readable for Config {
    type Out = ConfigFields;
    fn decode(b: &[u8]) -> Self::Out {
        ConfigFields {
            standby: StandbyTime::from((b[0] >> 5) & 0b111),
            filter: Filter::from((b[0] >> 2) & 0b111),
            spi3w_en: (b[0] & 0b1) != 0,
        }
    }
}

impl Writable for Config {
    type In = ConfigFields;

    fn encode(v: &Self::In, out: &mut [u8]) {
        let standby: u8 = v.standby.into();
        let filter: u8 = v.filter.into();
        out[0] = (standby << 5) | (filter << 2) | v.spi3w_en as u8;
    }
}

/// IIR filter coefficients.
///
/// The filter smooths the pressure and temperature outputs against short-term
/// disturbances such as a slamming door. See section 3.3.3 in the datasheet.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Filter {
    /// Filter bypassed. Each measurement reaches the data registers unfiltered.
    Off,
    X2,
    X4,
    X8,
    X16,
}

impl From<u8> for Filter {
    fn from(field: u8) -> Self {
        match field {
            0b000 => Filter::Off,
            0b001 => Filter::X2,
            0b010 => Filter::X4,
            0b011 => Filter::X8,
            _ => Filter::X16,
        }
    }
}

impl Into<u8> for Filter {
    fn into(self) -> u8 {
        match self {
            Filter::Off => 0b000,
            Filter::X2 => 0b001,
            Filter::X4 => 0b010,
            Filter::X8 => 0b011,
            Filter::X16 => 0b100,
        }
    }
}

/// Standby durations between measurements in normal mode.
///
/// See table 11 in the datasheet.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StandbyTime {
    /// 0.5ms
    Ms0p5,
    /// 62.5ms
    Ms62p5,
    /// 125ms
    Ms125,
    /// 250ms
    Ms250,
    /// 500ms
    Ms500,
    /// 1000ms
    Ms1000,
    /// 2000ms
    Ms2000,
    /// 4000ms
    Ms4000,
}

impl From<u8> for StandbyTime {
    fn from(field: u8) -> Self {
        match field {
            0b000 => StandbyTime::Ms0p5,
            0b001 => StandbyTime::Ms62p5,
            0b010 => StandbyTime::Ms125,
            0b011 => StandbyTime::Ms250,
            0b100 => StandbyTime::Ms500,
            0b101 => StandbyTime::Ms1000,
            0b110 => StandbyTime::Ms2000,
            _ => StandbyTime::Ms4000,
        }
    }
}

impl Into<u8> for StandbyTime {
    fn into(self) -> u8 {
        match self {
            StandbyTime::Ms0p5 => 0b000,
            StandbyTime::Ms62p5 => 0b001,
            StandbyTime::Ms125 => 0b010,
            StandbyTime::Ms250 => 0b011,
            StandbyTime::Ms500 => 0b100,
            StandbyTime::Ms1000 => 0b101,
            StandbyTime::Ms2000 => 0b110,
            StandbyTime::Ms4000 => 0b111,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_decode() {
        let reg = Config::decode(&[0b0000_0000]);
        assert_eq!(StandbyTime::Ms0p5, reg.standby);
        assert_eq!(Filter::Off, reg.filter);
        assert!(!reg.spi3w_en);

        let reg = Config::decode(&[0b0010_1101]);
        assert_eq!(StandbyTime::Ms62p5, reg.standby);
        assert_eq!(Filter::X8, reg.filter);
        assert!(reg.spi3w_en);

        let reg = Config::decode(&[0b1111_0000]);
        assert_eq!(StandbyTime::Ms4000, reg.standby);
        assert_eq!(Filter::X16, reg.filter);
        assert!(!reg.spi3w_en);
    }

    #[test]
    fn config_decode_reserved_filter_is_x16() {
        let reg = Config::decode(&[0b0001_0100]);
        assert_eq!(Filter::X16, reg.filter);

        let reg = Config::decode(&[0b0001_1100]);
        assert_eq!(Filter::X16, reg.filter);
    }

    #[test]
    fn config_encode() {
        let mut buffer = [0u8; 1];
        Config::encode(&ConfigFields {
            standby: StandbyTime::Ms0p5,
            filter: Filter::X16,
            spi3w_en: false,
        }, &mut buffer);
        assert_eq!([0b0001_0000], buffer);

        Config::encode(&ConfigFields {
            standby: StandbyTime::Ms4000,
            filter: Filter::Off,
            spi3w_en: true,
        }, &mut buffer);
        assert_eq!([0b1110_0001], buffer);
    }
}
