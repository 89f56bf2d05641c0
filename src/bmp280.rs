use crate::bus::{Bus, I2c, Spi};
use crate::calibration::CalibrationData;
use crate::config::Configuration;
use crate::error::Bmp280Error;
use crate::register::config::{Config, ConfigFields, Filter, StandbyTime};
use crate::register::ctrl_meas::{CtrlMeas, CtrlMeasCfg, Oversampling, PowerMode};
use crate::register::{chip_id, data, reset, status, Readable, Writable};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::SevenBitAddress;

/// Type alias for a Bmp280 chip communicating over I2C
type Bmp280I2c<T> = Bmp280<I2c<T>>;

/// Type alias for a Bmp280 chip communicating over SPI
type Bmp280Spi<T> = Bmp280<Spi<T>>;

const BMP280_CHIP_ID: u8 = 0x58;

/// Main Bmp280 driver struct
pub struct Bmp280<B> {
    bus: B,
    calibration_data: CalibrationData,
}

/// Type alias used to simplify return types throughout the driver
pub type Bmp280Result<T, BusError> = Result<T, Bmp280Error<BusError>>;

impl<T> Bmp280I2c<T>
where
    T: embedded_hal::i2c::I2c,
{
    /// Constructs a new Bmp280 driver instance with a given configuration that communicates over I2C
    ///
    /// This function will:
    /// - Probe for a connected BMP280 device.
    /// - Perform a soft reset if `reset` == [`ResetPolicy::Soft`]
    /// - Load calibration coefficients from NVM
    /// - Apply the given configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::i2c::I2c;
    /// # use bmp280_rs::Bmp280Result;
    ///  use bmp280_rs::{Bmp280, SdoPinState, ResetPolicy};
    ///  use bmp280_rs::config::Configuration;
    /// # fn demo<I: I2c, D: DelayNs>(i2c: I, mut delay: D) -> Bmp280Result<(), I::Error> {
    ///
    ///  let device = Bmp280::new_i2c(
    ///     i2c,
    ///     SdoPinState::Low,
    ///     Configuration::default(),
    ///     ResetPolicy::Soft,
    ///     &mut delay
    ///  )?;
    /// # Ok(())
    /// # }
    pub fn new_i2c<D: DelayNs>(
        i2c: T,
        sdo_pin_state: SdoPinState,
        config: Configuration,
        reset: ResetPolicy,
        delay: &mut D,
    ) -> Bmp280Result<Self, <I2c<T> as Bus>::Error> {
        Self::new(I2c::new(i2c, sdo_pin_state.into()), config, reset, delay)
    }
}

impl<T> Bmp280Spi<T>
where
    T: embedded_hal::spi::SpiDevice,
{
    /// Constructs a new Bmp280 driver instance with a given configuration that communicates over SPI
    ///
    /// This function will:
    /// - Probe for a connected BMP280 device.
    /// - Perform a soft reset if `reset` == [`ResetPolicy::Soft`]
    /// - Load calibration coefficients from NVM
    /// - Apply the given configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use embedded_hal::delay::DelayNs;
    /// # use embedded_hal::spi::SpiDevice;
    /// # use bmp280_rs::Bmp280Result;
    ///  use bmp280_rs::{Bmp280, ResetPolicy};
    ///  use bmp280_rs::config::Configuration;
    /// # fn demo<S: SpiDevice, D: DelayNs>(spi: S, mut delay: D) -> Bmp280Result<(), S::Error> {
    ///
    ///  let device = Bmp280::new_spi(
    ///     spi,
    ///     Configuration::default(),
    ///     ResetPolicy::Soft,
    ///     &mut delay
    ///  )?;
    /// # Ok(())
    /// # }
    pub fn new_spi<D: DelayNs>(
        spi: T,
        config: Configuration,
        reset: ResetPolicy,
        delay: &mut D,
    ) -> Bmp280Result<Self, <Spi<T> as Bus>::Error> {
        Self::new(Spi::new(spi), config, reset, delay)
    }
}

impl<B> Bmp280<B>
where
    B: Bus,
{
    /// Probes if the device is ready by attempting to read ChipId [`attempts`] times with a 1 ms delay.
    ///
    /// Returns [`Bmp280Error::NotConnected`] if no response is received.
    fn probe_ready<D: DelayNs>(
        bus: &mut B,
        delay: &mut D,
        attempts: u32,
    ) -> Bmp280Result<(), B::Error> {
        for _ in 0..attempts {
            if let Ok(id) = bus.read::<chip_id::ChipId>() {
                if id == BMP280_CHIP_ID {
                    return Ok(());
                }
            }

            delay.delay_ms(1);
        }

        Err(Bmp280Error::NotConnected)
    }

    /// Creates a new instance of the Bmp280 driver struct with the given configuration.
    pub(crate) fn new<D: DelayNs>(
        mut bus: B,
        config: Configuration,
        reset: ResetPolicy,
        delay: &mut D,
    ) -> Bmp280Result<Self, B::Error> {
        // The datasheet (section 1, table 2) specifies 2ms start-up time after power-on.
        Self::probe_ready(&mut bus, delay, 5)?;

        if reset == ResetPolicy::Soft {
            bus.write::<reset::Reset>(&reset::ResetCmd::SoftReset)
                .map_err(Bmp280Error::Bus)?;
            delay.delay_ms(2);
        }

        let calibration_data = CalibrationData::new(&mut bus).map_err(Bmp280Error::Bus)?;

        let mut device = Bmp280 {
            bus,
            calibration_data,
        };

        device.apply_configuration(&config)?;

        Ok(device)
    }

    /// Applies the given configuration by writing to the corresponding registers.
    ///
    /// CONFIG is written before CTRL_MEAS; writes to CONFIG may be ignored once
    /// the device is measuring in normal mode.
    pub fn apply_configuration(&mut self, config: &Configuration) -> Bmp280Result<(), B::Error> {
        self.write::<Config>(&ConfigFields {
            standby: config.standby_time,
            filter: config.iir_filter,
            spi3w_en: false,
        })?;

        self.write::<CtrlMeas>(&CtrlMeasCfg {
            osrs_t: config.temperature_oversampling,
            osrs_p: config.pressure_oversampling,
            mode: config.mode,
        })?;

        Ok(())
    }

    /// Read a register (or fixed-size register block) using a **typed marker**.
    ///
    /// This is the low-level, register-accurate entry point. You pass a marker type
    /// from [`crate::register`] (e.g. `register::ctrl_meas::CtrlMeas`), and you get back its
    /// decoded value (`R::Out`).
    ///
    /// - The bus transfer length and address come from `R::N` and `R::ADDR`.
    /// - Multi-byte registers are always read in a single burst.
    ///
    /// For most users, the convenience methods (e.g. [`status`](Self::status))
    /// are easier to discover and have concrete return types. This generic is here
    /// when you want full control.
    ///
    /// # Examples
    /// Read ID (0xD0):
    /// ```rust,no_run
    /// # use bmp280_rs::{register, Bmp280, Bmp280Result};
    /// # use bmp280_rs::bus::Bus;
    /// # fn demo<B: Bus>(mut device: Bmp280<B>) -> Bmp280Result<(), B::Error> {
    /// let id: u8 = device.read::<register::chip_id::ChipId>()?;
    /// assert_eq!(id, 0x58);
    /// # Ok(()) }
    /// ```
    pub fn read<R: Readable>(&mut self) -> Bmp280Result<R::Out, B::Error> {
        self.bus.read::<R>().map_err(Bmp280Error::Bus)
    }

    /// Write a register using a **typed marker**.
    ///
    /// You pass a marker type from [`crate::register`] (e.g. `register::ctrl_meas::CtrlMeas`) and
    /// a value of its input type (`W::In`). The value is encoded by `W::encode(...)`
    /// and written to `W::ADDR`.
    ///
    /// This performs a **direct write** of the provided fields. If you need to
    /// preserve unrelated fields, prefer a read-modify-write:
    /// read the struct, change the fields you care about, then write it back.
    ///
    /// For most users, the convenience methods (e.g. [`set_mode`](Self::set_mode))
    /// are easier to discover and have concrete argument types. This generic is here
    /// when you want full control.
    pub fn write<W: Writable>(&mut self, v: &W::In) -> Bmp280Result<(), B::Error> {
        self.bus.write::<W>(v).map_err(Bmp280Error::Bus)
    }

    /// Reads the chip identification code from the ID (0xD0) register.
    ///
    /// Always 0x58 on this device.
    pub fn chip_id(&mut self) -> Bmp280Result<u8, B::Error> {
        self.read::<chip_id::ChipId>()
    }

    /// Determines if a BMP280 device is connected by reading the ID (0xD0) register.
    pub fn is_connected(&mut self) -> Bmp280Result<bool, B::Error> {
        let id = self.read::<chip_id::ChipId>()?;

        Ok(id == BMP280_CHIP_ID)
    }

    /// Triggers a soft reset by writing the magic byte to the RESET (0xE0) register.
    ///
    /// All user settings are reset to their default state. The method waits 2 ms for
    /// the start-up sequence to complete before returning.
    ///
    /// **Note:** This resets the chip to factory defaults, not to the configuration
    /// that was provided when constructing the driver.
    pub fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Bmp280Result<(), B::Error> {
        self.write::<reset::Reset>(&reset::ResetCmd::SoftReset)?;
        delay.delay_ms(2);

        Ok(())
    }

    /// Returns the status flags from the STATUS (0xF3) register.
    pub fn status(&mut self) -> Bmp280Result<status::StatusFlags, B::Error> {
        self.read::<status::Status>()
    }

    /// Reads the current power mode from the CTRL_MEAS (0xF4) register.
    pub fn mode(&mut self) -> Bmp280Result<PowerMode, B::Error> {
        Ok(self.read::<CtrlMeas>()?.mode)
    }

    /// Sets the power mode of the device, leaving the oversampling settings untouched.
    ///
    /// # Examples
    ///
    /// ```rust, no_run
    /// # use bmp280_rs::{Bmp280, Bmp280Result};
    /// # use bmp280_rs::bus::Bus;
    ///
    /// # fn demo<B: Bus>(mut device: Bmp280<B>) -> Bmp280Result<(), B::Error> {
    /// use bmp280_rs::register::ctrl_meas::PowerMode;
    ///
    /// device.set_mode(PowerMode::Normal)?;
    /// # Ok(()) }
    pub fn set_mode(&mut self, mode: PowerMode) -> Bmp280Result<(), B::Error> {
        let mut ctrl_meas = self.read::<CtrlMeas>()?;
        ctrl_meas.mode = mode;
        self.write::<CtrlMeas>(&ctrl_meas)?;

        Ok(())
    }

    /// Reads the (temperature, pressure) oversampling settings from the CTRL_MEAS (0xF4) register.
    pub fn oversampling(&mut self) -> Bmp280Result<(Oversampling, Oversampling), B::Error> {
        let ctrl_meas = self.read::<CtrlMeas>()?;

        Ok((ctrl_meas.osrs_t, ctrl_meas.osrs_p))
    }

    /// Sets the oversampling for both channels, leaving the power mode untouched.
    pub fn set_oversampling(
        &mut self,
        osrs_t: Oversampling,
        osrs_p: Oversampling,
    ) -> Bmp280Result<(), B::Error> {
        let mut ctrl_meas = self.read::<CtrlMeas>()?;
        ctrl_meas.osrs_t = osrs_t;
        ctrl_meas.osrs_p = osrs_p;
        self.write::<CtrlMeas>(&ctrl_meas)?;

        Ok(())
    }

    /// Reads the IIR filter coefficient from the CONFIG (0xF5) register.
    pub fn filter(&mut self) -> Bmp280Result<Filter, B::Error> {
        Ok(self.read::<Config>()?.filter)
    }

    /// Sets the IIR filter coefficient, leaving the other CONFIG fields untouched.
    pub fn set_filter(&mut self, filter: Filter) -> Bmp280Result<(), B::Error> {
        let mut config = self.read::<Config>()?;
        config.filter = filter;
        self.write::<Config>(&config)?;

        Ok(())
    }

    /// Reads the normal mode standby duration from the CONFIG (0xF5) register.
    pub fn standby_time(&mut self) -> Bmp280Result<StandbyTime, B::Error> {
        Ok(self.read::<Config>()?.standby)
    }

    /// Sets the normal mode standby duration, leaving the other CONFIG fields untouched.
    pub fn set_standby_time(&mut self, standby: StandbyTime) -> Bmp280Result<(), B::Error> {
        let mut config = self.read::<Config>()?;
        config.standby = standby;
        self.write::<Config>(&config)?;

        Ok(())
    }

    /// Reads the raw uncompensated temperature from the TEMP (0xFA..0xFC) registers.
    pub fn read_raw_temperature(&mut self) -> Bmp280Result<u32, B::Error> {
        self.read::<data::Temp>()
    }

    /// Reads the raw uncompensated pressure from the PRESS (0xF7..0xF9) registers.
    pub fn read_raw_pressure(&mut self) -> Bmp280Result<u32, B::Error> {
        self.read::<data::Press>()
    }

    /// Reads the latest temperature measurement in degrees Celsius.
    ///
    /// This also refreshes the fine-resolution temperature used to compensate
    /// pressure readings.
    pub fn read_temperature(&mut self) -> Bmp280Result<f32, B::Error> {
        let raw = self.read::<data::Temp>()?;

        Ok(self.calibration_data.compensate_temperature(raw))
    }

    /// Reads the latest pressure measurement in Pascal.
    ///
    /// Pressure compensation is anchored on the most recent temperature reading.
    /// Returns [`Bmp280Error::NotCalibrated`] if no temperature has been read
    /// since start-up; call [`read_temperature`](Self::read_temperature) or
    /// [`read_sensor_data`](Self::read_sensor_data) first.
    pub fn read_pressure(&mut self) -> Bmp280Result<f32, B::Error> {
        let raw = self.read::<data::Press>()?;

        self.calibration_data
            .compensate_pressure(raw)
            .ok_or(Bmp280Error::NotCalibrated)
    }

    /// Reads the latest **compensated** pressure and temperature measurement stored in the Data (0xF7 - 0xFC) registers.
    ///
    /// Both channels are read in one burst, so the returned pair comes from the
    /// same conversion. Temperature is compensated first so the pressure formula
    /// sees a fine-resolution temperature from this very sample.
    ///
    /// # Examples
    ///
    /// ```rust, no_run
    /// # use bmp280_rs::{Bmp280, Bmp280Result};
    /// # use bmp280_rs::bus::Bus;
    ///
    /// # fn demo<B: Bus>(mut device: Bmp280<B>) -> Bmp280Result<(), B::Error> {
    /// let data = device.read_sensor_data()?;
    /// // data.pressure is in Pascal, data.temperature in degrees Celsius.
    /// # Ok(()) }
    pub fn read_sensor_data(&mut self) -> Bmp280Result<Measurement, B::Error> {
        let sample = self.read::<data::Data>()?;

        let compensated_temperature = self
            .calibration_data
            .compensate_temperature(sample.temperature());
        let compensated_pressure = self
            .calibration_data
            .compensate_pressure(sample.pressure())
            .ok_or(Bmp280Error::NotCalibrated)?;

        Ok(Measurement {
            pressure: compensated_pressure,
            temperature: compensated_temperature,
        })
    }

    /// Triggers a single forced mode conversion and returns the compensated result.
    ///
    /// The device performs one measurement with the current oversampling settings
    /// and returns to sleep. This method waits out the worst case conversion time
    /// before reading the data registers, so it does not need the interrupt-free
    /// polling of [`status`](Self::status).
    pub fn measure<D: DelayNs>(&mut self, delay: &mut D) -> Bmp280Result<Measurement, B::Error> {
        let mut ctrl_meas = self.read::<CtrlMeas>()?;
        ctrl_meas.mode = PowerMode::Forced;
        self.write::<CtrlMeas>(&ctrl_meas)?;

        delay.delay_us(max_measurement_time_us(
            ctrl_meas.osrs_t,
            ctrl_meas.osrs_p,
        ));

        self.read_sensor_data()
    }

    /// Consumes the driver and returns the underlying bus.
    pub fn release(self) -> B {
        self.bus
    }
}

/// Calculates the maximum measurement time in microseconds for the given
/// oversampling settings.
///
/// See section 3.8.1, table 13 of the datasheet for the equation. A skipped
/// channel contributes nothing to the conversion time.
pub fn max_measurement_time_us(osrs_t: Oversampling, osrs_p: Oversampling) -> u32 {
    let mut time = 1250;

    if let Some(factor) = osrs_t.factor() {
        time += 2300 * factor;
    }

    if let Some(factor) = osrs_p.factor() {
        time += 2300 * factor + 575;
    }

    time
}

/// This enum should reflect the physical state of the SDO pin. This is used to determine the I2C address
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SdoPinState {
    /// SDO is pulled high by connection to VDDIO
    High,
    /// SDO is pulled low by connection to GND
    Low,
}

impl Into<SevenBitAddress> for SdoPinState {
    fn into(self) -> SevenBitAddress {
        match self {
            SdoPinState::High => 0x77,
            SdoPinState::Low => 0x76,
        }
    }
}

/// Holds compensated pressure and temperature samples.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Pressure in Pascal.
    pub pressure: f32,
    /// Temperature in degrees Celsius.
    pub temperature: f32,
}

/// What to do at startup before applying [`Configuration`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Write RESET=0xB6 and wait out the start-up time (recommended default).
    Soft,
    /// Don't reset; leave the chip as-is (faster resume, preserves IIR history).
    None,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use crate::register::calibration::Calibration;
    use crate::register::chip_id::ChipId;
    use crate::register::data::{Data, Press, Temp};
    use crate::register::status::Status;
    use crate::testing::{FakeBus, FakeDelay, DATASHEET_CALIBRATION_BLOCK};

    fn connected_bus() -> FakeBus<10> {
        let mut bus: FakeBus<10> = FakeBus::new();
        bus.with_response::<ChipId>(&[0x58]);
        bus.with_response::<Calibration>(&DATASHEET_CALIBRATION_BLOCK);

        bus
    }

    #[test]
    fn bmp280_wrong_chip_id_is_not_connected() {
        let mut bus: FakeBus<10> = FakeBus::new();
        bus.with_response::<ChipId>(&[0x60]);

        let result = Bmp280::new(
            bus,
            Configuration::default(),
            ResetPolicy::None,
            &mut FakeDelay {},
        );
        assert!(matches!(result, Err(Bmp280Error::NotConnected)));
    }

    #[test]
    fn bmp280_chip_id_and_status() {
        let mut bus = connected_bus();
        bus.with_any_response::<Status>();

        let mut device = Bmp280::new(
            bus,
            Configuration::default(),
            ResetPolicy::None,
            &mut FakeDelay {},
        )
        .unwrap();

        assert_eq!(0x58, device.chip_id().unwrap());
        assert!(device.is_connected().unwrap());

        let status = device.status().unwrap();
        assert!(!status.measuring());
        assert!(!status.nvm_copy_in_progress());
    }

    #[test]
    fn bmp280_read_sensor_data() {
        let mut bus = connected_bus();
        bus.with_response::<Data>(&[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00]);

        let mut device = Bmp280::new(
            bus,
            Configuration::default(),
            ResetPolicy::None,
            &mut FakeDelay {},
        )
        .unwrap();

        let measurement = device.read_sensor_data().unwrap();
        assert!((measurement.temperature - 25.08).abs() < 0.01);
        assert!((measurement.pressure - 100653.27).abs() < 1.0);
    }

    #[test]
    fn bmp280_pressure_requires_temperature_first() {
        let mut bus = connected_bus();
        bus.with_response::<Press>(&[0x65, 0x5A, 0xC0]);
        bus.with_response::<Temp>(&[0x7E, 0xED, 0x00]);

        let mut device = Bmp280::new(
            bus,
            Configuration::default(),
            ResetPolicy::None,
            &mut FakeDelay {},
        )
        .unwrap();

        assert!(matches!(
            device.read_pressure(),
            Err(Bmp280Error::NotCalibrated)
        ));

        device.read_temperature().unwrap();
        let pressure = device.read_pressure().unwrap();
        assert!((pressure - 100653.27).abs() < 1.0);

        // Disabling the temperature channel afterwards does not invalidate the
        // fine-resolution temperature from the earlier read.
        device
            .set_oversampling(Oversampling::Skipped, Oversampling::X1)
            .unwrap();
        let pressure = device.read_pressure().unwrap();
        assert!((pressure - 100653.27).abs() < 1.0);
    }

    #[test]
    fn bmp280_configuration_writes() {
        let bus = connected_bus();

        let device = Bmp280::new(
            bus,
            Configuration::default(),
            ResetPolicy::None,
            &mut FakeDelay {},
        )
        .unwrap();

        // CONFIG: standby 0.5ms, filter x16. CTRL_MEAS: osrs_t x2, osrs_p x16, normal.
        assert_eq!(
            &[(0xF5, 0b0001_0000), (0xF4, 0b0101_0111)],
            device.release().writes()
        );
    }

    #[test]
    fn bmp280_soft_reset_policy_writes_magic_byte() {
        let bus = connected_bus();

        let device = Bmp280::new(
            bus,
            Configuration::default(),
            ResetPolicy::Soft,
            &mut FakeDelay {},
        )
        .unwrap();

        assert_eq!(Some(&(0xE0, 0xB6)), device.release().writes().first());
    }

    #[test]
    fn bmp280_mode_and_oversampling_are_independent() {
        let modes = [PowerMode::Sleep, PowerMode::Forced, PowerMode::Normal];
        let oversamplings = [
            Oversampling::Skipped,
            Oversampling::X1,
            Oversampling::X2,
            Oversampling::X4,
            Oversampling::X8,
            Oversampling::X16,
        ];

        let mut device = Bmp280::new(
            connected_bus(),
            Configuration::default(),
            ResetPolicy::None,
            &mut FakeDelay {},
        )
        .unwrap();

        for mode in modes {
            for osrs_t in oversamplings {
                for osrs_p in oversamplings {
                    device.set_mode(mode).unwrap();
                    device.set_oversampling(osrs_t, osrs_p).unwrap();

                    assert_eq!(mode, device.mode().unwrap());
                    assert_eq!((osrs_t, osrs_p), device.oversampling().unwrap());
                }
            }
        }
    }

    #[test]
    fn bmp280_filter_and_standby_are_independent() {
        let mut device = Bmp280::new(
            connected_bus(),
            Configuration::default(),
            ResetPolicy::None,
            &mut FakeDelay {},
        )
        .unwrap();

        device.set_filter(Filter::X4).unwrap();
        assert_eq!(StandbyTime::Ms0p5, device.standby_time().unwrap());

        device.set_standby_time(StandbyTime::Ms1000).unwrap();
        assert_eq!(Filter::X4, device.filter().unwrap());
        assert_eq!(StandbyTime::Ms1000, device.standby_time().unwrap());
    }

    #[test]
    fn bmp280_forced_measurement() {
        let mut bus = connected_bus();
        bus.with_response::<Data>(&[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00]);

        let mut device = Bmp280::new(
            bus,
            Configuration::from_preset(Preset::WeatherMonitoring),
            ResetPolicy::None,
            &mut FakeDelay {},
        )
        .unwrap();

        let measurement = device.measure(&mut FakeDelay {}).unwrap();
        assert!((measurement.temperature - 25.08).abs() < 0.01);

        // The conversion was kicked off by a forced mode write.
        let device_writes = device.release();
        assert!(device_writes
            .writes()
            .iter()
            .any(|w| *w == (0xF4, 0b0010_0110)));
    }

    #[test]
    fn max_measurement_time() {
        // Ultra low power: t x1, p x1 -> 6.4ms.
        assert_eq!(
            6425,
            max_measurement_time_us(Oversampling::X1, Oversampling::X1)
        );

        // Ultra high resolution: t x2, p x16 -> 43.2ms.
        assert_eq!(
            43_225,
            max_measurement_time_us(Oversampling::X2, Oversampling::X16)
        );

        // Skipped channels contribute nothing.
        assert_eq!(
            1250,
            max_measurement_time_us(Oversampling::Skipped, Oversampling::Skipped)
        );
    }
}
