use crate::register::config::{Filter, StandbyTime};
use crate::register::ctrl_meas::{Oversampling, PowerMode};

pub struct Configuration {
    pub(crate) mode: PowerMode,
    pub(crate) standby_time: StandbyTime,
    pub(crate) pressure_oversampling: Oversampling,
    pub(crate) temperature_oversampling: Oversampling,
    pub(crate) iir_filter: Filter,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            mode: PowerMode::Normal,
            standby_time: StandbyTime::Ms0p5,
            iir_filter: Filter::X16,
            pressure_oversampling: Oversampling::X16,
            temperature_oversampling: Oversampling::X2,
        }
    }
}

impl Configuration {
    pub fn power_mode(mut self, power_mode: PowerMode) -> Self {
        self.mode = power_mode;

        self
    }

    pub fn standby_time(mut self, standby_time: StandbyTime) -> Self {
        self.standby_time = standby_time;

        self
    }

    pub fn iir_filter(mut self, filter: Filter) -> Self {
        self.iir_filter = filter;

        self
    }

    pub fn pressure_oversampling(mut self, pressure_oversampling: Oversampling) -> Self {
        self.pressure_oversampling = pressure_oversampling;

        self
    }

    /// Sets the temperature oversampling.
    /// Temperature is needed to compensate pressure readings, and since this driver
    /// caches the latest temperature reading, it should not normally be skipped.
    pub fn temperature_oversampling(mut self, temperature_oversampling: Oversampling) -> Self {
        self.temperature_oversampling = temperature_oversampling;

        self
    }

    /// Use-case settings from table 7 in the datasheet.
    pub fn from_preset(p: Preset) -> Self {
        match p {
            Preset::HandheldLowPower => Configuration::default()
                .iir_filter(Filter::X4)
                .standby_time(StandbyTime::Ms62p5),
            Preset::HandheldDynamic => Configuration::default()
                .pressure_oversampling(Oversampling::X4)
                .temperature_oversampling(Oversampling::X1),
            Preset::WeatherMonitoring => Configuration::default()
                .power_mode(PowerMode::Forced)
                .pressure_oversampling(Oversampling::X1)
                .temperature_oversampling(Oversampling::X1)
                .iir_filter(Filter::Off)
                .standby_time(StandbyTime::Ms4000),
            Preset::ElevatorFloorChange => Configuration::default()
                .pressure_oversampling(Oversampling::X4)
                .temperature_oversampling(Oversampling::X1)
                .iir_filter(Filter::X4)
                .standby_time(StandbyTime::Ms125),
            Preset::DropDetection => Configuration::default()
                .pressure_oversampling(Oversampling::X2)
                .temperature_oversampling(Oversampling::X1)
                .iir_filter(Filter::Off),
            Preset::IndoorNavigation => Configuration::default(),
        }
    }
}

pub enum Preset {
    HandheldLowPower,
    HandheldDynamic,
    WeatherMonitoring,
    ElevatorFloorChange,
    DropDetection,
    IndoorNavigation,
}
