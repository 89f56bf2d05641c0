use crate::bus::Bus;
use crate::register;

/// Factory trimming parameters plus the shared fine-resolution temperature.
///
/// The compensation formulas come from the datasheet appendix and are
/// evaluated in f64 so the published output resolution holds for the entire
/// operating range.
pub struct CalibrationData {
    dig_t1: u16,
    dig_t2: i16,
    dig_t3: i16,
    dig_p1: u16,
    dig_p2: i16,
    dig_p3: i16,
    dig_p4: i16,
    dig_p5: i16,
    dig_p6: i16,
    dig_p7: i16,
    dig_p8: i16,
    dig_p9: i16,
    /// Carries temperature information into the pressure compensation.
    /// `None` until the first temperature has been compensated.
    t_fine: Option<i32>,
}

impl CalibrationData {
    pub fn new<B: Bus>(bus: &mut B) -> Result<Self, B::Error> {
        let words = bus.read::<register::calibration::Calibration>()?;

        Ok(Self {
            dig_t1: words.dig_t1,
            dig_t2: words.dig_t2,
            dig_t3: words.dig_t3,
            dig_p1: words.dig_p1,
            dig_p2: words.dig_p2,
            dig_p3: words.dig_p3,
            dig_p4: words.dig_p4,
            dig_p5: words.dig_p5,
            dig_p6: words.dig_p6,
            dig_p7: words.dig_p7,
            dig_p8: words.dig_p8,
            dig_p9: words.dig_p9,
            t_fine: None,
        })
    }

    /// Converts a raw temperature reading into degrees Celsius.
    ///
    /// Also updates the stored fine-resolution temperature that
    /// [`Self::compensate_pressure`] depends on.
    pub fn compensate_temperature(&mut self, temp: u32) -> f32 {
        let var1 = ((temp as f64) / 16384.0 - (self.dig_t1 as f64) / 1024.0) * (self.dig_t2 as f64);
        let var2 = ((temp as f64) / 131072.0 - (self.dig_t1 as f64) / 8192.0)
            * ((temp as f64) / 131072.0 - (self.dig_t1 as f64) / 8192.0)
            * (self.dig_t3 as f64);

        self.t_fine = Some(libm::floor(var1 + var2) as i32);

        ((var1 + var2) / 5120.0) as f32
    }

    /// Converts a raw pressure reading into Pascal.
    ///
    /// Returns `None` when no temperature has been compensated yet, since the
    /// formula is anchored on the fine-resolution temperature.
    pub fn compensate_pressure(&self, pressure: u32) -> Option<f32> {
        let t_fine = self.t_fine? as f64;

        let mut var1 = t_fine / 2.0 - 64000.0;
        let mut var2 = var1 * var1 * (self.dig_p6 as f64) / 32768.0;
        var2 += var1 * (self.dig_p5 as f64) * 2.0;
        var2 = var2 / 4.0 + (self.dig_p4 as f64) * 65536.0;
        var1 = ((self.dig_p3 as f64) * var1 * var1 / 524288.0 + (self.dig_p2 as f64) * var1)
            / 524288.0;
        var1 = (1.0 + var1 / 32768.0) * (self.dig_p1 as f64);

        // Unprogrammed trimming (P1 == 0) would otherwise divide by zero.
        if var1 == 0.0 {
            return Some(0.0);
        }

        let mut p = 1048576.0 - pressure as f64;
        p = (p - var2 / 4096.0) * 6250.0 / var1;
        var1 = (self.dig_p9 as f64) * p * p / 2147483648.0;
        var2 = p * (self.dig_p8 as f64) / 32768.0;
        p += (var1 + var2 + (self.dig_p7 as f64)) / 16.0;

        Some(p as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBus, DATASHEET_CALIBRATION_BLOCK};

    fn datasheet_calibration() -> CalibrationData {
        let mut bus: FakeBus<1> = FakeBus::new();
        bus.with_response::<crate::register::calibration::Calibration>(
            &DATASHEET_CALIBRATION_BLOCK,
        );
        CalibrationData::new(&mut bus).unwrap()
    }

    #[test]
    fn test_load_calibration() {
        let cb = datasheet_calibration();

        assert_eq!(cb.dig_t1, 27504);
        assert_eq!(cb.dig_t2, 26435);
        assert_eq!(cb.dig_t3, -1000);
        assert_eq!(cb.dig_p1, 36477);
        assert_eq!(cb.dig_p2, -10685);
        assert_eq!(cb.dig_p3, 3024);
        assert_eq!(cb.dig_p4, 2855);
        assert_eq!(cb.dig_p5, 140);
        assert_eq!(cb.dig_p6, -7);
        assert_eq!(cb.dig_p7, 15500);
        assert_eq!(cb.dig_p8, -14600);
        assert_eq!(cb.dig_p9, 6000);
        assert_eq!(cb.t_fine, None);
    }

    #[test]
    fn temperature_matches_datasheet_example() {
        let mut cb = datasheet_calibration();

        let temp = cb.compensate_temperature(519888);
        assert!((temp - 25.08).abs() < 0.01);
        assert_eq!(cb.t_fine, Some(128422));
    }

    #[test]
    fn pressure_matches_datasheet_example() {
        let mut cb = datasheet_calibration();

        cb.compensate_temperature(519888);
        let pressure = cb.compensate_pressure(415148).unwrap();
        assert!((pressure - 100653.27).abs() < 1.0);
    }

    #[test]
    fn compensation_is_repeatable() {
        let mut cb = datasheet_calibration();

        let t1 = cb.compensate_temperature(519888);
        let t2 = cb.compensate_temperature(519888);
        assert_eq!(t1, t2);

        let p1 = cb.compensate_pressure(415148);
        let p2 = cb.compensate_pressure(415148);
        assert_eq!(p1, p2);
    }

    #[test]
    fn pressure_before_temperature_is_none() {
        let cb = datasheet_calibration();
        assert!(cb.compensate_pressure(415148).is_none());
    }

    #[test]
    fn unprogrammed_p1_yields_zero_instead_of_dividing() {
        let mut cb = datasheet_calibration();
        cb.dig_p1 = 0;

        cb.compensate_temperature(519888);
        assert_eq!(Some(0.0), cb.compensate_pressure(415148));
    }
}
