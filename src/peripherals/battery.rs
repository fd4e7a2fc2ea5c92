//! Battery status check
//!
//! Implementation based upon https://github.com/dbrgn/pinetime-rtic/blob/master/pinetime-rtic/src/battery.rs
//! and https://wiki.pine64.org/wiki/PineTime.

use embassy_nrf::{gpio::Input, peripherals::P0_12, saadc::Saadc};
use ultra_watchface::BatteryInfo;

/// Smallest change in percent reported while the charging state stays the same
const PERCENT_HYSTERESIS: u8 = 2;

pub struct BatteryStatus<'a> {
    /// Pin P0.12: High = battery, Low = charging
    pin_charge_indication: Input<'a, P0_12>,

    /// Saadc instance, channel 0 measures the battery voltage
    saadc: Saadc<'a, 1>,

    /// Last reported state
    info: BatteryInfo,
}

impl<'a> BatteryStatus<'a> {
    /// Initialize battery status
    pub async fn init(
        pin_charge_indication: Input<'a, P0_12>,
        saadc: Saadc<'a, 1>,
    ) -> Result<Self, Error> {
        let mut battery = Self {
            pin_charge_indication,
            saadc,
            info: BatteryInfo::default(),
        };
        battery.info = battery.measure().await?;
        Ok(battery)
    }

    /// Return the last reported state of the battery.
    ///
    /// To fetch current data, call `update()` first.
    pub fn info(&self) -> BatteryInfo {
        self.info
    }

    /// Update the battery status by reading information from the hardware.
    /// Return whether or not the reported values changed.
    pub async fn update(&mut self) -> Result<bool, Error> {
        let info = self.measure().await?;

        let changed = info.charging != self.info.charging
            || info.percent.abs_diff(self.info.percent) >= PERCENT_HYSTERESIS
            || (info.percent != self.info.percent && (info.percent == 0 || info.percent == 100));
        if changed {
            self.info = info;
        }

        Ok(changed)
    }

    async fn measure(&mut self) -> Result<BatteryInfo, Error> {
        let mut buf = [0; 1];
        self.saadc.sample(&mut buf).await;
        let voltage = convert_adc_measurement(buf[0])?;

        Ok(BatteryInfo {
            percent: percent_from_millivolts(voltage),
            charging: self.pin_charge_indication.is_low(),
        })
    }
}

/// Convert a 12 bit ADC measurement into a battery voltage in millivolts.
fn convert_adc_measurement(raw_measurement: i16) -> Result<u16, Error> {
    match raw_measurement {
        0..=4095 => {
            // For detailed explanation of formula check https://wiki.pine64.org/wiki/PineTime
            // Use u32 during calculation to prevent overflow
            Ok((raw_measurement as u32 * 2000 / 1241) as u16)
        }
        _ => Err(Error::InvalidMeasurement),
    }
}

/// Estimate the remaining capacity.
///
/// Uses fixed data points and linear interpolation in between.
fn percent_from_millivolts(voltage: u16) -> u8 {
    (match voltage {
        0..=3449 => 0,
        3450..=3699 => (voltage - 3450) / 5,
        3700..=4199 => 50 + (voltage - 3700) / 10,
        _ => 100,
    }) as u8
}

#[derive(Debug, defmt::Format)]
pub enum Error {
    InvalidMeasurement,
}
