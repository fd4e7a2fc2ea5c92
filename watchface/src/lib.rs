//! Ultra watch face
//!
//! Shows the time, the date, a day-of-week icon, the battery level and
//! charging status and the Bluetooth connection state. Platform state comes
//! in as a [`WatchFaceState`] snapshot and drawing goes to any
//! `embedded-graphics` draw target, so the face runs the same on the watch
//! and on a host.

#![no_std]

use chrono::NaiveDateTime;
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565};

mod error;
pub mod format;
pub mod layer;
pub mod resources;
mod ultra;
mod window;

pub use error::Error;
pub use ultra::UltraFace;
pub use window::{WatchEvent, Window, WindowError};

/// Color mode of the display
pub type ColorMode = Rgb565;

/// Display width in pixels
pub const SCREEN_WIDTH: u32 = 240;
/// Display height in pixels
pub const SCREEN_HEIGHT: u32 = 240;

pub trait WatchFace: Sized {
    /// Window background color
    const BACKGROUND: ColorMode;

    /// Create all layers and fill them from the given state
    fn load(state: &WatchFaceState) -> Result<Self, Error>;

    /// Refresh the day-of-week icon, the time and the date
    fn handle_time_and_date(
        &mut self,
        time: &NaiveDateTime,
        clock: ClockStyle,
    ) -> Result<(), Error>;

    /// Refresh the battery icon, charging status and percentage
    fn handle_battery(&mut self, battery: BatteryInfo) -> Result<(), Error>;

    /// Refresh the Bluetooth icon
    fn handle_bluetooth(&mut self, connected: bool);

    /// Called once a minute, refreshes everything from a fresh snapshot.
    fn handle_minute_tick(&mut self, state: &WatchFaceState) -> Result<(), Error> {
        self.handle_time_and_date(&state.time, state.clock)?;
        self.handle_battery(state.battery)?;
        self.handle_bluetooth(state.bluetooth);
        Ok(())
    }

    /// Draw the layers that changed since the last draw
    fn draw<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>;

    /// Draw every layer
    fn draw_all<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>;
}

/// Battery charge state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryInfo {
    /// Charge in percent (0-100)
    pub percent: u8,
    /// Charger connected
    pub charging: bool,
}

/// Clock display format preference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockStyle {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl ClockStyle {
    pub const fn from_24h(is_24h: bool) -> Self {
        if is_24h {
            Self::TwentyFourHour
        } else {
            Self::TwelveHour
        }
    }
}

/// State for the watch face
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchFaceState {
    /// Local time
    pub time: NaiveDateTime,
    pub battery: BatteryInfo,
    /// Bluetooth connection established
    pub bluetooth: bool,
    pub clock: ClockStyle,
}
