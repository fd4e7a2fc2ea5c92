//! Window lifecycle and event dispatch

use core::fmt;

use embedded_graphics::draw_target::DrawTarget;

use crate::{BatteryInfo, ColorMode, Error, WatchFace, WatchFaceState};

/// State change delivered by the firmware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchEvent {
    /// A new wall-clock minute started
    MinuteTick,
    BatteryStateChanged(BatteryInfo),
    BluetoothChanged(bool),
    /// The clock was set, time and date need a refresh
    ClockChanged,
}

#[derive(Debug)]
pub enum WindowError<E> {
    Face(Error),
    Draw(E),
}

impl<E> From<Error> for WindowError<E> {
    fn from(e: Error) -> Self {
        WindowError::Face(e)
    }
}

impl<E: fmt::Debug> fmt::Display for WindowError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowError::Face(e) => write!(f, "watch face: {}", e),
            WindowError::Draw(e) => write!(f, "draw: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for WindowError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            WindowError::Face(e) => defmt::write!(f, "watch face: {}", e),
            WindowError::Draw(e) => defmt::write!(f, "draw: {}", e),
        }
    }
}

/// Display surface holding the watch face while it is loaded
pub struct Window<F> {
    face: Option<F>,
}

impl<F> Default for Window<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Window<F> {
    pub const fn new() -> Self {
        Self { face: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.face.is_some()
    }

    pub fn face(&self) -> Option<&F> {
        self.face.as_ref()
    }

    /// Release the face and all its layers.
    ///
    /// Returns whether the window was loaded.
    pub fn unload(&mut self) -> bool {
        self.face.take().is_some()
    }
}

impl<F: WatchFace> Window<F> {
    /// Create the face from `state` and paint the whole screen
    pub fn load<D>(
        &mut self,
        state: &WatchFaceState,
        target: &mut D,
    ) -> Result<(), WindowError<D::Error>>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let mut face = F::load(state)?;

        target.clear(F::BACKGROUND).map_err(WindowError::Draw)?;
        face.draw_all(target).map_err(WindowError::Draw)?;

        self.face = Some(face);
        Ok(())
    }

    /// Run the handler for `event` and redraw what changed.
    ///
    /// Returns `false` without touching the screen while unloaded.
    pub fn dispatch<D>(
        &mut self,
        event: WatchEvent,
        state: &WatchFaceState,
        target: &mut D,
    ) -> Result<bool, WindowError<D::Error>>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        let Some(face) = self.face.as_mut() else {
            return Ok(false);
        };

        match event {
            WatchEvent::MinuteTick => face.handle_minute_tick(state)?,
            WatchEvent::BatteryStateChanged(battery) => face.handle_battery(battery)?,
            WatchEvent::BluetoothChanged(connected) => face.handle_bluetooth(connected),
            WatchEvent::ClockChanged => face.handle_time_and_date(&state.time, state.clock)?,
        }

        face.draw(target).map_err(WindowError::Draw)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{geometry::Point, pixelcolor::RgbColor};

    use super::*;
    use crate::{
        resources::ResourceId,
        testing::{datetime, state, FrameBuffer},
        UltraFace,
    };

    #[test]
    fn events_are_ignored_while_unloaded() {
        let mut window: Window<UltraFace> = Window::new();
        let mut fb = FrameBuffer::new();

        let handled = window
            .dispatch(WatchEvent::MinuteTick, &state(), &mut fb)
            .unwrap();
        assert!(!handled);
        assert!(!window.is_loaded());
        assert_eq!(fb.pixel(Point::new(120, 120)), ColorMode::RED);
    }

    #[test]
    fn load_clears_screen_and_draws() {
        let mut window: Window<UltraFace> = Window::new();
        let mut fb = FrameBuffer::new();
        window.load(&state(), &mut fb).unwrap();

        assert!(window.is_loaded());
        assert_eq!(fb.pixel(Point::new(0, 230)), ColorMode::BLACK);
        assert_eq!(window.face().map(UltraFace::time), Some("09:05"));
    }

    #[test]
    fn dispatch_routes_events() {
        let mut window: Window<UltraFace> = Window::new();
        let mut fb = FrameBuffer::new();
        window.load(&state(), &mut fb).unwrap();

        assert!(window
            .dispatch(WatchEvent::BluetoothChanged(false), &state(), &mut fb)
            .unwrap());
        assert_eq!(
            window.face().and_then(UltraFace::bluetooth_icon),
            Some(ResourceId::BluetoothDisconnected)
        );

        let battery = BatteryInfo {
            percent: 30,
            charging: false,
        };
        window
            .dispatch(WatchEvent::BatteryStateChanged(battery), &state(), &mut fb)
            .unwrap();
        assert_eq!(window.face().map(UltraFace::battery_status), Some("30%"));

        let mut later = state();
        later.time = datetime(2024, 3, 3, 9, 6);
        window
            .dispatch(WatchEvent::ClockChanged, &later, &mut fb)
            .unwrap();
        assert_eq!(window.face().map(UltraFace::time), Some("09:06"));
    }

    #[test]
    fn unload_releases_face() {
        let mut window: Window<UltraFace> = Window::new();
        let mut fb = FrameBuffer::new();
        window.load(&state(), &mut fb).unwrap();

        assert!(window.unload());
        assert!(!window.is_loaded());
        assert!(!window.unload());

        window.load(&state(), &mut fb).unwrap();
        assert!(window.is_loaded());
    }
}
