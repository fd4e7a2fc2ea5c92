//! Event channel and shared platform state
//!
//! Producer tasks store the latest platform state here and push an [`Event`]
//! into [`EVENTS`]. The UI task drains the channel one event at a time and
//! reads the state back with [`peek`].

use core::{
    cell::{Cell, RefCell},
    sync::atomic::{AtomicBool, Ordering},
};

use chrono::NaiveDateTime;
use embassy_sync::{
    blocking_mutex::{raw::ThreadModeRawMutex, Mutex},
    channel::Channel,
};
use ultra_watchface::{BatteryInfo, WatchEvent, WatchFaceState};

use super::{
    config::CLOCK_STYLE,
    time::{TimeManager, TimeReference},
};

const EVENT_QUEUE_LEN: usize = 8;

#[derive(Clone, Copy, defmt::Format)]
pub enum Event {
    /// State change for the watch face
    Watch(WatchEvent),
    /// Side button pressed
    ButtonPressed,
}

pub static EVENTS: Channel<ThreadModeRawMutex, Event, EVENT_QUEUE_LEN> = Channel::new();

static BATTERY: Mutex<ThreadModeRawMutex, Cell<BatteryInfo>> = Mutex::new(Cell::new(BatteryInfo {
    percent: 0,
    charging: false,
}));
static BLUETOOTH: AtomicBool = AtomicBool::new(false);
static CLOCK: Mutex<ThreadModeRawMutex, RefCell<TimeManager>> =
    Mutex::new(RefCell::new(TimeManager::new()));

/// Current local time
pub fn now() -> NaiveDateTime {
    CLOCK.lock(|clock| clock.borrow().get_time())
}

pub fn set_time(reference: TimeReference) {
    CLOCK.lock(|clock| clock.borrow_mut().set_time(reference));
}

pub fn set_battery(info: BatteryInfo) {
    BATTERY.lock(|battery| battery.set(info));
}

pub fn set_bluetooth(connected: bool) {
    BLUETOOTH.store(connected, Ordering::Relaxed);
}

/// Snapshot of every platform accessor
pub fn peek() -> WatchFaceState {
    WatchFaceState {
        time: now(),
        battery: BATTERY.lock(|battery| battery.get()),
        bluetooth: BLUETOOTH.load(Ordering::Relaxed),
        clock: CLOCK_STYLE,
    }
}

/// Queue an event from a context that cannot wait
pub fn try_send(event: Event) {
    if EVENTS.try_send(event).is_err() {
        defmt::warn!("Event queue full, dropping {}", event);
    }
}
