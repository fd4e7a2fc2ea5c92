#![no_std]
#![no_main]

mod peripherals;
mod system;

// Panic handler and debugging
use defmt::{unwrap, Debug2Format};

use defmt_rtt as _;
use panic_probe as _;

// Device
use embassy_executor::Spawner;
use embassy_nrf::{
    bind_interrupts,
    gpio::{Input, Level, Output, OutputDrive, Pin, Pull},
    interrupt::{self, InterruptExt, Priority},
    peripherals::SPI2,
    saadc::{self, ChannelConfig, Resolution, Saadc},
    spim,
};
use embassy_time::{Duration, Timer};
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM2_SPIS2_SPI2 => spim::InterruptHandler<SPI2>;
});

// Crate
use peripherals::{backlight::Backlight, battery::BatteryStatus, button::Button, display::Display};
use system::{
    bluetooth::{self, Server},
    config::{SystemConfig, BRIGHTNESS, CLOCK_STYLE, UTC_EPOCH, UTC_OFFSET},
    events::{self, Event, EVENTS},
    time::TimeReference,
};

// Others
use chrono::{DateTime, Timelike};
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::RgbColor};
use ultra_watchface::{ColorMode, UltraFace, WatchEvent, Window};

static SERVER: StaticCell<Server> = StaticCell::new();

/// Run the SoftDevice event loop
#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

/// Advertise and track the Bluetooth connection
#[embassy_executor::task]
async fn ble_task(sd: &'static Softdevice, server: &'static Server) -> ! {
    bluetooth::run(sd, server).await
}

/// Fetch the battery status from the hardware every second.
#[embassy_executor::task]
async fn update_battery_status(mut battery: BatteryStatus<'static>, server: &'static Server) {
    loop {
        match battery.update().await {
            Ok(true) => {
                let info = battery.info();
                defmt::info!("Battery status: {}", info);
                events::set_battery(info);
                if let Err(e) = server.bas.battery_level_set(&info.percent) {
                    defmt::warn!("Failed to publish battery level: {}", e);
                }
                EVENTS
                    .send(Event::Watch(WatchEvent::BatteryStateChanged(info)))
                    .await;
            }
            Ok(false) => {}
            Err(e) => defmt::warn!("Battery measurement failed: {}", e),
        }

        // Re-schedule the timer interrupt in 1s
        Timer::after(Duration::from_secs(1)).await;
    }
}

/// Emit a tick at the start of every wall-clock minute
#[embassy_executor::task]
async fn minute_tick() {
    loop {
        let now = events::now();
        let elapsed_ms =
            now.second() as u64 * 1_000 + (now.nanosecond() / 1_000_000).min(999) as u64;
        Timer::after(Duration::from_millis(60_000 - elapsed_ms)).await;

        EVENTS.send(Event::Watch(WatchEvent::MinuteTick)).await;
    }
}

/// Polls the button state every 10ms
#[embassy_executor::task]
async fn poll_button(mut button: Button<'static>) {
    loop {
        if button.pressed().await {
            EVENTS.send(Event::ButtonPressed).await;
        }

        // Re-schedule the timer interrupt in 10ms
        Timer::after(Duration::from_millis(10)).await;
    }
}

/// Own the display and run every event to completion
#[embassy_executor::task]
async fn ui(mut display: Display<'static, SPI2>, mut backlight: Backlight<'static>) {
    let mut window: Window<UltraFace> = Window::new();
    load_window(&mut window, &mut display, &mut backlight);

    loop {
        match EVENTS.receive().await {
            Event::Watch(event) => {
                defmt::debug!("Handling {}", event);
                if let Err(e) = window.dispatch(event, &events::peek(), &mut display) {
                    defmt::warn!("Failed to handle {}: {}", event, Debug2Format(&e));
                }
            }
            Event::ButtonPressed => {
                if window.unload() {
                    defmt::info!("Window unloaded");
                    backlight.off();
                    if let Err(e) = display.clear(ColorMode::BLACK) {
                        defmt::warn!("Failed to clear display: {}", Debug2Format(&e));
                    }
                } else {
                    load_window(&mut window, &mut display, &mut backlight);
                }
            }
        }
    }
}

fn load_window(
    window: &mut Window<UltraFace>,
    display: &mut Display<'static, SPI2>,
    backlight: &mut Backlight<'static>,
) {
    match window.load(&events::peek(), display) {
        Ok(()) => defmt::info!("Window loaded"),
        Err(e) => defmt::error!("Failed to load window: {}", Debug2Format(&e)),
    }
    if let Err(e) = backlight.set(BRIGHTNESS) {
        defmt::warn!("Failed to set backlight: {}", e);
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(SystemConfig::new());
    defmt::info!("Initializing");

    // Keep peripheral interrupts clear of the priorities reserved for the SoftDevice
    interrupt::SAADC.set_priority(Priority::P3);
    interrupt::SPIM2_SPIS2_SPI2.set_priority(Priority::P3);

    // Initialize clock from the build time
    match DateTime::from_timestamp(UTC_EPOCH + UTC_OFFSET as i64, 0) {
        Some(time) => events::set_time(TimeReference::from_datetime(time.naive_utc())),
        None => defmt::warn!("Invalid build epoch, clock starts at 1970"),
    }

    // Initialize SAADC
    let mut saadc_config = saadc::Config::default();
    // Set resolution to 12bit, necessary for correct battery status calculation
    saadc_config.resolution = Resolution::_12BIT;
    // Pin P0.31: Voltage level
    let channel_config = ChannelConfig::single_ended(&mut p.P0_31);
    let saadc = Saadc::new(p.SAADC, Irqs, saadc_config, [channel_config]);
    saadc.calibrate().await;

    // Initialize battery
    let battery = unwrap!(BatteryStatus::init(Input::new(p.P0_12, Pull::None), saadc).await);
    events::set_battery(battery.info());

    // Initialize backlight, off until the window is loaded
    let backlight = unwrap!(Backlight::init(
        Output::new(p.P0_14.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_22.degrade(), Level::High, OutputDrive::Standard),
        Output::new(p.P0_23.degrade(), Level::High, OutputDrive::Standard),
        0,
    ));

    // Initialize button
    let button = Button::init(
        Input::new(p.P0_13, Pull::None),
        Output::new(p.P0_15, Level::Low, OutputDrive::Standard),
    );

    // Initialize SPI
    let mut spim_config = spim::Config::default();
    // Use SPI at 8MHz (the fastest clock available on the nRF52832),
    // otherwise refreshing will be super slow.
    spim_config.frequency = spim::Frequency::M8;
    // SPI must be used in mode 3. Mode 0 (the default) won't work.
    spim_config.mode = spim::MODE_3;

    let spim = spim::Spim::new(p.SPI2, Irqs, p.P0_02, p.P0_04, p.P0_03, spim_config);

    // Initialize LCD
    let display = unwrap!(Display::init(
        spim,
        Output::new(p.P0_25, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_18, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_26, Level::Low, OutputDrive::Standard),
    ));

    // Initialize Bluetooth
    let sd = Softdevice::enable(&bluetooth::softdevice_config());
    let server: &'static Server = SERVER.init(unwrap!(Server::new(sd)));
    let sd: &'static Softdevice = sd;
    if let Err(e) = server.bas.battery_level_set(&battery.info().percent) {
        defmt::warn!("Failed to publish battery level: {}", e);
    }

    defmt::info!("Initialization finished, clock style {}", CLOCK_STYLE);

    // Schedule tasks
    unwrap!(spawner.spawn(softdevice_task(sd)));
    unwrap!(spawner.spawn(ble_task(sd, server)));
    unwrap!(spawner.spawn(ui(display, backlight)));
    unwrap!(spawner.spawn(update_battery_status(battery, server)));
    unwrap!(spawner.spawn(minute_tick()));
    unwrap!(spawner.spawn(poll_button(button)));
}
