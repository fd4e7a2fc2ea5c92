//! Ultra watch face

use chrono::{Datelike, NaiveDateTime};
use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Point, Size},
    mono_font::ascii::{FONT_10X20, FONT_7X13},
    pixelcolor::RgbColor,
    primitives::Rectangle,
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

use crate::{
    format,
    layer::{Alignment, BitmapLayer, Layer, TextLayer},
    resources::{Bitmap, ResourceId},
    BatteryInfo, ClockStyle, ColorMode, Error, WatchFace, WatchFaceState, SCREEN_WIDTH,
};

// Layout for the 240x240 screen
const BLUETOOTH_FRAME: Rectangle = Rectangle::new(Point::new(8, 8), Size::new(32, 32));
const BATTERY_IMAGE_FRAME: Rectangle = Rectangle::new(Point::new(200, 8), Size::new(32, 32));
const CHARGING_FRAME: Rectangle = Rectangle::new(Point::new(40, 8), Size::new(160, 16));
const BATTERY_FRAME: Rectangle = Rectangle::new(Point::new(40, 26), Size::new(160, 26));
const DAY_OF_WEEK_FRAME: Rectangle = Rectangle::new(Point::new(0, 64), Size::new(SCREEN_WIDTH, 36));
const TIME_FRAME: Rectangle = Rectangle::new(Point::new(0, 108), Size::new(SCREEN_WIDTH, 40));
const DATE_FRAME: Rectangle = Rectangle::new(Point::new(0, 184), Size::new(SCREEN_WIDTH, 24));

/// "HH:MM"
const TIME_LEN: usize = 8;
/// " 3 Mar 2024"
const DATE_LEN: usize = 17;
/// "discharging"
const CHARGING_LEN: usize = 12;
/// "100%"
const BATTERY_LEN: usize = 5;

/// Big centered time with the day of week above it, the date below, battery
/// and Bluetooth state along the top edge.
pub struct UltraFace {
    time_layer: TextLayer<TIME_LEN>,
    day_of_week_layer: BitmapLayer,
    date_layer: TextLayer<DATE_LEN>,
    battery_image_layer: BitmapLayer,
    charging_layer: TextLayer<CHARGING_LEN>,
    battery_layer: TextLayer<BATTERY_LEN>,
    bluetooth_image_layer: BitmapLayer,
}

impl UltraFace {
    pub fn time(&self) -> &str {
        self.time_layer.text()
    }

    pub fn date(&self) -> &str {
        self.date_layer.text()
    }

    pub fn charging_status(&self) -> &str {
        self.charging_layer.text()
    }

    pub fn battery_status(&self) -> &str {
        self.battery_layer.text()
    }

    pub fn day_of_week_icon(&self) -> Option<ResourceId> {
        self.day_of_week_layer.bitmap().map(Bitmap::id)
    }

    pub fn battery_icon(&self) -> Option<ResourceId> {
        self.battery_image_layer.bitmap().map(Bitmap::id)
    }

    pub fn bluetooth_icon(&self) -> Option<ResourceId> {
        self.bluetooth_image_layer.bitmap().map(Bitmap::id)
    }

    fn redraw<D>(&mut self, target: &mut D, force: bool) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        draw_layer(&mut self.day_of_week_layer, target, force)?;
        draw_layer(&mut self.time_layer, target, force)?;
        draw_layer(&mut self.date_layer, target, force)?;
        draw_layer(&mut self.battery_image_layer, target, force)?;
        draw_layer(&mut self.charging_layer, target, force)?;
        draw_layer(&mut self.battery_layer, target, force)?;
        draw_layer(&mut self.bluetooth_image_layer, target, force)
    }
}

fn draw_layer<L, D>(layer: &mut L, target: &mut D, force: bool) -> Result<(), D::Error>
where
    L: Layer,
    D: DrawTarget<Color = ColorMode>,
{
    if force || layer.is_dirty() {
        layer.draw(target, UltraFace::BACKGROUND)?;
    }
    Ok(())
}

impl WatchFace for UltraFace {
    const BACKGROUND: ColorMode = ColorMode::BLACK;

    fn load(state: &WatchFaceState) -> Result<Self, Error> {
        let mut face = Self {
            time_layer: TextLayer::new(TIME_FRAME, &PROFONT_24_POINT),
            day_of_week_layer: BitmapLayer::new(DAY_OF_WEEK_FRAME, Alignment::Center),
            date_layer: TextLayer::new(DATE_FRAME, &FONT_10X20),
            battery_image_layer: BitmapLayer::new(BATTERY_IMAGE_FRAME, Alignment::TopRight),
            charging_layer: TextLayer::new(CHARGING_FRAME, &FONT_7X13),
            battery_layer: TextLayer::new(BATTERY_FRAME, &PROFONT_18_POINT),
            bluetooth_image_layer: BitmapLayer::new(BLUETOOTH_FRAME, Alignment::TopLeft),
        };

        face.handle_time_and_date(&state.time, state.clock)?;
        face.handle_battery(state.battery)?;
        face.handle_bluetooth(state.bluetooth);

        Ok(face)
    }

    fn handle_time_and_date(
        &mut self,
        time: &NaiveDateTime,
        clock: ClockStyle,
    ) -> Result<(), Error> {
        self.day_of_week_layer
            .set_bitmap(Bitmap::from_resource(ResourceId::for_weekday(
                time.weekday(),
            )));

        self.time_layer
            .set_text(format_args!("{}", format::time_text(time, clock)))?;
        self.date_layer
            .set_text(format_args!("{}", format::date_text(time)))
    }

    fn handle_battery(&mut self, battery: BatteryInfo) -> Result<(), Error> {
        self.battery_image_layer
            .set_bitmap(Bitmap::from_resource(ResourceId::for_battery(
                battery.percent,
            )));

        self.charging_layer
            .set_text(format_args!("{}", format::charging_text(battery.charging)))?;
        self.battery_layer
            .set_text(format_args!("{}%", battery.percent))
    }

    fn handle_bluetooth(&mut self, connected: bool) {
        self.bluetooth_image_layer
            .set_bitmap(Bitmap::from_resource(ResourceId::for_bluetooth(connected)));
    }

    fn draw<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.redraw(target, false)
    }

    fn draw_all<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        self.redraw(target, true)
    }
}
