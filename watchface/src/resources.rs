//! Bundled icon resources
//!
//! All icons are 1 bit per pixel raw images, rows padded to full bytes,
//! most significant bit first.

use chrono::Weekday;
use embedded_graphics::{geometry::Size, image::ImageRaw, pixelcolor::BinaryColor};

const WEEKDAY_SIZE: Size = Size::new(64, 30);
const BATTERY_SIZE: Size = Size::new(32, 16);
const BLUETOOTH_SIZE: Size = Size::new(16, 24);

/// Catalog of bundled icons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceId {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    /// Full battery
    Batt0,
    Batt1,
    Batt2,
    Batt3,
    /// Empty battery
    Batt4,
    BluetoothConnected,
    BluetoothDisconnected,
}

impl ResourceId {
    pub const fn for_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sun => Self::Sun,
            Weekday::Mon => Self::Mon,
            Weekday::Tue => Self::Tue,
            Weekday::Wed => Self::Wed,
            Weekday::Thu => Self::Thu,
            Weekday::Fri => Self::Fri,
            Weekday::Sat => Self::Sat,
        }
    }

    /// Day icon for a weekday index counted from Sunday (0-6)
    pub const fn for_weekday_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Sun),
            1 => Some(Self::Mon),
            2 => Some(Self::Tue),
            3 => Some(Self::Wed),
            4 => Some(Self::Thu),
            5 => Some(Self::Fri),
            6 => Some(Self::Sat),
            _ => None,
        }
    }

    /// Battery icon for a charge percentage
    pub const fn for_battery(percent: u8) -> Self {
        match percent {
            76..=u8::MAX => Self::Batt0,
            51..=75 => Self::Batt1,
            26..=50 => Self::Batt2,
            1..=25 => Self::Batt3,
            0 => Self::Batt4,
        }
    }

    pub const fn for_bluetooth(connected: bool) -> Self {
        if connected {
            Self::BluetoothConnected
        } else {
            Self::BluetoothDisconnected
        }
    }

    /// Icon size in pixels
    pub const fn size(self) -> Size {
        match self {
            Self::Sun | Self::Mon | Self::Tue | Self::Wed | Self::Thu | Self::Fri | Self::Sat => {
                WEEKDAY_SIZE
            }
            Self::Batt0 | Self::Batt1 | Self::Batt2 | Self::Batt3 | Self::Batt4 => BATTERY_SIZE,
            Self::BluetoothConnected | Self::BluetoothDisconnected => BLUETOOTH_SIZE,
        }
    }

    fn data(self) -> &'static [u8] {
        match self {
            Self::Sun => include_bytes!("../assets/sun.raw"),
            Self::Mon => include_bytes!("../assets/mon.raw"),
            Self::Tue => include_bytes!("../assets/tue.raw"),
            Self::Wed => include_bytes!("../assets/wed.raw"),
            Self::Thu => include_bytes!("../assets/thu.raw"),
            Self::Fri => include_bytes!("../assets/fri.raw"),
            Self::Sat => include_bytes!("../assets/sat.raw"),
            Self::Batt0 => include_bytes!("../assets/batt0.raw"),
            Self::Batt1 => include_bytes!("../assets/batt1.raw"),
            Self::Batt2 => include_bytes!("../assets/batt2.raw"),
            Self::Batt3 => include_bytes!("../assets/batt3.raw"),
            Self::Batt4 => include_bytes!("../assets/batt4.raw"),
            Self::BluetoothConnected => include_bytes!("../assets/bluetooth_connected.raw"),
            Self::BluetoothDisconnected => include_bytes!("../assets/bluetooth_disconnected.raw"),
        }
    }
}

/// Icon loaded from a bundled resource
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitmap {
    id: ResourceId,
}

impl Bitmap {
    pub const fn from_resource(id: ResourceId) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> ResourceId {
        self.id
    }

    pub const fn size(&self) -> Size {
        self.id.size()
    }

    /// Raw image, `On` pixels are the foreground
    pub fn image(&self) -> ImageRaw<'static, BinaryColor> {
        ImageRaw::new(self.id.data(), self.id.size().width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ResourceId; 14] = [
        ResourceId::Sun,
        ResourceId::Mon,
        ResourceId::Tue,
        ResourceId::Wed,
        ResourceId::Thu,
        ResourceId::Fri,
        ResourceId::Sat,
        ResourceId::Batt0,
        ResourceId::Batt1,
        ResourceId::Batt2,
        ResourceId::Batt3,
        ResourceId::Batt4,
        ResourceId::BluetoothConnected,
        ResourceId::BluetoothDisconnected,
    ];

    #[test]
    fn battery_thresholds() {
        assert_eq!(ResourceId::for_battery(100), ResourceId::Batt0);
        assert_eq!(ResourceId::for_battery(76), ResourceId::Batt0);
        assert_eq!(ResourceId::for_battery(75), ResourceId::Batt1);
        assert_eq!(ResourceId::for_battery(51), ResourceId::Batt1);
        assert_eq!(ResourceId::for_battery(50), ResourceId::Batt2);
        assert_eq!(ResourceId::for_battery(26), ResourceId::Batt2);
        assert_eq!(ResourceId::for_battery(25), ResourceId::Batt3);
        assert_eq!(ResourceId::for_battery(1), ResourceId::Batt3);
        assert_eq!(ResourceId::for_battery(0), ResourceId::Batt4);
    }

    #[test]
    fn weekday_index_counts_from_sunday() {
        assert_eq!(ResourceId::for_weekday_index(0), Some(ResourceId::Sun));
        assert_eq!(ResourceId::for_weekday_index(3), Some(ResourceId::Wed));
        assert_eq!(ResourceId::for_weekday_index(6), Some(ResourceId::Sat));
        assert_eq!(ResourceId::for_weekday_index(7), None);
    }

    #[test]
    fn weekday_matches_index() {
        let days = [
            Weekday::Sun,
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
        ];
        for day in days {
            assert_eq!(
                Some(ResourceId::for_weekday(day)),
                ResourceId::for_weekday_index(day.num_days_from_sunday())
            );
        }
    }

    #[test]
    fn bluetooth_icons() {
        assert_eq!(
            ResourceId::for_bluetooth(true),
            ResourceId::BluetoothConnected
        );
        assert_eq!(
            ResourceId::for_bluetooth(false),
            ResourceId::BluetoothDisconnected
        );
    }

    #[test]
    fn icon_data_matches_size() {
        for id in ALL {
            let size = id.size();
            let row_bytes = (size.width as usize + 7) / 8;
            assert_eq!(id.data().len(), row_bytes * size.height as usize, "{:?}", id);
        }
    }

    #[test]
    fn icons_are_not_blank() {
        for id in ALL {
            assert!(id.data().iter().any(|b| *b != 0), "{:?}", id);
        }
    }
}
