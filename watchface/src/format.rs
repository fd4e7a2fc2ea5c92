//! Text formatting for the face labels

use core::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::ClockStyle;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Abbreviated month name for a zero based month
pub fn month_abbrev(month0: u32) -> &'static str {
    MONTHS.get(month0 as usize).copied().unwrap_or("???")
}

/// Time of day as `HH:MM`
///
/// The twelve hour style keeps the leading zero (`01` to `12`) and has no
/// AM/PM marker.
pub struct TimeText<'a> {
    time: &'a NaiveDateTime,
    clock: ClockStyle,
}

impl fmt::Display for TimeText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = match self.clock {
            ClockStyle::TwentyFourHour => self.time.hour(),
            ClockStyle::TwelveHour => self.time.hour12().1,
        };
        write!(f, "{:02}:{:02}", hour, self.time.minute())
    }
}

pub fn time_text(time: &NaiveDateTime, clock: ClockStyle) -> TimeText<'_> {
    TimeText { time, clock }
}

/// Date as ` 3 Mar 2024`, day of month padded to two columns
pub struct DateText<'a> {
    time: &'a NaiveDateTime,
}

impl fmt::Display for DateText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>2} {} {}",
            self.time.day(),
            month_abbrev(self.time.month0()),
            self.time.year()
        )
    }
}

pub fn date_text(time: &NaiveDateTime) -> DateText<'_> {
    DateText { time }
}

pub fn charging_text(charging: bool) -> &'static str {
    if charging {
        "charging"
    } else {
        "discharging"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::datetime;

    fn show<'a>(buf: &'a mut [u8], args: fmt::Arguments<'_>) -> &'a str {
        format_no_std::show(buf, args).unwrap()
    }

    #[test]
    fn twenty_four_hour_time() {
        let mut buf = [0u8; 8];
        let time = datetime(2024, 3, 3, 9, 5);
        assert_eq!(
            show(
                &mut buf,
                format_args!("{}", time_text(&time, ClockStyle::TwentyFourHour))
            ),
            "09:05"
        );

        let time = datetime(2024, 3, 3, 23, 59);
        assert_eq!(
            show(
                &mut buf,
                format_args!("{}", time_text(&time, ClockStyle::TwentyFourHour))
            ),
            "23:59"
        );
    }

    #[test]
    fn twelve_hour_time() {
        let mut buf = [0u8; 8];
        let cases = [
            ((0, 30), "12:30"),
            ((9, 5), "09:05"),
            ((12, 0), "12:00"),
            ((13, 7), "01:07"),
            ((23, 59), "11:59"),
        ];
        for ((hh, mm), expected) in cases {
            let time = datetime(2024, 3, 3, hh, mm);
            assert_eq!(
                show(
                    &mut buf,
                    format_args!("{}", time_text(&time, ClockStyle::TwelveHour))
                ),
                expected
            );
        }
    }

    #[test]
    fn date_pads_single_digit_day() {
        let mut buf = [0u8; 17];
        let time = datetime(2024, 3, 3, 9, 5);
        assert_eq!(
            show(&mut buf, format_args!("{}", date_text(&time))),
            " 3 Mar 2024"
        );

        let time = datetime(1999, 12, 31, 0, 0);
        assert_eq!(
            show(&mut buf, format_args!("{}", date_text(&time))),
            "31 Dec 1999"
        );
    }

    #[test]
    fn month_names() {
        assert_eq!(month_abbrev(0), "Jan");
        assert_eq!(month_abbrev(11), "Dec");
        assert_eq!(month_abbrev(12), "???");
    }

    #[test]
    fn charging_status() {
        assert_eq!(charging_text(true), "charging");
        assert_eq!(charging_text(false), "discharging");
    }
}
