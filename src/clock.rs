//! Wall-clock state shared by every face.
//!
//! The faces never read a time source directly; the driver hands them one
//! [`TimeSnapshot`] (and [`CalendarSnapshot`]) per tick. When no external
//! source is attached the [`SoftwareClock`] free-runs one second at a time.

use log::warn;

/// Time fields for one frame tick. Read-only to the faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSnapshot {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub is_24h: bool,
}

impl TimeSnapshot {
    /// Hour as shown on the face: 1–12 in 12-hour display (midnight and
    /// noon read "12"), the raw 0–23 otherwise. Every face applies this
    /// remap before any angle or glyph math.
    pub fn display_hours(&self) -> u8 {
        if self.is_24h {
            self.hours
        } else {
            match self.hours % 12 {
                0 => 12,
                h => h,
            }
        }
    }

    pub fn is_pm(&self) -> bool {
        self.hours >= 12
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "SUNDAY",
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
        }
    }
}

/// Date fields for the Pip-Boy and weather headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarSnapshot {
    pub day: u8,
    pub month: u8,
    pub year: u16,
    pub weekday: Weekday,
}

/// Free-running fallback clock, advanced once per frame tick when no
/// network time is available.
pub struct SoftwareClock {
    time: TimeSnapshot,
    calendar: CalendarSnapshot,
}

impl SoftwareClock {
    pub fn new(time: TimeSnapshot, calendar: CalendarSnapshot) -> Self {
        Self { time, calendar }
    }

    pub fn time(&self) -> TimeSnapshot {
        self.time
    }

    pub fn calendar(&self) -> CalendarSnapshot {
        self.calendar
    }

    /// Advance one second, rolling minutes and hours.
    /// The date is deliberately left alone on the midnight rollover.
    pub fn tick(&mut self) {
        self.time.seconds += 1;
        if self.time.seconds >= 60 {
            self.time.seconds = 0;
            self.time.minutes += 1;
            if self.time.minutes >= 60 {
                self.time.minutes = 0;
                self.time.hours = (self.time.hours + 1) % 24;
            }
        }
    }

    /// Manual adjustment. Out-of-range fields are clamped, not wrapped.
    pub fn set_time(&mut self, hours: u8, minutes: u8, seconds: u8) {
        if hours > 23 || minutes > 59 || seconds > 59 {
            warn!("clamping out-of-range time {hours:02}:{minutes:02}:{seconds:02}");
        }
        self.time.hours = hours.min(23);
        self.time.minutes = minutes.min(59);
        self.time.seconds = seconds.min(59);
    }

    pub fn set_24h(&mut self, is_24h: bool) {
        self.time.is_24h = is_24h;
    }

    pub fn set_calendar(&mut self, calendar: CalendarSnapshot) {
        self.calendar = calendar;
    }
}
