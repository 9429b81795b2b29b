//! Weather dashboard: data model, weather-driven ring colors, and the face.
//!
//! The HTTP fetch and JSON parsing live outside the core; whatever does
//! them resolves the provider icon code into [`Condition`] exactly once,
//! so nothing downstream ever matches on strings again.

use core::fmt::Write as _;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{
        Circle, CornerRadii, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
    },
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use heapless::String;

use crate::clock::{CalendarSnapshot, TimeSnapshot};
use crate::indicator::{ConfigError, Indicator, IndicatorSpec};
use crate::theme::LedColor;

/// Weather condition, condensed from the OpenWeatherMap icon families.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    Clear,
    FewClouds,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Unknown,
}

impl Condition {
    /// Resolve a provider icon code like `"10d"`. Returns the condition
    /// and whether it is the day variant (day when the code is too short
    /// to tell).
    pub fn from_icon_code(code: &str) -> (Condition, bool) {
        let condition = match code.get(..2) {
            Some("01") => Condition::Clear,
            Some("02") => Condition::FewClouds,
            Some("03") | Some("04") => Condition::Clouds,
            Some("09") | Some("10") => Condition::Rain,
            Some("11") => Condition::Thunderstorm,
            Some("13") => Condition::Snow,
            Some("50") => Condition::Mist,
            _ => Condition::Unknown,
        };
        let is_day = code.as_bytes().get(2).map(|&b| b != b'n').unwrap_or(true);
        (condition, is_day)
    }
}

pub const MAX_DESCRIPTION_LEN: usize = 24;

/// One fetched weather report. Produced by the external fetcher, read-only
/// to the weather face.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherSnapshot {
    pub description: String<MAX_DESCRIPTION_LEN>,
    pub condition: Condition,
    pub is_day: bool,
    pub temperature: i16,
    pub feels_like: i16,
    pub temp_min: i16,
    pub temp_max: i16,
    pub humidity: u8,
    /// Imperial units: temperatures in °F, rendered with an "F" suffix.
    pub imperial: bool,
}

impl WeatherSnapshot {
    pub fn unit_letter(&self) -> char {
        if self.imperial {
            'F'
        } else {
            'C'
        }
    }
}

// Temperature buckets in °F.
const TEMP_COLD: i16 = 50;
const TEMP_COOL: i16 = 65;
const TEMP_COMFORT: i16 = 75;
const TEMP_WARM: i16 = 85;

/// Ring color for a clear-sky temperature.
pub fn temperature_color(temperature: i16) -> LedColor {
    if temperature <= TEMP_COLD {
        LedColor::Blue
    } else if temperature <= TEMP_COOL {
        LedColor::Cyan
    } else if temperature <= TEMP_COMFORT {
        LedColor::Green
    } else if temperature <= TEMP_WARM {
        LedColor::Yellow
    } else {
        LedColor::Red
    }
}

/// Ring color for a weather report. `None` means "keep the current color"
/// (no recognizable condition).
pub fn led_color_for(snapshot: &WeatherSnapshot) -> Option<LedColor> {
    match snapshot.condition {
        Condition::Thunderstorm => Some(LedColor::Purple),
        Condition::Rain => Some(LedColor::Blue),
        Condition::Snow | Condition::Mist => Some(LedColor::White),
        Condition::Clear | Condition::FewClouds | Condition::Clouds => {
            Some(temperature_color(snapshot.temperature))
        }
        Condition::Unknown => None,
    }
}

const TEXT_COLOR: Rgb565 = Rgb565::new(31, 63, 31);
const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);
const SUN_YELLOW: Rgb565 = Rgb565::new(31, 63, 0);
const CLOUD_GREY: Rgb565 = Rgb565::new(26, 52, 26);
const RAIN_BLUE: Rgb565 = Rgb565::new(11, 53, 31);

const ICON_X: i32 = 55;
const ICON_Y: i32 = 130;
const SECONDS_RADIUS: u16 = 115;
const SECONDS_THICKNESS: u16 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ShownTime {
    display_hours: u8,
    minutes: u8,
    pm: bool,
}

/// Weather dashboard face. Header and time update per cell; the weather
/// block repaints only when a new snapshot arrives.
pub struct WeatherFace {
    center: Point,
    seconds_ring: Indicator,
    shown_time: Option<ShownTime>,
    shown_calendar: Option<CalendarSnapshot>,
    shown_weather: Option<Option<WeatherSnapshot>>,
}

impl WeatherFace {
    pub fn new(center: Point, accent: Rgb565) -> Result<Self, ConfigError> {
        let ring = Indicator::new(IndicatorSpec {
            center,
            radius: SECONDS_RADIUS,
            thickness: SECONDS_THICKNESS,
            units_per_revolution: 60,
            one_based: false,
            background: BACKGROUND,
            foreground: accent,
        })?;
        Ok(Self {
            center,
            seconds_ring: ring,
            shown_time: None,
            shown_calendar: None,
            shown_weather: None,
        })
    }

    pub fn reset(&mut self) {
        self.seconds_ring.reset();
        self.shown_time = None;
        self.shown_calendar = None;
        self.shown_weather = None;
    }

    pub fn set_accent(&mut self, accent: Rgb565) {
        self.seconds_ring.set_foreground(accent);
    }

    pub fn update<D>(
        &mut self,
        target: &mut D,
        time: &TimeSnapshot,
        calendar: &CalendarSnapshot,
        weather: Option<&WeatherSnapshot>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.shown_calendar.as_ref() != Some(calendar) {
            // Header cells stay narrow so they never clip the seconds ring.
            self.draw_centered(target, 25, 100, &FONT_10X20, calendar.weekday.name())?;
            let mut date: String<12> = String::new();
            let _ = write!(date, "{:02}.{:02}.{:04}", calendar.day, calendar.month, calendar.year);
            self.draw_centered(target, 50, 100, &FONT_10X20, &date)?;
            self.shown_calendar = Some(*calendar);
        }

        if self.shown_weather.as_ref().map(Option::as_ref) != Some(weather) {
            self.draw_weather_block(target, weather)?;
            self.shown_weather = Some(weather.cloned());
        }

        let now = ShownTime {
            display_hours: time.display_hours(),
            minutes: time.minutes,
            pm: time.is_pm(),
        };
        if self.shown_time != Some(now) {
            let mut line: String<12> = String::new();
            if time.is_24h {
                let _ = write!(line, "{:02}:{:02}", now.display_hours, now.minutes);
            } else {
                let meridiem = if now.pm { "PM" } else { "AM" };
                let _ = write!(line, "{:02}:{:02} {}", now.display_hours, now.minutes, meridiem);
            }
            self.draw_centered(target, 195, 100, &FONT_10X20, &line)?;
            self.shown_time = Some(now);
        }

        self.seconds_ring.render(time.seconds as u16, target)
    }

    fn draw_centered<D>(
        &self,
        target: &mut D,
        y: i32,
        width: u32,
        font: &embedded_graphics::mono_font::MonoFont<'_>,
        text: &str,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Rectangle::new(
            Point::new(self.center.x - width as i32 / 2, y),
            Size::new(width, font.character_size.height),
        )
        .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
        .draw(target)?;
        let style = MonoTextStyle::new(font, TEXT_COLOR);
        Text::with_text_style(
            text,
            Point::new(self.center.x, y),
            style,
            TextStyleBuilder::new()
                .alignment(Alignment::Center)
                .baseline(Baseline::Top)
                .build(),
        )
        .draw(target)?;
        Ok(())
    }

    fn draw_weather_block<D>(
        &self,
        target: &mut D,
        weather: Option<&WeatherSnapshot>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        // Everything between the date header and the time line, kept clear
        // of the seconds ring at the rim.
        Rectangle::new(Point::new(26, 70), Size::new(188, 112))
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(target)?;

        let Some(weather) = weather else {
            let style = MonoTextStyle::new(&FONT_10X20, TEXT_COLOR);
            Text::with_text_style(
                "Loading...",
                Point::new(self.center.x, 110),
                style,
                TextStyleBuilder::new()
                    .alignment(Alignment::Center)
                    .baseline(Baseline::Top)
                    .build(),
            )
            .draw(target)?;
            return Ok(());
        };

        self.draw_icon(target, weather.condition, weather.is_day)?;

        // Capitalized description under the date.
        let mut description: String<MAX_DESCRIPTION_LEN> = String::new();
        for (i, c) in weather.description.chars().enumerate() {
            let c = if i == 0 { c.to_ascii_uppercase() } else { c };
            if description.push(c).is_err() {
                break;
            }
        }
        self.draw_centered(target, 70, 140, &FONT_6X10, &description)?;

        // Big current temperature with a drawn degree mark and unit.
        let mut temp: String<8> = String::new();
        let _ = write!(temp, "{}", weather.temperature);
        let style = MonoTextStyle::new(&FONT_10X20, TEXT_COLOR);
        Text::with_baseline(&temp, Point::new(100, 90), style, Baseline::Top).draw(target)?;
        let degree_x = 100 + temp.len() as i32 * 10 + 8;
        Circle::with_center(Point::new(degree_x, 96), 8)
            .into_styled(PrimitiveStyle::with_stroke(TEXT_COLOR, 1))
            .draw(target)?;
        let mut unit: String<2> = String::new();
        let _ = unit.push(weather.unit_letter());
        Text::with_baseline(
            &unit,
            Point::new(degree_x + 8, 90),
            MonoTextStyle::new(&FONT_6X10, TEXT_COLOR),
            Baseline::Top,
        )
        .draw(target)?;

        // Feels-like, high, low rows.
        let small = MonoTextStyle::new(&FONT_6X10, TEXT_COLOR);
        let mut row: String<16> = String::new();
        let _ = write!(row, "Feels: {}", weather.feels_like);
        Text::with_baseline(&row, Point::new(100, 118), small, Baseline::Top).draw(target)?;
        row.clear();
        let _ = write!(row, "High: {}", weather.temp_max);
        Text::with_baseline(&row, Point::new(100, 138), small, Baseline::Top).draw(target)?;
        row.clear();
        let _ = write!(row, "Low: {}", weather.temp_min);
        Text::with_baseline(&row, Point::new(100, 158), small, Baseline::Top).draw(target)?;
        Ok(())
    }

    fn draw_icon<D>(
        &self,
        target: &mut D,
        condition: Condition,
        is_day: bool,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let at = Point::new(ICON_X, ICON_Y);
        let grey = PrimitiveStyle::with_fill(CLOUD_GREY);

        match condition {
            Condition::Clear => {
                if is_day {
                    Circle::with_center(at, 40)
                        .into_styled(PrimitiveStyle::with_fill(SUN_YELLOW))
                        .draw(target)?;
                } else {
                    Circle::with_center(at, 40).into_styled(grey).draw(target)?;
                    Circle::with_center(at + Point::new(10, -10), 40)
                        .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
                        .draw(target)?;
                }
            }
            Condition::FewClouds => {
                let small = if is_day {
                    PrimitiveStyle::with_fill(SUN_YELLOW)
                } else {
                    grey
                };
                Circle::with_center(at + Point::new(-10, -5), 24)
                    .into_styled(small)
                    .draw(target)?;
                rounded_rect(target, at + Point::new(-5, 0), 30, 15, 8, CLOUD_GREY)?;
            }
            Condition::Clouds => {
                rounded_rect(target, at + Point::new(-25, -10), 50, 20, 10, CLOUD_GREY)?;
                rounded_rect(target, at + Point::new(-15, -20), 40, 15, 8, TEXT_COLOR)?;
            }
            Condition::Rain => {
                rounded_rect(target, at + Point::new(-25, -15), 50, 20, 10, CLOUD_GREY)?;
                for dx in [-15i32, -5, 5, 15] {
                    rounded_rect(target, at + Point::new(dx, 10), 3, 15, 2, RAIN_BLUE)?;
                }
            }
            Condition::Thunderstorm => {
                rounded_rect(target, at + Point::new(-25, -15), 50, 20, 10, CLOUD_GREY)?;
                let bolt = PrimitiveStyle::with_fill(SUN_YELLOW);
                Triangle::new(
                    at + Point::new(-5, 5),
                    at + Point::new(10, 15),
                    at + Point::new(-10, 20),
                )
                .into_styled(bolt)
                .draw(target)?;
                Triangle::new(
                    at + Point::new(-10, 20),
                    at + Point::new(10, 15),
                    at + Point::new(0, 35),
                )
                .into_styled(bolt)
                .draw(target)?;
            }
            Condition::Snow => {
                rounded_rect(target, at + Point::new(-25, -15), 50, 20, 10, CLOUD_GREY)?;
                for dx in [-15i32, -5, 5, 15] {
                    Circle::with_center(at + Point::new(dx, 15), 10)
                        .into_styled(PrimitiveStyle::with_fill(TEXT_COLOR))
                        .draw(target)?;
                }
            }
            Condition::Mist => {
                for dy in (-15i32..=15).step_by(7) {
                    Line::new(at + Point::new(-25, dy), at + Point::new(25, dy))
                        .into_styled(PrimitiveStyle::with_stroke(CLOUD_GREY, 1))
                        .draw(target)?;
                }
            }
            Condition::Unknown => {
                rounded_rect(target, at + Point::new(-25, -15), 50, 30, 8, CLOUD_GREY)?;
                Text::with_baseline(
                    "?",
                    at + Point::new(-5, -10),
                    MonoTextStyle::new(&FONT_10X20, BACKGROUND),
                    Baseline::Top,
                )
                .draw(target)?;
            }
        }
        Ok(())
    }
}

fn rounded_rect<D>(
    target: &mut D,
    top_left: Point,
    width: u32,
    height: u32,
    corner: u32,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    RoundedRectangle::new(
        Rectangle::new(top_left, Size::new(width, height)),
        CornerRadii::new(Size::new(corner, corner)),
    )
    .into_styled(PrimitiveStyle::with_fill(color))
    .draw(target)
}
