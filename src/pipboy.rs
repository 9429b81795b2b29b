//! Pip-Boy face: green-on-black terminal look.
//!
//! Weekday and date up top, stacked hours/minutes with small seconds and
//! AM/PM beside them, branding footer, and the mascot on the left. The
//! mascot is a static primitive drawing unless the caller animates the
//! figure region through the scanline boundary.

use core::fmt::Write as _;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text},
};
use heapless::String;

use crate::clock::{CalendarSnapshot, TimeSnapshot};

pub const PIP_GREEN: Rgb565 = Rgb565::new(0, 63, 0);
const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);

const FIGURE_X: i32 = 75;
const FIGURE_Y: i32 = 100;
const TIME_X: i32 = 120;
const TIME_Y: i32 = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Shown {
    weekday: &'static str,
    day: u8,
    month: u8,
    year: u16,
    display_hours: u8,
    minutes: u8,
    seconds: u8,
    pm: bool,
}

pub struct PipBoyFace {
    center: Point,
    shown: Option<Shown>,
}

impl PipBoyFace {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            shown: None,
        }
    }

    pub fn reset(&mut self) {
        self.shown = None;
    }

    /// Screen region the animated mascot may be blitted into.
    pub fn figure_region(&self) -> Rectangle {
        Rectangle::new(Point::new(FIGURE_X - 40, FIGURE_Y - 20), Size::new(80, 90))
    }

    pub fn update<D>(
        &mut self,
        target: &mut D,
        time: &TimeSnapshot,
        calendar: &CalendarSnapshot,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let now = Shown {
            weekday: calendar.weekday.name(),
            day: calendar.day,
            month: calendar.month,
            year: calendar.year,
            display_hours: time.display_hours(),
            minutes: time.minutes,
            seconds: time.seconds,
            pm: time.is_pm(),
        };
        let shown = self.shown;

        if shown.is_none() {
            self.draw_static_figure(target)?;
            self.draw_footer(target)?;
        }

        if shown.map(|s| s.weekday) != Some(now.weekday) {
            self.draw_centered_cell(target, 25, now.weekday)?;
        }

        if shown.map(|s| (s.day, s.month, s.year)) != Some((now.day, now.month, now.year)) {
            let mut date: String<12> = String::new();
            let _ = write!(date, "{:02}.{:02}.{:04}", now.day, now.month, now.year);
            self.draw_centered_cell(target, 50, &date)?;
        }

        if shown.map(|s| s.display_hours) != Some(now.display_hours) {
            let mut text: String<4> = String::new();
            let _ = write!(text, "{:02}", now.display_hours);
            draw_cell(target, Point::new(TIME_X, TIME_Y), &FONT_10X20, 2, &text)?;
        }

        if shown.map(|s| s.seconds) != Some(now.seconds) {
            let mut text: String<4> = String::new();
            let _ = write!(text, "{:02}", now.seconds);
            draw_cell(target, Point::new(TIME_X + 25, TIME_Y + 5), &FONT_6X10, 2, &text)?;
        }

        if shown.map(|s| s.minutes) != Some(now.minutes) {
            let mut text: String<4> = String::new();
            let _ = write!(text, "{:02}", now.minutes);
            draw_cell(target, Point::new(TIME_X, TIME_Y + 25), &FONT_10X20, 2, &text)?;
        }

        if shown.map(|s| s.pm) != Some(now.pm) {
            let text = if now.pm { "PM" } else { "AM" };
            draw_cell(target, Point::new(TIME_X + 25, TIME_Y + 35), &FONT_6X10, 2, text)?;
        }

        self.shown = Some(now);
        Ok(())
    }

    fn draw_centered_cell<D>(&self, target: &mut D, y: i32, text: &str) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Rectangle::new(Point::new(self.center.x - 70, y), Size::new(140, 20))
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(target)?;
        let style = MonoTextStyle::new(&FONT_10X20, PIP_GREEN);
        Text::with_text_style(
            text,
            Point::new(self.center.x, y),
            style,
            embedded_graphics::text::TextStyleBuilder::new()
                .alignment(Alignment::Center)
                .baseline(Baseline::Top)
                .build(),
        )
        .draw(target)?;
        Ok(())
    }

    fn draw_footer<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.draw_centered_cell(target, 180, "PIP-BOY 3000")?;
        self.draw_centered_cell(target, 200, "ROBCO IND")
    }

    /// Fallback mascot when no animation source is attached.
    fn draw_static_figure<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let fill = PrimitiveStyle::with_fill(PIP_GREEN);
        let ink = PrimitiveStyle::with_fill(BACKGROUND);
        let stroke = PrimitiveStyle::with_stroke(PIP_GREEN, 1);

        // Head with eyes and a flat mouth.
        Circle::with_center(Point::new(FIGURE_X, FIGURE_Y), 30)
            .into_styled(fill)
            .draw(target)?;
        Circle::with_center(Point::new(FIGURE_X - 5, FIGURE_Y - 3), 4)
            .into_styled(ink)
            .draw(target)?;
        Circle::with_center(Point::new(FIGURE_X + 5, FIGURE_Y - 3), 4)
            .into_styled(ink)
            .draw(target)?;
        Line::new(
            Point::new(FIGURE_X - 5, FIGURE_Y + 5),
            Point::new(FIGURE_X + 5, FIGURE_Y + 5),
        )
        .into_styled(PrimitiveStyle::with_stroke(BACKGROUND, 1))
        .draw(target)?;

        // Body, arms, legs.
        Rectangle::new(Point::new(FIGURE_X - 10, FIGURE_Y + 15), Size::new(20, 30))
            .into_styled(fill)
            .draw(target)?;
        Line::new(
            Point::new(FIGURE_X - 10, FIGURE_Y + 20),
            Point::new(FIGURE_X - 20, FIGURE_Y + 30),
        )
        .into_styled(stroke)
        .draw(target)?;
        Line::new(
            Point::new(FIGURE_X + 10, FIGURE_Y + 20),
            Point::new(FIGURE_X + 20, FIGURE_Y + 30),
        )
        .into_styled(stroke)
        .draw(target)?;
        Line::new(
            Point::new(FIGURE_X - 5, FIGURE_Y + 45),
            Point::new(FIGURE_X - 5, FIGURE_Y + 65),
        )
        .into_styled(stroke)
        .draw(target)?;
        Line::new(
            Point::new(FIGURE_X + 5, FIGURE_Y + 45),
            Point::new(FIGURE_X + 5, FIGURE_Y + 65),
        )
        .into_styled(stroke)
        .draw(target)?;
        Ok(())
    }
}

fn draw_cell<D>(
    target: &mut D,
    origin: Point,
    font: &embedded_graphics::mono_font::MonoFont<'_>,
    columns: u32,
    text: &str,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let cell = Rectangle::new(
        origin,
        Size::new(
            columns * font.character_size.width,
            font.character_size.height,
        ),
    );
    cell.into_styled(PrimitiveStyle::with_fill(BACKGROUND))
        .draw(target)?;
    let style = MonoTextStyle::new(font, PIP_GREEN);
    Text::with_baseline(text, origin, style, Baseline::Top).draw(target)?;
    Ok(())
}
