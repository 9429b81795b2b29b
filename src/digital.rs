//! Digital readout face.
//!
//! HH:MM in the large font with seconds above and AM/PM below, each glyph
//! group living in its own cell. A cell is repainted only when its text
//! changes, so a normal tick touches just the seconds cell and the blink
//! tick touches just the colon. The backdrop behind the cells (solid fill
//! or a decoded image) belongs to the caller; the face repaints cells with
//! its own background color.

use core::fmt::Write as _;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use heapless::String;

use crate::clock::TimeSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Shown {
    display_hours: u8,
    minutes: u8,
    seconds: u8,
    pm: bool,
    is_24h: bool,
}

pub struct DigitalFace {
    center: Point,
    text_color: Rgb565,
    cell_background: Rgb565,
    shown: Option<Shown>,
    colon_visible: bool,
    colon_shown: Option<bool>,
}

impl DigitalFace {
    pub fn new(center: Point, text_color: Rgb565, cell_background: Rgb565) -> Self {
        Self {
            center,
            text_color,
            cell_background,
            shown: None,
            colon_visible: true,
            colon_shown: None,
        }
    }

    /// Forget everything drawn; the next update repaints every cell.
    pub fn reset(&mut self) {
        self.shown = None;
        self.colon_shown = None;
        self.colon_visible = true;
    }

    pub fn set_text_color(&mut self, color: Rgb565) {
        if self.text_color != color {
            self.text_color = color;
            self.shown = None;
            self.colon_shown = None;
        }
    }

    fn hours_cell(&self) -> Rectangle {
        Rectangle::new(self.center + Point::new(-25, -10), Size::new(20, 20))
    }

    fn colon_cell(&self) -> Rectangle {
        Rectangle::new(self.center + Point::new(-5, -10), Size::new(10, 20))
    }

    fn minutes_cell(&self) -> Rectangle {
        Rectangle::new(self.center + Point::new(5, -10), Size::new(20, 20))
    }

    fn seconds_cell(&self) -> Rectangle {
        Rectangle::new(self.center + Point::new(-6, -30), Size::new(12, 10))
    }

    fn meridiem_cell(&self) -> Rectangle {
        Rectangle::new(self.center + Point::new(-6, 16), Size::new(12, 10))
    }

    /// Repaint whichever cells changed since the last call.
    pub fn update<D>(&mut self, target: &mut D, time: &TimeSnapshot) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let now = Shown {
            display_hours: time.display_hours(),
            minutes: time.minutes,
            seconds: time.seconds,
            pm: time.is_pm(),
            is_24h: time.is_24h,
        };

        // A 12/24-hour flip invalidates the whole layout.
        let shown = match self.shown {
            Some(s) if s.is_24h == now.is_24h => Some(s),
            _ => None,
        };

        if shown.map(|s| s.seconds) != Some(now.seconds) {
            let mut text: String<4> = String::new();
            let _ = write!(text, "{:02}", now.seconds);
            self.draw_cell(target, self.seconds_cell(), &FONT_6X10, &text)?;
        }

        if shown.map(|s| s.display_hours) != Some(now.display_hours) {
            let mut text: String<4> = String::new();
            let _ = write!(text, "{:02}", now.display_hours);
            self.draw_cell(target, self.hours_cell(), &FONT_10X20, &text)?;
        }

        if shown.map(|s| s.minutes) != Some(now.minutes) {
            let mut text: String<4> = String::new();
            let _ = write!(text, "{:02}", now.minutes);
            self.draw_cell(target, self.minutes_cell(), &FONT_10X20, &text)?;
        }

        if !now.is_24h && (shown.map(|s| s.pm) != Some(now.pm)) {
            let text = if now.pm { "PM" } else { "AM" };
            self.draw_cell(target, self.meridiem_cell(), &FONT_6X10, text)?;
        }
        if now.is_24h && shown.is_none() {
            // Clear a stale AM/PM left over from 12-hour display.
            self.fill_cell(target, self.meridiem_cell())?;
        }

        if self.colon_shown != Some(self.colon_visible) {
            self.draw_colon(target)?;
        }

        self.shown = Some(now);
        Ok(())
    }

    /// Half-second cosmetic tick: toggle the colon and repaint only its cell.
    pub fn blink_colon<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.colon_visible = !self.colon_visible;
        self.draw_colon(target)
    }

    fn draw_colon<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.colon_visible {
            self.draw_cell(target, self.colon_cell(), &FONT_10X20, ":")?;
        } else {
            self.fill_cell(target, self.colon_cell())?;
        }
        self.colon_shown = Some(self.colon_visible);
        Ok(())
    }

    fn fill_cell<D>(&self, target: &mut D, cell: Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        cell.into_styled(PrimitiveStyle::with_fill(self.cell_background))
            .draw(target)
    }

    fn draw_cell<D>(
        &self,
        target: &mut D,
        cell: Rectangle,
        font: &embedded_graphics::mono_font::MonoFont<'_>,
        text: &str,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.fill_cell(target, cell)?;
        let style = MonoTextStyle::new(font, self.text_color);
        Text::with_baseline(text, cell.top_left, style, Baseline::Top).draw(target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;
    use crate::testsupport::Canvas;

    const CENTER: Point = Point::new(120, 120);
    const TEXT: Rgb565 = Rgb565::CYAN;
    const BACK: Rgb565 = Rgb565::new(0, 0, 10);

    fn face() -> DigitalFace {
        DigitalFace::new(CENTER, TEXT, BACK)
    }

    fn at(h: u8, m: u8, s: u8) -> TimeSnapshot {
        TimeSnapshot {
            hours: h,
            minutes: m,
            seconds: s,
            is_24h: false,
        }
    }

    fn cell_pixels(canvas: &Canvas, cell: Rectangle) -> Vec<Rgb565> {
        let mut pixels = Vec::new();
        for y in 0..cell.size.height as i32 {
            for x in 0..cell.size.width as i32 {
                pixels.push(canvas.get(cell.top_left.x + x, cell.top_left.y + y));
            }
        }
        pixels
    }

    #[test]
    fn first_update_paints_all_cells() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        face.update(&mut canvas, &at(10, 15, 30)).unwrap();
        assert!(canvas.count(TEXT) > 0);
        assert!(canvas.count(BACK) > 0);
    }

    #[test]
    fn unchanged_time_draws_nothing() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        face.update(&mut canvas, &at(10, 15, 30)).unwrap();

        canvas.reset_writes();
        face.update(&mut canvas, &at(10, 15, 30)).unwrap();
        assert_eq!(canvas.writes, 0);
    }

    #[test]
    fn minute_change_leaves_the_hours_cell_alone() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        face.update(&mut canvas, &at(10, 15, 30)).unwrap();

        let hours_before = cell_pixels(&canvas, face.hours_cell());
        let minutes_before = cell_pixels(&canvas, face.minutes_cell());
        face.update(&mut canvas, &at(10, 16, 30)).unwrap();

        assert_eq!(hours_before, cell_pixels(&canvas, face.hours_cell()));
        assert_ne!(minutes_before, cell_pixels(&canvas, face.minutes_cell()));
    }

    #[test]
    fn seconds_tick_touches_only_the_seconds_cell() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        face.update(&mut canvas, &at(10, 15, 30)).unwrap();

        canvas.reset_writes();
        face.update(&mut canvas, &at(10, 15, 31)).unwrap();
        let cell = face.seconds_cell();
        let budget = (cell.size.width * cell.size.height * 2) as u64;
        assert!(canvas.writes > 0);
        assert!(canvas.writes <= budget, "drew {} pixels", canvas.writes);
    }

    #[test]
    fn colon_blink_round_trips_the_canvas() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        face.update(&mut canvas, &at(10, 15, 30)).unwrap();

        let mut blinked = Canvas::new(240, 240);
        let mut reference = DigitalFace::new(CENTER, TEXT, BACK);
        reference.update(&mut blinked, &at(10, 15, 30)).unwrap();

        face.blink_colon(&mut canvas).unwrap();
        assert!(!canvas.pixels_eq(&blinked));
        face.blink_colon(&mut canvas).unwrap();
        assert!(canvas.pixels_eq(&blinked));
    }

    #[test]
    fn midnight_reads_twelve_in_twelve_hour_display() {
        let mut twelve = Canvas::new(240, 240);
        let mut face_a = face();
        face_a.update(&mut twelve, &at(0, 0, 0)).unwrap();

        let mut noon = Canvas::new(240, 240);
        let mut face_b = face();
        face_b.update(&mut noon, &at(12, 0, 0)).unwrap();

        // Same "12:00" glyphs; only the AM/PM cell differs.
        assert_eq!(
            cell_pixels(&twelve, face_a.hours_cell()),
            cell_pixels(&noon, face_b.hours_cell())
        );
        assert_ne!(
            cell_pixels(&twelve, face_a.meridiem_cell()),
            cell_pixels(&noon, face_b.meridiem_cell())
        );
    }
}
