//! Analog face: hour markers, two hands, seconds ring at the rim.
//!
//! Hands update by painting the old hand in the background color with a
//! fat stroke, then drawing the new one. The seconds ring is a regular
//! incremental dial. Every five minutes the face asks the driver for a
//! full repaint to clean up accumulated erase fringes.

use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
};

use crate::angle::{hand_point, hour_hand_angle, minute_hand_angle};
use crate::clock::TimeSnapshot;
use crate::indicator::{ConfigError, Indicator, IndicatorSpec};

const HOUR_HAND_COLOR: Rgb565 = Rgb565::WHITE;
const MINUTE_HAND_COLOR: Rgb565 = Rgb565::new(31, 63, 0); // bright yellow
const MARKER_COLOR: Rgb565 = Rgb565::new(0, 63, 31); // cyan
const CENTER_DOT_COLOR: Rgb565 = Rgb565::new(0, 63, 31);
const BACKGROUND: Rgb565 = Rgb565::BLACK;

const RING_THICKNESS: u16 = 4;
const ERASE_STROKE: u32 = 5;

/// What the driver should do after an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Done,
    /// Incremental updates have drifted enough; clear and reinitialize.
    NeedsFullRedraw,
}

struct Hand {
    color: Rgb565,
    length: f32,
    shown: Option<(f32, Point)>,
}

impl Hand {
    fn new(color: Rgb565, length: f32) -> Self {
        Self {
            color,
            length,
            shown: None,
        }
    }

    fn update<D>(&mut self, target: &mut D, center: Point, angle: f32) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if let Some((shown_angle, tip)) = self.shown {
            if shown_angle == angle {
                return Ok(false);
            }
            // Overpaint the old hand with a wide background stroke.
            Line::new(center, tip)
                .into_styled(PrimitiveStyle::with_stroke(BACKGROUND, ERASE_STROKE))
                .draw(target)?;
        }

        let tip = hand_point(center, self.length, angle);
        Line::new(center, tip)
            .into_styled(PrimitiveStyle::with_stroke(self.color, 1))
            .draw(target)?;
        self.shown = Some((angle, tip));
        Ok(true)
    }
}

pub struct AnalogFace {
    center: Point,
    face_radius: u16,
    seconds_ring: Indicator,
    hour_hand: Hand,
    minute_hand: Hand,
    initialized: bool,
}

impl AnalogFace {
    pub fn new(center: Point, face_radius: u16, accent: Rgb565) -> Result<Self, ConfigError> {
        let ring = Indicator::new(IndicatorSpec {
            center,
            radius: face_radius - RING_THICKNESS / 2,
            thickness: RING_THICKNESS,
            units_per_revolution: 60,
            one_based: false,
            background: BACKGROUND,
            foreground: accent,
        })?;
        Ok(Self {
            center,
            face_radius,
            seconds_ring: ring,
            hour_hand: Hand::new(HOUR_HAND_COLOR, face_radius as f32 * 0.5),
            minute_hand: Hand::new(MINUTE_HAND_COLOR, face_radius as f32 * 0.7),
            initialized: false,
        })
    }

    pub fn reset(&mut self) {
        self.seconds_ring.reset();
        self.hour_hand.shown = None;
        self.minute_hand.shown = None;
        self.initialized = false;
    }

    pub fn set_accent(&mut self, accent: Rgb565) {
        self.seconds_ring.set_foreground(accent);
    }

    pub fn update<D>(
        &mut self,
        target: &mut D,
        time: &TimeSnapshot,
    ) -> Result<UpdateOutcome, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.initialized && time.seconds == 0 && time.minutes % 5 == 0 {
            return Ok(UpdateOutcome::NeedsFullRedraw);
        }

        if !self.initialized {
            self.draw_markers(target)?;
            self.initialized = true;
        }

        self.seconds_ring.render(time.seconds as u16, target)?;

        let minute_angle = minute_hand_angle(time.minutes, time.seconds);
        let hour_angle = hour_hand_angle(time.hours, time.minutes);
        let minute_moved = self.minute_hand.update(target, self.center, minute_angle)?;
        let hour_moved = self.hour_hand.update(target, self.center, hour_angle)?;

        if minute_moved || hour_moved {
            // Erasing a hand wipes the hub; put the dot back.
            Circle::with_center(self.center, 10)
                .into_styled(PrimitiveStyle::with_fill(CENTER_DOT_COLOR))
                .draw(target)?;
        }

        Ok(UpdateOutcome::Done)
    }

    fn draw_markers<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let distance = self.face_radius as f32 * 0.95;
        for hour in 0..12 {
            let dot = hand_point(self.center, distance, hour as f32 * 30.0);
            Circle::with_center(dot, 6)
                .into_styled(PrimitiveStyle::with_fill(MARKER_COLOR))
                .draw(target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testsupport::Canvas;

    const CENTER: Point = Point::new(120, 120);
    const ACCENT: Rgb565 = Rgb565::RED;

    fn face() -> AnalogFace {
        AnalogFace::new(CENTER, 120, ACCENT).unwrap()
    }

    fn at(h: u8, m: u8, s: u8) -> TimeSnapshot {
        TimeSnapshot {
            hours: h,
            minutes: m,
            seconds: s,
            is_24h: true,
        }
    }

    #[test]
    fn first_update_draws_markers_hands_and_ring() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        assert_eq!(
            face.update(&mut canvas, &at(10, 12, 30)).unwrap(),
            UpdateOutcome::Done
        );
        assert!(canvas.count(MARKER_COLOR) > 0);
        assert!(canvas.count(HOUR_HAND_COLOR) > 0);
        assert!(canvas.count(MINUTE_HAND_COLOR) > 0);
        assert!(canvas.count(ACCENT) > 0);
    }

    #[test]
    fn unchanged_time_draws_nothing() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        face.update(&mut canvas, &at(10, 12, 30)).unwrap();

        canvas.reset_writes();
        face.update(&mut canvas, &at(10, 12, 30)).unwrap();
        assert_eq!(canvas.writes, 0);
    }

    #[test]
    fn a_tick_is_far_cheaper_than_a_full_draw() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        face.update(&mut canvas, &at(10, 12, 30)).unwrap();
        let full_draw = canvas.writes;

        canvas.reset_writes();
        face.update(&mut canvas, &at(10, 12, 31)).unwrap();
        assert!(canvas.writes > 0);
        assert!(
            canvas.writes < full_draw / 2,
            "tick drew {} of {}",
            canvas.writes,
            full_draw
        );
    }

    #[test]
    fn five_minute_mark_requests_a_full_redraw() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        face.update(&mut canvas, &at(10, 14, 59)).unwrap();
        assert_eq!(
            face.update(&mut canvas, &at(10, 15, 0)).unwrap(),
            UpdateOutcome::NeedsFullRedraw
        );
    }

    #[test]
    fn seconds_rollover_clears_the_ring() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = face();
        face.update(&mut canvas, &at(10, 13, 59)).unwrap();
        assert!(canvas.count(ACCENT) > 0);

        face.update(&mut canvas, &at(10, 14, 0)).unwrap();
        assert_eq!(canvas.count(ACCENT), 0);
    }
}
