//! Activity-rings face: three concentric dials plus a digital hub.
//!
//! Hours on the inner ring, minutes in the middle, seconds outside, each
//! over a dimmed track of its own color. The hub reuses the digital face
//! for its readout.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::clock::TimeSnapshot;
use crate::digital::DigitalFace;
use crate::indicator::{ConfigError, Indicator, IndicatorSpec};

const HOURS_RING_RADIUS: u16 = 45;
const MINUTES_RING_RADIUS: u16 = 75;
const SECONDS_RING_RADIUS: u16 = 105;
const RING_THICKNESS: u16 = 16;

const HOURS_COLOR: Rgb565 = Rgb565::new(0, 39, 31); // 0x04FF
const MINUTES_COLOR: Rgb565 = Rgb565::new(0, 63, 0); // 0x07E0
const SECONDS_COLOR: Rgb565 = Rgb565::new(31, 0, 0); // 0xF800
const HOURS_TRACK: Rgb565 = Rgb565::new(0, 16, 25); // 0x0219
const MINUTES_TRACK: Rgb565 = Rgb565::new(0, 24, 0); // 0x0300
const SECONDS_TRACK: Rgb565 = Rgb565::new(8, 0, 0); // 0x4000

const HUB_TEXT: Rgb565 = Rgb565::new(31, 63, 31);
const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);

fn hours_spec(center: Point, is_24h: bool) -> IndicatorSpec {
    IndicatorSpec {
        center,
        radius: HOURS_RING_RADIUS,
        thickness: RING_THICKNESS,
        units_per_revolution: if is_24h { 24 } else { 12 },
        one_based: !is_24h,
        background: HOURS_TRACK,
        foreground: HOURS_COLOR,
    }
}

pub struct RingsFace {
    center: Point,
    hours_ring: Indicator,
    minutes_ring: Indicator,
    seconds_ring: Indicator,
    hub: DigitalFace,
    is_24h: bool,
}

impl RingsFace {
    pub fn new(center: Point, is_24h: bool) -> Result<Self, ConfigError> {
        let minutes_ring = Indicator::new(IndicatorSpec {
            center,
            radius: MINUTES_RING_RADIUS,
            thickness: RING_THICKNESS,
            units_per_revolution: 60,
            one_based: false,
            background: MINUTES_TRACK,
            foreground: MINUTES_COLOR,
        })?;
        let seconds_ring = Indicator::new(IndicatorSpec {
            center,
            radius: SECONDS_RING_RADIUS,
            thickness: RING_THICKNESS,
            units_per_revolution: 60,
            one_based: false,
            background: SECONDS_TRACK,
            foreground: SECONDS_COLOR,
        })?;
        Ok(Self {
            center,
            hours_ring: Indicator::new(hours_spec(center, is_24h))?,
            minutes_ring,
            seconds_ring,
            hub: DigitalFace::new(center, HUB_TEXT, BACKGROUND),
            is_24h,
        })
    }

    pub fn reset(&mut self) {
        self.hours_ring.reset();
        self.minutes_ring.reset();
        self.seconds_ring.reset();
        self.hub.reset();
    }

    pub fn update<D>(&mut self, target: &mut D, time: &TimeSnapshot) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if time.is_24h != self.is_24h {
            // Modulus swap; geometry stays the validated one.
            if let Ok(ring) = Indicator::new(hours_spec(self.center, time.is_24h)) {
                self.hours_ring = ring;
            }
            self.is_24h = time.is_24h;
        }

        let hour_value = if time.is_24h {
            time.hours as u16
        } else {
            time.display_hours() as u16
        };

        self.hours_ring.render(hour_value, target)?;
        self.minutes_ring.render(time.minutes as u16, target)?;
        self.seconds_ring.render(time.seconds as u16, target)?;
        self.hub.update(target, time)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::angle::polar_point;
    use crate::testsupport::Canvas;

    const CENTER: Point = Point::new(120, 120);

    fn at(h: u8, m: u8, s: u8, is_24h: bool) -> TimeSnapshot {
        TimeSnapshot {
            hours: h,
            minutes: m,
            seconds: s,
            is_24h,
        }
    }

    #[test]
    fn first_update_draws_all_three_tracks() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = RingsFace::new(CENTER, false).unwrap();
        face.update(&mut canvas, &at(10, 30, 45, false)).unwrap();

        assert!(canvas.count(HOURS_TRACK) > 0);
        assert!(canvas.count(MINUTES_TRACK) > 0);
        assert!(canvas.count(SECONDS_TRACK) > 0);
        assert!(canvas.count(HOURS_COLOR) > 0);
        assert!(canvas.count(MINUTES_COLOR) > 0);
        assert!(canvas.count(SECONDS_COLOR) > 0);
        assert!(canvas.count(HUB_TEXT) > 0);
    }

    #[test]
    fn unchanged_time_draws_nothing() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = RingsFace::new(CENTER, false).unwrap();
        face.update(&mut canvas, &at(10, 30, 45, false)).unwrap();

        canvas.reset_writes();
        face.update(&mut canvas, &at(10, 30, 45, false)).unwrap();
        assert_eq!(canvas.writes, 0);
    }

    #[test]
    fn minute_rollover_empties_minute_and_second_rings() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = RingsFace::new(CENTER, false).unwrap();
        face.update(&mut canvas, &at(10, 59, 59, false)).unwrap();
        assert!(canvas.count(MINUTES_COLOR) > 0);
        assert!(canvas.count(SECONDS_COLOR) > 0);

        face.update(&mut canvas, &at(11, 0, 0, false)).unwrap();
        assert_eq!(canvas.count(MINUTES_COLOR), 0);
        assert_eq!(canvas.count(SECONDS_COLOR), 0);
        // The hour ring meanwhile grew by one unit.
        assert!(canvas.count(HOURS_COLOR) > 0);
    }

    #[test]
    fn noon_fills_the_hour_ring_in_twelve_hour_display() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = RingsFace::new(CENTER, false).unwrap();
        face.update(&mut canvas, &at(11, 0, 0, false)).unwrap();
        face.update(&mut canvas, &at(12, 0, 0, false)).unwrap();

        for hour in 0..12 {
            let probe = polar_point(CENTER, HOURS_RING_RADIUS as f32, hour as f32 * 30.0 + 15.0);
            assert_eq!(canvas.get(probe.x, probe.y), HOURS_COLOR, "gap at {hour}");
        }
    }

    #[test]
    fn midnight_empties_the_hour_ring_in_twenty_four_hour_display() {
        let mut canvas = Canvas::new(240, 240);
        let mut face = RingsFace::new(CENTER, true).unwrap();
        face.update(&mut canvas, &at(0, 10, 0, true)).unwrap();
        assert_eq!(canvas.count(HOURS_COLOR), 0);
        assert!(canvas.count(HOURS_TRACK) > 0);
    }
}
