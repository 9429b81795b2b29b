//! Incremental progress dial.
//!
//! One `Indicator` owns the repaint bookkeeping for a single ring or hand
//! track: it remembers the last value it drew and only touches the pixels
//! between the old and new sweep ends. Rollovers and backward jumps fall
//! back to repainting the full background track. This is the flicker
//! optimization every clock face shares.
//!
//! A value of 0 always renders as an empty dial. A full revolution is only
//! ever produced by the top value of a one-based dial (an hour ring whose
//! top reads "12"); the 12-hour remap happens before any angle math.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use log::warn;

use crate::angle::{end_angle, TOP_ANGLE_DEG};
use crate::arc::draw_arc;

/// Geometry and colors of one dial. Immutable once the indicator exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorSpec {
    pub center: Point,
    pub radius: u16,
    pub thickness: u16,
    /// Dial modulus: 12, 24 or 60.
    pub units_per_revolution: u16,
    /// `true` for dials whose top value is the modulus itself (hour dial
    /// in 12-hour display, domain `1..=12`); `false` for `0..modulus`.
    pub one_based: bool,
    pub background: Rgb565,
    pub foreground: Rgb565,
}

impl IndicatorSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.radius == 0 {
            return Err(ConfigError::ZeroRadius);
        }
        if self.units_per_revolution == 0 {
            return Err(ConfigError::ZeroUnits);
        }
        if self.thickness > self.radius {
            return Err(ConfigError::ThicknessExceedsRadius {
                radius: self.radius,
                thickness: self.thickness,
            });
        }
        Ok(())
    }

    fn min_value(&self) -> u16 {
        if self.one_based {
            1
        } else {
            0
        }
    }

    fn max_value(&self) -> u16 {
        if self.one_based {
            self.units_per_revolution
        } else {
            self.units_per_revolution - 1
        }
    }
}

/// Rejected dial geometry. Raised at construction so a bad spec stops mode
/// initialization instead of rendering garbage every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroRadius,
    ZeroUnits,
    ThicknessExceedsRadius { radius: u16, thickness: u16 },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroRadius => write!(f, "dial radius must be nonzero"),
            ConfigError::ZeroUnits => write!(f, "dial modulus must be nonzero"),
            ConfigError::ThicknessExceedsRadius { radius, thickness } => write!(
                f,
                "dial thickness {thickness} exceeds radius {radius}"
            ),
        }
    }
}

/// One dial instance. `previous == None` is the uninitialized state; the
/// first render paints the full track.
#[derive(Debug)]
pub struct Indicator {
    spec: IndicatorSpec,
    previous: Option<u16>,
}

impl Indicator {
    pub fn new(spec: IndicatorSpec) -> Result<Self, ConfigError> {
        spec.validate()?;
        Ok(Self {
            spec,
            previous: None,
        })
    }

    pub fn spec(&self) -> &IndicatorSpec {
        &self.spec
    }

    /// Forget the displayed state; the next render repaints the track.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Swap the sweep color. Forces a full repaint since the pixels on
    /// screen still carry the old color.
    pub fn set_foreground(&mut self, color: Rgb565) {
        self.spec.foreground = color;
        self.previous = None;
    }

    /// Draw whatever changed since the last call.
    pub fn render<D>(&mut self, value: u16, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let value = self.clamp(value);

        match self.previous {
            None => {
                self.draw_track(target)?;
                self.draw_sweep_from_top(value, target)?;
            }
            Some(previous) if value == previous => {}
            Some(previous) if self.is_rollover(previous, value) => {
                // Reset-to-empty: the zero instant shows the bare track.
                self.draw_track(target)?;
            }
            Some(previous) if value < previous => {
                // Backward jump (manual adjustment): start the sweep over.
                self.draw_track(target)?;
                self.draw_sweep_from_top(value, target)?;
            }
            Some(previous) => {
                self.draw_foreground(
                    end_angle(previous, self.spec.units_per_revolution),
                    end_angle(value, self.spec.units_per_revolution),
                    target,
                )?;
            }
        }

        self.previous = Some(value);
        Ok(())
    }

    fn is_rollover(&self, previous: u16, value: u16) -> bool {
        !self.spec.one_based && value == 0 && previous == self.spec.units_per_revolution - 1
    }

    fn clamp(&self, value: u16) -> u16 {
        let lo = self.spec.min_value();
        let hi = self.spec.max_value();
        if value < lo {
            warn!("dial value {value} below domain, clamping to {lo}");
            lo
        } else if value > hi {
            warn!("dial value {value} outside modulus, clamping to {hi}");
            hi
        } else {
            value
        }
    }

    fn draw_track<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        draw_arc(
            target,
            self.spec.center,
            self.spec.radius,
            self.spec.thickness,
            TOP_ANGLE_DEG,
            TOP_ANGLE_DEG + 360.0,
            self.spec.background,
        )
    }

    fn draw_sweep_from_top<D>(&self, value: u16, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let end = end_angle(value, self.spec.units_per_revolution);
        if end <= TOP_ANGLE_DEG {
            return Ok(());
        }
        self.draw_foreground(TOP_ANGLE_DEG, end, target)
    }

    fn draw_foreground<D>(&self, start: f32, end: f32, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        draw_arc(
            target,
            self.spec.center,
            self.spec.radius,
            self.spec.thickness,
            start,
            end,
            self.spec.foreground,
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;
    use crate::angle::polar_point;
    use crate::testsupport::Canvas;

    const CENTER: Point = Point::new(120, 120);
    const FG: Rgb565 = Rgb565::RED;
    const BG: Rgb565 = Rgb565::new(8, 0, 0);

    fn seconds_spec() -> IndicatorSpec {
        IndicatorSpec {
            center: CENTER,
            radius: 105,
            thickness: 16,
            units_per_revolution: 60,
            one_based: false,
            background: BG,
            foreground: FG,
        }
    }

    fn hour_spec() -> IndicatorSpec {
        IndicatorSpec {
            units_per_revolution: 12,
            one_based: true,
            radius: 45,
            ..seconds_spec()
        }
    }

    #[test]
    fn bad_geometry_is_rejected_at_construction() {
        let mut spec = seconds_spec();
        spec.thickness = spec.radius + 1;
        assert!(matches!(
            Indicator::new(spec),
            Err(ConfigError::ThicknessExceedsRadius { .. })
        ));

        spec = seconds_spec();
        spec.radius = 0;
        assert_eq!(Indicator::new(spec).unwrap_err(), ConfigError::ZeroRadius);

        spec = seconds_spec();
        spec.units_per_revolution = 0;
        assert_eq!(Indicator::new(spec).unwrap_err(), ConfigError::ZeroUnits);
    }

    #[test]
    fn first_render_paints_track_and_sweep() {
        let mut canvas = Canvas::new(240, 240);
        let mut dial = Indicator::new(seconds_spec()).unwrap();
        dial.render(30, &mut canvas).unwrap();

        assert!(canvas.count(BG) > 0);
        assert!(canvas.count(FG) > 0);
        // Sweep covers the right half (12 through 6 o'clock), not the left.
        let three = polar_point(CENTER, 105.0, 0.0);
        let nine = polar_point(CENTER, 105.0, 180.0);
        assert_eq!(canvas.get(three.x, three.y), FG);
        assert_eq!(canvas.get(nine.x, nine.y), BG);
    }

    #[test]
    fn first_render_of_zero_is_track_only() {
        let mut canvas = Canvas::new(240, 240);
        let mut dial = Indicator::new(seconds_spec()).unwrap();
        dial.render(0, &mut canvas).unwrap();

        assert!(canvas.count(BG) > 0);
        assert_eq!(canvas.count(FG), 0);
    }

    #[test]
    fn repeated_value_draws_nothing() {
        let mut canvas = Canvas::new(240, 240);
        let mut dial = Indicator::new(seconds_spec()).unwrap();
        dial.render(17, &mut canvas).unwrap();

        canvas.reset_writes();
        dial.render(17, &mut canvas).unwrap();
        assert_eq!(canvas.writes, 0);
    }

    #[test]
    fn forward_progress_touches_only_the_new_segment() {
        let mut canvas = Canvas::new(240, 240);
        let mut dial = Indicator::new(seconds_spec()).unwrap();
        dial.render(17, &mut canvas).unwrap();

        canvas.reset_writes();
        dial.render(18, &mut canvas).unwrap();
        assert!(canvas.writes > 0);

        // One 6° annulus segment at r=105, t=16 is a few hundred pixels;
        // a track repaint would be tens of thousands.
        assert!(canvas.writes < 2_000, "drew {} pixels", canvas.writes);
    }

    #[test]
    fn rollover_clears_back_to_a_fresh_track() {
        let mut rolled = Canvas::new(240, 240);
        let mut dial = Indicator::new(seconds_spec()).unwrap();
        dial.render(58, &mut rolled).unwrap();
        dial.render(59, &mut rolled).unwrap();
        dial.render(0, &mut rolled).unwrap();

        let mut fresh = Canvas::new(240, 240);
        let mut reference = Indicator::new(seconds_spec()).unwrap();
        reference.render(0, &mut fresh).unwrap();

        assert_eq!(rolled.count(FG), 0, "full-circle sweep drawn at zero");
        assert!(rolled.pixels_eq(&fresh));
    }

    #[test]
    fn backward_jump_restarts_the_sweep() {
        let mut jumped = Canvas::new(240, 240);
        let mut dial = Indicator::new(seconds_spec()).unwrap();
        dial.render(45, &mut jumped).unwrap();
        dial.render(10, &mut jumped).unwrap();

        let mut fresh = Canvas::new(240, 240);
        let mut reference = Indicator::new(seconds_spec()).unwrap();
        reference.render(10, &mut fresh).unwrap();

        assert!(jumped.pixels_eq(&fresh), "residue from the old sweep");
    }

    #[test]
    fn twelve_hour_dial_fills_at_twelve_and_restarts_at_one() {
        let mut canvas = Canvas::new(240, 240);
        let mut dial = Indicator::new(hour_spec()).unwrap();
        dial.render(11, &mut canvas).unwrap();
        dial.render(12, &mut canvas).unwrap();

        // Full revolution: every direction at mid-radius is foreground.
        for hour in 0..12 {
            let probe = polar_point(CENTER, 45.0, hour as f32 * 30.0 + 15.0);
            assert_eq!(canvas.get(probe.x, probe.y), FG, "gap at hour {hour}");
        }

        dial.render(1, &mut canvas).unwrap();
        let mut fresh = Canvas::new(240, 240);
        let mut reference = Indicator::new(hour_spec()).unwrap();
        reference.render(1, &mut fresh).unwrap();
        assert!(canvas.pixels_eq(&fresh));
    }

    #[test]
    fn out_of_range_value_clamps_to_the_dial_edge() {
        let mut clamped = Canvas::new(240, 240);
        let mut dial = Indicator::new(seconds_spec()).unwrap();
        dial.render(60, &mut clamped).unwrap();

        let mut fresh = Canvas::new(240, 240);
        let mut reference = Indicator::new(seconds_spec()).unwrap();
        reference.render(59, &mut fresh).unwrap();

        assert!(clamped.pixels_eq(&fresh));
    }

    #[test]
    fn reset_forces_a_full_repaint() {
        let mut canvas = Canvas::new(240, 240);
        let mut dial = Indicator::new(seconds_spec()).unwrap();
        dial.render(20, &mut canvas).unwrap();

        dial.reset();
        canvas.reset_writes();
        dial.render(20, &mut canvas).unwrap();
        assert!(canvas.writes > 10_000, "expected a track repaint");
    }
}
