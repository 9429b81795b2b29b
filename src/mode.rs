//! Mode selection and the per-tick dispatch.
//!
//! The driver owns every face, clears the screen when the mode changes,
//! forwards the one-second tick to the active face, and runs the
//! half-second cosmetic tick (colon blink) where it applies. It knows
//! nothing about persistence; the caller saves the chosen mode itself.

use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
};
use log::info;

use crate::analog::{AnalogFace, UpdateOutcome};
use crate::clock::{CalendarSnapshot, TimeSnapshot};
use crate::digital::DigitalFace;
use crate::indicator::ConfigError;
use crate::pipboy::{PipBoyFace, PIP_GREEN};
use crate::rings::RingsFace;
use crate::theme::LedColor;
use crate::weather::{WeatherFace, WeatherSnapshot};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    ArcDigital,
    ArcAnalog,
    PipBoy,
    Rings,
    Weather,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::ArcDigital,
        Mode::ArcAnalog,
        Mode::PipBoy,
        Mode::Rings,
        Mode::Weather,
    ];

    pub fn next(self) -> Self {
        let index = (self.index() as usize + 1) % Self::ALL.len();
        Self::ALL[index]
    }

    pub fn prev(self) -> Self {
        let index = (self.index() as usize + Self::ALL.len() - 1) % Self::ALL.len();
        Self::ALL[index]
    }

    pub fn index(&self) -> u8 {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0) as u8
    }

    pub fn from_index(index: u8) -> Option<Mode> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::ArcDigital => "arc-digital",
            Mode::ArcAnalog => "arc-analog",
            Mode::PipBoy => "pip-boy",
            Mode::Rings => "rings",
            Mode::Weather => "weather",
        }
    }
}

pub struct ModeDriver {
    mode: Mode,
    accent: LedColor,
    digital: DigitalFace,
    analog: AnalogFace,
    pipboy: PipBoyFace,
    rings: RingsFace,
    weather: WeatherFace,
}

impl ModeDriver {
    pub fn new(
        center: Point,
        face_radius: u16,
        is_24h: bool,
        accent: LedColor,
        vertical_offset: i8,
    ) -> Result<Self, ConfigError> {
        // Only the digital readout honors the vertical-position setting;
        // the dials stay centered on the round panel.
        let readout_center = center + Point::new(0, vertical_offset as i32);
        Ok(Self {
            mode: Mode::ArcDigital,
            accent,
            digital: DigitalFace::new(readout_center, accent.tft(), Rgb565::BLACK),
            analog: AnalogFace::new(center, face_radius, accent.tft())?,
            pipboy: PipBoyFace::new(center),
            rings: RingsFace::new(center, is_24h)?,
            weather: WeatherFace::new(center, accent.tft())?,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn accent(&self) -> LedColor {
        self.accent
    }

    /// Accent color for on-screen elements. The Pip-Boy keeps its green
    /// regardless of the ring color choice.
    pub fn screen_accent(&self) -> Rgb565 {
        if self.mode == Mode::PipBoy {
            PIP_GREEN
        } else {
            self.accent.tft()
        }
    }

    pub fn set_accent(&mut self, accent: LedColor) {
        if self.accent == accent {
            return;
        }
        self.accent = accent;
        self.digital.set_text_color(accent.tft());
        self.analog.set_accent(accent.tft());
        self.weather.set_accent(accent.tft());
    }

    /// Switch faces: clear the panel, reset the incoming face and draw its
    /// first full frame.
    pub fn switch_to<D>(
        &mut self,
        mode: Mode,
        target: &mut D,
        time: &TimeSnapshot,
        calendar: &CalendarSnapshot,
        weather: Option<&WeatherSnapshot>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        info!("switching face: {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        match mode {
            Mode::ArcDigital => self.digital.reset(),
            Mode::ArcAnalog => self.analog.reset(),
            Mode::PipBoy => self.pipboy.reset(),
            Mode::Rings => self.rings.reset(),
            Mode::Weather => self.weather.reset(),
        }
        target.clear(Rgb565::BLACK)?;
        self.tick(target, time, calendar, weather)
    }

    /// One-second frame tick.
    pub fn tick<D>(
        &mut self,
        target: &mut D,
        time: &TimeSnapshot,
        calendar: &CalendarSnapshot,
        weather: Option<&WeatherSnapshot>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self.mode {
            Mode::ArcDigital => self.digital.update(target, time),
            Mode::ArcAnalog => {
                if self.analog.update(target, time)? == UpdateOutcome::NeedsFullRedraw {
                    self.analog.reset();
                    target.clear(Rgb565::BLACK)?;
                    self.analog.update(target, time)?;
                }
                Ok(())
            }
            Mode::PipBoy => self.pipboy.update(target, time, calendar),
            Mode::Rings => self.rings.update(target, time),
            Mode::Weather => self.weather.update(target, time, calendar, weather),
        }
    }

    /// Half-second cosmetic tick. Only the digital face animates here.
    pub fn cosmetic_tick<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        match self.mode {
            Mode::ArcDigital => self.digital.blink_colon(target),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::clock::Weekday;
    use crate::testsupport::Canvas;

    const CENTER: Point = Point::new(120, 120);

    fn driver() -> ModeDriver {
        ModeDriver::new(CENTER, 120, false, LedColor::Cyan, 0).unwrap()
    }

    fn at(h: u8, m: u8, s: u8) -> TimeSnapshot {
        TimeSnapshot {
            hours: h,
            minutes: m,
            seconds: s,
            is_24h: false,
        }
    }

    fn cal() -> CalendarSnapshot {
        CalendarSnapshot {
            day: 4,
            month: 8,
            year: 2026,
            weekday: Weekday::Tuesday,
        }
    }

    #[test]
    fn mode_cycling_wraps_both_ways() {
        let mut mode = Mode::ArcDigital;
        for _ in 0..Mode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, Mode::ArcDigital);
        assert_eq!(Mode::ArcDigital.prev(), Mode::Weather);
        for mode in Mode::ALL {
            assert_eq!(Mode::from_index(mode.index()), Some(mode));
        }
        assert_eq!(Mode::from_index(9), None);
    }

    #[test]
    fn switching_modes_redraws_from_scratch() {
        let mut canvas = Canvas::new(240, 240);
        let mut driver = driver();
        driver
            .tick(&mut canvas, &at(10, 15, 30), &cal(), None)
            .unwrap();

        driver
            .switch_to(Mode::Rings, &mut canvas, &at(10, 15, 30), &cal(), None)
            .unwrap();
        assert_eq!(driver.mode(), Mode::Rings);

        let mut fresh = Canvas::new(240, 240);
        let mut reference = ModeDriver::new(CENTER, 120, false, LedColor::Cyan, 0).unwrap();
        reference
            .switch_to(Mode::Rings, &mut fresh, &at(10, 15, 30), &cal(), None)
            .unwrap();
        assert!(canvas.pixels_eq(&fresh), "stale pixels from the old face");
    }

    #[test]
    fn analog_face_honors_its_refresh_request() {
        let mut canvas = Canvas::new(240, 240);
        let mut driver = driver();
        driver
            .switch_to(Mode::ArcAnalog, &mut canvas, &at(10, 14, 59), &cal(), None)
            .unwrap();

        // The five-minute mark triggers a clear + full redraw inside tick.
        driver
            .tick(&mut canvas, &at(10, 15, 0), &cal(), None)
            .unwrap();

        let mut fresh = Canvas::new(240, 240);
        let mut reference = ModeDriver::new(CENTER, 120, false, LedColor::Cyan, 0).unwrap();
        reference
            .switch_to(Mode::ArcAnalog, &mut fresh, &at(10, 15, 0), &cal(), None)
            .unwrap();
        assert!(canvas.pixels_eq(&fresh));
    }

    #[test]
    fn pipboy_screen_accent_stays_green() {
        let mut canvas = Canvas::new(240, 240);
        let mut driver = driver();
        assert_eq!(driver.screen_accent(), LedColor::Cyan.tft());
        driver
            .switch_to(Mode::PipBoy, &mut canvas, &at(10, 15, 30), &cal(), None)
            .unwrap();
        assert_eq!(driver.screen_accent(), PIP_GREEN);
    }

    #[test]
    fn cosmetic_tick_only_animates_the_digital_face() {
        let mut canvas = Canvas::new(240, 240);
        let mut driver = driver();
        driver
            .switch_to(Mode::Rings, &mut canvas, &at(10, 15, 30), &cal(), None)
            .unwrap();

        canvas.reset_writes();
        driver.cosmetic_tick(&mut canvas).unwrap();
        assert_eq!(canvas.writes, 0);

        driver
            .switch_to(Mode::ArcDigital, &mut canvas, &at(10, 15, 30), &cal(), None)
            .unwrap();
        canvas.reset_writes();
        driver.cosmetic_tick(&mut canvas).unwrap();
        assert!(canvas.writes > 0);
    }
}
