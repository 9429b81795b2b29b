//! Settings codec.
//!
//! The user's choices survive reboots as one comma-separated line:
//! `background,mode,vertical,color`. Encoding and parsing are pure; the
//! byte storage behind them (flash file, EEPROM) is a [`SettingsStore`]
//! implemented outside the core.

use core::fmt::Write;

use heapless::String;

use crate::mode::Mode;
use crate::theme::LedColor;

pub const MAX_LINE_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub background_index: u8,
    pub mode: Mode,
    pub vertical_position: i8,
    pub led_color: LedColor,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_index: 0,
            mode: Mode::ArcDigital,
            vertical_position: 0,
            led_color: LedColor::Blue,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsError {
    Empty,
    MissingField,
    BadNumber,
    UnknownMode,
    UnknownColor,
}

impl core::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SettingsError::Empty => write!(f, "settings line is empty"),
            SettingsError::MissingField => write!(f, "settings line is missing fields"),
            SettingsError::BadNumber => write!(f, "settings field is not a number"),
            SettingsError::UnknownMode => write!(f, "settings mode id out of range"),
            SettingsError::UnknownColor => write!(f, "settings color id out of range"),
        }
    }
}

impl Settings {
    pub fn encode(&self) -> String<MAX_LINE_LEN> {
        let mut line = String::new();
        // Four small integers always fit the bounded line.
        let _ = write!(
            line,
            "{},{},{},{}",
            self.background_index,
            self.mode.index(),
            self.vertical_position,
            self.led_color.index()
        );
        line
    }

    pub fn parse(line: &str) -> Result<Self, SettingsError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(SettingsError::Empty);
        }

        let mut fields = line.split(',');
        let mut next = || fields.next().map(str::trim).ok_or(SettingsError::MissingField);

        let background_index = next()?.parse::<u8>().map_err(|_| SettingsError::BadNumber)?;
        let mode_index = next()?.parse::<u8>().map_err(|_| SettingsError::BadNumber)?;
        let vertical_position = next()?.parse::<i8>().map_err(|_| SettingsError::BadNumber)?;
        let color_index = next()?.parse::<u8>().map_err(|_| SettingsError::BadNumber)?;

        Ok(Self {
            background_index,
            mode: Mode::from_index(mode_index).ok_or(SettingsError::UnknownMode)?,
            vertical_position,
            led_color: LedColor::from_index(color_index).ok_or(SettingsError::UnknownColor)?,
        })
    }
}

/// Byte storage boundary for the encoded settings line.
pub trait SettingsStore {
    type Error;

    /// Read the stored line, if any.
    fn load(&mut self, out: &mut String<MAX_LINE_LEN>) -> Result<bool, Self::Error>;

    /// Persist the line.
    fn save(&mut self, line: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn encode_parse_round_trip() {
        let settings = Settings {
            background_index: 3,
            mode: Mode::Rings,
            vertical_position: -2,
            led_color: LedColor::Purple,
        };
        let line = settings.encode();
        assert_eq!(Settings::parse(&line), Ok(settings));
    }

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        assert_eq!(
            Settings::parse(" 1, 0, 0, 2 \n"),
            Ok(Settings {
                background_index: 1,
                mode: Mode::ArcDigital,
                vertical_position: 0,
                led_color: LedColor::Green,
            })
        );
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(Settings::parse(""), Err(SettingsError::Empty));
        assert_eq!(Settings::parse("1,2,3"), Err(SettingsError::MissingField));
        assert_eq!(Settings::parse("a,0,0,0"), Err(SettingsError::BadNumber));
        assert_eq!(Settings::parse("0,9,0,0"), Err(SettingsError::UnknownMode));
        assert_eq!(Settings::parse("0,0,0,9"), Err(SettingsError::UnknownColor));
    }
}
