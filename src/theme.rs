//! LED palette and per-background color preferences.
//!
//! The ring color is a user choice cycled with a button. Each background
//! asset remembers the color that was active when it was last shown, so
//! cycling backgrounds restores the matching ring color.

use embedded_graphics::pixelcolor::{raw::RawU16, Rgb565};
use heapless::{String, Vec};
use log::info;
use smart_leds::RGB8;

/// The selectable ring colors. Each carries the LED RGB value and the
/// matching panel color for on-screen accents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedColor {
    Blue,
    Red,
    Green,
    Yellow,
    Cyan,
    Purple,
    White,
}

impl LedColor {
    pub const ALL: [LedColor; 7] = [
        LedColor::Blue,
        LedColor::Red,
        LedColor::Green,
        LedColor::Yellow,
        LedColor::Cyan,
        LedColor::Purple,
        LedColor::White,
    ];

    pub fn rgb(&self) -> RGB8 {
        match self {
            LedColor::Blue => RGB8::new(0, 20, 255),
            LedColor::Red => RGB8::new(255, 0, 0),
            LedColor::Green => RGB8::new(0, 255, 50),
            LedColor::Yellow => RGB8::new(255, 255, 0),
            LedColor::Cyan => RGB8::new(0, 255, 255),
            LedColor::Purple => RGB8::new(180, 0, 255),
            LedColor::White => RGB8::new(255, 255, 255),
        }
    }

    /// Panel color used for the seconds ring and other accents.
    pub fn tft(&self) -> Rgb565 {
        let raw = match self {
            LedColor::Blue => 0x051F,
            LedColor::Red => 0xF800,
            LedColor::Green => 0x07E0,
            LedColor::Yellow => 0xFFE0,
            LedColor::Cyan => 0x07FF,
            LedColor::Purple => 0xC01F,
            LedColor::White => 0xFFFF,
        };
        Rgb565::from(RawU16::new(raw))
    }

    pub fn name(&self) -> &'static str {
        match self {
            LedColor::Blue => "Blue",
            LedColor::Red => "Red",
            LedColor::Green => "Green",
            LedColor::Yellow => "Yellow",
            LedColor::Cyan => "Cyan",
            LedColor::Purple => "Purple",
            LedColor::White => "White",
        }
    }

    pub fn index(&self) -> u8 {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0) as u8
    }

    pub fn from_index(index: u8) -> Option<LedColor> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn cycle(&self) -> LedColor {
        let next = (self.index() as usize + 1) % Self::ALL.len();
        Self::ALL[next]
    }
}

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_MAPPINGS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
struct ColorEntry {
    name: String<MAX_NAME_LEN>,
    color: LedColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryOutcome {
    Added,
    Updated,
    Unchanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryError {
    NameTooLong,
    TableFull,
}

impl core::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemoryError::NameTooLong => write!(f, "background name too long"),
            MemoryError::TableFull => write!(f, "color preference table full"),
        }
    }
}

/// Bounded background-name → ring-color table with a line-oriented codec.
/// The persistence backend only ever sees the encoded text.
#[derive(Default)]
pub struct ColorMemory {
    entries: Vec<ColorEntry, MAX_MAPPINGS>,
}

impl ColorMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<LedColor> {
        self.entries
            .iter()
            .find(|e| e.name.as_str() == name)
            .map(|e| e.color)
    }

    pub fn remember(&mut self, name: &str, color: LedColor) -> Result<MemoryOutcome, MemoryError> {
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(MemoryError::NameTooLong);
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.name.as_str() == name) {
            if entry.color == color {
                return Ok(MemoryOutcome::Unchanged);
            }
            entry.color = color;
            info!("updated ring color for '{name}' to {}", color.name());
            return Ok(MemoryOutcome::Updated);
        }

        let mut stored = String::new();
        stored.push_str(name).map_err(|_| MemoryError::NameTooLong)?;
        self.entries
            .push(ColorEntry {
                name: stored,
                color,
            })
            .map_err(|_| MemoryError::TableFull)?;
        info!("remembered ring color for '{name}': {}", color.name());
        Ok(MemoryOutcome::Added)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Encode as `name,index` lines for the settings store.
    pub fn encode<const N: usize>(&self, out: &mut String<N>) -> Result<(), MemoryError> {
        use core::fmt::Write;
        for entry in &self.entries {
            writeln!(out, "{},{}", entry.name, entry.color.index())
                .map_err(|_| MemoryError::TableFull)?;
        }
        Ok(())
    }

    /// Rebuild from encoded text. Malformed lines are skipped, matching the
    /// tolerant load behavior of the settings file.
    pub fn decode(text: &str) -> Self {
        let mut memory = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((name, index)) = line.rsplit_once(',') else {
                continue;
            };
            let Ok(index) = index.trim().parse::<u8>() else {
                continue;
            };
            let Some(color) = LedColor::from_index(index) else {
                continue;
            };
            let _ = memory.remember(name, color);
        }
        memory
    }
}

/// Strip any directory prefix from an asset path.
pub fn file_stem(path: &str) -> &str {
    match path.rfind('/') {
        Some(slash) if slash + 1 < path.len() => &path[slash + 1..],
        Some(_) => "",
        None => path,
    }
}
