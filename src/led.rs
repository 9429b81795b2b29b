//! LED ring frame planning.
//!
//! The core only decides what the ring should show — a solid theme color,
//! or the white flash that fades back down after a mode switch. Pushing
//! frames down the wire is the driver's job.

use smart_leds::RGB8;

use crate::theme::LedColor;

/// Ring brightness while idling on the theme color.
pub const STANDING_BRIGHTNESS: u8 = 40;
/// Peak brightness of the flash pulse.
pub const FLASH_BRIGHTNESS: u8 = 150;
/// The fade stops here and the standing color takes over.
pub const FLASH_FLOOR: u8 = 10;
/// Delay between fade steps.
pub const FLASH_STEP_MS: u32 = 8;

/// Every pixel on the ring in the given theme color.
pub fn solid_frame<const N: usize>(color: LedColor) -> [RGB8; N] {
    [color.rgb(); N]
}

/// The white pulse frame the flash starts from.
pub fn flash_frame<const N: usize>() -> [RGB8; N] {
    [RGB8::new(250, 250, 250); N]
}

/// Brightness staircase of the flash effect, from the peak down to the
/// floor. The driver replays one step every [`FLASH_STEP_MS`].
pub fn flash_fade() -> impl Iterator<Item = u8> {
    (FLASH_FLOOR + 1..=FLASH_BRIGHTNESS).rev()
}
