//! In-memory draw target for unit tests.

extern crate std;

use std::vec;
use std::vec::Vec;

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::*,
    Pixel,
};

/// A plain RGB565 framebuffer that also counts every pixel write, so tests
/// can assert "this call drew nothing" as well as compare final images.
pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Rgb565>,
    pub writes: u64,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; (width * height) as usize],
            writes: 0,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Rgb565 {
        assert!(x >= 0 && x < self.width && y >= 0 && y < self.height);
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    pub fn pixels_eq(&self, other: &Canvas) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }

    pub fn reset_writes(&mut self) {
        self.writes = 0;
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0 && point.x < self.width && point.y >= 0 && point.y < self.height {
                self.pixels[(point.y * self.width + point.x) as usize] = color;
                self.writes += 1;
            }
        }
        Ok(())
    }
}
