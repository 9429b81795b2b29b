// This module handles board-specific pin mappings and initialization.
//! The following wiring is assumed:
//! - MODE BUTTON => GPIO15
//! - COLOR BUTTON => GPIO21
//! - LED RING DATA => GPIO1
//! - LCD CS => GPIO9, D/C => GPIO8, RST => GPIO14, BL => GPIO2
//! - LCD SCK => GPIO10, MOSI => GPIO11 (SPI2)
//! - GND => GND, 3.3V => 3.3V
//! Buttons connect to GND when pressed (internal pull-ups enabled).

use esp_backtrace as _;
use esp_hal::gpio::{Event, Input, InputConfig, Io, Level, Output, OutputConfig, Pull};
use esp_hal::peripherals::{Peripherals, GPIO1, GPIO10, GPIO11, RMT, SPI2};

pub struct DisplayPins<'a> {
    pub spi2: SPI2<'a>,
    pub spi_sck: GPIO10<'a>,
    pub spi_mosi: GPIO11<'a>,
    pub lcd_cs: Output<'a>,
    pub lcd_dc: Output<'a>,
    pub lcd_rst: Output<'a>,
    pub lcd_bl: Output<'a>,
}

pub struct BoardPins<'a> {
    pub btn_mode: Input<'a>,
    pub btn_color: Input<'a>,
    pub display_pins: DisplayPins<'a>,
}

pub fn init_board_pins<'a>(p: Peripherals) -> (Io<'a>, BoardPins<'a>, RMT<'a>, GPIO1<'a>) {
    let io = Io::new(p.IO_MUX);

    // buttons
    let mut btn_mode = Input::new(p.GPIO15, InputConfig::default().with_pull(Pull::Up));
    let mut btn_color = Input::new(p.GPIO21, InputConfig::default().with_pull(Pull::Up));
    btn_mode.listen(Event::AnyEdge);
    btn_color.listen(Event::AnyEdge);

    // LCD control pins — do NOT touch GPIO10/11 here (SPI SCK/MOSI)
    let lcd_cs = Output::new(p.GPIO9, Level::High, OutputConfig::default());
    let lcd_dc = Output::new(p.GPIO8, Level::Low, OutputConfig::default());
    let lcd_rst = Output::new(p.GPIO14, Level::High, OutputConfig::default());
    let lcd_bl = Output::new(p.GPIO2, Level::High, OutputConfig::default());

    let display_pins = DisplayPins {
        spi2: p.SPI2,
        spi_sck: p.GPIO10,
        spi_mosi: p.GPIO11,
        lcd_cs,
        lcd_dc,
        lcd_rst,
        lcd_bl,
    };

    (
        io,
        BoardPins {
            btn_mode,
            btn_color,
            display_pins,
        },
        p.RMT,
        p.GPIO1,
    )
}
