//! Multi-mode clock firmware
//! ========================================
//! needs to be run in WSL2 terminal
//! source ~/export-esp.sh
//! ========================================
//!
//! Round GC9A01 TFT + addressable LED ring. One button cycles the clock
//! face, the other cycles the ring color. Time free-runs from the software
//! clock until an external time source adjusts it.

//% CHIPS: esp32s3
//% FEATURES: esp-hal/unstable

#![no_std]
#![no_main]

// Define the application description, which is placed in a special section of the binary.
// This is used by the bootloader to verify the application.
esp_bootloader_esp_idf::esp_app_desc!();

use arc_clock::{
    assets::Catalog,
    clock::{CalendarSnapshot, SoftwareClock, TimeSnapshot, Weekday},
    display::{setup_display, SpinDelay, CENTER, FACE_RADIUS},
    input::{handle_button, ButtonState},
    led::{flash_fade, flash_frame, solid_frame, FLASH_STEP_MS, STANDING_BRIGHTNESS},
    mode::ModeDriver,
    settings::Settings,
    theme::{file_stem, ColorMemory},
    wiring::init_board_pins,
};

// Core imports
use core::cell::{Cell, RefCell};
use core::sync::atomic::{AtomicBool, Ordering};
use critical_section::Mutex;
use esp_backtrace as _;

use embedded_graphics::prelude::Point;

// ESP-HAL imports
use esp_hal::{
    handler, main, ram,
    rmt::Rmt,
    time::Rate,
    timer::systimer::{SystemTimer, Unit},
    Config,
};
use esp_hal_smartled::{smart_led_buffer, SmartLedsAdapter};

use embedded_hal::delay::DelayNs;
use log::{info, warn};
use smart_leds::{brightness, gamma, SmartLedsWrite};

const LED_COUNT: usize = 16;
const DEBOUNCE_MS: u64 = 240;
const TICK_MS: u64 = 1_000;
const BLINK_MS: u64 = 500;

// Backgrounds flashed alongside the firmware; the filesystem enumeration
// that would normally feed this list lives outside the core.
const BACKGROUNDS: [&str; 5] = [
    "/hulk.jpg",
    "/ironman00.jpg",
    "/matrix.gif",
    "/weather_sun.jpg",
    "/vaultboy.gif",
];

static MODE_PRESSED: AtomicBool = AtomicBool::new(false);
static COLOR_PRESSED: AtomicBool = AtomicBool::new(false);

static BTN_MODE: ButtonState<'static> = ButtonState {
    input: Mutex::new(RefCell::new(None)),
    last_level: Mutex::new(Cell::new(true)),
    last_interrupt: Mutex::new(Cell::new(0)),
    name: "ModeButton",
};

static BTN_COLOR: ButtonState<'static> = ButtonState {
    input: Mutex::new(RefCell::new(None)),
    last_level: Mutex::new(Cell::new(true)),
    last_interrupt: Mutex::new(Cell::new(0)),
    name: "ColorButton",
};

#[ram]
static mut DISPLAY_BUF: [u8; 1024] = [0; 1024];

fn now_ms() -> u64 {
    let t = SystemTimer::unit_value(Unit::Unit0);
    t.saturating_mul(1000) / SystemTimer::ticks_per_second()
}

// Interrupt handler
#[handler]
#[ram]
fn handler() {
    let now = now_ms();
    handle_button(&BTN_MODE, now, DEBOUNCE_MS, || {
        MODE_PRESSED.store(true, Ordering::Relaxed);
    });
    handle_button(&BTN_COLOR, now, DEBOUNCE_MS, || {
        COLOR_PRESSED.store(true, Ordering::Relaxed);
    });
}

#[main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();

    let peripherals = esp_hal::init(Config::default());
    let (mut io, pins, rmt_periph, led_pin) = init_board_pins(peripherals);

    // Stash button pins for the interrupt handler
    critical_section::with(|cs| {
        BTN_MODE.input.borrow_ref_mut(cs).replace(pins.btn_mode);
        BTN_MODE.last_level.borrow(cs).set(true);
        BTN_COLOR.input.borrow_ref_mut(cs).replace(pins.btn_color);
        BTN_COLOR.last_level.borrow(cs).set(true);
    });
    io.set_interrupt_handler(handler);

    // Safe because DISPLAY_BUF is only used here
    let mut display = unsafe { setup_display(pins.display_pins, &mut *core::ptr::addr_of_mut!(DISPLAY_BUF)) };

    // LED ring on the RMT peripheral
    let rmt = Rmt::new(rmt_periph, Rate::from_mhz(80)).unwrap();
    let mut ring = SmartLedsAdapter::new(rmt.channel0, led_pin, smart_led_buffer!(LED_COUNT));

    // Free-running clock until something better syncs it
    let mut clock = SoftwareClock::new(
        TimeSnapshot {
            hours: 12,
            minutes: 0,
            seconds: 0,
            is_24h: false,
        },
        CalendarSnapshot {
            day: 1,
            month: 1,
            year: 2026,
            weekday: Weekday::Thursday,
        },
    );

    // Classify backgrounds once; the settings index points into this order.
    let catalog = Catalog::build(BACKGROUNDS);
    let mut settings = Settings::default();
    let mut color_memory = ColorMemory::new();

    // Restore the ring color remembered for the active background
    if let Some(asset) = catalog.get(settings.background_index as usize) {
        if let Some(color) = color_memory.lookup(file_stem(&asset.name)) {
            settings.led_color = color;
        }
    }

    let mut driver = ModeDriver::new(
        Point::new(CENTER, CENTER),
        FACE_RADIUS,
        false,
        settings.led_color,
        settings.vertical_position,
    )
    .expect("face geometry is statically valid");

    let time = clock.time();
    let calendar = clock.calendar();
    driver
        .switch_to(settings.mode, &mut display, &time, &calendar, None)
        .unwrap_or_else(|_| warn!("initial draw failed"));

    let frame: [_; LED_COUNT] = solid_frame(settings.led_color);
    ring.write(brightness(gamma(frame.iter().cloned()), STANDING_BRIGHTNESS))
        .ok();

    let mut next_tick = now_ms() + TICK_MS;
    let mut next_blink = now_ms() + BLINK_MS;

    loop {
        let now = now_ms();

        // Mode button: next face, white flash, note the new settings line
        if MODE_PRESSED.swap(false, Ordering::Acquire) {
            let mode = driver.mode().next();
            let time = clock.time();
            let calendar = clock.calendar();
            driver
                .switch_to(mode, &mut display, &time, &calendar, None)
                .unwrap_or_else(|_| warn!("face switch draw failed"));
            settings.mode = mode;
            // The settings store collaborator persists this line.
            info!("settings: {}", settings.encode());

            let mut delay = SpinDelay;
            let white: [_; LED_COUNT] = flash_frame();
            for level in flash_fade() {
                ring.write(brightness(gamma(white.iter().cloned()), level)).ok();
                delay.delay_ms(FLASH_STEP_MS);
            }
            let frame: [_; LED_COUNT] = solid_frame(settings.led_color);
            ring.write(brightness(gamma(frame.iter().cloned()), STANDING_BRIGHTNESS))
                .ok();
        }

        // Color button: cycle the palette and remember it per background
        if COLOR_PRESSED.swap(false, Ordering::Acquire) {
            settings.led_color = settings.led_color.cycle();
            driver.set_accent(settings.led_color);
            if let Some(asset) = catalog.get(settings.background_index as usize) {
                if let Err(e) = color_memory.remember(file_stem(&asset.name), settings.led_color) {
                    warn!("color preference not stored: {e}");
                }
            }
            info!("settings: {}", settings.encode());

            let frame: [_; LED_COUNT] = solid_frame(settings.led_color);
            ring.write(brightness(gamma(frame.iter().cloned()), STANDING_BRIGHTNESS))
                .ok();
        }

        // One-second frame tick
        if now >= next_tick {
            next_tick += TICK_MS;
            clock.tick();
            let time = clock.time();
            let calendar = clock.calendar();
            driver
                .tick(&mut display, &time, &calendar, None)
                .unwrap_or_else(|_| warn!("frame tick draw failed"));
        }

        // Half-second cosmetic tick (blinking colon)
        if now >= next_blink {
            next_blink += BLINK_MS;
            driver
                .cosmetic_tick(&mut display)
                .unwrap_or_else(|_| warn!("cosmetic tick draw failed"));
        }
    }
}
