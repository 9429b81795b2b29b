//! Button input handling.
//!
//! Two buttons drive the clock: one cycles the face, one cycles the ring
//! color. State is shared between the GPIO interrupt and the main loop
//! through `critical_section`, the interrupt only sets event flags.

use esp_backtrace as _;

use core::cell::{Cell, RefCell};
use critical_section::Mutex;

use esp_hal::gpio::Input;

pub struct ButtonState<'a> {
    pub input: Mutex<RefCell<Option<Input<'a>>>>,
    pub last_level: Mutex<Cell<bool>>,
    pub last_interrupt: Mutex<Cell<u64>>,
    pub name: &'static str,
}

/// Debounced falling-edge handler; `on_press` runs from interrupt context.
pub fn handle_button(btn: &ButtonState, now_ms: u64, debounce_ms: u64, on_press: impl Fn()) {
    critical_section::with(|cs| {
        let mut btn_binding = btn.input.borrow_ref_mut(cs);
        let Some(input) = btn_binding.as_mut() else {
            return;
        };

        // Check if interrupt is actually pending
        if !input.is_interrupt_set() {
            return;
        }
        input.clear_interrupt();

        // Debounce logic: check for falling edge and time since last event
        let level_is_low = input.is_low();
        let last_high = btn.last_level.borrow(cs).get();
        btn.last_level.borrow(cs).set(!level_is_low);

        if last_high && level_is_low {
            // Falling edge detected
            let last_debounce = btn.last_interrupt.borrow(cs).get();
            if now_ms.saturating_sub(last_debounce) > debounce_ms {
                btn.last_interrupt.borrow(cs).set(now_ms);
                on_press();
            }
        }
    });
}
