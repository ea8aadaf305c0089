//! Minimal platform bring-up: the peripheral acquisition and GPIO/watchdog
//! setup needed to reach a point where [`crate::clocks::init`] and
//! [`crate::engine::init`] can run.
//!
//! Platform bring-up proper (board-specific voltage sequencing, heartbeat
//! LEDs, external debug UARTs) is out of scope (spec.md Non-goals) and is
//! the responsibility of a real board's init code; this module carries just
//! enough ambient setup to produce a linkable, runnable image, in the shape
//! of the teacher's `main.rs`/`startup.rs` peripheral-acquisition step.
use rp2040_hal::gpio::{FunctionPwm, Pin, PullNone, Sio};
use rp2040_hal::pac::Peripherals;

use crate::timing::OUTPUT_PIN;

/// Takes the singleton peripherals. Panics (via `.unwrap()`) if called more
/// than once, matching the teacher's `device::Peripherals::take().unwrap()`
/// in `main.rs` -- there is no recovery from a double-take this early in
/// boot. The caller destructures the fields it needs for clock and engine
/// bring-up out of the result.
pub fn init() -> Peripherals {
    Peripherals::take().unwrap()
}

/// Configures GPIO 27 for PWM function, consuming the SIO/pads/bank0 GPIO
/// peripherals. Returns the typed pin [`crate::pwm::OutputPwm::init`] needs.
pub fn configure_output_pin(
    sio: rp2040_hal::pac::SIO,
    pads_bank0: rp2040_hal::pac::PADS_BANK0,
    io_bank0: rp2040_hal::pac::IO_BANK0,
    resets: &mut rp2040_hal::pac::RESETS,
) -> Pin<rp2040_hal::gpio::bank0::Gpio27, FunctionPwm, PullNone> {
    let pins = rp2040_hal::gpio::Pins::new(io_bank0, pads_bank0, Sio::new(sio).gpio_bank0, resets);
    debug_assert_eq!(OUTPUT_PIN, 27);
    pins.gpio27.into_function::<FunctionPwm>().into_pull_type()
}
