//! Oscilloscope-visible diagnostics using spare GPIOs, feature-gated behind
//! `measurement` exactly as the teacher gates its `GPIOC` toggles.
//!
//! This totally circumvents all hardware ownership, same as the teacher's
//! version -- call [`init`] once, early, before anything else touches these
//! pins or the SIO block.
use rp2040_hal::pac;

/// Four GPIOs used as scope probes: ISR entry/exit on sig_a, free for future
/// use on sig_b/c/d (spec.md names no specific measurement pins, unlike its
/// fixed composite-output pin).
const SIG_A: u32 = 1 << 14;
const SIG_B: u32 = 1 << 15;
const SIG_C: u32 = 1 << 16;
const SIG_D: u32 = 1 << 17;

/// # Safety
/// Must run before interrupts are unmasked and before anything else
/// configures these GPIOs or the SIO block.
pub unsafe fn init() {
    let pads = &*pac::PADS_BANK0::ptr();
    let io = &*pac::IO_BANK0::ptr();

    for pin in [14u8, 15, 16, 17] {
        pads.gpio[pin as usize].modify(|_, w| w.ie().set_bit().od().clear_bit());
        io.gpio[pin as usize]
            .gpio_ctrl
            .write(|w| w.funcsel().sio());
    }

    let sio = &*pac::SIO::ptr();
    sio.gpio_oe_set
        .write(|w| w.bits(SIG_A | SIG_B | SIG_C | SIG_D));
}

fn set(mask: u32) {
    unsafe { (*pac::SIO::ptr()).gpio_out_set.write(|w| w.bits(mask)) }
}

fn clear(mask: u32) {
    unsafe { (*pac::SIO::ptr()).gpio_out_clr.write(|w| w.bits(mask)) }
}

pub fn sig_a_set() {
    set(SIG_A);
}

pub fn sig_a_clear() {
    clear(SIG_A);
}

pub fn sig_b_set() {
    set(SIG_B);
}

pub fn sig_b_clear() {
    clear(SIG_B);
}

pub fn sig_c_set() {
    set(SIG_C);
}

pub fn sig_c_clear() {
    clear(SIG_C);
}

pub fn sig_d_set() {
    set(SIG_D);
}

pub fn sig_d_clear() {
    clear(SIG_D);
}

/// Convenience pair used to bracket the DMA-completion ISR (`src/isr.rs`).
pub fn isr_enter() {
    sig_a_set();
}

pub fn isr_exit() {
    sig_a_clear();
}
