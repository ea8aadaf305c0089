//! Entry point: bring up the platform, the clocks, and the engine, then
//! hand off to the DMA-completion interrupt for the rest of the program's
//! life.
//!
//! Shaped like the teacher's `main.rs`: acquire peripherals, call into the
//! mode-specific bring-up module, start output, spin forever. The
//! framebuffer-filling content producer is out of scope (spec.md Non-goals:
//! "the framebuffer content-producer thread") -- `FRAMEBUFFER` below is a
//! static placeholder standing in for it, just enough to produce a
//! runnable, linkable image.
#![no_std]
#![no_main]

#[cfg(feature = "defmt-logging")]
use defmt_rtt as _;
#[cfg(feature = "defmt-logging")]
use panic_probe as _;
#[cfg(feature = "panic-halt")]
use panic_halt as _;

use cortex_m_rt::entry;
use rp2040_hal::pac;
use rp2040_hal::Watchdog;

/// The RP2040's second-stage bootloader, placed by the linker script at the
/// start of flash so the ROM bootloader can hand off execution to us.
#[link_section = ".boot2"]
#[used]
pub static BOOT2: [u8; 256] = rp2040_boot2::BOOT_LOADER_GENERIC_03H;

use ntsc_tv::armv7m;
use ntsc_tv::bringup;
use ntsc_tv::clocks;
use ntsc_tv::engine;
#[cfg(feature = "measurement")]
use ntsc_tv::measurement;
use ntsc_tv::palette::Palette;
use ntsc_tv::timing::FRAMEBUFFER_LEN;

/// Placeholder for the framebuffer an external content-producer thread
/// would otherwise own and continuously update (out of scope here). Held
/// at index 0 (black, per [`Palette::blank`]/[`Palette::load_canonical`]
/// slot 0) so a real image still has a well-defined all-black picture
/// before any producer exists.
static mut FRAMEBUFFER: [u8; FRAMEBUFFER_LEN] = [0; FRAMEBUFFER_LEN];

#[entry]
fn main() -> ! {
    #[cfg(feature = "measurement")]
    unsafe {
        measurement::init();
    }

    let pac::Peripherals {
        WATCHDOG,
        XOSC,
        CLOCKS,
        PLL_SYS,
        PLL_USB,
        mut RESETS,
        SIO,
        PADS_BANK0,
        IO_BANK0,
        PWM,
        DMA,
        ..
    } = bringup::init();

    let mut watchdog = Watchdog::new(WATCHDOG);

    let _clocks = clocks::init(XOSC, CLOCKS, PLL_SYS, PLL_USB, &mut RESETS, &mut watchdog)
        .expect("clock bring-up must hit the exact NTSC system clock");

    let output_pin = bringup::configure_output_pin(SIO, PADS_BANK0, IO_BANK0, &mut RESETS);

    let framebuffer: &'static [u8; FRAMEBUFFER_LEN] = unsafe { &*core::ptr::addr_of!(FRAMEBUFFER) };
    let palette = Palette::load_canonical();

    engine::init(PWM, DMA, &mut RESETS, output_pin, framebuffer, palette);

    critical_section::with(|cs| {
        let mut engine_ref = engine::ENGINE.borrow(cs).borrow_mut();
        engine_ref
            .as_mut()
            .expect("engine::init just installed it")
            .start();
    });

    unsafe {
        armv7m::enable_irq(pac::Interrupt::DMA_IRQ_0);
    }

    loop {
        cortex_m::asm::wfi();
    }
}
