//! Clock bring-up: crystal oscillator plus a system PLL tuned to exactly
//! [`crate::timing::SYSTEM_CLOCK_HZ`].
//!
//! `rp2040-hal`'s `clocks::init_clocks_and_plls` hard-codes a 125MHz system
//! PLL config, which is the right default for almost everything except a
//! design that derives its sample clock directly from the system clock.
//! Mirrors the teacher's `configure_clocks` in spirit -- turn on the crystal,
//! program the PLL from a `ClockConfig` value, verify lock -- but built from
//! `rp2040-hal`'s PLL/clocks primitives instead of raw `RCC`/`FLASH` register
//! pokes, since those primitives already encode the required ramp-up order.
use fugit::RateExtU32;
use rp2040_hal::clocks::{Clock, ClocksManager};
use rp2040_hal::pac::{CLOCKS, PLL_SYS, PLL_USB, RESETS, XOSC};
use rp2040_hal::pll::{setup_pll_blocking, Error as PllError, PLLConfig};
use rp2040_hal::xosc::{setup_xosc_blocking, Error as XoscError};
use rp2040_hal::Watchdog;

use crate::timing::{ClockConfig as NtscClockConfig, NTSC_CLOCK_CONFIG, SYSTEM_CLOCK_HZ};

/// Why clock bring-up failed. Fatal in every case: nothing downstream of this
/// (PWM, DMA, the generator) can run correctly on the wrong clock.
#[derive(Debug)]
pub enum ClockError {
    Xosc(XoscError),
    Pll(PllError),
    /// A downstream clock (reference, system, usb, adc, rtc, peripheral)
    /// failed to configure off its source.
    Clock(rp2040_hal::clocks::ClockError),
    /// The PLL locked, but not at the frequency this design requires.
    FrequencyMismatch { expected_hz: u32, actual_hz: u32 },
}

impl From<XoscError> for ClockError {
    fn from(e: XoscError) -> Self {
        ClockError::Xosc(e)
    }
}

impl From<PllError> for ClockError {
    fn from(e: PllError) -> Self {
        ClockError::Pll(e)
    }
}

impl From<rp2040_hal::clocks::ClockError> for ClockError {
    fn from(e: rp2040_hal::clocks::ClockError) -> Self {
        ClockError::Clock(e)
    }
}

/// Brings up the crystal oscillator and system/USB PLLs, verifying the
/// system clock lands on exactly [`SYSTEM_CLOCK_HZ`] (spec.md section 6: "any
/// deviation ... must be rejected").
pub fn init(
    xosc_dev: XOSC,
    clocks_dev: CLOCKS,
    pll_sys_dev: PLL_SYS,
    pll_usb_dev: PLL_USB,
    resets: &mut RESETS,
    watchdog: &mut Watchdog,
) -> Result<ClocksManager, ClockError> {
    let xosc = setup_xosc_blocking(xosc_dev, NTSC_CLOCK_CONFIG.xtal_hz.Hz())?;

    watchdog.enable_tick_generation((NTSC_CLOCK_CONFIG.xtal_hz / 1_000_000) as u8);

    let mut clocks = ClocksManager::new(clocks_dev);

    let pll_sys = setup_pll_blocking(
        pll_sys_dev,
        xosc.operating_frequency(),
        pll_config(&NTSC_CLOCK_CONFIG),
        &mut clocks,
        resets,
    )?;

    // The USB PLL stays at its conventional 48MHz; nothing in this engine
    // drives USB, but rp2040-hal's `ClocksManager` wants every clock source
    // initialized before `resus_chip` / peripheral clocks can be configured.
    let pll_usb = setup_pll_blocking(
        pll_usb_dev,
        xosc.operating_frequency(),
        rp2040_hal::pll::common_configs::PLL_USB_48MHZ,
        &mut clocks,
        resets,
    )?;

    clocks
        .reference_clock
        .configure_clock(&xosc, xosc.operating_frequency())
        .map_err(ClockError::Clock)?;
    clocks
        .system_clock
        .configure_clock(&pll_sys, pll_sys.get_freq())
        .map_err(ClockError::Clock)?;
    clocks
        .usb_clock
        .configure_clock(&pll_usb, pll_usb.get_freq())
        .map_err(ClockError::Clock)?;
    clocks
        .adc_clock
        .configure_clock(&xosc, xosc.operating_frequency())
        .map_err(ClockError::Clock)?;
    clocks
        .rtc_clock
        .configure_clock(&xosc, xosc.operating_frequency())
        .map_err(ClockError::Clock)?;
    clocks
        .peripheral_clock
        .configure_clock(&clocks.system_clock, clocks.system_clock.freq())
        .map_err(ClockError::Clock)?;

    let actual_hz = clocks.system_clock.freq().to_Hz();
    if actual_hz != SYSTEM_CLOCK_HZ {
        #[cfg(feature = "defmt-logging")]
        defmt::error!(
            "clocks: system clock locked at {=u32}Hz, needed exactly {=u32}Hz -- NTSC chroma \
             phase would drift, refusing to proceed",
            actual_hz,
            SYSTEM_CLOCK_HZ
        );
        return Err(ClockError::FrequencyMismatch {
            expected_hz: SYSTEM_CLOCK_HZ,
            actual_hz,
        });
    }

    #[cfg(feature = "defmt-logging")]
    defmt::info!("clocks: system clock locked at exactly {=u32}Hz", actual_hz);

    Ok(clocks)
}

fn pll_config(cfg: &NtscClockConfig) -> PLLConfig {
    PLLConfig {
        vco_freq: (cfg.xtal_hz / cfg.refdiv as u32 * cfg.vco_feedback_div as u32).Hz(),
        refdiv: cfg.refdiv,
        post_div1: cfg.post_div1,
        post_div2: cfg.post_div2,
    }
}
