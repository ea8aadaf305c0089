//! PWM bring-up: the single slice/channel that turns composite sample values
//! into a one-bit (duty-cycle) DAC output on [`crate::timing::OUTPUT_PIN`].
//!
//! Grounded on the teacher's `vga::init` pixel-generation timer setup
//! (`TIM1` configured free-running, driving DMA via its update-DMA-request
//! bit) generalized from a free-running sample clock to a duty-cycle PWM
//! whose compare register *is* the video sample, and whose wrap interrupt
//! paces DMA the same way TIM1's DRQ did.
use rp2040_hal::gpio::bank0::Gpio27;
use rp2040_hal::gpio::{FunctionPwm, Pin, PullNone};
use rp2040_hal::pac::{PWM, RESETS};
use rp2040_hal::pwm::{FreeRunning, Pwm5, Slice, Slices};

use crate::timing::{PWM_CLKDIV_FRAC, PWM_CLKDIV_INT, PWM_TOP};

/// PWM slice number GPIO 27 is wired to on the RP2040's fixed GPIO-to-PWM
/// mapping (GPIO `2n+3` and `2n+11` both map to slice `n`, channel B).
pub const OUTPUT_SLICE: u8 = 5;

/// DMA data-request line for slice 5's wrap event (`DREQ_PWM_WRAP5` in the
/// RP2040 datasheet's DREQ table: `DREQ_PWM_WRAP0 + slice number`).
pub const OUTPUT_DREQ: u8 = OUTPUT_SLICE;

/// GPIO 27 is driven by PWM slice 5, channel B.
pub struct OutputPwm {
    slice: Slice<Pwm5, FreeRunning>,
    _pin: Pin<Gpio27, FunctionPwm, PullNone>,
}

impl OutputPwm {
    /// Configures slice 5 channel B for [`PWM_TOP`]/[`PWM_CLKDIV_INT`] and
    /// leaves it disabled until [`OutputPwm::enable`] is called, so DMA and
    /// interrupt plumbing can be armed first (spec.md section 6 bring-up
    /// ordering).
    pub fn init(
        pwm_dev: PWM,
        resets: &mut RESETS,
        output_pin: Pin<Gpio27, FunctionPwm, PullNone>,
    ) -> Self {
        let slices = Slices::new(pwm_dev, resets);
        let mut slice = slices.pwm5;
        slice.set_div_int(PWM_CLKDIV_INT);
        slice.set_div_frac(PWM_CLKDIV_FRAC);
        slice.set_top(PWM_TOP);
        slice.channel_b.output_to(&output_pin);
        slice.channel_b.set_duty(0);

        OutputPwm {
            slice,
            _pin: output_pin,
        }
    }

    /// Writes the next sample's duty cycle directly. Used by bring-up
    /// diagnostics and host-independent smoke tests that don't go through
    /// DMA; the steady-state video path writes this same register via
    /// [`crate::dma`] instead.
    pub fn set_sample(&mut self, sample: u16) {
        self.slice.channel_b.set_duty(sample);
    }

    pub fn enable(&mut self) {
        self.slice.enable();
    }

    pub fn disable(&mut self) {
        self.slice.disable();
    }

    /// Address of the upper halfword of slice 5's `CC` register (channel
    /// B's compare value), the DMA write target for composite samples. A
    /// 16-bit DMA transfer here leaves channel A's halfword of the same
    /// register untouched. Read directly off the PWM block's base address
    /// plus the per-slice register stride, matching this crate's
    /// raw-register approach to DMA chaining (DESIGN.md: `src/dma.rs`).
    pub fn duty_register_address() -> u32 {
        const PWM_BASE: u32 = 0x4005_0000;
        const SLICE_STRIDE: u32 = 0x14;
        const CC_OFFSET: u32 = 0x0c;
        const CHANNEL_B_HALFWORD: u32 = 2;
        PWM_BASE + OUTPUT_SLICE as u32 * SLICE_STRIDE + CC_OFFSET + CHANNEL_B_HALFWORD
    }
}
