//! Top-level engine: owns the two sample buffers, the generator state, the
//! palette, and the DMA/PWM bring-up, and wires them together behind one
//! shared cell the interrupt handler can reach.
//!
//! Plays the role of the teacher's `Vga` struct / `vga::init` return value,
//! but collapses the teacher's several free-standing statics
//! (`NEXT_XFER`, `LINE`, `TIMING`, `HSTATE_HW`) into a single `Engine` value
//! behind one `critical_section::Mutex`, per spec.md section 9's own
//! suggested redesign (DESIGN.md open question 5).
use core::cell::RefCell;

use critical_section::Mutex;
use rp2040_hal::gpio::bank0::Gpio27;
use rp2040_hal::gpio::{FunctionPwm, Pin, PullNone};
use rp2040_hal::pac::{DMA, PWM, RESETS};

use crate::dma::{Half, PingPong};
use crate::generator::{self, GeneratorState};
use crate::palette::Palette;
use crate::pwm::{OutputPwm, OUTPUT_DREQ};
use crate::timing::{FRAMEBUFFER_LEN, SAMPLES_PER_LINE};

/// The two ping-pong sample buffers. `'static` and fixed-address, since the
/// DMA controller holds pointers into them for the engine's entire
/// lifetime -- the same constraint the teacher's `GLOBAL_SCANOUT_BUFFER`
/// static exists to satisfy.
static mut BUF_A: [u16; SAMPLES_PER_LINE] = [0; SAMPLES_PER_LINE];
static mut BUF_B: [u16; SAMPLES_PER_LINE] = [0; SAMPLES_PER_LINE];

/// The engine's live state, reachable from the DMA-completion interrupt.
pub struct Engine {
    pwm: OutputPwm,
    dma: PingPong,
    state: GeneratorState,
    palette: Palette,
    framebuffer: &'static [u8; FRAMEBUFFER_LEN],
}

/// Global engine handle. `None` until [`start`] runs; the ISR is only
/// unmasked after that, so it can never observe `None`.
pub static ENGINE: Mutex<RefCell<Option<Engine>>> = Mutex::new(RefCell::new(None));

/// Brings up PWM and DMA and installs `framebuffer`/`palette`, but does not
/// yet enable the PWM slice or unmask the DMA interrupt -- call
/// [`Engine::start`] (via [`start`]) once the caller is ready for output to
/// begin.
pub fn init(
    pwm_dev: PWM,
    dma_dev: DMA,
    resets: &mut RESETS,
    output_pin: Pin<Gpio27, FunctionPwm, PullNone>,
    framebuffer: &'static [u8; FRAMEBUFFER_LEN],
    palette: Palette,
) {
    let pwm = OutputPwm::init(pwm_dev, resets, output_pin);
    let write_addr = OutputPwm::duty_register_address();
    let dma = PingPong::init(dma_dev, resets, write_addr, OUTPUT_DREQ);

    let engine = Engine {
        pwm,
        dma,
        state: GeneratorState::new(),
        palette,
        framebuffer,
    };

    critical_section::with(|cs| {
        ENGINE.borrow(cs).replace(Some(engine));
    });
}

impl Engine {
    /// Fills both buffers for the first two scanlines and starts the
    /// ping-pong running. After this returns, the DMA-completion interrupt
    /// drives everything; nothing else needs to touch the engine in steady
    /// state except diagnostics.
    pub fn start(&mut self) {
        // Safety: BUF_A/BUF_B are written only here (before interrupts are
        // unmasked) and by the ISR thereafter, one buffer at a time,
        // matching the handler's exclusive per-channel ownership.
        let (buf_a, buf_b) = unsafe { (&mut *core::ptr::addr_of_mut!(BUF_A), &mut *core::ptr::addr_of_mut!(BUF_B)) };

        generator::generate(buf_a, &mut self.state, self.framebuffer, &self.palette);
        self.state.scanline_index += 1;
        generator::generate(buf_b, &mut self.state, self.framebuffer, &self.palette);
        self.state.scanline_index += 1;

        self.dma.arm(buf_a, buf_b);
        self.pwm.enable();

        #[cfg(feature = "defmt-logging")]
        defmt::info!("engine: scanline generation started, ping-pong armed on channel A");
    }

    /// Refills and reprograms one completed half, then advances the
    /// scanline index. Called from the DMA-completion ISR (`src/isr.rs`)
    /// once per completed channel.
    pub fn service(&mut self, half: Half) {
        let buf: &'static mut [u16; SAMPLES_PER_LINE] = match half {
            Half::A => unsafe { &mut *core::ptr::addr_of_mut!(BUF_A) },
            Half::B => unsafe { &mut *core::ptr::addr_of_mut!(BUF_B) },
        };

        generator::generate(buf, &mut self.state, self.framebuffer, &self.palette);

        // Per-scanline trace, same restraint as the teacher's measurement
        // GPIOs: compiled out entirely in release builds so it never eats
        // into the 63.4us-per-line ISR budget (spec.md section 5), not just
        // filtered at the RTT sink.
        #[cfg(all(feature = "defmt-logging", debug_assertions))]
        defmt::trace!(
            "generated scanline {=usize} into half {=u8}",
            self.state.scanline_index,
            half as u8
        );

        self.dma.reprogram(half, buf, half.other());
        self.state.scanline_index = (self.state.scanline_index + 1)
            % crate::timing::SCANLINES_PER_FRAME;
    }

    pub fn dma_mut(&mut self) -> &mut PingPong {
        &mut self.dma
    }

    pub fn rendering_active(&self) -> bool {
        self.state.rendering_active
    }

    pub fn frame_counter(&self) -> u32 {
        self.state.frame_counter
    }
}
