//! Ping-pong DMA transport (Module 3): two channels, each configured to
//! re-arm the other on completion, continuously feeding [`crate::pwm`]'s
//! duty-cycle register from one of two [`crate::timing::SAMPLES_PER_LINE`]
//! sample buffers while the CPU fills the other.
//!
//! Grounded on the teacher's `bg_rast::prepare_for_scanout` /
//! `hstate::start_of_active_video` split: precompute everything about a
//! transfer ahead of time so the ISR only has to poke a handful of
//! registers, then let the far side of the DMA controller auto-rearm. The
//! teacher (STM32 DMA2 stream 5 chasing `s5cr`/`s5par`/`s5m0ar`/`s5ndtr`) has
//! no native ping-pong/chaining primitive -- it re-arms by hand from
//! `hstate_isr` every line. The RP2040's `CHAIN_TO` field does this in
//! hardware, so this port drops the manual rearm-from-ISR step and instead
//! configures each channel's `CHAIN_TO` once, at init, to point at its peer.
use rp2040_hal::pac::{DMA, RESETS};

use crate::timing::SAMPLES_PER_LINE;

/// One of the two ping-pong channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    A,
    B,
}

impl Half {
    fn channel(self) -> usize {
        match self {
            Half::A => 0,
            Half::B => 1,
        }
    }

    pub fn other(self) -> Half {
        match self {
            Half::A => Half::B,
            Half::B => Half::A,
        }
    }
}

/// Owns the two sample buffers and the DMA channels that alternate feeding
/// them to the PWM duty register. `buf_a`/`buf_b` are `'static` because the
/// DMA controller holds their addresses for the lifetime of the engine.
pub struct PingPong {
    dma: DMA,
    write_addr: u32,
    dreq: u8,
}

impl PingPong {
    /// Claims DMA channels 0 and 1, chains each to the other, and points
    /// both at `write_addr` (the PWM compare register's address), but
    /// leaves both channels disabled -- [`PingPong::arm`] loads the first
    /// transfer and starts channel A.
    pub fn init(dma_dev: DMA, resets: &mut RESETS, write_addr: u32, dreq: u8) -> Self {
        resets.reset.modify(|_, w| w.dma().clear_bit());
        while resets.reset_done.read().dma().bit_is_clear() {}

        PingPong {
            dma: dma_dev,
            write_addr,
            dreq,
        }
    }

    /// Programs one channel's read address/count and `CHAIN_TO`, but does
    /// *not* start it -- written through the non-triggering `AL1` alias of
    /// `CTRL` rather than `CH_CTRL_TRIG`. Called once per half from the
    /// DMA-completion ISR, handing it the buffer the generator just
    /// finished filling (spec.md section 4.3: generate, then reprogram).
    ///
    /// Triggering here would start this channel immediately, on top of its
    /// peer, which is still mid-transfer on the same PWM-wrap DREQ --
    /// exactly the ping-pong exclusivity violation spec.md section 5 rules
    /// out ("DMA reads buffer i only during its own active transfer"). This
    /// channel starts only when its peer's own `CHAIN_TO` auto-retriggers
    /// it on completion, using whatever was last written here.
    pub fn reprogram(&mut self, half: Half, buf: &'static [u16; SAMPLES_PER_LINE], chain_to: Half) {
        let ch = half.channel();
        let chain_channel = chain_to.channel();

        let read_addr = buf.as_ptr() as u32;
        self.dma.ch[ch]
            .ch_read_addr
            .write(|w| unsafe { w.bits(read_addr) });
        self.dma.ch[ch]
            .ch_write_addr
            .write(|w| unsafe { w.bits(self.write_addr) });
        self.dma.ch[ch]
            .ch_trans_count
            .write(|w| unsafe { w.bits(SAMPLES_PER_LINE as u32) });

        self.dma.ch[ch].ch_al1_ctrl.write(|w| unsafe {
            w.data_size().bits(1) // 16-bit transfers, matching the PWM duty halfword
                .incr_read().bit(true)
                .incr_write().bit(false)
                .treq_sel().bits(self.dreq)
                .chain_to().bits(chain_channel as u8)
                .en().bit(true)
        });
    }

    /// Starts channel `half` immediately by rewriting its already-configured
    /// `CTRL` bits through the triggering `CH_CTRL_TRIG` register. Needed
    /// exactly once, for channel A in [`PingPong::arm`] -- every other
    /// start happens via hardware `CHAIN_TO`, not a CPU write.
    fn trigger(&mut self, half: Half) {
        let ch = half.channel();
        let ctrl_bits = self.dma.ch[ch].ch_al1_ctrl.read().bits();
        self.dma.ch[ch]
            .ch_ctrl_trig
            .write(|w| unsafe { w.bits(ctrl_bits) });
    }

    /// Starts the ping-pong running: programs both halves (neither starts
    /// yet) and triggers channel A alone. Must be called exactly once,
    /// after [`crate::pwm::OutputPwm`] is configured (but before it's
    /// enabled) and interrupts are unmasked.
    pub fn arm(
        &mut self,
        buf_a: &'static [u16; SAMPLES_PER_LINE],
        buf_b: &'static [u16; SAMPLES_PER_LINE],
    ) {
        self.reprogram(Half::B, buf_b, Half::A);
        self.reprogram(Half::A, buf_a, Half::B);
        self.dma.inte0.write(|w| unsafe { w.bits(0b11) });
        self.trigger(Half::A);
    }

    /// Reads-and-clears the completion flags for both channels, per
    /// spec.md section 9's recommended clear-after-refill ordering
    /// (DESIGN.md open question 3): returns which channel(s) completed so
    /// the caller can refill and reprogram *before* this function clears
    /// their flags, not after.
    pub fn completed_channels(&self) -> u32 {
        self.dma.ints0.read().bits() & 0b11
    }

    /// Clears the completion flag for one channel. Call only after its
    /// buffer has been refilled and reprogrammed.
    pub fn clear_completed(&mut self, half: Half) {
        let bit = 1u32 << half.channel();
        self.dma.ints0.write(|w| unsafe { w.bits(bit) });
    }
}
