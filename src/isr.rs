//! The DMA-completion interrupt: this engine's only interrupt handler, and
//! its entire real-time budget (spec.md section 5: ~63.4us per scanline).
//!
//! Grounded on `hstate::hstate_isr`'s shape: read-and-clear the status
//! register, dispatch on which bit(s) are set, do the actual work, then
//! (for this engine specifically) clear the completion flag only after that
//! work is done, per DESIGN.md open question 3.
use rp2040_hal::pac::interrupt;

use crate::dma::Half;
use crate::engine::ENGINE;

#[cfg(feature = "measurement")]
use crate::measurement;

/// Shared handler for DMA IRQ 0, which both ping-pong channels raise on
/// completion (spec.md section 4.3).
#[interrupt]
fn DMA_IRQ_0() {
    #[cfg(feature = "measurement")]
    measurement::isr_enter();

    critical_section::with(|cs| {
        let mut engine_ref = ENGINE.borrow(cs).borrow_mut();
        let engine = match engine_ref.as_mut() {
            Some(engine) => engine,
            // Spurious: the interrupt fired before `Engine::start` installed
            // the engine. Nothing to service.
            None => return,
        };

        let completed = engine.dma_mut().completed_channels();

        if completed & 0b01 != 0 {
            engine.service(Half::A);
            engine.dma_mut().clear_completed(Half::A);
        }
        if completed & 0b10 != 0 {
            engine.service(Half::B);
            engine.dma_mut().clear_completed(Half::B);
        }
    });

    #[cfg(feature = "measurement")]
    measurement::isr_exit();
}
