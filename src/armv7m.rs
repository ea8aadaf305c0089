//! Augmented ARMv6-M interrupt operations.
//!
//! # Interrupt management
//!
//! `enable_irq`, `disable_irq`, and `clear_pending_irq` give enhanced atomic
//! interrupt status management. `cortex_m`'s own NVIC operations don't
//! guarantee the interrupt is actually enabled/disabled by the time the
//! function returns, which can cause data races around the DMA-completion
//! handler's shared state. These fix that.
//!
//! The methods used are derived from the ARM document *ARM Cortex-M
//! Programming Guide to Memory Barrier Instructions*. The RP2040's Cortex-M0+
//! core is ARMv6-M rather than the teacher's ARMv7-M (Cortex-M4), but the
//! same barrier instructions (`DMB`, `ISB`) are part of the ARMv6-M baseline
//! instruction set, so the guarantees carry over unchanged.
use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::NVIC;

/// Enables an interrupt with enhanced guarantees: the interrupt is enabled by
/// the time the function returns. If it was already enabled, this is a no-op.
///
/// # Safety
/// Caller must ensure enabling `i` cannot cause a data race with code running
/// at a lower priority that isn't prepared to be interrupted.
pub unsafe fn enable_irq(i: impl InterruptNumber) {
    NVIC::unmask(i);
    cortex_m::asm::dmb();
    cortex_m::asm::isb();
}

/// Disables an interrupt with enhanced guarantees: the interrupt is disabled
/// by the time the function returns. From the first instruction after this
/// call, execution cannot be preempted by this interrupt. If it was already
/// disabled, this is a no-op.
pub fn disable_irq(i: impl InterruptNumber) {
    NVIC::mask(i);
    cortex_m::asm::dmb();
    cortex_m::asm::isb();
}

/// Ensures that an interrupt is not pending. If hardware continues generating
/// IRQs, the interrupt may immediately start pending again.
pub fn clear_pending_irq(i: impl InterruptNumber) {
    NVIC::unpend(i);
    // These barriers are arguably overkill, but *shrug*
    cortex_m::asm::dmb();
    cortex_m::asm::isb();
}
