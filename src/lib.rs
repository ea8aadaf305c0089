//! NTSC composite-video scanline engine.
//!
//! This crate drives a single PWM pin through an RC low-pass filter as a
//! one-bit DAC, synthesizing a broadcast-compatible progressive NTSC signal
//! (`timing::SCANLINES_PER_FRAME` scanlines per frame) from a 320x240 indexed
//! framebuffer. The hot path is
//! [`generator::generate`], called from the DMA-completion interrupt
//! ([`isr`]) once per scanline; everything else here is bring-up.
//!
//! `palette` and `generator` have no hardware dependencies and build under
//! `std` for host-side testing (see `#[cfg(test)]` modules in each); the rest
//! of the crate is `no_std` and only builds for the `thumbv6m-none-eabi`
//! target.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod palette;
pub mod timing;
pub mod generator;

#[cfg(not(any(test, feature = "std")))]
pub mod armv7m;
#[cfg(not(any(test, feature = "std")))]
pub mod bringup;
#[cfg(not(any(test, feature = "std")))]
pub mod clocks;
#[cfg(not(any(test, feature = "std")))]
pub mod dma;
#[cfg(not(any(test, feature = "std")))]
pub mod engine;
#[cfg(not(any(test, feature = "std")))]
pub mod isr;
#[cfg(all(not(any(test, feature = "std")), feature = "measurement"))]
pub mod measurement;
#[cfg(not(any(test, feature = "std")))]
pub mod pwm;
