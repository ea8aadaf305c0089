//! Color encoder (spec.md section 4.2) and the canonical 256-entry palette.
//!
//! `encode_entry` and [`Palette`] have no hardware dependencies -- they are
//! the part of this engine meant to be checked against the boundary
//! scenarios in spec.md section 8 on the host, the same way the teacher's
//! `gfx` crate keeps its line-drawing math host-testable behind
//! `#![cfg_attr(not(any(test, feature = "std")), no_std)]`.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

/// Number of palette entries (one per indexed-framebuffer byte value).
pub const PALETTE_ENTRIES: usize = 256;

/// Four precomputed composite samples per palette entry, one per subcarrier
/// phase (0 degrees, 90, 180, 270), in the PWM's 0..=11 sample domain.
pub type PaletteSamples = [u16; 4];

/// A fully-populated palette: 256 entries x 4 phase samples, read-only to the
/// generator once built. Write-once at init, per spec.md section 5 -- no
/// synchronization is needed past construction.
#[derive(Clone)]
pub struct Palette {
    entries: [PaletteSamples; PALETTE_ENTRIES],
}

impl Palette {
    /// An all-black palette (every entry at blanking level), useful as a
    /// starting point before [`Palette::set_entry`] or
    /// [`Palette::load_canonical`] populate it.
    pub const fn blank() -> Self {
        Palette {
            entries: [[2, 2, 2, 2]; PALETTE_ENTRIES],
        }
    }

    /// Populates one palette slot from an (index, B, R, G) triple, matching
    /// the collaborator interface spec.md section 6 names:
    /// `set_palette_entry(index, B, R, G)`.
    pub fn set_entry(&mut self, index: u8, b: u8, r: u8, g: u8) {
        self.entries[index as usize] = encode_entry(b, r, g);
    }

    pub fn entry(&self, index: u8) -> PaletteSamples {
        self.entries[index as usize]
    }

    /// Writes a palette slot directly, bypassing [`encode_entry`]. Exists so
    /// callers (and tests) can pin a specific sample quadruple without
    /// reverse-engineering an RGB triple that produces it.
    pub fn set_raw_entry(&mut self, index: u8, samples: PaletteSamples) {
        self.entries[index as usize] = samples;
    }

    /// Builds the canonical 256-entry palette the loader hard-codes (spec.md
    /// section 6): the 16 standard low colors, a 6x6x6 color cube, and a
    /// 24-step grayscale ramp, matching the layout long used by VGA-era
    /// palette tools and terminal 256-color palettes alike.
    pub fn load_canonical() -> Self {
        let mut palette = Self::blank();
        for (index, &(r, g, b)) in CANONICAL_RGB.iter().enumerate() {
            palette.set_entry(index as u8, b, r, g);
        }
        palette
    }
}

/// Standard NTSC quadrature color modulation, evaluated at the four sample
/// phases visited by a 4x-subcarrier-rate sample clock. The coefficients
/// (1792, 441, 1361, 764, 786, and the `2*65536`/`32768` biases) are
/// preserved bit-exact from spec.md section 4.2: they embed the 0.4921 and
/// 0.8773 chroma weights, a scale factor down to the 3-bit output range, and
/// round-to-nearest, tuned empirically for this 12-level PWM and must not be
/// adjusted.
pub fn encode_entry(b: u8, r: u8, g: u8) -> PaletteSamples {
    let (b, r, g) = (b as i32, r as i32, g as i32);
    let y = (77 * r + 150 * g + 29 * b + 128) / 256;
    let b_minus_y = b - y;
    let r_minus_y = r - y;

    let phase0 = y * 1792 + b_minus_y * 441 + r_minus_y * 1361;
    let phase90 = y * 1792 + b_minus_y * 764 + r_minus_y * -786;
    let phase180 = y * 1792 - b_minus_y * 441 - r_minus_y * 1361;
    let phase270 = y * 1792 - b_minus_y * 764 - r_minus_y * -786;

    [
        clamp_sample(phase0),
        clamp_sample(phase90),
        clamp_sample(phase180),
        clamp_sample(phase270),
    ]
}

/// The sample domain is 0..=11 (spec.md section 3). The reference clamps
/// only negatives; this port clamps both ends (spec.md section 7 names this
/// the more robust option, see DESIGN.md open question 6).
fn clamp_sample(raw: i32) -> u16 {
    const BIAS: i32 = 2 * 65536 + 32768;
    let biased = (raw + BIAS) / 65536;
    biased.clamp(0, 11) as u16
}

include!("palette_table.rs");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_is_blanking_level() {
        assert_eq!(encode_entry(0, 0, 0), [2, 2, 2, 2]);
    }

    #[test]
    fn white_is_near_peak_luma_on_all_phases() {
        let samples = encode_entry(255, 255, 255);
        for s in samples {
            assert!((8..=11).contains(&s), "sample {} out of expected range", s);
        }
        // All four phases should agree for a gray/white source: chroma terms
        // vanish because B == R == Y.
        assert_eq!(samples[0], samples[1]);
        assert_eq!(samples[1], samples[2]);
        assert_eq!(samples[2], samples[3]);
    }

    #[test]
    fn pure_red_matches_worked_example() {
        // spec.md section 8 boundary scenario 6: B=0, R=255, G=0.
        let samples = encode_entry(0, 255, 0);
        assert_eq!(samples[0], 7);
        // Phases 0/180 and 90/270 are each other's mirror image around the
        // luma-only term, since B==0 and R==255 make the chroma terms of
        // opposite phases negate exactly.
        let y_term = 77 * 255 + 128;
        let y = y_term / 256;
        assert_eq!(y, 77);
    }

    #[test]
    fn every_canonical_entry_stays_in_range() {
        let palette = Palette::load_canonical();
        for index in 0..=255u8 {
            for sample in palette.entry(index) {
                assert!(sample <= 11);
            }
        }
    }

    #[test]
    fn set_entry_is_addressable_by_index() {
        let mut palette = Palette::blank();
        palette.set_entry(5, 5, 7, 3);
        assert_eq!(palette.entry(5), encode_entry(5, 7, 3));
        assert_eq!(palette.entry(0), [2, 2, 2, 2]);
    }
}
