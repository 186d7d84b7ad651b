//! CPU model of the fade pass.
//!
//! `fade.wgsl` applies exactly this math per texel per frame; keeping a
//! scalar mirror here lets the convergence and bounds properties be
//! validated without a GPU.

/// Dead-zone width of the fade clamp, one 8-bit quantization step.
///
/// Once the per-frame delta would fall below this, the shader substitutes a
/// fixed step of this size so the field reaches neutral in finite frames
/// instead of decaying asymptotically forever.
pub const EPSILON: f32 = 2.0 / 256.0;

/// Default per-frame decay rate.
pub const DEFAULT_MIX_AMOUNT: f32 = 0.03;

/// Default displacement range: up to 5% of texture space per axis.
pub const DEFAULT_DISPLACEMENT_RANGE: [f32; 2] = [0.05, 0.05];

/// Decodes a stored [0, 1] texel channel into a [-1, 1] displacement.
#[inline]
pub fn decode(stored: f32) -> f32 {
    stored * 2.0 - 1.0
}

/// Encodes a [-1, 1] displacement into [0, 1] storage.
#[inline]
pub fn encode(value: f32) -> f32 {
    value * 0.5 + 0.5
}

/// One fade step on a stored channel value, in continuous math.
///
/// Mirrors `fade.wgsl`: decode, compute `-v * mix_amount`, substitute the
/// epsilon step when the delta magnitude falls inside the dead zone
/// (`sign(0) == 0`, so exact neutral is a fixed point), re-encode.
pub fn fade_step(stored: f32, mix_amount: f32) -> f32 {
    let v = decode(stored);
    let mut delta = -v * mix_amount;
    if delta.abs() <= EPSILON {
        delta = -v.signum_or_zero() * EPSILON;
    }
    encode(v + delta)
}

/// One fade step as an `Rgba8Unorm` target actually stores it: the result
/// is rounded to the nearest 8-bit level.
pub fn fade_step_u8(stored: u8, mix_amount: f32) -> u8 {
    let out = fade_step(stored as f32 / 255.0, mix_amount);
    (out.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// True when a stored byte decodes to within the epsilon dead zone.
pub fn is_neutral_band_u8(stored: u8) -> bool {
    decode(stored as f32 / 255.0).abs() <= EPSILON
}

/// Texture-space sampling offset for a stored R/G pair.
///
/// This is the displacement the composite pass adds to its base texture
/// coordinate; its magnitude is bounded by `range` per axis for any input.
pub fn sample_offset(stored_rg: [f32; 2], range: [f32; 2]) -> [f32; 2] {
    [
        decode(stored_rg[0]) * range[0],
        decode(stored_rg[1]) * range[1],
    ]
}

trait SignumOrZero {
    fn signum_or_zero(self) -> Self;
}

impl SignumOrZero for f32 {
    // f32::signum(0.0) == 1.0, but GLSL/WGSL sign(0.0) == 0.0 and the
    // shader relies on that to keep exact neutral a fixed point.
    fn signum_or_zero(self) -> Self {
        if self == 0.0 { 0.0 } else { self.signum() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEUTRAL_U8: u8 = 128;

    #[test]
    fn encode_decode_are_inverse() {
        for v in [-1.0f32, -0.5, 0.0, 0.25, 1.0] {
            assert!((decode(encode(v)) - v).abs() < 1e-6);
        }
    }

    #[test]
    fn exact_neutral_is_a_fixed_point() {
        let stored = encode(0.0);
        assert_eq!(fade_step(stored, DEFAULT_MIX_AMOUNT), stored);
        assert_eq!(fade_step(stored, 0.0), stored);
    }

    #[test]
    fn representable_value_reaches_exact_neutral() {
        // A decoded value that is an exact multiple of EPSILON lands on
        // zero when the dead-zone step fires.
        let mut stored = encode(EPSILON);
        stored = fade_step(stored, DEFAULT_MIX_AMOUNT);
        assert_eq!(decode(stored), 0.0);
        // ...and stays there.
        assert_eq!(fade_step(stored, DEFAULT_MIX_AMOUNT), stored);
    }

    #[test]
    fn quantized_decay_enters_neutral_band_and_stays() {
        for start in [0u8, 13, 80, 120, 135, 200, 255] {
            let mut stored = start;
            let mut steps = 0;
            while !is_neutral_band_u8(stored) {
                stored = fade_step_u8(stored, DEFAULT_MIX_AMOUNT);
                steps += 1;
                assert!(steps < 1000, "no convergence from {start}");
            }
            // Once inside the band the field never escapes it again.
            for _ in 0..64 {
                stored = fade_step_u8(stored, DEFAULT_MIX_AMOUNT);
                assert!(
                    is_neutral_band_u8(stored),
                    "left neutral band from {start}, now at {stored}"
                );
            }
        }
    }

    #[test]
    fn decay_shrinks_magnitude_outside_dead_zone() {
        let stored = encode(0.8);
        let next = fade_step(stored, DEFAULT_MIX_AMOUNT);
        assert!(decode(next).abs() < 0.8);
        assert!(decode(next) > 0.0);
    }

    #[test]
    fn zero_mix_amount_still_steps_by_epsilon() {
        // With mix_amount = 0 the delta is always 0, which lies inside the
        // dead zone, so the clamp branch fires every frame and a non-neutral
        // texel keeps creeping toward neutral.
        let stored = encode(0.5);
        let next = fade_step(stored, 0.0);
        assert!((decode(next) - (0.5 - EPSILON)).abs() < 1e-6);
    }

    #[test]
    fn quantized_neutral_flickers_within_one_lsb() {
        // The stored encoding has no exact midpoint; the field settles into
        // a 127 <-> 128 limit cycle around neutral.
        let a = fade_step_u8(NEUTRAL_U8, DEFAULT_MIX_AMOUNT);
        let b = fade_step_u8(a, DEFAULT_MIX_AMOUNT);
        assert_eq!(a, 127);
        assert_eq!(b, 128);
    }

    #[test]
    fn sample_offset_is_bounded_by_range() {
        let range = DEFAULT_DISPLACEMENT_RANGE;
        for r in 0..=255u8 {
            for g in [0u8, 64, 128, 255] {
                let off = sample_offset([r as f32 / 255.0, g as f32 / 255.0], range);
                assert!(off[0].abs() <= range[0] + 1e-6);
                assert!(off[1].abs() <= range[1] + 1e-6);
            }
        }
    }

    #[test]
    fn sample_offset_at_neutral_is_near_zero() {
        let off = sample_offset([0.5, 0.5], DEFAULT_DISPLACEMENT_RANGE);
        assert!(off[0].abs() < 1e-6);
        assert!(off[1].abs() < 1e-6);
    }
}
