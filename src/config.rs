use std::path::PathBuf;

use crate::field::decay::{DEFAULT_DISPLACEMENT_RANGE, DEFAULT_MIX_AMOUNT};
use crate::input::StrokeParams;

/// Effect parameters.
#[derive(Debug, Clone)]
pub struct EffectConfig {
    /// Per-frame decay rate of the displacement field.
    pub mix_amount: f32,

    /// Maximum texture-space offset the field can apply, per axis.
    pub displacement_range: [f32; 2],

    /// Brush-stroke randomization ranges.
    pub stroke: StrokeParams,

    /// Image to warp; the placeholder is shown while it decodes, or
    /// forever when it is `None` or fails to decode.
    pub image: Option<PathBuf>,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            mix_amount: DEFAULT_MIX_AMOUNT,
            displacement_range: DEFAULT_DISPLACEMENT_RANGE,
            stroke: StrokeParams::default(),
            image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_effect_constants() {
        let c = EffectConfig::default();
        assert_eq!(c.mix_amount, 0.03);
        assert_eq!(c.displacement_range, [0.05, 0.05]);
        assert_eq!(c.stroke.scale_min, 10.0);
        assert_eq!(c.stroke.scale_max, 20.0);
        assert!(c.image.is_none());
    }
}
