use glam::Vec2;
use rand::Rng;

/// One brush stamp request, in displacement-field pixel coordinates.
///
/// Ephemeral: produced on pointer movement, consumed by the render loop
/// within the same or next frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BrushStroke {
    pub position: Vec2,
    /// Rotation around the stamp center, radians.
    pub rotation: f32,
    /// Half-extent of the stamped quad, pixels.
    pub scale: f32,
    /// Solid stamp color; R/G become the displacement the stamp injects.
    pub color: [f32; 4],
}

/// Randomization ranges for stroke parameters. Varying rotation and scale
/// per stamp is what makes a drag read as turbulent liquid rather than a
/// single repeated smear.
#[derive(Debug, Clone)]
pub struct StrokeParams {
    pub rotation_max: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for StrokeParams {
    fn default() -> Self {
        Self {
            rotation_max: std::f32::consts::PI,
            scale_min: 10.0,
            scale_max: 20.0,
        }
    }
}

impl StrokeParams {
    /// Rolls a stroke at `position` with randomized rotation, scale, and an
    /// opaque random color.
    pub fn roll<R: Rng>(&self, rng: &mut R, position: Vec2) -> BrushStroke {
        BrushStroke {
            position,
            rotation: rng.random_range(0.0..self.rotation_max),
            scale: rng.random_range(self.scale_min..self.scale_max),
            color: [
                rng.random_range(0.0..1.0),
                rng.random_range(0.0..1.0),
                rng.random_range(0.0..1.0),
                1.0,
            ],
        }
    }
}

/// Single-slot holder for the pending stroke.
///
/// Pointer events can arrive faster than frames render; only the most
/// recent stroke matters, so a new one overwrites an unconsumed one and
/// the render loop drains the slot with `take`.
#[derive(Debug, Default)]
pub struct StrokeSlot {
    pending: Option<BrushStroke>,
}

impl StrokeSlot {
    pub fn set(&mut self, stroke: BrushStroke) {
        self.pending = Some(stroke);
    }

    pub fn take(&mut self) -> Option<BrushStroke> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn stroke_at(x: f32, y: f32) -> BrushStroke {
        BrushStroke {
            position: Vec2::new(x, y),
            rotation: 0.0,
            scale: 12.0,
            color: [1.0, 0.0, 0.0, 1.0],
        }
    }

    #[test]
    fn slot_starts_empty() {
        let mut slot = StrokeSlot::default();
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn newer_stroke_overwrites_unconsumed_one() {
        let mut slot = StrokeSlot::default();
        slot.set(stroke_at(1.0, 1.0));
        slot.set(stroke_at(2.0, 2.0));

        assert_eq!(slot.take(), Some(stroke_at(2.0, 2.0)));
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn take_consumes_the_stroke() {
        let mut slot = StrokeSlot::default();
        slot.set(stroke_at(3.0, 4.0));
        assert!(slot.take().is_some());
        assert!(slot.take().is_none());
    }

    #[test]
    fn rolled_stroke_respects_configured_ranges() {
        let params = StrokeParams::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let s = params.roll(&mut rng, Vec2::new(5.0, 6.0));
            assert_eq!(s.position, Vec2::new(5.0, 6.0));
            assert!(s.rotation >= 0.0 && s.rotation < params.rotation_max);
            assert!(s.scale >= params.scale_min && s.scale < params.scale_max);
            assert_eq!(s.color[3], 1.0);
            for c in &s.color[..3] {
                assert!((0.0..1.0).contains(c));
            }
        }
    }
}
