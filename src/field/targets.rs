use winit::dpi::PhysicalSize;

/// Storage format of the displacement field.
///
/// Must be non-sRGB: the [-1, 1] <-> [0, 1] bias has to round-trip raw
/// values, not gamma-encoded ones.
pub const FIELD_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Clear color encoding zero displacement (alpha is ignored by sampling).
pub const NEUTRAL_CLEAR: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 0.5,
};

/// Ping-pong bookkeeping, separate from the GPU textures so the policy is
/// testable headless: which target is front, what size the pair has, and
/// whether a neutral clear is still owed.
#[derive(Debug, Copy, Clone)]
struct PairState {
    size: PhysicalSize<u32>,
    flipped: bool,
    needs_clear: bool,
}

impl PairState {
    fn new(size: PhysicalSize<u32>) -> Self {
        Self {
            size,
            flipped: false,
            needs_clear: true,
        }
    }

    /// Returns true when the pair must be reallocated for `size`.
    fn ensure_size(&mut self, size: PhysicalSize<u32>) -> bool {
        if size == self.size {
            return false;
        }
        self.size = size;
        self.needs_clear = true;
        true
    }

    fn swap(&mut self) {
        self.flipped = !self.flipped;
    }

    fn take_clear(&mut self) -> bool {
        std::mem::replace(&mut self.needs_clear, false)
    }
}

struct FieldTarget {
    view: wgpu::TextureView,
    // Texture kept alive for the view; never read back on the CPU.
    _texture: wgpu::Texture,
}

impl FieldTarget {
    fn new(device: &wgpu::Device, label: &str, size: PhysicalSize<u32>) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FIELD_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            view,
            _texture: texture,
        }
    }
}

/// Ping-pong pair of displacement-field render targets.
///
/// Each frame the fade pass reads `front` and writes `back`, the brush pass
/// stamps into `back`, the composite pass samples `back`, then `swap`
/// relabels the two. Both targets always share the surface's backing pixel
/// size; a size change reallocates the pair and schedules a neutral clear
/// that must be recorded before anything samples the field.
pub struct FieldTargets {
    a: FieldTarget,
    b: FieldTarget,
    state: PairState,
}

impl FieldTargets {
    pub fn new(device: &wgpu::Device, size: PhysicalSize<u32>) -> Self {
        Self {
            a: FieldTarget::new(device, "smudge field a", size),
            b: FieldTarget::new(device, "smudge field b", size),
            state: PairState::new(size),
        }
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.state.size
    }

    /// Reallocates both targets if `size` differs from the current pair.
    ///
    /// Returns true when a reallocation happened. Fresh targets hold
    /// undefined texels, so a neutral clear is scheduled for the next
    /// `record_pending_clear`.
    pub fn ensure_size(&mut self, device: &wgpu::Device, size: PhysicalSize<u32>) -> bool {
        if !self.state.ensure_size(size) {
            return false;
        }

        log::debug!("field targets resized to {}x{}", size.width, size.height);

        self.a = FieldTarget::new(device, "smudge field a", size);
        self.b = FieldTarget::new(device, "smudge field b", size);
        true
    }

    /// Records neutral clear passes for both targets if one is pending.
    ///
    /// Must run at the top of the frame, before the fade pass samples the
    /// front target, so no pass ever reads stale or uninitialized texels.
    pub fn record_pending_clear(&mut self, encoder: &mut wgpu::CommandEncoder) {
        if !self.state.take_clear() {
            return;
        }

        for (label, target) in [
            ("smudge field clear a", &self.a),
            ("smudge field clear b", &self.b),
        ] {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(label),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(NEUTRAL_CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }
    }

    /// The target read by this frame's fade pass.
    pub fn front_view(&self) -> &wgpu::TextureView {
        if self.state.flipped { &self.b.view } else { &self.a.view }
    }

    /// The target written this frame and sampled by the composite pass.
    pub fn back_view(&self) -> &wgpu::TextureView {
        if self.state.flipped { &self.a.view } else { &self.b.view }
    }

    /// Flips the front/back roles; a relabel, not a copy.
    pub fn swap(&mut self) {
        self.state.swap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: u32, h: u32) -> PhysicalSize<u32> {
        PhysicalSize::new(w, h)
    }

    #[test]
    fn fresh_pair_owes_a_clear() {
        let mut s = PairState::new(size(640, 480));
        assert!(s.take_clear());
        assert!(!s.take_clear());
    }

    #[test]
    fn same_size_does_not_reallocate() {
        let mut s = PairState::new(size(640, 480));
        s.take_clear();
        assert!(!s.ensure_size(size(640, 480)));
        assert!(!s.take_clear());
    }

    #[test]
    fn size_change_reallocates_and_schedules_clear() {
        let mut s = PairState::new(size(640, 480));
        s.take_clear();
        assert!(s.ensure_size(size(800, 600)));
        assert_eq!(s.size, size(800, 600));
        assert!(s.take_clear());
    }

    #[test]
    fn swap_alternates_roles() {
        let mut s = PairState::new(size(4, 4));
        assert!(!s.flipped);
        s.swap();
        assert!(s.flipped);
        s.swap();
        assert!(!s.flipped);
    }

    #[test]
    fn neutral_clear_value_encodes_zero_displacement() {
        use crate::field::decay::decode;
        assert_eq!(decode(NEUTRAL_CLEAR.r as f32), 0.0);
        assert_eq!(decode(NEUTRAL_CLEAR.g as f32), 0.0);
    }
}
