//! The smudge effect: per-frame state machine over the render pipeline.
//!
//! Tick order matters and mirrors the effect's data flow:
//! resize check -> fade (front -> back) -> optional brush stamp into back
//! -> composite back onto the surface -> swap. The input side only ever
//! writes the single pending-stroke slot; everything else is owned and
//! sequenced here.

use glam::{Mat4, Vec2};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::assets::{ImageLoader, SourceImage};
use crate::config::EffectConfig;
use crate::core::{App, AppControl, FrameCtx};
use crate::field::FieldTargets;
use crate::input::{StrokeSlot, pointer_to_field};
use crate::render::{
    BrushRenderer, DisplaceRenderer, FadeRenderer, QuadMesh, transform,
};

pub struct SmudgeApp {
    config: EffectConfig,

    quad: Option<QuadMesh>,
    fields: Option<FieldTargets>,
    source: Option<SourceImage>,
    loader: Option<ImageLoader>,

    fade: FadeRenderer,
    brush: BrushRenderer,
    displace: DisplaceRenderer,

    pending: StrokeSlot,
    /// Composite matrix of the last presented frame; the input mapper
    /// inverts it, so strokes are ignored until one exists.
    last_matrix: Option<Mat4>,
    surface_size: Option<PhysicalSize<u32>>,

    rng: rand::rngs::ThreadRng,
}

impl SmudgeApp {
    pub fn new(config: EffectConfig) -> Self {
        let loader = config.image.clone().map(ImageLoader::spawn);

        Self {
            config,
            quad: None,
            fields: None,
            source: None,
            loader,
            fade: FadeRenderer::new(),
            brush: BrushRenderer::new(),
            displace: DisplaceRenderer::new(),
            pending: StrokeSlot::default(),
            last_matrix: None,
            surface_size: None,
            rng: rand::rng(),
        }
    }

    /// Places a stroke for a pointer position in physical pixels.
    fn handle_pointer(&mut self, pointer: Vec2) {
        let (Some(matrix), Some(surface)) = (self.last_matrix, self.surface_size) else {
            return;
        };

        if let Some(position) = pointer_to_field(pointer, surface, matrix) {
            let stroke = self.config.stroke.roll(&mut self.rng, position);
            self.pending.set(stroke);
        }
    }

    /// Swaps the placeholder for the decoded image once the loader reports.
    fn poll_image(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        let Some(result) = self.loader.as_ref().and_then(|l| l.try_take()) else {
            return;
        };
        self.loader = None;

        match result {
            Ok(pixels) => {
                let (w, h) = pixels.dimensions();
                log::info!("source image loaded ({w}x{h})");
                self.source = Some(SourceImage::from_rgba(device, queue, &pixels));
            }
            Err(err) => {
                log::warn!("image load failed, keeping placeholder: {err}");
            }
        }
    }
}

impl App for SmudgeApp {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_pointer(Vec2::new(position.x as f32, position.y as f32));
                AppControl::Continue
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                AppControl::Exit
            }

            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let size = ctx.gpu.size();
        if size.width == 0 || size.height == 0 {
            return AppControl::Continue;
        }

        self.poll_image(ctx.gpu.device(), ctx.gpu.queue());

        if self.quad.is_none() {
            self.quad = Some(QuadMesh::new(ctx.gpu.device()));
        }
        if self.source.is_none() {
            self.source = Some(SourceImage::placeholder(ctx.gpu.device(), ctx.gpu.queue()));
        }
        match self.fields.as_mut() {
            None => self.fields = Some(FieldTargets::new(ctx.gpu.device(), size)),
            Some(fields) => {
                fields.ensure_size(ctx.gpu.device(), size);
            }
        }

        let (Some(quad), Some(fields), Some(source)) = (
            self.quad.as_ref(),
            self.fields.as_mut(),
            self.source.as_ref(),
        ) else {
            return AppControl::Continue;
        };

        let matrix = transform::composite_matrix(size, source.width(), source.height());
        let mix_amount = self.config.mix_amount;
        let range = self.config.displacement_range;
        let stroke = self.pending.take();

        let fade = &mut self.fade;
        let brush = &mut self.brush;
        let displace = &mut self.displace;

        let mut presented = false;
        let control = ctx.render(wgpu::Color::BLACK, |rctx, target| {
            presented = true;

            // A resized pair must be neutral before anything samples it.
            fields.record_pending_clear(target.encoder);

            fade.render(
                rctx,
                target.encoder,
                fields.front_view(),
                fields.back_view(),
                mix_amount,
                quad,
            );

            if let Some(stroke) = &stroke {
                brush.render(rctx, target.encoder, fields.back_view(), size, stroke, quad);
            }

            displace.render(
                rctx,
                target.encoder,
                target.color_view,
                source.view(),
                fields.back_view(),
                matrix,
                range,
                quad,
            );
        });

        // On a skipped frame nothing was faded or composited, so the pair
        // must not swap and the matrix stays whatever was last shown.
        if presented {
            fields.swap();
            self.last_matrix = Some(matrix);
            self.surface_size = Some(size);
        }

        control
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> SmudgeApp {
        SmudgeApp::new(EffectConfig::default())
    }

    #[test]
    fn pointer_before_first_frame_is_ignored() {
        let mut a = app();
        a.handle_pointer(Vec2::new(10.0, 10.0));
        assert!(a.pending.take().is_none());
    }

    #[test]
    fn pointer_with_recorded_matrix_queues_a_stroke() {
        let mut a = app();
        let surface = PhysicalSize::new(800, 600);
        a.surface_size = Some(surface);
        a.last_matrix = Some(transform::composite_matrix(surface, 800, 600));

        a.handle_pointer(Vec2::new(400.0, 300.0));
        let stroke = a.pending.take().expect("stroke queued");
        assert!((stroke.position.x - 400.0).abs() < 1e-3);
        assert!((stroke.position.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn second_pointer_event_replaces_unconsumed_stroke() {
        let mut a = app();
        let surface = PhysicalSize::new(800, 600);
        a.surface_size = Some(surface);
        a.last_matrix = Some(transform::composite_matrix(surface, 800, 600));

        a.handle_pointer(Vec2::new(100.0, 100.0));
        a.handle_pointer(Vec2::new(200.0, 200.0));

        let stroke = a.pending.take().expect("stroke queued");
        assert!((stroke.position.x - 200.0).abs() < 1e-3);
        assert!(a.pending.take().is_none());
    }

    #[test]
    fn no_image_config_spawns_no_loader() {
        let a = app();
        assert!(a.loader.is_none());
    }
}
