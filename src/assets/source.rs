use image::RgbaImage;

/// The image being warped: an immutable texture plus its pixel dimensions,
/// which drive the composite projection.
pub struct SourceImage {
    view: wgpu::TextureView,
    width: u32,
    height: u32,
    // Kept alive for the view.
    _texture: wgpu::Texture,
}

impl SourceImage {
    /// 1x1 neutral-grey stand-in used until a real image is uploaded.
    ///
    /// Its dimensions make the composite quad effectively invisible, which
    /// is the intended degraded state while (or if no) loading happens.
    pub fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_rgba(
            device,
            queue,
            &RgbaImage::from_pixel(1, 1, image::Rgba([128, 128, 128, 255])),
        )
    }

    /// Uploads decoded RGBA pixels into a new sampleable texture.
    pub fn from_rgba(device: &wgpu::Device, queue: &wgpu::Queue, pixels: &RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("smudge source image"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            view,
            width,
            height,
            _texture: texture,
        }
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
