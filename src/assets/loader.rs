use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, bounded};
use image::RgbaImage;

/// Fire-and-forget background image decode.
///
/// One load per loader; the render loop polls `try_take` each frame until
/// the result arrives. There is no retry: an error is surfaced once and
/// the caller keeps whatever it was showing.
pub struct ImageLoader {
    rx: Receiver<Result<RgbaImage, image::ImageError>>,
}

impl ImageLoader {
    /// Starts decoding `path` on a background thread.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = bounded(1);

        thread::spawn(move || {
            log::debug!("decoding image {}", path.display());
            let result = image::open(&path).map(|img| img.to_rgba8());
            // Receiver may have been dropped on shutdown; nothing to do.
            let _ = tx.send(result);
        });

        Self { rx }
    }

    /// Returns the decode result once it is ready, then never again.
    pub fn try_take(&self) -> Option<Result<RgbaImage, image::ImageError>> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_an_error() {
        let loader = ImageLoader::spawn(PathBuf::from("/nonexistent/smudge-test.png"));
        // Block until the decode thread reports.
        let result = loader.rx.recv().expect("loader thread dropped sender");
        assert!(result.is_err());
    }

    #[test]
    fn try_take_is_none_until_ready_then_consumes() {
        let (tx, rx) = bounded(1);
        let loader = ImageLoader { rx };

        assert!(loader.try_take().is_none());

        tx.send(Ok(RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]))))
            .unwrap();

        assert!(loader.try_take().is_some());
        assert!(loader.try_take().is_none());
    }
}
