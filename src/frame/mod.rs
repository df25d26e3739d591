//! Frame acquisition and sticker sampling.
//!
//! A [`FrameSource`] yields one frame per face. Each frame is normalized to
//! the scan resolution and sampled at the nine grid points of the cube face
//! outline; each sample is classified into a sticker color.

mod grid;
mod hsv;
mod image_dir;
pub mod mock;

pub use grid::{FRAME_HEIGHT, FRAME_WIDTH, GRID_SPACING, grid_points, normalize_frame, sample_grid};
pub use hsv::rgb_to_hsv;
pub use image_dir::{DEFAULT_FACE_PATTERN, FaceFile, ImageDirSource};

use image::DynamicImage;
use tracing::{debug, info, instrument, warn};

use crate::color::Classifier;
use crate::cube::{Face, FaceScan, ScanSet, Sticker};
use crate::error::Result;

/// Source of face frames.
///
/// Abstracts over real capture and in-memory frames so scanning can be
/// tested without a camera.
pub trait FrameSource {
    /// Short description of where frames come from (for logs and records).
    fn describe(&self) -> String;

    /// Capture the frame for `face`. `Ok(None)` means the face was never
    /// captured; errors are acquisition failures.
    fn capture(&mut self, face: Face) -> Result<Option<DynamicImage>>;
}

/// Classify the nine stickers of one frame.
#[must_use]
pub fn scan_frame(frame: &DynamicImage, classifier: &Classifier) -> FaceScan {
    let samples = sample_grid(&normalize_frame(frame));
    FaceScan::new(samples.map(|sample| Sticker::sampled(classifier.classify(sample), sample)))
}

/// Scan every face the source can provide.
///
/// Faces the source has no frame for are simply absent from the result;
/// [`ScanSet::describe`] reports them.
#[instrument(skip_all, fields(source = %source.describe()))]
pub fn scan_faces<S: FrameSource + ?Sized>(source: &mut S, classifier: &Classifier) -> Result<ScanSet> {
    info!("Scanning faces");
    let mut set = ScanSet::new();
    for face in Face::ORDER {
        match source.capture(face)? {
            Some(frame) => {
                let scan = scan_frame(&frame, classifier);
                debug!(%face, colors = %scan.symbols(), "Face scanned");
                set.insert(face, scan);
            }
            None => warn!(%face, "No frame for face"),
        }
    }
    info!(scanned = set.len(), "Scan finished");
    Ok(set)
}
