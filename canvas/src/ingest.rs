//! Image ingestion: upload validation and display sizing.
//!
//! Decoding itself happens in the host (the browser owns the codecs). This
//! module holds the checks that run before and after decode, and the fit
//! computation that decides how large the photo is drawn on screen. Nothing
//! here mutates engine state; a failed ingest leaves the tool exactly as it
//! was.

#[cfg(test)]
#[path = "ingest_test.rs"]
mod ingest_test;

use serde::Serialize;

use crate::coords::SurfaceSize;

/// Error returned when an upload cannot become the working photo.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    /// The file is not an image.
    #[error("\"{mime}\" is not an image. Choose a JPEG, PNG, or other photo file.")]
    InvalidFileType { mime: String },
    /// The file exceeds the upload cap.
    #[error("The photo is too large ({size_bytes} bytes, limit {max_bytes} bytes).")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
    /// The browser could not decode the image data.
    #[error("The photo could not be opened: {0}")]
    DecodeFailed(String),
    /// The decoded bitmap has no pixels.
    #[error("The photo has no pixels.")]
    EmptyImage,
}

/// Check an upload's MIME type and size before decoding.
///
/// # Errors
///
/// Returns [`IngestError::InvalidFileType`] unless `mime` starts with
/// `image/`, or [`IngestError::FileTooLarge`] when `size_bytes` exceeds
/// `max_bytes`.
pub fn validate_upload(mime: &str, size_bytes: u64, max_bytes: u64) -> Result<(), IngestError> {
    let is_image = mime
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"));
    if !is_image {
        return Err(IngestError::InvalidFileType { mime: mime.to_owned() });
    }
    if size_bytes > max_bytes {
        return Err(IngestError::FileTooLarge { size_bytes, max_bytes });
    }
    Ok(())
}

/// Intrinsic dimensions of a decoded photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceImage {
    pub natural_width: u32,
    pub natural_height: u32,
}

impl SourceImage {
    /// Wrap decoded dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::EmptyImage`] if either dimension is zero.
    pub fn new(natural_width: u32, natural_height: u32) -> Result<Self, IngestError> {
        if natural_width == 0 || natural_height == 0 {
            return Err(IngestError::EmptyImage);
        }
        Ok(Self { natural_width, natural_height })
    }

    /// Natural size as a surface size.
    #[must_use]
    pub fn natural_size(self) -> SurfaceSize {
        SurfaceSize::new(f64::from(self.natural_width), f64::from(self.natural_height))
    }

    /// Displayed bounds when shown inside a container, preserving aspect
    /// ratio and never enlarging past the natural size.
    ///
    /// `max_height` of `None` (or a non-positive value) means unconstrained.
    #[must_use]
    pub fn fit_within(self, max_width: f64, max_height: Option<f64>) -> SurfaceSize {
        let natural = self.natural_size();
        let mut scale: f64 = 1.0;
        if max_width > 0.0 {
            scale = scale.min(max_width / natural.width);
        }
        if let Some(h) = max_height.filter(|h| *h > 0.0) {
            scale = scale.min(h / natural.height);
        }
        SurfaceSize::new(natural.width * scale, natural.height * scale)
    }
}
