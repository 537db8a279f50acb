//! Image encoding and persistence
//!
//! Converts a raw framebuffer into JPEG or PNG bytes and writes them to a
//! collision-safe export path. The blocking body is meant to run on a
//! worker thread (`tokio::task::spawn_blocking`) so compression and disk
//! I/O never stall the host loop.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::config::{ImageFormat, NamingPolicy};
use crate::error::{LapseError, Result};
use crate::output::{self, NamePattern, NamingContext};
use crate::types::PixelBuffer;

/// One framebuffer on its way to disk
///
/// Ownership of the pixel buffer transfers fully to the pipeline at
/// handoff; the orchestrator must not touch it afterwards.
#[derive(Debug)]
pub struct EncodeRequest {
    /// The framebuffer to encode
    pub pixels: PixelBuffer,
    /// Output format
    pub format: ImageFormat,
    /// JPEG quality, 1-100
    pub quality: u8,
    /// Configured naming policy
    pub naming: NamingPolicy,
    /// Whether the capture was user-initiated
    pub manually_triggered: bool,
    /// Inputs for the path resolver
    pub context: NamingContext,
}

/// Encodes framebuffers and writes them to disk
///
/// Cheap to clone; clones share the encoding flag so overlapping encodes
/// are detected across worker threads.
#[derive(Debug, Clone, Default)]
pub struct EncodePipeline {
    encoding: Arc<AtomicBool>,
}

impl EncodePipeline {
    /// Create a pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an encode is currently running
    pub fn is_encoding(&self) -> bool {
        self.encoding.load(Ordering::SeqCst)
    }

    /// Encode a framebuffer and write it out, returning the written path
    ///
    /// Blocking; run via `spawn_blocking`. An encode invoked while a prior
    /// one is still recorded as running is logged as a data-loss risk and
    /// proceeds anyway.
    pub fn encode(&self, request: EncodeRequest) -> Result<PathBuf> {
        if self.encoding.swap(true, Ordering::SeqCst) {
            error!(
                "Encoder invoked while a previous encode is still running. \
                 The new capture may race or overwrite the old one."
            );
        }

        let result = write_encoded(&request);
        self.encoding.store(false, Ordering::SeqCst);
        result
    }
}

fn write_encoded(request: &EncodeRequest) -> Result<PathBuf> {
    let bytes = encode_image(&request.pixels, request.format, request.quality)?;

    // Manual captures always get the date/time name
    let pattern = if request.manually_triggered {
        NamePattern::DateTime
    } else {
        primary_pattern(request.naming)
    };
    let path = output::resolve(&request.context, pattern, request.manually_triggered, false)?;
    std::fs::write(&path, &bytes)?;
    debug!(
        "Encoded {}x{} {} ({} bytes) to {}",
        request.pixels.width,
        request.pixels.height,
        request.format,
        bytes.len(),
        path.display()
    );

    // Scheduled captures may keep a numbered copy at a predictable location
    // for external tooling
    if !request.manually_triggered && request.naming == NamingPolicy::DateTimeWithNumberedCopy {
        let copy = output::resolve(&request.context, NamePattern::Numbered, false, true)?;
        std::fs::copy(&path, &copy)?;
        debug!("Numbered copy at {}", copy.display());
    }

    Ok(path)
}

fn primary_pattern(naming: NamingPolicy) -> NamePattern {
    match naming {
        NamingPolicy::Numbered => NamePattern::Numbered,
        NamingPolicy::DateTime | NamingPolicy::DateTimeWithNumberedCopy => NamePattern::DateTime,
    }
}

/// Encode a framebuffer into an in-memory byte sequence
pub fn encode_image(pixels: &PixelBuffer, format: ImageFormat, quality: u8) -> Result<Vec<u8>> {
    if pixels.data.len() != pixels.expected_len() {
        return Err(LapseError::encode(format!(
            "framebuffer is {} bytes, expected {} for {}x{} RGB",
            pixels.data.len(),
            pixels.expected_len(),
            pixels.width,
            pixels.height
        )));
    }

    let mut out = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut out, quality).write_image(
                &pixels.data,
                pixels.width,
                pixels.height,
                ExtendedColorType::Rgb8,
            )?;
        }
        ImageFormat::Png => {
            PngEncoder::new(&mut out).write_image(
                &pixels.data,
                pixels.width,
                pixels.height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }
    Ok(out)
}
