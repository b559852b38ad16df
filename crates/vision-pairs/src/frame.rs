//! Frame collaborators: where contours come from and where annotated frames go.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use image::imageops::{self, FilterType};
use image::RgbImage;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use vision_pairs_core::Contour;

/// Video-mode size of the processed camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
}

impl FrameGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Steering reference point: half the width and height in whole pixels.
    pub fn center(&self) -> Point2<f64> {
        Point2::new(f64::from(self.width / 2), f64::from(self.height / 2))
    }
}

/// One frame's worth of contour-stage output.
#[derive(Clone, Debug)]
pub struct ContourFrame {
    /// Filtered contours in the order the vision stage produced them.
    pub contours: Vec<Contour>,
    /// Source image; annotated in place and handed to the frame sink.
    pub image: RgbImage,
    /// Time the upstream stage spent extracting `contours`.
    pub process_time: Duration,
}

/// Errors returned when asking a source for the next frame.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// This frame could not be acquired; the next one may succeed.
    #[error("frame acquisition failed: {0}")]
    Acquisition(String),
    /// The source will never produce another frame.
    #[error("contour source exhausted")]
    Exhausted,
}

/// Blocking supplier of per-frame contours.
pub trait ContourSource {
    fn next_frame(&mut self) -> Result<ContourFrame, SourceError>;
}

/// Consumer of annotated frames. Takes ownership; frames are never copied back.
pub trait FrameSink {
    fn put_frame(&mut self, frame: RgbImage);
}

/// Name and fixed resolution of the processed output stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSpec {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Default for StreamSpec {
    fn default() -> Self {
        Self {
            name: "Processed".to_string(),
            width: 320,
            height: 240,
        }
    }
}

/// Forwards frames over a channel at the stream's resolution.
///
/// Frames already at the target size are moved through untouched. Once
/// the receiver is gone, frames are dropped.
#[derive(Debug)]
pub struct ChannelFrameSink {
    spec: StreamSpec,
    tx: Sender<RgbImage>,
}

impl ChannelFrameSink {
    pub fn new(spec: StreamSpec) -> (Self, Receiver<RgbImage>) {
        let (tx, rx) = mpsc::channel();
        (Self { spec, tx }, rx)
    }

    pub fn spec(&self) -> &StreamSpec {
        &self.spec
    }
}

impl FrameSink for ChannelFrameSink {
    fn put_frame(&mut self, frame: RgbImage) {
        let frame = if frame.dimensions() == (self.spec.width, self.spec.height) {
            frame
        } else {
            imageops::resize(
                &frame,
                self.spec.width,
                self.spec.height,
                FilterType::Triangle,
            )
        };
        if self.tx.send(frame).is_err() {
            log::debug!("stream '{}' has no receiver; frame dropped", self.spec.name);
        }
    }
}

/// Sink that drops every frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullFrameSink;

impl FrameSink for NullFrameSink {
    fn put_frame(&mut self, _frame: RgbImage) {}
}
