//! Per-frame left/right target tracking for a robot vision coprocessor.
//!
//! This crate provides:
//! - re-exports of the geometry (`vision-pairs-core`) and decision
//!   (`vision-pairs-targets`) crates,
//! - [`FrameProcessor`], which runs one frame cycle: classify contours,
//!   check side alternation, pair, select the pair nearest the image
//!   center, annotate the frame and publish telemetry,
//! - the collaborator seams of that cycle ([`ContourSource`],
//!   [`FrameSink`], [`TelemetrySink`], [`FlagSource`]) with in-process
//!   implementations,
//! - [`VisionWorker`], the dedicated thread that owns the cycle,
//! - [`VisionConfig`], the JSON camera/network descriptor.
//!
//! ## Quickstart
//!
//! ```
//! use std::time::Duration;
//! use image::RgbImage;
//! use vision_pairs::core::Contour;
//! use vision_pairs::{
//!     ContourFrame, FrameGeometry, FrameProcessor, MemoryTelemetry, ProcessorParams, SharedFlag,
//! };
//!
//! let inverted = SharedFlag::default();
//! let processor =
//!     FrameProcessor::new(FrameGeometry::new(320, 240), ProcessorParams::default(), inverted);
//! let telemetry = MemoryTelemetry::new();
//!
//! let frame = ContourFrame {
//!     contours: vec![
//!         Contour::from_xy(&[(154.0, 100.0), (160.0, 100.0), (150.0, 140.0), (144.0, 140.0)]),
//!         Contour::from_xy(&[(170.0, 100.0), (176.0, 100.0), (186.0, 140.0), (180.0, 140.0)]),
//!     ],
//!     image: RgbImage::new(320, 240),
//!     process_time: Duration::from_millis(4),
//! };
//!
//! let out = processor.process(frame, &telemetry);
//! assert!(out.report.selected.is_some());
//! assert!(telemetry.get("Vision/targetPairs").is_some());
//! ```

pub use vision_pairs_core as core;
pub use vision_pairs_targets as targets;

pub use vision_pairs_core::Contour;
pub use vision_pairs_targets::{ClassifierParams, Side, Target, TargetPair, TargetPairRecord};

mod annotate;
mod config;
mod frame;
mod processor;
mod replay;
mod telemetry;
mod tunables;
mod worker;

pub use annotate::{
    annotate, CENTER_COLOR, CENTER_MARKER_RADIUS, LEFT_COLOR, RIGHT_COLOR, SELECTION_COLOR,
    SELECTION_MARKER_RADIUS, SELECTION_MARKER_THICKNESS,
};
pub use config::{CameraConfig, ConfigError, NetworkMode, VisionConfig, DEFAULT_CONFIG_PATH};
pub use frame::{
    ChannelFrameSink, ContourFrame, ContourSource, FrameGeometry, FrameSink, NullFrameSink,
    SourceError, StreamSpec,
};
pub use processor::{FrameProcessor, FrameReport, ProcessedFrame, ProcessorParams};
pub use replay::{RecordedFrame, ReplayError, ReplaySource};
pub use telemetry::{
    JsonLinesTelemetry, MemoryTelemetry, TelemetryKeys, TelemetrySink, TelemetryValue,
};
pub use tunables::{FlagSource, SharedFlag, CAMERA_INVERTED_KEY};
pub use worker::{run_frames, VisionWorker, WorkerStats, WORKER_THREAD_NAME};

/// Telemetry table all keys are published under by default.
pub const DEFAULT_TABLE: &str = "Vision";
