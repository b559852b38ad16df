//! Contour source backed by recorded frames.
//!
//! A recording is a JSON array of frames:
//!
//! ```json
//! [ { "contours": [ [[104, 100], [110, 100], [100, 140], [94, 140]] ], "process_time_ms": 2.4 } ]
//! ```

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbImage;
use serde::{Deserialize, Serialize};
use vision_pairs_core::Contour;

use crate::frame::{ContourFrame, ContourSource, FrameGeometry, SourceError};

#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    #[error("could not open '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One recorded frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub contours: Vec<Contour>,
    #[serde(default)]
    pub process_time_ms: f64,
}

/// Plays recorded frames back over blank images of a fixed size.
#[derive(Clone, Debug)]
pub struct ReplaySource {
    frames: VecDeque<RecordedFrame>,
    geometry: FrameGeometry,
}

impl ReplaySource {
    pub fn new(frames: Vec<RecordedFrame>, geometry: FrameGeometry) -> Self {
        Self {
            frames: frames.into(),
            geometry,
        }
    }

    pub fn load_json(path: impl AsRef<Path>, geometry: FrameGeometry) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let frames: Vec<RecordedFrame> = serde_json::from_str(&raw)?;
        Ok(Self::new(frames, geometry))
    }

    /// Frames not yet played.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl ContourSource for ReplaySource {
    fn next_frame(&mut self) -> Result<ContourFrame, SourceError> {
        let frame = self.frames.pop_front().ok_or(SourceError::Exhausted)?;
        let process_time = Duration::try_from_secs_f64(frame.process_time_ms / 1000.0)
            .map_err(|err| {
                SourceError::Acquisition(format!(
                    "bad process time {} ms: {err}",
                    frame.process_time_ms
                ))
            })?;
        Ok(ContourFrame {
            contours: frame.contours,
            image: RgbImage::new(self.geometry.width, self.geometry.height),
            process_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_frames_in_order_then_exhausts() {
        let raw = r#"[
            { "contours": [ [[0, 0], [4, 0], [4, 9]] ], "process_time_ms": 1.5 },
            { "contours": [] }
        ]"#;
        let frames: Vec<RecordedFrame> = serde_json::from_str(raw).expect("parse");
        let mut source = ReplaySource::new(frames, FrameGeometry::new(64, 48));

        let first = source.next_frame().expect("frame 1");
        assert_eq!(first.contours.len(), 1);
        assert_eq!(first.process_time, Duration::from_micros(1500));
        assert_eq!(first.image.dimensions(), (64, 48));

        let second = source.next_frame().expect("frame 2");
        assert!(second.contours.is_empty());
        assert_eq!(second.process_time, Duration::ZERO);

        assert!(matches!(source.next_frame(), Err(SourceError::Exhausted)));
    }

    #[test]
    fn negative_process_time_skips_the_frame() {
        let frames = vec![
            RecordedFrame {
                contours: Vec::new(),
                process_time_ms: -1.0,
            },
            RecordedFrame {
                contours: Vec::new(),
                process_time_ms: 2.0,
            },
        ];
        let mut source = ReplaySource::new(frames, FrameGeometry::new(8, 8));
        assert!(matches!(source.next_frame(), Err(SourceError::Acquisition(_))));
        assert_eq!(source.remaining(), 1);
        assert!(source.next_frame().is_ok());
    }
}
