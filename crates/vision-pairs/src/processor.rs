//! One complete frame cycle.
//!
//! Classification, ordering, pairing and selection come from
//! `vision-pairs-targets`; this module wires them to the frame image, the
//! inverted-camera tunable and the telemetry sink.

use std::time::{Duration, Instant};

use image::RgbImage;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use vision_pairs_targets::{
    classify_contours, form_pairs, rank_pairs, sort_targets, validate_alternation,
    ClassifierParams, Target, TargetPairRecord,
};

use crate::annotate::annotate;
use crate::frame::{ContourFrame, FrameGeometry};
use crate::telemetry::{TelemetryKeys, TelemetrySink, TelemetryValue};
use crate::tunables::FlagSource;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Settings for the frame cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorParams {
    pub classifier: ClassifierParams,
    /// Telemetry table prefix, e.g. `Vision` for `Vision/targetPairs`.
    pub table: String,
}

impl Default for ProcessorParams {
    fn default() -> Self {
        Self {
            classifier: ClassifierParams::default(),
            table: crate::DEFAULT_TABLE.to_string(),
        }
    }
}

/// What one frame cycle decided.
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    /// Targets in scan order.
    pub targets: Vec<Target>,
    pub inverted: bool,
    /// Whether target sides strictly alternated.
    pub is_ordered: bool,
    /// Candidate pairs, closest to the image center first.
    pub pairs: Vec<TargetPairRecord>,
    /// The closest candidate, if any.
    pub selected: Option<TargetPairRecord>,
    pub image_center: Point2<f64>,
    /// Upstream contour-extraction time.
    pub process_time: Duration,
    /// Time spent in this cycle from classification through serialization.
    pub post_process_time: Duration,
}

/// Annotated image and report of one frame.
#[derive(Clone, Debug)]
pub struct ProcessedFrame {
    pub image: RgbImage,
    pub report: FrameReport,
}

/// Runs the frame cycle for one camera.
///
/// Holds no per-frame state: every call starts from the frame it is given
/// and the current value of the inverted-camera flag.
#[derive(Debug)]
pub struct FrameProcessor<F> {
    geometry: FrameGeometry,
    params: ProcessorParams,
    keys: TelemetryKeys,
    inverted: F,
}

impl<F: FlagSource> FrameProcessor<F> {
    pub fn new(geometry: FrameGeometry, params: ProcessorParams, inverted: F) -> Self {
        let keys = TelemetryKeys::new(&params.table);
        Self {
            geometry,
            params,
            keys,
            inverted,
        }
    }

    #[inline]
    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    #[inline]
    pub fn params(&self) -> &ProcessorParams {
        &self.params
    }

    #[inline]
    pub fn keys(&self) -> &TelemetryKeys {
        &self.keys
    }

    /// Process one frame and publish its telemetry.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip_all,
            fields(contours = frame.contours.len(), width = self.geometry.width, height = self.geometry.height)
        )
    )]
    pub fn process<T>(&self, frame: ContourFrame, telemetry: &T) -> ProcessedFrame
    where
        T: TelemetrySink + ?Sized,
    {
        let started = Instant::now();
        let ContourFrame {
            contours,
            mut image,
            process_time,
        } = frame;

        let inverted = self.inverted.get();
        let image_center = self.geometry.center();

        let mut targets = classify_contours(&contours, inverted, &self.params.classifier);
        sort_targets(&mut targets, inverted);
        let is_ordered = validate_alternation(&targets);

        let ranked = rank_pairs(form_pairs(&targets), image_center.x);
        let pairs: Vec<TargetPairRecord> = ranked.iter().map(|p| p.to_record()).collect();
        let selected = pairs.first().cloned();

        annotate(
            &mut image,
            &targets,
            image_center,
            selected.as_ref().map(TargetPairRecord::center),
        );

        let pairs_json: Vec<String> = pairs
            .iter()
            .filter_map(|p| match p.to_json() {
                Ok(json) => Some(json),
                Err(err) => {
                    log::warn!("skipping unserializable pair record: {err}");
                    None
                }
            })
            .collect();

        let post_process_time = started.elapsed();

        log::debug!(
            "frame: {} targets, {} pairs, ordered={}, inverted={}, selected={:?}",
            targets.len(),
            pairs.len(),
            is_ordered,
            inverted,
            selected.as_ref().map(|p| (p.center_x, p.center_y)),
        );

        telemetry.publish(
            &self.keys.target_pairs,
            TelemetryValue::StringArray(pairs_json),
        );
        telemetry.publish(
            &self.keys.process_time,
            TelemetryValue::Number(millis(process_time)),
        );
        telemetry.publish(
            &self.keys.post_process_time,
            TelemetryValue::Number(millis(post_process_time)),
        );
        telemetry.publish(
            &self.keys.image_center_x,
            TelemetryValue::Number(image_center.x),
        );
        telemetry.publish(&self.keys.is_ordered, TelemetryValue::Boolean(is_ordered));

        ProcessedFrame {
            image,
            report: FrameReport {
                targets,
                inverted,
                is_ordered,
                pairs,
                selected,
                image_center,
                process_time,
                post_process_time,
            },
        }
    }
}

/// Milliseconds with nanosecond resolution.
fn millis(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}
