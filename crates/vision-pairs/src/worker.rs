//! Dedicated frame worker.
//!
//! One thread owns the contour source, the processor and both sinks. Frame
//! N is fully classified, annotated, handed off and published before frame
//! N+1 is requested, so no two frame cycles ever overlap.

use std::io;
use std::thread::{self, JoinHandle};

use serde::Serialize;

use crate::frame::{ContourSource, FrameSink, SourceError};
use crate::processor::FrameProcessor;
use crate::telemetry::TelemetrySink;
use crate::tunables::FlagSource;

/// Name given to the worker thread.
pub const WORKER_THREAD_NAME: &str = "vision-worker";

/// Frame counts of a finished worker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStats {
    pub frames_processed: u64,
    pub frames_skipped: u64,
}

/// Run frame cycles until `source` is exhausted.
///
/// A frame the source fails to acquire is skipped before classification;
/// the loop then asks for the next one.
pub fn run_frames<S, F, K, T>(
    source: &mut S,
    processor: &FrameProcessor<F>,
    sink: &mut K,
    telemetry: &T,
) -> WorkerStats
where
    S: ContourSource + ?Sized,
    F: FlagSource,
    K: FrameSink + ?Sized,
    T: TelemetrySink + ?Sized,
{
    let mut stats = WorkerStats::default();
    loop {
        match source.next_frame() {
            Ok(frame) => {
                let processed = processor.process(frame, telemetry);
                sink.put_frame(processed.image);
                stats.frames_processed += 1;
            }
            Err(SourceError::Exhausted) => {
                log::info!(
                    "contour source exhausted after {} frames ({} skipped)",
                    stats.frames_processed,
                    stats.frames_skipped
                );
                return stats;
            }
            Err(err) => {
                log::warn!("skipping frame: {err}");
                stats.frames_skipped += 1;
            }
        }
    }
}

/// Handle to the running frame worker.
#[derive(Debug)]
pub struct VisionWorker {
    handle: JoinHandle<WorkerStats>,
}

impl VisionWorker {
    /// Start the worker thread. It runs until the source is exhausted.
    pub fn spawn<S, F, K, T>(
        mut source: S,
        processor: FrameProcessor<F>,
        mut sink: K,
        telemetry: T,
    ) -> io::Result<Self>
    where
        S: ContourSource + Send + 'static,
        F: FlagSource + Send + 'static,
        K: FrameSink + Send + 'static,
        T: TelemetrySink + Send + 'static,
    {
        let geometry = processor.geometry();
        let handle = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                log::info!(
                    "frame worker started for {}x{} frames",
                    geometry.width,
                    geometry.height
                );
                run_frames(&mut source, &processor, &mut sink, &telemetry)
            })?;
        Ok(Self { handle })
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the worker ends. `Err` carries the panic payload.
    pub fn join(self) -> thread::Result<WorkerStats> {
        self.handle.join()
    }
}
