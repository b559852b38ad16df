//! Live operator tunables read by the frame cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Dashboard key under which the camera-inverted tunable is conventionally stored.
pub const CAMERA_INVERTED_KEY: &str = "Vision/cameraInverted";

/// Read-only accessor for a boolean tunable.
///
/// Read once per frame. Implementations may be written concurrently by
/// another actor; a read racing a write may observe either value.
pub trait FlagSource {
    fn get(&self) -> bool;
}

impl FlagSource for bool {
    fn get(&self) -> bool {
        *self
    }
}

impl<F: FlagSource + ?Sized> FlagSource for Arc<F> {
    fn get(&self) -> bool {
        (**self).get()
    }
}

/// Lock-free boolean shared between the frame worker and its writers.
///
/// Clones share the same flag. Defaults to `false`.
#[derive(Clone, Debug, Default)]
pub struct SharedFlag(Arc<AtomicBool>);

impl SharedFlag {
    pub fn new(value: bool) -> Self {
        Self(Arc::new(AtomicBool::new(value)))
    }

    pub fn set(&self, value: bool) {
        self.0.store(value, Ordering::Relaxed);
    }
}

impl FlagSource for SharedFlag {
    fn get(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
