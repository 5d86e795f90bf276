//! Single-slot memoisation of averages and resampled arrays.
//!
//! Each slot remembers only the most recent request. A request with different
//! bounds (or bin count) recomputes and overwrites the slot. Hits require
//! exact equality of every key.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::trace;
use serde::{Deserialize, Serialize};

use crate::Float;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct AverageEntry {
    min_wavelength: Float,
    max_wavelength: Float,
    value: Float,
}

#[derive(Debug, Clone, PartialEq)]
struct SampleEntry {
    min_wavelength: Float,
    max_wavelength: Float,
    bins: usize,
    samples: Arc<[Float]>,
}

/// Cached derived values of a spectral function.
///
/// The slots sit behind mutexes so a function can be queried through a
/// shared reference from several threads. Each worker should still hold its
/// own clone: interleaved requests for different bands keep evicting each
/// other.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(from = "CacheState", into = "CacheState")]
pub struct SpectralCache {
    average: Mutex<Option<AverageEntry>>,
    sample: Mutex<Option<SampleEntry>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // Slots are only ever overwritten whole, so a poisoned slot is still consistent.
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SpectralCache {
    pub fn new() -> SpectralCache {
        SpectralCache::default()
    }

    /// Returns the cached average for this band, or computes and stores it.
    pub fn average(
        &self,
        min_wavelength: Float,
        max_wavelength: Float,
        compute: impl FnOnce() -> Float,
    ) -> Float {
        let hit = (*lock(&self.average)).filter(|e| {
            e.min_wavelength == min_wavelength && e.max_wavelength == max_wavelength
        });
        if let Some(entry) = hit {
            return entry.value;
        }

        trace!(
            "Average cache miss for [{}, {}]",
            min_wavelength,
            max_wavelength
        );
        let value = compute();
        *lock(&self.average) = Some(AverageEntry {
            min_wavelength,
            max_wavelength,
            value,
        });
        value
    }

    /// Returns the cached samples for this band and bin count, or computes and
    /// stores them. A hit returns the same shared array as the previous call.
    pub fn sample(
        &self,
        min_wavelength: Float,
        max_wavelength: Float,
        bins: usize,
        compute: impl FnOnce() -> Vec<Float>,
    ) -> Arc<[Float]> {
        if let Some(entry) = lock(&self.sample).as_ref() {
            if entry.min_wavelength == min_wavelength
                && entry.max_wavelength == max_wavelength
                && entry.bins == bins
            {
                return Arc::clone(&entry.samples);
            }
        }

        trace!(
            "Sample cache miss for [{}, {}] with {} bins",
            min_wavelength,
            max_wavelength,
            bins
        );
        let samples: Arc<[Float]> = compute().into();
        debug_assert_eq!(bins, samples.len());
        *lock(&self.sample) = Some(SampleEntry {
            min_wavelength,
            max_wavelength,
            bins,
            samples: Arc::clone(&samples),
        });
        samples
    }

    /// Drops both entries. Must be called whenever the underlying data changes.
    pub fn clear(&self) {
        *lock(&self.average) = None;
        *lock(&self.sample) = None;
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.average).is_none() && lock(&self.sample).is_none()
    }
}

impl Clone for SpectralCache {
    fn clone(&self) -> Self {
        SpectralCache {
            average: Mutex::new(*lock(&self.average)),
            sample: Mutex::new(lock(&self.sample).clone()),
        }
    }
}

/// Persisted form of the cache.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheState {
    #[serde(default)]
    average: Option<AverageEntry>,
    #[serde(default)]
    sample: Option<SampleState>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SampleState {
    min_wavelength: Float,
    max_wavelength: Float,
    samples: Vec<Float>,
}

impl From<CacheState> for SpectralCache {
    fn from(state: CacheState) -> Self {
        let sample = state.sample.map(|s| SampleEntry {
            min_wavelength: s.min_wavelength,
            max_wavelength: s.max_wavelength,
            bins: s.samples.len(),
            samples: s.samples.into(),
        });
        SpectralCache {
            average: Mutex::new(state.average),
            sample: Mutex::new(sample),
        }
    }
}

impl From<SpectralCache> for CacheState {
    fn from(cache: SpectralCache) -> Self {
        let average = *lock(&cache.average);
        let sample = lock(&cache.sample).as_ref().map(|s| SampleState {
            min_wavelength: s.min_wavelength,
            max_wavelength: s.max_wavelength,
            samples: s.samples.to_vec(),
        });
        CacheState { average, sample }
    }
}
