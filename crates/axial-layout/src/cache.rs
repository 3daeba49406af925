//! Memoised axis extents.
//!
//! Measuring an axis means laying out its labels, so [`PlotArea`] keeps the
//! extents of the last frames keyed by axis and length. An entry survives
//! as long as some layout asked for it within the last two frames.
//!
//! [`PlotArea`]: crate::PlotArea

use std::cell::RefCell;
use std::collections::HashMap;

use crate::axis::AxisId;
use crate::measure::MeasureExtent;

/// Frames an unused extent is kept for.
const MAX_IDLE_FRAMES: u64 = 2;

/// An axis measured at one length. Lengths compare bitwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtentKey {
    /// Measured axis
    pub axis: AxisId,
    /// `f64::to_bits` of the length
    pub length_bits: u64,
}

impl ExtentKey {
    /// Key for `axis` measured at `length`.
    #[must_use]
    pub fn new(axis: AxisId, length: f64) -> Self {
        Self {
            axis,
            length_bits: length.to_bits(),
        }
    }
}

/// Extents by key, stamped with the frame that last read or wrote them.
#[derive(Debug, Default, Clone)]
pub struct ExtentCache {
    extents: HashMap<ExtentKey, (f64, u64)>,
    frame: u64,
    hits: usize,
    misses: usize,
}

impl ExtentCache {
    /// Empty cache at frame 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached extent for `key`, counted as a hit or a miss.
    pub fn get(&mut self, key: ExtentKey) -> Option<f64> {
        let frame = self.frame;
        match self.extents.get_mut(&key) {
            Some((extent, stamp)) => {
                *stamp = frame;
                self.hits += 1;
                Some(*extent)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Remember an extent.
    pub fn insert(&mut self, key: ExtentKey, extent: f64) {
        self.extents.insert(key, (extent, self.frame));
    }

    /// Forget every length measured for `axis`.
    pub fn invalidate_axis(&mut self, axis: AxisId) {
        self.extents.retain(|key, _| key.axis != axis);
    }

    /// Forget everything and reset the counters.
    pub fn clear(&mut self) {
        self.extents.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Lookups answered from the cache.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Lookups that had to measure.
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// End a frame. Extents idle for more than two frames are dropped.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
        let frame = self.frame;
        self.extents
            .retain(|_, &mut (_, stamp)| frame - stamp <= MAX_IDLE_FRAMES);
    }

    /// Number of cached extents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// Check if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }
}

/// Measures through an [`ExtentCache`], falling back to `inner` on a miss.
///
/// Border hints are not cached.
pub struct CachedMeasure<'a, M: ?Sized> {
    inner: &'a M,
    cache: RefCell<&'a mut ExtentCache>,
}

impl<'a, M: MeasureExtent + ?Sized> CachedMeasure<'a, M> {
    /// Wrap `inner` with `cache`.
    pub fn new(inner: &'a M, cache: &'a mut ExtentCache) -> Self {
        Self {
            inner,
            cache: RefCell::new(cache),
        }
    }
}

impl<M: MeasureExtent + ?Sized> MeasureExtent for CachedMeasure<'_, M> {
    fn extent(&self, axis: AxisId, length: f64) -> f64 {
        let key = ExtentKey::new(axis, length);
        let mut cache = self.cache.borrow_mut();
        if let Some(extent) = cache.get(key) {
            return extent;
        }
        let extent = self.inner.extent(axis, length);
        cache.insert(key, extent);
        extent
    }

    fn border_dist_hint(&self, axis: AxisId) -> (f64, f64) {
        self.inner.border_dist_hint(axis)
    }
}
