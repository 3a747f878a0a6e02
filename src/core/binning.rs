//! Fixed-width binning for histograms and start-window grouping for stacked
//! histograms.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// Number of equal start-time windows used to color stacked histograms.
pub const DEFAULT_START_WINDOWS: usize = 30;

/// Largest bin count a layout may allocate.
pub const MAX_BINS: usize = 10_000;

/// Bin geometry fitted to a set of values.
///
/// Bounds are `floor(min)` and `ceil(max)`; the bin count always includes one
/// trailing bin so a maximum sitting exactly on a boundary still has a home.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinLayout {
    pub min: f64,
    pub max: f64,
    pub width: f64,
    pub count: usize,
}

impl BinLayout {
    pub fn fit<I>(values: I, width: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if !width.is_finite() || width <= 0.0 {
            return Err(ChartError::InvalidBucketSize(width));
        }

        let (min, max) = value_extent(values).ok_or_else(|| {
            ChartError::InvalidData("cannot bin an empty value set".to_owned())
        })?;
        let min = min.floor();
        let max = max.ceil();
        let span_bins = ((max - min) / width).ceil();
        if !span_bins.is_finite() || span_bins >= MAX_BINS as f64 {
            return Err(ChartError::InvalidData(format!(
                "value range {min}..{max} needs more than {MAX_BINS} bins of width {width}"
            )));
        }
        let count = (span_bins as usize + 1).max(1);

        Ok(Self {
            min,
            max,
            width,
            count,
        })
    }

    #[must_use]
    pub fn index_of(&self, value: f64) -> usize {
        let raw = ((value - self.min) / self.width).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.count - 1)
        }
    }

    #[must_use]
    pub fn bin_start(&self, index: usize) -> f64 {
        self.min + index as f64 * self.width
    }

    #[must_use]
    pub fn bin_end(&self, index: usize) -> f64 {
        self.bin_start(index) + self.width
    }

    /// Right edge of the last bin, used as the upper x-domain bound.
    #[must_use]
    pub fn domain_end(&self) -> f64 {
        self.max + self.width
    }
}

/// One histogram bucket together with the entries that fell into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin<T> {
    pub start: f64,
    pub count: usize,
    pub entries: Vec<T>,
}

/// Distributes `(value, entry)` pairs into the bins of `layout`.
pub fn bin_entries<T, I>(layout: &BinLayout, items: I) -> Vec<HistogramBin<T>>
where
    I: IntoIterator<Item = (f64, T)>,
{
    let mut bins: Vec<HistogramBin<T>> = (0..layout.count)
        .map(|index| HistogramBin {
            start: layout.bin_start(index),
            count: 0,
            entries: Vec::new(),
        })
        .collect();

    for (value, entry) in items {
        let bin = &mut bins[layout.index_of(value)];
        bin.count += 1;
        bin.entries.push(entry);
    }

    trace!(bin_count = bins.len(), "binned histogram entries");
    bins
}

/// Equal-width partition of a secondary value range into `count` windows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowPartition {
    pub min: f64,
    pub max: f64,
    pub size: f64,
    pub count: usize,
}

impl WindowPartition {
    #[must_use]
    pub fn new(min: f64, max: f64, count: usize) -> Self {
        let count = count.max(1);
        let size = (max - min) / count as f64;
        let size = if size == 0.0 || !size.is_finite() {
            1.0
        } else {
            size
        };
        Self {
            min,
            max,
            size,
            count,
        }
    }

    pub fn fit<I>(values: I, count: usize) -> ChartResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = value_extent(values).ok_or_else(|| {
            ChartError::InvalidData("cannot partition an empty value set".to_owned())
        })?;
        Ok(Self::new(min, max, count))
    }

    #[must_use]
    pub fn window_of(&self, value: f64) -> usize {
        let raw = ((value - self.min) / self.size).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.count - 1)
        }
    }

    #[must_use]
    pub fn midpoint(&self, window: usize) -> f64 {
        self.min + (window as f64 + 0.5) * self.size
    }

    /// Position of `value` within the observed range, in `[0, 1]` for values
    /// inside it.
    #[must_use]
    pub fn normalized(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        let range = if range == 0.0 { 1.0 } else { range };
        (value - self.min) / range
    }
}

/// One colored slice of a stacked bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackSegment {
    pub key: usize,
    pub count: usize,
    pub representative: f64,
}

/// Histogram bucket split into per-window segments, ordered by window key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBin {
    pub start: f64,
    pub total: usize,
    pub segments: SmallVec<[StackSegment; 8]>,
}

impl StackedBin {
    /// Vertical center, in count units, of the segment holding `key`.
    #[must_use]
    pub fn segment_center(&self, key: usize) -> Option<f64> {
        let mut below = 0usize;
        for segment in &self.segments {
            if segment.key == key {
                return Some(below as f64 + segment.count as f64 / 2.0);
            }
            below += segment.count;
        }
        None
    }
}

/// Bins `(value, secondary)` pairs and splits each bin by the secondary
/// value's window in `partition`.
pub fn stack_bins<I>(layout: &BinLayout, partition: &WindowPartition, items: I) -> Vec<StackedBin>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut bins: Vec<StackedBin> = (0..layout.count)
        .map(|index| StackedBin {
            start: layout.bin_start(index),
            total: 0,
            segments: SmallVec::new(),
        })
        .collect();

    for (value, secondary) in items {
        let key = partition.window_of(secondary);
        let bin = &mut bins[layout.index_of(value)];
        bin.total += 1;
        match bin.segments.binary_search_by_key(&key, |segment| segment.key) {
            Ok(position) => bin.segments[position].count += 1,
            Err(position) => bin.segments.insert(
                position,
                StackSegment {
                    key,
                    count: 1,
                    representative: partition.midpoint(key),
                },
            ),
        }
    }

    trace!(bin_count = bins.len(), "stacked histogram bins");
    bins
}

/// Returns `(min, max)` over finite values, or `None` when there are none.
#[must_use]
pub fn value_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}
