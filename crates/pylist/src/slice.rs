use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{ListError, Result};

/// `start:stop:step` with every bound optional. Negative bounds count from
/// the end; omitted bounds default according to the sign of `step`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SliceSpec {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

/// Bounds after normalisation against a concrete length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceIndices {
    pub start: isize,
    pub stop: isize,
    pub step: isize,
    pub count: usize,
}

impl SliceSpec {
    pub const fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    pub const fn full() -> Self {
        Self::new(None, None, None)
    }

    pub const fn reversed() -> Self {
        Self::new(None, None, Some(-1))
    }

    pub const fn with_step(self, step: isize) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    pub fn indices(&self, len: usize) -> Result<SliceIndices> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(ListError::ZeroStep);
        }
        // `-step` must stay representable.
        let step = step.max(-isize::MAX);

        let len = len as isize;
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: isize| {
            if bound < 0 {
                (bound + len).max(lower)
            } else {
                bound.min(upper)
            }
        };

        let start = self
            .start
            .map_or(if step < 0 { upper } else { lower }, clamp);
        let stop = self.stop.map_or(if step < 0 { lower } else { upper }, clamp);

        let count = if step > 0 && start < stop {
            ((stop - start - 1) / step + 1) as usize
        } else if step < 0 && stop < start {
            ((start - stop - 1) / -step + 1) as usize
        } else {
            0
        };

        Ok(SliceIndices {
            start,
            stop,
            step,
            count,
        })
    }

    /// Positions selected from a sequence of `len` elements, in visiting order.
    pub fn positions(&self, len: usize) -> Result<impl Iterator<Item = usize> + use<>> {
        let SliceIndices {
            start, step, count, ..
        } = self.indices(len)?;
        Ok((0..count).map(move |k| (start + k as isize * step) as usize))
    }
}

impl From<RangeFull> for SliceSpec {
    fn from(_: RangeFull) -> Self {
        Self::full()
    }
}

impl From<Range<isize>> for SliceSpec {
    fn from(r: Range<isize>) -> Self {
        Self::new(Some(r.start), Some(r.end), None)
    }
}

impl From<RangeFrom<isize>> for SliceSpec {
    fn from(r: RangeFrom<isize>) -> Self {
        Self::new(Some(r.start), None, None)
    }
}

impl From<RangeTo<isize>> for SliceSpec {
    fn from(r: RangeTo<isize>) -> Self {
        Self::new(None, Some(r.end), None)
    }
}
