use core::ops::RangeInclusive;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// The index interval of items that must be materialized.
///
/// Both ends are inclusive. An empty sequence has no range at all, which is why the
/// engine reports `Option<VisibleRange>` rather than an empty value of this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // inclusive
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Half-open form, handy for slicing.
    pub fn to_exclusive(&self) -> core::ops::Range<usize> {
        self.start..self.end.saturating_add(1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionedItem {
    pub index: usize,
    /// Absolute offset from the top of the scrollable region.
    pub offset: u64,
    pub height: u32,
}

impl PositionedItem {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.height as u64)
    }
}
