//! Byte offsets and ranges into TypeScript source text.
//!
//! Every node span, violation position and fix edit in namelint is expressed
//! as a [`TextRange`] of UTF-8 byte offsets. Offsets are `u32`; source files
//! larger than 4 GiB are not supported.

use std::fmt;
use std::ops::{Add, AddAssign, Index, Sub};

#[cfg(feature = "serde")]
mod serde_impls;

/// A byte offset into a source text.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "get-size", derive(get_size2::GetSize))]
pub struct TextSize {
    raw: u32,
}

impl TextSize {
    pub const fn new(offset: u32) -> Self {
        Self { raw: offset }
    }

    pub const fn to_u32(self) -> u32 {
        self.raw
    }

    pub const fn to_usize(self) -> usize {
        self.raw as usize
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.raw.checked_sub(rhs.raw).map(Self::new)
    }
}

impl fmt::Debug for TextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<u32> for TextSize {
    fn from(raw: u32) -> Self {
        Self::new(raw)
    }
}

impl From<TextSize> for u32 {
    fn from(size: TextSize) -> Self {
        size.raw
    }
}

impl From<TextSize> for usize {
    fn from(size: TextSize) -> Self {
        size.to_usize()
    }
}

impl TryFrom<usize> for TextSize {
    type Error = std::num::TryFromIntError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        u32::try_from(value).map(Self::new)
    }
}

impl Add for TextSize {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.raw + rhs.raw)
    }
}

impl AddAssign for TextSize {
    fn add_assign(&mut self, rhs: Self) {
        self.raw += rhs.raw;
    }
}

impl Sub for TextSize {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.raw - rhs.raw)
    }
}

/// A half-open range `[start, end)` of byte offsets.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "get-size", derive(get_size2::GetSize))]
pub struct TextRange {
    start: TextSize,
    end: TextSize,
}

impl TextRange {
    /// Creates a range from `start` to `end`.
    ///
    /// # Panics
    /// If `end < start`.
    pub fn new(start: TextSize, end: TextSize) -> Self {
        assert!(start <= end, "invalid text range: {start:?}..{end:?}");
        Self { start, end }
    }

    /// A range of `len` bytes starting at `offset`.
    pub fn at(offset: TextSize, len: TextSize) -> Self {
        Self::new(offset, offset + len)
    }

    /// An empty range at `offset`.
    pub fn empty(offset: TextSize) -> Self {
        Self::new(offset, offset)
    }

    pub const fn start(self) -> TextSize {
        self.start
    }

    pub const fn end(self) -> TextSize {
        self.end
    }

    pub fn len(self) -> TextSize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn contains_range(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two ranges share at least one byte.
    pub fn intersects_strictly(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn to_std(self) -> std::ops::Range<usize> {
        self.start.to_usize()..self.end.to_usize()
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Index<TextRange> for str {
    type Output = str;

    fn index(&self, index: TextRange) -> &str {
        &self[index.to_std()]
    }
}

impl Index<TextRange> for String {
    type Output = str;

    fn index(&self, index: TextRange) -> &str {
        &self[index.to_std()]
    }
}

/// Something that occupies a span of source text.
pub trait Ranged {
    fn range(&self) -> TextRange;

    fn start(&self) -> TextSize {
        self.range().start()
    }

    fn end(&self) -> TextSize {
        self.range().end()
    }
}

impl Ranged for TextRange {
    fn range(&self) -> TextRange {
        *self
    }
}
