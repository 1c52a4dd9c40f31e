//! Abstractions for page-numbered pagination.

use std::{num::NonZeroUsize, ops::Range};

/// One-based number of a [`Page`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Number(NonZeroUsize);

impl Number {
    /// The first [`Page`].
    pub const FIRST: Self = Self(NonZeroUsize::MIN);

    /// Creates a new [`Number`], if the provided value is not zero.
    #[must_use]
    pub fn new(val: usize) -> Option<Self> {
        NonZeroUsize::new(val).map(Self)
    }

    /// Returns the underlying value of this [`Number`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Number of items on a single [`Page`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Size(NonZeroUsize);

impl Size {
    /// Default [`Size`] of a [`Page`].
    pub const DEFAULT: Self = Self(match NonZeroUsize::new(12) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    });

    /// Creates a new [`Size`], if the provided value is not zero.
    #[must_use]
    pub fn new(val: usize) -> Option<Self> {
        NonZeroUsize::new(val).map(Self)
    }

    /// Returns the underlying value of this [`Size`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Arguments {
    /// Requested [`Page`] [`Number`].
    pub number: Number,

    /// [`Size`] of every [`Page`].
    pub size: Size,
}

impl Arguments {
    /// Returns the index range of the requested [`Page`] among `total`
    /// items.
    ///
    /// The range is empty if the requested [`Page`] is out of bounds.
    #[must_use]
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.number.get() - 1).saturating_mul(self.size.get());
        let end = start.saturating_add(self.size.get()).min(total);
        start.min(total)..end
    }
}

/// A single page of items.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// [`Number`] of this [`Page`].
    pub number: Number,

    /// [`Size`] this [`Page`] was cut with.
    pub size: Size,

    /// Total number of items across all the pages.
    pub total_count: usize,
}

impl<T> Page<T> {
    /// Cuts the [`Page`] requested by the [`Arguments`] out of all the
    /// `items`.
    #[must_use]
    pub fn cut(args: Arguments, items: Vec<T>) -> Self {
        let total_count = items.len();
        let range = args.range(total_count);
        Self {
            items: items
                .into_iter()
                .skip(range.start)
                .take(range.len())
                .collect(),
            number: args.number,
            size: args.size,
            total_count,
        }
    }

    /// Returns the total number of pages.
    ///
    /// Zero items produce zero pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total_count.div_ceil(self.size.get())
    }

    /// Indicates whether a next [`Page`] exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.number.get() < self.page_count()
    }

    /// Maps the items of this [`Page`].
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_count: self.total_count,
        }
    }
}
