//! Sequential, fixed-size paging over a dataset.

use serde::Serialize;

use crate::dataset::{Dataset, TripRecord};

pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PagerState {
    /// Nothing shown yet.
    AtStart,
    /// Some pages shown, more may follow.
    Paging,
    /// Every record has been returned.
    Exhausted,
}

/// One slice of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a> {
    /// 1-based position of the first record within the dataset, 0 when empty.
    pub first_row: usize,
    /// 1-based position of the last record within the dataset, 0 when empty.
    pub last_row: usize,
    /// This page reaches the end of the dataset.
    pub is_last: bool,
    /// This page holds the entire dataset.
    pub is_whole: bool,
    pub records: &'a [TripRecord],
}

impl Page<'_> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Cursor over a borrowed [`Dataset`]. Independent pagers over the same
/// dataset do not affect each other.
#[derive(Debug, Clone)]
pub struct Pager<'a> {
    dataset: &'a Dataset,
    cursor: usize,
    state: PagerState,
}

impl<'a> Pager<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Pager {
            dataset,
            cursor: 0,
            state: PagerState::AtStart,
        }
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == PagerState::Exhausted
    }

    /// Returns up to [`PAGE_SIZE`] records from the cursor and advances it.
    ///
    /// Calling this on an exhausted pager returns an empty page.
    pub fn next_page(&mut self) -> Page<'a> {
        let total = self.dataset.len();
        if self.is_exhausted() {
            return Page {
                first_row: 0,
                last_row: 0,
                is_last: true,
                is_whole: false,
                records: &[],
            };
        }

        let start = self.cursor;
        let end = (start + PAGE_SIZE).min(total);
        let records = &self.dataset.records()[start..end];

        self.cursor = end;
        self.state = if self.cursor == total {
            PagerState::Exhausted
        } else {
            PagerState::Paging
        };

        Page {
            first_row: if records.is_empty() { 0 } else { start + 1 },
            last_row: end,
            is_last: self.is_exhausted(),
            is_whole: start == 0 && self.is_exhausted(),
            records,
        }
    }
}

impl<'a> Iterator for Pager<'a> {
    type Item = Page<'a>;

    /// Yields non-empty pages until the dataset is exhausted.
    fn next(&mut self) -> Option<Self::Item> {
        let page = self.next_page();
        (!page.is_empty()).then_some(page)
    }
}
