// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Paging over an already loaded list.
//!
//! Pages are 1-indexed. An empty list is a single empty page, and a request
//! for a page outside `[1, total_pages]` is clamped rather than rejected.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_pages: usize,
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Clamps `page` into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Returns the slice `[(page-1)*page_size, page*page_size)` of `items`, with
/// `page` clamped and a `page_size` of zero treated as one.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total = total_pages(items.len(), page_size);
    let number = clamp_page(page, total);
    let start = ((number - 1) * page_size).min(items.len());
    let end = (start + page_size).min(items.len());
    Page {
        items: items[start..end].to_vec(),
        number,
        total_pages: total,
    }
}

/// Current-page cursor for a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Pager {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn go_to(&mut self, page: usize, count: usize) {
        self.current = clamp_page(page, total_pages(count, self.page_size));
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self, count: usize) -> bool {
        self.current < total_pages(count, self.page_size)
    }

    /// Advances one page; stays put on the last page.
    pub fn next(&mut self, count: usize) {
        self.go_to(self.current + 1, count);
    }

    /// Steps back one page; stays put on the first page.
    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1).max(1);
    }

    pub fn slice<T: Clone>(&self, items: &[T]) -> Page<T> {
        paginate(items, self.page_size, self.current)
    }
}
