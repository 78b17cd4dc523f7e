//! Page-number pagination for the movie listing.

/// Number of pages needed for `total` items, `limit` per page.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
}

/// Pagination state of a listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Pagination {
    /// Current page, 1-based.
    pub page: u32,

    /// Items per page.
    pub limit: u32,

    /// Items across all pages.
    pub total: u64,
}

impl Pagination {
    /// Creates a new [`Pagination`] on the first page.
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total: 0,
        }
    }

    /// Returns the number of pages.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }

    /// Returns whether `page` exists.
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages()
    }

    /// Returns whether a previous page exists.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns whether a next page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Returns whether `page` lies beyond the last page.
    ///
    /// An empty listing still has a first page.
    #[must_use]
    pub fn is_past_end(&self, page: u32) -> bool {
        page > self.total_pages().max(1)
    }

    /// Moves to `page` if it exists, returning whether anything changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        if !self.contains(page) {
            return false;
        }
        self.page = page;
        true
    }

    /// Returns the controls rendered under the listing.
    #[must_use]
    pub fn controls(&self) -> Vec<PageControl> {
        let pages = self.total_pages();
        let mut controls = Vec::with_capacity(pages as usize + 2);

        controls.push(PageControl::Previous {
            target: self.page.saturating_sub(1).max(1),
            disabled: !self.has_previous(),
        });
        controls.extend((1..=pages).map(|number| PageControl::Page {
            number,
            current: number == self.page,
        }));
        controls.push(PageControl::Next {
            target: self.page.saturating_add(1),
            disabled: !self.has_next(),
        });

        controls
    }
}

/// A button under the listing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PageControl {
    /// "Prev" button.
    Previous {
        /// Page it leads to.
        target: u32,

        /// Indicator whether the button is disabled.
        disabled: bool,
    },

    /// Button for a page number.
    Page {
        /// Page number.
        number: u32,

        /// Indicator whether this is the current page.
        current: bool,
    },

    /// "Next" button.
    Next {
        /// Page it leads to.
        target: u32,

        /// Indicator whether the button is disabled.
        disabled: bool,
    },
}
