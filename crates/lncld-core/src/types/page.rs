//! Page addressing for paginated queries.

use serde::{Deserialize, Serialize};

/// Number of records in one page.
pub const PAGE_SIZE: u32 = 50;

/// A zero-based page number into an ordered result set.
///
/// # Example
///
/// ```
/// use lncld_core::{Page, PAGE_SIZE};
///
/// let page = Page::new(2);
/// assert_eq!(page.limit(), PAGE_SIZE);
/// assert_eq!(page.skip(), 100);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page(u32);

impl Page {
    pub const FIRST: Page = Page(0);

    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Returns the zero-based page number.
    pub fn number(&self) -> u32 {
        self.0
    }

    /// Returns the page size to request.
    pub fn limit(&self) -> u32 {
        PAGE_SIZE
    }

    /// Returns how many records precede this page.
    pub fn skip(&self) -> u64 {
        u64::from(PAGE_SIZE) * u64::from(self.0)
    }

    /// Returns the following page.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u32> for Page {
    fn from(number: u32) -> Self {
        Self(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_skips_nothing() {
        assert_eq!(Page::FIRST.skip(), 0);
        assert_eq!(Page::FIRST.next().skip(), 50);
    }

    #[test]
    fn skip_does_not_overflow() {
        assert_eq!(Page::new(u32::MAX).skip(), 50 * u64::from(u32::MAX));
    }
}
