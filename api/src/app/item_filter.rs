//! Item filter
//!
//! Drops feed items by content type or by author username.

use std::collections::HashSet;

use crate::domain::entities::{FeedItem, FeedPage};

/// Block-lists applied to every fetched page.
///
/// Membership is exact, case-sensitive string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    blocked_types: HashSet<String>,
    blocked_authors: HashSet<String>,
}

impl ItemFilter {
    pub fn new<T, A>(blocked_types: T, blocked_authors: A) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            blocked_types: blocked_types.into_iter().map(Into::into).collect(),
            blocked_authors: blocked_authors.into_iter().map(Into::into).collect(),
        }
    }

    /// True when the filter can never match
    pub fn is_empty(&self) -> bool {
        self.blocked_types.is_empty() && self.blocked_authors.is_empty()
    }

    /// Whether `item` should be removed
    pub fn matches(&self, item: &FeedItem) -> bool {
        self.blocked_types.contains(&item.club.kind)
            || item
                .usernames()
                .any(|username| self.blocked_authors.contains(&*username))
    }

    /// Remove matching items, keeping the order of the rest.
    ///
    /// Returns how many items were removed.
    pub fn apply(&self, page: &mut FeedPage) -> usize {
        let before = page.items.len();
        page.items.retain(|item| !self.matches(item));
        before - page.items.len()
    }
}
