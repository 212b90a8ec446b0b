// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Free-space bookkeeping along a single wall

use playspace_geometry::LinearInterval;
use serde::{Deserialize, Serialize};

/// Result of [`WallSpaceAllocator::commit_usage`]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The free section at `index` was split around the usage
    Split { index: usize },
    /// The usage touched no free section; nothing changed
    NoOverlap,
}

impl CommitOutcome {
    pub fn is_split(&self) -> bool {
        matches!(self, CommitOutcome::Split { .. })
    }
}

/// Ordered list of free sections on one wall
///
/// Sections stay sorted by `min` and pairwise disjoint. Together with every
/// committed usage they cover the initial extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSpaceAllocator {
    initial: LinearInterval,
    free: Vec<LinearInterval>,
}

impl WallSpaceAllocator {
    /// Allocator whose single free section spans the whole usable width
    pub fn new(extent: LinearInterval) -> Self {
        Self {
            initial: extent,
            free: vec![extent],
        }
    }

    /// First free section strictly longer than `min_width`
    ///
    /// First-fit, not best-fit: earlier gaps win even when a later one is a
    /// tighter match.
    pub fn query(&self, min_width: f64) -> Option<LinearInterval> {
        self.free
            .iter()
            .find(|section| section.length() > min_width)
            .copied()
    }

    /// Mark `used` as occupied, splitting the free section it lands in
    ///
    /// The first section with an endpoint of `used` strictly inside it is
    /// replaced by `[section.min, used.min]` followed by
    /// `[used.max, section.max]`. A usage that touches no section (already
    /// booked, or off the wall) leaves the list untouched and reports
    /// [`CommitOutcome::NoOverlap`].
    pub fn commit_usage(&mut self, used: LinearInterval) -> CommitOutcome {
        let Some(index) = self
            .free
            .iter()
            .position(|section| section.has_endpoint_inside(&used))
        else {
            tracing::warn!(
                used = %used,
                free_sections = self.free.len(),
                "Wall usage touches no free section, ignoring"
            );
            return CommitOutcome::NoOverlap;
        };

        let section = self.free[index];
        let right = LinearInterval {
            min: used.max,
            max: section.max,
        };
        if index + 1 == self.free.len() {
            self.free.push(right);
        } else {
            self.free.insert(index + 1, right);
        }
        self.free[index] = LinearInterval {
            min: section.min,
            max: used.min,
        };

        tracing::debug!(index, section = %section, used = %used, "Split free wall section");
        CommitOutcome::Split { index }
    }

    pub fn free_sections(&self) -> &[LinearInterval] {
        &self.free
    }

    /// Total free length across all sections
    pub fn free_length(&self) -> f64 {
        self.free.iter().map(LinearInterval::length).sum()
    }

    /// Extent the allocator was seeded with
    pub fn initial_extent(&self) -> LinearInterval {
        self.initial
    }

    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn iv(min: f64, max: f64) -> LinearInterval {
        LinearInterval::new(min, max)
    }

    fn assert_sorted_disjoint(allocator: &WallSpaceAllocator) {
        for pair in allocator.free_sections().windows(2) {
            assert!(pair[0].min <= pair[1].min, "not sorted: {:?}", pair);
            assert!(pair[0].max <= pair[1].min, "overlapping: {:?}", pair);
        }
    }

    #[test]
    fn test_split_and_split_again() {
        let mut allocator = WallSpaceAllocator::new(iv(0.0, 10.0));

        assert_eq!(allocator.commit_usage(iv(2.0, 4.0)), CommitOutcome::Split { index: 0 });
        assert_eq!(allocator.free_sections(), &[iv(0.0, 2.0), iv(4.0, 10.0)]);
        assert_relative_eq!(allocator.free_length(), 8.0);

        assert_eq!(allocator.commit_usage(iv(5.0, 6.0)), CommitOutcome::Split { index: 1 });
        assert_eq!(
            allocator.free_sections(),
            &[iv(0.0, 2.0), iv(4.0, 5.0), iv(6.0, 10.0)]
        );
        assert_relative_eq!(allocator.free_length(), 7.0);
        assert_sorted_disjoint(&allocator);
    }

    #[test]
    fn test_split_in_middle_inserts_in_order() {
        let mut allocator = WallSpaceAllocator::new(iv(0.0, 10.0));
        assert!(allocator.commit_usage(iv(6.0, 7.0)).is_split());
        assert!(allocator.commit_usage(iv(1.0, 2.0)).is_split());
        assert_eq!(
            allocator.free_sections(),
            &[iv(0.0, 1.0), iv(2.0, 6.0), iv(7.0, 10.0)]
        );
        assert_sorted_disjoint(&allocator);
    }

    #[test]
    fn test_query_is_first_fit() {
        let mut allocator = WallSpaceAllocator::new(iv(0.0, 10.0));
        assert!(allocator.commit_usage(iv(2.0, 4.0)).is_split());

        assert_eq!(allocator.query(3.0), Some(iv(4.0, 10.0)));
        assert_eq!(allocator.query(1.0), Some(iv(0.0, 2.0)));
        // Exactly-as-long is not enough
        assert_eq!(allocator.query(6.0), None);
    }

    #[test]
    fn test_first_fit_prefers_earlier_gap_over_tighter_one() {
        let mut allocator = WallSpaceAllocator::new(iv(0.0, 20.0));
        assert!(allocator.commit_usage(iv(8.0, 15.0)).is_split());
        // Free: [0, 8] and [15, 20]; a 4-wide feature fits the tighter
        // later gap best, but first-fit hands out the earlier one.
        assert_eq!(allocator.query(4.0), Some(iv(0.0, 8.0)));
    }

    #[test]
    fn test_usage_touching_nothing_is_reported() {
        let mut allocator = WallSpaceAllocator::new(iv(0.0, 10.0));
        assert!(allocator.commit_usage(iv(2.0, 4.0)).is_split());
        let before = allocator.clone();

        // Double booking the same span
        assert_eq!(allocator.commit_usage(iv(2.0, 4.0)), CommitOutcome::NoOverlap);
        // Off the end of the wall
        assert_eq!(allocator.commit_usage(iv(11.0, 12.0)), CommitOutcome::NoOverlap);
        // Exactly covering a whole section touches no interior point
        assert_eq!(allocator.commit_usage(iv(4.0, 10.0)), CommitOutcome::NoOverlap);

        assert_eq!(allocator, before);
    }

    #[test]
    fn test_usage_flush_with_section_start_leaves_zero_width_remainder() {
        let mut allocator = WallSpaceAllocator::new(iv(0.0, 10.0));
        assert!(allocator.commit_usage(iv(0.0, 3.0)).is_split());
        assert_eq!(allocator.free_sections(), &[iv(0.0, 0.0), iv(3.0, 10.0)]);
        assert_eq!(allocator.query(0.0), Some(iv(3.0, 10.0)));
        assert_eq!(allocator.initial_extent(), iv(0.0, 10.0));
    }

    #[test]
    fn test_many_commits_keep_invariants() {
        let mut allocator = WallSpaceAllocator::new(iv(-4.0, 5.0));
        let mut used_total = 0.0;
        for start in [-3.5, 3.0, -1.0, 1.2, 4.1, -2.4] {
            let used = iv(start, start + 0.5);
            if allocator.commit_usage(used).is_split() {
                used_total += used.length();
            }
            assert_sorted_disjoint(&allocator);
        }
        assert_relative_eq!(allocator.free_length() + used_total, 9.0, epsilon = 1e-9);
        assert_eq!(allocator.len(), 7);
        assert!(!allocator.is_empty());
    }
}
