// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Bounded, deduplicated window over the most recent sensor readings.

use std::{collections::VecDeque, num::NonZeroUsize};

use ahash::AHashSet;

use crate::model::SensorReading;

/// Capacity-bounded, duplicate-free buffer of the most recent readings.
///
/// The sequence is chronological and append-oriented; a companion set of
/// timestamps is kept exactly in sync with the sequence contents. Invariants
/// upheld by every mutation: `len() <= capacity()`, and the seen-set equals
/// the set of timestamps currently in the sequence.
#[derive(Clone, Debug)]
pub struct Window {
    readings: VecDeque<SensorReading>,
    seen: AHashSet<String>,
    capacity: usize,
}

impl Window {
    /// Creates an empty window retaining at most `capacity` readings.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        let capacity = capacity.get();
        Self {
            readings: VecDeque::with_capacity(capacity),
            seen: AHashSet::with_capacity(capacity),
            capacity,
        }
    }

    /// Replaces the window contents with the tail of `readings`.
    ///
    /// The snapshot's own tail is authoritative: when `readings` exceeds the
    /// capacity, the oldest excess entries are dropped. The seen-set is
    /// rebuilt from exactly the retained slice. A duplicate timestamp within
    /// one snapshot keeps the first occurrence (the source is untrusted and
    /// the sequence/seen-set invariant must hold for arbitrary input).
    pub fn apply_snapshot(&mut self, readings: Vec<SensorReading>) {
        self.readings.clear();
        self.seen.clear();

        let skip = readings.len().saturating_sub(self.capacity);
        for reading in readings.into_iter().skip(skip) {
            if self.seen.insert(reading.timestamp.clone()) {
                self.readings.push_back(reading);
            }
        }
    }

    /// Appends `reading` unless its timestamp is already present.
    ///
    /// Duplicates are ignored outright, not merged: a retransmitted reading
    /// never overwrites the stored temperature/humidity even when the values
    /// differ. When the append pushes the sequence past capacity, the oldest
    /// entries are evicted front-first, each removal also dropping the
    /// evicted timestamp from the seen-set.
    ///
    /// Returns `true` when the reading was applied.
    pub fn apply_update(&mut self, reading: SensorReading) -> bool {
        if !self.seen.insert(reading.timestamp.clone()) {
            return false;
        }
        self.readings.push_back(reading);

        while self.readings.len() > self.capacity {
            if let Some(evicted) = self.readings.pop_front() {
                self.seen.remove(&evicted.timestamp);
            }
        }
        true
    }

    /// Clears the sequence and the seen-set together.
    pub fn reset(&mut self) {
        self.readings.clear();
        self.seen.clear();
    }

    /// Returns the retained readings in chronological order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<SensorReading> {
        self.readings.iter().cloned().collect()
    }

    /// Returns the most recent reading, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&SensorReading> {
        self.readings.back()
    }

    /// Returns whether a reading with `timestamp` is currently retained.
    #[must_use]
    pub fn contains(&self, timestamp: &str) -> bool {
        self.seen.contains(timestamp)
    }

    /// Returns the number of retained readings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// Returns whether the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Returns the maximum number of retained readings.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates the retained readings in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &SensorReading> {
        self.readings.iter()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn capacity(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn reading(timestamp: &str) -> SensorReading {
        SensorReading::new(timestamp, 20.0, 50.0)
    }

    fn assert_invariants(window: &Window) {
        assert!(window.len() <= window.capacity());
        assert_eq!(window.len(), window.iter().count());
        for r in window.iter() {
            assert!(window.contains(&r.timestamp));
        }
    }

    #[rstest]
    fn test_update_appends_in_arrival_order() {
        let mut window = Window::new(capacity(10));
        assert!(window.apply_update(reading("t1")));
        assert!(window.apply_update(reading("t2")));
        assert!(window.apply_update(reading("t3")));

        let timestamps: Vec<&str> = window.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["t1", "t2", "t3"]);
        assert_invariants(&window);
    }

    #[rstest]
    fn test_update_is_idempotent() {
        let mut window = Window::new(capacity(10));
        assert!(window.apply_update(reading("t1")));
        let before = window.to_vec();

        assert!(!window.apply_update(reading("t1")));
        assert_eq!(window.to_vec(), before);
        assert_invariants(&window);
    }

    #[rstest]
    fn test_duplicate_update_does_not_overwrite_values() {
        let mut window = Window::new(capacity(10));
        window.apply_update(SensorReading::new("t1", 20.0, 50.0));
        window.apply_update(SensorReading::new("t1", 99.0, 1.0));

        assert_eq!(window.len(), 1);
        assert_eq!(window.latest().unwrap().temperature, 20.0);
        assert_eq!(window.latest().unwrap().humidity, 50.0);
    }

    #[rstest]
    fn test_eviction_is_oldest_first() {
        let mut window = Window::new(capacity(3));
        for ts in ["t1", "t2", "t3", "t4", "t5"] {
            window.apply_update(reading(ts));
        }

        let timestamps: Vec<&str> = window.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["t3", "t4", "t5"]);
        assert!(!window.contains("t1"));
        assert!(!window.contains("t2"));
        assert_invariants(&window);
    }

    #[rstest]
    fn test_evicted_timestamp_can_reenter() {
        let mut window = Window::new(capacity(2));
        window.apply_update(reading("t1"));
        window.apply_update(reading("t2"));
        window.apply_update(reading("t3")); // evicts t1

        assert!(window.apply_update(reading("t1")));
        let timestamps: Vec<&str> = window.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["t3", "t1"]);
        assert_invariants(&window);
    }

    #[rstest]
    fn test_snapshot_replaces_contents() {
        let mut window = Window::new(capacity(5));
        window.apply_update(reading("old"));

        window.apply_snapshot(vec![reading("t1"), reading("t2")]);

        let timestamps: Vec<&str> = window.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["t1", "t2"]);
        assert!(!window.contains("old"));
        assert_invariants(&window);
    }

    #[rstest]
    fn test_snapshot_truncates_to_tail() {
        let mut window = Window::new(capacity(3));
        window.apply_snapshot(vec![
            reading("t1"),
            reading("t2"),
            reading("t3"),
            reading("t4"),
            reading("t5"),
        ]);

        let timestamps: Vec<&str> = window.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["t3", "t4", "t5"]);
        assert_invariants(&window);
    }

    #[rstest]
    fn test_snapshot_dedupes_within_itself() {
        let mut window = Window::new(capacity(5));
        window.apply_snapshot(vec![
            SensorReading::new("t1", 20.0, 50.0),
            SensorReading::new("t1", 99.0, 1.0),
            reading("t2"),
        ]);

        assert_eq!(window.len(), 2);
        assert_eq!(window.iter().next().unwrap().temperature, 20.0);
        assert_invariants(&window);
    }

    #[rstest]
    fn test_snapshot_then_duplicate_update_ignored() {
        let mut window = Window::new(capacity(5));
        window.apply_snapshot(vec![SensorReading::new("T", 20.0, 50.0)]);

        assert!(!window.apply_update(SensorReading::new("T", 30.0, 40.0)));
        assert_eq!(window.latest().unwrap().temperature, 20.0);
    }

    #[rstest]
    fn test_reset_clears_sequence_and_seen_set() {
        let mut window = Window::new(capacity(3));
        window.apply_update(reading("t1"));
        window.apply_update(reading("t2"));

        window.reset();

        assert!(window.is_empty());
        assert!(!window.contains("t1"));
        assert!(window.apply_update(reading("t1")));
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(120)]
    fn test_bound_holds_under_mixed_operations(#[case] cap: usize) {
        let mut window = Window::new(capacity(cap));
        for i in 0..cap * 2 {
            window.apply_update(reading(&format!("u{i}")));
            assert_invariants(&window);
        }
        window.apply_snapshot((0..cap * 2).map(|i| reading(&format!("s{i}"))).collect());
        assert_eq!(window.len(), cap);
        assert_invariants(&window);
    }
}
