use bluebikes::{Trip, TripID};

use crate::time::{minutes_since_midnight, MINUTES_PER_DAY, WINDOW_MINUTES};

/// One slot per minute of the day, each holding trips in load order.
pub struct MinuteBuckets {
    slots: Vec<Vec<TripID>>,
}

impl MinuteBuckets {
    fn new() -> Self {
        Self {
            slots: vec![Vec::new(); MINUTES_PER_DAY],
        }
    }

    pub fn slot(&self, minute: usize) -> &[TripID] {
        &self.slots[minute]
    }

    /// All trips within the window around `minute`, oldest slot first. Near midnight, the
    /// window wraps around: the tail of the day comes before the head.
    pub fn filter_by_minute(&self, minute: usize) -> Vec<TripID> {
        let (min, max) = window_bounds(minute);
        let slots: Vec<&Vec<TripID>> = if min > max {
            self.slots[min..].iter().chain(&self.slots[..max]).collect()
        } else {
            self.slots[min..max].iter().collect()
        };
        slots.into_iter().flatten().copied().collect()
    }
}

/// Returns `[min, max)` as slot indices. When `min > max`, the window covers `[min, 1440)`
/// and `[0, max)`.
fn window_bounds(minute: usize) -> (usize, usize) {
    let minute = minute % MINUTES_PER_DAY;
    let min = (minute + MINUTES_PER_DAY - WINDOW_MINUTES) % MINUTES_PER_DAY;
    let max = (minute + WINDOW_MINUTES) % MINUTES_PER_DAY;
    (min, max)
}

/// Departures keyed by start minute, arrivals keyed by end minute. Built once per trip set.
pub struct TripBuckets {
    pub departures: MinuteBuckets,
    pub arrivals: MinuteBuckets,
}

impl TripBuckets {
    pub fn new(trips: &[Trip]) -> Self {
        let mut departures = MinuteBuckets::new();
        let mut arrivals = MinuteBuckets::new();
        for trip in trips {
            // Unparsed timestamps never land in a slot
            if let Some(t) = trip.started_at {
                departures.slots[minutes_since_midnight(t)].push(trip.id);
            }
            if let Some(t) = trip.ended_at {
                arrivals.slots[minutes_since_midnight(t)].push(trip.id);
            }
        }
        Self {
            departures,
            arrivals,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    // Slot i holds exactly TripID(i)
    fn one_trip_per_slot() -> MinuteBuckets {
        let mut buckets = MinuteBuckets::new();
        for (i, slot) in buckets.slots.iter_mut().enumerate() {
            slot.push(TripID(i));
        }
        buckets
    }

    fn slots(trips: Vec<TripID>) -> Vec<usize> {
        trips.into_iter().map(|id| id.0).collect()
    }

    #[test]
    fn window_includes_an_hour_before_and_excludes_an_hour_after() {
        let buckets = one_trip_per_slot();
        let result = slots(buckets.filter_by_minute(480));
        assert_eq!(result.len(), 120);
        assert_eq!(result[0], 420);
        assert_eq!(*result.last().unwrap(), 539);
        assert!(!result.contains(&419));
        assert!(!result.contains(&540));
    }

    #[test]
    fn window_wraps_at_midnight() {
        let buckets = one_trip_per_slot();

        let expected: Vec<usize> = (1380..1440).chain(0..60).collect();
        assert_eq!(slots(buckets.filter_by_minute(0)), expected);

        let expected: Vec<usize> = (1379..1440).chain(0..59).collect();
        assert_eq!(slots(buckets.filter_by_minute(1439)), expected);

        // max lands exactly on 0, so only the tail contributes
        let expected: Vec<usize> = (1320..1440).collect();
        assert_eq!(slots(buckets.filter_by_minute(1380)), expected);

        // min lands exactly on 0, no wrapping
        let expected: Vec<usize> = (0..120).collect();
        assert_eq!(slots(buckets.filter_by_minute(60)), expected);
    }

    #[test]
    fn every_minute_matches_brute_force() {
        let buckets = one_trip_per_slot();
        for minute in 0..MINUTES_PER_DAY {
            let actual: BTreeSet<usize> = slots(buckets.filter_by_minute(minute))
                .into_iter()
                .collect();
            let expected: BTreeSet<usize> = (0..MINUTES_PER_DAY)
                .filter(|slot| {
                    let offset = (slot + MINUTES_PER_DAY - minute) % MINUTES_PER_DAY;
                    offset < WINDOW_MINUTES || offset >= MINUTES_PER_DAY - WINDOW_MINUTES
                })
                .collect();
            assert_eq!(actual, expected, "minute {minute}");
        }
    }

    #[test]
    fn multiple_trips_per_slot_keep_load_order() {
        let mut buckets = MinuteBuckets::new();
        buckets.slots[479].push(TripID(7));
        buckets.slots[479].push(TripID(2));
        buckets.slots[500].push(TripID(1));
        buckets.slots[600].push(TripID(9));
        assert_eq!(
            buckets.filter_by_minute(480),
            vec![TripID(7), TripID(2), TripID(1)]
        );
    }
}
