#[macro_use]
extern crate log;

mod buckets;
mod markers;
mod scale;
mod time;
mod traffic;
mod view;

#[cfg(test)]
mod test_data;

use abstutil::Timer;
use geom::{Bounds, GPSBounds, Pt2D};

use bluebikes::{Stations, Trip, TripID};

pub use self::buckets::{MinuteBuckets, TripBuckets};
pub use self::markers::{Marker, Markers, Projection, Reconciled};
pub use self::scale::{departure_ratio, RadiusScale, MAX_RADIUS};
pub use self::time::{minutes_since_midnight, TimeFilter, MINUTES_PER_DAY, WINDOW_MINUTES};
pub use self::traffic::{aggregate, StationTraffic};
pub use self::view::TrafficView;

/// Everything loaded at startup. Nothing here changes afterwards.
pub struct Model {
    pub bounds: Bounds,
    pub gps_bounds: GPSBounds,
    pub stations: Stations,
    pub trips: Vec<Trip>,
    pub buckets: TripBuckets,
}

pub struct FilteredTrips {
    pub departures: Vec<TripID>,
    pub arrivals: Vec<TripID>,
}

/// Counts for every station under one filter, and how many trips the filter let through.
pub struct FilteredTraffic {
    pub stations: Vec<StationTraffic>,
    pub departures: usize,
    pub arrivals: usize,
}

impl Model {
    /// Stations must already be loaded; trips refer to them by short name.
    pub fn new(stations: Stations, trips: Vec<Trip>, timer: &mut Timer) -> Self {
        timer.start("bucket trips by minute");
        let buckets = TripBuckets::new(&trips);
        timer.stop("bucket trips by minute");

        let gps_bounds = stations.gps_bounds.clone();
        let bounds = if stations.stations.is_empty() {
            // Avoid crashing the UI with empty bounds
            Bounds::from(&[Pt2D::zero(), Pt2D::new(1.0, 1.0)])
        } else {
            gps_bounds.to_bounds()
        };

        Self {
            bounds,
            gps_bounds,
            stations,
            trips,
            buckets,
        }
    }

    pub fn filter_trips(&self, filter: TimeFilter) -> FilteredTrips {
        match filter {
            TimeFilter::AnyTime => {
                let all: Vec<TripID> = self.trips.iter().map(|t| t.id).collect();
                FilteredTrips {
                    departures: all.clone(),
                    arrivals: all,
                }
            }
            TimeFilter::Minute(m) => FilteredTrips {
                departures: self.buckets.departures.filter_by_minute(m),
                arrivals: self.buckets.arrivals.filter_by_minute(m),
            },
        }
    }

    /// Fresh counts for every station under this filter.
    pub fn traffic(&self, filter: TimeFilter) -> FilteredTraffic {
        let filtered = self.filter_trips(filter);
        FilteredTraffic {
            stations: aggregate(
                &self.stations,
                &self.trips,
                &filtered.departures,
                &filtered.arrivals,
            ),
            departures: filtered.departures.len(),
            arrivals: filtered.arrivals.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use bluebikes::orig;

    use super::*;

    fn model(trips: &[(&str, &str, &str, &str)]) -> Model {
        Model::new(
            test_data::stations(),
            test_data::trips(trips),
            &mut Timer::throwaway(),
        )
    }

    fn traffic_at(model: &Model, filter: TimeFilter, short_name: &str) -> StationTraffic {
        let id = model
            .stations
            .lookup(&orig::StationID(short_name.to_string()))
            .unwrap()
            .id;
        model
            .traffic(filter)
            .stations
            .into_iter()
            .find(|t| t.station == id)
            .unwrap()
    }

    fn three_trips() -> Model {
        model(&[
            ("A", "B", "2024-03-01 08:05:00", "2024-03-01 08:20:00"),
            ("B", "C", "2024-03-01 08:10:00", "2024-03-01 08:30:00"),
            ("A", "B", "2024-03-01 23:58:00", "2024-03-02 00:15:00"),
        ])
    }

    #[test]
    fn windowed_traffic_excludes_late_night_trip() {
        let model = three_trips();
        let filter = TimeFilter::Minute(480);

        let filtered = model.filter_trips(filter);
        assert_eq!(filtered.departures, vec![TripID(0), TripID(1)]);
        assert_eq!(filtered.arrivals, vec![TripID(0), TripID(1)]);
        let traffic = model.traffic(filter);
        assert_eq!((traffic.departures, traffic.arrivals), (2, 2));

        let a = traffic_at(&model, filter, "A");
        assert_eq!((a.departures, a.arrivals, a.total_traffic), (1, 0, 1));
        let b = traffic_at(&model, filter, "B");
        assert_eq!((b.departures, b.arrivals, b.total_traffic), (1, 1, 2));
        let c = traffic_at(&model, filter, "C");
        assert_eq!((c.departures, c.arrivals, c.total_traffic), (0, 1, 1));
    }

    #[test]
    fn window_near_midnight_wraps() {
        let model = three_trips();
        // 23:58 departs inside the window around 00:30, and 00:15 arrives inside it too
        let a = traffic_at(&model, TimeFilter::Minute(30), "A");
        assert_eq!((a.departures, a.arrivals), (1, 0));
        let b = traffic_at(&model, TimeFilter::Minute(30), "B");
        assert_eq!((b.departures, b.arrivals), (0, 1));
    }

    #[test]
    fn any_time_counts_everything() {
        let model = model(&[
            ("A", "B", "2024-03-01 08:05:00", "2024-03-01 08:20:00"),
            ("B", "C", "2024-03-01 08:10:00", "2024-03-01 08:30:00"),
            ("A", "B", "2024-03-01 23:58:00", "2024-03-02 00:15:00"),
            // Unparsed times still count when unfiltered
            ("C", "A", "yesterday", "today"),
        ]);

        let filtered = model.filter_trips(TimeFilter::AnyTime);
        let all: Vec<TripID> = (0..4).map(TripID).collect();
        assert_eq!(filtered.departures, all);
        assert_eq!(filtered.arrivals, all);

        let a = traffic_at(&model, TimeFilter::AnyTime, "A");
        assert_eq!((a.departures, a.arrivals, a.total_traffic), (2, 1, 3));
        let c = traffic_at(&model, TimeFilter::AnyTime, "C");
        assert_eq!((c.departures, c.arrivals, c.total_traffic), (1, 1, 2));

        // But they never land in a bucket
        for minute in 0..MINUTES_PER_DAY {
            assert!(!model.buckets.departures.slot(minute).contains(&TripID(3)));
            assert!(!model.buckets.arrivals.slot(minute).contains(&TripID(3)));
        }
    }

    #[test]
    fn unknown_and_idle_stations() {
        let model = model(&[
            ("A", "ZZZ", "2024-03-01 12:00:00", "2024-03-01 12:10:00"),
            ("", "A", "2024-03-01 12:00:00", "2024-03-01 12:10:00"),
        ]);
        let traffic = model.traffic(TimeFilter::AnyTime);
        assert_eq!((traffic.departures, traffic.arrivals), (2, 2));
        // Every station appears, even idle ones
        assert_eq!(traffic.stations.len(), 3);
        for t in &traffic.stations {
            assert_eq!(t.total_traffic, t.arrivals + t.departures);
        }

        let a = traffic_at(&model, TimeFilter::AnyTime, "A");
        assert_eq!((a.departures, a.arrivals), (1, 1));
        let b = traffic_at(&model, TimeFilter::Minute(720), "B");
        assert_eq!((b.departures, b.arrivals, b.total_traffic), (0, 0, 0));
        let a = traffic_at(&model, TimeFilter::Minute(0), "A");
        assert_eq!(a.total_traffic, 0);
    }

    #[test]
    fn buckets_use_start_and_end_minutes() {
        let model = three_trips();
        assert_eq!(model.buckets.departures.slot(485), &[TripID(0)]);
        assert_eq!(model.buckets.arrivals.slot(500), &[TripID(0)]);
        assert_eq!(model.buckets.departures.slot(1438), &[TripID(2)]);
        assert_eq!(model.buckets.arrivals.slot(15), &[TripID(2)]);
        assert!(model.buckets.arrivals.slot(485).is_empty());
    }
}
