use abstutil::Counter;

use bluebikes::{orig, StationID, Stations, Trip, TripID};

/// Derived per filter change; never accumulated across filters.
#[derive(Clone, Debug, PartialEq)]
pub struct StationTraffic {
    pub station: StationID,
    pub arrivals: usize,
    pub departures: usize,
    pub total_traffic: usize,
}

impl StationTraffic {
    pub fn describe(&self) -> String {
        format!(
            "{} trips ({} departures, {} arrivals)",
            self.total_traffic, self.departures, self.arrivals
        )
    }
}

/// Counts departures by start station and arrivals by end station, then joins the counts onto
/// every station. Stations with no activity get zeroes.
pub fn aggregate(
    stations: &Stations,
    trips: &[Trip],
    departures: &[TripID],
    arrivals: &[TripID],
) -> Vec<StationTraffic> {
    let mut departures_per_station: Counter<&orig::StationID> = Counter::new();
    for id in departures {
        departures_per_station.inc(&trips[id.0].start_station);
    }
    let mut arrivals_per_station: Counter<&orig::StationID> = Counter::new();
    for id in arrivals {
        arrivals_per_station.inc(&trips[id.0].end_station);
    }

    stations
        .stations
        .iter()
        .map(|station| {
            let arrivals = arrivals_per_station.get(&station.orig_id);
            let departures = departures_per_station.get(&station.orig_id);
            let total_traffic = arrivals + departures;
            debug!(
                "Station {}: total traffic = {total_traffic}",
                station.orig_id.0
            );
            StationTraffic {
                station: station.id,
                arrivals,
                departures,
                total_traffic,
            }
        })
        .collect()
}
