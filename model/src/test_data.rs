use bluebikes::{Stations, Trip};

// A = Kendall, B = South Station, C = Central
const STATIONS: &str = r#"{"data": {"stations": [
    {"short_name": "A", "name": "Kendall T", "lon": -71.0865, "lat": 42.3625},
    {"short_name": "B", "name": "South Station", "lon": -71.0552, "lat": 42.3523},
    {"short_name": "C", "name": "Central Square", "lon": -71.1031, "lat": 42.3655}
]}}"#;

pub fn stations() -> Stations {
    bluebikes::load_stations(STATIONS.as_bytes()).unwrap()
}

/// Each entry is (from, to, started_at, ended_at)
pub fn trips(raw: &[(&str, &str, &str, &str)]) -> Vec<Trip> {
    let mut csv = "started_at,ended_at,start_station_id,end_station_id\n".to_string();
    for (from, to, start, end) in raw {
        csv.push_str(&format!("{start},{end},{from},{to}\n"));
    }
    bluebikes::load_trips(csv.as_bytes()).unwrap()
}
