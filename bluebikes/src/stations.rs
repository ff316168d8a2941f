use anyhow::Result;
use geom::{GPSBounds, LonLat};
use serde::Deserialize;

use crate::{orig, IDMapping, StationID};

pub struct Station {
    pub id: StationID,
    pub orig_id: orig::StationID,
    pub name: Option<String>,
    pub pos: LonLat,
}

/// Every station, indexed by `StationID`.
pub struct Stations {
    pub stations: Vec<Station>,
    pub ids: IDMapping<orig::StationID, StationID>,
    pub gps_bounds: GPSBounds,
}

impl Stations {
    pub fn empty() -> Self {
        Self {
            stations: Vec::new(),
            ids: IDMapping::new(),
            gps_bounds: GPSBounds::new(),
        }
    }

    pub fn get(&self, id: StationID) -> &Station {
        &self.stations[id.0]
    }

    pub fn lookup(&self, orig_id: &orig::StationID) -> Option<&Station> {
        self.ids.lookup(orig_id).ok().map(|id| self.get(id))
    }
}

pub fn load<R: std::io::Read>(reader: R) -> Result<Stations> {
    let doc: Document = serde_json::from_reader(reader)?;

    let mut result = Stations::empty();
    for rec in doc.data.stations {
        let id = match result.ids.insert_new(rec.short_name.clone()) {
            Ok(id) => id,
            Err(err) => {
                warn!("Skipping station {:?}: {err}", rec.name);
                continue;
            }
        };
        let pos = LonLat::new(rec.lon, rec.lat);
        result.gps_bounds.update(pos);
        result.stations.push(Station {
            id,
            orig_id: rec.short_name,
            name: rec.name,
            pos,
        });
    }
    info!("Loaded {} stations", result.stations.len());
    Ok(result)
}

#[derive(Deserialize)]
struct Document {
    data: Data,
}

#[derive(Deserialize)]
struct Data {
    stations: Vec<Record>,
}

#[derive(Deserialize)]
struct Record {
    short_name: orig::StationID,
    name: Option<String>,
    lon: f64,
    lat: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"{
        "last_updated": 1741000000,
        "data": {
            "stations": [
                {"short_name": "A32010", "name": "Kendall T", "lon": -71.0865, "lat": 42.3625, "capacity": 19, "region_id": "10"},
                {"short_name": "B32006", "lon": -71.0570, "lat": 42.3554},
                {"short_name": "A32010", "name": "Duplicate", "lon": -71.0, "lat": 42.0}
            ]
        }
    }"#;

    #[test]
    fn load_nested_station_list() {
        let stations = load(INPUT.as_bytes()).unwrap();
        assert_eq!(stations.stations.len(), 2);

        let kendall = stations
            .lookup(&orig::StationID("A32010".to_string()))
            .unwrap();
        assert_eq!(kendall.id, StationID(0));
        assert_eq!(kendall.name.as_deref(), Some("Kendall T"));
        assert!((kendall.pos.x() - -71.0865).abs() < 1e-4);
        assert!((kendall.pos.y() - 42.3625).abs() < 1e-4);

        let other = stations.get(StationID(1));
        assert_eq!(other.orig_id, orig::StationID("B32006".to_string()));
        assert!(other.name.is_none());
    }

    #[test]
    fn missing_stations_array_is_an_error() {
        assert!(load(r#"{"data": {}}"#.as_bytes()).is_err());
        assert!(load("not json".as_bytes()).is_err());
    }
}
