use anyhow::Result;
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use zip::ZipArchive;

use crate::{orig, TripID};

pub struct Trip {
    pub id: TripID,
    pub start_station: orig::StationID,
    pub end_station: orig::StationID,
    /// None if the raw value couldn't be parsed. Such trips still count when no time filter is
    /// active.
    pub started_at: Option<NaiveDateTime>,
    pub ended_at: Option<NaiveDateTime>,
}

pub fn load<R: std::io::Read>(reader: R) -> Result<Vec<Trip>> {
    let mut trips = Vec::new();
    let mut unparsed = 0;
    let mut skipped = 0;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    for rec in reader.deserialize() {
        let rec: Record = match rec {
            Ok(rec) => rec,
            Err(err) => {
                debug!("Skipping trip record: {err}");
                skipped += 1;
                continue;
            }
        };
        let started_at = parse_timestamp(&rec.started_at);
        let ended_at = parse_timestamp(&rec.ended_at);
        if started_at.is_none() || ended_at.is_none() {
            unparsed += 1;
        }
        trips.push(Trip {
            id: TripID(trips.len()),
            start_station: rec.start_station_id,
            end_station: rec.end_station_id,
            started_at,
            ended_at,
        });
    }
    if skipped > 0 {
        warn!("Skipped {skipped} trip records that couldn't be read");
    }
    if unparsed > 0 {
        warn!("{unparsed} trips have a timestamp that couldn't be parsed");
    }
    info!("Loaded {} trips", trips.len());
    Ok(trips)
}

/// Monthly trip data is published as a .zip with one CSV inside.
pub fn load_zip<R: std::io::Read + std::io::Seek>(reader: R) -> Result<Vec<Trip>> {
    let mut archive = ZipArchive::new(reader)?;
    let csvs: Vec<String> = archive
        .file_names()
        .filter(|name| name.ends_with(".csv") && !name.starts_with("__MACOSX"))
        .map(|name| name.to_string())
        .collect();
    let name = match csvs.as_slice() {
        [name] => name.clone(),
        _ => bail!("Expected exactly one .csv in the trip archive, found {:?}", csvs),
    };
    let file = archive
        .by_name(&name)
        .map_err(|err| anyhow!("{name}: {err}"))?;
    load(file)
}

/// Accepts "2024-03-01 08:05:35.380", the same with a "T", or RFC 3339. Only the local clock
/// time matters downstream, so offsets are dropped.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(t);
        }
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|t| t.naive_local())
}

#[derive(Deserialize)]
struct Record {
    start_station_id: orig::StationID,
    end_station_id: orig::StationID,
    started_at: String,
    ended_at: String,
}
