//! Readers for the raw Bluebikes data: the station feed, monthly trip history, and the city's
//! bike network overlay.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub mod bike_lanes;
mod ids;
mod stations;
mod trips;

pub use ids::{orig, CheapID, IDMapping, StationID, TripID};
pub use stations::{load as load_stations, Station, Stations};
pub use trips::{load as load_trips, load_zip as load_trips_zip, Trip};
