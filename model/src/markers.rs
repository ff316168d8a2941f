use std::collections::BTreeMap;

use geom::{LonLat, Pt2D};

use bluebikes::{StationID, Stations};

use crate::scale::{departure_ratio, RadiusScale};
use crate::StationTraffic;

/// Turns a geographic position into a pixel position on screen. The answer changes whenever the
/// viewport does.
pub trait Projection {
    fn project(&self, gps: LonLat) -> Pt2D;
}

pub struct Marker {
    pub station: StationID,
    pub gps: LonLat,
    /// In pixels. Only valid after `Markers::reposition`.
    pub center: Pt2D,
    pub radius: f64,
    pub departure_ratio: f64,
    pub tooltip: String,
}

impl Marker {
    pub fn contains(&self, pt: Pt2D) -> bool {
        let dx = pt.x() - self.center.x();
        let dy = pt.y() - self.center.y();
        self.radius > 0.0 && (dx * dx + dy * dy).sqrt() <= self.radius
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// One marker per station, keyed by station.
#[derive(Default)]
pub struct Markers {
    markers: BTreeMap<StationID, Marker>,
}

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diffs freshly aggregated traffic against the current markers. New stations get a
    /// marker, existing ones have their size, color, and tooltip refreshed, and stations that
    /// vanished lose theirs. The scale must come from this same traffic. Positions aren't
    /// touched; call `reposition` afterwards.
    pub fn reconcile(
        &mut self,
        stations: &Stations,
        traffic: &[StationTraffic],
        scale: &RadiusScale,
    ) -> Reconciled {
        let mut result = Reconciled::default();

        let before = self.markers.len();
        let mut kept = BTreeMap::new();
        for t in traffic {
            let radius = scale.radius(t.total_traffic);
            let ratio = departure_ratio(t);
            let tooltip = t.describe();

            let marker = match self.markers.remove(&t.station) {
                Some(mut marker) => {
                    result.updated += 1;
                    marker.radius = radius;
                    marker.departure_ratio = ratio;
                    marker.tooltip = tooltip;
                    marker
                }
                None => {
                    result.entered += 1;
                    Marker {
                        station: t.station,
                        gps: stations.get(t.station).pos,
                        center: Pt2D::zero(),
                        radius,
                        departure_ratio: ratio,
                        tooltip,
                    }
                }
            };
            kept.insert(t.station, marker);
        }
        result.exited = before - result.updated;
        self.markers = kept;
        result
    }

    pub fn reposition(&mut self, projection: &dyn Projection) {
        for marker in self.markers.values_mut() {
            marker.center = projection.project(marker.gps);
        }
    }

    /// Later markers are drawn on top, so they win.
    pub fn hit(&self, pt: Pt2D) -> Option<&Marker> {
        self.markers.values().rev().find(|m| m.contains(pt))
    }

    pub fn get(&self, station: StationID) -> Option<&Marker> {
        self.markers.get(&station)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }
}
