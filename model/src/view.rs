use crate::{Markers, Model, Projection, RadiusScale, Reconciled, StationTraffic, TimeFilter};

/// The state behind the map. Built once after both data sources load, then changed only by
/// the two handlers below.
pub struct TrafficView {
    filter: TimeFilter,
    traffic: Vec<StationTraffic>,
    radius_scale: RadiusScale,
    markers: Markers,
    departures_in_window: usize,
    arrivals_in_window: usize,
}

impl TrafficView {
    pub fn new(model: &Model, filter: TimeFilter, projection: &dyn Projection) -> Self {
        let mut view = Self {
            filter,
            traffic: Vec::new(),
            radius_scale: RadiusScale::new(&[]),
            markers: Markers::new(),
            departures_in_window: 0,
            arrivals_in_window: 0,
        };
        view.set_filter(model, filter, projection);
        view
    }

    /// Recomputes all traffic from scratch, then restyles and repositions every marker.
    pub fn set_filter(
        &mut self,
        model: &Model,
        filter: TimeFilter,
        projection: &dyn Projection,
    ) -> Reconciled {
        self.filter = filter;
        let traffic = model.traffic(filter);
        self.departures_in_window = traffic.departures;
        self.arrivals_in_window = traffic.arrivals;
        self.traffic = traffic.stations;
        self.radius_scale = RadiusScale::new(&self.traffic);

        let result = self
            .markers
            .reconcile(&model.stations, &self.traffic, &self.radius_scale);
        self.markers.reposition(projection);
        debug!(
            "Filter {:?}: {} markers entered, {} updated, {} exited",
            filter, result.entered, result.updated, result.exited
        );
        result
    }

    /// Pan, zoom, or resize. Only positions change.
    pub fn on_viewport_change(&mut self, projection: &dyn Projection) {
        self.markers.reposition(projection);
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    pub fn traffic(&self) -> &[StationTraffic] {
        &self.traffic
    }

    pub fn radius_scale(&self) -> RadiusScale {
        self.radius_scale
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// (departures, arrivals) counted under the current filter
    pub fn trips_in_window(&self) -> (usize, usize) {
        (self.departures_in_window, self.arrivals_in_window)
    }
}
