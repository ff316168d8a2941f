use crate::StationTraffic;

/// Radius in pixels of the busiest station
pub const MAX_RADIUS: f64 = 25.0;

/// Square-root scale from total traffic to marker radius, so area tracks traffic. The domain
/// depends on the current filter, so rebuild it after every aggregation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusScale {
    max_traffic: usize,
}

impl RadiusScale {
    pub fn new(traffic: &[StationTraffic]) -> Self {
        Self {
            max_traffic: traffic.iter().map(|t| t.total_traffic).max().unwrap_or(0),
        }
    }

    pub fn max_traffic(&self) -> usize {
        self.max_traffic
    }

    /// When nothing has any traffic, everything collapses to 0.
    pub fn radius(&self, total_traffic: usize) -> f64 {
        if self.max_traffic == 0 {
            return 0.0;
        }
        let pct = (total_traffic as f64 / self.max_traffic as f64).clamp(0.0, 1.0);
        MAX_RADIUS * pct.sqrt()
    }
}

/// 0 means only arrivals, 1 means only departures, quantized into 3 steps. Idle stations are
/// balanced.
pub fn departure_ratio(traffic: &StationTraffic) -> f64 {
    if traffic.total_traffic == 0 {
        return 0.5;
    }
    quantize(traffic.departures as f64 / traffic.total_traffic as f64)
}

const FLOW_STEPS: [f64; 3] = [0.0, 0.5, 1.0];

// Split [0, 1] into equal-width buckets
fn quantize(x: f64) -> f64 {
    let n = FLOW_STEPS.len();
    let idx = (x.clamp(0.0, 1.0) * n as f64).floor() as usize;
    FLOW_STEPS[idx.min(n - 1)]
}
