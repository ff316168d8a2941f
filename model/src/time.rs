use chrono::{NaiveDateTime, NaiveTime, Timelike};

pub const MINUTES_PER_DAY: usize = 24 * 60;
/// How far before and after the selected minute trips are counted
pub const WINDOW_MINUTES: usize = 60;

/// The slider position. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFilter {
    AnyTime,
    /// Minutes since midnight, in [0, 1439]
    Minute(usize),
}

impl TimeFilter {
    /// The raw slider value: -1 means any time. Out-of-range values are clamped.
    pub fn from_slider(value: i32) -> Self {
        if value < 0 {
            TimeFilter::AnyTime
        } else {
            TimeFilter::Minute((value as usize).min(MINUTES_PER_DAY - 1))
        }
    }

    pub fn to_slider(self) -> i32 {
        match self {
            TimeFilter::AnyTime => -1,
            TimeFilter::Minute(m) => m as i32,
        }
    }

    /// Sliders report a position in [0, 1]; the far left is "any time".
    pub fn from_percent(pct: f64) -> Self {
        let steps = (pct.clamp(0.0, 1.0) * MINUTES_PER_DAY as f64).round() as i32;
        Self::from_slider(steps - 1)
    }

    pub fn to_percent(self) -> f64 {
        (self.to_slider() + 1) as f64 / MINUTES_PER_DAY as f64
    }

    /// Like "8:00 AM". Empty for any time.
    pub fn describe(self) -> String {
        match self {
            TimeFilter::AnyTime => String::new(),
            TimeFilter::Minute(m) => format_minute(m),
        }
    }
}

pub fn minutes_since_midnight(t: NaiveDateTime) -> usize {
    (t.hour() * 60 + t.minute()) as usize
}

fn format_minute(minute: usize) -> String {
    let minute = minute % MINUTES_PER_DAY;
    match NaiveTime::from_hms_opt((minute / 60) as u32, (minute % 60) as u32, 0) {
        Some(t) => t.format("%-I:%M %p").to_string(),
        None => String::new(),
    }
}
