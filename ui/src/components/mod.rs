pub mod legend;
mod time_slider;

pub use time_slider::TimeSlider;
