use widgetry::tools::ColorLegend;
use widgetry::{Color, EventCtx, Widget};

// steelblue
pub fn departures_color() -> Color {
    Color::hex("#4682B4")
}

// darkorange
pub fn arrivals_color() -> Color {
    Color::hex("#FF8C00")
}

/// Blends from arrival-heavy (0) to departure-heavy (1)
pub fn marker_color(departure_ratio: f64) -> Color {
    arrivals_color().lerp(departures_color(), departure_ratio)
}

pub fn widget(ctx: &mut EventCtx) -> Widget {
    Widget::row(vec![
        ColorLegend::row(ctx, marker_color(1.0), "More departures"),
        ColorLegend::row(ctx, marker_color(0.5), "Balanced"),
        ColorLegend::row(ctx, marker_color(0.0), "More arrivals"),
    ])
}
