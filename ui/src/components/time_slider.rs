use widgetry::{
    EventCtx, GfxCtx, HorizontalAlignment, Line, Outcome, Panel, Slider, Text, TextExt,
    VerticalAlignment, Widget,
};

use model::TimeFilter;

use super::legend;

/// The title, time slider, clock, and legend. Holds the one active filter.
pub struct TimeSlider {
    pub panel: Panel,
    filter: TimeFilter,
}

impl TimeSlider {
    pub fn new(ctx: &mut EventCtx, filter: TimeFilter) -> Self {
        let mut slider = Self {
            panel: Panel::new_builder(Widget::col(vec![
                Line("Bluebikes traffic").small_heading().into_widget(ctx),
                Widget::row(vec![
                    "Filter by time:".text_widget(ctx),
                    Widget::placeholder(ctx, "clock"),
                    Widget::placeholder(ctx, "any time"),
                ]),
                Slider::area(
                    ctx,
                    0.25 * ctx.canvas.window_width,
                    filter.to_percent(),
                    "time slider",
                ),
                legend::widget(ctx),
                Widget::placeholder(ctx, "stats"),
            ]))
            .aligned(HorizontalAlignment::Right, VerticalAlignment::Top)
            .build(ctx),
            filter,
        };
        slider.on_filter_change(ctx);
        slider
    }

    fn on_filter_change(&mut self, ctx: &mut EventCtx) {
        let (clock, any_time) = match self.filter {
            TimeFilter::AnyTime => (
                Widget::nothing(),
                Text::from(Line("(any time)").small()).into_widget(ctx),
            ),
            TimeFilter::Minute(_) => (
                Text::from(Line(self.filter.describe()).big_monospaced()).into_widget(ctx),
                Widget::nothing(),
            ),
        };
        self.panel.replace(ctx, "clock", clock);
        self.panel.replace(ctx, "any time", any_time);
    }

    /// Returns the new filter if the user moved the slider to a different value.
    pub fn event(&mut self, ctx: &mut EventCtx) -> Option<TimeFilter> {
        if let Outcome::Changed(x) = self.panel.event(ctx) {
            if x == "time slider" {
                let filter =
                    TimeFilter::from_percent(self.panel.slider("time slider").get_percent());
                if filter != self.filter {
                    self.filter = filter;
                    self.on_filter_change(ctx);
                    return Some(filter);
                }
            }
        }
        None
    }

    pub fn set_stats(&mut self, ctx: &mut EventCtx, stats: Widget) {
        self.panel.replace(ctx, "stats", stats);
    }

    pub fn draw(&self, g: &mut GfxCtx) {
        self.panel.draw(g);
    }
}
