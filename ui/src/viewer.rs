use abstutil::prettyprint_usize;
use geom::{Circle, Distance, GPSBounds, LonLat, Pt2D};
use widgetry::{Canvas, Color, Drawable, EventCtx, GeomBatch, GfxCtx, Line, State, Text};

use bluebikes::StationID;
use model::{Projection, TimeFilter, TrafficView};

use crate::components::{legend, TimeSlider};
use crate::{App, Transition};

pub struct Viewer {
    time_slider: TimeSlider,
    /// None if nothing loaded
    view: Option<TrafficView>,
    // In map-space; the canvas handles moving these
    draw_background: Drawable,
    // In screen-space, rebuilt when the viewport or filter changes
    draw_markers: Drawable,
    viewport: Viewport,
    hovering: Option<StationID>,
}

impl Viewer {
    pub fn new_state(ctx: &mut EventCtx, app: &App) -> Box<dyn State<App>> {
        let view = app.model.as_ref().map(|model| {
            let projection = CanvasProjection {
                canvas: &ctx.canvas,
                gps_bounds: &model.gps_bounds,
            };
            TrafficView::new(model, app.initial_filter, &projection)
        });

        let mut state = Self {
            time_slider: TimeSlider::new(ctx, app.initial_filter),
            view,
            draw_background: draw_background(ctx, app),
            draw_markers: Drawable::empty(ctx),
            viewport: Viewport::new(&ctx.canvas),
            hovering: None,
        };
        state.redraw_markers(ctx);
        state.update_stats(ctx, app);
        Box::new(state)
    }

    fn on_filter_change(&mut self, ctx: &mut EventCtx, app: &App, filter: TimeFilter) {
        if let (Some(view), Some(model)) = (self.view.as_mut(), app.model.as_ref()) {
            let projection = CanvasProjection {
                canvas: &ctx.canvas,
                gps_bounds: &model.gps_bounds,
            };
            view.set_filter(model, filter, &projection);
        }
        self.redraw_markers(ctx);
        self.update_stats(ctx, app);
        self.update_hovering(ctx);
    }

    fn on_viewport_change(&mut self, ctx: &mut EventCtx, app: &App) {
        if let (Some(view), Some(model)) = (self.view.as_mut(), app.model.as_ref()) {
            let projection = CanvasProjection {
                canvas: &ctx.canvas,
                gps_bounds: &model.gps_bounds,
            };
            view.on_viewport_change(&projection);
        }
        self.redraw_markers(ctx);
        self.update_hovering(ctx);
    }

    // Markers move and resize under a still cursor too
    fn update_hovering(&mut self, ctx: &EventCtx) {
        self.hovering = match (self.view.as_ref(), ctx.canvas.get_cursor_in_screen_space()) {
            (Some(view), Some(pt)) => view
                .markers()
                .hit(Pt2D::new(pt.x, pt.y))
                .map(|marker| marker.station),
            _ => None,
        };
    }

    fn redraw_markers(&mut self, ctx: &mut EventCtx) {
        let mut batch = GeomBatch::new();
        if let Some(ref view) = self.view {
            for marker in view.markers().iter() {
                // Idle stations still have a marker, just nothing to draw
                if marker.radius <= 0.0 {
                    continue;
                }
                let circle = Circle::new(marker.center, Distance::meters(marker.radius));
                batch.push(
                    legend::marker_color(marker.departure_ratio).alpha(0.6),
                    circle.to_polygon(),
                );
                if let Ok(outline) = circle.to_outline(Distance::meters(1.0)) {
                    batch.push(Color::WHITE, outline);
                }
            }
        }
        self.draw_markers = ctx.upload(batch);
    }

    fn update_stats(&mut self, ctx: &mut EventCtx, app: &App) {
        let stats = match (self.view.as_ref(), app.model.as_ref()) {
            (Some(view), Some(model)) => {
                let (departures, arrivals) = view.trips_in_window();
                let mut txt = Text::from_multiline(vec![
                    Line(format!(
                        "{} stations",
                        prettyprint_usize(model.stations.stations.len())
                    )),
                    Line(format!(
                        "{} departures, {} arrivals",
                        prettyprint_usize(departures),
                        prettyprint_usize(arrivals)
                    )),
                ]);
                if let Some(busiest) = view.traffic().iter().max_by_key(|t| t.total_traffic) {
                    if busiest.total_traffic > 0 {
                        txt.add_line(Line(format!(
                            "Busiest: {} ({})",
                            station_name(app, busiest.station),
                            busiest.describe()
                        )));
                    }
                }
                txt.into_widget(ctx)
            }
            _ => Text::from(Line("No data loaded; check the logs").small()).into_widget(ctx),
        };
        self.time_slider.set_stats(ctx, stats);
    }
}

impl State<App> for Viewer {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        ctx.canvas_movement();

        if let Some(filter) = self.time_slider.event(ctx) {
            self.on_filter_change(ctx, app, filter);
        }

        // Pan, zoom, and window resizes all show up here
        let viewport = Viewport::new(&ctx.canvas);
        if viewport != self.viewport {
            self.viewport = viewport;
            self.on_viewport_change(ctx, app);
        }

        if ctx.redo_mouseover() {
            self.update_hovering(ctx);
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, app: &App) {
        g.redraw(&self.draw_background);

        g.fork_screenspace();
        g.redraw(&self.draw_markers);
        g.unfork();

        self.time_slider.draw(g);

        if let (Some(id), Some(view)) = (self.hovering, self.view.as_ref()) {
            if let Some(marker) = view.markers().get(id) {
                let mut txt = Text::from(Line(station_name(app, id)).small_heading());
                txt.add_line(Line(&marker.tooltip));
                g.draw_mouse_tooltip(txt);
            }
        }
    }
}

fn draw_background(ctx: &mut EventCtx, app: &App) -> Drawable {
    let mut batch = GeomBatch::new();
    if let Some(ref model) = app.model {
        batch.push(Color::grey(0.1), model.bounds.get_rectangle());
    }
    for pl in &app.bike_lanes {
        batch.push(
            Color::GREEN.alpha(0.4),
            pl.make_polygons(Distance::meters(3.0)),
        );
    }
    ctx.upload(batch)
}

fn station_name(app: &App, id: StationID) -> String {
    match app.model {
        Some(ref model) => {
            let station = model.stations.get(id);
            station
                .name
                .clone()
                .unwrap_or_else(|| station.orig_id.0.clone())
        }
        None => String::new(),
    }
}

/// Projects through the map's GPS bounds, then the current camera.
struct CanvasProjection<'a> {
    canvas: &'a Canvas,
    gps_bounds: &'a GPSBounds,
}

impl Projection for CanvasProjection<'_> {
    fn project(&self, gps: LonLat) -> Pt2D {
        let pt = self.canvas.map_to_screen(gps.to_pt(self.gps_bounds));
        Pt2D::new(pt.x, pt.y)
    }
}

#[derive(PartialEq)]
struct Viewport {
    cam_x: f64,
    cam_y: f64,
    cam_zoom: f64,
    window_width: f64,
    window_height: f64,
}

impl Viewport {
    fn new(canvas: &Canvas) -> Self {
        Self {
            cam_x: canvas.cam_x,
            cam_y: canvas.cam_y,
            cam_zoom: canvas.cam_zoom,
            window_width: canvas.window_width,
            window_height: canvas.window_height,
        }
    }
}
