#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod components;
mod viewer;

use std::io::BufReader;

use abstutil::Timer;
use anyhow::Result;
use geom::PolyLine;
use structopt::StructOpt;
use widgetry::{Color, EventCtx, GfxCtx, Settings, SharedAppState};

use bluebikes::{Stations, Trip};
use model::{Model, TimeFilter};

#[derive(StructOpt)]
struct Args {
    /// The station information JSON, with a `data.stations` list
    #[structopt(long, default_value = "bluebikes-stations.json")]
    stations: String,
    /// One month of trip history, as a .csv or a .zip containing one
    #[structopt(long, default_value = "bluebikes-traffic-2024-03.csv")]
    trips: String,
    /// A GeoJSON file with the bike network, drawn underneath the stations
    #[structopt(long)]
    bike_lanes: Option<String>,
    /// The initial time filter, in minutes since midnight. -1 means any time.
    #[structopt(long, default_value = "-1", allow_hyphen_values = true)]
    time: i32,
}

impl Args {
    // Trips only make sense once stations are known, so stop at the first failure
    fn load(&self, timer: &mut Timer) -> Result<Model> {
        timer.start("load stations");
        let stations = load_stations(&self.stations)
            .map_err(|err| anyhow!("Error loading stations from {}: {err}", self.stations))?;
        timer.stop("load stations");

        timer.start("load trips");
        let trips = load_trips(&self.trips)
            .map_err(|err| anyhow!("Error loading trips from {}: {err}", self.trips))?;
        timer.stop("load trips");

        Ok(Model::new(stations, trips, timer))
    }

    fn load_bike_lanes(&self, model: &Model) -> Vec<PolyLine> {
        let path = match self.bike_lanes {
            Some(ref path) => path,
            None => return Vec::new(),
        };
        let result = fs_err::File::open(path)
            .map_err(anyhow::Error::from)
            .and_then(|file| {
                bluebikes::bike_lanes::load(BufReader::new(file), &model.gps_bounds)
            });
        match result {
            Ok(lines) => lines,
            Err(err) => {
                error!("Error loading bike lanes from {path}: {err}");
                Vec::new()
            }
        }
    }
}

fn load_stations(path: &str) -> Result<Stations> {
    let file = fs_err::File::open(path)?;
    bluebikes::load_stations(BufReader::new(file))
}

fn load_trips(path: &str) -> Result<Vec<Trip>> {
    let file = fs_err::File::open(path)?;
    if path.ends_with(".zip") {
        bluebikes::load_trips_zip(BufReader::new(file))
    } else {
        bluebikes::load_trips(BufReader::new(file))
    }
}

fn run(settings: Settings) {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());

    widgetry::run(settings, move |ctx| {
        let (model, bike_lanes) = ctx.loading_screen("load Bluebikes data", |_, timer| {
            match args.load(timer) {
                Ok(model) => {
                    let bike_lanes = args.load_bike_lanes(&model);
                    (Some(model), bike_lanes)
                }
                // Nothing will be drawn for the rest of the session
                Err(err) => {
                    error!("{err}");
                    (None, Vec::new())
                }
            }
        });

        let app = App::new(ctx, model, bike_lanes, TimeFilter::from_slider(args.time));
        let states = vec![viewer::Viewer::new_state(ctx, &app)];
        (app, states)
    });
}

pub fn main() {
    let settings = Settings::new("Bluebikes Traffic");
    run(settings);
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_wasm() {
    run(Settings::new("Bluebikes Traffic").root_dom_element_id("loading".to_string()));
}

pub struct App {
    /// None if loading failed
    model: Option<Model>,
    bike_lanes: Vec<PolyLine>,
    initial_filter: TimeFilter,
}

impl SharedAppState for App {
    fn draw_default(&self, g: &mut GfxCtx) {
        if cfg!(not(target_arch = "wasm32")) {
            g.clear(Color::BLACK);
        }
    }
}

pub type Transition = widgetry::Transition<App>;

impl App {
    pub fn new(
        ctx: &mut EventCtx,
        model: Option<Model>,
        bike_lanes: Vec<PolyLine>,
        initial_filter: TimeFilter,
    ) -> Self {
        if let Some(ref model) = model {
            let bounds = &model.bounds;
            ctx.canvas.map_dims = (bounds.max_x, bounds.max_y);
            ctx.canvas.center_on_map_pt(bounds.center());
        }

        Self {
            model,
            bike_lanes,
            initial_filter,
        }
    }
}
