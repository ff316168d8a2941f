use anyhow::Result;
use geojson::{GeoJson, Geometry, Value};
use geom::{GPSBounds, LonLat, PolyLine, Pt2D};

/// Reads every LineString and MultiLineString out of a GeoJSON file describing the bike
/// network. Other geometry is ignored.
pub fn load<R: std::io::Read>(mut reader: R, gps_bounds: &GPSBounds) -> Result<Vec<PolyLine>> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let geojson: GeoJson = raw.parse()?;

    let geometries: Vec<Geometry> = match geojson {
        GeoJson::FeatureCollection(fc) => fc
            .features
            .into_iter()
            .filter_map(|f| f.geometry)
            .collect(),
        GeoJson::Feature(f) => f.geometry.into_iter().collect(),
        GeoJson::Geometry(g) => vec![g],
    };

    let mut lines = Vec::new();
    let mut skipped = 0;
    for geometry in geometries {
        let paths = match geometry.value {
            Value::LineString(pts) => vec![pts],
            Value::MultiLineString(paths) => paths,
            _ => continue,
        };
        for path in paths {
            let pts: Vec<Pt2D> = path
                .into_iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| LonLat::new(pos[0], pos[1]).to_pt(gps_bounds))
                .collect();
            match PolyLine::deduping_new(pts) {
                Ok(pl) => lines.push(pl),
                Err(_) => {
                    skipped += 1;
                }
            }
        }
    }
    if skipped > 0 {
        warn!("Skipped {skipped} degenerate bike lane segments");
    }
    info!("Loaded {} bike lane segments", lines.len());
    Ok(lines)
}
