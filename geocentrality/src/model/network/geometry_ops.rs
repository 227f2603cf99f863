use geo::{Geometry, LineString, Polygon};
use serde::{de, Deserialize};
use wkt::TryFromWkt;

/// deserializes a CSV string, which may be enquoted, into a LineString<f64>.
pub fn csv_string_to_linestring(v: &str) -> Result<LineString<f64>, String> {
    let wkt: wkt::Wkt<f64> = strip_quotes(v)
        .parse()
        .map_err(|e| format!("failed to parse WKT string: {e}"))?;
    let linestring: LineString<f64> = wkt
        .try_into()
        .map_err(|e| format!("failed to parse WKT string: {e}"))?;
    Ok(linestring)
}

/// reads a study area polygon from WKT. a MULTIPOLYGON is accepted only if it
/// holds exactly one polygon.
pub fn wkt_to_polygon(v: &str) -> Result<Polygon<f64>, String> {
    let geometry = Geometry::<f64>::try_from_wkt_str(strip_quotes(v.trim()))
        .map_err(|e| format!("failed to parse WKT string: {e}"))?;
    match geometry {
        Geometry::Polygon(p) => Ok(p),
        Geometry::MultiPolygon(mp) => match mp.0.as_slice() {
            [p] => Ok(p.clone()),
            ps => Err(format!(
                "study area must be a single polygon, found MULTIPOLYGON with {} members",
                ps.len()
            )),
        },
        _ => Err(String::from(
            "study area must be a POLYGON or single-member MULTIPOLYGON",
        )),
    }
}

/// reads an optional WKT LineString cell, where an empty cell is None.
pub fn deserialize_optional_linestring<'de, D>(d: D) -> Result<Option<LineString<f64>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(d)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => csv_string_to_linestring(&s)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

fn strip_quotes(v: &str) -> &str {
    if v.starts_with('"') && v.ends_with('"') && v.len() > 1 {
        &v[1..v.len() - 1]
    } else {
        v
    }
}
