use super::{OutputError, OutputFormat};
use crate::algorithm::centrality::{CentralityResult, CentralityRow};
use crate::model::network::NodeId;
use csv::QuoteStyle;
use flate2::{write::GzEncoder, Compression};
use geojson::{Feature, FeatureCollection, JsonObject};
use kdam::tqdm;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use wkt::ToWkt;

#[derive(Debug, Serialize)]
struct CentralityCsvRow<V> {
    src: NodeId,
    dst: NodeId,
    key: u32,
    centrality: V,
    osmid: Option<String>,
    /// WKT
    geometry: Option<String>,
}

impl<V: Copy> From<&CentralityRow<V>> for CentralityCsvRow<V> {
    fn from(row: &CentralityRow<V>) -> Self {
        CentralityCsvRow {
            src: row.edge_key.src,
            dst: row.edge_key.dst,
            key: row.edge_key.key,
            centrality: row.centrality,
            osmid: row.osmid.clone(),
            geometry: row.geometry.as_ref().map(|g| g.to_wkt().to_string()),
        }
    }
}

/// writes a centrality result to `{directory}/{file_stem}.{extension}`,
/// creating the directory if needed. unless `overwrite` is set, an existing
/// file is left in place and None is returned.
pub fn write_centrality<V: Serialize + Copy>(
    result: &CentralityResult<V>,
    directory: &Path,
    file_stem: &str,
    format: OutputFormat,
    overwrite: bool,
) -> Result<Option<PathBuf>, OutputError> {
    if !directory.is_dir() {
        std::fs::create_dir_all(directory).map_err(|e| {
            OutputError::DirectoryError(directory.to_string_lossy().to_string(), e)
        })?;
    }
    let filename = format!("{file_stem}.{}", format.extension());
    let filepath = directory.join(&filename);
    if filepath.exists() && !overwrite {
        log::warn!(
            "{} exists and overwrite is disabled, skipping write",
            filepath.display()
        );
        return Ok(None);
    }
    match format {
        OutputFormat::Csv => write_csv(result, &filepath, &filename)?,
        OutputFormat::GeoJson => write_geojson(result, &filepath, &filename)?,
    }
    log::info!("wrote {} rows to {}", result.len(), filepath.display());
    Ok(Some(filepath))
}

fn write_csv<V: Serialize + Copy>(
    result: &CentralityResult<V>,
    filepath: &Path,
    filename: &str,
) -> Result<(), OutputError> {
    let mut writer = create_writer(filepath, filename, true, QuoteStyle::Necessary)?;
    let row_iter = tqdm!(
        result.rows().iter(),
        total = result.len(),
        desc = "write centrality"
    );
    for row in row_iter {
        writer
            .serialize(CentralityCsvRow::from(row))
            .map_err(|e| OutputError::CsvWriteError(String::from(filename), e))?;
    }
    eprintln!();
    // the gzip trailer is only written by finish, so an incomplete archive
    // surfaces here instead of on drop
    let encoder = writer
        .into_inner()
        .map_err(|e| OutputError::IoError(String::from(filename), e.into_error()))?;
    encoder
        .finish()
        .map_err(|e| OutputError::IoError(String::from(filename), e))?;
    Ok(())
}

fn write_geojson<V: Serialize + Copy>(
    result: &CentralityResult<V>,
    filepath: &Path,
    filename: &str,
) -> Result<(), OutputError> {
    let features = result
        .rows()
        .iter()
        .map(|row| {
            let mut properties = JsonObject::new();
            properties.insert(String::from("src"), serde_json::json!(row.edge_key.src));
            properties.insert(String::from("dst"), serde_json::json!(row.edge_key.dst));
            properties.insert(String::from("key"), serde_json::json!(row.edge_key.key));
            let centrality = serde_json::to_value(row.centrality)
                .map_err(|e| OutputError::JsonWriteError(String::from(filename), e))?;
            properties.insert(String::from("centrality"), centrality);
            properties.insert(String::from("osmid"), serde_json::json!(row.osmid));
            Ok(Feature {
                bbox: None,
                geometry: row
                    .geometry
                    .as_ref()
                    .map(|g| geojson::Geometry::new(geojson::Value::from(g))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect::<Result<Vec<_>, OutputError>>()?;
    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    let file =
        File::create(filepath).map_err(|e| OutputError::IoError(String::from(filename), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &collection)
        .map_err(|e| OutputError::JsonWriteError(String::from(filename), e))?;
    writer
        .flush()
        .map_err(|e| OutputError::IoError(String::from(filename), e))?;
    Ok(())
}

/// helper function to build a gzipped CSV writer.
fn create_writer(
    filepath: &Path,
    filename: &str,
    has_headers: bool,
    quote_style: QuoteStyle,
) -> Result<csv::Writer<GzEncoder<File>>, OutputError> {
    let file =
        File::create(filepath).map_err(|e| OutputError::IoError(String::from(filename), e))?;
    let buffer = GzEncoder::new(file, Compression::default());
    let writer = csv::WriterBuilder::new()
        .has_headers(has_headers)
        .quote_style(quote_style)
        .from_writer(buffer);
    Ok(writer)
}
