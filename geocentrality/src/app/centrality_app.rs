use super::{output_file_stem, output_folder_name, CentralityMode};
use crate::algorithm::centrality::{edge_betweenness_centrality, GeographicalCentrality};
use crate::algorithm::routing::DrawStatistics;
use crate::config::CentralityConfiguration;
use crate::model::network::{network_reader, RoadGraph, Weight};
use crate::model::output::write_centrality;
use crate::model::speed::assign_travel_times;
use crate::model::study_area::StudyArea;
use crate::model::CentralityCliError;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::cmp::Reverse;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// locations written by a run. a file is None when an existing file was kept
/// because overwrite is disabled.
#[derive(Debug, Clone)]
pub struct CentralityRunOutput {
    pub output_folder: PathBuf,
    pub result_file: Option<PathBuf>,
    pub summary_file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    region: &'a str,
    mode: String,
    weight: Weight,
    number_of_routes: Option<usize>,
    scored_edges: usize,
    random_seed: Option<u64>,
    draw_statistics: Option<DrawStatistics>,
}

/// runs a centrality computation from files on disk and persists the result
/// into `{output_directory}/{output folder}`.
#[derive(Debug, Clone)]
pub struct CentralityApp {
    pub vertices_file: PathBuf,
    pub edges_file: PathBuf,
    /// description of the region, used to name the study area and the output folder
    pub region: String,
    pub weight: Weight,
    pub output_directory: PathBuf,
    pub configuration: CentralityConfiguration,
}

impl CentralityApp {
    /// reads the road network. travel times are derived when routing by
    /// travel time.
    pub fn load_graph(&self) -> Result<RoadGraph, CentralityCliError> {
        let mut graph = network_reader::read_road_graph(&self.vertices_file, &self.edges_file)?;
        if self.weight == Weight::TravelTime {
            let conf = &self.configuration;
            let counts = assign_travel_times(
                &mut graph,
                &conf.highway_speeds,
                conf.fallback_speed_kph,
                conf.ignore_invalid_maxspeed,
            )?;
            for (source, count) in counts.iter().sorted_by_key(|(_, c)| Reverse(**c)) {
                log::info!("{count} edge speeds resolved by {source:?}");
            }
        }
        Ok(graph)
    }

    pub fn run_geographical(
        &self,
        extent_file: &Path,
        number_of_routes: usize,
    ) -> Result<CentralityRunOutput, CentralityCliError> {
        let mode = CentralityMode::Geographical { number_of_routes };
        log::info!("reading study area from {}", extent_file.display());
        let study_area = StudyArea::from_wkt_file(&self.region, extent_file)?;
        let graph = self.load_graph()?;
        let edge_attributes = graph.edge_attributes();
        let estimator = GeographicalCentrality::new(
            &graph,
            &study_area,
            &edge_attributes,
            self.weight,
            number_of_routes,
            self.configuration.retry_policy,
        );
        let random_seed = self.random_seed();
        let mut rng = StdRng::seed_from_u64(random_seed);
        let run = estimator.run(&mut rng)?;
        log::info!("{}", run.statistics);

        let summary = RunSummary {
            region: &self.region,
            mode: mode.to_string(),
            weight: self.weight,
            number_of_routes: Some(number_of_routes),
            scored_edges: run.result.len(),
            random_seed: Some(random_seed),
            draw_statistics: Some(run.statistics),
        };
        let output_folder = self.output_folder(&mode);
        let stem = output_file_stem(&mode, self.weight);
        let result_file = write_centrality(
            &run.result,
            &output_folder,
            &stem,
            self.configuration.output_format,
            self.configuration.overwrite,
        )?;
        let summary_file = self.write_summary(&output_folder, &stem, &summary)?;
        Ok(CentralityRunOutput {
            output_folder,
            result_file,
            summary_file,
        })
    }

    pub fn run_betweenness(&self) -> Result<CentralityRunOutput, CentralityCliError> {
        let mode = CentralityMode::Betweenness;
        let graph = self.load_graph()?;
        let result = edge_betweenness_centrality(&graph, self.weight)?;

        let summary = RunSummary {
            region: &self.region,
            mode: mode.to_string(),
            weight: self.weight,
            number_of_routes: None,
            scored_edges: result.len(),
            random_seed: None,
            draw_statistics: None,
        };
        let output_folder = self.output_folder(&mode);
        let stem = output_file_stem(&mode, self.weight);
        let result_file = write_centrality(
            &result,
            &output_folder,
            &stem,
            self.configuration.output_format,
            self.configuration.overwrite,
        )?;
        let summary_file = self.write_summary(&output_folder, &stem, &summary)?;
        Ok(CentralityRunOutput {
            output_folder,
            result_file,
            summary_file,
        })
    }

    fn output_folder(&self, mode: &CentralityMode) -> PathBuf {
        self.output_directory
            .join(output_folder_name(&self.region, mode, self.weight))
    }

    /// the configured seed, or a fresh one so that the run can be repeated
    /// from its summary.
    fn random_seed(&self) -> u64 {
        match self.configuration.random_seed {
            Some(seed) => seed,
            None => {
                let seed = rand::rng().random::<u64>();
                log::info!("no random_seed configured, seeding with {seed}");
                seed
            }
        }
    }

    fn write_summary(
        &self,
        output_folder: &Path,
        stem: &str,
        summary: &RunSummary,
    ) -> Result<Option<PathBuf>, CentralityCliError> {
        let filepath = output_folder.join(format!("{stem}_summary.json"));
        if filepath.exists() && !self.configuration.overwrite {
            log::warn!(
                "{} exists and overwrite is disabled, skipping write",
                filepath.display()
            );
            return Ok(None);
        }
        std::fs::create_dir_all(output_folder)?;
        let file = File::create(&filepath)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, summary)?;
        writer.flush()?;
        Ok(Some(filepath))
    }
}
