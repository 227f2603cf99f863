use clap::{Parser, Subcommand};
use geocentrality::{
    app::CentralityApp, config::CentralityConfiguration, model::network::Weight,
    model::CentralityCliError,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CentralityAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// edge usage of random trips between points in a study area
    Geographical {
        #[arg(long, help = "path to vertices CSV (node_id,x,y), optionally gzipped")]
        vertices_file: String,
        #[arg(long, help = "path to edges CSV, optionally gzipped")]
        edges_file: String,
        #[arg(long, help = "path to file containing the WKT polygon of the study area")]
        extent_file: String,
        #[arg(long, help = "description of the study region, used in output names")]
        region: String,
        #[arg(long, value_enum, default_value_t = Weight::Length)]
        weight: Weight,
        #[arg(long, help = "number of random routes to generate")]
        number_of_routes: usize,
        #[arg(long, help = "path to TOML or JSON file with run parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "output path for centrality results")]
        output_directory: String,
    },
    /// exact weighted edge betweenness over the whole network
    Betweenness {
        #[arg(long, help = "path to vertices CSV (node_id,x,y), optionally gzipped")]
        vertices_file: String,
        #[arg(long, help = "path to edges CSV, optionally gzipped")]
        edges_file: String,
        #[arg(long, help = "description of the study region, used in output names")]
        region: String,
        #[arg(long, value_enum, default_value_t = Weight::Length)]
        weight: Weight,
        #[arg(long, help = "path to TOML or JSON file with run parameters")]
        configuration_file: Option<String>,
        #[arg(long, help = "output path for centrality results")]
        output_directory: String,
    },
}

fn read_configuration(
    configuration_file: &Option<String>,
) -> Result<CentralityConfiguration, CentralityCliError> {
    match configuration_file {
        None => Ok(CentralityConfiguration::default()),
        Some(f) => {
            log::info!("reading centrality configuration from {f}");
            CentralityConfiguration::try_from(f)
        }
    }
}

pub fn run(app: &App) -> Result<(), CentralityCliError> {
    env_logger::init();
    let output = match app {
        App::Geographical {
            vertices_file,
            edges_file,
            extent_file,
            region,
            weight,
            number_of_routes,
            configuration_file,
            output_directory,
        } => {
            let centrality_app = CentralityApp {
                vertices_file: PathBuf::from(vertices_file),
                edges_file: PathBuf::from(edges_file),
                region: region.clone(),
                weight: *weight,
                output_directory: PathBuf::from(output_directory),
                configuration: read_configuration(configuration_file)?,
            };
            centrality_app.run_geographical(Path::new(extent_file), *number_of_routes)
        }
        App::Betweenness {
            vertices_file,
            edges_file,
            region,
            weight,
            configuration_file,
            output_directory,
        } => {
            let centrality_app = CentralityApp {
                vertices_file: PathBuf::from(vertices_file),
                edges_file: PathBuf::from(edges_file),
                region: region.clone(),
                weight: *weight,
                output_directory: PathBuf::from(output_directory),
                configuration: read_configuration(configuration_file)?,
            };
            centrality_app.run_betweenness()
        }
    };
    match output {
        Ok(o) => {
            eprintln!("finished. results in {}", o.output_folder.display());
            Ok(())
        }
        Err(e) => {
            log::error!("geocentrality failed: {e}");
            Err(e)
        }
    }
}

fn main() {
    let args = CentralityAppArguments::parse();
    if let Err(e) = run(&args.app) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
