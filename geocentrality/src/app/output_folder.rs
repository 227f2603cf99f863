use super::CentralityMode;
use crate::model::network::Weight;

/// name of the folder a run writes into, `Output_{region}_{mode}_{weight}`,
/// suffixed with `_{n}_routes` for geographical runs. commas in the region
/// become underscores.
pub fn output_folder_name(region: &str, mode: &CentralityMode, weight: Weight) -> String {
    let region = region.replace(',', "_");
    match mode {
        CentralityMode::Geographical { number_of_routes } => {
            format!("Output_{region}_{mode}_{weight}_{number_of_routes}_routes")
        }
        CentralityMode::Betweenness => format!("Output_{region}_{mode}_{weight}"),
    }
}

/// file name of a centrality result without its extension.
pub fn output_file_stem(mode: &CentralityMode, weight: Weight) -> String {
    match mode {
        CentralityMode::Geographical { number_of_routes } => {
            format!("geographical_centrality_{weight}_routes_{number_of_routes}")
        }
        CentralityMode::Betweenness => format!("betweenness_centrality_{weight}"),
    }
}
