mod centrality_app;
mod centrality_mode;
mod output_folder;

pub use centrality_app::{CentralityApp, CentralityRunOutput};
pub use centrality_mode::CentralityMode;
pub use output_folder::{output_file_stem, output_folder_name};
