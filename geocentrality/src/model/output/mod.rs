mod centrality_writer;
mod output_error;
mod output_format;

pub use centrality_writer::write_centrality;
pub use output_error::OutputError;
pub use output_format::OutputFormat;
