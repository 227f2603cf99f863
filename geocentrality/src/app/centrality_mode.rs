use std::fmt::Display;

/// which centrality measure a run computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentralityMode {
    /// Monte-Carlo edge usage from random trips within a study area
    Geographical { number_of_routes: usize },
    /// exact weighted edge betweenness over the whole network
    Betweenness,
}

impl Display for CentralityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CentralityMode::Geographical { .. } => write!(f, "geographical"),
            CentralityMode::Betweenness => write!(f, "betweenness"),
        }
    }
}
