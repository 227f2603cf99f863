use crate::{
    algorithm::sampling::RetryPolicy,
    model::{output::OutputFormat, speed::HighwaySpeeds, CentralityCliError},
};
use serde::{Deserialize, Serialize};

/// defines behaviors for a centrality run
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct CentralityConfiguration {
    /// kph by highway class, used to derive travel times
    pub highway_speeds: HighwaySpeeds,
    /// kph applied to edges whose class has neither a configured nor an
    /// observed speed
    pub fallback_speed_kph: Option<f64>,
    pub retry_policy: RetryPolicy,
    /// fixes the random draws so that runs are reproducible. when unset a seed
    /// is drawn and recorded in the run summary.
    pub random_seed: Option<u64>,
    pub output_format: OutputFormat,
    pub overwrite: bool,
    pub ignore_invalid_maxspeed: bool,
}

impl Default for CentralityConfiguration {
    fn default() -> Self {
        Self {
            highway_speeds: HighwaySpeeds::default(),
            fallback_speed_kph: None,
            retry_policy: RetryPolicy::Unbounded,
            random_seed: None,
            output_format: OutputFormat::Csv,
            overwrite: false,
            ignore_invalid_maxspeed: true,
        }
    }
}

impl CentralityConfiguration {
    pub fn validate(&self) -> Result<(), CentralityCliError> {
        self.highway_speeds
            .validate()
            .map_err(CentralityCliError::ConfigurationError)?;
        self.retry_policy
            .validate()
            .map_err(CentralityCliError::ConfigurationError)?;
        match self.fallback_speed_kph {
            Some(kph) if !kph.is_finite() || kph <= 0.0 => Err(
                CentralityCliError::ConfigurationError(format!(
                    "fallback_speed_kph must be positive, found {kph}"
                )),
            ),
            _ => Ok(()),
        }
    }
}

impl TryFrom<&String> for CentralityConfiguration {
    type Error = CentralityCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let conf: CentralityConfiguration = if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                CentralityCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                CentralityCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                CentralityCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                CentralityCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })?
        } else {
            return Err(CentralityCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )));
        };
        conf.validate()?;
        Ok(conf)
    }
}
