use crate::model::network::NetworkError;
use kdam::tqdm;
use std::collections::HashMap;

/// looks up length-weighted average values by class labels in order to fill
/// incomplete data taken from OpenStreetMaps, such as maxspeed entries.
#[derive(Debug, Clone)]
pub struct FillValueLookup {
    pub class_field: String,
    pub value_field: String,
    pub values_by_class: HashMap<String, f64>,
    /// None when no row carried both a class and a value
    pub global_average: Option<f64>,
}

impl FillValueLookup {
    /// aggregates `value_op` per `class_op` label, weighting each row by
    /// `weight_op` (such as the segment length). rows missing a label or
    /// value are skipped.
    pub fn new<T>(
        rows: &[T],
        class_label_field: &str,
        value_field: &str,
        class_op: impl Fn(&T) -> Option<String>,
        value_op: impl Fn(&T) -> Result<Option<f64>, NetworkError>,
        weight_op: impl Fn(&T) -> f64,
    ) -> Result<FillValueLookup, NetworkError> {
        let mut buckets: HashMap<String, (Vec<f64>, Vec<f64>)> = HashMap::new();
        let row_iter = tqdm!(
            rows.iter(),
            desc = "collect fill values",
            total = rows.len()
        );
        for row in row_iter {
            let class_label_opt = class_op(row);
            let value_opt = value_op(row)?;
            if let (Some(class_label), Some(value)) = (class_label_opt, value_opt) {
                let (vs, ws) = buckets.entry(class_label).or_default();
                vs.push(value);
                ws.push(weight_op(row).max(0.0));
            }
        }
        eprintln!();

        let mut global_numer: f64 = 0.0;
        let mut global_denom: f64 = 0.0;
        let mut global_values: Vec<f64> = vec![];
        let values_by_class = buckets
            .iter()
            .map(|(k, (vs, ws))| {
                let numer: f64 = vs.iter().zip(ws).map(|(v, w)| v * w).sum();
                let denom: f64 = ws.iter().sum();
                global_numer += numer;
                global_denom += denom;
                global_values.extend(vs.iter());
                (k.clone(), weighted_mean(numer, denom, vs))
            })
            .collect::<HashMap<String, f64>>();

        let global_average = if global_values.is_empty() {
            None
        } else {
            Some(weighted_mean(global_numer, global_denom, &global_values))
        };
        log::debug!(
            "fill values for {value_field} by {class_label_field}: {} classes, global average {:?}",
            values_by_class.len(),
            global_average
        );
        Ok(FillValueLookup {
            class_field: String::from(class_label_field),
            value_field: String::from(value_field),
            values_by_class,
            global_average,
        })
    }

    /// average value observed for this class label, if any rows carried it.
    pub fn get_class(&self, label: &str) -> Option<f64> {
        self.values_by_class.get(label).copied()
    }
}

/// weighted mean, or the plain mean when all weights are zero.
fn weighted_mean(numer: f64, denom: f64, values: &[f64]) -> f64 {
    if denom > 0.0 {
        numer / denom
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
