use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uom::si::f64::Velocity;
use uom::si::velocity;

/// free-flow speeds in kph assigned to edges by OSM `highway` class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighwaySpeeds(HashMap<String, f64>);

impl Default for HighwaySpeeds {
    fn default() -> Self {
        let table = [
            ("motorway", 100.0),
            ("motorway_link", 60.0),
            ("motorroad", 90.0),
            ("trunk", 85.0),
            ("trunk_link", 60.0),
            ("primary", 65.0),
            ("primary_link", 50.0),
            ("secondary", 60.0),
            ("secondary_link", 50.0),
            ("tertiary", 50.0),
            ("tertiary_link", 40.0),
            ("unclassified", 30.0),
            ("residential", 30.0),
            ("living_street", 10.0),
            ("service", 20.0),
            ("road", 20.0),
            ("track", 15.0),
        ];
        HighwaySpeeds(
            table
                .into_iter()
                .map(|(k, v)| (String::from(k), v))
                .collect(),
        )
    }
}

impl HighwaySpeeds {
    pub fn new(speeds_kph: HashMap<String, f64>) -> HighwaySpeeds {
        HighwaySpeeds(speeds_kph)
    }

    /// configured speed for a highway class, if any.
    pub fn get(&self, highway: &str) -> Option<Velocity> {
        self.0
            .get(highway)
            .map(|kph| Velocity::new::<velocity::kilometer_per_hour>(*kph))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// every configured speed must be a positive finite number.
    pub fn validate(&self) -> Result<(), String> {
        let invalid = self
            .0
            .iter()
            .filter(|(_, kph)| !kph.is_finite() || **kph <= 0.0)
            .map(|(k, kph)| format!("{k}={kph}"))
            .collect::<Vec<_>>();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(format!(
                "highway speeds must be positive, found: {}",
                invalid.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HighwaySpeeds;
    use std::collections::HashMap;
    use uom::si::velocity::kilometer_per_hour;

    #[test]
    fn default_table() {
        let speeds = HighwaySpeeds::default();
        assert_eq!(speeds.len(), 17);
        let residential = speeds.get("residential").expect("should have residential");
        assert!((residential.get::<kilometer_per_hour>() - 30.0).abs() < 1e-9);
        assert!(speeds.get("footway").is_none());
        assert!(speeds.validate().is_ok());
    }

    #[test]
    fn deserialize_from_toml_table() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            highway_speeds: HighwaySpeeds,
        }
        let src = "[highway_speeds]\nresidential = 25.0\nprimary = 70.0\n";
        let w: Wrapper = toml::from_str(src).expect("should deserialize");
        assert_eq!(w.highway_speeds.len(), 2);
        assert!(w.highway_speeds.get("motorway").is_none());
    }

    #[test]
    fn non_positive_speed_is_invalid() {
        let speeds = HighwaySpeeds::new(HashMap::from([(String::from("track"), 0.0)]));
        assert!(speeds.validate().is_err());
    }
}
