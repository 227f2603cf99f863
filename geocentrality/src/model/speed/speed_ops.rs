use itertools::Itertools;
use std::cmp::Ordering;
use uom::si::f64::Velocity;
use uom::si::velocity;

pub const DEFAULT_WALK_SPEED_KPH: f64 = 5.0;

/// deals with the various ways that maxspeed tags appear. handles
/// valid cases such as:
///   - 45        (45 kph)
///   - 45 mph    (72.4203 kph)
///   - 45mph     (72.4203 kph)
///   - walk      (5 kph)
///
/// and documented tagging mistakes such as:
///   - 45;80     (takes the smaller of the two, so, 45 kph)
///
/// placeholder values such as `none`, `signals` or `national` have no speed
/// and return None. when `ignore_invalid_entries` is set, unparseable values
/// also return None instead of an error.
///
/// see https://wiki.openstreetmap.org/wiki/Key:maxspeed
pub fn deserialize_speed(
    s: &str,
    separator: Option<&str>,
    ignore_invalid_entries: bool,
) -> Result<Option<Velocity>, String> {
    let separated_entries = match separator {
        Some(sep) => s.split(sep).map(|e| e.trim()).collect_vec(),
        None => vec![s.trim()],
    };
    match separated_entries[..] {
        [] => Err(format!(
            "internal error: attempting to unpack empty maxspeed value '{s}'"
        )),
        [entry] => {
            match entry.split_whitespace().collect_vec()[..] {
                [] => Ok(None),
                // see https://wiki.openstreetmap.org/wiki/Key:maxspeed#Possible_tagging_mistakes
                // for list of some values we should ignore that are known.
                ["none"] | ["signals"] | ["unposted"] | ["unknown"] | ["default"]
                | ["variable"] | ["national"] => Ok(None),
                ["walk"] => Ok(Some(Velocity::new::<velocity::kilometer_per_hour>(
                    DEFAULT_WALK_SPEED_KPH,
                ))),
                [speed_str] => {
                    let (value_str, unit_str) = split_unit_suffix(speed_str);
                    parse_with_unit(value_str, unit_str, ignore_invalid_entries)
                }
                [speed_str, unit_str] => {
                    parse_with_unit(speed_str, Some(unit_str), ignore_invalid_entries)
                }
                _ if ignore_invalid_entries => Ok(None),
                _ => Err(format!("unexpected maxspeed entry '{s}'")),
            }
        }
        _ => {
            let maxspeeds = separated_entries
                .iter()
                .map(|e| deserialize_speed(e, None, ignore_invalid_entries))
                .collect::<Result<Vec<_>, _>>()?;
            let min = maxspeeds
                .into_iter()
                .min_by(|a, b| match (a, b) {
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(_), None) => Ordering::Less,
                    (Some(a), Some(b)) => a.partial_cmp(b).unwrap_or(Ordering::Greater),
                })
                .flatten();
            Ok(min)
        }
    }
}

/// splits a compact entry such as `25mph` into its number and unit.
fn split_unit_suffix(entry: &str) -> (&str, Option<&str>) {
    match entry.find(|c: char| c.is_ascii_alphabetic()) {
        Some(idx) if idx > 0 => (&entry[..idx], Some(&entry[idx..])),
        _ => (entry, None),
    }
}

fn parse_with_unit(
    speed_str: &str,
    unit_str: Option<&str>,
    ignore_invalid_entries: bool,
) -> Result<Option<Velocity>, String> {
    let speed = match speed_str.parse::<f64>() {
        Ok(speed) => speed,
        Err(e) if !ignore_invalid_entries => {
            return Err(format!("speed value {speed_str} not a valid number: {e}"));
        }
        Err(_) => return Ok(None),
    };
    if speed <= 0.0 || !speed.is_finite() {
        return Ok(None);
    }
    match unit_str {
        None | Some("kph") | Some("km/h") | Some("kmh") => {
            Ok(Some(Velocity::new::<velocity::kilometer_per_hour>(speed)))
        }
        Some("mph") => Ok(Some(Velocity::new::<velocity::mile_per_hour>(speed))),
        Some("knots") => Ok(Some(Velocity::new::<velocity::knot>(speed))),
        Some(unit) if !ignore_invalid_entries => {
            Err(format!("unknown speed unit {unit} with value {speed}"))
        }
        // some uncommon unit type, we can skip this entry.
        Some(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::deserialize_speed;
    use uom::si::velocity::{kilometer_per_hour, mile_per_hour};

    fn kph(s: &str) -> Option<f64> {
        match deserialize_speed(s, Some(";"), false) {
            Ok(v) => v.map(|v| v.get::<kilometer_per_hour>()),
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn plain_number_is_kph() {
        let result = kph("45").expect("should parse valid speed");
        assert!((45.0 - result).abs() < 0.001);
    }

    #[test]
    fn mph_with_and_without_space() {
        for raw in ["45 mph", "45mph"] {
            match deserialize_speed(raw, None, false) {
                Ok(Some(speed)) => {
                    assert!((speed.get::<mile_per_hour>() - 45.0).abs() < 0.001);
                }
                other => panic!("unexpected result {other:?} for '{raw}'"),
            }
        }
    }

    #[test]
    fn walk_is_default_walk_speed() {
        assert_eq!(kph("walk"), Some(super::DEFAULT_WALK_SPEED_KPH));
    }

    #[test]
    fn separated_takes_minimum() {
        let result = kph("3.1415 kph;3;2 mph").expect("should parse valid speed");
        assert!((result - 3.0).abs() < 0.001);
    }

    #[test]
    fn placeholders_have_no_speed() {
        assert_eq!(kph("national"), None);
        assert_eq!(kph("none"), None);
        assert_eq!(kph("0"), None);
    }

    #[test]
    fn invalid_entries() {
        assert!(deserialize_speed("fast", None, false).is_err());
        assert!(deserialize_speed("30 furlongs", None, false).is_err());
        assert_eq!(deserialize_speed("fast", None, true).ok(), Some(None));
        assert_eq!(deserialize_speed("30 furlongs", None, true).ok(), Some(None));
    }
}
