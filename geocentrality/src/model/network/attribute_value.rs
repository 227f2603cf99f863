use itertools::Itertools;
use serde::{de, Deserialize, Serialize, Serializer};
use std::fmt::Display;

/// an edge attribute cell that may hold either a single value or a collection
/// of values.
///
/// street network sources tag merged or simplified segments with every value
/// of the subsumed ways, so a column such as `highway` or `osmid` can be
/// scalar on one row and list-valued on the next. cells are normalized into
/// this type when read so that downstream tables only ever see one scalar
/// display form per cell (see [`AttributeValue::to_scalar_string`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    Scalar(String),
    List(Vec<String>),
}

impl AttributeValue {
    /// delimiter used for list-valued cells in CSV sources.
    pub const VALUE_DELIMITER: &'static str = ";";

    /// the first value of the cell. for a list this is the value that
    /// classification lookups (such as highway speeds) act upon.
    pub fn first(&self) -> Option<&str> {
        match self {
            AttributeValue::Scalar(s) => Some(s.as_str()),
            AttributeValue::List(vs) => vs.first().map(|s| s.as_str()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, AttributeValue::List(_))
    }

    /// flat display form of this cell. lists are rendered as `[a, b]`.
    pub fn to_scalar_string(&self) -> String {
        match self {
            AttributeValue::Scalar(s) => s.clone(),
            AttributeValue::List(vs) => format!("[{}]", vs.iter().join(", ")),
        }
    }

    /// parses a raw cell. accepts bracketed lists (`[1, 2]`, `['a', 'b']`)
    /// and delimited lists (`1;2`). returns None for empty cells.
    pub fn parse(raw: &str) -> Option<AttributeValue> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let entries = if trimmed.starts_with('[') && trimmed.ends_with(']') {
            trimmed[1..trimmed.len() - 1].split(',').collect_vec()
        } else {
            trimmed.split(Self::VALUE_DELIMITER).collect_vec()
        };
        let values = entries
            .into_iter()
            .map(|v| v.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
            .filter(|v| !v.is_empty())
            .collect_vec();
        match &values[..] {
            [] => None,
            [single] => Some(AttributeValue::Scalar(single.clone())),
            _ => Some(AttributeValue::List(values)),
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_scalar_string())
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Scalar(String::from(value))
    }
}

impl Serialize for AttributeValue {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.to_scalar_string())
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        AttributeValue::parse(&raw)
            .ok_or_else(|| de::Error::custom("attribute value cannot be empty"))
    }
}

/// deserializes an optional attribute cell, treating empty strings as None.
pub fn deserialize_optional_attribute<'de, D>(d: D) -> Result<Option<AttributeValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(d)?;
    Ok(raw.and_then(|r| AttributeValue::parse(&r)))
}

#[cfg(test)]
mod tests {
    use super::AttributeValue;

    #[test]
    fn parse_scalar() {
        assert_eq!(
            AttributeValue::parse(" residential "),
            Some(AttributeValue::Scalar(String::from("residential")))
        );
    }

    #[test]
    fn parse_bracketed_list() {
        let v = AttributeValue::parse("['primary', 'secondary']").expect("should parse");
        assert_eq!(
            v,
            AttributeValue::List(vec![String::from("primary"), String::from("secondary")])
        );
        assert_eq!(v.first(), Some("primary"));
    }

    #[test]
    fn parse_delimited_list() {
        let v = AttributeValue::parse("123;456").expect("should parse");
        assert!(v.is_list());
        assert_eq!(v.to_scalar_string(), "[123, 456]");
    }

    #[test]
    fn single_element_list_is_scalar() {
        assert_eq!(
            AttributeValue::parse("[42]"),
            Some(AttributeValue::Scalar(String::from("42")))
        );
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(AttributeValue::parse(""), None);
        assert_eq!(AttributeValue::parse("[]"), None);
        assert_eq!(AttributeValue::parse(" ; "), None);
    }

    #[test]
    fn serializes_as_flat_string() {
        let v = AttributeValue::List(vec![String::from("1"), String::from("2")]);
        let json = serde_json::to_string(&v).expect("serialize");
        assert_eq!(json, "\"[1, 2]\"");
        let back: AttributeValue = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, v);
    }
}
