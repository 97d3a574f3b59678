use anyhow::{Context, Result};
use serde_json::{Map, Value as JsonValue};

use super::attributes::AttributeValue;
use super::container::ValueContainer;
use super::normalized::NormalizedContainer;
use super::series::Series;

/// Keys holding the numeric columns; every other key becomes an attribute.
const VALUE_KEYS: [&str; 3] = ["x", "y", "yerr"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse a JSON array of records into containers.
///
/// Expected shape (records-oriented):
///
/// ```json
/// [
///   { "x": [1, 2, 3], "y": [2, 4, 6], "yerr": 1, "name": "Cooldata" },
///   { "x": 0.5, "y": 3.0, "yerr": 0.1 }
/// ]
/// ```
///
/// Each of `x`, `y`, `yerr` may be a number or an array of numbers.
pub fn parse_records(text: &str) -> Result<Vec<ValueContainer>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| parse_record(rec).with_context(|| format!("Row {i}")))
        .collect()
}

/// Same as [`parse_records`], normalizing every container.
pub fn parse_normalized_records(text: &str) -> Result<Vec<NormalizedContainer>> {
    Ok(parse_records(text)?
        .into_iter()
        .map(NormalizedContainer::from_container)
        .collect())
}

/// Build one container from a single JSON object.
pub fn parse_record(record: &JsonValue) -> Result<ValueContainer> {
    let obj = record.as_object().context("record is not a JSON object")?;

    let x = json_to_series(obj, "x")?;
    let y = json_to_series(obj, "y")?;
    let yerr = json_to_series(obj, "yerr")?;

    let mut container = ValueContainer::new(x, y, yerr)?;
    for (key, val) in obj {
        if VALUE_KEYS.contains(&key.as_str()) {
            continue;
        }
        container.set_attribute(key.clone(), AttributeValue::from(val));
    }

    Ok(container)
}

fn json_to_series(obj: &Map<String, JsonValue>, col: &str) -> Result<Series> {
    let val = obj
        .get(col)
        .with_context(|| format!("missing '{col}'"))?;
    Series::try_from(val).map_err(|e| e.for_field(col).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::ContainerError;
    use serde_json::json;

    #[test]
    fn test_parse_records_with_attributes() {
        let text = r#"[
            { "x": [1, 2, 3], "y": [2, 4, 6], "yerr": [1, 1, 1], "name": "Cooldata", "run": 3 },
            { "x": 0.5, "y": 3.0, "yerr": 0.1 }
        ]"#;
        let containers = parse_records(text).unwrap();
        assert_eq!(containers.len(), 2);

        let first = &containers[0];
        assert_eq!(first.y().as_slice(), &[2.0, 4.0, 6.0]);
        assert_eq!(first.attribute("name"), Some(&AttributeValue::from("Cooldata")));
        assert_eq!(first.attribute("run"), Some(&AttributeValue::Integer(3)));
        assert_eq!(first.attributes().len(), 2);

        let second = &containers[1];
        assert_eq!(second.x().as_slice(), &[0.5]);
        assert!(second.attributes().is_empty());
    }

    #[test]
    fn test_parse_normalized_records() {
        let text = r#"[{ "x": [1, 2], "y": [2, 6], "yerr": [1, 2] }]"#;
        let norm = parse_normalized_records(text).unwrap();
        assert_eq!(norm[0].y().as_slice(), &[0.5, 1.5]);
        assert_eq!(norm[0].y_orig().as_slice(), &[2.0, 6.0]);
    }

    #[test]
    fn test_row_context_on_error() {
        let text = r#"[
            { "x": 1, "y": 1, "yerr": 1 },
            { "x": [1, 2], "y": [1, "b"], "yerr": [1, 1] }
        ]"#;
        let err = parse_records(text).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.starts_with("Row 1"), "{chain}");
        assert!(chain.contains("'y'"), "{chain}");

        let typed = err.downcast_ref::<ContainerError>().unwrap();
        assert!(matches!(typed, ContainerError::Coercion { field, .. } if field == "y"));
    }

    #[test]
    fn test_length_mismatch_surfaces() {
        let err = parse_record(&json!({ "x": [1, 2], "y": [1], "yerr": [1, 1] })).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ContainerError>(),
            Some(&ContainerError::LengthMismatch { x: 2, y: 1, yerr: 2 })
        );
    }

    #[test]
    fn test_missing_column_and_bad_root() {
        let err = parse_record(&json!({ "x": 1, "y": 1 })).unwrap_err();
        assert!(err.to_string().contains("missing 'yerr'"));

        assert!(parse_records(r#"{"x": 1}"#).is_err());
        assert!(parse_records("not json").is_err());
        assert!(parse_record(&json!([1, 2])).is_err());
    }
}
