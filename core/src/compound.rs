//! Compound option values.
//!
//! A compound option packs several named fields into one token:
//!
//! ```text
//! --rectangle 0,end,10,20,20,30,#000
//! ```
//!
//! Items are assigned to the declared fields strictly by position. Fields
//! left out keep their placeholder default, and a field whose placeholder is
//! empty is required. `field=value` addressing is not supported; such an item
//! is taken as a positional literal.

use tracing::debug;

use crate::error::{ParserError, Result};
use crate::types::{CompoundValue, OptionSpec};

/// Parses one token's payload against the option's compound fields.
///
/// Stops at the first violation: an item beyond the last field, or a
/// required field left empty.
///
/// # Examples
///
/// ```
/// use option_schema_core::{OptionSpec, ValueType, parse_compound};
///
/// let spec = OptionSpec::list(&["--zoom"], ValueType::Str)
///     .with_fields(&[("start", ""), ("end", ""), ("zoom", ""), ("interpolate", "linear")]);
///
/// let value = parse_compound("0,30,1.5", &spec).unwrap();
/// assert_eq!(value.get("zoom"), Some("1.5"));
/// assert_eq!(value.get("interpolate"), Some("linear"));
/// ```
pub fn parse_compound(raw: &str, spec: &OptionSpec) -> Result<CompoundValue> {
    let fields = &spec.compound_fields;
    let mut values: Vec<&str> = fields.iter().map(|f| f.default.as_str()).collect();

    for (idx, item) in raw.split(',').enumerate() {
        let Some(slot) = values.get_mut(idx) else {
            return Err(ParserError::CompoundTooManyValues {
                option: spec.canonical_name().to_string(),
                item: item.to_string(),
            });
        };
        *slot = item;
    }

    if let Some(missing) = fields
        .iter()
        .zip(&values)
        .find(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
    {
        return Err(ParserError::CompoundMissingField {
            option: spec.canonical_name().to_string(),
            field: missing.name.clone(),
        });
    }

    let value = CompoundValue::from_pairs(
        fields
            .iter()
            .zip(values)
            .map(|(field, value)| (field.name.as_str(), value)),
    );
    debug!(option = spec.canonical_name(), %value, "parsed compound value");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueType;

    fn rectangle() -> OptionSpec {
        OptionSpec::list(&["--rectangle"], ValueType::Str).with_fields(&[
            ("start", ""),
            ("end", ""),
            ("x1", ""),
            ("y1", ""),
            ("x2", ""),
            ("y2", ""),
            ("color", ""),
        ])
    }

    #[test]
    fn test_positional_assignment_in_order() {
        let value = parse_compound("0,end,10,20,20,30,#000", &rectangle()).unwrap();
        let pairs: Vec<(&str, &str)> = value.iter().collect();
        assert_eq!(
            pairs,
            vec![
                ("start", "0"),
                ("end", "end"),
                ("x1", "10"),
                ("y1", "20"),
                ("x2", "20"),
                ("y2", "30"),
                ("color", "#000"),
            ]
        );
    }

    #[test]
    fn test_one_item_short_names_first_unfilled_field() {
        let err = parse_compound("0,end,10,20,20,30", &rectangle()).unwrap_err();
        assert!(matches!(
            err,
            ParserError::CompoundMissingField { ref field, .. } if field == "color"
        ));
    }

    #[test]
    fn test_too_many_items() {
        let err = parse_compound("0,end,10,20,20,30,#000,4", &rectangle()).unwrap_err();
        assert!(matches!(
            err,
            ParserError::CompoundTooManyValues { ref item, .. } if item == "4"
        ));
    }

    #[test]
    fn test_empty_item_does_not_fill_required_field() {
        let err = parse_compound("0,,10,20,20,30,#000", &rectangle()).unwrap_err();
        assert!(matches!(
            err,
            ParserError::CompoundMissingField { ref field, .. } if field == "end"
        ));
    }

    #[test]
    fn test_keyword_item_is_positional_literal() {
        let spec = OptionSpec::list(&["--cut"], ValueType::Str)
            .with_fields(&[("start", ""), ("end", "")]);
        let value = parse_compound("start=0,end=10", &spec).unwrap();
        assert_eq!(value.get("start"), Some("start=0"));
        assert_eq!(value.get("end"), Some("end=10"));
    }

    #[test]
    fn test_defaults_fill_trailing_fields() {
        let spec = OptionSpec::list(&["--rectangle"], ValueType::Str)
            .with_fields(&[("start", ""), ("color", "#000"), ("thickness", "0")]);
        let value = parse_compound("5", &spec).unwrap();
        assert_eq!(value.to_string(), "start=5,color=#000,thickness=0");
    }
}
