//! Option table validation.
//!
//! Checks the structural invariants of an [`OptionSchema`] before it is used
//! for parsing: well-formed and unique names, no collisions with the built-in
//! help and version markers, and metadata that fits the option's kind.
//!
//! # Examples
//!
//! ```
//! use option_schema_core::*;
//!
//! let schema = OptionSchema::new()
//!     .with_option(OptionSpec::store_true(&["--quiet", "-q"]));
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: the same name declared twice
//! let bad = OptionSchema::new()
//!     .with_option(OptionSpec::store_true(&["--quiet", "-q"]))
//!     .with_option(OptionSpec::store_true(&["-q"]));
//! assert_eq!(validate_schema(&bad), vec![SchemaError::DuplicateName("-q".into())]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{
    Arity, HELP_MARKERS, OptionAction, OptionSpec, VERSION_MARKERS, normalize_name,
};
use crate::OptionSchema;

/// Option table validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An option declares no names at all.
    #[error("option must declare at least one name")]
    MissingName,
    /// A name does not start with `-`, or is nothing but dashes.
    #[error("invalid option name: {0}")]
    InvalidName(String),
    /// Two names collide, counting `_` and `-` as the same character.
    #[error("duplicate option name: {0}")]
    DuplicateName(String),
    /// Two options resolve to the same record key.
    #[error("duplicate option key: {0}")]
    DuplicateKey(String),
    /// A name shadows a built-in help or version marker.
    #[error("option name is reserved: {0}")]
    ReservedName(String),
    /// `choices` declared on an option that never takes a single value.
    #[error("choices are only allowed on single-value options: {0}")]
    ChoicesNotAllowed(String),
    /// Compound fields declared on a flag or grouping option.
    #[error("compound fields are not allowed on {0}")]
    FieldsNotAllowed(String),
    /// `group` does not refer to a declared grouping option.
    #[error("option {option} refers to unknown group {group}")]
    UnknownGroup { option: String, group: String },
}

/// Validates an option table.
///
/// Stops at the first problem found.
pub fn validate_schema(schema: &OptionSchema) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut seen_names = HashSet::new();
    let mut seen_keys = HashSet::new();

    for spec in schema.options() {
        errors.extend(validate_names(spec, &mut seen_names));
        if !errors.is_empty() {
            return errors;
        }

        let key = spec.key();
        if !seen_keys.insert(key.clone()) {
            errors.push(SchemaError::DuplicateKey(key));
            return errors;
        }

        errors.extend(validate_metadata(spec));
        if !errors.is_empty() {
            return errors;
        }
    }

    for spec in schema.options() {
        if let Some(group) = &spec.group {
            let is_header = schema
                .lookup(group)
                .is_some_and(|header| header.action == OptionAction::Grouping);
            if !is_header {
                errors.push(SchemaError::UnknownGroup {
                    option: spec.canonical_name().to_string(),
                    group: group.clone(),
                });
                return errors;
            }
        }
    }

    errors
}

fn validate_names(spec: &OptionSpec, seen: &mut HashSet<String>) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    if spec.names.is_empty() {
        errors.push(SchemaError::MissingName);
        return errors;
    }

    for name in &spec.names {
        if !name.starts_with('-') || name.trim_start_matches('-').is_empty() {
            errors.push(SchemaError::InvalidName(name.clone()));
            return errors;
        }
        if HELP_MARKERS.contains(&name.as_str()) || VERSION_MARKERS.contains(&name.as_str()) {
            errors.push(SchemaError::ReservedName(name.clone()));
            return errors;
        }
        if !seen.insert(normalize_name(name)) {
            errors.push(SchemaError::DuplicateName(name.clone()));
            return errors;
        }
    }

    errors
}

fn validate_metadata(spec: &OptionSpec) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let name = spec.canonical_name().to_string();

    let single_value = spec.action == OptionAction::SetDefault && spec.arity == Arity::Single;
    if spec.choices.is_some() && !single_value {
        errors.push(SchemaError::ChoicesNotAllowed(name));
        return errors;
    }

    if spec.is_compound() && spec.action != OptionAction::SetDefault {
        errors.push(SchemaError::FieldsNotAllowed(name));
        return errors;
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueType;

    #[test]
    fn test_accepts_valid_schema() {
        let schema = OptionSchema::new()
            .with_option(OptionSpec::grouping("--progress_ops"))
            .with_option(OptionSpec::store_true(&["--no_progress"]).in_group("--progress_ops"))
            .with_option(
                OptionSpec::value(&["--preset"], ValueType::Str).with_choices(&["fast", "slow"]),
            );
        assert!(validate_schema(&schema).is_empty());
    }

    #[test]
    fn test_rejects_duplicate_after_normalization() {
        let schema = OptionSchema::new()
            .with_option(OptionSpec::value(&["--frame_margin"], ValueType::Int))
            .with_option(OptionSpec::value(&["--frame-margin"], ValueType::Int));
        assert_eq!(
            validate_schema(&schema),
            vec![SchemaError::DuplicateName("--frame-margin".to_string())]
        );
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let schema = OptionSchema::new()
            .with_option(OptionSpec::store_true(&["--fps"]))
            .with_option(OptionSpec::store_true(&["-fps"]));
        assert_eq!(
            validate_schema(&schema),
            vec![SchemaError::DuplicateKey("fps".to_string())]
        );
    }

    #[test]
    fn test_rejects_reserved_and_malformed_names() {
        let reserved =
            OptionSchema::new().with_option(OptionSpec::store_true(&["--help"]));
        assert_eq!(
            validate_schema(&reserved),
            vec![SchemaError::ReservedName("--help".to_string())]
        );

        let bare = OptionSchema::new().with_option(OptionSpec::store_true(&["quiet"]));
        assert_eq!(
            validate_schema(&bare),
            vec![SchemaError::InvalidName("quiet".to_string())]
        );

        let empty = OptionSchema::new().with_option(OptionSpec::store_true(&[]));
        assert_eq!(validate_schema(&empty), vec![SchemaError::MissingName]);
    }

    #[test]
    fn test_rejects_choices_on_list() {
        let schema = OptionSchema::new().with_option(
            OptionSpec::list(&["--tracks"], ValueType::Int).with_choices(&["1", "2"]),
        );
        assert_eq!(
            validate_schema(&schema),
            vec![SchemaError::ChoicesNotAllowed("--tracks".to_string())]
        );
    }

    #[test]
    fn test_rejects_fields_on_flag() {
        let schema = OptionSchema::new()
            .with_option(OptionSpec::store_true(&["--draw"]).with_fields(&[("x", "")]));
        assert_eq!(
            validate_schema(&schema),
            vec![SchemaError::FieldsNotAllowed("--draw".to_string())]
        );
    }

    #[test]
    fn test_rejects_unknown_group() {
        let schema = OptionSchema::new()
            .with_option(OptionSpec::value(&["--zoom"], ValueType::Str).in_group("--motion"));
        assert_eq!(
            validate_schema(&schema),
            vec![SchemaError::UnknownGroup {
                option: "--zoom".to_string(),
                group: "--motion".to_string(),
            }]
        );
    }
}
