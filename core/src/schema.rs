//! The option table and name lookup.

use serde::Serialize;

use crate::types::{OptionAction, OptionSpec};

/// Ordered table of every option a program recognizes.
///
/// Lookup is first-match; duplicate names are reported by
/// [`validate_schema`](crate::validate_schema) rather than resolved here.
///
/// # Examples
///
/// ```
/// use option_schema_core::{OptionSchema, OptionSpec, ValueType};
///
/// let schema = OptionSchema::new()
///     .with_option(OptionSpec::grouping("--progress_ops"))
///     .with_option(OptionSpec::store_true(&["--no_progress"]).in_group("--progress_ops"))
///     .with_option(OptionSpec::value(&["--frame_rate", "-r"], ValueType::Float));
///
/// assert_eq!(schema.lookup("-r").unwrap().key(), "frame_rate");
/// assert!(schema.lookup("--frame-rate").is_some());
/// assert!(schema.lookup("--fps").is_none());
/// assert_eq!(schema.members_of("--progress_ops").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptionSchema {
    options: Vec<OptionSpec>,
}

impl OptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an option, builder style.
    pub fn with_option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }

    pub fn push(&mut self, spec: OptionSpec) {
        self.options.push(spec);
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Resolves a raw command-line token to its option.
    pub fn lookup(&self, token: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.matches(token))
    }

    /// Finds an option by its resolved-record key.
    pub fn option(&self, key: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|spec| spec.key() == key)
    }

    pub(crate) fn option_mut(&mut self, key: &str) -> Option<&mut OptionSpec> {
        self.options.iter_mut().find(|spec| spec.key() == key)
    }

    /// Every declared name, canonical and aliases, in table order.
    pub fn all_names(&self) -> Vec<&str> {
        self.options
            .iter()
            .flat_map(|spec| spec.names.iter().map(String::as_str))
            .collect()
    }

    /// Options placed under the given grouping option.
    pub fn members_of(&self, group: &str) -> Vec<&OptionSpec> {
        let Some(header) = self
            .lookup(group)
            .filter(|spec| spec.action == OptionAction::Grouping)
        else {
            return Vec::new();
        };
        self.options
            .iter()
            .filter(|spec| {
                spec.group
                    .as_deref()
                    .is_some_and(|g| header.matches(g))
            })
            .collect()
    }
}
