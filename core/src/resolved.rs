//! The typed record produced by a successful parse.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::OptionSchema;
use crate::types::Value;

/// Fully resolved options for one invocation.
///
/// Holds exactly one value per declared option (explicit, config overlay or
/// schema default), the positional inputs, and which options the user set
/// explicitly. Read-only once the scan hands it over.
///
/// # Examples
///
/// ```
/// use option_schema_core::*;
///
/// let schema = OptionSchema::new()
///     .with_option(OptionSpec::value(&["--frame_margin"], ValueType::Int).with_default(6))
///     .with_option(OptionSpec::store_true(&["--quiet"]));
/// let ctx = ParserContext::new("clipcut", "1.0.0", schema).unwrap();
///
/// let Outcome::Resolved(options) = ctx.parse(&["clip.mp4", "--quiet"]).unwrap() else {
///     panic!("expected resolved options");
/// };
/// assert_eq!(options.inputs(), ["clip.mp4"]);
/// assert_eq!(options.int("frame_margin"), Some(6));
/// assert!(options.flag("quiet"));
/// assert!(options.is_touched("quiet"));
/// assert!(!options.is_touched("frame_margin"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOptions {
    inputs: Vec<String>,
    values: BTreeMap<String, Value>,
    touched: Vec<String>,
    active_group: Option<String>,
}

impl ResolvedOptions {
    /// Seeds every declared key with its (possibly overlaid) default.
    pub(crate) fn from_defaults(schema: &OptionSchema) -> Self {
        Self {
            inputs: Vec::new(),
            values: schema
                .options()
                .iter()
                .map(|spec| (spec.key(), spec.default.clone()))
                .collect(),
            touched: Vec::new(),
            active_group: None,
        }
    }

    pub(crate) fn set(&mut self, key: String, value: Value) {
        self.values.insert(key, value);
    }

    pub(crate) fn touch(&mut self, key: String) {
        if !self.touched.contains(&key) {
            self.touched.push(key);
        }
    }

    pub(crate) fn push_input(&mut self, input: &str) {
        self.inputs.push(input.to_string());
    }

    pub(crate) fn set_active_group(&mut self, group: String) {
        self.active_group = Some(group);
    }

    /// Positional inputs given before the first option.
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_float)
    }

    /// `false` for unknown keys and non-flag values.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_flag).unwrap_or(false)
    }

    /// Empty for unknown keys and non-list values.
    pub fn list(&self, key: &str) -> &[Value] {
        self.get(key).and_then(Value::as_list).unwrap_or(&[])
    }

    /// Keys the user set explicitly, in command-line order.
    pub fn touched(&self) -> &[String] {
        &self.touched
    }

    pub fn is_touched(&self, key: &str) -> bool {
        self.touched.iter().any(|k| k == key)
    }

    /// Canonical name of the last grouping option given.
    pub fn active_group(&self) -> Option<&str> {
        self.active_group.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
