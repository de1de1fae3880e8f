//! Option schema type definitions.
//!
//! This module defines the data model behind the option table: what a single
//! option looks like ([`OptionSpec`]), how it consumes tokens ([`Arity`],
//! [`OptionAction`]), what it resolves to ([`ValueType`], [`Value`]) and the
//! structured payload of compound options ([`CompoundValue`]).

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Tokens that request help, either for the program or for the option right
/// before them.
pub const HELP_MARKERS: [&str; 2] = ["--help", "-h"];

/// Tokens that print the program version when they are the only argument.
pub const VERSION_MARKERS: [&str; 2] = ["-v", "-V"];

/// Returns `true` if `token` is one of the [`HELP_MARKERS`].
pub fn is_help_marker(token: &str) -> bool {
    HELP_MARKERS.contains(&token)
}

/// Declared type of an option's value.
///
/// Drives coercion of raw tokens into [`Value`]s.
///
/// # Examples
///
/// ```
/// use option_schema_core::{Value, ValueType};
///
/// assert_eq!(ValueType::Int.parse("12"), Some(Value::Int(12)));
/// assert_eq!(ValueType::Float.parse("0.5"), Some(Value::Float(0.5)));
/// assert_eq!(ValueType::Int.parse("twelve"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValueType {
    /// Free-form text (the default).
    #[default]
    Str,
    /// Signed integer.
    Int,
    /// Floating point number.
    Float,
    /// Boolean.
    Flag,
}

impl ValueType {
    /// Short type name used in help output and diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::Str => "str",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Flag => "flag",
        }
    }

    /// Coerces a raw token into a value of this type.
    ///
    /// Returns `None` when the literal is not valid for the type.
    pub fn parse(self, raw: &str) -> Option<Value> {
        match self {
            ValueType::Str => Some(Value::Str(raw.to_string())),
            ValueType::Int => raw.trim().parse::<i64>().ok().map(Value::Int),
            ValueType::Float => raw.trim().parse::<f64>().ok().map(Value::Float),
            ValueType::Flag => parse_flag(raw).map(Value::Flag),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// How many tokens an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Arity {
    /// Exactly one value token follows the option.
    #[default]
    Single,
    /// Every following token up to the next recognized option.
    List,
}

/// What resolving an option does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OptionAction {
    /// Store the value given on the command line (the default).
    #[default]
    SetDefault,
    /// Store `true` without consuming a value.
    StoreTrue,
    /// Store `false` without consuming a value.
    StoreFalse,
    /// Help-organization header; holds no user value.
    Grouping,
}

/// One named field of a compound option, with its placeholder default.
///
/// An empty default marks the field as required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundField {
    pub name: String,
    pub default: String,
}

impl CompoundField {
    pub fn new(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            default: default.to_string(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_empty()
    }
}

/// Field name to literal mapping parsed out of a single token.
///
/// Fields keep the order in which the owning option declares them.
///
/// # Examples
///
/// ```
/// use option_schema_core::CompoundValue;
///
/// let value = CompoundValue::from_pairs([("start", "0"), ("end", "end")]);
/// assert_eq!(value.get("end"), Some("end"));
/// assert_eq!(value.to_string(), "start=0,end=end");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundValue {
    fields: Vec<(String, String)>,
}

impl CompoundValue {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Looks up a field by name.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for CompoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (name, value)) in self.fields.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl Serialize for CompoundValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A resolved option value.
///
/// Serializes untagged, so a resolved record turns into plain JSON.
///
/// # Examples
///
/// ```
/// use option_schema_core::Value;
///
/// assert_eq!(Value::from(3).to_string(), "3");
/// assert_eq!(Value::from("auto").as_str(), Some("auto"));
/// assert_eq!(Value::Null.to_string(), "None");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Flag(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Compound(CompoundValue),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&CompoundValue> {
        match self {
            Value::Compound(c) => Some(c),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Flag(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Compound(c) => write!(f, "{{{c}}}"),
        }
    }
}

/// Whole floats keep their decimal point: `1.0`, not `1`.
pub(crate) fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_finite() && x.fract() == 0.0 {
        write!(f, "{x:?}")
    } else {
        write!(f, "{x}")
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Flag(b)
    }
}

/// Schema entry for one command-line option.
///
/// Use one of the constructors ([`value`](OptionSpec::value),
/// [`store_true`](OptionSpec::store_true),
/// [`store_false`](OptionSpec::store_false), [`list`](OptionSpec::list),
/// [`grouping`](OptionSpec::grouping)) and chain the `with_*` builders.
///
/// # Examples
///
/// ```
/// use option_schema_core::{OptionSpec, Value, ValueType};
///
/// let margin = OptionSpec::value(&["--frame_margin", "--margin", "-m"], ValueType::Int)
///     .with_default(6)
///     .with_range("0 to Infinity")
///     .with_help("how many frames to keep around loud sections");
///
/// assert_eq!(margin.canonical_name(), "--frame_margin");
/// assert_eq!(margin.key(), "frame_margin");
/// assert_eq!(margin.default, Value::Int(6));
/// assert!(margin.matches("--frame-margin"));
/// assert!(margin.matches("-m"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionSpec {
    /// Aliases; the first one is canonical.
    pub names: Vec<String>,
    pub arity: Arity,
    pub value_type: ValueType,
    /// Value the option resolves to when it is not given.
    pub default: Value,
    pub action: OptionAction,
    /// Advisory range text shown in help (not enforced).
    pub range: Option<String>,
    /// Closed set of accepted values.
    pub choices: Option<Vec<String>>,
    /// Canonical name of the grouping option this option belongs to.
    pub group: Option<String>,
    pub help: String,
    /// Fields of a compound value, in positional order.
    pub compound_fields: Vec<CompoundField>,
    /// Left out of the program help listing.
    pub hidden: bool,
    /// Long-form appendix for the per-option help.
    pub extra_help: String,
}

impl OptionSpec {
    fn base(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            arity: Arity::Single,
            value_type: ValueType::Str,
            default: Value::Null,
            action: OptionAction::SetDefault,
            range: None,
            choices: None,
            group: None,
            help: String::new(),
            compound_fields: Vec::new(),
            hidden: false,
            extra_help: String::new(),
        }
    }

    /// Creates an option that takes exactly one value.
    pub fn value(names: &[&str], value_type: ValueType) -> Self {
        Self {
            value_type,
            ..Self::base(names)
        }
    }

    /// Creates an option collecting every following token up to the next
    /// recognized option.
    ///
    /// ```
    /// use option_schema_core::{Arity, OptionSpec, Value, ValueType};
    ///
    /// let cut = OptionSpec::list(&["--cut_out"], ValueType::Str);
    /// assert_eq!(cut.arity, Arity::List);
    /// assert_eq!(cut.default, Value::List(Vec::new()));
    /// ```
    pub fn list(names: &[&str], value_type: ValueType) -> Self {
        Self {
            arity: Arity::List,
            value_type,
            default: Value::List(Vec::new()),
            ..Self::base(names)
        }
    }

    /// Creates a flag that resolves to `true` when given.
    pub fn store_true(names: &[&str]) -> Self {
        Self {
            value_type: ValueType::Flag,
            default: Value::Flag(false),
            action: OptionAction::StoreTrue,
            ..Self::base(names)
        }
    }

    /// Creates a flag that resolves to `false` when given.
    pub fn store_false(names: &[&str]) -> Self {
        Self {
            value_type: ValueType::Flag,
            default: Value::Flag(true),
            action: OptionAction::StoreFalse,
            ..Self::base(names)
        }
    }

    /// Creates a grouping header.
    pub fn grouping(name: &str) -> Self {
        Self {
            value_type: ValueType::Flag,
            default: Value::Flag(false),
            action: OptionAction::Grouping,
            ..Self::base(&[name])
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    pub fn with_range(mut self, range: &str) -> Self {
        self.range = Some(range.to_string());
        self
    }

    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.choices = Some(choices.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Places the option under a grouping header.
    pub fn in_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    /// Declares compound fields as `(name, placeholder)` pairs.
    pub fn with_fields(mut self, fields: &[(&str, &str)]) -> Self {
        self.compound_fields = fields
            .iter()
            .map(|(name, default)| CompoundField::new(name, default))
            .collect();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_extra_help(mut self, extra: &str) -> Self {
        self.extra_help = extra.to_string();
        self
    }

    /// Returns the canonical (first) name.
    pub fn canonical_name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("unknown")
    }

    /// Returns the key the option resolves under.
    ///
    /// Leading dashes are stripped and the remaining `-` become `_`.
    pub fn key(&self) -> String {
        canonical_key(self.canonical_name())
    }

    /// Checks whether `token` names this option, treating `_` and `-` alike.
    pub fn matches(&self, token: &str) -> bool {
        let token = normalize_name(token);
        self.names.iter().any(|name| normalize_name(name) == token)
    }

    pub fn is_flag(&self) -> bool {
        matches!(
            self.action,
            OptionAction::StoreTrue | OptionAction::StoreFalse
        )
    }

    pub fn is_compound(&self) -> bool {
        !self.compound_fields.is_empty()
    }
}

/// Folds `_` into `-` so both spellings of a name compare equal.
pub fn normalize_name(name: &str) -> String {
    name.replace('_', "-")
}

/// Turns an option name or config key into its resolved-record key.
///
/// ```
/// use option_schema_core::canonical_key;
///
/// assert_eq!(canonical_key("--frame-margin"), "frame_margin");
/// assert_eq!(canonical_key("video_speed"), "video_speed");
/// ```
pub fn canonical_key(name: &str) -> String {
    name.trim_start_matches('-').replace('-', "_")
}
