//! Config-file overrides for option defaults.
//!
//! The overlay file is line oriented. Each meaningful line assigns a value to
//! one option under a root namespace:
//!
//! ```text
//! # defaults for clipcut
//! clipcut.frame_margin = 4        # keep a little more context
//! clipcut.video_codec = 'libx264'
//! clipcut.silent_threshold = 0.02
//! clipcut.temp_dir = None
//! other-tool.frame_margin = 9     # ignored: different root
//! ```
//!
//! Values are a quoted string, the `None`/`null` sentinel, a float (a decimal
//! point is present) or an integer. The key is the trailing dot-segment of
//! the left side.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::compound::parse_compound;
use crate::error::{ParserError, Result};
use crate::scanner::check_choice;
use crate::types::{
    Arity, OptionAction, OptionSpec, Value, ValueType, canonical_key, parse_flag,
    write_float,
};

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<path>[A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)+)\s*=\s*(?P<value>.*)$")
        .expect("static regex must compile")
});

/// A typed literal read from the overlay file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConfigValue {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => f.write_str("None"),
            ConfigValue::Int(n) => write!(f, "{n}"),
            ConfigValue::Float(x) => write_float(f, *x),
            ConfigValue::Str(s) => f.write_str(s),
        }
    }
}

/// Overrides that apply to one root namespace, in file order.
///
/// # Examples
///
/// ```
/// use option_schema_core::{ConfigValue, parse_overlay};
///
/// let text = "myprog.quality = 5\nother.quality = 9\n";
/// let overlay = parse_overlay(text.as_bytes(), "myprog").unwrap();
/// assert_eq!(overlay.get("quality"), Some(&ConfigValue::Int(5)));
/// assert_eq!(overlay.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverlay {
    entries: Vec<(String, ConfigValue)>,
}

impl ConfigOverlay {
    /// Latest value set for `key`.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loads the overlay at `path` for the given root namespace.
///
/// A missing file is an empty overlay.
///
/// # Errors
///
/// Returns [`Io`](ParserError::Io) if the file exists but cannot be read, or
/// [`ConfigParseError`](ParserError::ConfigParseError) for a malformed line.
pub fn load_overlay(path: impl AsRef<Path>, root: &str) -> Result<ConfigOverlay> {
    let file = match File::open(path.as_ref()) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(ConfigOverlay::default()),
        Err(err) => return Err(err.into()),
    };
    parse_overlay(BufReader::new(file), root)
}

/// Parses overlay lines from any buffered reader.
pub fn parse_overlay<R: BufRead>(reader: R, root: &str) -> Result<ConfigOverlay> {
    let prefix = format!("{root}.");
    let mut overlay = ConfigOverlay::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let content = strip_comment(&line).trim();
        if content.is_empty() || !content.starts_with(&prefix) {
            continue;
        }

        let caps = ASSIGNMENT
            .captures(content)
            .ok_or_else(|| ParserError::ConfigParseError {
                line: line_no,
                text: content.to_string(),
            })?;
        let path = &caps["path"];
        let key = path.rsplit('.').next().unwrap_or(path);
        let value = parse_value(caps["value"].trim(), line_no)?;

        overlay.entries.push((canonical_key(key), value));
    }

    Ok(overlay)
}

/// Cuts a trailing `#` comment, leaving `#` inside quotes alone.
fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    for (idx, ch) in line.char_indices() {
        match (quote, ch) {
            (None, '#') => return &line[..idx],
            (None, '\'' | '"') => quote = Some(ch),
            (Some(open), _) if open == ch => quote = None,
            _ => {}
        }
    }
    line
}

fn parse_value(raw: &str, line: usize) -> Result<ConfigValue> {
    let malformed = || ParserError::ConfigParseError {
        line,
        text: raw.to_string(),
    };

    if raw.len() >= 2
        && ((raw.starts_with('\'') && raw.ends_with('\''))
            || (raw.starts_with('"') && raw.ends_with('"')))
    {
        return Ok(ConfigValue::Str(raw[1..raw.len() - 1].to_string()));
    }

    match raw {
        "None" | "null" => Ok(ConfigValue::Null),
        _ if raw.contains('.') => raw.parse().map(ConfigValue::Float).map_err(|_| malformed()),
        _ => raw.parse().map(ConfigValue::Int).map_err(|_| malformed()),
    }
}

/// Converts an override into a default for `spec`.
///
/// Overrides pass the same checks as command-line values: strings for
/// compound options go through [`parse_compound`] and any value must be one
/// of the option's choices. An error means the override is skipped.
pub(crate) fn overlay_value(spec: &OptionSpec, value: &ConfigValue) -> Result<Value> {
    let mismatch = || ParserError::InvalidValue {
        option: spec.canonical_name().to_string(),
        value: value.to_string(),
        expected: spec.value_type,
    };
    if spec.action == OptionAction::Grouping {
        return Err(mismatch());
    }

    let scalar = match (spec.value_type, value) {
        (_, ConfigValue::Null) => Value::Null,
        _ if spec.is_compound() => Value::Compound(parse_compound(&value.to_string(), spec)?),
        (ValueType::Str, ConfigValue::Str(s)) => Value::Str(s.clone()),
        (ValueType::Str, ConfigValue::Int(n)) => Value::Str(n.to_string()),
        (ValueType::Str, ConfigValue::Float(_)) => Value::Str(value.to_string()),
        (ValueType::Int, ConfigValue::Int(n)) => Value::Int(*n),
        (ValueType::Float, ConfigValue::Float(x)) => Value::Float(*x),
        (ValueType::Float, ConfigValue::Int(n)) => Value::Float(*n as f64),
        (ValueType::Flag, ConfigValue::Int(0)) => Value::Flag(false),
        (ValueType::Flag, ConfigValue::Int(1)) => Value::Flag(true),
        (ValueType::Flag, ConfigValue::Str(s)) => Value::Flag(parse_flag(s).ok_or_else(mismatch)?),
        _ => return Err(mismatch()),
    };

    if !scalar.is_null() {
        check_choice(spec, &value.to_string(), &scalar)?;
    }

    Ok(match (spec.arity, scalar) {
        (Arity::List, Value::Null) => Value::List(Vec::new()),
        (Arity::List, scalar) => Value::List(vec![scalar]),
        (Arity::Single, scalar) => scalar,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(text: &str) -> Result<ConfigOverlay> {
        parse_overlay(text.as_bytes(), "myprog")
    }

    #[test]
    fn test_value_forms() {
        let overlay = parse(
            "myprog.quality = 5\n\
             myprog.threshold = 0.25\n\
             myprog.codec = 'libx264'\n\
             myprog.title = \"two words\"\n\
             myprog.temp_dir = None\n",
        )
        .unwrap();

        assert_eq!(overlay.get("quality"), Some(&ConfigValue::Int(5)));
        assert_eq!(overlay.get("threshold"), Some(&ConfigValue::Float(0.25)));
        assert_eq!(overlay.get("codec"), Some(&ConfigValue::Str("libx264".into())));
        assert_eq!(overlay.get("title"), Some(&ConfigValue::Str("two words".into())));
        assert_eq!(overlay.get("temp_dir"), Some(&ConfigValue::Null));
    }

    #[test]
    fn test_other_roots_comments_and_blanks_are_ignored() {
        let overlay = parse(
            "# header comment\n\
             \n\
             other.quality = 9\n\
             myprogram.quality = 7\n\
             myprog.quality = 5 # trailing\n",
        )
        .unwrap();

        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.get("quality"), Some(&ConfigValue::Int(5)));
    }

    #[test]
    fn test_hash_inside_quotes_is_kept() {
        let overlay = parse("myprog.color = '#000' # black\n").unwrap();
        assert_eq!(overlay.get("color"), Some(&ConfigValue::Str("#000".into())));
    }

    #[test]
    fn test_key_is_trailing_segment_in_canonical_form() {
        let overlay = parse("myprog.render.frame-margin = 3\n").unwrap();
        assert_eq!(overlay.get("frame_margin"), Some(&ConfigValue::Int(3)));
    }

    #[test]
    fn test_later_lines_win() {
        let overlay = parse("myprog.quality = 5\nmyprog.quality = 6\n").unwrap();
        assert_eq!(overlay.get("quality"), Some(&ConfigValue::Int(6)));
    }

    #[test]
    fn test_malformed_numbers_fail() {
        let err = parse("myprog.quality = 5x\n").unwrap_err();
        assert!(matches!(err, ParserError::ConfigParseError { line: 1, .. }));

        let err = parse("\nmyprog.threshold = 0.2.5\n").unwrap_err();
        assert!(matches!(err, ParserError::ConfigParseError { line: 2, .. }));
    }

    #[test]
    fn test_line_without_assignment_fails() {
        let err = parse("myprog.quality\n").unwrap_err();
        assert!(matches!(err, ParserError::ConfigParseError { line: 1, .. }));
    }

    #[test]
    fn test_missing_file_is_empty_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let overlay = load_overlay(dir.path().join("config.txt"), "myprog").unwrap();
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "myprog.quality = 5").unwrap();
        writeln!(file, "elsewhere.quality = 1").unwrap();

        let overlay = load_overlay(file.path(), "myprog").unwrap();
        assert_eq!(overlay.get("quality"), Some(&ConfigValue::Int(5)));
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn test_overlay_value_promotes_and_rejects() {
        let rate = OptionSpec::value(&["--frame_rate"], ValueType::Float);
        assert_eq!(overlay_value(&rate, &ConfigValue::Int(30)).unwrap(), Value::Float(30.0));

        let margin = OptionSpec::value(&["--frame_margin"], ValueType::Int);
        assert!(matches!(
            overlay_value(&margin, &ConfigValue::Str("six".into())),
            Err(ParserError::InvalidValue { .. })
        ));
        assert_eq!(overlay_value(&margin, &ConfigValue::Null).unwrap(), Value::Null);

        let quiet = OptionSpec::store_true(&["--quiet"]);
        assert_eq!(overlay_value(&quiet, &ConfigValue::Int(1)).unwrap(), Value::Flag(true));

        let group = OptionSpec::grouping("--motion_ops");
        assert!(overlay_value(&group, &ConfigValue::Int(1)).is_err());
    }

    #[test]
    fn test_overlay_value_checks_choices() {
        let preset = OptionSpec::value(&["--preset"], ValueType::Str)
            .with_choices(&["fast", "medium", "slow"]);
        assert_eq!(
            overlay_value(&preset, &ConfigValue::Str("slow".into())).unwrap(),
            Value::from("slow")
        );
        assert!(matches!(
            overlay_value(&preset, &ConfigValue::Str("turbo".into())),
            Err(ParserError::InvalidChoice { ref value, .. }) if value == "turbo"
        ));

        let speed = OptionSpec::value(&["--speed"], ValueType::Float).with_choices(&["1.0", "2.5"]);
        assert_eq!(overlay_value(&speed, &ConfigValue::Int(1)).unwrap(), Value::Float(1.0));
    }

    #[test]
    fn test_overlay_value_parses_compound_lists() {
        let cuts = OptionSpec::list(&["--cut_out"], ValueType::Str)
            .with_fields(&[("start", ""), ("end", "")]);

        let value = overlay_value(&cuts, &ConfigValue::Str("0,30".into())).unwrap();
        let items = value.as_list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_compound().unwrap().get("end"), Some("30"));

        assert!(matches!(
            overlay_value(&cuts, &ConfigValue::Str("0,30,90".into())),
            Err(ParserError::CompoundTooManyValues { ref item, .. }) if item == "90"
        ));
        assert!(matches!(
            overlay_value(&cuts, &ConfigValue::Int(5)),
            Err(ParserError::CompoundMissingField { ref field, .. }) if field == "end"
        ));

        let plain = OptionSpec::list(&["--output_file"], ValueType::Str);
        assert_eq!(
            overlay_value(&plain, &ConfigValue::Str("a.mp4".into())).unwrap(),
            Value::List(vec![Value::from("a.mp4")])
        );
    }
}
