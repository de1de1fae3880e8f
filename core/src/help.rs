//! Help text generated from the option table.
//!
//! Rendering is pure formatting; nothing here touches resolution state.

use std::fmt::Write;

use crate::schema::OptionSchema;
use crate::types::{HELP_MARKERS, OptionAction, OptionSpec};

const HELP_MARKER_TEXT: &str = "print info about the program or an option and exit";
const DEFAULT_WIDTH: usize = 80;

/// Detailed help for a single option.
///
/// A grouping option lists its members instead. `active_group` is the
/// grouping option given earlier on the command line, shown when the option
/// declares no group of its own.
///
/// # Examples
///
/// ```
/// use option_schema_core::{OptionSchema, OptionSpec, ValueType, render_option_help};
///
/// let margin = OptionSpec::value(&["--frame_margin", "-m"], ValueType::Int)
///     .with_default(6)
///     .with_help("frames kept around loud sections");
/// let schema = OptionSchema::new().with_option(margin.clone());
///
/// let text = render_option_help(&schema, &margin, None);
/// assert!(text.starts_with("  --frame_margin, -m\n    frames kept around loud sections\n"));
/// assert!(text.contains("    type: int\n    default: 6\n"));
/// ```
pub fn render_option_help(
    schema: &OptionSchema,
    spec: &OptionSpec,
    active_group: Option<&str>,
) -> String {
    let mut text = String::new();

    if spec.action == OptionAction::Grouping {
        let _ = writeln!(text, "  {}:", spec.canonical_name());
        for member in schema.members_of(spec.canonical_name()) {
            let _ = writeln!(text, "  {}: {}", member.names.join(", "), member.help);
        }
        return text;
    }

    let _ = writeln!(text, "  {}", spec.names.join(", "));
    let _ = writeln!(text, "    {}", spec.help);
    text.push('\n');

    if spec.is_compound() {
        let signature: Vec<String> = spec
            .compound_fields
            .iter()
            .map(|field| {
                if field.is_required() {
                    format!("{{{}}}", field.name)
                } else {
                    format!("{{{}={}}}", field.name, field.default)
                }
            })
            .collect();
        let _ = writeln!(text, "    Arguments:");
        let _ = writeln!(text, "      {}", signature.join(","));
    }

    if !spec.extra_help.is_empty() {
        for line in spec.extra_help.lines() {
            if line.trim().is_empty() {
                text.push('\n');
            } else {
                let _ = writeln!(text, "    {line}");
            }
        }
        text.push('\n');
    }

    match spec.action {
        OptionAction::SetDefault if spec.is_compound() => {}
        OptionAction::SetDefault => {
            let _ = writeln!(text, "    type: {}", spec.value_type);
            let _ = writeln!(text, "    default: {}", spec.default);
            if let Some(range) = &spec.range {
                let _ = writeln!(text, "    range: {range}");
            }
            if let Some(choices) = &spec.choices {
                let _ = writeln!(text, "    choices: {}", choices.join(", "));
            }
        }
        OptionAction::StoreTrue | OptionAction::StoreFalse => {
            let _ = writeln!(text, "    type: flag");
        }
        OptionAction::Grouping => {}
    }

    if let Some(group) = spec.group.as_deref().or(active_group) {
        let _ = writeln!(text, "    group: {group}");
    }

    text
}

/// Listing of every visible option, followed by an optional footer.
pub fn render_program_help(schema: &OptionSchema, footer: Option<&str>) -> String {
    let mut text = String::new();

    for spec in schema.options().iter().filter(|spec| !spec.hidden) {
        if spec.action == OptionAction::Grouping {
            let _ = writeln!(text, "\n  {}:", spec.canonical_name());
        } else {
            let _ = writeln!(text, "  {}: {}", spec.names.join(", "), spec.help);
        }
    }
    let _ = writeln!(text, "  {}: {HELP_MARKER_TEXT}", HELP_MARKERS.join(", "));

    if let Some(footer) = footer {
        text.push('\n');
        text.push_str(footer);
        if !footer.ends_with('\n') {
            text.push('\n');
        }
    }

    text
}

/// Usable output width: `$COLUMNS` (or 80) minus a small margin.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_WIDTH)
        .saturating_sub(3)
        .max(20)
}

/// Word-wraps each line to `width`, continuing with the line's own indent.
///
/// ```
/// use option_schema_core::wrap;
///
/// let wrapped = wrap("    one two three four", 14);
/// assert_eq!(wrapped, "    one two\n    three four");
/// ```
pub fn wrap(text: &str, width: usize) -> String {
    text.split('\n')
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> String {
    let body = line.trim_start();
    if body.is_empty() {
        return String::new();
    }
    let indent = &line[..line.len() - body.len()];

    let mut lines: Vec<String> = Vec::new();
    let mut current = indent.to_string();
    let mut has_word = false;

    for word in body.split_whitespace() {
        let needed = if has_word { word.len() + 1 } else { word.len() };
        if has_word && current.len() + needed > width {
            lines.push(std::mem::replace(&mut current, indent.to_string()));
            has_word = false;
        }
        if has_word {
            current.push(' ');
        }
        current.push_str(word);
        has_word = true;
    }
    lines.push(current);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueType;

    fn schema() -> OptionSchema {
        OptionSchema::new()
            .with_option(
                OptionSpec::value(&["--preset"], ValueType::Str)
                    .with_default("medium")
                    .with_choices(&["fast", "medium", "slow"])
                    .with_help("encoder preset"),
            )
            .with_option(OptionSpec::grouping("--motion_ops"))
            .with_option(
                OptionSpec::list(&["--rectangle"], ValueType::Str)
                    .with_fields(&[("start", ""), ("end", ""), ("thickness", "0")])
                    .with_help("draw a rectangle")
                    .with_extra_help("Coordinates are in pixels.")
                    .in_group("--motion_ops"),
            )
            .with_option(OptionSpec::store_true(&["--debug"]).hidden().with_help("debug"))
    }

    #[test]
    fn test_option_help_lists_choices() {
        let schema = schema();
        let text = render_option_help(&schema, schema.lookup("--preset").unwrap(), None);
        assert_eq!(
            text,
            "  --preset\n    encoder preset\n\n    type: str\n    default: medium\n    choices: fast, medium, slow\n"
        );
    }

    #[test]
    fn test_compound_help_shows_signature_not_type() {
        let schema = schema();
        let text = render_option_help(&schema, schema.lookup("--rectangle").unwrap(), None);
        assert!(text.contains("    Arguments:\n      {start},{end},{thickness=0}\n"));
        assert!(text.contains("    Coordinates are in pixels.\n"));
        assert!(!text.contains("type:"));
        assert!(text.ends_with("    group: --motion_ops\n"));
    }

    #[test]
    fn test_grouping_help_lists_members() {
        let schema = schema();
        let text = render_option_help(&schema, schema.lookup("--motion_ops").unwrap(), None);
        assert_eq!(text, "  --motion_ops:\n  --rectangle: draw a rectangle\n");
    }

    #[test]
    fn test_active_group_fallback() {
        let schema = schema();
        let text =
            render_option_help(&schema, schema.lookup("--debug").unwrap(), Some("--motion_ops"));
        assert!(text.contains("    type: flag\n    group: --motion_ops\n"));
    }

    #[test]
    fn test_program_help_hides_hidden_options() {
        let text = render_program_help(&schema(), Some("Report issues upstream."));
        assert!(text.contains("  --preset: encoder preset\n"));
        assert!(text.contains("\n  --motion_ops:\n"));
        assert!(!text.contains("--debug"));
        assert!(text.contains("  --help, -h: print info about the program or an option and exit\n"));
        assert!(text.ends_with("\nReport issues upstream.\n"));
    }

    #[test]
    fn test_wrap_keeps_blank_lines_and_long_words() {
        assert_eq!(wrap("a\n\nb", 10), "a\n\nb");
        assert_eq!(wrap("  averyveryverylongword x", 8), "  averyveryverylongword\n  x");
    }
}
