//! Per-invocation parser state.
//!
//! A [`ParserContext`] bundles everything one parse needs: program identity,
//! the root namespace for config overrides, and the option table with its
//! defaults. It is built once, adjusted by the config overlay, and then used
//! to parse tokens.

use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::help::render_program_help;
use crate::overlay::{ConfigOverlay, load_overlay, overlay_value};
use crate::resolved::ResolvedOptions;
use crate::scanner;
use crate::schema::OptionSchema;
use crate::types::{VERSION_MARKERS, Value};
use crate::validate::validate_schema;

/// Result of a parse that did not fail.
///
/// Everything other than [`Resolved`](Outcome::Resolved) is a successful
/// early exit: print the text and stop.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Resolved(ResolvedOptions),
    /// Program or per-option help.
    Help(String),
    /// `<program> version <version>`.
    Version(String),
    /// Printed when no arguments are given.
    Description(String),
}

/// A default changed by the config overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayChange {
    pub key: String,
    pub from: Value,
    pub to: Value,
}

/// Explicit parser state for one program invocation.
///
/// # Examples
///
/// ```
/// use option_schema_core::*;
///
/// let schema = OptionSchema::new()
///     .with_option(OptionSpec::value(&["--quality"], ValueType::Int).with_default(3));
/// let mut ctx = ParserContext::new("myprog", "0.4.0", schema).unwrap();
///
/// let overlay = parse_overlay("myprog.quality = 5\n".as_bytes(), ctx.root()).unwrap();
/// let changes = ctx.apply_overlay(&overlay);
/// assert_eq!(changes[0].to, Value::Int(5));
///
/// assert_eq!(
///     ctx.parse(&["-v"]).unwrap(),
///     Outcome::Version("myprog version 0.4.0".into())
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ParserContext {
    program: String,
    version: String,
    root: String,
    description: Option<String>,
    help_footer: Option<String>,
    schema: OptionSchema,
}

impl ParserContext {
    /// Creates a context; the root namespace defaults to the program name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSchema`](crate::ParserError::InvalidSchema) when the
    /// option table fails [`validate_schema`].
    pub fn new(program: &str, version: &str, schema: OptionSchema) -> Result<Self> {
        if let Some(err) = validate_schema(&schema).into_iter().next() {
            return Err(err.into());
        }
        Ok(Self {
            program: program.to_string(),
            version: version.to_string(),
            root: program.to_string(),
            description: None,
            help_footer: None,
            schema,
        })
    }

    /// Text printed when the program runs without arguments.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Namespace that config overlay lines must start with.
    pub fn with_root(mut self, root: &str) -> Self {
        self.root = root.to_string();
        self
    }

    /// Text appended to the program help.
    pub fn with_help_footer(mut self, footer: &str) -> Self {
        self.help_footer = Some(footer.to_string());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn schema(&self) -> &OptionSchema {
        &self.schema
    }

    /// `<program> version <version>`.
    pub fn version_line(&self) -> String {
        format!("{} version {}", self.program, self.version)
    }

    pub fn program_help(&self) -> String {
        render_program_help(&self.schema, self.help_footer.as_deref())
    }

    /// Loads the overlay file at `path` and applies it.
    ///
    /// A missing file changes nothing.
    pub fn load_config(&mut self, path: impl AsRef<Path>) -> Result<Vec<OverlayChange>> {
        let overlay = load_overlay(path, &self.root)?;
        Ok(self.apply_overlay(&overlay))
    }

    /// Overwrites option defaults with overlay values.
    ///
    /// Returns the overrides that changed a default. Keys with no matching
    /// option are skipped, as are values the command line would reject for
    /// that option (wrong type, not a choice, malformed compound).
    pub fn apply_overlay(&mut self, overlay: &ConfigOverlay) -> Vec<OverlayChange> {
        let mut changes = Vec::new();

        for (key, raw) in overlay.iter() {
            let Some(spec) = self.schema.option_mut(key) else {
                warn!(key, "config override for unknown option ignored");
                continue;
            };
            let value = match overlay_value(spec, raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(key, value = %raw, error = %err, "config override ignored");
                    continue;
                }
            };
            if spec.default == value {
                continue;
            }

            info!("Setting {key} to {value}");
            changes.push(OverlayChange {
                key: key.to_string(),
                from: std::mem::replace(&mut spec.default, value.clone()),
                to: value,
            });
        }

        changes
    }

    /// Resolves `args` (program name excluded).
    ///
    /// # Errors
    ///
    /// Any [`ParserError`](crate::ParserError) raised by the scan; no partial
    /// result is returned.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<Outcome> {
        if args.is_empty() {
            if let Some(description) = &self.description {
                return Ok(Outcome::Description(description.clone()));
            }
        }

        if let [only] = args {
            if VERSION_MARKERS.contains(&only.as_ref()) {
                return Ok(Outcome::Version(self.version_line()));
            }
        }

        scanner::scan(self, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OptionSpec, ParserError, SchemaError, ValueType};

    fn schema() -> OptionSchema {
        OptionSchema::new()
            .with_option(OptionSpec::value(&["--quality"], ValueType::Int).with_default(3))
            .with_option(OptionSpec::value(&["--frame_rate"], ValueType::Float))
            .with_option(OptionSpec::store_true(&["--quiet"]))
    }

    fn ctx() -> ParserContext {
        ParserContext::new("myprog", "0.4.0", schema()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_schema() {
        let bad = OptionSchema::new()
            .with_option(OptionSpec::store_true(&["--quiet"]))
            .with_option(OptionSpec::store_true(&["--quiet"]));
        let err = ParserContext::new("myprog", "0.4.0", bad).unwrap_err();
        assert!(matches!(
            err,
            ParserError::InvalidSchema(SchemaError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_version_only_when_alone() {
        assert_eq!(
            ctx().parse(&["-V"]).unwrap(),
            Outcome::Version("myprog version 0.4.0".to_string())
        );
        let err = ctx().parse(&["in.mp4", "-v"]).unwrap_err();
        assert!(matches!(err, ParserError::UnknownOption { .. }));
    }

    #[test]
    fn test_description_on_empty_args() {
        let with = ctx().with_description("Cut the quiet parts.");
        let empty: [&str; 0] = [];
        assert_eq!(
            with.parse(&empty).unwrap(),
            Outcome::Description("Cut the quiet parts.".to_string())
        );
        assert!(matches!(ctx().parse(&empty).unwrap(), Outcome::Resolved(_)));
    }

    #[test]
    fn test_overlay_changes_default_for_matching_root_only() {
        let mut ctx = ctx();
        let changes = ctx
            .apply_overlay(&crate::parse_overlay("myprog.quality = 5\nelse.quality = 9\n".as_bytes(), "myprog").unwrap());

        assert_eq!(
            changes,
            vec![OverlayChange {
                key: "quality".to_string(),
                from: Value::Int(3),
                to: Value::Int(5),
            }]
        );
        let Outcome::Resolved(options) = ctx.parse(&["in.mp4"]).unwrap() else {
            panic!("expected resolved options");
        };
        assert_eq!(options.int("quality"), Some(5));
        assert!(!options.is_touched("quality"));
    }

    #[test]
    fn test_overlay_reports_only_real_changes() {
        let mut ctx = ctx();
        let overlay = crate::parse_overlay(
            "myprog.quality = 3\nmyprog.frame_rate = 30\nmyprog.unknown = 1\nmyprog.quiet = 'loud'\n"
                .as_bytes(),
            "myprog",
        )
        .unwrap();
        let changes = ctx.apply_overlay(&overlay);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].key, "frame_rate");
        assert_eq!(changes[0].from, Value::Null);
        assert_eq!(changes[0].to, Value::Float(30.0));
    }

    #[test]
    fn test_overlay_values_are_validated_like_arguments() {
        let schema = OptionSchema::new()
            .with_option(
                OptionSpec::value(&["--preset"], ValueType::Str)
                    .with_default("medium")
                    .with_choices(&["fast", "medium", "slow"]),
            )
            .with_option(
                OptionSpec::list(&["--cut_out"], ValueType::Str)
                    .with_fields(&[("start", ""), ("end", "")]),
            );
        let mut ctx = ParserContext::new("myprog", "0.4.0", schema).unwrap();
        let overlay = crate::parse_overlay(
            "myprog.preset = 'turbo'\nmyprog.cut_out = '0,30,90'\n".as_bytes(),
            "myprog",
        )
        .unwrap();
        assert!(ctx.apply_overlay(&overlay).is_empty());

        let Outcome::Resolved(options) = ctx.parse(&["in.mp4"]).unwrap() else {
            panic!("expected resolved options");
        };
        assert_eq!(options.str("preset"), Some("medium"));
        assert!(options.list("cut_out").is_empty());

        let overlay = crate::parse_overlay("myprog.cut_out = '0,30'\n".as_bytes(), "myprog").unwrap();
        assert_eq!(ctx.apply_overlay(&overlay).len(), 1);
        let Outcome::Resolved(options) = ctx.parse(&["in.mp4"]).unwrap() else {
            panic!("expected resolved options");
        };
        let cut = options.list("cut_out")[0].as_compound().unwrap();
        assert_eq!(cut.get("start"), Some("0"));
        assert_eq!(cut.get("end"), Some("30"));
    }

    #[test]
    fn test_command_line_beats_overlay() {
        let mut ctx = ctx();
        ctx.apply_overlay(&crate::parse_overlay("myprog.quality = 5\n".as_bytes(), "myprog").unwrap());
        let Outcome::Resolved(options) = ctx.parse(&["--quality", "8"]).unwrap() else {
            panic!("expected resolved options");
        };
        assert_eq!(options.int("quality"), Some(8));
        assert!(options.is_touched("quality"));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        std::fs::write(&path, "# overrides\nmyprog.quality = 5\n").unwrap();

        let mut ctx = ctx().with_root("myprog");
        let changes = ctx.load_config(&path).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(ctx.schema().option("quality").unwrap().default, Value::Int(5));

        let missing = ctx.load_config(dir.path().join("absent.txt")).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_load_config_reports_malformed_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        std::fs::write(&path, "myprog.quality = five\n").unwrap();

        let err = ctx().load_config(&path).unwrap_err();
        assert!(matches!(err, ParserError::ConfigParseError { line: 1, .. }));
    }
}
