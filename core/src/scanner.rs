//! Token scanner: resolves raw command-line tokens against the option table.
//!
//! The scan is a single pass with three states:
//!
//! - collecting positional inputs (the initial state),
//! - collecting the values of a list option until the next recognized option,
//! - closed, after a single-value option, flag or grouping header; bare tokens
//!   are no longer accepted as inputs.
//!
//! A help marker right after an option ends the scan with that option's help.
//! Any other help marker asks for the program help, which is returned once the
//! remaining tokens have been checked. Like any option, help may only be
//! asked for once.

use tracing::debug;

use crate::compound::parse_compound;
use crate::context::{Outcome, ParserContext};
use crate::error::{OptionKind, ParserError, Result};
use crate::fuzzy::suggest;
use crate::help::render_option_help;
use crate::resolved::ResolvedOptions;
use crate::types::{Arity, HELP_MARKERS, OptionAction, OptionSpec, Value, is_help_marker};

enum Pending {
    Raw(String),
    Compound(Value),
}

enum ScanState<'s> {
    CollectingInputs,
    CollectingListValues {
        spec: &'s OptionSpec,
        pending: Vec<Pending>,
    },
    Closed,
}

struct Scanner<'s> {
    ctx: &'s ParserContext,
    state: ScanState<'s>,
    resolved: ResolvedOptions,
    used: Vec<&'s OptionSpec>,
    help_requested: bool,
}

/// Runs the scan over `args` (program name excluded).
pub(crate) fn scan<S: AsRef<str>>(ctx: &ParserContext, args: &[S]) -> Result<Outcome> {
    let mut scanner = Scanner {
        ctx,
        state: ScanState::CollectingInputs,
        resolved: ResolvedOptions::from_defaults(ctx.schema()),
        used: Vec::new(),
        help_requested: false,
    };

    let mut tokens = args.iter().map(AsRef::as_ref).peekable();
    while let Some(token) = tokens.next() {
        if is_help_marker(token) {
            if scanner.help_requested {
                return Err(ParserError::RepeatedOption(HELP_MARKERS[0].to_string()));
            }
            scanner.flush()?;
            scanner.help_requested = true;
            continue;
        }

        let Some(spec) = ctx.schema().lookup(token) else {
            scanner.unresolved(token)?;
            continue;
        };

        scanner.begin_option(spec)?;

        if tokens.peek().is_some_and(|next| is_help_marker(next)) {
            debug!(option = spec.canonical_name(), "option help requested");
            return Ok(Outcome::Help(render_option_help(
                ctx.schema(),
                spec,
                scanner.resolved.active_group(),
            )));
        }

        match (spec.action, spec.arity) {
            (OptionAction::StoreTrue, _) => scanner.assign(spec, Value::Flag(true)),
            (OptionAction::StoreFalse, _) => scanner.assign(spec, Value::Flag(false)),
            (OptionAction::Grouping, _) => {
                scanner.resolved.set_active_group(spec.canonical_name().to_string());
                scanner.assign(spec, Value::Flag(true));
            }
            (OptionAction::SetDefault, Arity::List) => {
                debug!(option = spec.canonical_name(), "collecting list values");
                scanner.state = ScanState::CollectingListValues {
                    spec,
                    pending: Vec::new(),
                };
            }
            (OptionAction::SetDefault, Arity::Single) => {
                let raw = tokens
                    .next()
                    .ok_or_else(|| ParserError::MissingValue(spec.canonical_name().to_string()))?;
                let value = coerce(spec, raw)?;
                check_choice(spec, raw, &value)?;
                scanner.assign(spec, value);
            }
        }
    }

    scanner.flush()?;

    if scanner.help_requested {
        return Ok(Outcome::Help(ctx.program_help()));
    }
    Ok(Outcome::Resolved(scanner.resolved))
}

impl<'s> Scanner<'s> {
    /// Bookkeeping shared by every recognized option token.
    fn begin_option(&mut self, spec: &'s OptionSpec) -> Result<()> {
        if self.used.iter().any(|used| std::ptr::eq(*used, spec)) {
            return Err(ParserError::RepeatedOption(
                spec.canonical_name().to_string(),
            ));
        }
        self.flush()?;
        self.used.push(spec);
        self.resolved.touch(spec.key());
        Ok(())
    }

    fn assign(&mut self, spec: &OptionSpec, value: Value) {
        debug!(option = spec.canonical_name(), %value, "resolved option");
        self.resolved.set(spec.key(), value);
    }

    /// Handles a token that names no option.
    fn unresolved(&mut self, token: &str) -> Result<()> {
        match &mut self.state {
            ScanState::CollectingListValues { spec, pending } => {
                if spec.is_compound() {
                    let value = parse_compound(token, spec)?;
                    pending.push(Pending::Compound(Value::Compound(value)));
                } else {
                    pending.push(Pending::Raw(token.to_string()));
                }
                Ok(())
            }
            ScanState::CollectingInputs if !token.starts_with('-') => {
                self.resolved.push_input(token);
                Ok(())
            }
            _ => Err(ParserError::UnknownOption {
                token: token.to_string(),
                kind: OptionKind::of(token),
                suggestions: suggest(token, self.ctx.schema().all_names()),
            }),
        }
    }

    /// Closes the open collection, storing list values under their option.
    fn flush(&mut self) -> Result<()> {
        if let ScanState::CollectingListValues { spec, pending } =
            std::mem::replace(&mut self.state, ScanState::Closed)
        {
            let values = pending
                .into_iter()
                .map(|item| match item {
                    Pending::Raw(raw) => coerce(spec, &raw),
                    Pending::Compound(value) => Ok(value),
                })
                .collect::<Result<Vec<_>>>()?;
            self.assign(spec, Value::List(values));
        }
        Ok(())
    }
}

/// Coerces a raw token by the option's declared type.
pub(crate) fn coerce(spec: &OptionSpec, raw: &str) -> Result<Value> {
    if spec.is_compound() {
        return parse_compound(raw, spec).map(Value::Compound);
    }
    spec.value_type
        .parse(raw)
        .ok_or_else(|| ParserError::InvalidValue {
            option: spec.canonical_name().to_string(),
            value: raw.to_string(),
            expected: spec.value_type,
        })
}

/// Checks a coerced value against the option's choices.
///
/// Choices are coerced by the same type, so `1.0` and `1` match for floats.
pub(crate) fn check_choice(spec: &OptionSpec, raw: &str, value: &Value) -> Result<()> {
    let Some(choices) = &spec.choices else {
        return Ok(());
    };
    if choices
        .iter()
        .any(|choice| spec.value_type.parse(choice).as_ref() == Some(value))
    {
        Ok(())
    } else {
        Err(ParserError::InvalidChoice {
            option: spec.canonical_name().to_string(),
            value: raw.to_string(),
            choices: choices.clone(),
        })
    }
}
