//! Option schema engine for media-editing command lines.
//!
//! This crate turns a declarative option table into a fully typed options
//! record:
//!
//! - [`OptionSpec`] / [`OptionSchema`]: the table of recognized options,
//!   their aliases, types, defaults, choices, groups and compound fields.
//! - [`validate_schema`]: structural checks on the table (duplicate names,
//!   reserved markers, misplaced metadata).
//! - [`load_overlay`]: `root.key = value` config files that replace
//!   defaults before any token is read.
//! - [`ParserContext::parse`]: the token scanner producing
//!   [`ResolvedOptions`], or an early [`Outcome`] for help, version and
//!   description requests.
//! - [`parse_compound`]: comma-separated multi-field values such as
//!   `--rectangle 0,end,10,20,20,30,#000`.
//! - [`suggest`]: "did you mean" candidates for unknown options.
//! - [`render_option_help`] / [`render_program_help`]: help text generated
//!   from the table.
//!
//! # Example
//!
//! ```
//! use option_schema_core::*;
//!
//! let schema = OptionSchema::new()
//!     .with_option(
//!         OptionSpec::value(&["--frame_margin", "-m"], ValueType::Int)
//!             .with_default(6)
//!             .with_help("frames kept around loud sections"),
//!     )
//!     .with_option(
//!         OptionSpec::list(&["--rectangle"], ValueType::Str)
//!             .with_fields(&[("start", ""), ("end", ""), ("color", "#000")]),
//!     );
//! let ctx = ParserContext::new("clipcut", "0.1.0", schema).unwrap();
//!
//! let Outcome::Resolved(options) =
//!     ctx.parse(&["talk.mp4", "-m", "2", "--rectangle", "0,30"]).unwrap()
//! else {
//!     panic!("expected resolved options");
//! };
//! assert_eq!(options.inputs(), ["talk.mp4"]);
//! assert_eq!(options.int("frame_margin"), Some(2));
//! let rect = options.list("rectangle")[0].as_compound().unwrap();
//! assert_eq!(rect.get("color"), Some("#000"));
//!
//! let err = ctx.parse(&["--frame-margim", "2"]).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "unknown option: --frame-margim (did you mean: --frame_margin)"
//! );
//! ```

mod compound;
mod context;
mod error;
mod fuzzy;
mod help;
mod overlay;
mod resolved;
mod scanner;
mod schema;
mod types;
mod validate;

pub use compound::parse_compound;
pub use context::{Outcome, OverlayChange, ParserContext};
pub use error::{OptionKind, ParserError, Result};
pub use fuzzy::{MAX_SUGGESTIONS, SIMILARITY_CUTOFF, ratio, suggest};
pub use help::{render_option_help, render_program_help, terminal_width, wrap};
pub use overlay::{ConfigOverlay, ConfigValue, load_overlay, parse_overlay};
pub use resolved::ResolvedOptions;
pub use schema::OptionSchema;
pub use types::*;
pub use validate::{SchemaError, validate_schema};
