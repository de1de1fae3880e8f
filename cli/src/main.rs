use std::io::IsTerminal;
use std::path::PathBuf;

use option_schema_core::{Outcome, ParserContext, ResolvedOptions, terminal_width, wrap};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod options;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides the config overlay location.
const CONFIG_ENV: &str = "CLIPCUT_CONFIG";
const CONFIG_FILE: &str = "config.txt";

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: &[String]) -> Result<(), String> {
    let mut ctx = ParserContext::new(options::PROGRAM, PACKAGE_VERSION, options::option_schema())
        .map_err(|err| err.to_string())?
        .with_description(options::DESCRIPTION)
        .with_help_footer(options::HELP_FOOTER);

    let config = config_path();
    debug!(path = %config.display(), "loading config overlay");
    ctx.load_config(&config).map_err(|err| {
        format!("Failed to load config '{}': {err}", config.display())
    })?;

    match ctx.parse(args).map_err(|err| err.to_string())? {
        Outcome::Help(text) | Outcome::Description(text) | Outcome::Version(text) => {
            print_wrapped(&text);
            Ok(())
        }
        Outcome::Resolved(resolved) => {
            if resolved.flag("version") {
                print_wrapped(&ctx.version_line());
                return Ok(());
            }
            emit_resolved(&resolved)
        }
    }
}

fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

/// Hands the resolved options to the media pipeline as JSON on stdout.
fn emit_resolved(resolved: &ResolvedOptions) -> Result<(), String> {
    if resolved.inputs().is_empty() {
        return Err("You need to give clipcut an input file or folder".to_string());
    }
    let raw = serde_json::to_string_pretty(resolved)
        .map_err(|err| format!("Failed to serialize resolved options: {err}"))?;
    println!("{raw}");
    Ok(())
}

fn print_wrapped(text: &str) {
    println!("{}", wrap(text.trim_end_matches('\n'), terminal_width()));
}
