//! voltest CLI: drive the generators and harness from a shell.
//!
//! - `voltest type [-n N] [--in-array]`: print random datatypes
//! - `voltest shape --rank R [--max ...]`: print a random shape
//! - `voltest run [--connector NAME] [-g GROUP]...`: run test groups
//! - `voltest limits`: print the limits in effect
//!
//! Every command that draws reports its seed; pass it back with `--seed`
//! to replay the run.

mod commands;
mod format;
mod parse;

use std::process;

use tracing::{debug, Level};
use voltest::{Harness, HarnessOptions, Limits, SchemaSource};

use commands::build_cli;
use format::{format_error, format_limits, format_report, format_shape, format_types, OutputMode};
use parse::{global_opts, matches_to_action, CliAction, GlobalOpts, LimitsSource};

fn main() {
    let matches = build_cli().get_matches();

    let globals = match global_opts(&matches) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", format_error(&e, OutputMode::Human));
            process::exit(1);
        }
    };
    init_logging(globals.verbosity);

    let exit_code = match matches_to_action(&matches).and_then(|action| execute(action, &globals)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", format_error(&e, globals.mode));
            1
        }
    };
    process::exit(exit_code);
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn resolve_limits(source: &LimitsSource) -> Result<Limits, String> {
    match source {
        LimitsSource::Default => Ok(Limits::default()),
        LimitsSource::Preset(name) => match name.as_str() {
            "shallow" => Ok(Limits::shallow()),
            "stress" => Ok(Limits::stress()),
            "default" => Ok(Limits::default()),
            other => Err(format!("Unknown preset: {}", other)),
        },
        LimitsSource::File(path) => voltest::load_limits(path).map_err(|e| e.to_string()),
    }
}

fn open_source(globals: &GlobalOpts, limits: Limits) -> Result<SchemaSource, String> {
    SchemaSource::builder()
        .maybe_seed(globals.seed)
        .limits(limits)
        .build()
        .map_err(|e| format!("Failed to configure generator: {}", e))
}

fn execute(action: CliAction, globals: &GlobalOpts) -> Result<i32, String> {
    let limits = resolve_limits(&globals.limits)?;
    debug!(?limits, "limits resolved");

    match action {
        CliAction::Type { count, in_array } => {
            let mut source = open_source(globals, limits)?;
            let parent = in_array.then_some(voltest::TypeCategory::Array);
            let types = (0..count)
                .map(|_| source.generate_type(parent))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| format!("seed {}: {}", source.seed(), e))?;
            println!("{}", format_types(source.seed(), &types, globals.mode));
            Ok(0)
        }
        CliAction::Shape { rank, max } => {
            let mut source = open_source(globals, limits)?;
            let shape = source
                .generate_shape(rank, max.as_deref())
                .map_err(|e| e.to_string())?;
            println!("{}", format_shape(source.seed(), &shape, globals.mode));
            Ok(0)
        }
        CliAction::Run {
            iterations,
            connector,
            groups,
        } => {
            let mut options = HarnessOptions::from_env()
                .map_err(|e| e.to_string())?
                .limits(limits);
            if let Some(seed) = globals.seed {
                options = options.seed(seed);
            }
            if let Some(n) = iterations {
                options = options.iterations(n);
            }
            if let Some(name) = connector {
                options = options.connector(name);
            }

            let mut harness = Harness::with_default_groups(options).map_err(|e| e.to_string())?;
            if !groups.is_empty() {
                let names: Vec<&str> = groups.iter().map(String::as_str).collect();
                harness = harness.only(&names).map_err(|e| e.to_string())?;
            }

            let report = harness.run();
            println!("{}", format_report(&report, globals.mode));
            Ok(if report.passed() { 0 } else { 1 })
        }
        CliAction::Limits => {
            println!("{}", format_limits(&limits, globals.mode));
            Ok(0)
        }
    }
}
