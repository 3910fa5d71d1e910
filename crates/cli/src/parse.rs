//! ArgMatches → CliAction conversion.
//!
//! Global flags become [`GlobalOpts`]; the subcommand becomes a
//! [`CliAction`]. All parse failures are reported as `String` messages.

use clap::ArgMatches;
use std::path::PathBuf;
use voltest::MaxExtent;

use crate::format::OutputMode;

/// Where limits come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitsSource {
    /// `Limits::default()`
    Default,
    /// A named preset
    Preset(String),
    /// A JSON file
    File(PathBuf),
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalOpts {
    pub seed: Option<u64>,
    pub limits: LimitsSource,
    pub mode: OutputMode,
    pub verbosity: u8,
}

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Type {
        count: usize,
        in_array: bool,
    },
    Shape {
        rank: usize,
        max: Option<Vec<MaxExtent>>,
    },
    Run {
        iterations: Option<usize>,
        connector: Option<String>,
        groups: Vec<String>,
    },
    Limits,
}

/// Extract global flags.
pub fn global_opts(matches: &ArgMatches) -> Result<GlobalOpts, String> {
    let seed = parse_opt::<u64>(matches, "seed")?;

    let limits = if let Some(path) = matches.get_one::<String>("limits") {
        LimitsSource::File(PathBuf::from(path))
    } else if let Some(name) = matches.get_one::<String>("preset") {
        LimitsSource::Preset(name.clone())
    } else {
        LimitsSource::Default
    };

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    Ok(GlobalOpts {
        seed,
        limits,
        mode,
        verbosity: matches.get_count("verbose"),
    })
}

/// Convert clap ArgMatches into a CliAction.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (sub_name, m) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    match sub_name {
        "type" => {
            let count = parse_opt::<usize>(m, "count")?.unwrap_or(1);
            Ok(CliAction::Type {
                count,
                in_array: m.get_flag("in-array"),
            })
        }
        "shape" => {
            let rank = parse_opt::<usize>(m, "rank")?.ok_or("Missing --rank")?;
            let max = m
                .get_many::<String>("max")
                .map(|vals| vals.map(|v| parse_max_extent(v)).collect::<Result<Vec<_>, _>>())
                .transpose()?;
            Ok(CliAction::Shape { rank, max })
        }
        "run" => Ok(CliAction::Run {
            iterations: parse_opt::<usize>(m, "iterations")?,
            connector: m.get_one::<String>("connector").cloned(),
            groups: m
                .get_many::<String>("group")
                .map(|vals| vals.cloned().collect())
                .unwrap_or_default(),
        }),
        "limits" => Ok(CliAction::Limits),
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Parse `unlimited` or a non-negative integer.
pub fn parse_max_extent(raw: &str) -> Result<MaxExtent, String> {
    if raw.eq_ignore_ascii_case("unlimited") {
        return Ok(MaxExtent::Unlimited);
    }
    raw.parse::<u64>()
        .map(MaxExtent::Bounded)
        .map_err(|e| format!("Invalid max extent '{}': {}", raw, e))
}

fn parse_opt<T>(m: &ArgMatches, id: &str) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    m.get_one::<String>(id)
        .map(|s| s.parse::<T>())
        .transpose()
        .map_err(|e| format!("Invalid {}: {}", id, e))
}
