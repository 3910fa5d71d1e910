//! Clap command tree.

use clap::{Arg, ArgAction, Command};

/// Build the top-level `voltest` command.
pub fn build_cli() -> Command {
    Command::new("voltest")
        .about("Randomized datatype and dataspace generation for connector testing")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("seed")
                .long("seed")
                .global(true)
                .value_name("U64")
                .help("Seed for the random draws (default: taken from the clock)"),
        )
        .arg(
            Arg::new("limits")
                .long("limits")
                .global(true)
                .value_name("FILE")
                .conflicts_with("preset")
                .help("JSON file overriding generation limits"),
        )
        .arg(
            Arg::new("preset")
                .long("preset")
                .global(true)
                .value_parser(["shallow", "default", "stress"])
                .help("Built-in limit preset"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit JSON instead of text"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log detail (-v info, -vv debug)"),
        )
        .subcommand(type_command())
        .subcommand(shape_command())
        .subcommand(run_command())
        .subcommand(Command::new("limits").about("Print the limits in effect"))
}

fn type_command() -> Command {
    Command::new("type")
        .about("Generate random datatypes")
        .arg(
            Arg::new("count")
                .long("count")
                .short('n')
                .value_name("N")
                .default_value("1")
                .help("Number of datatypes to generate"),
        )
        .arg(
            Arg::new("in-array")
                .long("in-array")
                .action(ArgAction::SetTrue)
                .help("Generate array element datatypes"),
        )
}

fn shape_command() -> Command {
    Command::new("shape")
        .about("Generate a random dataspace shape")
        .arg(
            Arg::new("rank")
                .long("rank")
                .short('r')
                .required(true)
                .value_name("R")
                .help("Number of dimensions"),
        )
        .arg(
            Arg::new("max")
                .long("max")
                .value_name("U64|unlimited")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("Maximum extent for each dimension"),
        )
}

fn run_command() -> Command {
    Command::new("run")
        .about("Run test groups against a connector")
        .arg(
            Arg::new("iterations")
                .long("iterations")
                .short('i')
                .value_name("N")
                .help("Descriptors generated per probe"),
        )
        .arg(
            Arg::new("connector")
                .long("connector")
                .value_name("NAME")
                .help("Connector under test (default: $HDF5_VOL_CONNECTOR or native)"),
        )
        .arg(
            Arg::new("group")
                .long("group")
                .short('g')
                .value_name("NAME")
                .action(ArgAction::Append)
                .help("Run only the named group; repeatable"),
        )
}
