//! Slicing floorplan packer.
//!
//! Reads a pre-order slicing tree, computes every block's size and position,
//! and writes the post-order shape, the post-order dimensions, and the
//! packing.

mod cli;

use std::env;
use std::process::ExitCode;

use env_logger::{Builder, Env};
use log::info;

use floorplan_core::FloorplanError;
use floorplan_export::{write_outputs, ExportOptions, ExportReport};
use floorplan_layout::solve;
use floorplan_parser::{load_tree, BuildOptions};

use cli::{parse_args, Command, Opts, HELP_TEXT, POLICY_ENV, USAGE, VERSION};

fn main() -> ExitCode {
    let _log_init: Result<(), _> =
        Builder::from_env(Env::default().filter_or("RUST_LOG", "warn")).try_init();

    let env_policy = env::var(POLICY_ENV).ok();
    let command = match parse_args(env::args_os().skip(1), env_policy.as_deref()) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("floorplan: {err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => {
            print!("{HELP_TEXT}");
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("floorplan {VERSION}");
            ExitCode::SUCCESS
        }
        Command::Run(opts) => match run(&opts) {
            Ok(report) => {
                for failure in &report.failures {
                    eprintln!("floorplan: {failure}");
                }
                info!(
                    "wrote {} of {} outputs",
                    report.written.len(),
                    report.written.len() + report.failures.len()
                );
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("floorplan: {err}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Load, solve, and write every output. The tree is dropped on every path.
fn run(opts: &Opts) -> Result<ExportReport, FloorplanError> {
    let build = BuildOptions {
        reject_duplicate_ids: opts.strict_ids,
    };
    let mut tree = load_tree(&opts.input, &build)?;
    let bounds = solve(&mut tree)?;
    info!(
        "packed {} blocks into {}x{}",
        tree.leaf_count(),
        bounds.size.width,
        bounds.size.height
    );

    let options = ExportOptions {
        policy: opts.policy,
    };
    Ok(write_outputs(&tree, &opts.targets(), &options)?)
}
