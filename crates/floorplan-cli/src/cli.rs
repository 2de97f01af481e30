//! Command-line argument parsing.
//!
//! Parses args manually. The output policy can also be set with the
//! `FLOORPLAN_OUTPUT_POLICY` environment variable when no flag is given.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

use floorplan_export::{OutputFormat, OutputPolicy, OutputTarget};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "Usage: floorplan [OPTIONS] <in_file> <out_file1> <out_file2> <out_file3>";

pub const HELP_TEXT: &str = "\
floorplan - pack a slicing floorplan

USAGE:
    floorplan [OPTIONS] <in_file> <out_file1> <out_file2> <out_file3>

ARGS:
    <in_file>      Pre-order tree: H/V for cuts, <id>(<width>,<height>) for blocks
    <out_file1>    Post-order tree shape
    <out_file2>    Post-order dimensions of every node
    <out_file3>    Packing: <id>((<width>,<height>)(<x>,<y>)) per block

OPTIONS:
    --fail-fast        Stop at the first output that cannot be written
    --best-effort      Skip outputs that cannot be written (default)
    --json=PATH        Also write the packing as JSON
    --strict-ids       Reject inputs with repeated block ids
    --help, -h         Show this help message
    --version, -V      Show version

ENVIRONMENT VARIABLES:
    FLOORPLAN_OUTPUT_POLICY   fail-fast | best-effort (overridden by flags)
    RUST_LOG                  Log filter (default: warn)
";

/// Environment variable consulted when no policy flag is given.
pub const POLICY_ENV: &str = "FLOORPLAN_OUTPUT_POLICY";

/// Errors in command-line usage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("unknown option: {0}")]
    UnknownOption(String),

    #[error("expected 4 file arguments, got {0}")]
    WrongArgCount(usize),

    #[error("option {0} requires a value")]
    MissingValue(String),

    #[error("invalid output policy: {0}")]
    InvalidPolicy(String),
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub input: PathBuf,
    pub postorder: PathBuf,
    pub dimensions: PathBuf,
    pub packing: PathBuf,
    pub json: Option<PathBuf>,
    pub policy: OutputPolicy,
    pub strict_ids: bool,
}

impl Opts {
    /// Output targets in the order they are written.
    pub fn targets(&self) -> Vec<OutputTarget> {
        let mut targets = vec![
            OutputTarget::new(OutputFormat::PostOrder, &self.postorder),
            OutputTarget::new(OutputFormat::Dimensions, &self.dimensions),
            OutputTarget::new(OutputFormat::Packing, &self.packing),
        ];
        if let Some(json) = &self.json {
            targets.push(OutputTarget::new(OutputFormat::Json, json));
        }
        targets
    }
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Parse arguments (without the program name).
///
/// `env_policy` is the value of [`POLICY_ENV`], if set. File arguments need
/// not be valid Unicode.
pub fn parse_args<I>(args: I, env_policy: Option<&str>) -> Result<Command, CliError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut files = Vec::new();
    let mut policy = None;
    let mut json = None;
    let mut strict_ids = false;

    for arg in args {
        let Some(flag) = arg.to_str() else {
            if arg.to_string_lossy().starts_with("--") {
                return Err(CliError::UnknownOption(arg.to_string_lossy().into_owned()));
            }
            files.push(PathBuf::from(arg));
            continue;
        };

        match flag {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--fail-fast" => policy = Some(OutputPolicy::FailFast),
            "--best-effort" => policy = Some(OutputPolicy::BestEffort),
            "--strict-ids" => strict_ids = true,
            "--json" => return Err(CliError::MissingValue(flag.to_string())),
            _ => {
                if let Some(path) = flag.strip_prefix("--json=") {
                    if path.is_empty() {
                        return Err(CliError::MissingValue("--json".to_string()));
                    }
                    json = Some(PathBuf::from(path));
                } else if flag.starts_with("--") {
                    return Err(CliError::UnknownOption(flag.to_string()));
                } else {
                    files.push(PathBuf::from(flag));
                }
            }
        }
    }

    let policy = match (policy, env_policy) {
        (Some(policy), _) => policy,
        (None, Some(value)) => OutputPolicy::from_name(value)
            .ok_or_else(|| CliError::InvalidPolicy(value.to_string()))?,
        (None, None) => OutputPolicy::default(),
    };

    let [input, postorder, dimensions, packing]: [PathBuf; 4] = files
        .try_into()
        .map_err(|files: Vec<PathBuf>| CliError::WrongArgCount(files.len()))?;

    Ok(Command::Run(Opts {
        input,
        postorder,
        dimensions,
        packing,
        json,
        policy,
        strict_ids,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_four_files() {
        let cmd = parse_args(args(&["in", "a", "b", "c"]), None).unwrap();
        let Command::Run(opts) = cmd else {
            panic!("Expected Run");
        };
        assert_eq!(opts.input, PathBuf::from("in"));
        assert_eq!(opts.packing, PathBuf::from("c"));
        assert_eq!(opts.policy, OutputPolicy::BestEffort);
        assert_eq!(opts.targets().len(), 3);
    }

    #[test]
    fn test_wrong_count() {
        assert_eq!(
            parse_args(args(&["in", "a", "b"]), None),
            Err(CliError::WrongArgCount(3))
        );
        assert_eq!(parse_args(args(&[]), None), Err(CliError::WrongArgCount(0)));
    }

    #[test]
    fn test_options() {
        let cmd = parse_args(
            args(&["--fail-fast", "in", "a", "--json=out.json", "b", "c", "--strict-ids"]),
            None,
        )
        .unwrap();
        let Command::Run(opts) = cmd else {
            panic!("Expected Run");
        };
        assert_eq!(opts.policy, OutputPolicy::FailFast);
        assert_eq!(opts.json, Some(PathBuf::from("out.json")));
        assert!(opts.strict_ids);
        assert_eq!(opts.targets().last().unwrap().format, OutputFormat::Json);
    }

    #[test]
    fn test_env_policy() {
        let cmd = parse_args(args(&["in", "a", "b", "c"]), Some("fail-fast")).unwrap();
        assert!(matches!(cmd, Command::Run(Opts { policy: OutputPolicy::FailFast, .. })));

        let cmd = parse_args(args(&["--best-effort", "in", "a", "b", "c"]), Some("fail-fast"))
            .unwrap();
        assert!(matches!(cmd, Command::Run(Opts { policy: OutputPolicy::BestEffort, .. })));

        assert_eq!(
            parse_args(args(&["in", "a", "b", "c"]), Some("never")),
            Err(CliError::InvalidPolicy("never".to_string()))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_arguments() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(b"in\xff".to_vec());
        let mut list = vec![raw.clone()];
        list.extend(args(&["a", "b", "c"]));
        let Command::Run(opts) = parse_args(list, None).unwrap() else {
            panic!("Expected Run");
        };
        assert_eq!(opts.input, PathBuf::from(raw));

        let flag = OsString::from_vec(b"--\xff".to_vec());
        assert!(matches!(
            parse_args(vec![flag], None),
            Err(CliError::UnknownOption(_))
        ));
    }

    #[test]
    fn test_help_and_unknown() {
        assert_eq!(parse_args(args(&["-h"]), None), Ok(Command::Help));
        assert_eq!(parse_args(args(&["--version"]), None), Ok(Command::Version));
        assert_eq!(
            parse_args(args(&["--bogus", "in", "a", "b", "c"]), None),
            Err(CliError::UnknownOption("--bogus".to_string()))
        );
    }
}
