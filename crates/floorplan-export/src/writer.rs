//! Writing outputs to files under a failure policy.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use log::{debug, info};

use floorplan_core::{ExportError, FloorplanTree, Stage};

use crate::require_stage;

/// One of the supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    PostOrder,
    Dimensions,
    Packing,
    Json,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::PostOrder => "post-order",
            OutputFormat::Dimensions => "dimensions",
            OutputFormat::Packing => "packing",
            OutputFormat::Json => "json",
        }
    }

    /// The layout stage a tree must reach before this format can be written.
    pub fn required_stage(self) -> Stage {
        match self {
            OutputFormat::PostOrder => Stage::Built,
            OutputFormat::Dimensions => Stage::Sized,
            OutputFormat::Packing | OutputFormat::Json => Stage::Placed,
        }
    }

    /// Serialize `tree` in this format.
    pub fn write<W: Write>(self, tree: &FloorplanTree, out: &mut W) -> Result<(), ExportError> {
        match self {
            OutputFormat::PostOrder => crate::write_postorder(tree, out),
            OutputFormat::Dimensions => crate::write_dimensions(tree, out),
            OutputFormat::Packing => crate::write_packing(tree, out),
            #[cfg(feature = "json")]
            OutputFormat::Json => crate::write_packing_json(tree, out),
            #[cfg(not(feature = "json"))]
            OutputFormat::Json => Err(ExportError::UnsupportedFormat {
                format: self.name().to_string(),
            }),
        }
    }
}

/// What to do when an output cannot be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputPolicy {
    /// Report the failure, skip that output, and continue with the rest.
    #[default]
    BestEffort,
    /// Stop at the first failure.
    FailFast,
}

impl OutputPolicy {
    /// Parse `best-effort` or `fail-fast`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "best-effort" | "best_effort" => Some(OutputPolicy::BestEffort),
            "fail-fast" | "fail_fast" => Some(OutputPolicy::FailFast),
            _ => None,
        }
    }
}

/// Options for writing outputs.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub policy: OutputPolicy,
}

/// An output format paired with its destination file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub path: PathBuf,
}

impl OutputTarget {
    pub fn new(format: OutputFormat, path: impl Into<PathBuf>) -> Self {
        Self {
            format,
            path: path.into(),
        }
    }
}

/// Outcome of [`write_outputs`].
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written successfully, in target order.
    pub written: Vec<PathBuf>,
    /// Failures skipped under [`OutputPolicy::BestEffort`].
    pub failures: Vec<ExportError>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Write every target in order.
///
/// Under [`OutputPolicy::FailFast`] the first failure is returned and later
/// targets are not attempted. Under [`OutputPolicy::BestEffort`] each failure
/// is logged and collected in the report.
pub fn write_outputs(
    tree: &FloorplanTree,
    targets: &[OutputTarget],
    options: &ExportOptions,
) -> Result<ExportReport, ExportError> {
    let mut report = ExportReport::default();

    for target in targets {
        match write_target(tree, target) {
            Ok(()) => {
                debug!("wrote {} output to {}", target.format.name(), target.path.display());
                report.written.push(target.path.clone());
            }
            Err(err) => match options.policy {
                OutputPolicy::FailFast => return Err(err),
                OutputPolicy::BestEffort => {
                    info!("skipping {} output: {}", target.format.name(), err);
                    report.failures.push(err);
                }
            },
        }
    }

    Ok(report)
}

fn write_target(tree: &FloorplanTree, target: &OutputTarget) -> Result<(), ExportError> {
    require_stage(tree, target.format.required_stage())?;

    let file = File::create(&target.path).map_err(|source| ExportError::Open {
        path: target.path.clone(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    let with_path = |err: ExportError| match err {
        ExportError::Write(source) => ExportError::Io {
            path: target.path.clone(),
            source,
        },
        other => other,
    };
    target.format.write(tree, &mut out).map_err(with_path)?;
    out.flush().map_err(|source| ExportError::Io {
        path: target.path.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_parser::{parse_str, BuildOptions};
    use std::fs;

    fn solved() -> FloorplanTree {
        let mut tree = parse_str("V 1(2,3) H 2(4,5) 3(6,7)", &BuildOptions::default()).unwrap();
        floorplan_layout::solve(&mut tree).unwrap();
        tree
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(OutputPolicy::from_name("fail-fast"), Some(OutputPolicy::FailFast));
        assert_eq!(OutputPolicy::from_name(" Best-Effort "), Some(OutputPolicy::BestEffort));
        assert_eq!(OutputPolicy::from_name("sometimes"), None);
        assert_eq!(OutputPolicy::default(), OutputPolicy::BestEffort);
    }

    #[test]
    fn test_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let targets = vec![
            OutputTarget::new(OutputFormat::PostOrder, dir.path().join("out1")),
            OutputTarget::new(OutputFormat::Dimensions, dir.path().join("out2")),
            OutputTarget::new(OutputFormat::Packing, dir.path().join("out3")),
        ];

        let report = write_outputs(&solved(), &targets, &ExportOptions::default()).unwrap();
        assert!(report.is_complete());
        assert_eq!(report.written.len(), 3);
        assert_eq!(
            fs::read_to_string(dir.path().join("out3")).unwrap(),
            "1((2,3)(0,0))\n2((4,5)(2,7))\n3((6,7)(2,0))\n"
        );
    }

    #[test]
    fn test_best_effort_skips_failed_output() {
        let dir = tempfile::tempdir().unwrap();
        let targets = vec![
            OutputTarget::new(OutputFormat::PostOrder, dir.path().join("missing/out1")),
            OutputTarget::new(OutputFormat::Dimensions, dir.path().join("out2")),
        ];

        let report = write_outputs(&solved(), &targets, &ExportOptions::default()).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(matches!(report.failures[0], ExportError::Open { .. }));
        assert_eq!(report.written, vec![dir.path().join("out2")]);
    }

    #[test]
    fn test_fail_fast_stops() {
        let dir = tempfile::tempdir().unwrap();
        let targets = vec![
            OutputTarget::new(OutputFormat::PostOrder, dir.path().join("missing/out1")),
            OutputTarget::new(OutputFormat::Dimensions, dir.path().join("out2")),
        ];
        let options = ExportOptions {
            policy: OutputPolicy::FailFast,
        };

        let err = write_outputs(&solved(), &targets, &options).unwrap_err();
        assert!(matches!(err, ExportError::Open { .. }));
        assert!(!dir.path().join("out2").exists());
    }

    #[test]
    fn test_unsolved_tree_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let tree = parse_str("H 1(1,1) 2(2,2)", &BuildOptions::default()).unwrap();
        let path = dir.path().join("packing");
        let targets = vec![OutputTarget::new(OutputFormat::Packing, &path)];

        let report = write_outputs(&tree, &targets, &ExportOptions::default()).unwrap();
        assert!(matches!(report.failures[0], ExportError::NotSolved { .. }));
        assert!(!path.exists());
    }
}
