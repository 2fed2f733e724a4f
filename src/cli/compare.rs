//! Compare subcommand for data-diff CLI
//!
//! Compares two sources and writes the report to stdout or a file.

use crate::config::Config;
use crate::diff::{CompareOptions, compare};
use crate::report::{ComparisonResult, write_report};
use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Arguments for the compare subcommand
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Source file (a non-file argument is compared as a literal string)
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Target file (a non-file argument is compared as a literal string)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format: json, yaml or table (default: from config, else json)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Ignore case when comparing strings
    #[arg(long)]
    pub ignore_case: bool,

    /// Paths to leave out of the comparison (comma-separated)
    ///
    /// Patterns look like `$.meta.updated`, `meta.updated`, `items[*].id`
    /// or `*.password`.
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub ignore_fields: Vec<String>,

    /// Include unchanged fields in the report
    #[arg(long)]
    pub show_unchanged: bool,
}

impl CompareArgs {
    /// Build comparison options, falling back to the configured format.
    pub fn options(&self, config: &Config) -> CompareOptions {
        let format = self.format.clone().unwrap_or_else(|| config.format.clone());
        CompareOptions::new()
            .with_ignore_case(self.ignore_case)
            .with_ignore_fields(&self.ignore_fields)
            .with_show_unchanged(self.show_unchanged)
            .with_format(format)
    }

    /// Report destination: `--output`, else the configured output file.
    pub fn output_path(&self, config: &Config) -> Option<PathBuf> {
        self.output
            .clone()
            .or_else(|| config.output_file().map(PathBuf::from))
    }
}

/// Run the compare command
pub fn run_compare(config: &Config, args: &CompareArgs) -> Result<()> {
    let options = args.options(config);
    let output = args.output_path(config);

    info!(
        source = %args.source,
        target = %args.target,
        output = ?output,
        format = %options.format,
        ignore_case = options.ignore_case,
        ignore_fields = ?args.ignore_fields,
        show_unchanged = options.show_unchanged,
        "starting comparison"
    );

    let result = compare(&args.source, &args.target, &options).context("comparison failed")?;

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create output file '{}'", path.display()))?;
            let mut writer = BufWriter::new(file);
            emit(&result, &options.format, &mut writer)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            emit(&result, &options.format, &mut writer)?;
        }
    }

    info!(equal = result.equal, "comparison completed successfully");
    Ok(())
}

fn emit<W: Write>(result: &ComparisonResult, format: &str, writer: &mut W) -> Result<()> {
    write_report(result, format, writer).context("failed to write result")?;
    writer.flush().context("failed to write result")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args() -> CompareArgs {
        CompareArgs {
            source: "a.json".to_string(),
            target: "b.json".to_string(),
            output: None,
            format: None,
            ignore_case: false,
            ignore_fields: Vec::new(),
            show_unchanged: false,
        }
    }

    #[test]
    fn test_format_falls_back_to_config() {
        let config = Config {
            format: "table".to_string(),
            ..Config::default()
        };
        assert_eq!(args().options(&config).format, "table");

        let explicit = CompareArgs {
            format: Some("yaml".to_string()),
            ..args()
        };
        assert_eq!(explicit.options(&config).format, "yaml");
    }

    #[test]
    fn test_output_falls_back_to_config() {
        let mut config = Config::default();
        assert_eq!(args().output_path(&config), None);

        config.output_file = "report.json".to_string();
        assert_eq!(args().output_path(&config), Some(PathBuf::from("report.json")));

        let explicit = CompareArgs {
            output: Some(PathBuf::from("cli.json")),
            ..args()
        };
        assert_eq!(explicit.output_path(&config), Some(PathBuf::from("cli.json")));
    }

    #[test]
    fn test_options_carry_flags() {
        let flagged = CompareArgs {
            ignore_case: true,
            show_unchanged: true,
            ignore_fields: vec!["meta".to_string(), "items[*].id".to_string()],
            ..args()
        };
        let options = flagged.options(&Config::default());
        assert!(options.ignore_case);
        assert!(options.show_unchanged);
        assert_eq!(options.ignore_fields.len(), 2);
        assert_eq!(options.format, "json");
    }

    fn file_args(temp: &TempDir) -> CompareArgs {
        let source = temp.path().join("a.json");
        let target = temp.path().join("b.json");
        std::fs::write(&source, r#"{"a": 1, "b": 2}"#).unwrap();
        std::fs::write(&target, r#"{"a": 1, "b": 3}"#).unwrap();
        CompareArgs {
            source: source.to_string_lossy().into_owned(),
            target: target.to_string_lossy().into_owned(),
            ..args()
        }
    }

    #[test]
    fn test_run_compare_writes_output_file() {
        let temp = TempDir::new().unwrap();
        let report = temp.path().join("r.json");
        let args = CompareArgs {
            output: Some(report.clone()),
            ..file_args(&temp)
        };

        run_compare(&Config::default(), &args).unwrap();

        let written: ComparisonResult =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert!(!written.equal);
        assert_eq!(written.differences.len(), 1);
        assert_eq!(written.differences[0].path, "$.b");
    }

    #[test]
    fn test_run_compare_uses_configured_output_file() {
        let temp = TempDir::new().unwrap();
        let report = temp.path().join("configured.txt");
        let config = Config {
            output_file: report.to_string_lossy().into_owned(),
            format: "table".to_string(),
            ..Config::default()
        };

        run_compare(&config, &file_args(&temp)).unwrap();

        let text = std::fs::read_to_string(&report).unwrap();
        assert!(text.starts_with("Comparison Result\n"));
        assert!(text.contains("Path: $.b\n"));
    }

    #[test]
    fn test_run_compare_rejects_unknown_format_at_write_time() {
        let temp = TempDir::new().unwrap();
        let report = temp.path().join("r.xml");
        let args = CompareArgs {
            output: Some(report.clone()),
            format: Some("xml".to_string()),
            ..file_args(&temp)
        };

        let err = run_compare(&Config::default(), &args).unwrap_err();
        let chain = format!("{:#}", err);

        assert!(chain.contains("failed to write result"));
        assert!(chain.contains("unsupported format: xml"));
        // The sink was created, then closed empty when the writer dropped
        assert_eq!(std::fs::read_to_string(&report).unwrap(), "");
    }

    #[test]
    fn test_run_compare_missing_output_dir_fails() {
        let temp = TempDir::new().unwrap();
        let args = CompareArgs {
            output: Some(temp.path().join("missing").join("r.json")),
            ..file_args(&temp)
        };

        let err = run_compare(&Config::default(), &args).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to create output file"));
    }
}
