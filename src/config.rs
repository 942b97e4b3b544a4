/*!
 * Configuration handling for filexport
 */

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::types::ExportFormat;

/// Command-line arguments for filexport
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "filexport",
    version = env!("CARGO_PKG_VERSION"),
    about = "Combine local text files into a single JSON, XML or Markdown export",
    long_about = "Reads every given file as text and renders them together as one JSON, XML or Markdown document, optionally copying the result to the system clipboard."
)]
pub struct Args {
    /// Files to export, in order
    pub paths: Vec<PathBuf>,

    /// Export format: json, xml or markdown
    #[clap(short, long, default_value = "json", value_parser = ExportFormat::parse)]
    pub format: ExportFormat,

    /// Write the export to this file instead of stdout
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Copy the export to the system clipboard
    #[clap(short, long)]
    pub clip: bool,

    /// Expand directories into the files beneath them
    #[clap(short, long)]
    pub recursive: bool,

    /// Number of threads to use for reading
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Print an extraction report on stderr
    #[clap(long)]
    pub report: bool,

    /// Log debug diagnostics
    #[clap(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Input paths, in order
    pub paths: Vec<PathBuf>,

    /// Selected export format
    pub format: ExportFormat,

    /// Output file (stdout if None)
    pub output_file: Option<PathBuf>,

    /// Copy output to clipboard
    pub clip: bool,

    /// Expand directory arguments
    pub recursive: bool,

    /// Number of threads to use for reading
    pub num_threads: usize,

    /// Print the extraction report
    pub report: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            paths: args.paths,
            format: args.format,
            output_file: args.output,
            clip: args.clip,
            recursive: args.recursive,
            num_threads: args.threads,
            report: args.report,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(!self.paths.is_empty(), Config, "no input files given");
        crate::ensure!(
            self.num_threads > 0,
            Config,
            "thread count must be at least 1"
        );

        // Check if output file directory exists
        if let Some(parent) = self.output_file.as_ref().and_then(|p| p.parent()) {
            crate::ensure!(
                parent.as_os_str().is_empty() || parent.is_dir(),
                Config,
                "Output directory not found: {}",
                parent.display()
            );
        }

        Ok(())
    }

    /// Human-readable destination of the export
    pub fn destination(&self) -> String {
        match &self.output_file {
            Some(path) => path.display().to_string(),
            None => "stdout".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileExportError;

    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Config {
        Config::from_args(Args::parse_from(
            std::iter::once("filexport").chain(args.iter().copied()),
        ))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["a.txt", "b.txt"]);

        assert_eq!(config.paths, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(config.format, ExportFormat::Json);
        assert_eq!(config.num_threads, 4);
        assert!(!config.clip);
        assert_eq!(config.destination(), "stdout");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_flag() {
        assert_eq!(parse(&["-f", "xml", "a"]).format, ExportFormat::Xml);
        assert_eq!(parse(&["--format", "md", "a"]).format, ExportFormat::Markdown);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Args::try_parse_from(["filexport", "--format", "yaml", "a.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_requires_inputs() {
        let err = parse(&[]).validate().unwrap_err();
        assert!(matches!(err, FileExportError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        assert!(parse(&["--threads", "0", "a.txt"]).validate().is_err());
    }

    #[test]
    fn test_validate_output_directory() {
        let temp_dir = tempdir().unwrap();
        let good = temp_dir.path().join("out.json");
        let bad = temp_dir.path().join("missing").join("out.json");

        let config = parse(&["-o", good.to_str().unwrap(), "a.txt"]);
        assert!(config.validate().is_ok());

        let config = parse(&["-o", bad.to_str().unwrap(), "a.txt"]);
        assert!(config.validate().is_err());

        // Bare file names resolve against the working directory
        assert!(parse(&["-o", "out.json", "a.txt"]).validate().is_ok());
    }
}
