//! CLI interface for the resume recommender

use crate::config::OutputFormat;
use crate::output::suggest_filename;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-recommender")]
#[command(about = "Extract a candidate profile from a resume and recommend matching jobs")]
#[command(long_about = "Parse a resume (PDF, TXT, MD) into skills, graduation year and experience, then rank a CSV job catalog by skill similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract skills, batch year and experience from a resume
    Parse {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json, markdown (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file (named after the resume when no path is given)
        #[arg(short, long, num_args = 0..=1)]
        save: Option<Option<PathBuf>>,
    },

    /// Recommend jobs from a CSV catalog for a resume
    Recommend {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job catalog CSV with `job_title` and `skills` columns
        #[arg(short, long)]
        jobs: PathBuf,

        /// Number of recommendations to return
        #[arg(short, long)]
        top: Option<usize>,

        /// Rank by skill overlap ratio only
        #[arg(long)]
        ratio_only: bool,

        /// Output format: console, json, markdown (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file (named after the resume when no path is given)
        #[arg(short, long, num_args = 0..=1)]
        save: Option<Option<PathBuf>>,

        /// List every recommendation and matching skill
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

/// Where `--save` writes: the given path, or `<resume>_recommendations.<ext>`
/// in the working directory when the flag has no value
pub fn resolve_save_path(
    save: Option<Option<PathBuf>>,
    resume: &Path,
    format: &OutputFormat,
) -> Option<PathBuf> {
    save.map(|path| {
        path.unwrap_or_else(|| {
            PathBuf::from(suggest_filename(format, &resume.to_string_lossy(), false))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend() {
        let cli = Cli::parse_from([
            "resume-recommender",
            "recommend",
            "--resume",
            "cv.pdf",
            "--jobs",
            "jobs.csv",
            "--top",
            "3",
            "--ratio-only",
            "-v",
        ]);

        assert!(cli.verbose);
        match cli.command {
            Commands::Recommend { top, ratio_only, jobs, output, .. } => {
                assert_eq!(top, Some(3));
                assert!(ratio_only);
                assert_eq!(jobs, PathBuf::from("jobs.csv"));
                assert!(output.is_none());
            }
            _ => panic!("expected recommend command"),
        }
    }

    #[test]
    fn test_save_without_path_uses_suggested_name() {
        let cli = Cli::parse_from([
            "resume-recommender",
            "parse",
            "--resume",
            "resumes/jane.pdf",
            "--save",
        ]);

        match cli.command {
            Commands::Parse { resume, save, .. } => {
                assert_eq!(save, Some(None));
                assert_eq!(
                    resolve_save_path(save, &resume, &OutputFormat::Json),
                    Some(PathBuf::from("jane_recommendations.json"))
                );
            }
            _ => panic!("expected parse command"),
        }
    }

    #[test]
    fn test_save_with_explicit_path() {
        let cli = Cli::parse_from([
            "resume-recommender",
            "recommend",
            "-r",
            "cv.txt",
            "-j",
            "jobs.csv",
            "-s",
            "out/report.md",
        ]);

        match cli.command {
            Commands::Recommend { resume, save, .. } => {
                assert_eq!(
                    resolve_save_path(save, &resume, &OutputFormat::Markdown),
                    Some(PathBuf::from("out/report.md"))
                );
            }
            _ => panic!("expected recommend command"),
        }
        assert_eq!(resolve_save_path(None, Path::new("cv.txt"), &OutputFormat::Json), None);
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("cv.png"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("cv"), &["pdf"]).is_err());
    }
}
