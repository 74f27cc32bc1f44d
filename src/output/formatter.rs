//! Output formatters: colored console, JSON and Markdown

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::ranking::Recommendation;
use colored::{Color, Colorize};
use std::path::Path;

/// Skills printed per line by the console formatter
const SKILLS_PER_ROW: usize = 3;

/// Trait for rendering an analysis report
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
    display_limit: usize,
    matching_preview: usize,
}

/// JSON formatter for API integration and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        let defaults = OutputConfig::default();
        Self {
            use_colors,
            detailed,
            display_limit: defaults.display_limit,
            matching_preview: defaults.matching_preview,
        }
    }

    pub fn with_limits(mut self, display_limit: usize, matching_preview: usize) -> Self {
        self.display_limit = display_limit;
        self.matching_preview = matching_preview;
        self
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score(&self, score: f64) -> String {
        let color = match score {
            s if s >= 75.0 => Color::Green,
            s if s >= 50.0 => Color::Yellow,
            s if s >= 25.0 => Color::BrightYellow,
            _ => Color::Red,
        };
        let text = format!("{:.2}%", score);

        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text
        }
    }

    fn format_skill_rows(&self, skills: &[String]) -> String {
        let mut output = String::new();
        for row in skills.chunks(SKILLS_PER_ROW) {
            let last = row.len() - 1;
            let cells: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, skill)| {
                    let cell = format!("• {}", skill);
                    // Pad the plain text; escape codes must not count toward the width
                    let cell = if i < last { format!("{:<24}", cell) } else { cell };
                    self.colorize(&cell, Color::Cyan)
                })
                .collect();
            output.push_str(&format!("  {}\n", cells.join(" ")));
        }
        output
    }

    fn format_matching(&self, rec: &Recommendation) -> String {
        let limit = if self.detailed {
            rec.matching_skills.len()
        } else {
            self.matching_preview
        };

        let shown: Vec<&str> = rec.matching_skills.iter().take(limit).map(String::as_str).collect();
        let mut line = format!("     Matching: {}", shown.join(", "));

        let hidden = rec.matching_skills.len().saturating_sub(shown.len());
        if hidden > 0 {
            line.push_str(&format!(" ...and {} more", hidden));
        }
        line.push('\n');
        line
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let profile = report.profile();

        output.push_str(&self.format_header("📄 RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Resume: {} | Generated: {} | Processing time: {}ms\n",
            report.metadata.resume_file,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Candidate Profile", 2));
        output.push_str(&format!(
            "Batch year: {}\n",
            self.colorize(profile.batch_year.as_deref().unwrap_or("Not found"), Color::Cyan)
        ));
        output.push_str(&format!(
            "Experience: {}\n",
            self.colorize(&profile.experience.to_string(), Color::Cyan)
        ));

        output.push_str(&self.format_header(&format!("Skills ({})", profile.skills.len()), 3));
        if profile.skills.is_empty() {
            output.push_str(&format!("  {}\n", self.colorize("No skills detected", Color::Yellow)));
        } else {
            output.push_str(&self.format_skill_rows(&profile.skills));
        }

        if report.has_recommendations() {
            output.push_str(&self.format_header("💼 Recommended Jobs", 2));
            if let Some(method) = report.ranking_method {
                output.push_str(&format!("Ranked by {}\n", method));
            }

            let recommendations = report.recommendations();
            if recommendations.is_empty() {
                output.push_str(&format!(
                    "{}\n",
                    self.colorize("No matching jobs found for the detected skills", Color::Yellow)
                ));
            }

            let limit = if self.detailed {
                recommendations.len()
            } else {
                self.display_limit
            };

            for (i, rec) in recommendations.iter().take(limit).enumerate() {
                output.push_str(&format!(
                    "  {}. {} [{}]\n",
                    i + 1,
                    self.colorize(&rec.title, Color::White),
                    self.format_score(rec.similarity_score)
                ));
                if !rec.matching_skills.is_empty() {
                    output.push_str(&self.format_matching(rec));
                }
            }

            if recommendations.len() > limit {
                output.push_str(&format!(
                    "  ... {} more (use --detailed to list all)\n",
                    recommendations.len() - limit
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|")
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let profile = report.profile();

        output.push_str("# 📄 Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            let resume_name = Path::new(&report.metadata.resume_file)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| report.metadata.resume_file.clone());
            output.push_str(&format!("**Resume:** `{}`", resume_name));
            if let Some(jobs) = &report.metadata.job_catalog_file {
                output.push_str(&format!(" | **Job catalog:** `{}`", jobs));
            }
            output.push_str("\n\n");
        }

        output.push_str("## Candidate Profile\n\n");
        output.push_str("| Field | Value |\n");
        output.push_str("|-------|-------|\n");
        output.push_str(&format!(
            "| Batch year | {} |\n",
            profile.batch_year.as_deref().unwrap_or("Not found")
        ));
        output.push_str(&format!("| Experience | {} |\n", profile.experience));
        output.push_str(&format!("| Skills found | {} |\n\n", profile.skills.len()));

        output.push_str("### Skills\n\n");
        if profile.skills.is_empty() {
            output.push_str("_No skills detected_\n\n");
        } else {
            for skill in &profile.skills {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        if report.has_recommendations() {
            output.push_str("## Recommended Jobs\n\n");
            if let Some(method) = report.ranking_method {
                output.push_str(&format!("Ranked by {}.\n\n", method));
            }

            let recommendations = report.recommendations();
            if recommendations.is_empty() {
                output.push_str("_No matching jobs found._\n");
            } else {
                output.push_str("| # | Job | Score | Matching skills |\n");
                output.push_str("|---|-----|-------|-----------------|\n");
                for (i, rec) in recommendations.iter().enumerate() {
                    output.push_str(&format!(
                        "| {} | {} | {:.2}% | {} |\n",
                        i + 1,
                        Self::escape_cell(&rec.title),
                        rec.similarity_score,
                        Self::escape_cell(&rec.matching_skills.join(", "))
                    ));
                }
            }
            output.push('\n');
        }

        output.push_str("---\n");
        output.push_str(&format!("*Generated by resume-recommender v{}*\n", report.metadata.tool_version));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn from_config(config: &OutputConfig, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output, detailed)
                .with_limits(config.display_limit, config.matching_preview),
            json_formatter: JsonFormatter::new(config.pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

// Utility functions for saving reports
pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_recommendations{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_recommendations{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_recommendations{}.md", base_name, timestamp_suffix),
    }
}
