//! Resume recommender: resume profile extraction and job recommendations

use clap::Parser;
use log::{error, info};
use resume_recommender::cli::{self, Cli, Commands, ConfigAction};
use resume_recommender::config::{Config, OutputConfig, OutputFormat};
use resume_recommender::error::{RecommenderError, Result};
use resume_recommender::input::{InputManager, JobCatalogLoader};
use resume_recommender::output::{save_report_to_file, AnalysisReport, ReportGenerator, ReportMetadata};
use resume_recommender::ranking::RankingPolicy;
use resume_recommender::service::ResumeRecommender;
use std::path::Path;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        if e.is_user_actionable() {
            eprintln!("⚠️  {}", e);
            process::exit(2);
        }
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Parse { resume, output, save } => {
            info!("Starting resume parsing");
            let started = Instant::now();

            let output_format = resolve_output_format(output.as_deref(), &config)?;
            let text = read_resume(&resume).await?;

            let recommender = ResumeRecommender::from_config(&config)?;
            let profile = recommender.parse(&text)?;

            let metadata = ReportMetadata::new(resume.display().to_string(), elapsed_ms(started));
            let report = AnalysisReport::from_profile(profile, metadata);

            let save_path = cli::resolve_save_path(save, &resume, &output_format);
            emit_report(&report, &output_format, &config.output, false, save_path.as_deref())?;
        }

        Commands::Recommend {
            resume,
            jobs,
            top,
            ratio_only,
            output,
            save,
            detailed,
        } => {
            info!("Starting job recommendation");
            let started = Instant::now();

            let output_format = resolve_output_format(output.as_deref(), &config)?;
            cli::validate_file_extension(&jobs, &["csv"])
                .map_err(|e| RecommenderError::InvalidInput(format!("Job catalog file: {}", e)))?;

            let top_n = top.unwrap_or(config.ranking.top_n);
            if top_n == 0 {
                return Err(RecommenderError::InvalidInput(
                    "--top must be at least 1".to_string(),
                ));
            }
            if ratio_only {
                config.ranking.policy = RankingPolicy::Ratio;
            }

            let text = read_resume(&resume).await?;
            let catalog = JobCatalogLoader::load(&jobs).await?;

            let recommender = ResumeRecommender::from_config(&config)?;
            let analysis = recommender.analyze(&text, &catalog, Some(top_n))?;

            let metadata = ReportMetadata::new(resume.display().to_string(), elapsed_ms(started))
                .with_job_catalog(jobs.display().to_string(), catalog.len());
            let report = AnalysisReport::from_analysis(analysis, metadata);

            let save_path = cli::resolve_save_path(save, &resume, &output_format);
            emit_report(&report, &output_format, &config.output, detailed, save_path.as_deref())?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    RecommenderError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn read_resume(resume: &Path) -> Result<String> {
    let mut input_manager = InputManager::new();
    input_manager.extract_text(resume).await
}

fn resolve_output_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(RecommenderError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn emit_report(
    report: &AnalysisReport,
    format: &OutputFormat,
    output_config: &OutputConfig,
    detailed: bool,
    save: Option<&Path>,
) -> Result<()> {
    let generator = ReportGenerator::from_config(output_config, detailed);
    println!("{}", generator.generate_report(report, format)?);

    if let Some(path) = save {
        let plain = OutputConfig {
            color_output: false,
            ..output_config.clone()
        };
        let content = ReportGenerator::from_config(&plain, detailed).generate_report(report, format)?;
        save_report_to_file(&content, path)?;
        println!("💾 Report saved to {}", path.display());
    }

    Ok(())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
