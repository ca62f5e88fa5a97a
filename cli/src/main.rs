//! CLI entrypoint for multifill
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use multifill_application::{CheckTaskUseCase, ShowProblemInput, ShowProblemUseCase};
use multifill_domain::{ConfigIssue, MultifillProblem, ProblemContent, ScoreSpec, SubtaskSpec};
use multifill_infrastructure::{ConfigLoader, FileConfig, FsTaskRepository};
use multifill_presentation::{Cli, Command, ConsoleFormatter, formatter_for, set_color};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when no -v is given
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    debug!(?config, "Loaded configuration");

    let issues = config.validate();
    for issue in &issues {
        warn!(code = ?issue.code, "{}", issue.message);
    }

    set_color(config.output.color && !cli.no_color);
    let format = cli.output.map(Into::into).unwrap_or(config.output.format);
    let formatter = formatter_for(format);

    let Some(command) = cli.command else {
        bail!("No command given. Run `multifill --help` for usage.");
    };

    match command {
        Command::Parse { spec, count } => {
            let spec = match count {
                Some(count) => SubtaskSpec::for_subtasks(&spec, count)?,
                None => SubtaskSpec::parse(&spec)?,
            };
            print(&formatter.subtask_spec(&spec));
        }

        Command::Score { spec, count } => {
            let score = match count {
                Some(count) => ScoreSpec::for_subtasks(&spec, count)?,
                None => ScoreSpec::parse(&spec)?,
            };
            print(&formatter.score_spec(&score, count));
        }

        Command::Sample {
            spec,
            problem,
            seed,
            count,
        } => {
            let spec = SubtaskSpec::for_subtasks(&spec, count)?;
            let ids = spec.sample(&problem, &seed);
            print(&formatter.sample(&problem, &seed, &ids));
        }

        Command::Check { tasks } => {
            // === Dependency Injection ===
            let repository = task_repository(&config, &issues)?;
            let use_case = CheckTaskUseCase::new(repository);

            let reports = if tasks.is_empty() {
                use_case.execute_all()?
            } else {
                tasks
                    .iter()
                    .map(|task| use_case.execute(task))
                    .collect::<Result<Vec<_>, _>>()?
            };
            print(&formatter.task_reports(&reports));

            let failed = reports.iter().filter(|r| !r.is_ok()).count();
            if failed > 0 {
                bail!("{} of {} tasks failed validation", failed, reports.len());
            }
        }

        Command::Show {
            task,
            problem,
            seed,
        } => {
            // === Dependency Injection ===
            let repository = task_repository(&config, &issues)?;
            let use_case = ShowProblemUseCase::new(repository);

            let output = use_case.execute(ShowProblemInput::new(task, problem, seed))?;
            print(&formatter.problem(&output));
        }

        Command::Normalize { file } => {
            let content = normalize_form(&file)?;
            print(&formatter.problem_content(&content));
        }
    }

    Ok(())
}

/// Build the filesystem repository, refusing configurations with errors
fn task_repository(config: &FileConfig, issues: &[ConfigIssue]) -> Result<Arc<FsTaskRepository>> {
    if issues.iter().any(ConfigIssue::is_error) {
        eprint!("{}", ConsoleFormatter::format_config_issues(issues));
        bail!("Invalid configuration");
    }

    info!(
        root = %config.tasks.root.display(),
        descriptor = %config.tasks.descriptor,
        "Using task directory"
    );
    Ok(Arc::new(FsTaskRepository::new(
        config.tasks.root.clone(),
        config.tasks.descriptor.clone(),
    )))
}

/// Read a studio form file and normalise it, warning when the result would not load
fn normalize_form(path: &Path) -> Result<ProblemContent> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let form: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} as JSON", path.display()))?;

    let content = ProblemContent::from_studio_form(&form)?;

    let problem_id = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Err(e) = MultifillProblem::new(problem_id, &content) {
        warn!("Normalised problem would not load: {}", e);
    }

    Ok(content)
}

fn print(output: &str) {
    println!("{}", output.trim_end());
}
