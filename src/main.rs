use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use northwind_queries::{
    load_dataset, run_all, run_task, AppError, Config, OutputFormat, Reporter, Task,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "northwind-queries")]
#[command(
    about = "Filter, join, grouping and aggregate queries over the Northwind sample data",
    long_about = None
)]
struct Args {
    /// Dataset JSON file (the embedded sample data is used by default)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Configuration file (defaults to ./northwind.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Turnover threshold of task 1
    #[arg(long, global = true, allow_negative_numbers = true)]
    turnover: Option<f64>,

    /// Order total threshold of task 3
    #[arg(long, global = true, allow_negative_numbers = true)]
    large_order: Option<f64>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available tasks
    List,
    /// Run a single task (see `list` for task names)
    Run {
        /// Task name, e.g. 1, 2-alt or 7-group
        task: String,
    },
    /// Run every task in order
    All,
}

fn resolve_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read working directory")?;
            Config::load(&cwd)?
        }
    };

    // Command-line flags take precedence over file and environment
    if let Some(data) = &args.data {
        config.data_path = Some(data.clone());
    }
    if let Some(turnover) = args.turnover {
        config.turnover_threshold = turnover;
    }
    if let Some(large_order) = args.large_order {
        config.large_order_threshold = large_order;
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    tracing::debug!(?config, "Resolved configuration");

    let stdout = std::io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), config.format);

    if let Command::List = args.command {
        reporter.catalogue(&Task::ALL)?;
        reporter.flush()?;
        return Ok(());
    }

    // Arguments are checked before the dataset is read or anything is printed
    let params = config.task_params();
    params.validate()?;
    let task = match &args.command {
        Command::Run { task } => Some(task.parse::<Task>()?),
        _ => None,
    };

    let dataset = load_dataset(config.data_path.as_deref()).with_context(|| {
        match &config.data_path {
            Some(path) => format!("Failed to load dataset from {}", path.display()),
            None => "Failed to load embedded dataset".to_string(),
        }
    })?;

    match task {
        Some(task) => {
            run_task(task, &dataset, &params, &mut reporter)?;
        }
        None => {
            let written = run_all(&dataset, &params, &mut reporter)?;
            tracing::info!("All tasks finished, {} records written", written);
        }
    }

    reporter.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for report output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "northwind_queries=warn,northwind_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = std::io::stdout().flush();
            eprintln!("Error: {:#}", err);
            let invalid_argument = err
                .downcast_ref::<AppError>()
                .is_some_and(AppError::is_invalid_argument);
            if invalid_argument {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
