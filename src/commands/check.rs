use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::task::JoinSet;
use tracing::{debug, info};

use unitlint::Validator;
use unitlint::config::LintConfig;
use unitlint::loader::{self, UnitInput};
use unitlint::output::{self, CheckedFile, Format};

/// Arguments for the `unitlint check` subcommand.
#[derive(Debug, Default, Args)]
pub struct CheckArgs {
    /// Unit files or directories to check (`-` reads standard input) [default: .]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<Format>,

    /// Exit with status 1 when any warning is reported
    #[arg(long)]
    pub strict: bool,

    /// Path to a config file (defaults to .unitlint.yml when present)
    #[arg(short, long, env = "UNITLINT_CONFIG")]
    pub config: Option<PathBuf>,
}

pub async fn check_command(args: CheckArgs) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = LintConfig::discover(args.config.as_deref(), &cwd)?;
    let format = args.format.or(config.format).unwrap_or_default();
    let strict = args.strict || config.strict.unwrap_or(false);

    let paths = if args.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.paths
    };
    let inputs = loader::collect_inputs(&paths)?;
    info!("Checking {} unit file(s)", inputs.len());

    let validator = Validator::with_registry(config.registry());
    let files = check_inputs(inputs, validator).await?;

    let mut stdout = std::io::stdout().lock();
    output::get_formatter(format).write(&files, &mut stdout)?;

    let total: usize = files.iter().map(|file| file.diagnostics.len()).sum();
    if strict && total > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Read and validate every input on the blocking pool, keeping input order
async fn check_inputs(inputs: Vec<UnitInput>, validator: Validator) -> Result<Vec<CheckedFile>> {
    let mut tasks = JoinSet::new();

    for (index, input) in inputs.into_iter().enumerate() {
        let validator = validator.clone();
        tasks.spawn_blocking(move || {
            let source = input.read()?;
            let diagnostics = validator.validate_str(&source.content);
            debug!(
                "{}: {} diagnostic(s)",
                source.path.display(),
                diagnostics.len()
            );
            Ok::<_, unitlint::LintError>((
                index,
                CheckedFile {
                    path: source.path,
                    content: source.content,
                    diagnostics,
                },
            ))
        });
    }

    let mut checked = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, file) = joined.context("Validation task failed")??;
        checked.push((index, file));
    }
    checked.sort_by_key(|(index, _)| *index);

    Ok(checked.into_iter().map(|(_, file)| file).collect())
}
