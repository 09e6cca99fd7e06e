use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::Level;

use record_progression_cli_types::{Cli, CliInput, CliPlotTarget, Commands};

use crate::charts::{plot_speeds, plot_times};
use crate::config::{find_local_config_path, user_config_path, Settings};
use crate::data::{Dataset, ValueMode};
use crate::defaults::{DEFAULT_GENDER, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR, DEFAULT_PRESENT_YEAR};
use crate::loader::{load_dataset, ErrorPolicy, LoadOptions};
use crate::reporting::export;
use crate::simulation::simulate;

pub fn handle_calls() -> Result<()> {
    let cli = Cli::parse();
    let logger_level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(logger_level.as_str())).init();

    let settings = Settings::load();

    match cli.command {
        Commands::Times { input, target } => {
            let dataset = load(&input, ValueMode::Minutes, &settings)?;
            let written = plot_times(
                &dataset,
                &resolve_gender(&target, &settings),
                &resolve_output_dir(target.output_dir, &settings),
            )?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Speeds {
            input,
            target,
            present,
        } => {
            let dataset = load(&input, ValueMode::MilesPerHour, &settings)?;
            let path = plot_speeds(
                &dataset,
                &resolve_gender(&target, &settings),
                &resolve_output_dir(target.output_dir, &settings),
                present.or(settings.present).unwrap_or(DEFAULT_PRESENT_YEAR),
            )?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Export {
            input,
            mode,
            output,
        } => {
            let mode = ValueMode::from(mode);
            let dataset = load(&input, mode, &settings)?;
            export(&dataset, mode, &output)
        }
        Commands::Simulate {
            trials,
            factors,
            seed,
            output_dir,
        } => {
            let written = simulate(
                trials,
                factors,
                seed,
                &resolve_output_dir(output_dir, &settings),
            )?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Config {} => {
            print!("{}", describe_config(&settings));
            Ok(())
        }
    }
}

fn load(input: &CliInput, mode: ValueMode, settings: &Settings) -> Result<Dataset> {
    let path = input
        .input
        .clone()
        .or_else(|| settings.input_path.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));
    let options = LoadOptions {
        mode,
        policy: resolve_policy(input, settings),
    };

    log::debug!("Loading {} with {:?}", path.display(), options);
    load_dataset(&path, &options)
        .with_context(|| format!("Failed to load world records from {}", path.display()))
}

fn resolve_policy(input: &CliInput, settings: &Settings) -> ErrorPolicy {
    input
        .on_error
        .or(settings.on_error)
        .map(ErrorPolicy::from)
        .unwrap_or(ErrorPolicy::Abort)
}

fn resolve_gender(target: &CliPlotTarget, settings: &Settings) -> String {
    target
        .gender
        .clone()
        .or_else(|| settings.gender.clone())
        .unwrap_or_else(|| DEFAULT_GENDER.to_string())
}

fn resolve_output_dir(output_dir: Option<PathBuf>, settings: &Settings) -> PathBuf {
    output_dir
        .or_else(|| settings.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

fn describe_path(path: Option<PathBuf>) -> String {
    match path {
        Some(path) if path.is_file() => path.display().to_string(),
        Some(path) => format!("{} (not found)", path.display()),
        None => "(none)".to_string(),
    }
}

fn describe_config(settings: &Settings) -> String {
    let policy = match settings.on_error.map(ErrorPolicy::from).unwrap_or(ErrorPolicy::Abort) {
        ErrorPolicy::Abort => "abort",
        ErrorPolicy::Skip => "skip",
    };
    let input = settings
        .input_path
        .as_deref()
        .unwrap_or(Path::new(DEFAULT_INPUT_PATH));
    let output_dir = settings
        .output_dir
        .as_deref()
        .unwrap_or(Path::new(DEFAULT_OUTPUT_DIR));

    format!(
        "user config:  {}\n\
         local config: {}\n\
         \n\
         input.path      = {}\n\
         input.on_error  = {}\n\
         plot.gender     = {}\n\
         plot.output_dir = {}\n\
         plot.present    = {}\n",
        describe_path(user_config_path()),
        describe_path(find_local_config_path()),
        input.display(),
        policy,
        settings.gender.as_deref().unwrap_or(DEFAULT_GENDER),
        output_dir.display(),
        settings.present.unwrap_or(DEFAULT_PRESENT_YEAR),
    )
}
