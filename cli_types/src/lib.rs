use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueMode {
    /// Elapsed minutes of each record
    Times,
    /// Average speed of each record in miles per hour
    Speed,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop loading at the first malformed header, row or block
    Abort,
    /// Log and skip malformed rows and blocks, keep loading the rest
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            _ => Err(anyhow!(
                "Invalid error policy: {}. Valid values are 'abort' or 'skip'",
                s
            )),
        }
    }
}

#[derive(Parser)]
#[command(version, name = "record-progression")]
pub struct Cli {
    /// Increase verbosity level (can be specified multiple times.) The first level sets level
    /// "info", second sets level "debug", and third sets level "trace" for the logger.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct CliInput {
    /// World record CSV file. Falls back to `input.path` from the configuration
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// How to treat malformed headers, rows and blocks while loading.
    /// Falls back to `input.on_error` from the configuration, then to "abort"
    #[arg(long, value_enum)]
    pub on_error: Option<ErrorPolicy>,
}

#[derive(Args)]
pub struct CliPlotTarget {
    /// Only plot the records of this gender. Falls back to `plot.gender`, then to "male"
    #[arg(short, long, value_parser=parse_spaceless_string)]
    pub gender: Option<String>,

    /// Directory the charts are written to. Falls back to `plot.output_dir`, then to "."
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plot the record progression of every distance as elapsed minutes over years,
    /// one chart per distance
    Times {
        #[command(flatten)]
        input: CliInput,

        #[command(flatten)]
        target: CliPlotTarget,
    },

    /// Plot the record progression of every known distance as speed (mph) over years,
    /// all distances in a single multi-panel chart
    Speeds {
        #[command(flatten)]
        input: CliInput,

        #[command(flatten)]
        target: CliPlotTarget,

        /// Year up to which the current record is extended in each panel.
        /// Falls back to `plot.present`, then to 2011.4
        #[arg(long)]
        present: Option<f64>,
    },

    /// Write the parsed record series as tab-separated values or as an HTML chart.
    /// The format is inferred from the output file extension (".csv" or ".html").
    /// Use "-" to write tab-separated values to stdout.
    Export {
        #[command(flatten)]
        input: CliInput,

        /// Which value to compute for each record
        #[arg(short, long, value_enum, default_value = "times")]
        mode: ValueMode,

        /// Output file
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },

    /// Simulate why records keep falling: every person's ability is the weakest of
    /// several logistic factors and only ever larger maxima become new records
    Simulate {
        /// Number of simulated persons
        #[arg(short = 'n', long, value_parser=clap::value_parser!(u32).range(1..), default_value = "100000")]
        trials: u32,

        /// Number of normally distributed factors per person
        #[arg(short, long, value_parser=clap::value_parser!(u32).range(1..), default_value = "10")]
        factors: u32,

        /// Seed for a reproducible simulation
        #[arg(short, long)]
        seed: Option<u64>,

        /// Directory the charts are written to. Falls back to `plot.output_dir`, then to "."
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Show the configuration files that were searched and the resolved settings
    Config {},
}

fn parse_spaceless_string(s: &str) -> Result<String> {
    if s.split_whitespace().count() > 1 {
        Err(anyhow!("invalid string/key/value: found space in '{}'", s))
    } else {
        Ok(String::from(s))
    }
}
