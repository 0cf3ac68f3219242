use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use samediff::config::{config_path_from_env, seed_from_env, session_rng, ExperimentConfig};
use samediff::generator::{generate_trial_specs, TrialComposition};
use samediff::response::{ResponseRecord, ResponseSummary};
use samediff::timeline::{assemble_trials, Section};
use samediff::{Result, TrialError};

#[derive(Debug, Parser)]
#[command(
    name = "samediff",
    about = "Generate same/different trial sequences and score responses",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write the numbered trial-spec list as JSON.
    Generate {
        /// Experiment config (falls back to SAMEDIFF_CONFIG).
        #[arg(long)]
        config: Option<PathBuf>,
        /// RNG seed (falls back to SAMEDIFF_SEED, then OS entropy).
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Generate specs and expand them into presentation screens.
    Timeline {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = SectionArg::Experiment)]
        section: SectionArg,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Score a JSON array of response records.
    Score {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        yes: String,
        #[arg(long)]
        no: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SectionArg {
    Demo,
    Practice,
    Experiment,
}

impl From<SectionArg> for Section {
    fn from(s: SectionArg) -> Self {
        match s {
            SectionArg::Demo => Section::Demo,
            SectionArg::Practice => Section::Practice,
            SectionArg::Experiment => Section::Experiment,
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<ExperimentConfig> {
    let path = path.or_else(config_path_from_env).ok_or_else(|| {
        TrialError::Config("no --config given and SAMEDIFF_CONFIG unset".to_string())
    })?;
    ExperimentConfig::load(&path)
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            config,
            seed,
            output,
        } => {
            let config = load_config(config)?;
            let mut rng = session_rng(seed.or_else(seed_from_env));
            let specs =
                generate_trial_specs(&config.stim_fnames, &config.generation_params(), &mut rng)?;
            let composition = TrialComposition::of(&specs);
            info!(counts = ?composition.counts, "composition");
            write_json(&specs, output.as_deref())
        }
        Commands::Timeline {
            config,
            section,
            seed,
            output,
        } => {
            #[derive(Serialize)]
            struct Session<'a> {
                params: &'a samediff::config::ExperimentParams,
                trials: Vec<samediff::timeline::TrialDescriptor>,
            }

            let config = load_config(config)?;
            let mut rng = session_rng(seed.or_else(seed_from_env));
            let params = config.resolve(&mut rng)?;
            let specs =
                generate_trial_specs(&config.stim_fnames, &config.generation_params(), &mut rng)?;
            let trials = assemble_trials(
                section.into(),
                &specs,
                &params,
                &config.mask_fnames,
                &mut rng,
            )?;
            info!(
                yes = %params.key_mapping.yes,
                no = %params.key_mapping.no,
                screens = trials.len(),
                "assembled session"
            );
            write_json(
                &Session {
                    params: &params,
                    trials,
                },
                output.as_deref(),
            )
        }
        Commands::Score {
            input,
            yes,
            no,
            output,
        } => {
            let json = std::fs::read_to_string(&input)?;
            let mut records: Vec<ResponseRecord> = serde_json::from_str(&json)?;
            for record in records.iter_mut() {
                record.assess(Some(yes.as_str()), Some(no.as_str()))?;
            }
            let summary = ResponseSummary::from_records(&records);
            info!(
                assessed = summary.assessed(),
                accuracy = summary.accuracy(),
                hit_rate = summary.hit_rate(),
                false_alarm_rate = summary.false_alarm_rate(),
                "scored responses"
            );
            write_json(&records, output.as_deref())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(Cli::parse()) {
        eprintln!("{error}");
        std::process::exit(1);
    }
}
