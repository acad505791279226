use clap::{Parser, Subcommand, ValueEnum};
use loansim::application::simulator::{Applicant, LoanRequest, LoanSimulator};
use loansim::config::AppConfig;
use loansim::domain::category::{AgeCategory, ProfessionalCategory};
use loansim::domain::loan::RateSource;
use loansim::domain::ports::{RateProviderBox, SimulationStoreBox};
use loansim::domain::rate::{ApplicantProfile, RateEngine};
use loansim::error::LoanError;
use loansim::infrastructure::http_rate::HttpRateProvider;
use loansim::infrastructure::in_memory::InMemorySimulationStore;
use loansim::infrastructure::local_rate::LocalRateProvider;
use loansim::interfaces::csv::simulation_writer::SimulationWriter;
use loansim::interfaces::json::{SimulationView, write_json};
use miette::Result;
use rust_decimal::Decimal;
use serde_json::json;
use std::io;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the persistent history database. Defaults to ./loansim.db.
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// JSON configuration file overriding the default rate settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the base annual rate (percent)
    #[arg(long, global = true)]
    base_rate: Option<Decimal>,

    /// Resolve rates through a remote rate service instead of in process
    #[arg(long, global = true)]
    rate_api_url: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryKind {
    Age,
    Professional,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the annual rate for an applicant profile
    Rate {
        #[arg(long)]
        age: AgeCategory,
        #[arg(long)]
        profession: ProfessionalCategory,
        #[arg(long)]
        income: Decimal,
    },
    /// List age or professional categories with their modifiers
    Categories {
        #[arg(value_enum)]
        kind: CategoryKind,
    },
    /// Show the active rate configuration
    Config,
    /// Compute a loan, optionally saving it to the history
    Loan {
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        years: u32,
        /// Annual rate in percent. Derived from the profile when absent.
        #[arg(long)]
        rate: Option<Decimal>,
        #[arg(long)]
        age: Option<AgeCategory>,
        #[arg(long)]
        profession: Option<ProfessionalCategory>,
        #[arg(long)]
        income: Option<Decimal>,
        /// Persist the simulation (requires names and the full profile)
        #[arg(long)]
        save: bool,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },
    /// List saved simulations, newest first
    History {
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show one saved simulation
    Show { id: u64 },
    /// Delete one saved simulation
    Delete { id: u64 },
}

fn report(err: LoanError) -> miette::Report {
    miette::miette!("{}", err.public_message())
}

#[cfg(feature = "storage-rocksdb")]
const DEFAULT_DB_PATH: &str = "loansim.db";

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> Result<SimulationStoreBox> {
    use loansim::infrastructure::rocksdb::RocksDBStore;

    let path = db_path.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
    debug!(path = %path.display(), "opening history database");
    let store = RocksDBStore::open(path).map_err(report)?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> Result<SimulationStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(Box::new(InMemorySimulationStore::new()))
}

/// Wires the rate provider and, when the command reads or writes history, the store.
/// Commands that never touch history get a throwaway in-memory store.
fn build_simulator(
    cli: &Cli,
    config: &AppConfig,
    engine: RateEngine,
    with_history: bool,
) -> Result<LoanSimulator> {
    let rates: RateProviderBox = match &cli.rate_api_url {
        Some(url) => {
            let client =
                HttpRateProvider::new(url.as_str(), config.upstream_timeout()).map_err(report)?;
            Box::new(client)
        }
        None => Box::new(LocalRateProvider::new(engine)),
    };
    let store: SimulationStoreBox = if with_history {
        open_store(cli.db_path.clone())?
    } else {
        Box::new(InMemorySimulationStore::new())
    };
    Ok(LoanSimulator::new(rates, store, config.upstream_timeout()))
}

fn profile_from(
    age: Option<AgeCategory>,
    profession: Option<ProfessionalCategory>,
    income: Option<Decimal>,
) -> Option<ApplicantProfile> {
    Some(ApplicantProfile {
        age_category: age?,
        professional_category: profession?,
        monthly_income: income?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path).map_err(report)?,
        None => AppConfig::default(),
    }
    .with_base_rate(cli.base_rate);
    config.validate().map_err(report)?;
    debug!(?config, "configuration loaded");

    let engine = RateEngine::new(config.rate.clone()).map_err(report)?;
    let stdout = io::stdout();

    match &cli.command {
        Command::Rate {
            age,
            profession,
            income,
        } => {
            let simulator = build_simulator(&cli, &config, engine, false)?;
            let profile = ApplicantProfile {
                age_category: *age,
                professional_category: *profession,
                monthly_income: *income,
            };
            let quote = simulator.quote_rate(&profile).await.map_err(report)?;
            write_json(stdout.lock(), &quote).map_err(report)?;
        }
        Command::Categories { kind } => {
            let simulator = build_simulator(&cli, &config, engine, false)?;
            let categories = match kind {
                CategoryKind::Age => simulator.age_categories().await,
                CategoryKind::Professional => simulator.professional_categories().await,
            }
            .map_err(report)?;
            write_json(stdout.lock(), &categories).map_err(report)?;
        }
        Command::Config => {
            write_json(stdout.lock(), &config).map_err(report)?;
        }
        Command::Loan {
            amount,
            years,
            rate,
            age,
            profession,
            income,
            save,
            first_name,
            last_name,
        } => {
            let profile = profile_from(*age, *profession, *income);
            let request = LoanRequest {
                amount: *amount,
                duration_years: *years,
                rate: RateSource::from_parts(*rate, profile).map_err(report)?,
            };

            if *save {
                let profile = profile.ok_or_else(|| {
                    report(LoanError::ValidationError(
                        "age and professional categories are required".to_string(),
                    ))
                })?;
                let applicant = Applicant {
                    first_name: first_name.clone().unwrap_or_default(),
                    last_name: last_name.clone().unwrap_or_default(),
                    profile,
                };
                let simulator = build_simulator(&cli, &config, engine, true)?;
                let (id, outcome) = simulator
                    .simulate_and_save(&request, applicant)
                    .await
                    .map_err(report)?;
                let body = json!({ "id": id, "loan": outcome.loan, "rate": outcome.rate });
                write_json(stdout.lock(), &body).map_err(report)?;
            } else {
                let simulator = build_simulator(&cli, &config, engine, false)?;
                let outcome = simulator.simulate(&request).await.map_err(report)?;
                let body = json!({ "loan": outcome.loan, "rate": outcome.rate });
                write_json(stdout.lock(), &body).map_err(report)?;
            }
        }
        Command::History { limit, format } => {
            let simulator = build_simulator(&cli, &config, engine, true)?;
            let records = simulator
                .history(limit.unwrap_or(config.history_limit))
                .await
                .map_err(report)?;
            match format {
                OutputFormat::Json => {
                    let views: Vec<SimulationView> =
                        records.iter().map(SimulationView::from).collect();
                    write_json(stdout.lock(), &views).map_err(report)?;
                }
                OutputFormat::Csv => {
                    SimulationWriter::new(stdout.lock())
                        .write_records(&records)
                        .map_err(report)?;
                }
            }
        }
        Command::Show { id } => {
            let simulator = build_simulator(&cli, &config, engine, true)?;
            let record = simulator.get(*id).await.map_err(report)?;
            write_json(stdout.lock(), &SimulationView::from(&record)).map_err(report)?;
        }
        Command::Delete { id } => {
            let simulator = build_simulator(&cli, &config, engine, true)?;
            simulator.delete(*id).await.map_err(report)?;
            write_json(stdout.lock(), &json!({ "deleted": id })).map_err(report)?;
        }
    }

    Ok(())
}
