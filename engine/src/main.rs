#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use cl_calendar::SenateClass;
use congress_legislators::{
    config::Config,
    match_candidate,
    merger::{apply_new_term, assign_senate_ranks, sweep_offices, sweep_social_media},
    model::{Legislator, OfficeEntry, SocialMediaEntry, StateRank, Term, TermType},
    partition::partition,
    store::parse_sequence,
    validate, Collection, Corpus, IdentityIndex, PartialIdentity, RecordStore,
};
use tracing_subscriber::EnvFilter;

/// Maintain and check the congress-legislators collections.
#[derive(Debug, Parser)]
#[command(name = "legislators", version)]
struct Cli {
    /// Configuration file (environment variables with the CL_ prefix override it).
    #[arg(long, default_value = "config.yaml")]
    config: String,

    /// Data directory; overrides `data.dir`.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check every collection and report errors, warnings and vacancies.
    Validate {
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Re-save every collection in canonical form.
    Lint,
    /// Resolve a scraped name to a legislator.
    Match {
        name: String,
        #[arg(long)]
        bioguide: Option<String>,
        #[arg(long)]
        govtrack: Option<u32>,
        #[arg(long)]
        thomas: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        district: Option<u32>,
        #[arg(long = "class")]
        senate_class: Option<u8>,
        #[arg(long)]
        rank: Option<RankArg>,
        #[arg(long, value_enum)]
        chamber: Option<ChamberArg>,
    },
    /// Move legislators between the current and historical collections.
    Partition {
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// YAML file of new legislators to add.
        #[arg(long)]
        newcomers: Option<PathBuf>,
    },
    /// Drop offices and social media accounts of legislators no longer serving.
    Sweep,
    /// Fill in missing Senate state ranks.
    Ranks,
    /// Append a term to a legislator, carrying fields forward as `merge.*` declares.
    AddTerm {
        bioguide: String,
        /// YAML file holding the new term.
        term: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChamberArg {
    House,
    Senate,
}

impl From<ChamberArg> for TermType {
    fn from(arg: ChamberArg) -> Self {
        match arg {
            ChamberArg::House => Self::Representative,
            ChamberArg::Senate => Self::Senator,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RankArg {
    Junior,
    Senior,
}

impl From<RankArg> for StateRank {
    fn from(arg: RankArg) -> Self {
        match arg {
            RankArg::Junior => Self::Junior,
            RankArg::Senior => Self::Senior,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::load_from(&cli.config).context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level).context("invalid logging.level")?)
        .with_writer(std::io::stderr)
        .init();

    let dir = cli.data_dir.unwrap_or_else(|| PathBuf::from(&config.data.dir));
    let store = RecordStore::new(dir);
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Validate { json } => run_validate(&store, &config, today, json),
        Command::Lint => run_lint(&store),
        Command::Match {
            name,
            bioguide,
            govtrack,
            thomas,
            state,
            district,
            senate_class,
            rank,
            chamber,
        } => {
            let mut candidate = PartialIdentity::parse_name(&name);
            candidate.bioguide = bioguide;
            candidate.govtrack = govtrack;
            candidate.thomas = thomas;
            candidate.state = state;
            if let Some(chamber) = chamber {
                candidate = candidate.with_chamber(chamber.into());
            }
            if let Some(district) = district {
                candidate = candidate.with_district(district);
            }
            if let Some(class) = senate_class {
                candidate = candidate.with_senate_class(SenateClass::try_from(class)?);
            }
            if let Some(rank) = rank {
                candidate = candidate.with_state_rank(rank.into());
            }
            run_match(&store, &candidate)
        }
        Command::Partition { as_of, newcomers } => {
            let as_of = as_of.or(config.validate.as_of).unwrap_or(today);
            run_partition(&store, &config, as_of, newcomers)
        }
        Command::Sweep => run_sweep(&store),
        Command::Ranks => run_ranks(&store),
        Command::AddTerm { bioguide, term } => run_add_term(&store, &config, &bioguide, &term),
    }
}

fn run_validate(store: &RecordStore, config: &Config, today: NaiveDate, json: bool) -> anyhow::Result<ExitCode> {
    let corpus = Corpus::load(store)?;
    let report = corpus.validate(&config.validation_options(today));
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(ExitCode::from(report.exit_code()))
}

fn run_lint(store: &RecordStore) -> anyhow::Result<ExitCode> {
    for outcome in store.lint_all()? {
        let status = if outcome.rewritten { "rewritten" } else { "unchanged" };
        println!("{}: {} records, {status}", outcome.collection, outcome.records);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_match(store: &RecordStore, candidate: &PartialIdentity) -> anyhow::Result<ExitCode> {
    let current = store.load::<Legislator>(Collection::LegislatorsCurrent)?;
    let historical = store.load_or_default::<Legislator>(Collection::LegislatorsHistorical)?;
    let index = IdentityIndex::build_corpus(&current.records, &historical.records);
    let result = match_candidate(candidate, &index);
    println!("{candidate} => {result}");
    Ok(if result.unique().is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_partition(
    store: &RecordStore,
    config: &Config,
    as_of: NaiveDate,
    newcomers: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let current = store.load::<Legislator>(Collection::LegislatorsCurrent)?;
    let historical = store.load::<Legislator>(Collection::LegislatorsHistorical)?;
    let newcomers = match newcomers {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            parse_sequence::<Legislator>(Collection::LegislatorsCurrent, &text)?.records
        }
        None => Vec::new(),
    };

    let moved = match partition(&current.records, &historical.records, &newcomers, as_of) {
        Ok(moved) => moved,
        Err(e) => {
            tracing::error!(error = %e, "partition refused");
            return Ok(ExitCode::FAILURE);
        }
    };
    let report = validate(&moved.current, &moved.historical, &config.validation_options(as_of));
    if !report.is_clean() {
        println!("{report}");
        tracing::error!(errors = report.errors.len(), "not saving: partitioned corpus has errors");
        return Ok(ExitCode::FAILURE);
    }

    store.save(Collection::LegislatorsCurrent, &current.with_records(moved.current))?;
    store.save(Collection::LegislatorsHistorical, &historical.with_records(moved.historical))?;
    for bioguide in &moved.retired {
        println!("retired {bioguide}");
    }
    for bioguide in &moved.returned {
        println!("returned {bioguide}");
    }
    for bioguide in &moved.added {
        println!("added {bioguide}");
    }
    Ok(ExitCode::SUCCESS)
}

fn run_sweep(store: &RecordStore) -> anyhow::Result<ExitCode> {
    let current = store.load::<Legislator>(Collection::LegislatorsCurrent)?;

    if store.exists(Collection::DistrictOffices) {
        let offices = store.load::<OfficeEntry>(Collection::DistrictOffices)?;
        let swept = sweep_offices(offices.records.clone(), &current.records);
        for bioguide in &swept.dropped {
            println!("dropped offices of {bioguide}");
        }
        store.save(Collection::DistrictOffices, &offices.with_records(swept.kept))?;
    }
    if store.exists(Collection::SocialMedia) {
        let social = store.load::<SocialMediaEntry>(Collection::SocialMedia)?;
        let swept = sweep_social_media(social.records.clone(), &current.records);
        for bioguide in &swept.dropped {
            println!("dropped social media of {bioguide}");
        }
        store.save(Collection::SocialMedia, &social.with_records(swept.kept))?;
    }
    Ok(ExitCode::SUCCESS)
}

fn run_ranks(store: &RecordStore) -> anyhow::Result<ExitCode> {
    let current = store.load::<Legislator>(Collection::LegislatorsCurrent)?;
    let assignment = assign_senate_ranks(&current.records);
    for note in &assignment.notes {
        tracing::warn!(state = %note.state, bioguide = %note.bioguide, "{}", note.message);
        println!("{note}");
    }
    store.save(Collection::LegislatorsCurrent, &current.with_records(assignment.legislators))?;
    Ok(ExitCode::SUCCESS)
}

fn run_add_term(
    store: &RecordStore,
    config: &Config,
    bioguide: &str,
    term_path: &Path,
) -> anyhow::Result<ExitCode> {
    let carry = config.carry_forward()?;
    let text = std::fs::read_to_string(term_path)
        .with_context(|| format!("reading {}", term_path.display()))?;
    let term: Term = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing term in {}", term_path.display()))?;

    for collection in [Collection::LegislatorsCurrent, Collection::LegislatorsHistorical] {
        let mut doc = store.load::<Legislator>(collection)?;
        let Some(slot) = doc.records.iter_mut().find(|l| l.bioguide() == bioguide) else {
            continue;
        };
        let updated = match apply_new_term(slot, term, &carry) {
            Ok(updated) => updated,
            Err(e) => {
                tracing::error!(error = %e, "term refused");
                return Ok(ExitCode::FAILURE);
            }
        };
        *slot = updated;
        store.save(collection, &doc)?;
        println!("added term to {bioguide} in {collection}");
        if collection == Collection::LegislatorsHistorical {
            tracing::info!(bioguide, "legislator is historical; run partition to return them to current");
        }
        return Ok(ExitCode::SUCCESS);
    }
    tracing::error!(bioguide, "no such legislator");
    Ok(ExitCode::FAILURE)
}
