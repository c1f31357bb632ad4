pub mod daily;
pub mod status;

use std::{fmt::Display, path::PathBuf};

use anyhow::Result;
use chrono::Local;
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use daily::{run_daily, DailyOptions, Snapshot};
use status::{print_phases, print_status};
use tracing::{info, level_filters::LevelFilter};

use crate::{
    coach::Coach,
    config::Config,
    journal::storage::JournalDirectory,
    llm::create_generator,
    utils::{
        clock::{Clock, DefaultClock, FixedClock},
        dir::{create_application_default_path, default_config_path},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "Daycoach", version, long_about = None)]
#[command(about = "Plans your day from yesterday's journal", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Option<Commands>,
    #[arg(
        long,
        global = true,
        help = "Config file. By default $XDG_CONFIG_HOME/daycoach/config.toml or $HOME/.config/daycoach/config.toml"
    )]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Journal directory. Overrides journal-dir from the config")]
    journals: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Act as if today was this date. Examples are \"yesterday\", \"15/03/2025\""
    )]
    date: Option<String>,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Review the last recorded day and append today's plan. This is the default")]
    Plan {
        #[arg(long, help = "Days to look back for a journal with tasks")]
        lookback: Option<u32>,
        #[arg(long, help = "Only generate the plan")]
        no_review: bool,
        #[arg(long, help = "Print the sections without writing them into the journal")]
        dry_run: bool,
    },
    #[command(about = "Only append a review of the last recorded day")]
    Review {
        #[arg(long, help = "Days to look back for a journal with tasks")]
        lookback: Option<u32>,
        #[arg(long, help = "Print the section without writing it into the journal")]
        dry_run: bool,
    },
    #[command(about = "Show metrics of the last recorded day without calling the model")]
    Status {
        #[arg(long, help = "Days to look back for a journal with tasks")]
        lookback: Option<u32>,
    },
    #[command(about = "Show the phase calendar")]
    Phases,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(
        CLI_PREFIX,
        &create_application_default_path()?,
        logging_level,
        args.log,
    )?;

    let config = Config::load(args.config.as_deref(), &default_config_path()?)?;
    let journal_dir = args.journals.unwrap_or_else(|| config.journal_dir());
    info!("Using journals in {journal_dir:?}");
    let storage = JournalDirectory::new(journal_dir);
    let clock = resolve_clock(args.date.as_deref(), args.date_style)?;
    let mut stdout = std::io::stdout();

    let commands = args.commands.unwrap_or(Commands::Plan {
        lookback: None,
        no_review: false,
        dry_run: false,
    });

    match commands {
        Commands::Plan {
            lookback,
            no_review,
            dry_run,
        } => {
            let options = DailyOptions {
                lookback_days: lookback.unwrap_or(config.lookback_days),
                review: !no_review,
                plan: true,
                dry_run,
            };
            let coach = create_coach(&config)?;
            run_daily(
                &storage,
                &coach,
                &config.phases,
                clock.as_ref(),
                options,
                &mut stdout,
            )
            .await?;
            Ok(())
        }
        Commands::Review { lookback, dry_run } => {
            let options = DailyOptions {
                lookback_days: lookback.unwrap_or(config.lookback_days),
                review: true,
                plan: false,
                dry_run,
            };
            let coach = create_coach(&config)?;
            run_daily(
                &storage,
                &coach,
                &config.phases,
                clock.as_ref(),
                options,
                &mut stdout,
            )
            .await?;
            Ok(())
        }
        Commands::Status { lookback } => {
            let snapshot = Snapshot::gather(
                &storage,
                &config.phases,
                clock.today(),
                lookback.unwrap_or(config.lookback_days),
            )
            .await?;
            print_status(&snapshot, &mut stdout)
        }
        Commands::Phases => print_phases(&config.phases, clock.today(), &mut stdout),
    }
}

fn create_coach(config: &Config) -> Result<Coach> {
    let generator = create_generator(&config.llm)?;
    Ok(Coach::new(
        generator,
        config.project.clone(),
        config.phases.clone(),
    ))
}

/// `--date` freezes the clock at the parsed moment, otherwise the system clock is used.
fn resolve_clock(date: Option<&str>, date_style: DateStyle) -> Result<Box<dyn Clock>> {
    let Some(date) = date else {
        return Ok(Box::new(DefaultClock));
    };
    match parse_date_string(date, Local::now(), date_style.into()) {
        Ok(moment) => {
            info!("Pretending today is {}", moment.date_naive());
            Ok(Box::new(FixedClock(moment)))
        }
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {e}"),
            )
            .into()),
    }
}
