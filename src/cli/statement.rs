//! CLI commands for statements
//!
//! Bridges clap arguments to the statement service and the report writers.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::config::settings::offset_from_minutes;
use crate::config::Settings;
use crate::error::{StatementError, StatementResult};
use crate::models::{DateRange, Money, MovementKind};
use crate::reports::{ReportStyle, StatementReport};
use crate::services::{
    EngineOptions, RecordFilter, StatementRequest, StatementService, UnknownKindPolicy,
};
use crate::source::JsonFileSource;

/// Output format for a statement
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// One CSV row per movement
    Csv,
    /// JSON document for the page
    Json,
}

/// Arguments of `statement show`
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Account identifier at the movement source
    pub account: String,

    /// JSON file with raw movements keyed by account
    #[arg(long, env = "STATEMENT_SOURCE")]
    pub source: PathBuf,

    /// First day of the statement (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: String,

    /// Last day of the statement (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: String,

    /// Balance immediately before the first day
    #[arg(short, long, allow_hyphen_values = true, default_value = "0")]
    pub opening: String,

    /// Page to show (clamped into range)
    #[arg(short, long, default_value_t = 1, allow_hyphen_values = true)]
    pub page: i64,

    /// Days per page (defaults to the configured page size)
    #[arg(long, allow_hyphen_values = true)]
    pub page_size: Option<i64>,

    /// Show only these movement kinds (repeatable)
    #[arg(short, long = "kind")]
    pub kinds: Vec<MovementKind>,

    /// Show only movements whose counterparty contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Hide days without movements
    #[arg(long)]
    pub hide_empty: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Reporting timezone in minutes east of UTC (overrides settings)
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset: Option<i32>,

    /// Treat unknown operation codes as transfers instead of skipping them
    #[arg(long)]
    pub compat_transfers: bool,
}

impl ShowArgs {
    fn engine_options(&self, settings: &Settings) -> StatementResult<EngineOptions> {
        let mut options = settings.engine_options()?;
        if let Some(minutes) = self.utc_offset {
            options = options.with_offset(offset_from_minutes(minutes)?);
        }
        if self.compat_transfers {
            options = options.with_unknown_kind_policy(UnknownKindPolicy::TreatAsTransfer);
        }
        Ok(options)
    }

    fn filter(&self) -> RecordFilter {
        RecordFilter {
            kinds: if self.kinds.is_empty() {
                None
            } else {
                Some(self.kinds.clone())
            },
            counterparty_contains: self.search.clone(),
            hide_empty_days: self.hide_empty,
        }
    }

    fn request(&self, settings: &Settings) -> StatementResult<StatementRequest> {
        let range = DateRange::parse(&self.start, &self.end)?;
        let opening = Money::parse(&self.opening).map_err(|e| {
            StatementError::Validation(format!("Invalid opening balance: {}", e))
        })?;
        let page_size = self
            .page_size
            .unwrap_or_else(|| i64::try_from(settings.default_page_size).unwrap_or(i64::MAX));

        Ok(
            StatementRequest::new(self.account.as_str(), range, opening, page_size)
                .with_filter(self.filter())
                .page(self.page),
        )
    }
}

/// Handle `statement show`
pub fn handle_show_command(settings: &Settings, args: ShowArgs) -> StatementResult<()> {
    let options = args.engine_options(settings)?;
    let request = args.request(settings)?;
    let source = JsonFileSource::new(&args.source);

    let statement = StatementService::new(&source, options).build(request)?;
    let report = StatementReport::new(&statement).with_style(ReportStyle {
        currency_symbol: settings.currency_symbol.clone(),
        date_format: settings.date_format.clone(),
    });

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                StatementError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&report, args.format, &mut writer)?;
            writer.flush()?;
            eprintln!("Statement exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_report(&report, args.format, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    report: &StatementReport<'_>,
    format: OutputFormat,
    writer: &mut W,
) -> StatementResult<()> {
    match format {
        OutputFormat::Table => write!(writer, "{}", report.format_terminal())?,
        OutputFormat::Csv => report.export_csv(&mut *writer)?,
        OutputFormat::Json => {
            report.export_json(&mut *writer)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
