use anyhow::Result;
use clap::{Parser, Subcommand};

use statement::cli::{handle_show_command, ShowArgs};
use statement::config::{paths::StatementPaths, settings::Settings};

#[derive(Parser)]
#[command(
    name = "statement",
    version,
    about = "Account statement aggregation engine",
    long_about = "Builds day-by-day account statements from raw movements: every day \
                  of the requested range, its movements in time order, and the \
                  consolidated balance at the end of the day, one page at a time."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and display a statement page
    #[command(alias = "extrato")]
    Show(ShowArgs),

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    statement::logging::init_tracing();

    let cli = Cli::parse();

    let paths = StatementPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Show(args)) => {
            handle_show_command(&settings, args)?;
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Settings already exist at: {}", paths.settings_file().display());
            } else {
                settings.save(&paths)?;
                println!("Settings written to: {}", paths.settings_file().display());
            }
        }
        Some(Commands::Config) => {
            println!("Statement Configuration");
            println!("=======================");
            println!("Settings file: {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Reporting UTC offset: {} min", settings.utc_offset_minutes);
            println!("  Unknown operation codes: {:?}", settings.unknown_kind_policy);
            println!("  Default page size: {}", settings.default_page_size);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format: {}", settings.date_format);
        }
        None => {
            println!("Statement - account statement aggregation engine");
            println!();
            println!("Run 'statement --help' for usage information.");
            println!("Run 'statement show --help' to build a statement.");
        }
    }

    Ok(())
}
