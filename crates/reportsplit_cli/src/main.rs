//! `reportsplit`: split report spreadsheets into one workbook per entity.

mod commands;
mod interactive;
mod logging;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use reportsplit_segment::EnumReportType;

#[derive(Parser)]
#[command(name = "reportsplit")]
#[command(
    author,
    version,
    about = "Split report spreadsheets into one workbook per entity"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    // `interactive` when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split one sheet into per-entity workbooks
    Split {
        /// Source workbook; `.xlsx` is appended when no extension is given
        input: String,

        /// Sheet to split
        #[arg(short, long)]
        sheet: String,

        /// Report type keyword (annual, month, shift, statement, credit)
        #[arg(short = 't', long = "type")]
        report_type: EnumReportType,

        /// Output directory (default: <source stem>_output)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Prompt for requests and run them in the background
    Interactive,

    /// Export one sheet as CSV of trimmed, non-empty cell texts
    #[command(alias = "csv")]
    ToCsv {
        /// Source workbook
        input: String,

        /// Sheet to export
        #[arg(short, long)]
        sheet: String,

        /// Output CSV file (default: <source stem>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List report types with their marker column and pattern
    Types,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Split {
            input,
            sheet,
            report_type,
            output_dir,
        } => commands::cmd_split(&input, &sheet, report_type, output_dir),
        Commands::Interactive => {
            let mut reader = io::stdin().lock();
            let mut writer = io::stdout();
            interactive::run_interactive(&mut reader, &mut writer).map(|_| ())
        }
        Commands::ToCsv {
            input,
            sheet,
            output,
        } => commands::cmd_to_csv(&input, &sheet, output).map(|_| ()),
        Commands::Types => {
            commands::cmd_types();
            Ok(())
        }
    }
}
