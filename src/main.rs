use clap::{Parser, Subcommand};
use sheetmap::cli;
use sheetmap::DEFAULT_SHEET_NAME;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetmap")]
#[command(about = "Inspect worksheets the way sheetmap maps them to records.")]
#[command(long_about = "sheetmap - worksheet ⇄ typed record mapping

Shows what the record mapper sees in a workbook: the sheets, the header
row it binds columns from, and the data rows it turns into records.

COMMANDS:
  sheets   - List worksheets
  headers  - Show the header row and column positions
  rows     - Dump data rows keyed by header

EXAMPLES:
  sheetmap sheets people.xlsx
  sheetmap headers people.xlsx --sheet Staff
  sheetmap rows people.xlsx --json --limit 10

Set RUST_LOG=sheetmap=trace to see every cell left at its default.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the worksheets of a workbook
    Sheets {
        /// Path to workbook (.xlsx, .xlsm, .xlsb, .xls, .ods)
        file: PathBuf,
    },

    /// Show the header row and the column each header binds to
    Headers {
        /// Path to workbook
        file: PathBuf,

        /// Worksheet name
        #[arg(short, long, default_value = DEFAULT_SHEET_NAME, env = "SHEETMAP_SHEET")]
        sheet: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Dump data rows keyed by header text
    Rows {
        /// Path to workbook
        file: PathBuf,

        /// Worksheet name
        #[arg(short, long, default_value = DEFAULT_SHEET_NAME, env = "SHEETMAP_SHEET")]
        sheet: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Show at most this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "sheetmap=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sheets { file } => cli::sheets(file)?,

        Commands::Headers { file, sheet, json } => cli::headers(file, sheet, json)?,

        Commands::Rows {
            file,
            sheet,
            json,
            limit,
        } => cli::rows(file, sheet, json, limit)?,
    }

    Ok(())
}
