// revdiff CLI - annotate row/cell differences across adjacent workbook sheets

mod exit_codes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use exit_codes::{EXIT_DECODE, EXIT_ENCODE, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use revdiff_core::{diff_adjacent_sheets, DiffError, Stage};

#[derive(Parser)]
#[command(name = "revdiff")]
#[command(about = "Annotate added/removed rows and changed cells across adjacent sheets of a workbook")]
#[command(version)]
#[command(after_help = "\
Examples:
  revdiff revisions.xlsx
  revdiff revisions.xlsx -o annotated.xlsx --summary
  revdiff revisions.xlsx --json | jq '.pairs[0].summary'

Sheets are diffed as adjacent pairs (1 vs 2, 2 vs 3, ...) joined on the
first column. Sheet 1 of the output is unmodified; later sheets carry
highlight + status-text annotations.")]
struct Cli {
    /// Input workbook (.xlsx)
    input: PathBuf,

    /// Output workbook path
    #[arg(long, short = 'o', default_value = "output_diff.xlsx")]
    output: PathBuf,

    /// Print a human-readable per-pair summary to stdout
    #[arg(long)]
    summary: bool,

    /// Print the full diff report as JSON to stdout
    #[arg(long)]
    json: bool,

    /// Suppress the final status note on stderr
    #[arg(long, short = 'q')]
    quiet: bool,
}

struct CliError {
    code: u8,
    message: String,
    hint: Option<String>,
}

impl From<DiffError> for CliError {
    fn from(err: DiffError) -> Self {
        let code = match err.stage {
            Stage::Decode => EXIT_DECODE,
            Stage::Encode => EXIT_ENCODE,
            Stage::Io => EXIT_ERROR,
        };
        CliError {
            code,
            message: err.to_string(),
            hint: None,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.summary && cli.json {
        return Err(CliError {
            code: EXIT_USAGE,
            message: "--summary and --json are mutually exclusive".into(),
            hint: Some("pick one output mode".into()),
        });
    }

    let mut document = revdiff_io::decode_path(&cli.input)?;
    let report = diff_adjacent_sheets(&mut document);
    revdiff_io::encode_path(&document, &cli.output)?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("cannot serialize report: {e}"),
            hint: None,
        })?;
        println!("{json}");
    } else if cli.summary {
        print!("{}", report.render_text());
    }

    if !cli.quiet {
        eprintln!("wrote {}", cli.output.display());
    }
    Ok(())
}
