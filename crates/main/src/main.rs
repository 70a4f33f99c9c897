use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use kyc_pdf::RenderOptions;

/// Renders a KYC submission payload (JSON) into a branded PDF.
///
/// Standard font metrics (LiberationSans or Arial) are looked up in `--fonts-dir`,
/// then `assets/fonts` next to the binary, then the system font directories. Without
/// them the bundled DejaVu Sans face is embedded.
#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Payload JSON file.
    input: PathBuf,

    /// Path of the PDF to write.
    output: PathBuf,

    /// Render titles and labels in this language instead of the payload's.
    #[arg(long, value_name = "CODE")]
    language: Option<String>,

    /// Directory containing the standard font metric files.
    #[arg(long, value_name = "DIR")]
    fonts_dir: Option<PathBuf>,

    /// Do not add section bookmarks to the PDF outline.
    #[arg(long)]
    no_bookmarks: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            return ExitCode::from(1);
        }
        Err(err) => err.exit(),
    };

    init_logging(cli.verbose);

    let options = RenderOptions::new()
        .with_language(cli.language)
        .with_fonts_dir(cli.fonts_dir)
        .with_bookmarks(!cli.no_bookmarks);

    match kyc_pdf::render_file(&cli.input, &cli.output, &options) {
        Ok(rendered) => {
            log::info!(
                "Wrote {} ({} page(s))",
                cli.output.display(),
                rendered.page_count
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
