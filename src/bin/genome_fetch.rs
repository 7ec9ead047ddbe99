use std::process::ExitCode;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use genome_fetch::app::{App, ProgressEvent, ProgressSink, RunOptions};
use genome_fetch::error::FetchError;
use genome_fetch::input::resolve_accessions;
use genome_fetch::ncbi::NcbiHttpClient;

#[derive(Parser)]
#[command(name = "genome-fetch")]
#[command(about = "Download genome FASTA files from NCBI for a list of assembly accessions")]
#[command(version, author)]
struct Cli {
    /// Tab-separated input file with accession numbers
    #[arg(short, long)]
    input: Utf8PathBuf,

    /// Output directory for downloaded FASTA files, created if missing
    #[arg(short, long)]
    outdir: Utf8PathBuf,

    /// 0-based column index containing the accession numbers
    #[arg(short, long, default_value_t = 0)]
    column: usize,

    /// Delay between requests in seconds
    #[arg(short, long, default_value_t = 1.0)]
    delay: f64,
}

struct BarProgress {
    bar: ProgressBar,
}

impl ProgressSink for BarProgress {
    fn event(&self, event: ProgressEvent) {
        self.bar.set_message(event.accession);
        self.bar.inc(1);
    }
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<FetchError>() {
            return ExitCode::from(map_exit_code(err));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &FetchError) -> u8 {
    match error {
        FetchError::InputRead(_)
        | FetchError::InputParse(_)
        | FetchError::InvalidAccession(_) => 2,
        FetchError::NcbiHttp(_) | FetchError::NcbiStatus { .. } => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli.delay.is_finite() || cli.delay < 0.0 {
        return Err(miette::Report::msg("delay must be a non-negative number"));
    }

    // FetchError values go through Report::new, not into_diagnostic, so
    // main can still downcast them for the exit-code mapping.
    let accessions =
        resolve_accessions(cli.input.as_std_path(), cli.column).map_err(miette::Report::new)?;
    println!("Found {} accession numbers to process", accessions.len());

    let client = NcbiHttpClient::new().map_err(miette::Report::new)?;
    let app = App::new(client);
    let options = RunOptions {
        outdir: cli.outdir,
        delay: Duration::from_secs_f64(cli.delay),
    };

    let bar = ProgressBar::new(accessions.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("Downloading genomes [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .into_diagnostic()?
            .progress_chars("##-"),
    );
    let sink = BarProgress { bar: bar.clone() };

    let summary = app
        .run(&accessions, &options, &sink)
        .map_err(miette::Report::new)?;
    sink.bar.finish_and_clear();

    println!(
        "Download complete. Successfully downloaded {} out of {} genomes.",
        summary.succeeded, summary.attempted
    );
    Ok(())
}
