use std::fs;
use std::thread;
use std::time::Duration;

use camino::Utf8PathBuf;

use crate::domain::Accession;
use crate::error::FetchError;
use crate::fetch::fetch_genome;
use crate::ncbi::DatasetsClient;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub outdir: Utf8PathBuf,
    /// Pause inserted after every download attempt. Zero skips the sleep.
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub accession: String,
    pub processed: usize,
    pub total: usize,
    pub succeeded: bool,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn event(&self, _event: ProgressEvent) {}
}

pub struct App<C: DatasetsClient> {
    client: C,
}

impl<C: DatasetsClient> App<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Runs the fetch loop over `accessions` in order. Per-accession
    /// failures are logged and tallied; only output-directory creation is
    /// fatal here.
    pub fn run(
        &self,
        accessions: &[Accession],
        options: &RunOptions,
        sink: &dyn ProgressSink,
    ) -> Result<RunSummary, FetchError> {
        fs::create_dir_all(options.outdir.as_std_path()).map_err(|err| {
            FetchError::Filesystem(format!("create output dir {}: {err}", options.outdir))
        })?;

        let mut succeeded = 0usize;
        for (index, accession) in accessions.iter().enumerate() {
            let outcome = fetch_genome(&self.client, accession, &options.outdir);
            match &outcome {
                Ok(path) => {
                    tracing::info!("downloaded {accession} -> {path}");
                    succeeded += 1;
                }
                Err(err) => {
                    tracing::warn!("error downloading {accession}: {err}");
                }
            }
            sink.event(ProgressEvent {
                accession: accession.to_string(),
                processed: index + 1,
                total: accessions.len(),
                succeeded: outcome.is_ok(),
            });
            if !options.delay.is_zero() {
                thread::sleep(options.delay);
            }
        }

        Ok(RunSummary {
            attempted: accessions.len(),
            succeeded,
        })
    }
}
