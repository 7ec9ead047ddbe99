use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    #[error("invalid accession: {0:?}")]
    InvalidAccession(String),

    #[error("failed to read input file {0}")]
    InputRead(PathBuf),

    #[error("failed to parse input file: {0}")]
    InputParse(String),

    #[error("NCBI request failed: {0}")]
    NcbiHttp(String),

    #[error("NCBI returned status {status}: {message}")]
    NcbiStatus { status: u16, message: String },

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("no FASTA (.fna) entry in archive for {0}")]
    NoSequenceEntry(String),
}
