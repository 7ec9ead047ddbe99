use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use zip::ZipArchive;

use crate::domain::Accession;
use crate::error::FetchError;
use crate::ncbi::DatasetsClient;

/// Downloads the archive for one accession and materializes
/// `<accession>.fasta` in `outdir`. The archive is removed whether or not
/// a sequence entry was found; an archive without a `.fna` entry is an
/// error for this accession rather than a silent success.
pub fn fetch_genome(
    client: &dyn DatasetsClient,
    accession: &Accession,
    outdir: &Utf8Path,
) -> Result<Utf8PathBuf, FetchError> {
    let zip_path = outdir.join(format!("{accession}.zip"));
    let fasta_path = outdir.join(format!("{accession}.fasta"));

    client.download_genome_zip(accession, zip_path.as_std_path())?;

    let extracted = extract_first_fna(&zip_path, &fasta_path);
    if let Err(err) = fs::remove_file(zip_path.as_std_path()) {
        tracing::warn!("failed to remove archive {zip_path}: {err}");
    }

    if extracted? {
        Ok(fasta_path)
    } else {
        Err(FetchError::NoSequenceEntry(accession.to_string()))
    }
}

/// Copies the bytes of the first `.fna` entry to `fasta_path`. Returns
/// `Ok(false)` when the archive holds no sequence entry.
fn extract_first_fna(zip_path: &Utf8Path, fasta_path: &Utf8Path) -> Result<bool, FetchError> {
    let file = fs::File::open(zip_path.as_std_path())
        .map_err(|err| FetchError::Filesystem(format!("open zip {zip_path}: {err}")))?;
    let mut archive = ZipArchive::new(file).map_err(|err| FetchError::Archive(err.to_string()))?;

    let entry_name = archive
        .file_names()
        .find(|name| name.ends_with(".fna"))
        .map(str::to_string);
    let Some(entry_name) = entry_name else {
        return Ok(false);
    };

    let mut entry = archive
        .by_name(&entry_name)
        .map_err(|err| FetchError::Archive(err.to_string()))?;
    let mut outfile = fs::File::create(fasta_path.as_std_path())
        .map_err(|err| FetchError::Filesystem(err.to_string()))?;
    io::copy(&mut entry, &mut outfile).map_err(|err| FetchError::Filesystem(err.to_string()))?;
    Ok(true)
}
