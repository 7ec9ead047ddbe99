use std::fs::File;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::domain::Accession;
use crate::error::FetchError;

/// Seam between the fetch worker and the remote catalog. Tests substitute
/// an implementation that writes archive fixtures locally.
pub trait DatasetsClient: Send + Sync {
    fn download_genome_zip(
        &self,
        accession: &Accession,
        destination: &Path,
    ) -> Result<(), FetchError>;
}

#[derive(Clone)]
pub struct NcbiHttpClient {
    client: Client,
    base_url: String,
}

impl NcbiHttpClient {
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("genome-fetch/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| FetchError::NcbiHttp(err.to_string()))?,
        );

        if let Ok(api_key) = std::env::var("NCBI_API_KEY") {
            if !api_key.trim().is_empty() {
                headers.insert(
                    "api-key",
                    HeaderValue::from_str(api_key.trim())
                        .map_err(|err| FetchError::NcbiHttp(err.to_string()))?,
                );
            }
        }

        // No request timeout: pacing between requests is the only traffic
        // control, and a large assembly can legitimately take a long time.
        let client = Client::builder()
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| FetchError::NcbiHttp(err.to_string()))?;

        Ok(Self {
            client,
            base_url: "https://api.ncbi.nlm.nih.gov/datasets/v2alpha".to_string(),
        })
    }

    fn write_response_to_file(
        &self,
        mut response: reqwest::blocking::Response,
        destination: &Path,
    ) -> Result<(), FetchError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "NCBI request failed".to_string());
            return Err(FetchError::NcbiStatus { status, message });
        }

        let mut file =
            File::create(destination).map_err(|err| FetchError::Filesystem(err.to_string()))?;
        std::io::copy(&mut response, &mut file)
            .map_err(|err| FetchError::Filesystem(err.to_string()))?;
        Ok(())
    }
}

impl DatasetsClient for NcbiHttpClient {
    fn download_genome_zip(
        &self,
        accession: &Accession,
        destination: &Path,
    ) -> Result<(), FetchError> {
        let url = format!(
            "{}/genome/accession/{}/download",
            self.base_url,
            accession.as_str()
        );
        let filename = format!("{}.zip", accession.as_str());
        let response = self
            .client
            .get(&url)
            .query(&[
                ("include_annotation_type", "GENOME_FASTA"),
                ("filename", filename.as_str()),
            ])
            .send()
            .map_err(|err| FetchError::NcbiHttp(err.to_string()))?;
        self.write_response_to_file(response, destination)
    }
}
