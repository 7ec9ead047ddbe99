use std::fmt;
use std::str::FromStr;

use crate::error::FetchError;

/// An assembly accession as listed in the remote catalog, e.g.
/// `GCF_000005845.2`. Tokens are kept verbatim apart from trimming; the
/// catalog accepts both RefSeq (GCF_) and GenBank (GCA_) accessions and we
/// leave shape validation to the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accession(String);

impl Accession {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Accession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Accession {
    type Err = FetchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || is_missing_marker(trimmed) {
            return Err(FetchError::InvalidAccession(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Placeholder tokens that tabular exports use for absent values.
fn is_missing_marker(value: &str) -> bool {
    value.eq_ignore_ascii_case("na")
        || value.eq_ignore_ascii_case("nan")
        || value.eq_ignore_ascii_case("null")
        || value == "-"
        || value == "."
}
