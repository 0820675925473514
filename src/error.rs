use std::fmt;
use std::path::PathBuf;

/// Fatal errors that stop a scan run
#[derive(Debug)]
pub enum ScanError {
    /// The documentation root does not exist
    DocsDirectoryNotFound { expected: PathBuf },

    /// The reference list could not be downloaded
    Fetch { url: String, message: String },

    /// The reference list is not valid tag-support CSV
    ReferenceParse(String),

    /// The documentation root holds no file with the expected extension
    NoDocuments { root: PathBuf, extension: String },

    /// The CSV report could not be produced
    Report(String),
}

impl ScanError {
    /// Whether the failure is about a missing path, so callers can print location hints
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ScanError::DocsDirectoryNotFound { .. } | ScanError::NoDocuments { .. }
        )
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::DocsDirectoryNotFound { expected } => {
                write!(
                    f,
                    "Docs directory not found at: {}\n\
                     Please run this from the root of the terraform-provider-azurerm repository",
                    expected.display()
                )
            }
            ScanError::Fetch { url, message } => {
                write!(f, "Error fetching CSV from {}: {}", url, message)
            }
            ScanError::ReferenceParse(msg) => {
                write!(f, "Failed to parse tag-support CSV: {}", msg)
            }
            ScanError::NoDocuments { root, extension } => {
                write!(
                    f,
                    "No {} files found in {}",
                    extension.trim_start_matches('.'),
                    root.display()
                )
            }
            ScanError::Report(msg) => {
                write!(f, "Failed to build CSV report: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScanError {}

impl From<csv::Error> for ScanError {
    fn from(err: csv::Error) -> Self {
        ScanError::ReferenceParse(err.to_string())
    }
}
