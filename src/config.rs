//! Run configuration shared by every scan stage.

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Docs directory of the terraform-provider-azurerm repository, relative to its root
pub const DEFAULT_DOCS_PATH: &str = "website/docs/r";
pub const DEFAULT_OUTPUT_FILE: &str = "terraform_resources_with_tags.csv";
pub const DEFAULT_CSV_URL: &str =
    "https://raw.githubusercontent.com/tfitzmac/resource-capabilities/main/tag-support.csv";
pub const DEFAULT_EXTENSION: &str = ".markdown";
pub const DEFAULT_IMPORT_PREFIX: &str = "azurerm_";
pub const DEFAULT_WORKERS: usize = 8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Everything a scan needs to know about its environment
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root of the documentation tree to walk
    pub docs_path: PathBuf,

    /// Where the CSV report is written (replaced on every run)
    pub output_file: PathBuf,

    /// Location of the tag-support reference CSV
    pub csv_url: Url,

    /// File name suffix of documents to scan
    pub extension: String,

    /// Prefix every terraform resource identifier in an import statement starts with
    pub import_prefix: String,

    /// Maximum number of resources matched concurrently
    pub workers: usize,

    /// Timeout for the reference list request
    pub fetch_timeout: Duration,

    /// Number of sample rows printed after the scan
    pub sample_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            docs_path: PathBuf::from(DEFAULT_DOCS_PATH),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            csv_url: default_csv_url(),
            extension: DEFAULT_EXTENSION.to_string(),
            import_prefix: DEFAULT_IMPORT_PREFIX.to_string(),
            workers: DEFAULT_WORKERS,
            fetch_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl ScanConfig {
    /// Absolute form of the docs path, for diagnostics
    pub fn absolute_docs_path(&self) -> PathBuf {
        std::path::absolute(&self.docs_path).unwrap_or_else(|_| self.docs_path.clone())
    }
}

/// Parse and validate a reference list URL (used as a clap value parser)
pub fn parse_csv_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL '{}': {}", value, e))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!(
            "unsupported URL scheme '{}', expected http or https",
            other
        )),
    }
}

fn default_csv_url() -> Url {
    Url::parse(DEFAULT_CSV_URL).expect("Invalid default CSV URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();

        assert_eq!(config.docs_path, PathBuf::from("website/docs/r"));
        assert_eq!(
            config.output_file,
            PathBuf::from("terraform_resources_with_tags.csv")
        );
        assert_eq!(config.csv_url.as_str(), DEFAULT_CSV_URL);
        assert_eq!(config.extension, ".markdown");
        assert_eq!(config.import_prefix, "azurerm_");
        assert_eq!(config.workers, 8);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.sample_size, 10);
    }

    #[test]
    fn test_parse_csv_url() {
        assert!(parse_csv_url("https://example.com/tag-support.csv").is_ok());
        assert!(parse_csv_url("http://127.0.0.1:8080/tags.csv").is_ok());

        let err = parse_csv_url("ftp://example.com/tags.csv").unwrap_err();
        assert!(err.contains("unsupported URL scheme"));

        assert!(parse_csv_url("not a url").is_err());
    }

    #[test]
    fn test_absolute_docs_path() {
        let config = ScanConfig::default();
        let absolute = config.absolute_docs_path();

        assert!(absolute.is_absolute());
        assert!(absolute.ends_with("website/docs/r"));
    }
}
