mod commands;
mod config;
mod context;
mod error;
mod output;
mod scan;
mod traits;

#[cfg(test)]
mod test_helpers;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use commands::ScanCommand;
use config::{
    DEFAULT_CSV_URL, DEFAULT_DOCS_PATH, DEFAULT_EXTENSION, DEFAULT_IMPORT_PREFIX,
    DEFAULT_OUTPUT_FILE, DEFAULT_SAMPLE_SIZE, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS, ScanConfig,
};
use context::Context;
use url::Url;

#[derive(Parser)]
#[command(name = "tagscan")]
#[command(
    about = "Match azurerm resource docs against Azure resource types that support tags",
    long_about = "Downloads the Azure tag-support list, scans the terraform-provider-azurerm \
                  resource docs for `terraform import` examples and writes the matching \
                  resources to a CSV report. Run it from the root of the provider repository."
)]
#[command(version)]
struct Cli {
    /// Directory holding the resource documentation
    #[arg(long, env = "TAGSCAN_DOCS_PATH", default_value = DEFAULT_DOCS_PATH)]
    docs_path: PathBuf,

    /// CSV report to write (replaced if it exists)
    #[arg(short, long, env = "TAGSCAN_OUTPUT", default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// URL of the tag-support reference CSV
    #[arg(long, env = "TAGSCAN_CSV_URL", default_value = DEFAULT_CSV_URL, value_parser = config::parse_csv_url)]
    csv_url: Url,

    /// File name suffix of documents to scan
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Prefix of terraform resource identifiers in import statements
    #[arg(long, default_value = DEFAULT_IMPORT_PREFIX)]
    import_prefix: String,

    /// Number of resources matched in parallel
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Timeout in seconds for downloading the reference CSV
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Number of sample results printed after the scan
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,
}

impl Cli {
    fn into_config(self) -> ScanConfig {
        ScanConfig {
            docs_path: self.docs_path,
            output_file: self.output,
            csv_url: self.csv_url,
            extension: self.extension,
            import_prefix: self.import_prefix,
            workers: self.workers,
            fetch_timeout: Duration::from_secs(self.timeout_secs),
            sample_size: self.sample_size,
        }
    }
}

fn main() -> ExitCode {
    let config = Cli::parse().into_config();
    let ctx = Context::new(config.fetch_timeout);

    match ScanCommand::execute(&ctx, &config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            ScanCommand::report_failure(&ctx, &config, &err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = Cli::try_parse_from(["tagscan"]).unwrap().into_config();
        let defaults = ScanConfig::default();

        assert_eq!(config.docs_path, defaults.docs_path);
        assert_eq!(config.output_file, defaults.output_file);
        assert_eq!(config.csv_url, defaults.csv_url);
        assert_eq!(config.workers, defaults.workers);
        assert_eq!(config.fetch_timeout, defaults.fetch_timeout);
    }

    #[test]
    fn test_cli_overrides() {
        let config = Cli::try_parse_from([
            "tagscan",
            "--docs-path",
            "docs/resources",
            "-o",
            "out.csv",
            "--csv-url",
            "http://localhost:8080/tags.csv",
            "--workers",
            "2",
            "--timeout-secs",
            "30",
        ])
        .unwrap()
        .into_config();

        assert_eq!(config.docs_path, PathBuf::from("docs/resources"));
        assert_eq!(config.output_file, PathBuf::from("out.csv"));
        assert_eq!(config.csv_url.as_str(), "http://localhost:8080/tags.csv");
        assert_eq!(config.workers, 2);
        assert_eq!(config.fetch_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_cli_rejects_bad_url() {
        assert!(Cli::try_parse_from(["tagscan", "--csv-url", "file:///tmp/tags.csv"]).is_err());
    }
}
