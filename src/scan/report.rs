use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ScanError;
use crate::scan::{MatchRecord, ResourceScan};
use crate::traits::{FileSystem, Output};

/// CSV header of the report
pub const REPORT_HEADER: [&str; 3] = ["terraform_resource", "provider_name", "azure_resource_type"];

/// Deduplicated, sorted matches across every scanned resource
#[derive(Debug, Default)]
pub struct MatchReport {
    records: Vec<MatchRecord>,
}

impl MatchReport {
    /// Flatten per-resource scans; rejected and empty scans contribute nothing.
    ///
    /// Records are ordered by terraform resource, then provider and type, so
    /// unchanged inputs always give the same report.
    pub fn from_scans<'a>(scans: impl IntoIterator<Item = &'a ResourceScan>) -> Self {
        let unique: BTreeSet<MatchRecord> = scans
            .into_iter()
            .filter_map(ResourceScan::matches)
            .flatten()
            .cloned()
            .collect();

        Self {
            records: unique.into_iter().collect(),
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the report as CSV; the header is written even without records
    pub fn to_csv(&self) -> Result<String, ScanError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());

        writer
            .write_record(REPORT_HEADER)
            .map_err(|e| ScanError::Report(e.to_string()))?;

        for record in &self.records {
            writer
                .write_record([
                    record.terraform_resource.as_str(),
                    record.provider_name.as_str(),
                    record.azure_resource_type.as_str(),
                ])
                .map_err(|e| ScanError::Report(e.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ScanError::Report(e.to_string()))?;

        String::from_utf8(bytes).map_err(|e| ScanError::Report(e.to_string()))
    }

    /// Write the CSV to `path`, replacing any previous report
    pub fn write(&self, fs: &dyn FileSystem, path: &Path) -> Result<()> {
        let csv = self.to_csv()?;
        fs.write(path, &csv)
            .with_context(|| format!("Failed to save results to {}", path.display()))
    }

    /// Print the match count, up to `sample_size` sample rows and where the report went
    pub fn print_summary(&self, output: &dyn Output, sample_size: usize, path: &Path) {
        output.blank();
        output.success(&format!(
            "Found {} matches. Sample results:",
            self.len()
        ));

        for record in self.records.iter().take(sample_size) {
            output.list_item(&format!(
                "{} -> {}/{}",
                record.terraform_resource, record.provider_name, record.azure_resource_type
            ));
        }

        if self.len() > sample_size {
            output.dimmed(&format!("... plus {} more", self.len() - sample_size));
        }

        output.blank();
        output.info(&format!("Full results saved to {}", path.display()));
    }
}
