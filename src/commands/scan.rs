use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as AnyhowContext, Result};

use crate::config::ScanConfig;
use crate::context::Context;
use crate::error::ScanError;
use crate::scan::{
    DocumentCollector, ImportMatcher, MatchReport, ReferenceFetcher, ResourceScan,
    SkippedDocument, map_bounded,
};
use crate::traits::Output;

pub struct ScanCommand;

/// What a finished scan produced
#[derive(Debug)]
pub struct ScanSummary {
    /// Reference resources that support tags
    pub resources: usize,

    /// Documents scanned per resource
    pub documents: usize,

    /// Documents that could not be read, once per path
    pub skipped: Vec<SkippedDocument>,

    pub report: MatchReport,
}

impl ScanSummary {
    /// One-line account of the work done, after the report summary
    pub fn print_totals(&self, output: &dyn Output) {
        let mut line = format!(
            "Scanned {} resources against {} documents, {} matches",
            self.resources,
            self.documents,
            self.report.len()
        );
        if !self.skipped.is_empty() {
            line.push_str(&format!(", {} unreadable", self.skipped.len()));
        }
        output.dimmed(&line);
    }
}

impl ScanCommand {
    /// Execute the scan: verify docs, fetch the reference list, match, write the report
    pub fn execute(ctx: &Context, config: &ScanConfig) -> Result<ScanSummary> {
        ctx.output.section("Tag-support scan");

        let collector = DocumentCollector::new(&*ctx.fs, &config.docs_path, &config.extension);

        // No point downloading anything without docs to compare against
        collector.verify_root()?;

        let resources = ReferenceFetcher::new(&*ctx.http, config.csv_url.as_str()).fetch()?;
        ctx.output.info(&format!(
            "Found {} resources supporting tags",
            resources.len()
        ));

        let documents = collector.collect()?;
        ctx.output.info(&format!(
            "Searching {} {} files...",
            documents.len(),
            config.extension.trim_start_matches('.')
        ));

        let resource_count = resources.len();
        let document_count = documents.len();

        let scans = Self::scan_resources(ctx, config, resources, documents)?;
        let skipped = Self::report_skipped(ctx, &scans);

        let report = MatchReport::from_scans(&scans);
        if report.is_empty() {
            ctx.output
                .warning("No documented import matched a resource type that supports tags");
        }
        report.write(&*ctx.fs, &config.output_file)?;
        report.print_summary(&*ctx.output, config.sample_size, &config.output_file);

        let summary = ScanSummary {
            resources: resource_count,
            documents: document_count,
            skipped,
            report,
        };
        summary.print_totals(&*ctx.output);

        Ok(summary)
    }

    /// Print a fatal error, with location hints when a path was missing
    pub fn report_failure(ctx: &Context, config: &ScanConfig, err: &anyhow::Error) {
        ctx.output.blank();
        ctx.output.error(&format!("Error: {:#}", err));

        let is_not_found = err
            .downcast_ref::<ScanError>()
            .is_some_and(ScanError::is_not_found);

        if is_not_found {
            if let Ok(current_dir) = std::env::current_dir() {
                ctx.output
                    .error_detail("Current directory", &current_dir.display().to_string());
            }
            ctx.output.error_detail(
                "Expected docs path",
                &config.absolute_docs_path().display().to_string(),
            );
        }
    }

    /// Match every resource against every document on a bounded worker pool
    fn scan_resources(
        ctx: &Context,
        config: &ScanConfig,
        resources: Vec<String>,
        documents: Vec<PathBuf>,
    ) -> Result<Vec<ResourceScan>> {
        let matcher = Arc::new(ImportMatcher::new(&config.import_prefix)?);
        let documents = Arc::new(documents);
        let fs = Arc::clone(&ctx.fs);

        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        runtime.block_on(map_bounded(resources, config.workers, move |resource| {
            matcher.scan_resource(&*fs, &resource, &documents)
        }))
    }

    /// Warn about unreadable documents; every resource re-reads them, so report each path once
    fn report_skipped(ctx: &Context, scans: &[ResourceScan]) -> Vec<SkippedDocument> {
        let mut by_path: BTreeMap<PathBuf, SkippedDocument> = BTreeMap::new();
        for skipped in scans.iter().flat_map(ResourceScan::skipped) {
            by_path
                .entry(skipped.path.clone())
                .or_insert_with(|| skipped.clone());
        }

        for skipped in by_path.values() {
            ctx.output.warning(&format!(
                "Error processing {}: {}",
                skipped.path.display(),
                skipped.reason
            ));
        }

        by_path.into_values().collect()
    }
}
