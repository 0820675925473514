//! Import statement matcher
//!
//! Resource docs carry an import example such as
//!
//! ```text
//! terraform import azurerm_storage_account.example /subscriptions/.../providers/Microsoft.Storage/storageAccounts/acct
//! ```
//!
//! The provider path after `/providers/` is compared with a reference
//! resource type (`microsoft.storage/storageaccounts/...`) segment by segment:
//! each reference segment stands for exactly one path component, so a short
//! reference type never swallows a deeper path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::traits::FileSystem;

/// One import statement that lines up with a reference resource type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchRecord {
    /// Terraform resource type from the import statement, e.g. `azurerm_storage_account`
    pub terraform_resource: String,

    /// First segment of the reference resource, e.g. `microsoft.storage`
    pub provider_name: String,

    /// Lower-cased provider path without its namespace component
    pub azure_resource_type: String,
}

/// A document that could not be scanned
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of scanning every document for one reference resource
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceScan {
    /// The resource string cannot be turned into a segment pattern; nothing was read
    Rejected,

    Scanned {
        matches: Vec<MatchRecord>,
        skipped: Vec<SkippedDocument>,
    },
}

impl ResourceScan {
    /// Matches found, or `None` when the resource was rejected or matched nothing
    pub fn matches(&self) -> Option<&[MatchRecord]> {
        match self {
            ResourceScan::Scanned { matches, .. } if !matches.is_empty() => {
                Some(matches.as_slice())
            }
            _ => None,
        }
    }

    pub fn skipped(&self) -> &[SkippedDocument] {
        match self {
            ResourceScan::Scanned { skipped, .. } => skipped.as_slice(),
            ResourceScan::Rejected => &[],
        }
    }
}

/// Anchored pattern built from a `provider/type[/subtype...]` reference resource
#[derive(Debug)]
pub struct ResourcePattern {
    provider: String,
    regex: Regex,
}

impl ResourcePattern {
    /// Build the pattern, or `None` if the resource has fewer than two segments
    /// or any type segment is empty or contains whitespace
    pub fn parse(resource: &str) -> Option<Self> {
        let segments: Vec<&str> = resource.split('/').collect();
        if segments.len() < 2 {
            return None;
        }

        let mut pattern = format!("^{}", regex::escape(&segments[0].to_lowercase()));
        for segment in &segments[1..] {
            if segment.is_empty() || segment.chars().any(char::is_whitespace) {
                return None;
            }
            pattern.push_str("/[^/]+");
        }
        pattern.push('$');

        let regex = Regex::new(&pattern).ok()?;

        Some(Self {
            provider: segments[0].to_string(),
            regex,
        })
    }

    /// First segment of the resource, as given
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Full-string match against an already lower-cased provider path
    pub fn is_match(&self, provider_path: &str) -> bool {
        self.regex.is_match(provider_path)
    }
}

/// Finds `terraform import` statements and matches them against reference resources
pub struct ImportMatcher {
    import_pattern: Regex,
}

impl ImportMatcher {
    /// Create a matcher for import statements whose resource identifier starts with `prefix`
    pub fn new(prefix: &str) -> Result<Self> {
        // Match import lines like:
        // terraform import azurerm_resource_group.example /subscriptions/0000/resourceGroups/group1
        // terraform import azurerm_storage_account.example /subscriptions/.../providers/Microsoft.Storage/storageAccounts/acct
        // Group 1 is the resource type, group 2 the provider path after the last `/providers/`
        let pattern = format!(
            r"terraform\s+import\s+({}\w+)[^\n]*/providers/([^\s/]+(?:/[^/\s]+)*)",
            regex::escape(prefix)
        );

        let import_pattern = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid import statement pattern for prefix '{}'", prefix))?;

        Ok(Self { import_pattern })
    }

    /// All matches of `pattern` among the import statements in `text`
    pub fn matches_in_text(&self, pattern: &ResourcePattern, text: &str) -> Vec<MatchRecord> {
        let mut matches = Vec::new();

        for caps in self.import_pattern.captures_iter(text) {
            let (Some(resource), Some(path)) = (caps.get(1), caps.get(2)) else {
                continue;
            };

            let provider_path = path.as_str().to_lowercase();
            if !pattern.is_match(&provider_path) {
                continue;
            }

            let azure_resource_type = provider_path
                .split('/')
                .skip(1)
                .collect::<Vec<_>>()
                .join("/");

            matches.push(MatchRecord {
                terraform_resource: resource.as_str().to_string(),
                provider_name: pattern.provider().to_string(),
                azure_resource_type,
            });
        }

        matches
    }

    /// Scan every document for one reference resource.
    ///
    /// Documents are read on each call; a document that fails to read is
    /// recorded in `skipped` and the remaining documents are still scanned.
    pub fn scan_resource(
        &self,
        fs: &dyn FileSystem,
        resource: &str,
        documents: &[PathBuf],
    ) -> ResourceScan {
        let Some(pattern) = ResourcePattern::parse(resource) else {
            return ResourceScan::Rejected;
        };

        let mut matches = Vec::new();
        let mut skipped = Vec::new();

        for document in documents {
            match self.scan_document(fs, &pattern, document) {
                Ok(found) => matches.extend(found),
                Err(e) => skipped.push(SkippedDocument {
                    path: document.clone(),
                    reason: format!("{:#}", e),
                }),
            }
        }

        ResourceScan::Scanned { matches, skipped }
    }

    fn scan_document(
        &self,
        fs: &dyn FileSystem,
        pattern: &ResourcePattern,
        document: &Path,
    ) -> Result<Vec<MatchRecord>> {
        let content = fs.read_to_string(document)?;
        Ok(self.matches_in_text(pattern, &content))
    }
}
