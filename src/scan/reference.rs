//! Tag-support reference list.
//!
//! The list is a CSV published alongside the Azure resource capability docs,
//! one row per resource type with a `supportsTags` flag.

use serde::Deserialize;

use crate::error::ScanError;
use crate::traits::HttpClient;

/// One row of the tag-support CSV (extra columns are ignored)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagSupportRow {
    #[serde(default)]
    supports_tags: String,
    provider_name: String,
    resource_type: String,
}

impl TagSupportRow {
    fn supports_tags(&self) -> bool {
        self.supports_tags.trim().to_uppercase() == "TRUE"
    }

    /// `Microsoft.Storage` + `storageAccounts` -> `microsoft.storage/storageAccounts`
    fn reference_resource(&self) -> String {
        format!(
            "{}/{}",
            self.provider_name.to_lowercase().replace(' ', "."),
            self.resource_type
        )
    }
}

/// Downloads the reference list and keeps the resource types that support tags
pub struct ReferenceFetcher<'a> {
    http: &'a dyn HttpClient,
    url: &'a str,
}

impl<'a> ReferenceFetcher<'a> {
    pub fn new(http: &'a dyn HttpClient, url: &'a str) -> Self {
        Self { http, url }
    }

    /// Fetch the list and return `provider/resourceType` for every taggable row
    pub fn fetch(&self) -> Result<Vec<String>, ScanError> {
        let body = self.http.get(self.url).map_err(|e| ScanError::Fetch {
            url: self.url.to_string(),
            message: format!("{:#}", e),
        })?;

        parse_tag_support(&body)
    }
}

/// Parse tag-support CSV text; any malformed row fails the whole list
pub fn parse_tag_support(body: &str) -> Result<Vec<String>, ScanError> {
    let mut reader = csv::Reader::from_reader(body.as_bytes());

    let mut supported = Vec::new();
    for row in reader.deserialize::<TagSupportRow>() {
        let row = row?;
        if row.supports_tags() {
            supported.push(row.reference_resource());
        }
    }

    Ok(supported)
}
