//! Test helpers for building documentation trees and reference lists
//!
//! Docs are laid out the way terraform-provider-azurerm keeps them
//! (`website/docs/r/<name>.html.markdown`, each with an `## Import` section).

#![cfg(test)]

use crate::traits::{FileSystem, MockFileSystem};
use std::path::PathBuf;

/// Builder for a resource documentation tree in the mock filesystem
pub struct DocsTreeBuilder {
    root: PathBuf,
    documents: Vec<(String, String)>, // (relative path, content)
    unreadable: Vec<(String, String)>, // (relative path, error)
}

impl DocsTreeBuilder {
    /// Create a new builder rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            documents: Vec::new(),
            unreadable: Vec::new(),
        }
    }

    /// Add a resource page whose import example uses `resource_id`
    pub fn resource_doc(mut self, file: &str, terraform_resource: &str, resource_id: &str) -> Self {
        self.documents
            .push((file.to_string(), resource_doc(terraform_resource, resource_id)));
        self
    }

    /// Add a document with arbitrary content
    pub fn document(mut self, file: &str, content: &str) -> Self {
        self.documents.push((file.to_string(), content.to_string()));
        self
    }

    /// Add a document that is listed but fails to read
    pub fn unreadable(mut self, file: &str, reason: &str) -> Self {
        self.unreadable.push((file.to_string(), reason.to_string()));
        self
    }

    /// Build the tree in the mock filesystem and return the root path
    pub fn build(self, fs: &MockFileSystem) -> PathBuf {
        fs.add_dir_all(&self.root);

        for (file, content) in &self.documents {
            fs.write(&self.root.join(file), content).unwrap();
        }

        for (file, reason) in &self.unreadable {
            fs.add_unreadable(&self.root.join(file), reason);
        }

        self.root
    }
}

/// Render a resource page in the azurerm docs layout
pub fn resource_doc(terraform_resource: &str, resource_id: &str) -> String {
    format!(
        r#"---
subcategory: "Test"
layout: "azurerm"
page_title: "Azure Resource Manager: {resource}"
---

# {resource}

Manages a test resource.

## Example Usage

```hcl
resource "{resource}" "example" {{
  name = "example"
}}
```

## Import

This resource can be imported using the `resource id`, e.g.

```shell
terraform import {resource}.example {id}
```
"#,
        resource = terraform_resource,
        id = resource_id
    )
}

/// Render tag-support CSV from `(providerName, resourceType, supportsTags)` rows
pub fn tag_support_csv(rows: &[(&str, &str, &str)]) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["providerName", "resourceType", "supportsTags"])
        .unwrap();

    for (provider, resource_type, supports_tags) in rows {
        writer
            .write_record([provider, resource_type, supports_tags])
            .unwrap();
    }

    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}
