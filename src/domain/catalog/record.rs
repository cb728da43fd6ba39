//! Catalog record entity

use serde::Serialize;
use serde_json::{Map, Value};

/// Placeholder for scalar fields the source markup did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// One entry of the model catalog as extracted from the library page.
///
/// Every scalar field holds either the extracted text or [`NOT_AVAILABLE`];
/// list fields are empty when the markup carried no matching elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRecord {
    title: String,
    description: String,
    sizes: Vec<String>,
    capabilities: Vec<String>,
    pulls: String,
    tags: String,
    updated: String,
}

impl ModelRecord {
    /// Create a record with the given title and every other field absent
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: NOT_AVAILABLE.to_string(),
            sizes: Vec::new(),
            capabilities: Vec::new(),
            pulls: NOT_AVAILABLE.to_string(),
            tags: NOT_AVAILABLE.to_string(),
            updated: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_sizes(mut self, sizes: Vec<String>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_pulls(mut self, pulls: impl Into<String>) -> Self {
        self.pulls = pulls.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_updated(mut self, updated: impl Into<String>) -> Self {
        self.updated = updated.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn pulls(&self) -> &str {
        &self.pulls
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn updated(&self) -> &str {
        &self.updated
    }

    /// Case-insensitive exact comparison against the title
    pub fn has_title(&self, name: &str) -> bool {
        self.title.to_lowercase() == name.to_lowercase()
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        contains_ignore_case(&self.capabilities, capability)
    }

    pub fn has_size(&self, size: &str) -> bool {
        contains_ignore_case(&self.sizes, size)
    }

    /// Field name to value mapping, in declaration order
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::with_capacity(7);
        map.insert("title".to_string(), Value::from(self.title.clone()));
        map.insert("description".to_string(), Value::from(self.description.clone()));
        map.insert("sizes".to_string(), Value::from(self.sizes.clone()));
        map.insert(
            "capabilities".to_string(),
            Value::from(self.capabilities.clone()),
        );
        map.insert("pulls".to_string(), Value::from(self.pulls.clone()));
        map.insert("tags".to_string(), Value::from(self.tags.clone()));
        map.insert("updated".to_string(), Value::from(self.updated.clone()));
        map
    }
}

fn contains_ignore_case(values: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    values.iter().any(|v| v.to_lowercase() == needle)
}
