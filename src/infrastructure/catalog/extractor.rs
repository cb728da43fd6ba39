//! Library page extractor
//!
//! Splits the fetched document into entry fragments and turns each fragment
//! into a [`ModelRecord`]. The markup belongs to a third party, so every field
//! is looked up on its own and a missing element only blanks that field.

use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::domain::{DomainError, ModelRecord, NOT_AVAILABLE};

/// CSS selectors locating entries and their fields
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    /// Entry containers within the whole document
    #[serde(default = "default_entry")]
    pub entry: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default = "default_capability")]
    pub capability: String,
    #[serde(default = "default_pulls")]
    pub pulls: String,
    #[serde(default = "default_tags")]
    pub tags: String,
    #[serde(default = "default_updated")]
    pub updated: String,
}

fn default_entry() -> String {
    "#repo li".to_string()
}

fn default_title() -> String {
    "h2 span".to_string()
}

fn default_description() -> String {
    "p.text-neutral-800".to_string()
}

fn default_size() -> String {
    "span[x-test-size]".to_string()
}

fn default_capability() -> String {
    "span[x-test-capability]".to_string()
}

fn default_pulls() -> String {
    "span[x-test-pull-count]".to_string()
}

fn default_tags() -> String {
    "span[x-test-tag-count]".to_string()
}

fn default_updated() -> String {
    "span[x-test-updated]".to_string()
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
            title: default_title(),
            description: default_description(),
            size: default_size(),
            capability: default_capability(),
            pulls: default_pulls(),
            tags: default_tags(),
            updated: default_updated(),
        }
    }
}

/// Compiled selectors for the library page
#[derive(Debug, Clone)]
pub struct ModelExtractor {
    entry: Selector,
    title: Selector,
    description: Selector,
    size: Selector,
    capability: Selector,
    pulls: Selector,
    tags: Selector,
    updated: Selector,
}

impl ModelExtractor {
    /// Compile the configured selectors
    pub fn new(config: &SelectorConfig) -> Result<Self, DomainError> {
        Ok(Self {
            entry: parse_selector("entry", &config.entry)?,
            title: parse_selector("title", &config.title)?,
            description: parse_selector("description", &config.description)?,
            size: parse_selector("size", &config.size)?,
            capability: parse_selector("capability", &config.capability)?,
            pulls: parse_selector("pulls", &config.pulls)?,
            tags: parse_selector("tags", &config.tags)?,
            updated: parse_selector("updated", &config.updated)?,
        })
    }

    /// Extract every entry of `html` in document order
    pub fn extract_all(&self, html: &str) -> Vec<ModelRecord> {
        let document = Html::parse_document(html);

        document
            .select(&self.entry)
            .map(|fragment| self.extract(fragment))
            .collect()
    }

    /// Extract a single entry fragment
    pub fn extract(&self, fragment: ElementRef<'_>) -> ModelRecord {
        ModelRecord::new(text_or_na(fragment, &self.title))
            .with_description(text_or_na(fragment, &self.description))
            .with_sizes(all_texts(fragment, &self.size))
            .with_capabilities(all_texts(fragment, &self.capability))
            .with_pulls(text_or_na(fragment, &self.pulls))
            .with_tags(text_or_na(fragment, &self.tags))
            .with_updated(text_or_na(fragment, &self.updated))
    }
}

fn parse_selector(field: &str, css: &str) -> Result<Selector, DomainError> {
    Selector::parse(css).map_err(|e| {
        DomainError::configuration(format!("Invalid {} selector '{}': {}", field, css, e))
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first match, or the sentinel when nothing matches
fn text_or_na(fragment: ElementRef<'_>, selector: &Selector) -> String {
    fragment
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn all_texts(fragment: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    fragment.select(selector).map(element_text).collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::LIBRARY_HTML;
    use super::*;

    fn default_extractor() -> ModelExtractor {
        ModelExtractor::new(&SelectorConfig::default()).unwrap()
    }

    fn first_entry(html: &str) -> ModelRecord {
        let extractor = default_extractor();
        extractor.extract_all(html).remove(0)
    }

    #[test]
    fn test_extract_all_preserves_document_order() {
        let records = default_extractor().extract_all(LIBRARY_HTML);
        let titles: Vec<&str> = records.iter().map(|r| r.title()).collect();

        assert_eq!(titles, vec!["llama3.2", "Phi4", "llava"]);
    }

    #[test]
    fn test_extract_full_entry() {
        let record = first_entry(LIBRARY_HTML);

        assert_eq!(record.title(), "llama3.2");
        assert_eq!(
            record.description(),
            "Meta's Llama 3.2 goes small with 1B and 3B models."
        );
        assert_eq!(record.sizes(), ["1b", "3b"]);
        assert_eq!(record.capabilities(), ["tools"]);
        assert_eq!(record.pulls(), "9.1M");
        assert_eq!(record.tags(), "63");
        assert_eq!(record.updated(), "2 months ago");
    }

    #[test]
    fn test_missing_fields_degrade_per_field() {
        let records = default_extractor().extract_all(LIBRARY_HTML);

        let phi = &records[1];
        assert_eq!(phi.description(), NOT_AVAILABLE);
        assert!(phi.capabilities().is_empty());
        assert_eq!(phi.sizes(), ["14b"]);
        assert_eq!(phi.pulls(), "1.2M");

        let llava = &records[2];
        assert_eq!(llava.capabilities(), ["Vision", "tools"]);
        assert_eq!(llava.pulls(), NOT_AVAILABLE);
        assert_eq!(llava.tags(), NOT_AVAILABLE);
        assert_eq!(llava.updated(), NOT_AVAILABLE);
    }

    #[test]
    fn test_entry_without_any_markers() {
        let record = first_entry(r#"<div id="repo"><ul><li><a>bare</a></li></ul></div>"#);

        assert_eq!(record.title(), NOT_AVAILABLE);
        assert_eq!(record.description(), NOT_AVAILABLE);
        assert!(record.sizes().is_empty());
        assert!(record.capabilities().is_empty());
        assert_eq!(record.pulls(), NOT_AVAILABLE);
        assert_eq!(record.tags(), NOT_AVAILABLE);
        assert_eq!(record.updated(), NOT_AVAILABLE);
    }

    #[test]
    fn test_no_entry_containers_yields_empty() {
        let extractor = default_extractor();

        assert!(extractor.extract_all("<html><body><p>Maintenance</p></body></html>").is_empty());
        assert!(extractor.extract_all("").is_empty());
    }

    #[test]
    fn test_custom_selectors() {
        let config = SelectorConfig {
            entry: "article.model".to_string(),
            title: "h3".to_string(),
            ..SelectorConfig::default()
        };
        let extractor = ModelExtractor::new(&config).unwrap();

        let records = extractor.extract_all(
            r#"<article class="model"><h3> gemma </h3><span x-test-size>2b</span></article>"#,
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "gemma");
        assert_eq!(records[0].sizes(), ["2b"]);
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let config = SelectorConfig {
            size: "span[[".to_string(),
            ..SelectorConfig::default()
        };

        let err = ModelExtractor::new(&config).unwrap_err();

        assert!(matches!(err, DomainError::Configuration { .. }));
        assert!(err.to_string().contains("size selector"));
    }

    #[test]
    fn test_selector_config_fills_missing_fields() {
        let config: SelectorConfig = serde_json::from_str(r#"{"entry": "ul li"}"#).unwrap();

        assert_eq!(config.entry, "ul li");
        assert_eq!(config.title, "h2 span");
        assert_eq!(config.updated, "span[x-test-updated]");
    }
}
