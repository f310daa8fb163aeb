//! Lookup rules that tie a search-results page template to `ProductRecord` fields.
//!
//! The built-in profile matches the current Amazon search markup. When the
//! markup drifts, supply a JSON profile instead of touching the parser:
//!
//! ```json
//! { "container": "div[data-asin]", "price": { "selector": "span.a-offscreen", "default": "Not Available" } }
//! ```
//!
//! Keys left out keep their built-in value.

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;
use crate::models::{NOT_AVAILABLE, NOT_RATED};

/// How one record field is located, and what happens when it is not found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub selector: String,
    /// `None` makes the field required: a container without it is skipped.
    #[serde(default)]
    pub default: Option<String>,
}

impl FieldRule {
    pub fn required(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            default: None,
        }
    }

    pub fn optional(selector: &str, default: &str) -> Self {
        Self {
            selector: selector.to_string(),
            default: Some(default.to_string()),
        }
    }
}

/// Text marker that flags a container as out of stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRule {
    pub selector: String,
    pub phrase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorProfile {
    pub container: String,
    pub name: FieldRule,
    pub price: FieldRule,
    pub rating: FieldRule,
    pub seller: FieldRule,
    pub out_of_stock: StockRule,
}

impl Default for SelectorProfile {
    fn default() -> Self {
        Self {
            container: "div[data-asin]".to_string(),
            name: FieldRule::required("span.a-text-normal"),
            price: FieldRule::optional("span.a-price-whole", NOT_AVAILABLE),
            rating: FieldRule::optional("span.a-icon-alt", NOT_RATED),
            seller: FieldRule::optional("span.a-size-small", NOT_AVAILABLE),
            out_of_stock: StockRule {
                selector: "span.a-declarative".to_string(),
                phrase: "Out of stock".to_string(),
            },
        }
    }
}

impl SelectorProfile {
    pub fn from_json_file(path: &Path) -> Result<Self, ScrapeError> {
        let raw = fs::read_to_string(path).map_err(|source| ScrapeError::SelectorFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ScrapeError::SelectorJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses every selector so a bad profile fails before anything is fetched.
    pub fn compile(&self) -> Result<CompiledProfile, ScrapeError> {
        Ok(CompiledProfile {
            container: parse_selector("container", &self.container)?,
            name: CompiledField::new("name", &self.name)?,
            price: CompiledField::new("price", &self.price)?,
            rating: CompiledField::new("rating", &self.rating)?,
            seller: CompiledField::new("seller", &self.seller)?,
            stock: parse_selector("out_of_stock", &self.out_of_stock.selector)?,
            stock_phrase: self.out_of_stock.phrase.clone(),
        })
    }
}

#[derive(Debug)]
pub struct CompiledField {
    pub field: &'static str,
    pub selector: Selector,
    pub default: Option<String>,
}

impl CompiledField {
    fn new(field: &'static str, rule: &FieldRule) -> Result<Self, ScrapeError> {
        Ok(Self {
            field,
            selector: parse_selector(field, &rule.selector)?,
            default: rule.default.clone(),
        })
    }
}

#[derive(Debug)]
pub struct CompiledProfile {
    pub container: Selector,
    pub name: CompiledField,
    pub price: CompiledField,
    pub rating: CompiledField,
    pub seller: CompiledField,
    pub stock: Selector,
    pub stock_phrase: String,
}

fn parse_selector(field: &'static str, css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::InvalidSelector {
        field,
        selector: css.to_string(),
        reason: e.to_string(),
    })
}
