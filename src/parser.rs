use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::error::ScrapeError;
use crate::models::ProductRecord;
use crate::selectors::{CompiledField, CompiledProfile};

/// Extracts one record per in-stock product container, in document order.
///
/// A container missing a required field is logged and skipped; the rest of the
/// page is still processed.
pub fn parse_products(html: &str, profile: &CompiledProfile) -> Vec<ProductRecord> {
    let doc = Html::parse_document(html);
    let mut products = Vec::new();

    for (index, container) in doc.select(&profile.container).enumerate() {
        match parse_container(container, profile) {
            Ok(Some(product)) => products.push(product),
            Ok(None) => debug!(index, "skipping out-of-stock product"),
            Err(e) => warn!(index, error = %e, "error extracting details for a product"),
        }
    }

    debug!(count = products.len(), "extracted products");
    products
}

fn parse_container(
    container: ElementRef<'_>,
    profile: &CompiledProfile,
) -> Result<Option<ProductRecord>, ScrapeError> {
    let name = extract_field(container, &profile.name)?;
    let price = extract_field(container, &profile.price)?;
    let rating = extract_field(container, &profile.rating)?;
    let seller = extract_field(container, &profile.seller)?;

    if is_out_of_stock(container, &profile.stock, &profile.stock_phrase) {
        return Ok(None);
    }

    Ok(Some(ProductRecord {
        name,
        price,
        rating,
        seller,
    }))
}

fn extract_field(container: ElementRef<'_>, rule: &CompiledField) -> Result<String, ScrapeError> {
    match first_text(container, &rule.selector) {
        Some(text) => Ok(text),
        None => rule
            .default
            .clone()
            .ok_or(ScrapeError::MissingField(rule.field)),
    }
}

fn is_out_of_stock(container: ElementRef<'_>, selector: &Selector, phrase: &str) -> bool {
    first_text(container, selector).is_some_and(|text| text.contains(phrase))
}

fn first_text(container: ElementRef<'_>, selector: &Selector) -> Option<String> {
    container
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
}
