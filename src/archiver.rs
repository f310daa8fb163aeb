use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::error::ScrapeError;
use crate::models::{CSV_HEADER, ProductRecord};

/// Writes the header row and one row per product, replacing any existing file.
pub fn save_to_csv(products: &[ProductRecord], path: &Path) -> Result<(), ScrapeError> {
    let file = File::create(path)?;
    // Header is written by hand so an empty slice still gets one.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(file);

    writer.write_record(CSV_HEADER)?;
    for product in products {
        writer.serialize(product)?;
    }
    writer.flush()?;

    debug!(rows = products.len(), path = %path.display(), "wrote csv");
    Ok(())
}
