use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "Not Available";
pub const NOT_RATED: &str = "Not Rated";

/// Column order of the output file.
pub const CSV_HEADER: [&str; 4] = ["Product Name", "Price", "Rating", "Seller Name"];

/// One in-stock product taken from a search-results container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Product Name")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Seller Name")]
    pub seller: String,
}
