//! Address types

use serde::{Deserialize, Serialize};

/// A postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub city: String,
    pub country: String,
    /// Street address line
    pub address: String,
    pub post_code: String,
}

impl Address {
    /// Creates a new address
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        post_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
            address: address.into(),
            post_code: post_code.into(),
        }
    }

    /// Formats address for display, skipping blank parts
    pub fn format(&self) -> String {
        let city_line = format!("{} {}", self.post_code.trim(), self.city.trim());
        [self.address.trim(), city_line.trim(), self.country.trim()]
            .into_iter()
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
