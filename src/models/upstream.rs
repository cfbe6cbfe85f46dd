//! Subset of the Google Books volumes API response
//!
//! Only the fields needed to build [`BookDetails`](super::BookDetails) are
//! decoded; everything else is ignored.

use serde::Deserialize;

/// Response body of `GET /books/v1/volumes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumesResponse {
    #[serde(default)]
    pub total_items: i64,
    /// Absent when nothing matched the query
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub authors: Vec<String>,
    pub published_date: Option<String>,
    pub print_type: Option<String>,
    pub page_count: Option<i64>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
}

impl VolumeInfo {
    /// Returns the identifier of the given type, e.g. `ISBN_13`.
    pub fn isbn(&self, kind: &str) -> Option<&str> {
        self.industry_identifiers
            .iter()
            .find(|identifier| identifier.kind == kind)
            .map(|identifier| identifier.identifier.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
}
