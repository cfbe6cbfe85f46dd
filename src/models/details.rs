//! Book details record returned by the service and stored in the cache.

use serde::{Deserialize, Serialize};

use crate::models::upstream::VolumeInfo;

/// Details of a single book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetails {
    pub id: i64,
    pub author: String,
    pub year: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub pages: i64,
    pub publisher: String,
    pub language: String,
    #[serde(rename = "ISBN-10")]
    pub isbn_10: String,
    #[serde(rename = "ISBN-13")]
    pub isbn_13: String,
}

impl BookDetails {
    /// Builds the details record for `id` from an upstream volume.
    ///
    /// Missing upstream fields become empty strings or zero. The language
    /// code `en` and the print type `BOOK` are mapped to display values.
    pub fn from_volume(id: i64, volume: &VolumeInfo) -> Self {
        let language = match volume.language.as_deref() {
            Some("en") => "English".to_string(),
            other => other.unwrap_or_default().to_string(),
        };
        let kind = match volume.print_type.as_deref() {
            Some("BOOK") => "paperback".to_string(),
            other => other.unwrap_or_default().to_string(),
        };

        Self {
            id,
            author: volume.authors.first().cloned().unwrap_or_default(),
            year: volume.published_date.clone().unwrap_or_default(),
            kind,
            pages: volume.page_count.unwrap_or_default(),
            publisher: volume.publisher.clone().unwrap_or_default(),
            language,
            isbn_10: volume.isbn("ISBN_10").unwrap_or_default().to_string(),
            isbn_13: volume.isbn("ISBN_13").unwrap_or_default().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comedy_of_errors() -> VolumeInfo {
        serde_json::from_str(
            r#"{
                "title": "The Comedy of Errors",
                "authors": ["William Shakespeare", "Someone Else"],
                "publisher": "Courier Corporation",
                "publishedDate": "2002",
                "industryIdentifiers": [
                    {"type": "ISBN_10", "identifier": "0486424618"},
                    {"type": "ISBN_13", "identifier": "9780486424613"}
                ],
                "pageCount": 66,
                "printType": "BOOK",
                "language": "en"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_from_volume_maps_display_values() {
        let details = BookDetails::from_volume(486424618, &comedy_of_errors());

        assert_eq!(details.id, 486424618);
        assert_eq!(details.author, "William Shakespeare");
        assert_eq!(details.year, "2002");
        assert_eq!(details.kind, "paperback");
        assert_eq!(details.pages, 66);
        assert_eq!(details.publisher, "Courier Corporation");
        assert_eq!(details.language, "English");
        assert_eq!(details.isbn_10, "0486424618");
        assert_eq!(details.isbn_13, "9780486424613");
    }

    #[test]
    fn test_from_volume_missing_fields() {
        let volume: VolumeInfo =
            serde_json::from_str(r#"{"printType": "MAGAZINE", "language": "fr"}"#).unwrap();
        let details = BookDetails::from_volume(1, &volume);

        assert_eq!(details.author, "");
        assert_eq!(details.kind, "MAGAZINE");
        assert_eq!(details.language, "fr");
        assert_eq!(details.pages, 0);
        assert_eq!(details.isbn_10, "");
    }

    #[test]
    fn test_serialize_field_names() {
        let details = BookDetails::from_volume(486424618, &comedy_of_errors());
        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["type"], "paperback");
        assert_eq!(json["ISBN-10"], "0486424618");
        assert_eq!(json["ISBN-13"], "9780486424613");
        assert!(json.get("kind").is_none());
    }
}
